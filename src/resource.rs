use {
    serde::{ser::Serializer, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// A resource a statement applies to: the wildcard `*` or an ARN string.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Resource {
    Any,
    Arn(String),
}

impl Resource {
    /// Wrap a caller-supplied ARN, stored verbatim. `*` maps to [Resource::Any]
    /// so it collapses with the default wildcard resource.
    pub fn from_arn<S: Into<String>>(arn: S) -> Self {
        let arn = arn.into();
        if arn == "*" {
            Self::Any
        } else {
            Self::Arn(arn)
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Arn(arn) => f.write_str(arn),
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use {crate::Resource, pretty_assertions::assert_eq, std::collections::BTreeSet};

    #[test_log::test]
    fn test_from_arn() {
        let r = Resource::from_arn("arn:aws:s3:::my-bucket/*");
        assert_eq!(r, Resource::Arn("arn:aws:s3:::my-bucket/*".to_string()));
        assert!(!r.is_any());
        assert_eq!(r.to_string(), "arn:aws:s3:::my-bucket/*");

        let any = Resource::from_arn("*");
        assert_eq!(any, Resource::Any);
        assert!(any.is_any());
        assert_eq!(any.to_string(), "*");
    }

    #[test_log::test]
    fn test_set_semantics() {
        let mut set = BTreeSet::new();
        set.insert(Resource::from_arn("*"));
        set.insert(Resource::Any);
        set.insert(Resource::from_arn("arn:aws:s3:::my-bucket"));
        set.insert(Resource::from_arn("arn:aws:s3:::my-bucket"));
        assert_eq!(set.len(), 2);

        // Any sorts ahead of every ARN.
        assert_eq!(set.iter().next(), Some(&Resource::Any));
    }

    #[test_log::test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&Resource::Any).unwrap(), r#""*""#);
        assert_eq!(
            serde_json::to_string(&Resource::from_arn("arn:aws:s3:::my-bucket")).unwrap(),
            r#""arn:aws:s3:::my-bucket""#
        );
    }
}
