use {
    serde::{
        ser::{SerializeSeq, Serializer},
        Serialize,
    },
    std::collections::BTreeSet,
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let buf = Vec::new();
                let serde_formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = ::serde_json::Serializer::with_formatter(buf, serde_formatter);
                match self.serialize(&mut ser) {
                    Ok(()) => (),
                    Err(e) => {
                        ::log::error!("Failed to serialize: {}", e);
                        return Err(::std::fmt::Error {});
                    }
                };
                match std::str::from_utf8(&ser.into_inner()) {
                    Ok(s) => write!(f, "{}", s),
                    Err(e) => {
                        ::log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
                        Err(::std::fmt::Error {})
                    }
                }
            }
        }
    };
}

/// Serialize a set as a bare element when it holds exactly one item and as a
/// JSON list otherwise. This is the Aspen grammar's one-or-many convention for
/// the `Action` and `Resource` fields.
pub(crate) fn one_or_many<T, S>(set: &BTreeSet<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Ord + Serialize,
    S: Serializer,
{
    match (set.len(), set.iter().next()) {
        (1, Some(item)) => item.serialize(serializer),
        _ => {
            let mut seq = serializer.serialize_seq(Some(set.len()))?;
            for item in set {
                seq.serialize_element(item)?;
            }
            seq.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::serutil::one_or_many,
        pretty_assertions::assert_eq,
        serde::{Serialize, Serializer},
        std::collections::BTreeSet,
    };

    struct Wrapper(BTreeSet<String>);

    impl Serialize for Wrapper {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            one_or_many(&self.0, serializer)
        }
    }

    #[test_log::test]
    fn test_single_collapses() {
        let w = Wrapper(BTreeSet::from(["only".to_string()]));
        assert_eq!(serde_json::to_string(&w).unwrap(), r#""only""#);
    }

    #[test_log::test]
    fn test_many_render_as_list() {
        let w = Wrapper(BTreeSet::from(["a".to_string(), "b".to_string()]));
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"["a","b"]"#);
    }

    #[test_log::test]
    fn test_empty_renders_as_list() {
        let w = Wrapper(BTreeSet::new());
        assert_eq!(serde_json::to_string(&w).unwrap(), "[]");
    }
}
