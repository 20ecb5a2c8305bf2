use {
    crate::StanzaError,
    lazy_static::lazy_static,
    log::debug,
    regex::Regex,
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

lazy_static! {
    static ref QUALIFIED_ACTION: Regex =
        Regex::new("^[a-zA-Z0-9-]+:[A-Za-z]+$").expect("qualified action pattern");
}

/// A qualified action identifier of the form `servicePrefix:ActionName`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Action {
    service: String,
    action: String,
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, StanzaError> {
        let service = service.into();
        let action = action.into();
        let qualified = format!("{}:{}", service, action);

        if !QUALIFIED_ACTION.is_match(&qualified) {
            debug!("Action '{qualified}' does not match the servicePrefix:ActionName shape.");
            return Err(StanzaError::InvalidAction(qualified));
        }

        Ok(Self {
            service,
            action,
        })
    }

    /// Qualify a caller-supplied action name against `service`. A bare name is
    /// prefixed with `service`; a pre-qualified name must carry it already.
    pub fn qualify(service: &str, name: &str) -> Result<Self, StanzaError> {
        match name.split_once(':') {
            None => Self::new(service, name),
            Some((prefix, action)) => {
                if prefix != service {
                    debug!("Action '{name}' is qualified for service '{prefix}', not '{service}'.");
                    return Err(StanzaError::UnknownAction(name.to_string()));
                }
                Self::new(prefix, action)
            }
        }
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl FromStr for Action {
    type Err = StanzaError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        match v.split_once(':') {
            Some((service, action)) => Action::new(service, action),
            None => Err(StanzaError::InvalidAction(v.to_string())),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}:{}", self.service, self.action)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
