use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Errors raised while building a statement. All of these indicate a contract
/// violation at the call site, not a transient condition; none are retryable.
#[derive(Debug, Eq, PartialEq)]
pub enum StanzaError {
    InvalidAction(String),
    InvalidArnTemplate(String),
    InvalidConditionOperator(String),
    NoActions,
    StatementFrozen,
    UnknownAction(String),
    UnknownResourceType(String),
    UnresolvedPlaceholder(String),
}

impl Display for StanzaError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidArnTemplate(template) => write!(f, "Invalid ARN template: {}", template),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::NoActions => f.write_str("Statement has no actions"),
            Self::StatementFrozen => f.write_str("Statement is finalized and can no longer be modified"),
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownResourceType(resource_type) => write!(f, "Unknown resource type: {}", resource_type),
            Self::UnresolvedPlaceholder(placeholder) => {
                write!(f, "Unresolved ARN placeholder: ${{{}}}", placeholder)
            }
        }
    }
}

impl Error for StanzaError {}

#[cfg(test)]
mod tests {
    use {
        crate::StanzaError,
        pretty_assertions::{assert_eq, assert_ne},
    };

    #[test_log::test]
    fn test_display() {
        let _ = format!("{:?}", StanzaError::UnknownAction("foo".to_string()));
        assert_eq!(StanzaError::InvalidAction("s3:".to_string()).to_string(), "Invalid action: s3:");
        assert_eq!(
            StanzaError::InvalidArnTemplate("arn:${".to_string()).to_string(),
            "Invalid ARN template: arn:${"
        );
        assert_eq!(
            StanzaError::InvalidConditionOperator("StringFuzzy".to_string()).to_string(),
            "Invalid condition operator: StringFuzzy"
        );
        assert_eq!(StanzaError::NoActions.to_string(), "Statement has no actions");
        assert_eq!(
            StanzaError::StatementFrozen.to_string(),
            "Statement is finalized and can no longer be modified"
        );
        assert_eq!(StanzaError::UnknownAction("s3:GetThing".to_string()).to_string(), "Unknown action: s3:GetThing");
        assert_eq!(
            StanzaError::UnknownResourceType("vault".to_string()).to_string(),
            "Unknown resource type: vault"
        );
        assert_eq!(
            StanzaError::UnresolvedPlaceholder("BucketName".to_string()).to_string(),
            "Unresolved ARN placeholder: ${BucketName}"
        );
    }

    #[test_log::test]
    fn test_eq() {
        let e1a = StanzaError::UnknownAction("foo".to_string());
        let e1b = StanzaError::UnknownAction("foo".to_string());
        let e2 = StanzaError::UnknownAction("bar".to_string());
        let e3 = StanzaError::InvalidAction("foo".to_string());
        let e4 = StanzaError::StatementFrozen;
        let e5 = StanzaError::NoActions;

        assert_eq!(e1a, e1b);
        assert_ne!(e1a, e2);
        assert_ne!(e1a, e3);
        assert_ne!(e1a, e4);
        assert_ne!(e4, e5);
        assert_eq!(e4, StanzaError::StatementFrozen);
    }
}
