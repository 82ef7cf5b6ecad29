use activator_types::error::TypeResolutionError;
use activator_utils::ArgumentIndex;
use thiserror::Error;

fn not_found_cause(null_arguments: &bool) -> &'static str {
    if *null_arguments {
        " due to null arguments"
    } else {
        ""
    }
}

fn ambiguity_cause(null_arguments: &bool) -> &'static str {
    if *null_arguments {
        "; null arguments prevent choosing between them"
    } else {
        ""
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActivationError {
    #[error(
        "Failed to find a matching constructor for {type_name}({signature}){}",
        not_found_cause(.null_arguments)
    )]
    ConstructorNotFound {
        type_name: String,
        signature: String,
        null_arguments: bool,
    },
    #[error(
        "Failed to find a single matching constructor for {type_name}({signature}): {candidates} candidates{}",
        ambiguity_cause(.null_arguments)
    )]
    AmbiguousConstructor {
        type_name: String,
        signature: String,
        candidates: usize,
        null_arguments: bool,
    },
    #[error("Cannot construct {type_name}: {reason}")]
    NotConstructible { type_name: String, reason: String },
    #[error("Invalid argument {position} for {constructor}: expected {expected}, got {actual}")]
    InvalidArgument {
        constructor: String,
        position: ArgumentIndex,
        expected: String,
        actual: String,
    },
    #[error("Argument count mismatch for {constructor}: expected {expected}, got {actual}")]
    ArityMismatch {
        constructor: String,
        expected: usize,
        actual: usize,
    },
    #[error("Type resolution failed: {0}")]
    TypeResolution(#[from] TypeResolutionError),
}

impl ActivationError {
    /// Whether the failure came from resolving a constructor rather than
    /// from compiling or invoking one.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            ActivationError::ConstructorNotFound { .. } | ActivationError::AmbiguousConstructor { .. }
        )
    }

    pub fn caused_by_null_arguments(&self) -> bool {
        match self {
            ActivationError::ConstructorNotFound { null_arguments, .. }
            | ActivationError::AmbiguousConstructor { null_arguments, .. } => *null_arguments,
            ActivationError::InvalidArgument { actual, .. } => actual == "null",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_mention_null_arguments() {
        let not_found = ActivationError::ConstructorNotFound {
            type_name: "T".to_string(),
            signature: "DateTime, null".to_string(),
            null_arguments: true,
        };
        let msg = not_found.to_string();
        assert!(msg.contains("Failed to find a matching constructor"));
        assert!(msg.contains("null arguments"));

        let ambiguous = ActivationError::AmbiguousConstructor {
            type_name: "T".to_string(),
            signature: "Int32, null".to_string(),
            candidates: 2,
            null_arguments: true,
        };
        let msg = ambiguous.to_string();
        assert!(msg.contains("Failed to find a single matching constructor"));
        assert!(msg.contains("null arguments"));
    }

    #[test]
    fn test_plain_not_found_message() {
        let err = ActivationError::ConstructorNotFound {
            type_name: "T".to_string(),
            signature: "DateTime, DateTime".to_string(),
            null_arguments: false,
        };
        assert_eq!(
            err.to_string(),
            "Failed to find a matching constructor for T(DateTime, DateTime)"
        );
        assert!(!err.caused_by_null_arguments());
    }
}
