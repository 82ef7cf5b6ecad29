use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeResolutionError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),
    #[error("Field not found: {0}")]
    FieldNotFound(String),
    #[error("Duplicate type: {0}")]
    DuplicateType(String),
    #[error("Duplicate field {field} in {type_name}")]
    DuplicateField { type_name: String, field: String },
    #[error("Invalid definition of {type_name}: {reason}")]
    InvalidDefinition { type_name: String, reason: String },
}
