use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizationError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AmortizationError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AmortizationError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AmortizationError {
    fn from(e: serde_json::Error) -> Self {
        AmortizationError::SerializationError(e.to_string())
    }
}
