use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuyRentError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl BuyRentError {
    /// Shorthand for an `InvalidInput` raised when a checked decimal
    /// operation leaves the representable range.
    pub(crate) fn overflow(field: &str) -> Self {
        BuyRentError::InvalidInput {
            field: field.into(),
            reason: "Computation overflowed the representable decimal range".into(),
        }
    }
}

impl From<serde_json::Error> for BuyRentError {
    fn from(e: serde_json::Error) -> Self {
        BuyRentError::SerializationError(e.to_string())
    }
}
