/// Error type shared by the core converters.
///
/// The taxonomy is intentionally flat: every tool fails with one of a handful
/// of user-facing messages and nothing propagates past the tool that
/// triggered it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("input is empty")]
    EmptyInput,

    #[error("invalid {stage}: {message}")]
    InvalidFormat { stage: &'static str, message: String },

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("invalid type name: {0}")]
    InvalidTypeName(String),

    #[error("{0}")]
    Validation(String),

    #[error("input too large: {0}")]
    LimitExceeded(String),
}

impl Error {
    pub fn invalid(stage: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidFormat {
            stage,
            message: message.into(),
        }
    }
}
