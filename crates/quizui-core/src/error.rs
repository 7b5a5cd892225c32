use thiserror::Error;

pub type Result<T> = std::result::Result<T, UiError>;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("element not found: #{id}")]
    MissingElement { id: String },

    #[error("host call failed: {operation}: {message}")]
    Host {
        operation: &'static str,
        message: String,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl UiError {
    #[must_use]
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    #[must_use]
    pub fn host(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Host {
            operation,
            message: message.into(),
        }
    }
}
