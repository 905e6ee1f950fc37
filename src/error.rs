use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
