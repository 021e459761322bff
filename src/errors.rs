#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No stored token, or the server answered `401`.
    #[error("sign-in required")]
    Unauthenticated,
    #[error("{0}")]
    Rejected(String),
    #[error("invalid {entity}: {reason}")]
    Invalid { entity: &'static str, reason: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    pub fn invalid(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            entity,
            reason: reason.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
