pub type FigstackResult<T> = Result<T, FigstackError>;

#[derive(thiserror::Error, Debug)]
pub enum FigstackError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FigstackError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FigstackError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            FigstackError::not_found("x")
                .to_string()
                .contains("not found:")
        );
        assert!(
            FigstackError::upstream("x")
                .to_string()
                .contains("upstream error:")
        );
        assert!(FigstackError::serde("x").to_string().contains("serialization error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = FigstackError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
