use thiserror::Error;

/// costwatch error types
#[derive(Error, Debug)]
pub enum CostwatchError {
    /// Missing or invalid configuration (env vars, flags)
    #[error("config error: {0}")]
    Config(String),

    /// Cost Explorer request or response handling failed
    #[error("cost provider error: {0}")]
    Provider(String),

    /// Input history is shorter than the two comparison windows
    #[error("insufficient cost history: {available} of {required} days present")]
    DataGap { available: usize, required: usize },

    /// Webhook delivery failed
    #[error("webhook error: {0}")]
    Webhook(String),

    /// JSON encoding failed
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for costwatch
pub type Result<T> = std::result::Result<T, CostwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostwatchError::Config("COSTWATCH_WEBHOOK_URL is not set".into());
        assert_eq!(
            err.to_string(),
            "config error: COSTWATCH_WEBHOOK_URL is not set"
        );
    }

    #[test]
    fn test_data_gap_display() {
        let err = CostwatchError::DataGap {
            available: 6,
            required: 10,
        };
        assert_eq!(
            err.to_string(),
            "insufficient cost history: 6 of 10 days present"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CostwatchError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
