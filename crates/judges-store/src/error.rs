//! Error types for the store client.

/// Store client errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Invalid endpoint configuration, raised before any network I/O.
    #[error("invalid store configuration: {message}")]
    Config { message: String },

    /// The remote store could not be reached (DNS, refused, timeout).
    #[error("could not reach remote store: {message}")]
    Transport { message: String },

    /// Non-2xx status, or a 2xx body of an unexpected shape.
    #[error("unexpected response from remote store: HTTP {status}: {body}")]
    Protocol { status: u16, body: String },

    /// Payload or metadata could not be encoded for transmission.
    #[error("payload encoding failed: {message}")]
    Encoding { message: String },
}

impl StoreError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 1,
            Self::Protocol { .. } => 4,
            Self::Transport { .. } => 5,
            Self::Encoding { .. } => 6,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        let config = StoreError::Config {
            message: "x".into(),
        };
        let protocol = StoreError::Protocol {
            status: 500,
            body: "oops".into(),
        };
        let transport = StoreError::Transport {
            message: "refused".into(),
        };
        assert_eq!(config.exit_code(), 1);
        assert_eq!(protocol.exit_code(), 4);
        assert_eq!(transport.exit_code(), 5);
    }

    #[test]
    fn protocol_error_carries_status_and_body() {
        let err = StoreError::Protocol {
            status: 404,
            body: "no such name".into(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("no such name"));
    }
}
