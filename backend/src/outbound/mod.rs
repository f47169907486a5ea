//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **mongo**: document store holding users and filters.
//! - **redis**: key-value store holding users only.
//!
//! Adapters are thin translators between domain records and storage
//! representations. They contain no business logic.

pub mod mongo;
pub mod redis;

/// Failure establishing a storage connection at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Connection parameters could not be turned into a client.
    #[error("invalid {backend} configuration: {message}")]
    Configuration {
        backend: &'static str,
        message: String,
    },
    /// The server did not answer the liveness probe.
    #[error("{backend} is unreachable: {message}")]
    Unreachable {
        backend: &'static str,
        message: String,
    },
}

impl ConnectError {
    pub fn configuration(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            backend,
            message: message.into(),
        }
    }

    pub fn unreachable(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Unreachable {
            backend,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        ConnectError::configuration("mongo", "bad uri"),
        "invalid mongo configuration: bad uri"
    )]
    #[case(
        ConnectError::unreachable("redis", "connection refused"),
        "redis is unreachable: connection refused"
    )]
    fn display_names_backend(#[case] error: ConnectError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
