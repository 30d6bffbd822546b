//! Error types for client secret generation.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SecretError>;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("could not read private key file {}: {source}", path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error("failed to sign client secret: {0}")]
    Signing(String),
    #[error("invalid signer configuration: {0}")]
    InvalidConfig(String),
    #[error("config error: {0}")]
    Config(String),
}

impl From<jsonwebtoken::errors::Error> for SecretError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_read_message_names_the_path() {
        let err = SecretError::KeyRead {
            path: PathBuf::from("/missing/AuthKey.p8"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/AuthKey.p8"));
        assert!(msg.contains("not found"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
