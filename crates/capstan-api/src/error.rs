//! Error types for group/version handling

use thiserror::Error;

/// Errors produced while parsing or registering group-versions
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid group version {input:?}: {reason}")]
    InvalidGroupVersion {
        /// The string that failed to parse
        input: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

impl Error {
    /// Create an invalid group-version error for `input`
    pub fn invalid_group_version(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidGroupVersion {
            input: input.into(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
