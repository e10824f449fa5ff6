use thiserror::Error;

/// Errors produced by the credential engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The operating system random source could not be read.
    #[error("secure random source unavailable: {0}")]
    EntropySourceUnavailable(getrandom::Error),

    /// A caller supplied a length, count or bound the engine cannot honor.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, Error>;
