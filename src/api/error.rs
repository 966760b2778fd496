//! Error taxonomy for gateway operations.

use thiserror::Error;

/// Message used when the service reports `ERROR` but omits the text.
pub const MISSING_REMOTE_MESSAGE: &str = "remote service reported an error without a message";

/// Errors that can occur while invoking a catalog operation.
///
/// The gateway never recovers from any of these; each is handed back to the
/// caller untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials are missing or unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected before any request was built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network, DNS or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not a well-formed envelope for the operation.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The envelope carried `"status": "ERROR"`.
    #[error("{message}")]
    Remote { message: String },
}

impl Error {
    /// Process exit status for this kind of failure (sysexits.h values).
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => 78,
            Error::InvalidArgument(_) => 64,
            Error::Transport(_) => 69,
            Error::MalformedResponse(_) => 76,
            Error::Remote { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_service_message_verbatim() {
        let err = Error::Remote {
            message: "Droplet not found".to_string(),
        };
        assert_eq!(err.to_string(), "Droplet not found");
    }

    #[test]
    fn test_exit_codes_distinguish_kinds() {
        assert_eq!(Error::Config("x".into()).exit_code(), 78);
        assert_eq!(Error::InvalidArgument("x".into()).exit_code(), 64);
        assert_eq!(Error::MalformedResponse("x".into()).exit_code(), 76);
        assert_eq!(
            Error::Remote {
                message: "x".into()
            }
            .exit_code(),
            1
        );
    }
}
