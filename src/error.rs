//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The response cache has
//! no failure modes of its own; everything here comes from the network,
//! decoding or the command line.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for fetching, decoding and running commands.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Response failed with status code: {status} and\nbody: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A command was invoked without a required argument
    #[error("{command} requires a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_includes_body() {
        let err = PokedexError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Response failed with status code: 404 and\nbody: Not Found"
        );
    }

    #[test]
    fn test_missing_argument_message() {
        let err = PokedexError::MissingArgument {
            command: "explore",
            argument: "location area name",
        };
        assert_eq!(err.to_string(), "explore requires a location area name");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err: PokedexError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, PokedexError::Decode(_)));
    }
}
