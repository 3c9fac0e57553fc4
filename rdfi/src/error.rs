//! Error type for environment operations

use rdfi_graph::GraphError;
use rdfi_turtle::TurtleError;

/// Errors surfaced by [`crate::RdfEnvironment`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Node construction rejected its arguments
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Reading a Turtle document failed
    #[error(transparent)]
    Turtle(#[from] TurtleError),

    /// Environment configuration could not be decoded
    #[error("Invalid environment configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for environment operations
pub type Result<T> = std::result::Result<T, Error>;
