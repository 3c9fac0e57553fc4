//! Error types for graph and node operations

/// Error type for node construction, pattern building and N-Triples term parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// An argument is not one of the accepted shapes
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed N-Triples term text
    #[error("Could not parse {input:?} at position {position}: {message}")]
    Parse {
        input: String,
        position: usize,
        message: String,
    },
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    /// Create an invalid-argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a parse error for `input`
    pub fn parse(input: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            position,
            message: message.into(),
        }
    }
}
