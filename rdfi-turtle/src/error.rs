//! Error types for Turtle reading and writing

use rdfi_graph::GraphError;

/// Error type for Turtle operations
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// Lexer error (invalid token)
    #[error("Lexer error at position {position}: {message}")]
    Lexer { position: usize, message: String },

    /// Parser error (unexpected token or invalid structure)
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Relative IRI with no base in scope, in strict mode
    #[error("IRI resolution error: {0}")]
    IriResolution(String),

    /// Prefix not defined
    #[error("Undefined prefix: {0}")]
    UndefinedPrefix(String),

    /// Invalid escape sequence
    #[error("Invalid escape sequence: {0}")]
    InvalidEscape(String),

    /// A parsed term was rejected by node construction
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The background parse task did not complete
    #[error("Parse task failed: {0}")]
    Task(String),
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;

impl TurtleError {
    /// Create a lexer error
    pub fn lexer(position: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            position,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Byte offset into the input, for lexer and parser errors
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lexer { position, .. } | Self::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}
