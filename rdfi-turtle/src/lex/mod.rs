//! Turtle tokens.
//!
//! [`tokenize`] turns a whole document into [`Token`]s with byte spans;
//! [`chars`] holds the character classes shared with the writer.

pub mod chars;
pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
