// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod render;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, LexerError, LexicalAnalyzer};
pub use render::{render, Node, RenderError};
pub use tokens::{FunctionDescriptor, FunctionTable, Token, TokenKind, TokenValue};
