//! Token kinds: the contract between the tokenizer and any tree builder

use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Unknown,

    Prefix,
    Numeric,
    Boolean,
    String,
    Time,
    Variable,
    Function,
    Accessor,
    Separator,

    Comparator,
    #[serde(rename = "LOGICALOP")]
    LogicalOp,
    Modifier,

    Clause,
    ClauseClose,

    Ternary,

    /// Produced by tree construction only, never by the tokenizer
    Array,
}

impl TokenKind {
    pub const ALL: [TokenKind; 17] = [
        TokenKind::Unknown,
        TokenKind::Prefix,
        TokenKind::Numeric,
        TokenKind::Boolean,
        TokenKind::String,
        TokenKind::Time,
        TokenKind::Variable,
        TokenKind::Function,
        TokenKind::Accessor,
        TokenKind::Separator,
        TokenKind::Comparator,
        TokenKind::LogicalOp,
        TokenKind::Modifier,
        TokenKind::Clause,
        TokenKind::ClauseClose,
        TokenKind::Ternary,
        TokenKind::Array,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Prefix => "PREFIX",
            TokenKind::Numeric => "NUMERIC",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::String => "STRING",
            TokenKind::Time => "TIME",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Accessor => "ACCESSOR",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Comparator => "COMPARATOR",
            TokenKind::LogicalOp => "LOGICALOP",
            TokenKind::Modifier => "MODIFIER",
            TokenKind::Clause => "CLAUSE",
            TokenKind::ClauseClose => "CLAUSE_CLOSE",
            TokenKind::Ternary => "TERNARY",
            TokenKind::Array => "ARRAY",
        }
    }

    /// Literal operand kinds
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Numeric | TokenKind::Boolean | TokenKind::String | TokenKind::Time
        )
    }

    /// Kinds that join two operands
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Comparator | TokenKind::LogicalOp | TokenKind::Modifier | TokenKind::Ternary
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
