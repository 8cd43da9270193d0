//! Syntax tree nodes consumed by the renderer

use crate::tokens::{Token, TokenKind, TokenValue};
use serde::{Deserialize, Serialize};

/// A token and its ordered children; each child has exactly one parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub token: Token,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(token: Token, children: Vec<Node>) -> Self {
        Self { token, children }
    }

    /// Node without children
    pub fn leaf(token: Token) -> Self {
        Self::new(token, Vec::new())
    }

    /// Element list with a synthesized ARRAY token
    pub fn array(elements: Vec<Node>) -> Self {
        Self::new(
            Token::synthetic(TokenKind::Array, TokenValue::Empty),
            elements,
        )
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Longest root-to-leaf path, counting the root
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Node::height).max().unwrap_or(0)
    }
}
