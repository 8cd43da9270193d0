//! Token and decoded token values

use super::function::FunctionDescriptor;
use super::kind::TokenKind;
use super::symbols::{
    ComparatorOperator, LogicalOperator, ModifierOperator, PrefixOperator, TernaryOperator,
};
use crate::utils::Span;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded value of a token, one variant per value shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TokenValue {
    Numeric(f64),
    Boolean(bool),
    /// Decoded text of a STRING literal or VARIABLE name
    Text(String),
    Time(DateTime<FixedOffset>),
    Function(FunctionDescriptor),
    /// Segments of an ACCESSOR path
    Path(Vec<String>),
    Prefix(PrefixOperator),
    Modifier(ModifierOperator),
    Logical(LogicalOperator),
    Comparator(ComparatorOperator),
    Ternary(TernaryOperator),
    Separator,
    ClauseOpen,
    ClauseClose,
    /// Synthetic tokens with no source text
    Empty,
}

impl TokenValue {
    /// Operator symbol text, for operator-valued tokens
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            TokenValue::Prefix(op) => Some(op.as_str()),
            TokenValue::Modifier(op) => Some(op.as_str()),
            TokenValue::Logical(op) => Some(op.as_str()),
            TokenValue::Comparator(op) => Some(op.as_str()),
            TokenValue::Ternary(op) => Some(op.as_str()),
            _ => None,
        }
    }
}

/// One classified lexical unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text consumed, before escape processing
    pub raw: String,
    pub value: TokenValue,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>, value: TokenValue, span: Span) -> Self {
        Self {
            kind,
            raw: raw.into(),
            value,
            span,
        }
    }

    /// Token not backed by source text (tree construction, tests)
    pub fn synthetic(kind: TokenKind, value: TokenValue) -> Self {
        Self::new(kind, String::new(), value, Span::dummy())
    }

    /// Start byte offset (inclusive)
    pub fn start(&self) -> usize {
        self.span.start.offset
    }

    /// End byte offset (exclusive)
    pub fn end(&self) -> usize {
        self.span.end.offset
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            TokenValue::Numeric(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&[String]> {
        match &self.value {
            TokenValue::Path(segments) => Some(segments),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @{}..{}",
            self.kind,
            self.raw,
            self.start(),
            self.end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_offsets_and_display() {
        let token = Token::new(
            TokenKind::Modifier,
            "+",
            TokenValue::Modifier(ModifierOperator::Plus),
            Span::from_offsets(2, 3),
        );

        assert_eq!(token.start(), 2);
        assert_eq!(token.end(), 3);
        assert_eq!(token.to_string(), "MODIFIER + @2..3");
        assert_eq!(token.value.symbol(), Some("+"));
    }

    #[test]
    fn test_value_accessors() {
        let number = Token::synthetic(TokenKind::Numeric, TokenValue::Numeric(2.5));
        assert_eq!(number.as_number(), Some(2.5));
        assert_eq!(number.as_text(), None);

        let path = Token::synthetic(
            TokenKind::Accessor,
            TokenValue::Path(vec!["foo".into(), "Bar".into()]),
        );
        assert_eq!(path.as_path().map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_token_json_shape() {
        let token = Token::new(
            TokenKind::Numeric,
            "1",
            TokenValue::Numeric(1.0),
            Span::from_offsets(0, 1),
        );
        let json = serde_json::to_value(&token).unwrap();

        assert_eq!(json["kind"], "NUMERIC");
        assert_eq!(json["value"]["type"], "numeric");
        assert_eq!(json["value"]["value"], 1.0);

        let back: Token = serde_json::from_value(json).unwrap();
        assert_eq!(back, token);
    }
}
