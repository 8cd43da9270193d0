//! Forward cursor over an emitted token sequence

use super::kind::TokenKind;
use super::token::Token;

/// Cursor over tokens with single-step lookahead and rewind
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Current token without advancing
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    /// Step back `count` tokens, stopping at the beginning
    pub fn rewind(&mut self, count: usize) {
        self.index = self.index.saturating_sub(count);
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.index
    }

    /// Net CLAUSE minus CLAUSE_CLOSE over the whole sequence
    pub fn clause_balance(tokens: &[Token]) -> i64 {
        tokens.iter().fold(0, |depth, token| match token.kind {
            TokenKind::Clause => depth + 1,
            TokenKind::ClauseClose => depth - 1,
            _ => depth,
        })
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenValue;

    fn tok(kind: TokenKind) -> Token {
        Token::synthetic(kind, TokenValue::Empty)
    }

    #[test]
    fn test_cursor_navigation() {
        let tokens = vec![tok(TokenKind::Clause), tok(TokenKind::Numeric), tok(TokenKind::ClauseClose)];
        let mut stream = TokenStream::new(&tokens);

        assert_eq!(stream.peek().map(|t| t.kind), Some(TokenKind::Clause));
        assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::Clause));
        assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::Numeric));
        assert_eq!(stream.remaining(), 1);

        stream.rewind(5);
        assert_eq!(stream.position(), 0);

        assert_eq!(stream.by_ref().count(), 3);
        assert!(!stream.has_next());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_clause_balance() {
        let tokens = vec![tok(TokenKind::Clause), tok(TokenKind::Clause), tok(TokenKind::ClauseClose)];
        assert_eq!(TokenStream::clause_balance(&tokens), 1);
        assert_eq!(TokenStream::clause_balance(&[]), 0);
    }
}
