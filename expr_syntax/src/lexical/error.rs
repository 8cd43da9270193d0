//! Lexical analysis errors

use crate::logging::codes;
use crate::tokens::TokenKind;
use crate::utils::Span;

/// Fatal tokenization errors; each names the offending text and where it is
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid token: '{text}'")]
    InvalidToken { text: String, span: Span },

    #[error("Unclosed {delimiter} literal: {text}")]
    UnterminatedLiteral {
        text: String,
        delimiter: char,
        span: Span,
    },

    #[error("Unable to parse numeric value '{text}'")]
    InvalidNumber { text: String, span: Span },

    #[error("Hanging accessor on token '{text}'")]
    HangingAccessor { text: String, span: Span },

    #[error("Unable to access unexported field '{field}' in token '{text}'")]
    UnexportedField {
        text: String,
        field: String,
        span: Span,
    },

    #[error("Unbalanced parenthesis")]
    UnbalancedParenthesis { text: String, span: Span },

    #[error("Identifier too long: {length} characters (max {max})")]
    IdentifierTooLong {
        text: String,
        length: usize,
        max: usize,
        span: Span,
    },

    #[error("Literal too large: {size} bytes (max {max})")]
    LiteralTooLarge { size: usize, max: usize, span: Span },

    #[error("Too many tokens: {count} (max {max})")]
    TooManyTokens { count: usize, max: usize, span: Span },

    #[error("Expression too large: {size} bytes (max {max})")]
    SourceTooLarge { size: usize, max: usize },

    #[error("Cannot transition from {from} to {to} at '{text}'")]
    InvalidTransition {
        from: TokenKind,
        to: TokenKind,
        text: String,
        span: Span,
    },

    #[error("Undefined function '{text}'")]
    UndefinedFunction { text: String, span: Span },

    #[error("Unexpected end of expression after {kind} '{text}'")]
    UnexpectedEnd {
        kind: TokenKind,
        text: String,
        span: Span,
    },

    #[error("No lexer state for token kind {kind}")]
    InvalidLexerState { kind: TokenKind, span: Span },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidToken { .. } => codes::lexical::INVALID_TOKEN,
            LexerError::UnterminatedLiteral { .. } => codes::lexical::UNTERMINATED_LITERAL,
            LexerError::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            LexerError::HangingAccessor { .. } => codes::lexical::HANGING_ACCESSOR,
            LexerError::UnexportedField { .. } => codes::lexical::UNEXPORTED_FIELD,
            LexerError::UnbalancedParenthesis { .. } => codes::lexical::UNBALANCED_PARENTHESIS,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::LiteralTooLarge { .. } => codes::lexical::LITERAL_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::SourceTooLarge { .. } => codes::lexical::SOURCE_TOO_LARGE,
            LexerError::InvalidTransition { .. } => codes::lexical::INVALID_TRANSITION,
            LexerError::UndefinedFunction { .. } => codes::lexical::UNDEFINED_FUNCTION,
            LexerError::UnexpectedEnd { .. } => codes::lexical::UNEXPECTED_END,
            LexerError::InvalidLexerState { .. } => codes::lexical::INVALID_LEXER_STATE,
        }
    }

    /// Source range of the offending text
    pub fn span(&self) -> Span {
        match self {
            LexerError::InvalidToken { span, .. }
            | LexerError::UnterminatedLiteral { span, .. }
            | LexerError::InvalidNumber { span, .. }
            | LexerError::HangingAccessor { span, .. }
            | LexerError::UnexportedField { span, .. }
            | LexerError::UnbalancedParenthesis { span, .. }
            | LexerError::IdentifierTooLong { span, .. }
            | LexerError::LiteralTooLarge { span, .. }
            | LexerError::TooManyTokens { span, .. }
            | LexerError::InvalidTransition { span, .. }
            | LexerError::UndefinedFunction { span, .. }
            | LexerError::UnexpectedEnd { span, .. }
            | LexerError::InvalidLexerState { span, .. } => *span,
            LexerError::SourceTooLarge { .. } => Span::from_offsets(0, 0),
        }
    }

    pub fn start(&self) -> usize {
        self.span().start.offset
    }

    pub fn end(&self) -> usize {
        self.span().end.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_text() {
        let error = LexerError::InvalidNumber {
            text: "1.2.3".to_string(),
            span: Span::from_offsets(0, 5),
        };
        assert_eq!(error.to_string(), "Unable to parse numeric value '1.2.3'");
        assert_eq!(error.start(), 0);
        assert_eq!(error.end(), 5);
    }

    #[test]
    fn test_codes_are_registered() {
        let errors = [
            LexerError::InvalidToken {
                text: "@".to_string(),
                span: Span::from_offsets(0, 1),
            },
            LexerError::SourceTooLarge { size: 10, max: 1 },
            LexerError::UnexpectedEnd {
                kind: TokenKind::Modifier,
                text: "+".to_string(),
                span: Span::from_offsets(2, 3),
            },
        ];

        for error in errors {
            let code = error.error_code();
            assert!(codes::get_error_metadata(code.as_str()).is_some(), "{}", code);
            assert_eq!(codes::get_category(code.as_str()), "Lexical");
        }
    }
}
