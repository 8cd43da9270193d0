//! Lexical analysis: character stream, lexer state machine and tokenizer
//!
//! Turns expression text into an ordered, parenthesis-balanced sequence of
//! typed tokens. Tokenization is all-or-nothing: the first error ends the
//! call and no partial sequence is returned.

pub mod analyzer;
pub mod error;
pub mod state;
pub mod stream;
pub mod time;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::{FunctionTable, Token};

pub use analyzer::{exported_field, AccessorRule, LexicalAnalyzer, LexicalMetrics};
pub use error::LexerError;
pub use state::{initial_state, state_for, validate_transitions, LexerState};
pub use stream::CharacterStream;
pub use time::{try_parse_time, TimeFormat, TIME_FORMATS};

/// Tokenize `text` with default preferences
pub fn tokenize(text: &str, functions: &FunctionTable) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::new().tokenize(text, functions)
}

/// Tokenize with explicit runtime preferences
pub fn tokenize_with_preferences(
    text: &str,
    functions: &FunctionTable,
    preferences: LexicalPreferences,
) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize(text, functions)
}

/// Check that every lexical code has registered metadata
pub fn validate_lexical_codes() -> Result<(), String> {
    use crate::logging::codes;

    let lexical_codes = [
        codes::lexical::INVALID_TOKEN,
        codes::lexical::UNTERMINATED_LITERAL,
        codes::lexical::INVALID_NUMBER,
        codes::lexical::IDENTIFIER_TOO_LONG,
        codes::lexical::LITERAL_TOO_LARGE,
        codes::lexical::HANGING_ACCESSOR,
        codes::lexical::UNEXPORTED_FIELD,
        codes::lexical::UNBALANCED_PARENTHESIS,
        codes::lexical::TOO_MANY_TOKENS,
        codes::lexical::SOURCE_TOO_LARGE,
        codes::lexical::INVALID_TRANSITION,
        codes::lexical::UNDEFINED_FUNCTION,
        codes::lexical::UNEXPECTED_END,
        codes::lexical::INVALID_LEXER_STATE,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;

    #[test]
    fn test_module_entry_point() {
        let tokens = tokenize("a > 1", &FunctionTable::new()).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Comparator);
    }

    #[test]
    fn test_strict_entry_point() {
        let preferences = LexicalPreferences {
            validate_transitions: true,
            ..LexicalPreferences::default()
        };
        let result = tokenize_with_preferences("a >", &FunctionTable::new(), preferences);
        assert!(matches!(result, Err(LexerError::UnexpectedEnd { .. })));
    }

    #[test]
    fn test_lexical_codes_registered() {
        assert!(validate_lexical_codes().is_ok());
    }
}
