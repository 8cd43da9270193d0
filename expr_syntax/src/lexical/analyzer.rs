//! Core tokenizer
//!
//! A single left-to-right scan over a [`CharacterStream`]. Each token is
//! chosen by the class of its leading character; symbol runs that belong to
//! more than one operator table are resolved with the lexer state derived
//! from the previous token.

use super::error::LexerError;
use super::state::{self, LexerState};
use super::stream::CharacterStream;
use super::time::try_parse_time;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{
    ComparatorOperator, FunctionTable, LogicalOperator, ModifierOperator, PrefixOperator,
    TernaryOperator, Token, TokenKind, TokenStream, TokenValue,
};
use crate::utils::{Position, SourceMap, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::HashMap;

/// Predicate applied to every non-leading accessor segment
pub type AccessorRule = fn(&str) -> bool;

/// Default accessor rule: a field is reachable unless it starts lower-case
pub fn exported_field(segment: &str) -> bool {
    segment.chars().next().map_or(false, |c| !c.is_lowercase())
}

/// Per-run tokenization metrics
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub operator_tokens: usize,
    pub literal_tokens: usize,
    pub max_literal_length: usize,

    // Runtime preference-controlled metrics
    pub kind_counts: HashMap<TokenKind, usize>,
    pub operator_usage_patterns: HashMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if preferences.collect_detailed_metrics {
            *self.kind_counts.entry(token.kind).or_insert(0) += 1;
        }

        if token.kind.is_literal() {
            self.literal_tokens += 1;
            self.max_literal_length = self.max_literal_length.max(token.raw.len());
        }

        if let Some(symbol) = token.value.symbol() {
            self.operator_tokens += 1;

            if preferences.track_operator_patterns {
                *self
                    .operator_usage_patterns
                    .entry(symbol.to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    pub fn kind_count(&self, kind: TokenKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Tokenizer with metrics, runtime preferences and an accessor rule
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
    accessor_rule: AccessorRule,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
            accessor_rule: exported_field,
        }
    }

    /// Replace the accessor export-visibility rule
    pub fn with_accessor_rule(mut self, rule: AccessorRule) -> Self {
        self.accessor_rule = rule;
        self
    }

    /// Metrics of the most recent run
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Tokenize `source`, resolving identifiers against `functions`.
    /// Either every token is returned or the first error is.
    pub fn tokenize(
        &mut self,
        source: &str,
        functions: &FunctionTable,
    ) -> Result<Vec<Token>, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "source_bytes" => source.len(),
            "functions" => functions.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let result = self.scan_all(source, functions);

        match &result {
            Ok(tokens) => {
                log_success!(
                    codes::success::TOKENIZATION_COMPLETE,
                    "Lexical analysis completed",
                    "tokens" => tokens.len(),
                    "operators" => self.metrics.operator_tokens,
                    "literals" => self.metrics.literal_tokens,
                    "max_literal_length" => self.metrics.max_literal_length
                );
            }
            Err(error) => self.log_failure(error),
        }

        result
    }

    fn scan_all(
        &mut self,
        source: &str,
        functions: &FunctionTable,
    ) -> Result<Vec<Token>, LexerError> {
        if source.len() > MAX_SOURCE_LENGTH {
            return Err(LexerError::SourceTooLarge {
                size: source.len(),
                max: MAX_SOURCE_LENGTH,
            });
        }

        let source_map = SourceMap::new(source);
        let mut scanner = Scanner {
            stream: CharacterStream::new(source),
            source_map: &source_map,
            cursor: Position::start(),
            functions,
            accessor_rule: self.accessor_rule,
        };

        let mut state = state::initial_state();
        let mut tokens = Vec::new();

        while let Some(token) = scanner.read_token(state)? {
            if tokens.len() >= MAX_TOKEN_COUNT {
                return Err(LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                    max: MAX_TOKEN_COUNT,
                    span: token.span,
                });
            }

            state = state::state_for(token.kind).ok_or(LexerError::InvalidLexerState {
                kind: token.kind,
                span: token.span,
            })?;

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(token);
        }

        check_balance(&tokens)?;

        if self.preferences.validate_transitions {
            state::validate_transitions(&tokens)?;
            log_success!(
                codes::success::TRANSITION_VALIDATION_PASSED,
                "Token transitions validated",
                "tokens" => tokens.len()
            );
        }

        Ok(tokens)
    }

    fn log_failure(&self, error: &LexerError) {
        let message = error.to_string();
        if self.preferences.include_position_in_errors {
            log_error!(error.error_code(), &message,
                span = error.span(),
                "tokens_before_error" => self.metrics.total_tokens
            );
        } else {
            log_error!(error.error_code(), &message,
                "tokens_before_error" => self.metrics.total_tokens
            );
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Net CLAUSE/CLAUSE_CLOSE count must be zero
fn check_balance(tokens: &[Token]) -> Result<(), LexerError> {
    let balance = TokenStream::clause_balance(tokens);
    if balance == 0 {
        return Ok(());
    }

    let mut open: Vec<&Token> = Vec::new();
    let mut first_stray: Option<&Token> = None;
    for token in TokenStream::new(tokens) {
        match token.kind {
            TokenKind::Clause => open.push(token),
            TokenKind::ClauseClose => {
                if open.pop().is_none() && first_stray.is_none() {
                    first_stray = Some(token);
                }
            }
            _ => {}
        }
    }

    let culprit = if balance > 0 {
        open.last().copied()
    } else {
        first_stray
    };

    Err(match culprit {
        Some(token) => LexerError::UnbalancedParenthesis {
            text: token.raw.clone(),
            span: token.span,
        },
        None => LexerError::UnbalancedParenthesis {
            text: String::new(),
            span: Span::dummy(),
        },
    })
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_numeric(ch: char) -> bool {
    is_digit(ch) || ch == '.'
}

fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

fn is_variable_name(ch: char) -> bool {
    ch.is_alphabetic() || is_digit(ch) || ch == '_' || ch == '.'
}

fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

/// Characters that may continue a symbol run
fn is_symbol(ch: char) -> bool {
    !(is_digit(ch)
        || ch.is_alphabetic()
        || matches!(ch, '(' | ')' | '[' | ']')
        || is_quote(ch))
}

// ============================================================================
// SCANNER
// ============================================================================

/// Outcome of a conditional run
enum Run {
    /// The condition failed or whitespace ended the run
    Stopped(String),
    /// Input ran out first
    Exhausted(String),
    /// Input ended directly after an escape character
    DanglingEscape,
}

struct Scanner<'a> {
    stream: CharacterStream<'a>,
    source_map: &'a SourceMap,
    /// Last resolved position; token offsets only move forward
    cursor: Position,
    functions: &'a FunctionTable,
    accessor_rule: AccessorRule,
}

impl<'a> Scanner<'a> {
    fn position(&mut self, offset: usize) -> Position {
        self.cursor = self.source_map.position_from(self.cursor, offset);
        self.cursor
    }

    fn span(&mut self, start: usize) -> Span {
        let start = self.position(start);
        let end = self.position(self.stream.byte_offset());
        Span::new(start, end)
    }

    fn raw(&self, start: usize) -> &'a str {
        self.stream
            .source()
            .get(start..self.stream.byte_offset())
            .unwrap_or_default()
    }

    /// Read characters while `condition` holds. `\` takes the next
    /// character literally. Whitespace is kept, skipped or ends the run.
    fn read_until_false(
        &mut self,
        include_whitespace: bool,
        break_whitespace: bool,
        condition: impl Fn(char) -> bool,
    ) -> Run {
        let mut buffer = String::new();

        while let Some(ch) = self.stream.read_character() {
            if ch == '\\' {
                match self.stream.read_character() {
                    Some(escaped) => {
                        buffer.push(escaped);
                        continue;
                    }
                    None => return Run::DanglingEscape,
                }
            }

            if ch.is_whitespace() {
                if break_whitespace && !buffer.is_empty() {
                    self.stream.rewind(1);
                    return Run::Stopped(buffer);
                }
                if !include_whitespace {
                    continue;
                }
            }

            if condition(ch) {
                buffer.push(ch);
            } else {
                self.stream.rewind(1);
                return Run::Stopped(buffer);
            }
        }

        Run::Exhausted(buffer)
    }

    /// Re-read from the leading character as an unquoted run
    fn read_token_run(&mut self, condition: impl Fn(char) -> bool) -> Option<String> {
        self.stream.rewind(1);
        match self.read_until_false(false, true, condition) {
            Run::Stopped(text) | Run::Exhausted(text) => Some(text),
            Run::DanglingEscape => None,
        }
    }

    /// Next token, or `None` once only whitespace remains
    fn read_token(&mut self, state: &LexerState) -> Result<Option<Token>, LexerError> {
        while let Some(ch) = self.stream.read_character() {
            if ch.is_whitespace() {
                continue;
            }

            let start = self.stream.byte_offset() - ch.len_utf8();

            let (kind, value) = if is_numeric(ch) {
                self.scan_number(ch, start)?
            } else if ch == ',' {
                (TokenKind::Separator, TokenValue::Separator)
            } else if ch == '[' {
                let name = self.scan_delimited('[', ']', start)?;
                (TokenKind::Variable, TokenValue::Text(name))
            } else if ch.is_alphabetic() {
                self.scan_identifier(start)?
            } else if is_quote(ch) {
                let text = self.scan_delimited(ch, ch, start)?;
                match try_parse_time(&text) {
                    Some(time) => (TokenKind::Time, TokenValue::Time(time)),
                    None => (TokenKind::String, TokenValue::Text(text)),
                }
            } else if ch == '(' {
                (TokenKind::Clause, TokenValue::ClauseOpen)
            } else if ch == ')' {
                (TokenKind::ClauseClose, TokenValue::ClauseClose)
            } else {
                self.scan_symbol(ch, state, start)?
            };

            let token = Token::new(kind, self.raw(start), value, self.span(start));
            return Ok(Some(token));
        }

        Ok(None)
    }

    fn scan_number(&mut self, first: char, start: usize) -> Result<(TokenKind, TokenValue), LexerError> {
        if first == '0' && self.stream.can_read() {
            let next = self.stream.read_character();
            if next == Some('x') && self.stream.can_read() {
                let digits = match self.read_until_false(false, true, is_hex_digit) {
                    Run::Stopped(text) | Run::Exhausted(text) => Some(text),
                    Run::DanglingEscape => None,
                };
                let value = digits.and_then(|d| u64::from_str_radix(&d, 16).ok());
                return match value {
                    Some(value) => Ok((TokenKind::Numeric, TokenValue::Numeric(value as f64))),
                    None => Err(LexerError::InvalidNumber {
                        text: self.raw(start).to_string(),
                        span: self.span(start),
                    }),
                };
            }
            self.stream.rewind(1);
        }

        let text = self.read_token_run(is_numeric);
        match text.as_deref().map(str::parse::<f64>) {
            // Out-of-range runs parse to infinity
            Some(Ok(value)) if value.is_finite() => {
                Ok((TokenKind::Numeric, TokenValue::Numeric(value)))
            }
            _ => Err(LexerError::InvalidNumber {
                text: text.unwrap_or_else(|| self.raw(start).to_string()),
                span: self.span(start),
            }),
        }
    }

    /// Bracketed variable names and quoted literals. The closing delimiter
    /// is consumed but not part of the returned text.
    fn scan_delimited(&mut self, open: char, close: char, start: usize) -> Result<String, LexerError> {
        let text = match self.read_until_false(true, false, |c| c != close) {
            Run::Stopped(text) => text,
            Run::Exhausted(_) | Run::DanglingEscape => {
                return Err(LexerError::UnterminatedLiteral {
                    text: self.raw(start).to_string(),
                    delimiter: open,
                    span: self.span(start),
                })
            }
        };
        self.stream.rewind(-1);

        if text.len() > MAX_LITERAL_SIZE {
            return Err(LexerError::LiteralTooLarge {
                size: text.len(),
                max: MAX_LITERAL_SIZE,
                span: self.span(start),
            });
        }

        Ok(text)
    }

    fn scan_identifier(&mut self, start: usize) -> Result<(TokenKind, TokenValue), LexerError> {
        let text = match self.read_token_run(is_variable_name) {
            Some(text) => text,
            None => {
                return Err(LexerError::InvalidToken {
                    text: self.raw(start).to_string(),
                    span: self.span(start),
                })
            }
        };

        let length = text.chars().count();
        if length > MAX_IDENTIFIER_LENGTH {
            return Err(LexerError::IdentifierTooLong {
                text,
                length,
                max: MAX_IDENTIFIER_LENGTH,
                span: self.span(start),
            });
        }

        if text == "true" || text == "false" {
            return Ok((TokenKind::Boolean, TokenValue::Boolean(text == "true")));
        }

        if text.eq_ignore_ascii_case("in") {
            return Ok((
                TokenKind::Comparator,
                TokenValue::Comparator(ComparatorOperator::In),
            ));
        }

        if let Some(descriptor) = self.functions.get(&text) {
            return Ok((TokenKind::Function, TokenValue::Function(descriptor.clone())));
        }

        if text.find('.').map_or(false, |index| index > 0) {
            return self.scan_accessor(text, start);
        }

        Ok((TokenKind::Variable, TokenValue::Text(text)))
    }

    fn scan_accessor(&mut self, text: String, start: usize) -> Result<(TokenKind, TokenValue), LexerError> {
        let segments: Vec<String> = text.split('.').map(str::to_string).collect();

        // A trailing or doubled period leaves an empty segment
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(LexerError::HangingAccessor {
                text,
                span: self.span(start),
            });
        }

        let exported = self.accessor_rule;
        if let Some(field) = segments[1..].iter().find(|s| !exported(s.as_str())) {
            return Err(LexerError::UnexportedField {
                field: field.clone(),
                text,
                span: self.span(start),
            });
        }

        Ok((TokenKind::Accessor, TokenValue::Path(segments)))
    }

    /// Prefix eligibility is checked before any other table
    fn scan_symbol(
        &mut self,
        first: char,
        state: &LexerState,
        start: usize,
    ) -> Result<(TokenKind, TokenValue), LexerError> {
        let symbol = self.read_token_run(is_symbol).unwrap_or_default();

        if state.can_transition_to(TokenKind::Prefix) {
            if let Some(op) = PrefixOperator::from_symbol(&symbol) {
                return Ok((TokenKind::Prefix, TokenValue::Prefix(op)));
            }
        }

        if let Some(op) = ModifierOperator::from_symbol(&symbol) {
            return Ok((TokenKind::Modifier, TokenValue::Modifier(op)));
        }
        if let Some(op) = LogicalOperator::from_symbol(&symbol) {
            return Ok((TokenKind::LogicalOp, TokenValue::Logical(op)));
        }
        if let Some(op) = ComparatorOperator::from_symbol(&symbol) {
            return Ok((TokenKind::Comparator, TokenValue::Comparator(op)));
        }
        if let Some(op) = TernaryOperator::from_symbol(&symbol) {
            return Ok((TokenKind::Ternary, TokenValue::Ternary(op)));
        }

        // A lone ']' makes no progress; report the character itself
        if self.stream.byte_offset() == start {
            self.stream.rewind(-1);
            return Err(LexerError::InvalidToken {
                text: first.to_string(),
                span: self.span(start),
            });
        }

        Err(LexerError::InvalidToken {
            text: if symbol.is_empty() {
                self.raw(start).to_string()
            } else {
                symbol
            },
            span: self.span(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::FunctionDescriptor;
    use assert_matches::assert_matches;
    use chrono::Datelike;

    fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
        LexicalAnalyzer::new().tokenize(source, &FunctionTable::new())
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().iter().map(|t| t.kind).collect()
    }

    fn functions() -> FunctionTable {
        let mut table = FunctionTable::new();
        table.insert(
            "strlen".to_string(),
            FunctionDescriptor::new("strlen", ["string"], "number"),
        );
        table
    }

    #[test]
    fn test_empty_and_whitespace_only_input() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex("  \t\n ").unwrap().is_empty());
    }

    #[test]
    fn test_simple_arithmetic() {
        let tokens = lex("1 + 2").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].value, TokenValue::Numeric(1.0));
        assert_eq!(tokens[1].value, TokenValue::Modifier(ModifierOperator::Plus));
        assert_eq!(tokens[2].value, TokenValue::Numeric(2.0));
        assert_eq!(
            tokens.iter().map(|t| (t.start(), t.end())).collect::<Vec<_>>(),
            vec![(0, 1), (2, 3), (4, 5)]
        );
    }

    #[test]
    fn test_raw_matches_source_slice() {
        let source = "[my var] == 'it\\'s' && foo.Bar";
        for token in lex(source).unwrap() {
            assert_eq!(token.raw, &source[token.start()..token.end()]);
            assert!(token.start() < token.end());
        }
    }

    #[test]
    fn test_prefix_versus_modifier() {
        let tokens = lex("-1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Prefix);
        assert_eq!(tokens[0].value, TokenValue::Prefix(PrefixOperator::Negate));

        assert_eq!(
            kinds("1 - 1"),
            vec![TokenKind::Numeric, TokenKind::Modifier, TokenKind::Numeric]
        );
        assert_eq!(
            kinds("1 - -1"),
            vec![TokenKind::Numeric, TokenKind::Modifier, TokenKind::Prefix, TokenKind::Numeric]
        );
        assert_eq!(
            kinds("(-a)"),
            vec![TokenKind::Clause, TokenKind::Prefix, TokenKind::Variable, TokenKind::ClauseClose]
        );
    }

    #[test]
    fn test_bang_without_prefix_position_is_invalid() {
        assert_matches!(lex("1 ! 2"), Err(LexerError::InvalidToken { text, .. }) if text == "!");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("0xFF").unwrap()[0].value, TokenValue::Numeric(255.0));
        assert_eq!(lex("2.5").unwrap()[0].value, TokenValue::Numeric(2.5));
        assert_eq!(lex(".5").unwrap()[0].value, TokenValue::Numeric(0.5));
        assert_eq!(lex("0").unwrap()[0].value, TokenValue::Numeric(0.0));

        // No digits after "0x": the zero stands alone and x is a variable
        assert_eq!(kinds("0x"), vec![TokenKind::Numeric, TokenKind::Variable]);
    }

    #[test]
    fn test_malformed_numbers() {
        let error = lex("1.2.3").unwrap_err();
        assert_matches!(&error, LexerError::InvalidNumber { text, .. } if text == "1.2.3");
        assert_eq!((error.start(), error.end()), (0, 5));

        assert_matches!(lex("0xZ"), Err(LexerError::InvalidNumber { .. }));
        assert_matches!(lex("0x1FFFFFFFFFFFFFFFF"), Err(LexerError::InvalidNumber { .. }));
    }

    #[test]
    fn test_booleans_and_in() {
        let tokens = lex("true != false").unwrap();
        assert_eq!(tokens[0].value, TokenValue::Boolean(true));
        assert_eq!(tokens[2].value, TokenValue::Boolean(false));

        for source in ["a in b", "a IN b", "a In b"] {
            let tokens = lex(source).unwrap();
            assert_eq!(tokens[1].kind, TokenKind::Comparator);
            assert_eq!(tokens[1].value, TokenValue::Comparator(ComparatorOperator::In));
        }
    }

    #[test]
    fn test_functions() {
        let tokens = LexicalAnalyzer::new()
            .tokenize("strlen('abc') > 2", &functions())
            .unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert_matches!(&tokens[0].value, TokenValue::Function(f) if f.return_type == "number");

        // Unknown names stay variables
        assert_eq!(kinds("strlen")[0], TokenKind::Variable);
    }

    #[test]
    fn test_accessors() {
        let tokens = lex("foo.Bar").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Accessor);
        assert_eq!(
            tokens[0].value,
            TokenValue::Path(vec!["foo".to_string(), "Bar".to_string()])
        );

        assert_matches!(
            lex("foo.bar"),
            Err(LexerError::UnexportedField { field, text, .. }) if field == "bar" && text == "foo.bar"
        );
        assert_matches!(lex("foo.Bar."), Err(LexerError::HangingAccessor { .. }));
        assert_matches!(lex("foo..Bar"), Err(LexerError::HangingAccessor { .. }));
    }

    #[test]
    fn test_custom_accessor_rule() {
        let mut analyzer = LexicalAnalyzer::new().with_accessor_rule(|_| true);
        let tokens = analyzer.tokenize("foo.bar", &FunctionTable::new()).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Accessor);
    }

    #[test]
    fn test_bracketed_variables() {
        let tokens = lex("[foo bar] > [a\\]b]").unwrap();
        assert_eq!(tokens[0].value, TokenValue::Text("foo bar".to_string()));
        assert_eq!(tokens[0].raw, "[foo bar]");
        assert_eq!(tokens[2].value, TokenValue::Text("a]b".to_string()));

        assert_matches!(
            lex("[foo"),
            Err(LexerError::UnterminatedLiteral { delimiter: '[', .. })
        );
    }

    #[test]
    fn test_strings_and_times() {
        let tokens = lex("'not a date'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, TokenValue::Text("not a date".to_string()));

        let tokens = lex("'2023-01-02'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Time);
        assert_matches!(&tokens[0].value, TokenValue::Time(t)
            if (t.year(), t.month(), t.day()) == (2023, 1, 2));

        // Quotes close only on the opening character
        let tokens = lex("\"it's\"").unwrap();
        assert_eq!(tokens[0].value, TokenValue::Text("it's".to_string()));
    }

    #[test]
    fn test_unterminated_strings() {
        assert_matches!(
            lex("'abc"),
            Err(LexerError::UnterminatedLiteral { delimiter: '\'', .. })
        );
        assert_matches!(lex("'abc\\"), Err(LexerError::UnterminatedLiteral { .. }));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a && b || c ? 1 : 2"),
            vec![
                TokenKind::Variable,
                TokenKind::LogicalOp,
                TokenKind::Variable,
                TokenKind::LogicalOp,
                TokenKind::Variable,
                TokenKind::Ternary,
                TokenKind::Numeric,
                TokenKind::Ternary,
                TokenKind::Numeric,
            ]
        );
        assert_eq!(lex("a ** 2").unwrap()[1].value, TokenValue::Modifier(ModifierOperator::Exponent));
        assert_eq!(lex("a =~ 'x'").unwrap()[1].value, TokenValue::Comparator(ComparatorOperator::Regex));
        assert_eq!(lex("a ?? b").unwrap()[1].value, TokenValue::Ternary(TernaryOperator::Coalesce));
    }

    #[test]
    fn test_invalid_tokens() {
        let error = lex("1 @ 2").unwrap_err();
        assert_matches!(&error, LexerError::InvalidToken { text, .. } if text == "@");
        assert_eq!((error.start(), error.end()), (2, 3));

        assert_matches!(lex("a ]"), Err(LexerError::InvalidToken { text, .. }) if text == "]");
    }

    #[test]
    fn test_separators_in_argument_lists() {
        let tokens = LexicalAnalyzer::new()
            .tokenize("strlen(a, -1)", &functions())
            .unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Function,
                TokenKind::Clause,
                TokenKind::Variable,
                TokenKind::Separator,
                TokenKind::Prefix,
                TokenKind::Numeric,
                TokenKind::ClauseClose,
            ]
        );
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let error = lex("(1 + 2").unwrap_err();
        assert_matches!(error, LexerError::UnbalancedParenthesis { .. });
        assert_eq!(error.start(), 0);

        let error = lex("1 + 2)").unwrap_err();
        assert_eq!(error.start(), 5);

        assert!(lex("((1))").is_ok());
    }

    #[test]
    fn test_transition_validation_is_opt_in() {
        assert!(lex("1 2").is_ok());

        let preferences = LexicalPreferences {
            validate_transitions: true,
            ..LexicalPreferences::default()
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        let table = FunctionTable::new();

        assert_matches!(
            analyzer.tokenize("1 2", &table),
            Err(LexerError::InvalidTransition { .. })
        );
        assert_matches!(
            analyzer.tokenize("foo(1)", &table),
            Err(LexerError::UndefinedFunction { text, .. }) if text == "foo"
        );
        assert_matches!(
            analyzer.tokenize("1 +", &table),
            Err(LexerError::UnexpectedEnd { .. })
        );
        assert!(analyzer.tokenize("-(1 + a) * 2 > b", &table).is_ok());
    }

    #[test]
    fn test_metrics() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            track_operator_patterns: true,
            ..LexicalPreferences::default()
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        analyzer
            .tokenize("1 + 2 + 'abc'", &FunctionTable::new())
            .unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.operator_tokens, 2);
        assert_eq!(metrics.literal_tokens, 3);
        assert_eq!(metrics.max_literal_length, 5);
        assert_eq!(metrics.kind_count(TokenKind::Numeric), 2);
        assert_eq!(metrics.operator_usage_patterns.get("+"), Some(&2));
    }

    #[test]
    fn test_identifier_length_limit() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert_matches!(lex(&long), Err(LexerError::IdentifierTooLong { .. }));
    }

    #[test]
    fn test_out_of_range_number_is_rejected() {
        let digits = "9".repeat(400);
        assert_matches!(
            lex(&digits),
            Err(LexerError::InvalidNumber { text, .. }) if text == digits
        );
    }

    #[test]
    fn test_only_decimal_digits_are_numeric() {
        assert_matches!(lex("x²"), Err(LexerError::InvalidToken { text, .. }) if text == "²");
        assert_matches!(lex("²"), Err(LexerError::InvalidToken { .. }));
        assert_eq!(kinds("x2"), vec![TokenKind::Variable]);
    }

    #[test]
    fn test_positions_on_long_single_line() {
        let source = format!("{}a", "a+".repeat(2000));
        let tokens = lex(&source).unwrap();
        let last = tokens.last().unwrap();

        assert_eq!(last.span.start.line, 1);
        assert_eq!(last.span.start.column as usize, source.len());
        assert_eq!(last.end(), source.len());

        let tokens = lex("a +\n  'é' == b").unwrap();
        assert_eq!((tokens[2].span.start.line, tokens[2].span.start.column), (2, 3));
        assert_eq!((tokens[4].span.start.line, tokens[4].span.start.column), (2, 10));
    }

    #[test]
    fn test_literal_size_limit() {
        let source = format!("'{}'", "a".repeat(MAX_LITERAL_SIZE + 1));
        assert_matches!(
            lex(&source),
            Err(LexerError::LiteralTooLarge { size, max: MAX_LITERAL_SIZE, .. })
                if size == MAX_LITERAL_SIZE + 1
        );
    }

    #[test]
    fn test_token_count_limit() {
        let source = ",".repeat(MAX_TOKEN_COUNT + 1);
        assert_matches!(
            lex(&source),
            Err(LexerError::TooManyTokens { count, max: MAX_TOKEN_COUNT, .. })
                if count == MAX_TOKEN_COUNT + 1
        );
    }

    #[test]
    fn test_source_length_limit() {
        let source = "1".repeat(MAX_SOURCE_LENGTH + 1);
        assert_matches!(
            lex(&source),
            Err(LexerError::SourceTooLarge { size, max: MAX_SOURCE_LENGTH })
                if size == MAX_SOURCE_LENGTH + 1
        );
    }

    #[test]
    fn test_exported_field_rule() {
        assert!(exported_field("Bar"));
        assert!(exported_field("_bar"));
        assert!(exported_field("1"));
        assert!(!exported_field("bar"));
        assert!(!exported_field(""));
    }
}
