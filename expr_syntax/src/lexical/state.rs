//! Lexer state machine
//!
//! The current state is a pure function of the last emitted token kind. The
//! tokenizer asks it one question: may a PREFIX come next? The same table
//! also drives optional whole-sequence transition validation.

use super::error::LexerError;
use crate::tokens::{Token, TokenKind};

use TokenKind::*;

/// A state and the kinds it may legally be followed by
#[derive(Debug, PartialEq, Eq)]
pub struct LexerState {
    pub kind: TokenKind,
    /// Whether an expression may end in this state
    pub is_eof: bool,
    pub valid_next: &'static [TokenKind],
}

impl LexerState {
    pub fn can_transition_to(&self, kind: TokenKind) -> bool {
        self.valid_next.contains(&kind)
    }
}

const OPERAND_END: &[TokenKind] = &[Modifier, Comparator, LogicalOp, ClauseClose, Ternary, Separator];

static LEXER_STATES: [LexerState; 15] = [
    LexerState {
        kind: Unknown,
        is_eof: false,
        valid_next: &[Prefix, Numeric, Boolean, Variable, Function, Accessor, String, Time, Clause],
    },
    LexerState {
        kind: Clause,
        is_eof: false,
        valid_next: &[
            Prefix, Numeric, Boolean, Variable, Function, Accessor, String, Time, Clause,
            ClauseClose,
        ],
    },
    LexerState {
        kind: ClauseClose,
        is_eof: true,
        valid_next: &[
            Comparator, Modifier, Numeric, Boolean, Variable, String, Time, Clause, ClauseClose,
            LogicalOp, Ternary, Separator,
        ],
    },
    LexerState {
        kind: Numeric,
        is_eof: true,
        valid_next: OPERAND_END,
    },
    LexerState {
        kind: Boolean,
        is_eof: true,
        valid_next: OPERAND_END,
    },
    LexerState {
        kind: String,
        is_eof: true,
        valid_next: OPERAND_END,
    },
    LexerState {
        kind: Time,
        is_eof: true,
        valid_next: OPERAND_END,
    },
    LexerState {
        kind: Variable,
        is_eof: true,
        valid_next: OPERAND_END,
    },
    LexerState {
        kind: Accessor,
        is_eof: true,
        valid_next: OPERAND_END,
    },
    LexerState {
        kind: Modifier,
        is_eof: false,
        valid_next: &[
            Prefix, Numeric, Variable, Function, Accessor, String, Boolean, Clause, ClauseClose,
        ],
    },
    LexerState {
        kind: Comparator,
        is_eof: false,
        valid_next: &[
            Prefix, Numeric, Boolean, Variable, Function, Accessor, String, Time, Clause,
            ClauseClose,
        ],
    },
    LexerState {
        kind: LogicalOp,
        is_eof: false,
        valid_next: &[
            Prefix, Numeric, Boolean, Variable, Function, Accessor, String, Time, Clause,
            ClauseClose,
        ],
    },
    LexerState {
        kind: Prefix,
        is_eof: false,
        valid_next: &[Numeric, Boolean, Variable, Function, Accessor, Clause, ClauseClose],
    },
    LexerState {
        kind: Ternary,
        is_eof: false,
        valid_next: &[
            Prefix, Numeric, Boolean, String, Time, Variable, Function, Accessor, Clause,
            Separator,
        ],
    },
    LexerState {
        kind: Function,
        is_eof: false,
        valid_next: &[Clause],
    },
];

static SEPARATOR_STATE: LexerState = LexerState {
    kind: Separator,
    is_eof: false,
    valid_next: &[
        Prefix, Numeric, Boolean, String, Time, Variable, Function, Accessor, Clause,
    ],
};

/// State before any token has been emitted
pub fn initial_state() -> &'static LexerState {
    &LEXER_STATES[0]
}

/// State entered after emitting a token of `kind`; `None` for ARRAY
pub fn state_for(kind: TokenKind) -> Option<&'static LexerState> {
    if kind == Separator {
        return Some(&SEPARATOR_STATE);
    }
    LEXER_STATES.iter().find(|state| state.kind == kind)
}

/// Replay the state table over a finished token sequence.
///
/// An empty sequence is accepted.
pub fn validate_transitions(tokens: &[Token]) -> Result<(), LexerError> {
    let mut state = initial_state();
    let mut last: Option<&Token> = None;

    for token in tokens {
        if !state.can_transition_to(token.kind) {
            if let Some(previous) = last {
                if previous.kind == Variable && token.kind == Clause {
                    return Err(LexerError::UndefinedFunction {
                        text: previous.raw.clone(),
                        span: previous.span,
                    });
                }
            }
            return Err(LexerError::InvalidTransition {
                from: state.kind,
                to: token.kind,
                text: token.raw.clone(),
                span: token.span,
            });
        }

        state = state_for(token.kind).ok_or(LexerError::InvalidLexerState {
            kind: token.kind,
            span: token.span,
        })?;
        last = Some(token);
    }

    match last {
        Some(token) if !state.is_eof => Err(LexerError::UnexpectedEnd {
            kind: token.kind,
            text: token.raw.clone(),
            span: token.span,
        }),
        _ => Ok(()),
    }
}
