//! Tree rendering errors

use crate::logging::codes;
use crate::tokens::TokenKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Cannot render {kind} node")]
    UnsupportedNode { kind: TokenKind },

    #[error("{kind} node expects {expected} children, found {found}")]
    ArityMismatch {
        kind: TokenKind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} node carries a value of the wrong shape")]
    ValueMismatch { kind: TokenKind },

    #[error("Tree nesting exceeds {max} levels")]
    DepthExceeded { max: usize },

    #[error("Rendered text too large: {length} bytes (max {max})")]
    OutputTooLarge { length: usize, max: usize },
}

impl RenderError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            RenderError::UnsupportedNode { .. } => codes::render::UNSUPPORTED_NODE,
            RenderError::ArityMismatch { .. } => codes::render::ARITY_MISMATCH,
            RenderError::ValueMismatch { .. } => codes::render::VALUE_MISMATCH,
            RenderError::DepthExceeded { .. } => codes::render::DEPTH_EXCEEDED,
            RenderError::OutputTooLarge { .. } => codes::render::OUTPUT_TOO_LARGE,
        }
    }
}
