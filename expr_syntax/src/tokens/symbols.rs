//! Operator symbol tables
//!
//! Five fixed mappings from symbol text to operator identity. A symbol may
//! appear in more than one table (`-` is both a prefix and a modifier); the
//! tokenizer decides between them using the lexer state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unary operators valid only where an operand may start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    #[serde(rename = "-")]
    Negate,
    #[serde(rename = "!")]
    Invert,
    #[serde(rename = "~")]
    BitwiseNot,
}

impl PrefixOperator {
    pub const ALL: [PrefixOperator; 3] = [
        PrefixOperator::Negate,
        PrefixOperator::Invert,
        PrefixOperator::BitwiseNot,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Negate),
            "!" => Some(Self::Invert),
            "~" => Some(Self::BitwiseNot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Invert => "!",
            Self::BitwiseNot => "~",
        }
    }
}

/// Binary arithmetic and bitwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulus,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = ">>")]
    BitwiseRightShift,
    #[serde(rename = "<<")]
    BitwiseLeftShift,
}

impl ModifierOperator {
    pub const ALL: [ModifierOperator; 11] = [
        ModifierOperator::Plus,
        ModifierOperator::Minus,
        ModifierOperator::Multiply,
        ModifierOperator::Divide,
        ModifierOperator::Modulus,
        ModifierOperator::Exponent,
        ModifierOperator::BitwiseAnd,
        ModifierOperator::BitwiseOr,
        ModifierOperator::BitwiseXor,
        ModifierOperator::BitwiseRightShift,
        ModifierOperator::BitwiseLeftShift,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "%" => Some(Self::Modulus),
            "**" => Some(Self::Exponent),
            "&" => Some(Self::BitwiseAnd),
            "|" => Some(Self::BitwiseOr),
            "^" => Some(Self::BitwiseXor),
            ">>" => Some(Self::BitwiseRightShift),
            "<<" => Some(Self::BitwiseLeftShift),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::Exponent => "**",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseRightShift => ">>",
            Self::BitwiseLeftShift => "<<",
        }
    }
}

/// Short-circuit boolean connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl LogicalOperator {
    pub const ALL: [LogicalOperator; 2] = [LogicalOperator::And, LogicalOperator::Or];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparatorOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=~")]
    Regex,
    #[serde(rename = "!~")]
    NotRegex,
    #[serde(rename = "in")]
    In,
}

impl ComparatorOperator {
    pub const ALL: [ComparatorOperator; 9] = [
        ComparatorOperator::Equal,
        ComparatorOperator::NotEqual,
        ComparatorOperator::Greater,
        ComparatorOperator::GreaterOrEqual,
        ComparatorOperator::Less,
        ComparatorOperator::LessOrEqual,
        ComparatorOperator::Regex,
        ComparatorOperator::NotRegex,
        ComparatorOperator::In,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterOrEqual),
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessOrEqual),
            "=~" => Some(Self::Regex),
            "!~" => Some(Self::NotRegex),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Regex => "=~",
            Self::NotRegex => "!~",
            Self::In => "in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TernaryOperator {
    #[serde(rename = "?")]
    True,
    #[serde(rename = ":")]
    False,
    #[serde(rename = "??")]
    Coalesce,
}

impl TernaryOperator {
    pub const ALL: [TernaryOperator; 3] = [
        TernaryOperator::True,
        TernaryOperator::False,
        TernaryOperator::Coalesce,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "?" => Some(Self::True),
            ":" => Some(Self::False),
            "??" => Some(Self::Coalesce),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "?",
            Self::False => ":",
            Self::Coalesce => "??",
        }
    }
}

macro_rules! impl_symbol_display {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_symbol_display!(
    PrefixOperator,
    ModifierOperator,
    LogicalOperator,
    ComparatorOperator,
    TernaryOperator
);
