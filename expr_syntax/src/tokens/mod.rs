//! Token model for the expression tokenizer
//!
//! - [`TokenKind`] - the seventeen kinds exchanged with tree builders
//! - [`Token`] / [`TokenValue`] - a classified lexical unit and its decoded value
//! - [`symbols`] - the prefix, modifier, logical, comparator and ternary tables
//! - [`FunctionTable`] - caller-owned lookup from name to [`FunctionDescriptor`]
//! - [`TokenStream`] - cursor over an emitted sequence

pub mod function;
pub mod kind;
pub mod symbols;
pub mod token;
pub mod token_stream;

pub use function::{
    load_function_table_file, load_function_table_str, FunctionDescriptor, FunctionTable,
    FunctionTableError,
};
pub use kind::TokenKind;
pub use symbols::{
    ComparatorOperator, LogicalOperator, ModifierOperator, PrefixOperator, TernaryOperator,
};
pub use token::{Token, TokenValue};
pub use token_stream::TokenStream;
