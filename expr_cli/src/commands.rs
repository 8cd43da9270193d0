//! Subcommand implementations. Each returns the text to print on success or
//! a formatted diagnostic on failure.

use expr_syntax::config::build_info;
use expr_syntax::config::runtime::LexicalPreferences;
use expr_syntax::lexical::{self, TIME_FORMATS};
use expr_syntax::tokens::{
    self, ComparatorOperator, FunctionTable, LogicalOperator, ModifierOperator, PrefixOperator,
    TernaryOperator, Token,
};
use expr_syntax::utils::SourceMap;
use expr_syntax::{log_error, log_info, render, Node};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TokenizeReport<'a> {
    expression: &'a str,
    tokens: &'a [Token],
}

pub fn tokenize(
    expression: &str,
    functions: Option<&Path>,
    json: bool,
    strict: bool,
) -> Result<String, String> {
    let table = match functions {
        Some(path) => tokens::load_function_table_file(path).map_err(|e| {
            log_error!(e.error_code(), &e.to_string());
            format!("Error: {}", e)
        })?,
        None => FunctionTable::new(),
    };

    let mut preferences = LexicalPreferences::default();
    preferences.validate_transitions |= strict;

    let tokens = lexical::tokenize_with_preferences(expression, &table, preferences)
        .map_err(|e| SourceMap::new(expression).format_error(&e.span(), &e.to_string()))?;

    log_info!("Tokenized expression", "tokens" => tokens.len());

    if json {
        let report = TokenizeReport {
            expression,
            tokens: &tokens,
        };
        return serde_json::to_string_pretty(&report).map_err(|e| format!("Error: {}", e));
    }

    Ok(tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_file(path: &Path) -> Result<String, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Error: cannot read '{}': {}", path.display(), e))?;

    let tree: Node = serde_json::from_str(&content)
        .map_err(|e| format!("Error: '{}' is not a serialized tree: {}", path.display(), e))?;

    render(&tree).map_err(|e| format!("Error: [{}] {}", e.error_code(), e))
}

fn join_symbols<T>(items: &[T], symbol: fn(&T) -> &'static str) -> String {
    items.iter().map(symbol).collect::<Vec<_>>().join(" ")
}

pub fn info() -> String {
    let mut output = String::new();

    output.push_str(&format!("exprc v{}\n\n", env!("CARGO_PKG_VERSION")));
    output.push_str(&build_info::limits_report());
    output.push_str("\n\nSymbol tables:\n");
    output.push_str(&format!(
        "  prefix:     {}\n",
        join_symbols(&PrefixOperator::ALL, PrefixOperator::as_str)
    ));
    output.push_str(&format!(
        "  modifier:   {}\n",
        join_symbols(&ModifierOperator::ALL, ModifierOperator::as_str)
    ));
    output.push_str(&format!(
        "  logical:    {}\n",
        join_symbols(&LogicalOperator::ALL, LogicalOperator::as_str)
    ));
    output.push_str(&format!(
        "  comparator: {}\n",
        join_symbols(&ComparatorOperator::ALL, ComparatorOperator::as_str)
    ));
    output.push_str(&format!(
        "  ternary:    {}\n",
        join_symbols(&TernaryOperator::ALL, TernaryOperator::as_str)
    ));

    output.push_str("\nTimestamp formats (first match wins):\n");
    for (index, format) in TIME_FORMATS.iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<20} {}\n",
            index + 1,
            format.name,
            format.layout
        ));
    }

    output
}
