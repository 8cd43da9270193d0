//! Tree renderer
//!
//! Converts a syntax tree back into expression text. Logical connectives are
//! laid out one operand per line with two spaces of indentation per depth
//! level and are parenthesized below the top level. Every other kind renders
//! on a single line. The output tokenizes back to the same tree shape.

pub mod error;
pub mod node;

use crate::config::compile_time::render::{MAX_OUTPUT_LENGTH, MAX_RENDER_DEPTH};
use crate::logging::codes;
use crate::tokens::{TokenKind, TokenValue};
use crate::{log_error, log_success};

pub use error::RenderError;
pub use node::Node;

/// Render a tree from the top level
pub fn render(node: &Node) -> Result<String, RenderError> {
    render_at(node, 0)
}

/// Render a tree as if it were nested `depth` levels deep
pub fn render_at(node: &Node, depth: usize) -> Result<String, RenderError> {
    let result = render_node(node, depth, 0).and_then(|text| {
        if text.len() > MAX_OUTPUT_LENGTH {
            Err(RenderError::OutputTooLarge {
                length: text.len(),
                max: MAX_OUTPUT_LENGTH,
            })
        } else {
            Ok(text)
        }
    });

    match &result {
        Ok(text) => {
            log_success!(
                codes::success::RENDER_COMPLETE,
                "Tree rendered",
                "root" => node.kind(),
                "bytes" => text.len()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), &error.to_string(), "root" => node.kind());
        }
    }

    result
}

fn expect_children(node: &Node, expected: usize) -> Result<(), RenderError> {
    if node.children.len() == expected {
        Ok(())
    } else {
        Err(RenderError::ArityMismatch {
            kind: node.kind(),
            expected,
            found: node.children.len(),
        })
    }
}

fn value_mismatch(node: &Node) -> RenderError {
    RenderError::ValueMismatch { kind: node.kind() }
}

fn operator_symbol(node: &Node) -> Result<&'static str, RenderError> {
    node.token.value.symbol().ok_or_else(|| value_mismatch(node))
}

/// `nesting` counts recursion so that function arguments, which restart at
/// indentation zero, still count toward the depth limit
fn render_node(node: &Node, depth: usize, nesting: usize) -> Result<String, RenderError> {
    if nesting > MAX_RENDER_DEPTH {
        return Err(RenderError::DepthExceeded {
            max: MAX_RENDER_DEPTH,
        });
    }
    let nested = nesting + 1;

    match node.kind() {
        TokenKind::LogicalOp => {
            expect_children(node, 2)?;
            let indent = "  ".repeat(depth);
            let group = format!(
                "{}\n{}{}\n{}{}",
                render_node(&node.children[0], depth + 1, nested)?,
                indent,
                operator_symbol(node)?,
                indent,
                render_node(&node.children[1], depth + 1, nested)?,
            );
            if depth > 0 {
                Ok(format!("(\n{}{}\n{})", indent, group, indent))
            } else {
                Ok(group)
            }
        }

        TokenKind::Comparator => {
            expect_children(node, 2)?;
            Ok(format!(
                "{} {} {}",
                render_node(&node.children[0], depth + 1, nested)?,
                operator_symbol(node)?,
                render_node(&node.children[1], depth + 1, nested)?,
            ))
        }

        TokenKind::Modifier | TokenKind::Ternary => {
            expect_children(node, 2)?;
            Ok(format!(
                "{} {} {}",
                render_operand(&node.children[0], depth + 1, nested)?,
                operator_symbol(node)?,
                render_operand(&node.children[1], depth + 1, nested)?,
            ))
        }

        TokenKind::Prefix => {
            expect_children(node, 1)?;
            Ok(format!(
                "{}({})",
                operator_symbol(node)?,
                render_node(&node.children[0], depth + 1, nested)?,
            ))
        }

        TokenKind::Function => {
            let name = match &node.token.value {
                TokenValue::Function(descriptor) => descriptor.name.as_str(),
                _ => return Err(value_mismatch(node)),
            };
            let arguments = node
                .children
                .iter()
                .map(|child| render_node(child, 0, nested))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{}( {} )", name, arguments.join(", ")))
        }

        TokenKind::Array => {
            let elements = node
                .children
                .iter()
                .map(|child| render_node(child, depth + 1, nested))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("( {} )", elements.join(", ")))
        }

        TokenKind::Numeric
        | TokenKind::String
        | TokenKind::Variable
        | TokenKind::Boolean
        | TokenKind::Time
        | TokenKind::Accessor => {
            expect_children(node, 0)?;
            render_literal(node)
        }

        TokenKind::Separator
        | TokenKind::Clause
        | TokenKind::ClauseClose
        | TokenKind::Unknown => Err(RenderError::UnsupportedNode { kind: node.kind() }),
    }
}

/// Operands of one-line binary operators keep their grouping
fn render_operand(node: &Node, depth: usize, nesting: usize) -> Result<String, RenderError> {
    let text = render_node(node, depth, nesting)?;
    match node.kind() {
        TokenKind::Modifier | TokenKind::Ternary | TokenKind::Comparator => {
            Ok(format!("({})", text))
        }
        _ => Ok(text),
    }
}

fn render_literal(node: &Node) -> Result<String, RenderError> {
    match (node.kind(), &node.token.value) {
        (TokenKind::Numeric, TokenValue::Numeric(value)) if value.is_finite() => {
            Ok(value.to_string())
        }
        (TokenKind::Boolean, TokenValue::Boolean(value)) => Ok(value.to_string()),
        (TokenKind::String, TokenValue::Text(text)) => Ok(quote_string(text)),
        (TokenKind::Variable, TokenValue::Text(name)) => Ok(variable_name(name)),
        (TokenKind::Time, TokenValue::Time(time)) => Ok(format!("'{}'", time.to_rfc3339())),
        (TokenKind::Accessor, TokenValue::Path(segments)) => Ok(segments.join(".")),
        _ => Err(value_mismatch(node)),
    }
}

fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\\' || ch == '\'' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Names that would not lex back as one plain variable are bracketed
fn variable_name(name: &str) -> String {
    let plain = name.chars().next().map_or(false, char::is_alphabetic)
        && name.chars().all(|c| c.is_alphabetic() || c.is_ascii_digit() || c == '_')
        && name != "true"
        && name != "false"
        && !name.eq_ignore_ascii_case("in");

    if plain {
        return name.to_string();
    }

    let mut bracketed = String::with_capacity(name.len() + 2);
    bracketed.push('[');
    for ch in name.chars() {
        if ch == '\\' || ch == ']' {
            bracketed.push('\\');
        }
        bracketed.push(ch);
    }
    bracketed.push(']');
    bracketed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{
        ComparatorOperator, FunctionDescriptor, LogicalOperator, ModifierOperator,
        PrefixOperator, TernaryOperator, Token,
    };
    use assert_matches::assert_matches;

    fn leaf(kind: TokenKind, value: TokenValue) -> Node {
        Node::leaf(Token::synthetic(kind, value))
    }

    fn var(name: &str) -> Node {
        leaf(TokenKind::Variable, TokenValue::Text(name.to_string()))
    }

    fn num(value: f64) -> Node {
        leaf(TokenKind::Numeric, TokenValue::Numeric(value))
    }

    fn binary(kind: TokenKind, value: TokenValue, left: Node, right: Node) -> Node {
        Node::new(Token::synthetic(kind, value), vec![left, right])
    }

    fn and(left: Node, right: Node) -> Node {
        binary(TokenKind::LogicalOp, TokenValue::Logical(LogicalOperator::And), left, right)
    }

    fn or(left: Node, right: Node) -> Node {
        binary(TokenKind::LogicalOp, TokenValue::Logical(LogicalOperator::Or), left, right)
    }

    fn function(name: &str, arguments: Vec<Node>) -> Node {
        Node::new(
            Token::synthetic(
                TokenKind::Function,
                TokenValue::Function(FunctionDescriptor::new(name, Vec::<String>::new(), "any")),
            ),
            arguments,
        )
    }

    #[test]
    fn test_top_level_logical_is_not_wrapped() {
        let text = render(&and(var("a"), var("b"))).unwrap();
        assert_eq!(text, "a\n&&\nb");
    }

    #[test]
    fn test_nested_logical_is_wrapped() {
        let text = render_at(&and(var("a"), var("b")), 1).unwrap();
        assert_eq!(text, "(\n  a\n  &&\n  b\n  )");
        assert!(text.starts_with('(') && text.ends_with(')'));

        let text = render(&or(and(var("a"), var("b")), var("c"))).unwrap();
        assert_eq!(text, "(\n  a\n  &&\n  b\n  )\n||\nc");
    }

    #[test]
    fn test_comparator_and_prefix() {
        let comparison = binary(
            TokenKind::Comparator,
            TokenValue::Comparator(ComparatorOperator::GreaterOrEqual),
            var("a"),
            num(1.0),
        );
        assert_eq!(render(&comparison).unwrap(), "a >= 1");

        let negated = Node::new(
            Token::synthetic(TokenKind::Prefix, TokenValue::Prefix(PrefixOperator::Negate)),
            vec![num(2.5)],
        );
        assert_eq!(render(&negated).unwrap(), "-(2.5)");
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(render(&function("now", vec![])).unwrap(), "now(  )");
        assert_eq!(
            render(&function("max", vec![var("a"), num(3.0)])).unwrap(),
            "max( a, 3 )"
        );
    }

    #[test]
    fn test_arrays() {
        let array = Node::array(vec![num(1.0), num(2.0)]);
        assert_eq!(render(&array).unwrap(), "( 1, 2 )");
    }

    #[test]
    fn test_modifier_operands_keep_grouping() {
        let sum = binary(
            TokenKind::Modifier,
            TokenValue::Modifier(ModifierOperator::Plus),
            var("a"),
            var("b"),
        );
        let product = binary(
            TokenKind::Modifier,
            TokenValue::Modifier(ModifierOperator::Multiply),
            sum,
            num(2.0),
        );
        assert_eq!(render(&product).unwrap(), "(a + b) * 2");
    }

    #[test]
    fn test_ternary_operands_keep_grouping() {
        let condition = binary(
            TokenKind::Ternary,
            TokenValue::Ternary(TernaryOperator::True),
            var("a"),
            num(1.0),
        );
        assert_eq!(render(&condition).unwrap(), "a ? 1");

        let choice = binary(
            TokenKind::Ternary,
            TokenValue::Ternary(TernaryOperator::False),
            condition,
            num(2.0),
        );
        assert_eq!(render(&choice).unwrap(), "(a ? 1) : 2");

        let fallback = binary(
            TokenKind::Ternary,
            TokenValue::Ternary(TernaryOperator::Coalesce),
            var("a"),
            var("b"),
        );
        assert_eq!(render(&fallback).unwrap(), "a ?? b");
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(
            render(&leaf(TokenKind::String, TokenValue::Text("it's".into()))).unwrap(),
            "'it\\'s'"
        );
        assert_eq!(render(&var("my var")).unwrap(), "[my var]");
        assert_eq!(render(&var("true")).unwrap(), "[true]");
        assert_eq!(render(&var("a_1")).unwrap(), "a_1");
        assert_eq!(render(&var("x²")).unwrap(), "[x²]");
        assert_eq!(
            render(&leaf(TokenKind::Boolean, TokenValue::Boolean(false))).unwrap(),
            "false"
        );
        assert_eq!(
            render(&leaf(
                TokenKind::Accessor,
                TokenValue::Path(vec!["foo".into(), "Bar".into()])
            ))
            .unwrap(),
            "foo.Bar"
        );
    }

    #[test]
    fn test_unsupported_kinds_fail() {
        for kind in [TokenKind::Separator, TokenKind::Clause, TokenKind::ClauseClose, TokenKind::Unknown] {
            assert_matches!(
                render(&leaf(kind, TokenValue::Empty)),
                Err(RenderError::UnsupportedNode { kind: k }) if k == kind
            );
        }
    }

    #[test]
    fn test_arity_and_value_checks() {
        let lonely = Node::new(
            Token::synthetic(TokenKind::Comparator, TokenValue::Comparator(ComparatorOperator::Equal)),
            vec![var("a")],
        );
        assert_matches!(
            render(&lonely),
            Err(RenderError::ArityMismatch { expected: 2, found: 1, .. })
        );

        assert_matches!(
            render(&leaf(TokenKind::Numeric, TokenValue::Text("1".into()))),
            Err(RenderError::ValueMismatch { kind: TokenKind::Numeric })
        );
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_matches!(
                render(&num(value)),
                Err(RenderError::ValueMismatch { kind: TokenKind::Numeric })
            );
        }
    }

    #[test]
    fn test_output_length_limit() {
        let text = "a".repeat(MAX_OUTPUT_LENGTH);
        let literal = leaf(TokenKind::String, TokenValue::Text(text));
        assert_matches!(
            render(&literal),
            Err(RenderError::OutputTooLarge { length, max: MAX_OUTPUT_LENGTH })
                if length == MAX_OUTPUT_LENGTH + 2
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut node = num(1.0);
        for _ in 0..=MAX_RENDER_DEPTH {
            node = function("f", vec![node]);
        }
        assert_matches!(render(&node), Err(RenderError::DepthExceeded { .. }));
    }
}
