//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for every code the tokenizer, renderer and
//! function-table loader can emit, together with their behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Function table loading error codes
pub mod config {
    use super::Code;

    pub const FUNCTION_TABLE_IO: Code = Code::new("E010");
    pub const FUNCTION_TABLE_PARSE: Code = Code::new("E011");
    pub const INVALID_FUNCTION_DESCRIPTOR: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_TOKEN: Code = Code::new("E020");
    pub const UNTERMINATED_LITERAL: Code = Code::new("E021");
    pub const INVALID_NUMBER: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const LITERAL_TOO_LARGE: Code = Code::new("E024");
    pub const HANGING_ACCESSOR: Code = Code::new("E025");
    pub const UNEXPORTED_FIELD: Code = Code::new("E026");
    pub const UNBALANCED_PARENTHESIS: Code = Code::new("E027");
    pub const TOO_MANY_TOKENS: Code = Code::new("E028");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E029");

    // State table replay
    pub const INVALID_TRANSITION: Code = Code::new("E030");
    pub const UNDEFINED_FUNCTION: Code = Code::new("E031");
    pub const UNEXPECTED_END: Code = Code::new("E032");
    pub const INVALID_LEXER_STATE: Code = Code::new("E033");
}

/// Tree rendering error codes
pub mod render {
    use super::Code;

    pub const UNSUPPORTED_NODE: Code = Code::new("E060");
    pub const ARITY_MISMATCH: Code = Code::new("E061");
    pub const DEPTH_EXCEEDED: Code = Code::new("E062");
    pub const OUTPUT_TOO_LARGE: Code = Code::new("E063");
    pub const VALUE_MISMATCH: Code = Code::new("E064");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FUNCTION_TABLE_LOADED: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const TRANSITION_VALIDATION_PASSED: Code = Code::new("I021");
    pub const RENDER_COMPLETE: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        let mut add = |metadata: ErrorMetadata| {
            registry.insert(metadata.code, metadata);
        };

        // System errors
        add(ErrorMetadata::new(
            "ERR001",
            "System",
            Severity::Critical,
            false,
            true,
            "Critical internal error",
            "File a bug report with the failing expression",
        ));
        add(ErrorMetadata::new(
            "ERR002",
            "System",
            Severity::Critical,
            false,
            true,
            "System initialization failure",
            "Check logging configuration and environment variables",
        ));

        // Function table errors
        add(ErrorMetadata::new(
            "E010",
            "Config",
            Severity::Medium,
            false,
            true,
            "Function table file could not be read",
            "Check the path and file permissions",
        ));
        add(ErrorMetadata::new(
            "E011",
            "Config",
            Severity::Medium,
            false,
            true,
            "Function table is not valid TOML",
            "Fix the TOML syntax of the function table",
        ));
        add(ErrorMetadata::new(
            "E012",
            "Config",
            Severity::Medium,
            false,
            true,
            "Function descriptor is invalid",
            "Give every function a non-empty identifier-style name",
        ));

        // Lexical errors
        add(ErrorMetadata::new(
            "E020",
            "Lexical",
            Severity::High,
            false,
            true,
            "Symbol run matches no operator table",
            "Check the operator spelling or separate adjacent operators with whitespace",
        ));
        add(ErrorMetadata::new(
            "E021",
            "Lexical",
            Severity::High,
            false,
            true,
            "Quoted literal or bracketed variable is never closed",
            "Add the closing quote or bracket",
        ));
        add(ErrorMetadata::new(
            "E022",
            "Lexical",
            Severity::High,
            false,
            true,
            "Numeric literal does not parse in its radix",
            "Use a single decimal point or valid hexadecimal digits",
        ));
        add(ErrorMetadata::new(
            "E023",
            "Lexical",
            Severity::Medium,
            false,
            true,
            "Identifier exceeds maximum length",
            "Shorten the identifier",
        ));
        add(ErrorMetadata::new(
            "E024",
            "Lexical",
            Severity::Medium,
            false,
            true,
            "Literal exceeds maximum size",
            "Shorten the literal or pass it as a parameter",
        ));
        add(ErrorMetadata::new(
            "E025",
            "Lexical",
            Severity::High,
            false,
            true,
            "Accessor path ends with a period",
            "Remove the trailing period or complete the field name",
        ));
        add(ErrorMetadata::new(
            "E026",
            "Lexical",
            Severity::High,
            false,
            true,
            "Accessor segment is not an exported field",
            "Capitalize the field name or bracket the whole variable name",
        ));
        add(ErrorMetadata::new(
            "E027",
            "Lexical",
            Severity::High,
            false,
            true,
            "Opening and closing parentheses do not balance",
            "Add or remove parentheses so every group is closed",
        ));
        add(ErrorMetadata::new(
            "E028",
            "Lexical",
            Severity::Critical,
            false,
            true,
            "Too many tokens in expression",
            "Split the expression or raise the token limit",
        ));
        add(ErrorMetadata::new(
            "E029",
            "Lexical",
            Severity::Critical,
            false,
            true,
            "Expression source exceeds maximum length",
            "Shorten the expression or raise the source limit",
        ));
        add(ErrorMetadata::new(
            "E030",
            "Lexical",
            Severity::High,
            false,
            true,
            "Token kind cannot follow the previous token",
            "Insert the missing operand or operator",
        ));
        add(ErrorMetadata::new(
            "E031",
            "Lexical",
            Severity::High,
            false,
            true,
            "Call of a name that is not a registered function",
            "Register the function or fix the name",
        ));
        add(ErrorMetadata::new(
            "E032",
            "Lexical",
            Severity::High,
            false,
            true,
            "Expression ends where an operand is required",
            "Complete the trailing operator",
        ));
        add(ErrorMetadata::new(
            "E033",
            "Lexical",
            Severity::Critical,
            false,
            true,
            "Token kind has no lexer state",
            "Do not pass synthetic ARRAY tokens to the state table",
        ));

        // Render errors
        add(ErrorMetadata::new(
            "E060",
            "Render",
            Severity::High,
            false,
            true,
            "Node kind has no textual form",
            "Fix the tree builder so it never emits this node",
        ));
        add(ErrorMetadata::new(
            "E061",
            "Render",
            Severity::High,
            false,
            true,
            "Node child count contradicts its kind",
            "Fix the tree builder arity for this operator",
        ));
        add(ErrorMetadata::new(
            "E062",
            "Render",
            Severity::Medium,
            false,
            true,
            "Tree nesting exceeds maximum render depth",
            "Flatten the expression or raise the depth limit",
        ));
        add(ErrorMetadata::new(
            "E063",
            "Render",
            Severity::Medium,
            false,
            true,
            "Rendered text exceeds maximum output length",
            "Render smaller subtrees or raise the output limit",
        ));
        add(ErrorMetadata::new(
            "E064",
            "Render",
            Severity::High,
            false,
            true,
            "Token value does not match its kind",
            "Build node tokens with the value variant of their kind",
        ));

        // Success codes
        add(ErrorMetadata::new(
            "I004",
            "System",
            Severity::Low,
            true,
            false,
            "Logging system initialized",
            "Continue processing",
        ));
        add(ErrorMetadata::new(
            "I010",
            "Config",
            Severity::Low,
            true,
            false,
            "Function table loaded",
            "Continue to tokenization",
        ));
        add(ErrorMetadata::new(
            "I020",
            "Lexical",
            Severity::Low,
            true,
            false,
            "Tokenization completed",
            "Hand the token sequence to the tree builder",
        ));
        add(ErrorMetadata::new(
            "I021",
            "Lexical",
            Severity::Low,
            true,
            false,
            "Token transitions validated",
            "Hand the token sequence to the tree builder",
        ));
        add(ErrorMetadata::new(
            "I060",
            "Render",
            Severity::Low,
            true,
            false,
            "Tree rendered",
            "Continue processing",
        ));

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from a code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_lexical_code_is_registered() {
        let codes = [
            lexical::INVALID_TOKEN,
            lexical::UNTERMINATED_LITERAL,
            lexical::INVALID_NUMBER,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::LITERAL_TOO_LARGE,
            lexical::HANGING_ACCESSOR,
            lexical::UNEXPORTED_FIELD,
            lexical::UNBALANCED_PARENTHESIS,
            lexical::TOO_MANY_TOKENS,
            lexical::SOURCE_TOO_LARGE,
            lexical::INVALID_TRANSITION,
            lexical::UNDEFINED_FUNCTION,
            lexical::UNEXPECTED_END,
            lexical::INVALID_LEXER_STATE,
        ];

        for code in codes {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert_eq!(get_category(code.as_str()), "Lexical");
        }
    }

    #[test]
    fn test_render_codes_halt() {
        assert!(requires_halt(render::UNSUPPORTED_NODE.as_str()));
        assert_eq!(get_severity(render::ARITY_MISMATCH.as_str()), Severity::High);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
    }
}
