//! Function descriptors and the name-to-descriptor lookup table
//!
//! The table is owned by the caller and only read by the tokenizer. It can be
//! built in code or loaded from a TOML document:
//!
//! ```toml
//! [functions.strlen]
//! parameters = ["string"]
//! return_type = "number"
//! ```

use crate::logging::codes;
use crate::{log_error, log_success};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Signature of a callable function as seen by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    pub return_type: String,
}

impl FunctionDescriptor {
    pub fn new(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = impl Into<String>>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            return_type: return_type.into(),
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Read-only lookup consulted for every identifier run
pub type FunctionTable = HashMap<String, FunctionDescriptor>;

#[derive(Debug, thiserror::Error)]
pub enum FunctionTableError {
    #[error("Cannot read function table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed function table: {message}")]
    Parse { message: String },

    #[error("Invalid function descriptor '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },
}

impl FunctionTableError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FunctionTableError::Io { .. } => codes::config::FUNCTION_TABLE_IO,
            FunctionTableError::Parse { .. } => codes::config::FUNCTION_TABLE_PARSE,
            FunctionTableError::InvalidDescriptor { .. } => {
                codes::config::INVALID_FUNCTION_DESCRIPTOR
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FunctionTableDocument {
    #[serde(default)]
    functions: BTreeMap<String, FunctionEntry>,
}

#[derive(Debug, Deserialize)]
struct FunctionEntry {
    #[serde(default)]
    parameters: Vec<String>,
    return_type: String,
}

/// Names must lex as a single identifier run without a period
fn validate_function_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("name is empty".to_string()),
        Some(first) if !first.is_alphabetic() => {
            return Err("name must start with a letter".to_string())
        }
        _ => {}
    }
    if let Some(bad) = chars.find(|c| !(c.is_alphabetic() || c.is_ascii_digit() || *c == '_')) {
        return Err(format!("name contains '{}'", bad));
    }
    if matches!(name, "true" | "false") || name.eq_ignore_ascii_case("in") {
        return Err("name is reserved".to_string());
    }
    Ok(())
}

fn validate_entry(name: &str, entry: &FunctionEntry) -> Result<(), String> {
    validate_function_name(name)?;
    if entry.return_type.trim().is_empty() {
        return Err("return_type is empty".to_string());
    }
    Ok(())
}

/// Parse a function table from TOML text
pub fn load_function_table_str(content: &str) -> Result<FunctionTable, FunctionTableError> {
    let document: FunctionTableDocument =
        toml::from_str(content).map_err(|e| FunctionTableError::Parse {
            message: e.to_string(),
        })?;

    let mut table = FunctionTable::with_capacity(document.functions.len());
    for (name, entry) in document.functions {
        if let Err(reason) = validate_entry(&name, &entry) {
            let error = FunctionTableError::InvalidDescriptor { name, reason };
            log_error!(error.error_code(), &error.to_string());
            return Err(error);
        }

        let descriptor = FunctionDescriptor {
            name: name.clone(),
            parameters: entry.parameters,
            return_type: entry.return_type,
        };
        table.insert(name, descriptor);
    }

    Ok(table)
}

/// Load a function table from a TOML file
pub fn load_function_table_file(path: &Path) -> Result<FunctionTable, FunctionTableError> {
    let content = std::fs::read_to_string(path).map_err(|source| FunctionTableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = load_function_table_str(&content)?;

    log_success!(
        codes::success::FUNCTION_TABLE_LOADED,
        "Function table loaded",
        "path" => path.display(),
        "functions" => table.len()
    );

    Ok(table)
}
