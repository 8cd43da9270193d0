//! The expression tooling CLI.
//!
//! - `exprc tokenize <EXPR>` - Print the token sequence of an expression
//! - `exprc render <TREE_JSON>` - Render a serialized syntax tree as text
//! - `exprc info` - Show build limits, symbol tables and timestamp formats

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use expr_syntax::{log_info, logging};

#[derive(Parser)]
#[command(name = "exprc", version, about = "Expression tokenizer and renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one line per token: KIND raw @start..end
    Tokenize {
        /// Expression text
        expression: String,

        /// TOML function table ([functions.<name>] parameters/return_type)
        #[arg(long)]
        functions: Option<PathBuf>,

        /// Output the token sequence as JSON
        #[arg(long)]
        json: bool,

        /// Also validate token-to-token transitions
        #[arg(long)]
        strict: bool,
    },
    /// Render a JSON-serialized syntax tree
    Render {
        /// Path to the tree JSON file
        tree: PathBuf,
    },
    /// Show build profile, limits, symbol tables and timestamp formats
    Info,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_global_logging() {
        eprintln!("Warning: logging unavailable: {}", e);
    }
    log_info!("exprc starting");

    let result = match cli.command {
        Commands::Tokenize {
            expression,
            functions,
            json,
            strict,
        } => commands::tokenize(&expression, functions.as_deref(), json, strict),
        Commands::Render { tree } => commands::render_file(&tree),
        Commands::Info => Ok(commands::info()),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(diagnostic) => {
            eprint!("{}", diagnostic);
            if !diagnostic.ends_with('\n') {
                eprintln!();
            }
            process::exit(1);
        }
    }
}
