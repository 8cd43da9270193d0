//! Configuration module for the expression front end
//! Compile-time limits come from the TOML profile read by build.rs

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("EXPR_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("EXPR_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }

    /// Human-readable summary of every compile-time limit
    pub fn limits_report() -> String {
        use super::compile_time::{lexical, logging, render};

        format!(
            "Profile: {}\n\
             Source: {}\n\
             Lexical limits:\n\
             - max source length: {}\n\
             - max literal size: {}\n\
             - max identifier length: {}\n\
             - max token count: {}\n\
             Render limits:\n\
             - max render depth: {}\n\
             - max output length: {}\n\
             Logging limits:\n\
             - log buffer size: {}\n\
             - max log message length: {}",
            profile(),
            source_info(),
            lexical::MAX_SOURCE_LENGTH,
            lexical::MAX_LITERAL_SIZE,
            lexical::MAX_IDENTIFIER_LENGTH,
            lexical::MAX_TOKEN_COUNT,
            render::MAX_RENDER_DEPTH,
            render::MAX_OUTPUT_LENGTH,
            logging::LOG_BUFFER_SIZE,
            logging::MAX_LOG_MESSAGE_LENGTH,
        )
    }
}
