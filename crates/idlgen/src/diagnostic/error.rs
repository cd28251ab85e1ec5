//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while generating code for a document.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // Internal Consistency Errors
    // =========================================================================
    #[error("Type `{variant}` cannot be handled by {operation}{}", context_suffix(construct, dialect))]
    #[diagnostic(
        code(idlgen::internal::unmapped_type),
        help("The document should have been rejected by validation. This is a bug in the validator or in the generator's type coverage.")
    )]
    InternalConsistency {
        operation: &'static str,
        variant: String,
        construct: Option<String>,
        dialect: Option<String>,
    },

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("I/O failure on '{}': {message}", path.display())]
    #[diagnostic(
        code(idlgen::io::write_failed),
        help("Nothing from this document should be considered generated. Fix the condition and regenerate the whole document.")
    )]
    Io {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Template Errors
    // =========================================================================
    #[error("Template '{template}' failed for '{construct}' ({dialect}): {message}")]
    #[diagnostic(code(idlgen::template::render_failed))]
    Template {
        dialect: String,
        construct: String,
        template: String,
        message: String,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Unsupported language: {dialect}")]
    #[diagnostic(
        code(idlgen::dialect::unsupported),
        help("Supported languages are: scala, java")
    )]
    UnsupportedDialect {
        dialect: String,
    },

    #[error("Invalid document '{}': {message}", path.display())]
    #[diagnostic(code(idlgen::input::invalid_document))]
    InvalidDocument {
        path: PathBuf,
        message: String,
    },
}

fn context_suffix(construct: &Option<String>, dialect: &Option<String>) -> String {
    match (construct, dialect) {
        (Some(name), Some(dialect)) => format!(" (while generating '{}' for {})", name, dialect),
        (Some(name), None) => format!(" (while generating '{}')", name),
        (None, Some(dialect)) => format!(" (for {})", dialect),
        (None, None) => String::new(),
    }
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an internal consistency error for a type variant that reached
    /// an operation it is not defined for.
    pub fn unmapped(operation: &'static str, variant: impl Into<String>) -> Self {
        Self::InternalConsistency {
            operation,
            variant: variant.into(),
            construct: None,
            dialect: None,
        }
    }

    /// Attaches the construct being generated and the dialect it was
    /// generated for, keeping whatever is already recorded.
    pub fn in_construct(self, dialect: &str, name: &str) -> Self {
        match self {
            Self::InternalConsistency {
                operation,
                variant,
                construct,
                dialect: recorded,
            } => Self::InternalConsistency {
                operation,
                variant,
                construct: construct.or_else(|| Some(name.to_string())),
                dialect: recorded.or_else(|| Some(dialect.to_string())),
            },
            other => other,
        }
    }
}
