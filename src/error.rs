use miette::Diagnostic;
use thiserror::Error;

/// Main error type for deck operations
#[derive(Error, Diagnostic, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    #[diagnostic(code(deck::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(deck::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(deck::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error in .{directive}: {message}")]
    #[diagnostic(code(deck::validate))]
    Validation {
        directive: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(deck::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Theme error: {message}")]
    #[diagnostic(code(deck::theme))]
    Theme {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, DeckError>;
