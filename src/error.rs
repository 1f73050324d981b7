use miette::Diagnostic;
use thiserror::Error;

/// Main error type for witch-assets operations
#[derive(Error, Diagnostic, Debug)]
pub enum WitchError {
    #[error("IO error: {0}")]
    #[diagnostic(code(witch::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(witch::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Manifest error with {path}: {message}")]
    #[diagnostic(code(witch::manifest))]
    Manifest {
        path: std::path::PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(witch::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(witch::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, WitchError>;
