use thiserror::Error;

use crate::scene::SceneNode;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    // --- Structural errors (fatal) ---
    #[error("Template section not found: the source must contain a <template> block")]
    TemplateNotFound,

    #[error("Template section opened at line {line} is never closed")]
    UnterminatedTemplate { line: usize },

    #[error("No valid root element found in the template")]
    NoRootElement,

    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    // --- Backend errors ---
    #[error("Font '{family} {style}' is unavailable: {reason}")]
    FontUnavailable {
        family: String,
        style: String,
        reason: String,
    },

    // --- Builder errors (recoverable, isolated per child) ---
    #[error("Failed to build '{component}': {reason}")]
    Build { component: String, reason: String },

    // --- Configuration and I/O ---
    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ConvertError {
    /// True for errors that abort the whole conversion rather than one child.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ConvertError::TemplateNotFound
                | ConvertError::UnterminatedTemplate { .. }
                | ConvertError::NoRootElement
                | ConvertError::ParseError { .. }
        )
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(err: serde_yaml::Error) -> Self {
        ConvertError::Settings(err.to_string())
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}

/// A fatal conversion failure. The diagnostic node still carries readable
/// error text so the caller always has something to hand to the backend.
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct ConversionFailure {
    pub error: ConvertError,
    pub diagnostic: Box<SceneNode>,
}
