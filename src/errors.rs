// ABOUTME: Error types for the slidev-converter application
// ABOUTME: Provides structured error handling for each stage of the conversion pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("PPTX parsing error: {0}")]
    PptxError(String),

    #[error("XML parsing error in {part}: {message}")]
    XmlError { part: String, message: String },

    #[error("Image extraction error: {0}")]
    ImageError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFoundError(PathBuf),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

// Implement conversion from anyhow::Error to our ConvertError
impl From<anyhow::Error> for ConvertError {
    fn from(err: anyhow::Error) -> Self {
        ConvertError::UnknownError(err.to_string())
    }
}

// Implement conversion from zip errors
#[cfg(feature = "pptx")]
impl From<zip::result::ZipError> for ConvertError {
    fn from(err: zip::result::ZipError) -> Self {
        ConvertError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

impl ConvertError {
    /// Whether this error means the deck backend is not compiled in
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, ConvertError::MissingDependency(_))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
