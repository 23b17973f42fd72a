//! Error types for the rcpt-core library.
//!
//! Interpretation itself never fails: a field that cannot be found is an
//! absent value on [`ExtractionResult`](crate::ExtractionResult). The errors
//! here belong to the layers around it (image loading, OCR, configuration).

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// OCR acquisition error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to turning a receipt image into text.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The source image could not be read or decoded.
    #[error("could not read the image: {0}")]
    UnreadableImage(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
