//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - Receipt text interpretation (store, date, total, category, line items)
//! - Upload and submission payloads built from an interpretation
//! - OCR acquisition behind the [`TextAcquirer`] trait

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use error::{OcrError, RcptError, Result};
pub use models::receipt::{Category, ExtractionResult, LineItem};
pub use models::submission::{ReceiptSubmission, UploadResponse};
pub use ocr::{load_image, scan_image, OcrResult, TextAcquirer, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use receipt::{interpret, ReceiptExtractor, RuleInterpreter};
