//! OCR acquisition: turning a receipt image into text.
//!
//! The interpreter only ever sees text. Anything that can read an image
//! implements [`TextAcquirer`]; when it fails the interpreter is not run.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcrError;
use crate::models::receipt::ExtractionResult;
use crate::receipt::RuleInterpreter;

/// Height in pixels of one reading-order row.
const ROW_HEIGHT: f32 = 20.0;

/// Something that can read the text off a receipt image.
pub trait TextAcquirer {
    /// Recognize the text in `image`.
    fn acquire(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }

    fn row(&self) -> i32 {
        let (_, min_y, _, _) = self.rect();
        (min_y / ROW_HEIGHT) as i32
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Detected and recognized text boxes.
    pub boxes: Vec<TextBox>,

    /// Full text, one receipt row per line.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Wrap text that was recognized elsewhere.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::empty(0, 0)
        }
    }

    /// Build a result from unordered boxes.
    pub fn from_boxes(boxes: Vec<TextBox>, image_size: (u32, u32)) -> Self {
        let mut result = Self {
            boxes,
            ..Self::empty(image_size.0, image_size.1)
        };
        result.sort_by_reading_order();
        result
    }

    /// Sort boxes by reading order (top-to-bottom, left-to-right) and
    /// rebuild the text, joining boxes that share a row with a space.
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (row_a, row_b) = (a.row(), b.row());
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                let (ax, _, _, _) = a.rect();
                let (bx, _, _, _) = b.rect();
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let mut lines: Vec<String> = Vec::new();
        let mut current_row = None;

        for text_box in &self.boxes {
            let row = text_box.row();
            if current_row == Some(row) {
                if let Some(line) = lines.last_mut() {
                    line.push(' ');
                    line.push_str(&text_box.text);
                    continue;
                }
            }
            lines.push(text_box.text.clone());
            current_row = Some(row);
        }

        self.text = lines.join("\n");
    }
}

/// Open and decode a receipt image.
pub fn load_image(path: &Path) -> Result<DynamicImage, OcrError> {
    image::open(path).map_err(|e| OcrError::UnreadableImage(format!("{}: {}", path.display(), e)))
}

/// Read the text off `image` and interpret it.
///
/// OCR failures are returned unchanged and the interpreter is not run.
pub fn scan_image<A>(acquirer: &A, image: &DynamicImage) -> Result<ExtractionResult, OcrError>
where
    A: TextAcquirer + ?Sized,
{
    let ocr = acquirer.acquire(image)?;
    debug!(
        "OCR produced {} boxes, {} chars in {}ms",
        ocr.boxes.len(),
        ocr.text.len(),
        ocr.processing_time_ms
    );
    Ok(RuleInterpreter::new().interpret(&ocr.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_box(text: &str, x: f32, y: f32) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 12.0, x, y + 12.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    struct FixedText(&'static str);

    impl TextAcquirer for FixedText {
        fn acquire(&self, _image: &DynamicImage) -> Result<OcrResult, OcrError> {
            Ok(OcrResult::from_text(self.0))
        }
    }

    struct Unreadable;

    impl TextAcquirer for Unreadable {
        fn acquire(&self, _image: &DynamicImage) -> Result<OcrResult, OcrError> {
            Err(OcrError::UnreadableImage("blank".to_string()))
        }
    }

    #[test]
    fn test_reading_order_groups_rows() {
        let result = OcrResult::from_boxes(
            vec![
                text_box("$3.99", 200.0, 42.0),
                text_box("TARGET", 10.0, 2.0),
                text_box("Milk", 10.0, 44.0),
            ],
            (300, 100),
        );

        assert_eq!(result.text, "TARGET\nMilk $3.99");
        assert_eq!(result.boxes[0].text, "TARGET");
    }

    #[test]
    fn test_scan_image_interprets_text() {
        let image = DynamicImage::new_rgb8(1, 1);
        let result = scan_image(&FixedText("Uber\nTrip $12.00"), &image).unwrap();

        assert_eq!(result.store_name, "Uber");
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn test_scan_image_propagates_ocr_failure() {
        let image = DynamicImage::new_rgb8(1, 1);
        let err = scan_image(&Unreadable, &image).unwrap_err();
        assert!(matches!(err, OcrError::UnreadableImage(_)));
    }

    #[test]
    fn test_load_image_missing_file() {
        let err = load_image(Path::new("/nonexistent/receipt.png")).unwrap_err();
        assert!(matches!(err, OcrError::UnreadableImage(_)));
    }
}
