//! WASM bindings for receipt text interpretation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR runs on the JavaScript side; only recognized text crosses over.

use wasm_bindgen::prelude::*;

use rcpt_core::receipt::rules::{classify, format_amount, parse_amount};
use rcpt_core::{interpret, OcrResult, ReceiptSubmission, TextBox, UploadResponse};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Interpret receipt text.
///
/// Returns the full extraction result; amounts are two-decimal strings.
#[wasm_bindgen]
pub fn interpret_receipt(text: &str) -> Result<JsValue, JsValue> {
    to_js(&interpret(text))
}

/// Interpret receipt text and return the display-only upload response.
#[wasm_bindgen]
pub fn upload_response(text: &str) -> Result<JsValue, JsValue> {
    to_js(&UploadResponse::from(&interpret(text)))
}

/// Interpret receipt text and return the submission to persist.
#[wasm_bindgen]
pub fn build_submission(text: &str) -> Result<JsValue, JsValue> {
    to_js(&ReceiptSubmission::from_extraction(&interpret(text)))
}

/// Expense category label for receipt text.
#[wasm_bindgen]
pub fn detect_category(text: &str) -> String {
    classify(text).to_string()
}

/// Normalize an amount such as "$12.99" or "-$2.00" to "12.99" / "-2.00".
#[wasm_bindgen]
pub fn normalize_amount(amount: &str) -> Option<String> {
    parse_amount(amount).map(format_amount)
}

/// OCR result from browser-side processing.
#[wasm_bindgen]
pub struct OcrResultJs {
    boxes: Vec<TextBox>,
    text: String,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a text box to the result.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_box(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.boxes.push(TextBox {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
        });
    }

    /// Set the full text, overriding the boxes.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text, one receipt row per line.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.text.is_empty() {
            OcrResult::from_boxes(self.boxes.clone(), (0, 0)).text
        } else {
            self.text.clone()
        }
    }

    /// Interpret this OCR result.
    #[wasm_bindgen]
    pub fn interpret(&self) -> Result<JsValue, JsValue> {
        interpret_receipt(&self.get_text())
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}
