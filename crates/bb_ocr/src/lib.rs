pub mod engine;
pub mod hanzi;
pub mod types;

// Re-export the engine type so downstream crates don't need to depend on `ocr-rs` directly.
pub use ocr_rs::OcrEngine;

pub use engine::*;
pub use hanzi::{HanziFrame, recognize_hanzi, to_hanzi_boxes};
pub use types::*;

/// Models directory used when settings don't name one.
pub const DEFAULT_MODELS_DIR: &str = "models";
