// Host error types.

use std::io;

use bb_overlay::OverlayError;
use bb_translate::TranslateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("Overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("Character set conversion failed: {0}")]
    Variant(#[from] bb_hanzi::VariantError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
