use bb_app::RectI32;

/// OCR result (text + coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    pub text: String,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

/// Bounding box for a text block, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn to_rect(&self) -> RectI32 {
        RectI32::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// OCR outcome summary derived from a list of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// No OCR results.
    None,
    /// OCR succeeded with text content.
    Success { text: String },
}

impl OcrOutcome {
    pub fn has_results(&self) -> bool {
        !matches!(self, OcrOutcome::None)
    }

    pub fn text(&self) -> &str {
        match self {
            OcrOutcome::None => "",
            OcrOutcome::Success { text } => text,
        }
    }
}
