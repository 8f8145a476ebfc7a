//! Camera mode: live recognition and captured-image recognition.

use std::time::{Duration, Instant};

use crate::geometry::RectI32;
use crate::ocr;

/// How long a tapped box stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(300);

/// How long the "Text copied" toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(1);

/// One recognized text element that contained Hanzi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HanziBox {
    pub hanzi: String,
    pub pinyin: String,
    /// Bounding box in source image pixels.
    pub rect: RectI32,
}

impl HanziBox {
    pub fn display_text(&self, show_pinyin: bool) -> &str {
        if show_pinyin { &self.pinyin } else { &self.hanzi }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TogglePinyin,
    /// A live frame was recognized.
    LiveFrameRecognized {
        boxes: Vec<HanziBox>,
        frame_size: (u32, u32),
    },
    /// A photo was taken or picked; recognition should start.
    ImageCaptured { size: (u32, u32) },
    /// Recognition finished for the capture that emitted `request_id`.
    CapturedImageRecognized {
        request_id: u64,
        boxes: Vec<HanziBox>,
    },
    /// Recognition of the still image failed.
    CaptureFailed { request_id: u64 },
    /// Drop the captured image and go back to live recognition.
    Retake,
    /// The user tapped the box at `index` in `visible_boxes()`.
    BoxTapped { index: usize, now: Instant },
    Tick { now: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RecognizeCapturedImage { request_id: u64 },
    CopyToClipboard { text: String },
    ShowCopiedToast,
    HideCopiedToast,
    PinyinToggled { show_pinyin: bool },
}

#[derive(Debug)]
pub struct Model {
    show_pinyin: bool,
    captured_size: Option<(u32, u32)>,
    captured_boxes: Vec<HanziBox>,
    live_boxes: Vec<HanziBox>,
    live_frame_size: Option<(u32, u32)>,
    ocr: ocr::Model,
    highlight: Option<(usize, Instant)>,
    toast_until: Option<Instant>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Model {
    pub fn new(show_pinyin: bool) -> Self {
        Self {
            show_pinyin,
            captured_size: None,
            captured_boxes: Vec::new(),
            live_boxes: Vec::new(),
            live_frame_size: None,
            ocr: ocr::Model::default(),
            highlight: None,
            toast_until: None,
        }
    }

    pub fn show_pinyin(&self) -> bool {
        self.show_pinyin
    }

    pub fn ocr(&self) -> &ocr::Model {
        &self.ocr
    }

    pub fn has_captured_image(&self) -> bool {
        self.captured_size.is_some()
    }

    /// Boxes currently on screen: the captured image's while one is shown,
    /// otherwise the latest live frame's.
    pub fn visible_boxes(&self) -> &[HanziBox] {
        if self.captured_size.is_some() {
            &self.captured_boxes
        } else {
            &self.live_boxes
        }
    }

    /// Pixel size of the image the visible boxes refer to.
    pub fn visible_frame_size(&self) -> Option<(u32, u32)> {
        self.captured_size.or(self.live_frame_size)
    }

    /// True while the visible boxes come from the live feed.
    pub fn is_live(&self) -> bool {
        self.captured_size.is_none()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlight.map(|(index, _)| index)
    }

    pub fn is_toast_visible(&self) -> bool {
        self.toast_until.is_some()
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::TogglePinyin => {
                self.show_pinyin = !self.show_pinyin;
                vec![Effect::PinyinToggled {
                    show_pinyin: self.show_pinyin,
                }]
            }

            Action::LiveFrameRecognized { boxes, frame_size } => {
                // The live feed keeps running underneath a captured photo.
                if self.captured_size.is_none() {
                    self.live_boxes = boxes;
                    self.live_frame_size = Some(frame_size);
                    self.highlight = None;
                }
                Vec::new()
            }

            Action::ImageCaptured { size } => {
                if self.ocr.is_running() {
                    return Vec::new();
                }
                self.captured_size = Some(size);
                self.captured_boxes.clear();
                self.highlight = None;
                let request_id = self.ocr.start();
                vec![Effect::RecognizeCapturedImage { request_id }]
            }

            Action::CapturedImageRecognized { request_id, boxes } => {
                if self.ocr.finish(request_id) {
                    self.captured_boxes = boxes;
                }
                Vec::new()
            }

            Action::CaptureFailed { request_id } => {
                if !self.ocr.finish(request_id) {
                    return Vec::new();
                }
                self.captured_size = None;
                self.captured_boxes.clear();
                Vec::new()
            }

            Action::Retake => {
                self.ocr.cancel();
                self.captured_size = None;
                self.captured_boxes.clear();
                self.highlight = None;
                Vec::new()
            }

            Action::BoxTapped { index, now } => {
                let Some(hit) = self.visible_boxes().get(index) else {
                    return Vec::new();
                };
                let text = hit.display_text(self.show_pinyin).to_string();
                self.highlight = Some((index, now + HIGHLIGHT_DURATION));
                self.toast_until = Some(now + TOAST_DURATION);
                vec![Effect::CopyToClipboard { text }, Effect::ShowCopiedToast]
            }

            Action::Tick { now } => {
                if self.highlight.is_some_and(|(_, until)| now >= until) {
                    self.highlight = None;
                }
                if self.toast_until.is_some_and(|until| now >= until) {
                    self.toast_until = None;
                    return vec![Effect::HideCopiedToast];
                }
                Vec::new()
            }
        }
    }
}
