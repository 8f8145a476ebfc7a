use std::sync::Arc;
use std::time::{Duration, Instant};

use bb_app::{Action, AppModel, HanziBox, camera, text_mode};
use bb_hanzi::PinyinConverter;
use bb_settings::Settings;
use image::DynamicImage;

use crate::clipboard::TextClipboard;
use crate::command_executor::{Command, CommandExecutor};
use crate::core_bridge;

/// Work the host must finish outside the synchronous command chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Translate { request_id: u64, text: String },
    RecognizeCapturedImage { request_id: u64 },
}

/// Things worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Copied(String),
    CopyFailed(String),
    OutputsCleared,
    PinyinToggled(bool),
}

/// Host application: the core model plus the services its effects need.
pub struct App {
    core: AppModel,
    converter: PinyinConverter,
    clipboard: Box<dyn TextClipboard>,
    translate: bool,
    captured_image: Option<Arc<DynamicImage>>,
    jobs: Vec<Job>,
    notices: Vec<Notice>,
}

impl App {
    pub fn new(settings: &Settings, clipboard: Box<dyn TextClipboard>) -> Self {
        let core = AppModel::with_parts(
            camera::Model::new(settings.show_pinyin),
            text_mode::Model::with_delay(Duration::from_millis(settings.debounce_ms)),
        );
        Self {
            core,
            converter: PinyinConverter::with_style(settings.tone_style),
            clipboard,
            translate: true,
            captured_image: None,
            jobs: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// With translation off, processed text gets an empty translation
    /// instead of a [`Job::Translate`].
    pub fn with_translation(mut self, enabled: bool) -> Self {
        self.translate = enabled;
        self
    }

    pub fn core(&self) -> &AppModel {
        &self.core
    }

    pub fn converter(&self) -> PinyinConverter {
        self.converter
    }

    pub fn captured_image(&self) -> Option<Arc<DynamicImage>> {
        self.captured_image.clone()
    }

    pub fn visible_boxes(&self) -> &[HanziBox] {
        self.core.camera().visible_boxes()
    }

    pub fn dispatch(&mut self, action: Action) {
        let commands = core_bridge::dispatch(&mut self.core, action);
        self.execute_command_chain(commands);
    }

    pub fn tick(&mut self, now: Instant) {
        self.dispatch(Action::Tick { now });
    }

    /// Show a still image and start recognizing it.
    pub fn capture_image(&mut self, img: DynamicImage) {
        if self.core.camera().ocr().is_running() {
            log::debug!("capture ignored while recognition is running");
            return;
        }
        let size = (img.width(), img.height());
        self.captured_image = Some(Arc::new(img));
        self.dispatch(Action::Camera(camera::Action::ImageCaptured { size }));
    }

    pub fn retake(&mut self) {
        self.captured_image = None;
        self.dispatch(Action::Camera(camera::Action::Retake));
    }

    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn copy(&mut self, text: String) {
        match self.clipboard.set_text(&text) {
            Ok(()) => self.notices.push(Notice::Copied(text)),
            Err(e) => {
                log::error!("{e}");
                self.notices.push(Notice::CopyFailed(e.to_string()));
            }
        }
    }
}

impl CommandExecutor for App {
    fn execute_command(&mut self, command: Command) -> Vec<Command> {
        match command {
            Command::None => Vec::new(),

            Command::ProcessText { request_id, text } => {
                let started = Instant::now();
                let pinyin = self.converter.convert(&text);
                log::debug!(
                    "pinyin for request {request_id} in {:?}",
                    started.elapsed()
                );

                let mut follow_up = vec![Command::Core(Action::Text(
                    text_mode::Action::PinyinReady { request_id, pinyin },
                ))];
                if self.translate {
                    self.jobs.push(Job::Translate { request_id, text });
                } else {
                    follow_up.push(Command::Core(Action::Text(
                        text_mode::Action::TranslationFinished {
                            request_id,
                            result: Ok(String::new()),
                        },
                    )));
                }
                follow_up
            }

            Command::ClearOutputs => {
                self.notices.push(Notice::OutputsCleared);
                Vec::new()
            }

            Command::CopyToClipboard(text) => {
                self.copy(text);
                Vec::new()
            }

            // Copies already produce a notice; the toast timing lives in the core.
            Command::ShowCopiedToast | Command::HideCopiedToast => Vec::new(),

            Command::RecognizeCapturedImage { request_id } => {
                if self.captured_image.is_some() {
                    self.jobs.push(Job::RecognizeCapturedImage { request_id });
                    Vec::new()
                } else {
                    log::warn!("recognition requested without a captured image");
                    vec![Command::Core(Action::Camera(camera::Action::CaptureFailed {
                        request_id,
                    }))]
                }
            }

            Command::PinyinToggled(show) => {
                self.notices.push(Notice::PinyinToggled(show));
                Vec::new()
            }

            Command::ModeChanged(mode) => {
                log::debug!("mode changed to {mode:?}");
                Vec::new()
            }

            Command::Core(action) => core_bridge::dispatch(&mut self.core, action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use bb_app::RectI32;
    use bb_app::text_mode::TextField;

    fn app(translate: bool) -> App {
        let settings = Settings::default();
        App::new(&settings, Box::new(MemoryClipboard::default())).with_translation(translate)
    }

    fn paste(app: &mut App, text: &str, now: Instant) {
        app.dispatch(Action::Text(text_mode::Action::Paste {
            text: text.into(),
            now,
        }));
    }

    #[test]
    fn processed_text_queues_translation() {
        let mut app = app(true);
        let t0 = Instant::now();
        paste(&mut app, "  我喜欢  ", t0);
        app.tick(t0 + Duration::from_millis(800));

        assert_eq!(app.core().text().pinyin(), "wǒ xǐ huān");
        assert!(app.core().text().is_translating());
        assert_eq!(
            app.take_jobs(),
            vec![Job::Translate {
                request_id: 1,
                text: "我喜欢".into()
            }]
        );

        app.dispatch(Action::Text(text_mode::Action::TranslationFinished {
            request_id: 1,
            result: Ok("I like".into()),
        }));
        assert_eq!(app.core().text().translation(), "I like");
    }

    #[test]
    fn translation_off_finishes_immediately() {
        let mut app = app(false);
        let t0 = Instant::now();
        paste(&mut app, "你好", t0);
        app.tick(t0 + Duration::from_secs(1));
        assert!(app.take_jobs().is_empty());
        assert!(!app.core().text().is_translating());
        assert_eq!(app.core().text().pinyin(), "nǐ hǎo");
    }

    #[test]
    fn copy_goes_to_clipboard() {
        let mut app = app(false);
        let t0 = Instant::now();
        paste(&mut app, "你好", t0);
        app.tick(t0 + Duration::from_secs(1));
        app.dispatch(Action::Text(text_mode::Action::Copy(TextField::Pinyin)));
        assert_eq!(app.take_notices(), vec![Notice::Copied("nǐ hǎo".into())]);
    }

    #[test]
    fn blank_input_clears() {
        let mut app = app(false);
        let t0 = Instant::now();
        paste(&mut app, "   ", t0);
        app.tick(t0 + Duration::from_secs(1));
        assert_eq!(app.take_notices(), vec![Notice::OutputsCleared]);
    }

    #[test]
    fn captured_image_queues_recognition_once() {
        let mut app = app(false);
        app.capture_image(DynamicImage::new_rgba8(20, 10));
        assert_eq!(app.take_jobs(), vec![Job::RecognizeCapturedImage { request_id: 1 }]);
        assert!(app.core().camera().ocr().is_running());

        // A second capture while OCR runs is ignored by the core.
        app.capture_image(DynamicImage::new_rgba8(20, 10));
        assert!(app.take_jobs().is_empty());

        let boxes = vec![HanziBox {
            hanzi: "你好".into(),
            pinyin: "nǐ hǎo".into(),
            rect: RectI32::from_xywh(1, 1, 10, 5),
        }];
        app.dispatch(Action::Camera(camera::Action::CapturedImageRecognized {
            request_id: 1,
            boxes: boxes.clone(),
        }));
        assert_eq!(app.visible_boxes(), boxes.as_slice());

        app.dispatch(Action::Camera(camera::Action::BoxTapped {
            index: 0,
            now: Instant::now(),
        }));
        assert_eq!(app.take_notices(), vec![Notice::Copied("nǐ hǎo".into())]);

        app.retake();
        assert!(app.visible_boxes().is_empty());
        assert!(app.captured_image().is_none());
    }
}
