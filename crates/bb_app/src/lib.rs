use std::time::Instant;

pub mod camera;
pub mod debounce;
pub mod geometry;
pub mod ocr;
pub mod text_mode;
pub mod throttle;

pub use camera::HanziBox;
pub use geometry::{RectF, RectI32, SizeF};

/// Which sub-model the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Camera,
    Text,
}

/// Top-level application actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchMode(Mode),
    Camera(camera::Action),
    Text(text_mode::Action),
    /// Clock tick, forwarded to every timed sub-model.
    Tick { now: Instant },
}

/// Top-level application effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ModeChanged(Mode),
    Camera(camera::Effect),
    Text(text_mode::Effect),
}

/// Core app model.
#[derive(Debug, Default)]
pub struct AppModel {
    mode: Mode,
    camera: camera::Model,
    text: text_mode::Model,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(camera: camera::Model, text: text_mode::Model) -> Self {
        Self {
            mode: Mode::default(),
            camera,
            text,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn camera(&self) -> &camera::Model {
        &self.camera
    }

    pub fn text(&self) -> &text_mode::Model {
        &self.text
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SwitchMode(mode) => {
                if self.mode == mode {
                    return Vec::new();
                }
                self.mode = mode;
                vec![Effect::ModeChanged(mode)]
            }

            Action::Camera(a) => self
                .camera
                .reduce(a)
                .into_iter()
                .map(Effect::Camera)
                .collect(),

            Action::Text(a) => self
                .text
                .reduce(a)
                .into_iter()
                .map(Effect::Text)
                .collect(),

            Action::Tick { now } => {
                let mut effects: Vec<Effect> = self
                    .camera
                    .reduce(camera::Action::Tick { now })
                    .into_iter()
                    .map(Effect::Camera)
                    .collect();
                effects.extend(
                    self.text
                        .reduce(text_mode::Action::Tick { now })
                        .into_iter()
                        .map(Effect::Text),
                );
                effects
            }
        }
    }
}
