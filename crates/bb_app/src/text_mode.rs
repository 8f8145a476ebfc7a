//! Text mode: pasted or typed Chinese converted to Pinyin and translated.
//!
//! Processing is debounced so that a burst of edits triggers a single
//! conversion. Each processing request carries an id; results for an older id
//! are discarded.

use std::time::{Duration, Instant};

use crate::debounce::Debouncer;

/// Quiet period after the last edit before the input is processed.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(800);

/// Prefix shown in place of a translation when the translator failed.
pub const TRANSLATION_FAILED_PREFIX: &str = "❌ Translation failed: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Input,
    Pinyin,
    Translation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The input text was edited.
    InputChanged { text: String, now: Instant },
    /// The input text was replaced from the clipboard.
    Paste { text: String, now: Instant },
    /// Clock tick; fires the debounced processing.
    Tick { now: Instant },
    /// Pinyin conversion finished for a request.
    PinyinReady { request_id: u64, pinyin: String },
    /// Translation finished for a request (`Err` carries a display message).
    TranslationFinished {
        request_id: u64,
        result: Result<String, String>,
    },
    /// Copy one of the fields to the clipboard.
    Copy(TextField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Convert `text` to Pinyin and translate it.
    ProcessText { request_id: u64, text: String },
    /// The input became blank; Pinyin and translation were cleared.
    ClearOutputs,
    CopyToClipboard { text: String },
}

#[derive(Debug)]
pub struct Model {
    input: String,
    pinyin: String,
    translation: String,
    debounce: Debouncer,
    request_id: u64,
    translating: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            input: String::new(),
            pinyin: String::new(),
            translation: String::new(),
            debounce: Debouncer::new(delay),
            request_id: 0,
            translating: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pinyin(&self) -> &str {
        &self.pinyin
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn is_translating(&self) -> bool {
        self.translating
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn field(&self, field: TextField) -> &str {
        match field {
            TextField::Input => &self.input,
            TextField::Pinyin => &self.pinyin,
            TextField::Translation => &self.translation,
        }
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::InputChanged { text, now } | Action::Paste { text, now } => {
                self.input = text;
                self.debounce.poke(now);
                Vec::new()
            }

            Action::Tick { now } => {
                if !self.debounce.take_due(now) {
                    return Vec::new();
                }

                let trimmed = self.input.trim();
                if trimmed.is_empty() {
                    // Invalidate any in-flight request as well.
                    self.request_id += 1;
                    self.translating = false;
                    self.pinyin.clear();
                    self.translation.clear();
                    return vec![Effect::ClearOutputs];
                }

                self.request_id += 1;
                self.translating = true;
                vec![Effect::ProcessText {
                    request_id: self.request_id,
                    text: trimmed.to_string(),
                }]
            }

            Action::PinyinReady { request_id, pinyin } => {
                if request_id == self.request_id {
                    self.pinyin = pinyin;
                }
                Vec::new()
            }

            Action::TranslationFinished { request_id, result } => {
                if request_id != self.request_id {
                    return Vec::new();
                }
                self.translating = false;
                self.translation = match result {
                    Ok(text) => text,
                    Err(message) => format!("{TRANSLATION_FAILED_PREFIX}{message}"),
                };
                Vec::new()
            }

            Action::Copy(field) => {
                let text = self.field(field);
                if text.is_empty() {
                    return Vec::new();
                }
                vec![Effect::CopyToClipboard {
                    text: text.to_string(),
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn processing_waits_for_debounce() {
        let t0 = Instant::now();
        let mut m = Model::new();

        let eff = m.reduce(Action::InputChanged {
            text: "你好".to_string(),
            now: t0,
        });
        assert!(eff.is_empty());
        assert!(m.reduce(Action::Tick { now: t0 + ms(500) }).is_empty());

        let eff = m.reduce(Action::Tick { now: t0 + ms(800) });
        assert_eq!(
            eff,
            vec![Effect::ProcessText {
                request_id: 1,
                text: "你好".to_string(),
            }]
        );
        assert!(m.is_translating());
    }

    #[test]
    fn burst_of_edits_processes_latest_text_once() {
        let t0 = Instant::now();
        let mut m = Model::new();
        m.reduce(Action::InputChanged {
            text: "你".to_string(),
            now: t0,
        });
        m.reduce(Action::InputChanged {
            text: "你好".to_string(),
            now: t0 + ms(600),
        });

        assert!(m.reduce(Action::Tick { now: t0 + ms(900) }).is_empty());
        let eff = m.reduce(Action::Tick { now: t0 + ms(1400) });
        assert_eq!(eff.len(), 1);
        assert!(matches!(&eff[0], Effect::ProcessText { text, .. } if text == "你好"));
        assert!(m.reduce(Action::Tick { now: t0 + ms(3000) }).is_empty());
    }

    #[test]
    fn blank_input_clears_outputs_without_processing() {
        let t0 = Instant::now();
        let mut m = Model::new();
        m.reduce(Action::Paste {
            text: "爱".to_string(),
            now: t0,
        });
        m.reduce(Action::Tick { now: t0 + ms(800) });
        m.reduce(Action::PinyinReady {
            request_id: 1,
            pinyin: "ài".to_string(),
        });
        m.reduce(Action::TranslationFinished {
            request_id: 1,
            result: Ok("Love".to_string()),
        });
        assert_eq!(m.translation(), "Love");

        m.reduce(Action::InputChanged {
            text: "  \n ".to_string(),
            now: t0 + ms(1000),
        });
        let eff = m.reduce(Action::Tick { now: t0 + ms(1800) });
        assert_eq!(eff, vec![Effect::ClearOutputs]);
        assert!(m.pinyin().is_empty());
        assert!(m.translation().is_empty());
    }

    #[test]
    fn stale_results_are_ignored() {
        let t0 = Instant::now();
        let mut m = Model::new();
        m.reduce(Action::InputChanged {
            text: "你".to_string(),
            now: t0,
        });
        m.reduce(Action::Tick { now: t0 + ms(800) });
        m.reduce(Action::InputChanged {
            text: "你好".to_string(),
            now: t0 + ms(900),
        });
        m.reduce(Action::Tick { now: t0 + ms(1700) });

        m.reduce(Action::TranslationFinished {
            request_id: 1,
            result: Ok("You".to_string()),
        });
        assert!(m.translation().is_empty());
        assert!(m.is_translating());

        m.reduce(Action::TranslationFinished {
            request_id: 2,
            result: Ok("Hello".to_string()),
        });
        assert_eq!(m.translation(), "Hello");
        assert!(!m.is_translating());
    }

    #[test]
    fn translation_error_is_rendered_with_prefix() {
        let t0 = Instant::now();
        let mut m = Model::new();
        m.reduce(Action::InputChanged {
            text: "爱".to_string(),
            now: t0,
        });
        m.reduce(Action::Tick { now: t0 + ms(800) });
        m.reduce(Action::TranslationFinished {
            request_id: 1,
            result: Err("offline".to_string()),
        });
        assert_eq!(m.translation(), "❌ Translation failed: offline");
    }

    #[test]
    fn copy_skips_empty_fields() {
        let mut m = Model::new();
        assert!(m.reduce(Action::Copy(TextField::Pinyin)).is_empty());

        let t0 = Instant::now();
        m.reduce(Action::InputChanged {
            text: "你好".to_string(),
            now: t0,
        });
        assert_eq!(
            m.reduce(Action::Copy(TextField::Input)),
            vec![Effect::CopyToClipboard {
                text: "你好".to_string()
            }]
        );
    }
}
