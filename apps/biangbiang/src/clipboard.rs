use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Text clipboard the host copies into and `watch` polls.
pub trait TextClipboard {
    fn set_text(&mut self, text: &str) -> AppResult<()>;
    fn get_text(&mut self) -> AppResult<Option<String>>;
}

/// The system clipboard through `arboard`. Opened lazily so commands that
/// never touch the clipboard work without a display server.
///
/// On X11 and Wayland the copying process owns the clipboard contents; they
/// vanish when it exits unless a clipboard manager took a copy. A clipboard
/// built with [`SystemClipboard::with_hold`] keeps serving its contents for
/// up to that long after each copy (or until another program copies).
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hold(hold: Duration) -> Self {
        Self {
            inner: None,
            hold: Some(hold),
        }
    }

    /// Clipboard for a one-shot copy before exit. Zero seconds means no hold.
    pub fn for_copy(hold_secs: u64) -> Self {
        match hold_secs {
            0 => Self::new(),
            secs => Self::with_hold(Duration::from_secs(secs)),
        }
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }

    fn clipboard(&mut self) -> AppResult<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| AppError::Clipboard("clipboard not initialised".into()))
    }
}

impl TextClipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> AppResult<()> {
        let hold = self.hold;
        let clipboard = self.clipboard()?;
        #[cfg(target_os = "linux")]
        let result = match hold {
            Some(hold) => {
                use arboard::SetExtLinux;
                log::info!("Holding the clipboard for up to {hold:?}");
                clipboard
                    .set()
                    .wait_until(std::time::Instant::now() + hold)
                    .text(text)
            }
            None => clipboard.set_text(text),
        };
        #[cfg(not(target_os = "linux"))]
        let result = {
            let _ = hold;
            clipboard.set_text(text)
        };
        result.map_err(|e| AppError::Clipboard(e.to_string()))?;
        log::info!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }

    fn get_text(&mut self) -> AppResult<Option<String>> {
        match self.clipboard()?.get_text() {
            Ok(text) => Ok(Some(text)),
            // Images or an empty clipboard.
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(AppError::Clipboard(e.to_string())),
        }
    }
}

/// In-process clipboard for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub text: Option<String>,
}

impl TextClipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> AppResult<()> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> AppResult<Option<String>> {
        Ok(self.text.clone())
    }
}
