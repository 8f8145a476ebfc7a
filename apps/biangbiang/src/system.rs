//! OCR engine lifecycle for the host.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use bb_hanzi::PinyinConverter;
use bb_ocr::{HanziFrame, OcrConfig, OcrEngine, OcrResult};
use bb_settings::Settings;
use image::DynamicImage;
use parking_lot::Mutex;

use crate::error::{AppError, AppResult};

/// Owns the OCR engine. The engine loads on a background thread; callers
/// that need it before then block until loading finishes.
#[derive(Clone)]
pub struct OcrManager {
    config: OcrConfig,
    engine: Arc<Mutex<Option<OcrEngine>>>,
}

impl OcrManager {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            config,
            engine: Arc::new(Mutex::new(None)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let models_dir = if settings.ocr_models_dir.trim().is_empty() {
            PathBuf::from(bb_ocr::DEFAULT_MODELS_DIR)
        } else {
            PathBuf::from(&settings.ocr_models_dir)
        };
        Self::new(OcrConfig::new(models_dir, settings.ocr_language.clone()))
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Load the engine on a background thread.
    pub fn start_async(&self) -> std::thread::JoinHandle<bool> {
        let manager = self.clone();
        std::thread::spawn(move || manager.start_sync().is_ok())
    }

    /// Load the engine unless already loaded.
    pub fn start_sync(&self) -> AppResult<()> {
        let mut engine_guard = self.engine.lock();
        if engine_guard.is_some() {
            return Ok(());
        }

        if !bb_ocr::models_exist(&self.config) {
            let available: Vec<String> = bb_ocr::get_available_languages(&self.config.models_dir)
                .into_iter()
                .map(|lang| lang.id)
                .collect();
            return Err(AppError::OcrUnavailable(format!(
                "no '{}' models in {} (available: {})",
                self.config.language,
                self.config.models_dir.display(),
                if available.is_empty() { "none".to_string() } else { available.join(", ") }
            )));
        }

        log::info!("Starting OCR engine from {}", self.config.models_dir.display());
        let started = Instant::now();
        match bb_ocr::create_engine(&self.config) {
            Ok(engine) => {
                *engine_guard = Some(engine);
                log::info!("OCR engine started in {:?}", started.elapsed());
                Ok(())
            }
            Err(e) => {
                log::error!("OCR engine failed to start: {e:#}");
                Err(AppError::OcrUnavailable(format!("{e:#}")))
            }
        }
    }

    pub fn stop(&self) {
        if let Some(engine) = self.engine.lock().take() {
            drop(engine);
            log::debug!("OCR engine stopped");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.engine.try_lock().is_some_and(|guard| guard.is_some())
    }

    fn with_engine<T>(&self, f: impl FnOnce(&OcrEngine) -> anyhow::Result<T>) -> AppResult<T> {
        self.start_sync()?;
        let guard = self.engine.lock();
        let engine = guard
            .as_ref()
            .ok_or_else(|| AppError::OcrUnavailable("engine stopped".into()))?;
        f(engine).map_err(|e| AppError::Ocr(format!("{e:#}")))
    }

    pub fn recognize_hanzi(
        &self,
        img: &DynamicImage,
        converter: &PinyinConverter,
    ) -> AppResult<HanziFrame> {
        self.with_engine(|engine| bb_ocr::recognize_hanzi(engine, img, converter))
    }

    pub fn recognize_lines(&self, img: &DynamicImage) -> AppResult<Vec<OcrResult>> {
        self.with_engine(|engine| bb_ocr::recognize_text_by_lines(engine, img))
    }

    /// [`OcrManager::recognize_hanzi`] on the blocking pool.
    pub async fn recognize_hanzi_blocking(
        &self,
        img: Arc<DynamicImage>,
        converter: PinyinConverter,
    ) -> AppResult<HanziFrame> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.recognize_hanzi(&img, &converter))
            .await
            .map_err(|e| AppError::Ocr(format!("OCR task failed: {e}")))?
    }

    /// [`OcrManager::recognize_lines`] on the blocking pool.
    pub async fn recognize_lines_blocking(
        &self,
        img: Arc<DynamicImage>,
    ) -> AppResult<Vec<OcrResult>> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.recognize_lines(&img))
            .await
            .map_err(|e| AppError::Ocr(format!("OCR task failed: {e}")))?
    }

    /// Capture the screen and recognize it on the blocking pool.
    pub async fn recognize_screen(&self, converter: PinyinConverter) -> AppResult<HanziFrame> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || {
            let img = crate::capture::capture_primary_monitor()?;
            manager.recognize_hanzi(&img, &converter)
        })
        .await
        .map_err(|e| AppError::Ocr(format!("OCR task failed: {e}")))?
    }
}
