//! Screen capture and still-image loading.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use xcap::Monitor;

use crate::error::{AppError, AppResult};

/// Capture the first monitor xcap reports.
pub fn capture_primary_monitor() -> AppResult<DynamicImage> {
    let started = Instant::now();
    let monitors = Monitor::all().map_err(|e| AppError::Capture(e.to_string()))?;
    let monitor = monitors
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Capture("no monitor found".into()))?;
    let frame = monitor
        .capture_image()
        .map_err(|e| AppError::Capture(e.to_string()))?;
    log::debug!(
        "captured {}x{} frame in {:?}",
        frame.width(),
        frame.height(),
        started.elapsed()
    );
    Ok(DynamicImage::ImageRgba8(frame))
}

pub fn load_image(path: &Path) -> AppResult<DynamicImage> {
    image::open(path).map_err(|e| AppError::Input(format!("{}: {e}", path.display())))
}
