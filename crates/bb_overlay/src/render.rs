//! Rasterises the overlay over a photo.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use anyhow::Context;
use bb_app::SizeF;
use image::{DynamicImage, RgbaImage};
use thiserror::Error;
use tiny_skia::{ColorU8, Pixmap};
use usvg::{Options, Tree, fontdb};

use crate::layout::OverlayItem;
use crate::svg::overlay_svg;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("cannot render onto an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
    #[error("invalid overlay SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to build output image buffer")]
    Buffer,
}

// Loading system fonts is slow; do it once per process.
static FONT_DB: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("loaded {} font faces", db.len());
    Arc::new(db)
});

/// Compose `items` over `image`. Item coordinates are in image pixels.
pub fn render_overlay(
    image: &DynamicImage,
    items: &[OverlayItem],
    highlighted: Option<usize>,
) -> Result<RgbaImage, OverlayError> {
    let (width, height) = (image.width(), image.height());
    let mut pixmap = Pixmap::new(width, height).ok_or(OverlayError::EmptyImage { width, height })?;

    // tiny-skia stores premultiplied RGBA.
    let photo = image.to_rgba8();
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(photo.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let svg = overlay_svg(items, SizeF::from((width, height)), highlighted);
    let options = Options {
        fontdb: Arc::clone(&FONT_DB),
        ..Options::default()
    };
    let tree = Tree::from_str(&svg, &options)?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, data).ok_or(OverlayError::Buffer)
}

pub fn save_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}
