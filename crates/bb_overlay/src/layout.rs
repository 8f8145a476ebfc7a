//! Maps Hanzi boxes from image pixels into view coordinates.

use bb_app::{HanziBox, RectF, RectI32, SizeF};

use crate::measure::TextMeasure;
use crate::theme::{FONT_SIZE_FACTOR, MAX_TEXT_SCALE, MIN_TEXT_SCALE, TEXT_PADDING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Source image (frame) size in pixels.
    pub image_size: SizeF,
    pub view_size: SizeF,
    /// Live frames are letterboxed differently from captured stills.
    pub is_live: bool,
    pub show_pinyin: bool,
}

/// One positioned label, in view coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayItem {
    /// Index into the boxes passed to [`layout_overlay`].
    pub index: usize,
    pub rect: RectF,
    pub text: String,
    pub font_size: f32,
    pub text_x: f32,
    pub text_y: f32,
}

fn text_scale(hanzi: &str, pinyin: &str, show_pinyin: bool) -> f32 {
    if !show_pinyin {
        return MAX_TEXT_SCALE;
    }
    let pinyin_chars = pinyin.chars().count();
    if pinyin_chars == 0 {
        return MAX_TEXT_SCALE;
    }
    let ratio = hanzi.chars().count() as f32 / pinyin_chars as f32;
    ratio.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE)
}

/// `(h_off, v_off)` applied to live frames.
fn live_offsets(image: SizeF, view: SizeF) -> (f32, f32) {
    let image_aspect = image.aspect();
    if image_aspect > view.aspect() {
        let scaled_h = view.width / image_aspect;
        (0.0, (view.height - scaled_h) / 4.0)
    } else {
        let scaled_w = view.height * image_aspect;
        ((view.width - scaled_w) / 2.0, 0.0)
    }
}

pub fn layout_overlay(
    boxes: &[HanziBox],
    params: &LayoutParams,
    measure: &dyn TextMeasure,
) -> Vec<OverlayItem> {
    let LayoutParams {
        image_size,
        view_size,
        is_live,
        show_pinyin,
    } = *params;
    if image_size.is_empty() || view_size.is_empty() {
        return Vec::new();
    }

    let scale_x = view_size.width / image_size.width;
    let scale_y = view_size.height / image_size.height;
    let image_aspect = image_size.aspect();
    let (h_off, v_off) = if is_live {
        live_offsets(image_size, view_size)
    } else {
        (0.0, 0.0)
    };

    boxes
        .iter()
        .enumerate()
        .map(|(index, b)| {
            let text = b.display_text(show_pinyin).to_string();
            let scale = text_scale(&b.hanzi, &b.pinyin, show_pinyin);

            let (x, y) = (b.rect.left as f32, b.rect.top as f32);
            let (w, h) = (b.rect.width() as f32, b.rect.height() as f32);

            let box_h = if is_live {
                h * scale_y / image_aspect
            } else {
                h * scale_y
            };
            let font_size = box_h * FONT_SIZE_FACTOR * scale;
            let measured = measure.measure(&text, font_size);

            let width = (w * scale_x).max(measured.width + TEXT_PADDING * 2.0);
            let height = (h * scale_y).max(measured.height + TEXT_PADDING * 2.0);
            let left = x * scale_x + h_off;
            let top = y * scale_y - v_off;

            OverlayItem {
                index,
                rect: RectF::from_xywh(left, top, width, height),
                text,
                font_size,
                text_x: left + TEXT_PADDING,
                text_y: top + TEXT_PADDING,
            }
        })
        .collect()
}

/// Convert a 0..1 rectangle to image pixels. With `flip_y` the input has a
/// bottom-left origin.
pub fn normalized_to_pixels(rect: RectF, image_size: SizeF, flip_y: bool) -> RectI32 {
    let x = rect.left * image_size.width;
    let w = rect.width() * image_size.width;
    let h = rect.height() * image_size.height;
    let y = if flip_y {
        (1.0 - rect.bottom) * image_size.height
    } else {
        rect.top * image_size.height
    };
    RectI32::from_xywh(x.round() as i32, y.round() as i32, w.round() as i32, h.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::EstimatedMeasure;

    fn hello_box() -> HanziBox {
        HanziBox {
            hanzi: "你好".into(),
            pinyin: "nǐ hǎo".into(),
            rect: RectI32::from_xywh(100, 50, 200, 40),
        }
    }

    fn params(image: (f32, f32), view: (f32, f32), is_live: bool, show_pinyin: bool) -> LayoutParams {
        LayoutParams {
            image_size: SizeF::new(image.0, image.1),
            view_size: SizeF::new(view.0, view.1),
            is_live,
            show_pinyin,
        }
    }

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    #[test]
    fn captured_image_scales_without_offsets() {
        let items = layout_overlay(
            &[hello_box()],
            &params((1000.0, 500.0), (500.0, 500.0), false, true),
            &EstimatedMeasure,
        );
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.text, "nǐ hǎo");
        // 2 hanzi / 6 pinyin chars clamps to 0.6; 40px * 0.5 * 0.6
        approx(item.font_size, 12.0);
        approx(item.rect.left, 50.0);
        approx(item.rect.top, 50.0);
        approx(item.rect.width(), 100.0);
        approx(item.rect.height(), 40.0);
        approx(item.text_x, 56.0);
        approx(item.text_y, 56.0);
    }

    #[test]
    fn box_grows_to_fit_text() {
        let mut b = hello_box();
        b.rect = RectI32::from_xywh(0, 0, 10, 40);
        let items = layout_overlay(
            &[b],
            &params((100.0, 100.0), (100.0, 100.0), false, false),
            &EstimatedMeasure,
        );
        // Hanzi at 20px: 40px wide + 12 padding, 24px tall + 12 padding.
        approx(items[0].font_size, 20.0);
        approx(items[0].rect.width(), 52.0);
        approx(items[0].rect.height(), 40.0);
        assert_eq!(items[0].text, "你好");
    }

    #[test]
    fn live_wide_frame_shifts_up() {
        let items = layout_overlay(
            &[hello_box()],
            &params((1000.0, 500.0), (500.0, 500.0), true, true),
            &EstimatedMeasure,
        );
        // scaled_h = 250, v_off = 62.5; box_h = 40 / 2
        approx(items[0].rect.top, 50.0 - 62.5);
        approx(items[0].rect.left, 50.0);
        approx(items[0].font_size, 6.0);
    }

    #[test]
    fn live_tall_frame_shifts_right() {
        let items = layout_overlay(
            &[hello_box()],
            &params((500.0, 1000.0), (500.0, 500.0), true, false),
            &EstimatedMeasure,
        );
        // scaled_w = 250, h_off = 125
        approx(items[0].rect.left, 100.0 + 125.0);
        approx(items[0].rect.top, 25.0);
    }

    #[test]
    fn degenerate_sizes_give_nothing() {
        let p = params((0.0, 500.0), (500.0, 500.0), false, true);
        assert!(layout_overlay(&[hello_box()], &p, &EstimatedMeasure).is_empty());
        let p = params((500.0, 500.0), (500.0, 0.0), true, true);
        assert!(layout_overlay(&[hello_box()], &p, &EstimatedMeasure).is_empty());
    }

    #[test]
    fn normalized_rects() {
        let size = SizeF::new(200.0, 100.0);
        let r = RectF::from_xywh(0.25, 0.1, 0.5, 0.2);
        assert_eq!(normalized_to_pixels(r, size, false), RectI32::from_xywh(50, 10, 100, 20));
        // bottom = 0.3 -> top edge at 70px from the top
        assert_eq!(normalized_to_pixels(r, size, true), RectI32::from_xywh(50, 70, 100, 20));
    }
}
