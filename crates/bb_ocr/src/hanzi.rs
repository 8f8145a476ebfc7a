//! Hanzi boxes from OCR elements.

use anyhow::Result;
use bb_app::HanziBox;
use bb_hanzi::PinyinConverter;
use image::DynamicImage;
use ocr_rs::OcrEngine;

use crate::engine::recognize_image;
use crate::types::OcrResult;

/// Boxes recognized in one frame, with the frame's pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HanziFrame {
    pub boxes: Vec<HanziBox>,
    pub frame_size: (u32, u32),
}

/// Keep elements containing Hanzi, paired with the Pinyin of their Hanzi.
pub fn to_hanzi_boxes(results: &[OcrResult], converter: &PinyinConverter) -> Vec<HanziBox> {
    results
        .iter()
        .filter_map(|r| {
            let hanzi = bb_hanzi::extract(&r.text)?;
            let pinyin = converter.convert(&hanzi);
            Some(HanziBox {
                hanzi,
                pinyin,
                rect: r.bounding_box.to_rect(),
            })
        })
        .collect()
}

pub fn recognize_hanzi(
    engine: &OcrEngine,
    img: &DynamicImage,
    converter: &PinyinConverter,
) -> Result<HanziFrame> {
    let results = recognize_image(engine, img)?;
    Ok(HanziFrame {
        boxes: to_hanzi_boxes(&results, converter),
        frame_size: (img.width(), img.height()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;
    use bb_app::RectI32;

    fn result(text: &str, x: i32, y: i32) -> OcrResult {
        OcrResult {
            text: text.to_string(),
            confidence: 0.8,
            bounding_box: BoundingBox::new(x, y, 100, 40),
        }
    }

    #[test]
    fn elements_without_hanzi_are_skipped() {
        let results = vec![
            result("Menu", 0, 0),
            result("你好Pizza", 10, 50),
            result("123", 0, 100),
            result("我爱你！", 10, 150),
        ];
        let boxes = to_hanzi_boxes(&results, &PinyinConverter::new());
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].hanzi, "你好");
        assert_eq!(boxes[0].pinyin, "nǐ hǎo");
        assert_eq!(boxes[0].rect, RectI32::from_xywh(10, 50, 100, 40));
        assert_eq!(boxes[1].hanzi, "我爱你");
        assert_eq!(boxes[1].pinyin, "wǒ ài nǐ");
    }
}
