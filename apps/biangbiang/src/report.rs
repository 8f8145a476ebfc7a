//! Console output for the subcommands.

use bb_app::HanziBox;
use bb_hanzi::{ChineseVariant, VariantError};
use bb_overlay::OverlayItem;
use serde::Serialize;

use crate::app::App;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    pub input: String,
    pub hanzi: Option<String>,
    pub pinyin: String,
    /// `None` when translation was off.
    pub translation: Option<String>,
    pub language: String,
    /// The input in another character set, when asked for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<ConvertedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedText {
    pub variant: ChineseVariant,
    pub text: String,
}

impl TextReport {
    pub fn from_app(app: &App, translated: bool, language: &str) -> Self {
        let text = app.core().text();
        Self {
            input: text.input().trim().to_string(),
            hanzi: bb_hanzi::extract(text.input()),
            pinyin: text.pinyin().to_string(),
            translation: translated.then(|| text.translation().to_string()),
            language: language.to_string(),
            converted: None,
        }
    }

    /// Add the input converted to `variant`.
    pub fn with_conversion(mut self, variant: ChineseVariant) -> Result<Self, VariantError> {
        let text = bb_hanzi::convert_variant(&self.input, variant)?;
        self.converted = Some(ConvertedText { variant, text });
        Ok(self)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        section(&mut out, "Hanzi", self.hanzi.as_deref().unwrap_or("(no Hanzi found)"));
        if let Some(converted) = &self.converted {
            section(&mut out, converted.variant.display_name(), &converted.text);
        }
        section(&mut out, "Pinyin", &self.pinyin);
        if let Some(translation) = &self.translation {
            section(&mut out, &format!("Translation ({})", self.language), translation);
        }
        out
    }
}

fn section(out: &mut String, title: &str, body: &str) {
    out.push_str(title);
    out.push('\n');
    for line in body.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxReport {
    pub hanzi: String,
    pub pinyin: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&HanziBox> for BoxReport {
    fn from(b: &HanziBox) -> Self {
        Self {
            hanzi: b.hanzi.clone(),
            pinyin: b.pinyin.clone(),
            left: b.rect.left,
            top: b.rect.top,
            width: b.rect.width(),
            height: b.rect.height(),
        }
    }
}

pub fn box_reports(boxes: &[HanziBox]) -> Vec<BoxReport> {
    boxes.iter().map(BoxReport::from).collect()
}

pub fn render_boxes(boxes: &[HanziBox], show_pinyin: bool) -> String {
    if boxes.is_empty() {
        return "(no Hanzi found)\n".to_string();
    }
    boxes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            format!(
                "{i:>3}  [{},{} {}x{}]  {}\n",
                b.rect.left,
                b.rect.top,
                b.rect.width(),
                b.rect.height(),
                b.display_text(show_pinyin)
            )
        })
        .collect()
}

pub fn render_layout(items: &[OverlayItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "  #{} at ({:.1},{:.1}) {:.1}x{:.1} font {:.1}px  {}\n",
                item.index,
                item.rect.left,
                item.rect.top,
                item.rect.width(),
                item.rect.height(),
                item.font_size,
                item.text
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_app::RectI32;

    #[test]
    fn text_sections() {
        let report = TextReport {
            input: "你好".into(),
            hanzi: Some("你好".into()),
            pinyin: "nǐ hǎo".into(),
            translation: Some("Ciao".into()),
            language: "it".into(),
            converted: None,
        };
        assert_eq!(
            report.render(),
            "Hanzi\n  你好\nPinyin\n  nǐ hǎo\nTranslation (it)\n  Ciao\n"
        );

        let report = TextReport {
            hanzi: None,
            translation: None,
            ..report
        };
        assert!(report.render().contains("(no Hanzi found)"));
        assert!(!report.render().contains("Translation"));
    }

    #[test]
    fn converted_section_follows_hanzi() {
        let report = TextReport {
            input: "我爱你".into(),
            hanzi: Some("我爱你".into()),
            pinyin: "wǒ ài nǐ".into(),
            translation: None,
            language: "en".into(),
            converted: None,
        }
        .with_conversion(ChineseVariant::Traditional)
        .unwrap();
        assert_eq!(
            report.render(),
            "Hanzi\n  我爱你\nTraditional Chinese\n  我愛你\nPinyin\n  wǒ ài nǐ\n"
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["converted"]["variant"], "traditional");
        assert_eq!(json["converted"]["text"], "我愛你");
    }

    #[test]
    fn box_lines() {
        let boxes = vec![HanziBox {
            hanzi: "出口".into(),
            pinyin: "chū kǒu".into(),
            rect: RectI32::from_xywh(10, 20, 30, 40),
        }];
        assert_eq!(render_boxes(&boxes, true), "  0  [10,20 30x40]  chū kǒu\n");
        assert_eq!(render_boxes(&boxes, false), "  0  [10,20 30x40]  出口\n");
        assert_eq!(box_reports(&boxes)[0].width, 30);
        assert_eq!(render_boxes(&[], true), "(no Hanzi found)\n");
    }
}
