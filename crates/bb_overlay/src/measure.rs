use bb_app::SizeF;

use crate::theme::LINE_HEIGHT;

pub trait TextMeasure {
    /// Size of `text` laid out at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f32) -> SizeF;
}

/// Advance-width estimate: wide (CJK, full-width, emoji) glyphs are 1 em,
/// everything else 0.6 em.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMeasure;

fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FE30}'..='\u{FE4F}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{1F300}'..='\u{1FAFF}'
        | '\u{20000}'..='\u{3FFFD}')
}

impl TextMeasure for EstimatedMeasure {
    fn measure(&self, text: &str, font_size: f32) -> SizeF {
        if text.is_empty() {
            return SizeF::default();
        }
        let mut width: f32 = 0.0;
        let mut lines = 0;
        for line in text.split('\n') {
            lines += 1;
            let ems: f32 = line
                .chars()
                .map(|c| if is_wide(c) { 1.0 } else { 0.6 })
                .sum();
            width = width.max(ems * font_size);
        }
        SizeF::new(width, lines as f32 * LINE_HEIGHT * font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_and_narrow_advances() {
        let m = EstimatedMeasure;
        let s = m.measure("你好", 10.0);
        assert!((s.width - 20.0).abs() < 1e-4);
        assert!((s.height - 12.0).abs() < 1e-4);

        let s = m.measure("ni hao", 10.0);
        assert!((s.width - 36.0).abs() < 1e-4);
    }

    #[test]
    fn multiline_uses_widest_line() {
        let s = EstimatedMeasure.measure("ab\n你好吗", 10.0);
        assert!((s.width - 30.0).abs() < 1e-4);
        assert!((s.height - 24.0).abs() < 1e-4);
        assert_eq!(EstimatedMeasure.measure("", 10.0), SizeF::default());
    }
}
