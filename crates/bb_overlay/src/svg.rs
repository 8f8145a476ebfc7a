use std::fmt::Write as _;

use bb_app::SizeF;

use crate::layout::OverlayItem;
use crate::theme::{
    BOX_BG_COLOR, CORNER_RADIUS, FONT_FAMILY, HIGHLIGHT_COLOR, LINE_HEIGHT, TEXT_COLOR,
};

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Build a transparent SVG document of the overlay labels at `view` size.
///
/// `highlighted` is an index into `items`.
pub fn overlay_svg(items: &[OverlayItem], view: SizeF, highlighted: Option<usize>) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = view.width,
        h = view.height
    );

    let family = escape_xml(FONT_FAMILY);
    for (i, item) in items.iter().enumerate() {
        let r = &item.rect;
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rad}" ry="{rad}" fill="{fill}" fill-opacity="{a}"/>"#,
            x = r.left,
            y = r.top,
            w = r.width(),
            h = r.height(),
            rad = CORNER_RADIUS,
            fill = BOX_BG_COLOR.to_hex(),
            a = BOX_BG_COLOR.a,
        );
        if highlighted == Some(i) {
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rad}" ry="{rad}" fill="{fill}" fill-opacity="{a}"/>"#,
                x = r.left,
                y = r.top,
                w = r.width(),
                h = r.height(),
                rad = CORNER_RADIUS,
                fill = HIGHLIGHT_COLOR.to_hex(),
                a = HIGHLIGHT_COLOR.a,
            );
        }

        // Baseline of each line sits one em below its top.
        let mut baseline = item.text_y + item.font_size;
        for line in item.text.split('\n') {
            let _ = write!(
                svg,
                r#"<text x="{x}" y="{y}" font-size="{size}" font-family="{family}" fill="{color}">{text}</text>"#,
                x = item.text_x,
                y = baseline,
                size = item.font_size,
                color = TEXT_COLOR.to_hex(),
                text = escape_xml(line),
            );
            baseline += item.font_size * LINE_HEIGHT;
        }
    }

    svg.push_str("</svg>");
    svg
}
