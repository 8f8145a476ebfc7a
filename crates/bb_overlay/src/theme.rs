/// Normalized RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, alpha ignored.
    pub fn to_hex(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}

pub const BOX_BG_COLOR: Color = Color::WHITE.with_alpha(0.9);
/// Light steel blue.
pub const HIGHLIGHT_COLOR: Color = Color::rgba(176.0 / 255.0, 196.0 / 255.0, 222.0 / 255.0, 0.4);
pub const TEXT_COLOR: Color = Color::BLACK;

pub const CORNER_RADIUS: f32 = 12.0;
/// Inset of the text inside its box; boxes grow by twice this around the text.
pub const TEXT_PADDING: f32 = 6.0;

/// Font size relative to the scaled box height.
pub const FONT_SIZE_FACTOR: f32 = 0.5;
pub const MIN_TEXT_SCALE: f32 = 0.6;
pub const MAX_TEXT_SCALE: f32 = 1.0;

/// Line height in em.
pub const LINE_HEIGHT: f32 = 1.2;

pub const FONT_FAMILY: &str =
    "Noto Sans CJK SC, Source Han Sans SC, PingFang SC, Microsoft YaHei, sans-serif";
