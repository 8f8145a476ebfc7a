pub mod hit_test;
pub mod layout;
pub mod measure;
pub mod render;
pub mod svg;
pub mod theme;

pub use hit_test::hit_test;
pub use layout::{LayoutParams, OverlayItem, layout_overlay, normalized_to_pixels};
pub use measure::{EstimatedMeasure, TextMeasure};
pub use render::{OverlayError, render_overlay, save_png};
pub use svg::overlay_svg;
