pub mod extract;
pub mod pinyin;
pub mod variant;

pub use extract::{contains_hanzi, extract, hanzi_runs, is_hanzi};
pub use pinyin::{PinyinConverter, ToneStyle};
pub use variant::{ChineseVariant, VariantConverter, VariantError, convert_variant};
