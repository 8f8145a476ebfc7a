use std::path::PathBuf;

use bb_hanzi::{ChineseVariant, ToneStyle};

use crate::settings::{TranslatorProvider, TranslatorSettings};

/// Overrides the settings directory when set.
pub const CONFIG_DIR_ENV: &str = "BIANGBIANG_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".biangbiang";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub fn default_chinese_variant() -> ChineseVariant {
    ChineseVariant::Simplified
}

pub fn default_tone_style() -> ToneStyle {
    ToneStyle::Marks
}

pub fn default_show_pinyin() -> bool {
    true
}

/// Language part of a POSIX locale or BCP-47 tag: `it_IT.UTF-8` and `it-IT`
/// both give `it`. `C`/`POSIX` and empty values give `None`.
pub fn language_from_locale(locale: &str) -> Option<String> {
    let lang = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match lang.as_str() {
        "" | "c" | "posix" => None,
        _ if lang.chars().all(|c| c.is_ascii_alphabetic()) => Some(lang),
        _ => None,
    }
}

// Translation target: the language part of the user's locale.
pub fn default_translation_language() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| language_from_locale(&value))
        .unwrap_or_else(|| "en".to_string())
}

// OCR defaults
pub fn default_ocr_models_dir() -> String {
    "models".to_string()
}

pub fn default_ocr_language() -> String {
    "chinese".to_string()
}

// Timing defaults
pub fn default_live_interval_ms() -> u64 {
    1000
}

pub fn default_debounce_ms() -> u64 {
    800
}

// Translator defaults
pub fn default_translator() -> TranslatorSettings {
    TranslatorSettings::default()
}

pub fn default_translator_provider() -> TranslatorProvider {
    TranslatorProvider::None
}

pub fn default_translator_timeout_secs() -> u64 {
    30
}

/// Base directory holding the settings folder.
pub fn default_config_path() -> String {
    if let Ok(home_dir) = std::env::var("HOME") {
        return home_dir;
    }
    if let Ok(home_dir) = std::env::var("USERPROFILE") {
        return home_dir;
    }

    // Fallback: program directory.
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_string_lossy().to_string();
    }

    // Last resort: cwd.
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}

pub fn settings_dir() -> PathBuf {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(default_config_path()).join(CONFIG_DIR_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_language() {
        assert_eq!(language_from_locale("it_IT.UTF-8").as_deref(), Some("it"));
        assert_eq!(language_from_locale("it-IT").as_deref(), Some("it"));
        assert_eq!(language_from_locale("DE").as_deref(), Some("de"));
        assert_eq!(language_from_locale("sr_RS@latin").as_deref(), Some("sr"));
        assert_eq!(language_from_locale("C.UTF-8"), None);
        assert_eq!(language_from_locale("POSIX"), None);
        assert_eq!(language_from_locale(""), None);
    }

    #[test]
    fn default_language_is_not_empty() {
        assert!(!default_translation_language().is_empty());
    }
}
