use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use bb_hanzi::{ChineseVariant, ToneStyle};

use crate::defaults::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorProvider {
    /// Translation disabled.
    #[default]
    None,
    /// OpenAI-compatible chat completions endpoint.
    #[serde(alias = "open_ai")]
    OpenAi,
    #[serde(alias = "libre")]
    LibreTranslate,
}

impl TranslatorProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslatorProvider::None => "none",
            TranslatorProvider::OpenAi => "openai",
            TranslatorProvider::LibreTranslate => "libretranslate",
        }
    }

    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            TranslatorProvider::None => None,
            TranslatorProvider::OpenAi => Some("https://api.openai.com/v1"),
            TranslatorProvider::LibreTranslate => Some("https://libretranslate.com"),
        }
    }

    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            TranslatorProvider::None => None,
            TranslatorProvider::OpenAi => Some("OPENAI_API_KEY"),
            TranslatorProvider::LibreTranslate => Some("LIBRETRANSLATE_API_KEY"),
        }
    }
}

impl fmt::Display for TranslatorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslatorProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "" => Ok(TranslatorProvider::None),
            "openai" | "open_ai" => Ok(TranslatorProvider::OpenAi),
            "libretranslate" | "libre" => Ok(TranslatorProvider::LibreTranslate),
            other => Err(anyhow!(
                "unknown translator provider '{other}' (expected none, openai or libretranslate)"
            )),
        }
    }
}

/// Translation backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorSettings {
    #[serde(default = "default_translator_provider")]
    pub provider: TranslatorProvider,
    /// Provider default when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Name of the environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_translator_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            provider: default_translator_provider(),
            base_url: None,
            model: None,
            api_key_env: None,
            timeout_secs: default_translator_timeout_secs(),
        }
    }
}

impl TranslatorSettings {
    pub fn effective_base_url(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or(self.provider.default_base_url())
            .map(|url| url.trim_end_matches('/').to_string())
    }

    pub fn effective_api_key_env(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.provider.default_api_key_env())
            .map(str::to_string)
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Source character set for translation.
    #[serde(
        default = "default_chinese_variant",
        deserialize_with = "lossy_variant",
        alias = "chinese",
        alias = "chinese_type"
    )]
    pub chinese_variant: ChineseVariant,

    #[serde(default = "default_translation_language", alias = "user_language")]
    pub translation_language: String,

    #[serde(default = "default_tone_style")]
    pub tone_style: ToneStyle,

    #[serde(default = "default_show_pinyin")]
    pub show_pinyin: bool,

    // OCR
    #[serde(default = "default_ocr_models_dir")]
    pub ocr_models_dir: String,
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    #[serde(default = "default_translator")]
    pub translator: TranslatorSettings,

    // Timing
    #[serde(default = "default_live_interval_ms")]
    pub live_interval_ms: u64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chinese_variant: default_chinese_variant(),
            translation_language: default_translation_language(),
            tone_style: default_tone_style(),
            show_pinyin: default_show_pinyin(),

            ocr_models_dir: default_ocr_models_dir(),
            ocr_language: default_ocr_language(),

            translator: default_translator(),

            live_interval_ms: default_live_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn lossy_variant<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ChineseVariant, D::Error> {
    let stored = String::deserialize(deserializer)?;
    Ok(ChineseVariant::from_stored_lossy(&stored))
}

/// Keys accepted by [`Settings::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "chinese_variant",
    "translation_language",
    "tone_style",
    "show_pinyin",
    "ocr_models_dir",
    "ocr_language",
    "translator.provider",
    "translator.base_url",
    "translator.model",
    "translator.api_key_env",
    "translator.timeout_secs",
    "live_interval_ms",
    "debounce_ms",
];

impl Settings {
    pub fn settings_path() -> PathBuf {
        settings_dir().join(SETTINGS_FILE_NAME)
    }

    /// Load settings from the default location.
    ///
    /// Falls back to defaults (persisted best-effort) if the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        Self::load_or_init(&Self::settings_path())
    }

    /// Like [`Settings::load`], for an explicit path.
    pub fn load_or_init(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                if path.exists() {
                    log::warn!("ignoring settings at {}: {e:#}", path.display());
                }
                let default_settings = Self::default();
                if let Err(e) = default_settings.save_to(path) {
                    log::warn!("could not persist default settings: {e:#}");
                }
                default_settings
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings = serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Set a single field from its string form, e.g. `("tone_style", "numbers")`.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());

        match key {
            "chinese_variant" | "chinese" | "variant" => {
                self.chinese_variant = value.parse()?;
            }
            "translation_language" | "language" => {
                self.translation_language = language_from_locale(value)
                    .ok_or_else(|| anyhow!("invalid language '{value}'"))?;
            }
            "tone_style" | "tone" => {
                self.tone_style = value.parse().map_err(|e: String| anyhow!(e))?;
            }
            "show_pinyin" => self.show_pinyin = parse_bool(value)?,
            "ocr_models_dir" => self.ocr_models_dir = value.to_string(),
            "ocr_language" => self.ocr_language = value.to_string(),
            "translator.provider" | "provider" => self.translator.provider = value.parse()?,
            "translator.base_url" => self.translator.base_url = optional(value),
            "translator.model" => self.translator.model = optional(value),
            "translator.api_key_env" => self.translator.api_key_env = optional(value),
            "translator.timeout_secs" => {
                self.translator.timeout_secs = value
                    .parse()
                    .with_context(|| format!("invalid timeout '{value}'"))?;
            }
            "live_interval_ms" => {
                self.live_interval_ms = value
                    .parse()
                    .with_context(|| format!("invalid interval '{value}'"))?;
            }
            "debounce_ms" => {
                self.debounce_ms = value
                    .parse()
                    .with_context(|| format!("invalid debounce '{value}'"))?;
            }
            _ => bail!(
                "unknown setting '{key}' (known: {})",
                SETTABLE_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("invalid boolean '{value}'"),
    }
}
