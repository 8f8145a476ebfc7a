//! Simplified / Traditional Chinese selection and conversion.

use std::fmt;
use std::str::FromStr;

use ferrous_opencc::OpenCC;
use ferrous_opencc::config::BuiltinConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VariantError {
    #[error("unknown Chinese variant '{0}' (expected simplified or traditional)")]
    Unknown(String),
    #[error("OpenCC conversion failed: {0}")]
    Conversion(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChineseVariant {
    #[default]
    #[serde(alias = "simplified_chinese", alias = "zh-Hans", alias = "zh-hans")]
    Simplified,
    #[serde(alias = "traditional_chinese", alias = "zh-Hant", alias = "zh-hant")]
    Traditional,
}

impl ChineseVariant {
    pub const ALL: [ChineseVariant; 2] = [ChineseVariant::Simplified, ChineseVariant::Traditional];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChineseVariant::Simplified => "simplified",
            ChineseVariant::Traditional => "traditional",
        }
    }

    /// BCP-47 tag used as the translation source language.
    pub fn language_tag(&self) -> &'static str {
        match self {
            ChineseVariant::Simplified => "zh-Hans",
            ChineseVariant::Traditional => "zh-Hant",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChineseVariant::Simplified => "Simplified Chinese",
            ChineseVariant::Traditional => "Traditional Chinese",
        }
    }

    /// Parse a stored value, treating anything unrecognised as Simplified.
    pub fn from_stored_lossy(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for ChineseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChineseVariant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplified" | "simplified_chinese" | "zh-hans" | "s" => Ok(ChineseVariant::Simplified),
            "traditional" | "traditional_chinese" | "zh-hant" | "t" => {
                Ok(ChineseVariant::Traditional)
            }
            _ => Err(VariantError::Unknown(s.to_string())),
        }
    }
}

/// Converter into one character set. Building the OpenCC dictionaries is not
/// free, so hold on to one of these when converting repeatedly.
pub struct VariantConverter {
    target: ChineseVariant,
    cc: OpenCC,
}

impl VariantConverter {
    pub fn new(target: ChineseVariant) -> Result<Self, VariantError> {
        let config = match target {
            ChineseVariant::Simplified => BuiltinConfig::T2s,
            ChineseVariant::Traditional => BuiltinConfig::S2t,
        };
        let cc = OpenCC::from_config(config).map_err(|e| VariantError::Conversion(e.to_string()))?;
        Ok(Self { target, cc })
    }

    pub fn target(&self) -> ChineseVariant {
        self.target
    }

    pub fn convert(&self, text: &str) -> String {
        self.cc.convert(text)
    }
}

/// One-shot conversion of `text` into the `target` character set.
pub fn convert_variant(text: &str, target: ChineseVariant) -> Result<String, VariantError> {
    if text.is_empty() {
        return Ok(String::new());
    }
    Ok(VariantConverter::new(target)?.convert(text))
}
