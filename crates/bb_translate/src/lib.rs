//! Translation of recognized Chinese text into the user's language.
//!
//! Providers implement [`Translator`]; [`build_translator`] picks one from
//! settings. Requests are validated up front so empty text or a malformed
//! target language never reaches the network.

pub mod libre;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bb_hanzi::ChineseVariant;
use bb_settings::{TranslatorProvider, TranslatorSettings};
use bb_settings::defaults::language_from_locale;
use thiserror::Error;

pub use libre::LibreTranslator;
pub use openai::OpenAiTranslator;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation is disabled")]
    Disabled,
    #[error("nothing to translate")]
    EmptyText,
    #[error("invalid target language '{0}'")]
    InvalidLanguage(String),
    #[error("API key missing: set the {0} environment variable")]
    MissingApiKey(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("empty translation in response")]
    EmptyResponse,
    #[error("{0}")]
    Provider(String),
}

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Trimmed, never empty.
    pub text: String,
    pub source: ChineseVariant,
    /// Lowercase ISO 639-1 style code, e.g. `it`.
    pub target: String,
}

impl TranslateRequest {
    pub fn new(
        text: &str,
        source: ChineseVariant,
        target: &str,
    ) -> Result<Self, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyText);
        }
        Ok(Self {
            text: text.to_string(),
            source,
            target: normalize_language(target)?,
        })
    }
}

/// `it_IT.UTF-8` and `it-IT` both become `it`.
pub fn normalize_language(language: &str) -> Result<String, TranslateError> {
    language_from_locale(language)
        .ok_or_else(|| TranslateError::InvalidLanguage(language.to_string()))
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError>;

    fn name(&self) -> &'static str;
}

/// Stands in when no provider is configured.
#[derive(Debug, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _request: &TranslateRequest) -> Result<String, TranslateError> {
        Err(TranslateError::Disabled)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

pub async fn translate(
    translator: &dyn Translator,
    text: &str,
    source: ChineseVariant,
    target: &str,
) -> Result<String, TranslateError> {
    let request = TranslateRequest::new(text, source, target)?;
    log::debug!(
        "translating {} chars {} -> {} via {}",
        request.text.chars().count(),
        request.source.language_tag(),
        request.target,
        translator.name()
    );
    translator.translate(&request).await
}

pub async fn translate_from_simplified(
    translator: &dyn Translator,
    text: &str,
    target: &str,
) -> Result<String, TranslateError> {
    translate(translator, text, ChineseVariant::Simplified, target).await
}

pub async fn translate_from_traditional(
    translator: &dyn Translator,
    text: &str,
    target: &str,
) -> Result<String, TranslateError> {
    translate(translator, text, ChineseVariant::Traditional, target).await
}

fn http_client(timeout_secs: u64) -> Result<reqwest::Client, TranslateError> {
    let mut builder = reqwest::Client::builder();
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    Ok(builder.build()?)
}

fn api_key_from_env(settings: &TranslatorSettings) -> Option<(String, Option<String>)> {
    let env = settings.effective_api_key_env()?;
    let key = std::env::var(&env).ok().filter(|k| !k.trim().is_empty());
    Some((env, key))
}

/// Build the translator selected in settings.
pub fn build_translator(
    settings: &TranslatorSettings,
) -> Result<Arc<dyn Translator>, TranslateError> {
    let base_url = settings.effective_base_url().unwrap_or_default();
    match settings.provider {
        TranslatorProvider::None => Ok(Arc::new(DisabledTranslator)),
        TranslatorProvider::OpenAi => {
            let (env, key) = api_key_from_env(settings)
                .ok_or_else(|| TranslateError::MissingApiKey("OPENAI_API_KEY".into()))?;
            let key = key.ok_or(TranslateError::MissingApiKey(env))?;
            let model = settings
                .model
                .clone()
                .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string());
            Ok(Arc::new(OpenAiTranslator::new(
                http_client(settings.timeout_secs)?,
                base_url,
                model,
                key,
            )))
        }
        TranslatorProvider::LibreTranslate => {
            let key = api_key_from_env(settings).and_then(|(_, key)| key);
            Ok(Arc::new(LibreTranslator::new(
                http_client(settings.timeout_secs)?,
                base_url,
                key,
            )))
        }
    }
}
