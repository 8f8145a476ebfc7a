//! LibreTranslate client.

use async_trait::async_trait;
use bb_hanzi::ChineseVariant;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{TranslateError, TranslateRequest, Translator};

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct LibreErrorBody {
    error: String,
}

/// LibreTranslate's code for the source character set.
pub fn source_code(variant: ChineseVariant) -> &'static str {
    match variant {
        ChineseVariant::Simplified => "zh",
        ChineseVariant::Traditional => "zt",
    }
}

pub struct LibreTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

fn build_body<'a>(request: &'a TranslateRequest, api_key: Option<&'a str>) -> LibreRequest<'a> {
    LibreRequest {
        q: &request.text,
        source: source_code(request.source),
        target: &request.target,
        format: "text",
        api_key,
    }
}

fn parse_response(status: u16, body: &str) -> Result<String, TranslateError> {
    if !(200..300).contains(&status) {
        return Err(match serde_json::from_str::<LibreErrorBody>(body) {
            Ok(e) => TranslateError::Provider(e.error),
            Err(_) => TranslateError::Status {
                status,
                body: body.to_string(),
            },
        });
    }
    let response: LibreResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::Provider(format!("malformed response: {e}")))?;
    let text = response.translated_text.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        let url = format!("{}/translate", self.base_url);
        debug!("Sending translate request to: {url}");

        let response = self
            .client
            .post(&url)
            .json(&build_body(request, self.api_key.as_deref()))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, &body)
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_libre_source_codes() {
        let req = TranslateRequest::new("我喜歡", ChineseVariant::Traditional, "en_US").unwrap();
        let json = serde_json::to_value(build_body(&req, None)).unwrap();
        assert_eq!(json["source"], "zt");
        assert_eq!(json["target"], "en");
        assert_eq!(json["format"], "text");
        assert!(json.get("api_key").is_none());

        let json = serde_json::to_value(build_body(&req, Some("k"))).unwrap();
        assert_eq!(json["api_key"], "k");
    }

    #[test]
    fn responses() {
        assert_eq!(
            parse_response(200, r#"{"translatedText":" I like it "}"#).unwrap(),
            "I like it"
        );
        match parse_response(400, r#"{"error":"zt is not supported"}"#) {
            Err(TranslateError::Provider(msg)) => assert_eq!(msg, "zt is not supported"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_response(502, "Bad Gateway"),
            Err(TranslateError::Status { status: 502, .. })
        ));
        assert!(matches!(
            parse_response(200, r#"{"translatedText":""}"#),
            Err(TranslateError::EmptyResponse)
        ));
    }
}
