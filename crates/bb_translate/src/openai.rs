//! OpenAI-compatible chat completions translator.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{TranslateError, TranslateRequest, Translator};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

pub struct OpenAiTranslator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }
}

fn system_prompt(request: &TranslateRequest) -> String {
    format!(
        "You are a translator. Translate the user's {} text into the language with \
         ISO 639-1 code '{}'. Reply with the translation only, without quotes, \
         romanization or explanations.",
        request.source.display_name(),
        request.target
    )
}

fn build_body<'a>(model: &'a str, request: &TranslateRequest) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt(request),
            },
            ChatMessage {
                role: "user",
                content: request.text.clone(),
            },
        ],
    }
}

fn parse_response(body: &str) -> Result<String, TranslateError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::Provider(format!("malformed response: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(TranslateError::EmptyResponse)
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending chat completion request to: {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&build_body(&self.model, request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_response(&body)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_hanzi::ChineseVariant;

    #[test]
    fn request_body_shape() {
        let req = TranslateRequest::new("我喜欢", ChineseVariant::Simplified, "it").unwrap();
        let json = serde_json::to_value(build_body("gpt-test", &req)).unwrap();
        assert_eq!(json["model"], "gpt-test");
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json["messages"][0]["content"].as_str().unwrap().contains("'it'"));
        assert!(json["messages"][0]["content"].as_str().unwrap().contains("Simplified Chinese"));
        assert_eq!(json["messages"][1]["content"], "我喜欢");
    }

    #[test]
    fn first_choice_is_trimmed() {
        let body = r#"{"choices":[{"message":{"content":"  Mi piace \n"}},{"message":{"content":"x"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Mi piace");
    }

    #[test]
    fn empty_or_missing_content() {
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(TranslateError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(TranslateError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response("not json"),
            Err(TranslateError::Provider(_))
        ));
    }
}
