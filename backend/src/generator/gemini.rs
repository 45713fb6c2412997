use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{ContentPart, GenerativeService, InlineImage};
use crate::config::Config;
use crate::error::ContentError;

/// REST client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    text_model: String,
    image_model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<Blob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: Option<String>,
    data: Option<String>,
}

impl GenerateContentResponse {
    fn into_parts(self) -> Vec<ContentPart> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| match (part.inline_data, part.text) {
                (Some(blob), _) => Some(ContentPart::Image(InlineImage {
                    mime_type: blob.mime_type,
                    data: blob.data.unwrap_or_default(),
                })),
                (None, Some(text)) => Some(ContentPart::Text(text)),
                (None, None) => None,
            })
            .collect()
    }

    /// Concatenated text of the first candidate, `None` when there is none.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .into_parts()
            .into_iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text),
                ContentPart::Image(_) => None,
            })
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    async fn generate_content(
        &self,
        model: &str,
        body: Value,
    ) -> Result<GenerateContentResponse, ContentError> {
        let api_key = self.api_key.as_deref().ok_or(ContentError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Service { status: status.as_u16() });
        }

        let parsed = response.json::<GenerateContentResponse>().await?;
        debug!("{} answered with {} candidate(s)", model, parsed.candidates.len());
        Ok(parsed)
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    fn service_name(&self) -> String {
        format!("gemini ({} / {})", self.text_model, self.image_model)
    }

    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, ContentError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        self.generate_content(&self.text_model, body)
            .await?
            .into_text()
            .ok_or_else(|| ContentError::Malformed("model returned no text".to_string()))
    }

    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<Vec<ContentPart>, ContentError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": aspect_ratio }
            }
        });

        Ok(self.generate_content(&self.image_model, body).await?.into_parts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_text_is_joined_from_first_candidate() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        );
        assert_eq!(response.into_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_empty_response_has_no_text() {
        assert!(parse(r#"{}"#).into_text().is_none());
        assert!(parse(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
            .into_text()
            .is_none());
    }

    #[test]
    fn test_inline_data_becomes_image_part() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is your picture"},
                {"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}
            ]}}]}"#,
        );
        let parts = response.into_parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            ContentPart::Image(InlineImage {
                mime_type: Some("image/png".to_string()),
                data: "iVBORw0KGgo=".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(&Config::default());
        let err = client.generate_json("hi", &json!({})).await.unwrap_err();
        assert!(matches!(err, ContentError::MissingApiKey));
    }

    #[test]
    fn test_endpoint_format() {
        let config = Config {
            api_base: "https://example.test/v1beta/".to_string(),
            ..Config::default()
        };
        let client = GeminiClient::new(&config);
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
