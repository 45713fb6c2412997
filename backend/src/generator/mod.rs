pub mod gemini;
pub mod prompts;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ContentError;

/// Inline binary payload returned by the image model, still base64 encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    Image(InlineImage),
}

/// Remote generative capability used by the content service.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Name used in log lines.
    fn service_name(&self) -> String;

    /// Asks the text model for a JSON document matching `schema` and returns
    /// the raw JSON text.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, ContentError>;

    /// Asks the image model for an illustration and returns every content part.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<Vec<ContentPart>, ContentError>;
}

/// First inline image among `parts`, skipping parts with an empty payload.
pub fn first_inline_image(parts: &[ContentPart]) -> Option<&InlineImage> {
    parts.iter().find_map(|part| match part {
        ContentPart::Image(image) if !image.data.is_empty() => Some(image),
        _ => None,
    })
}

pub use gemini::GeminiClient;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_inline_image_skips_text_and_empty() {
        let parts = vec![
            ContentPart::Text("here you go".to_string()),
            ContentPart::Image(InlineImage { mime_type: None, data: String::new() }),
            ContentPart::Image(InlineImage { mime_type: Some("image/jpeg".to_string()), data: "QUJD".to_string() }),
        ];
        let image = first_inline_image(&parts).unwrap();
        assert_eq!(image.data, "QUJD");
        assert!(first_inline_image(&parts[..2]).is_none());
    }
}
