use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{ContentPart, GenerativeService, InlineImage};
use crate::error::ContentError;

/// Scripted stand-in for the remote service.
pub struct MockGenerativeService {
    delay: Duration,
    text: Result<String, u16>,
    image: Result<Vec<ContentPart>, u16>,
    pub text_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
}

impl MockGenerativeService {
    pub fn succeeding() -> Self {
        Self {
            delay: Duration::ZERO,
            text: Ok(r#"{"description":"live description","proTip":"live tip","attractions":["a","b","c"]}"#.to_string()),
            image: Ok(vec![ContentPart::Image(InlineImage {
                mime_type: Some("image/jpeg".to_string()),
                data: "aGVsbG8=".to_string(),
            })]),
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: Err(503),
            image: Err(503),
            ..Self::succeeding()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Ok(text.to_string());
        self
    }

    pub fn with_image_parts(mut self, parts: Vec<ContentPart>) -> Self {
        self.image = Ok(parts);
        self
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl GenerativeService for MockGenerativeService {
    fn service_name(&self) -> String {
        "mock".to_string()
    }

    async fn generate_json(&self, _prompt: &str, _schema: &Value) -> Result<String, ContentError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.text.clone().map_err(|status| ContentError::Service { status })
    }

    async fn generate_image(
        &self,
        _prompt: &str,
        _aspect_ratio: &str,
    ) -> Result<Vec<ContentPart>, ContentError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.image.clone().map_err(|status| ContentError::Service { status })
    }
}
