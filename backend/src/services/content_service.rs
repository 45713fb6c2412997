use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::content::{ImageReference, TravelTip};
use tracing::{debug, info, warn};

use super::fallback::{fallback_image, fallback_tip};
use crate::config::Config;
use crate::error::ContentError;
use crate::generator::prompts::{image_prompt, text_prompt, travel_tip_schema, IMAGE_ASPECT_RATIO};
use crate::generator::{first_inline_image, GenerativeService};

/// Both halves of one resolution episode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub tip: TravelTip,
    pub image: Option<ImageReference>,
}

/// Resolves tips and images for winners. Never fails: every error path ends
/// in static or generic fallback content.
pub struct ContentResolver {
    service: Arc<dyn GenerativeService>,
    text_timeout: Duration,
    image_timeout: Duration,
    generate_images: bool,
}

/// Runs `call` as a detached task raced against `budget`. On timeout the task
/// is abandoned, not cancelled: it may still finish, but its result is dropped.
async fn race_remote<T, F>(label: &'static str, budget: Duration, call: F) -> Result<T, ContentError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ContentError>> + Send + 'static,
{
    let abandoned = Arc::new(AtomicBool::new(false));
    let flag = abandoned.clone();

    let task = tokio::spawn(async move {
        let result = call.await;
        if flag.load(Ordering::SeqCst) {
            debug!("Late {} result discarded (ok: {})", label, result.is_ok());
        }
        result
    });

    match tokio::time::timeout(budget, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(ContentError::Transport(format!("{} task failed: {}", label, join_error))),
        Err(_) => {
            abandoned.store(true, Ordering::SeqCst);
            Err(ContentError::Timeout(budget.as_millis()))
        }
    }
}

fn parse_tip(raw: &str) -> Result<TravelTip, ContentError> {
    serde_json::from_str::<TravelTip>(raw.trim()).map_err(|e| ContentError::Malformed(e.to_string()))
}

impl ContentResolver {
    pub fn new(service: Arc<dyn GenerativeService>, config: &Config) -> Self {
        info!(
            "Content resolver using {} (text {} ms, image {} ms, images {})",
            service.service_name(),
            config.text_timeout.as_millis(),
            config.image_timeout.as_millis(),
            if config.generate_images { "on" } else { "off" }
        );
        Self {
            service,
            text_timeout: config.text_timeout,
            image_timeout: config.image_timeout,
            generate_images: config.generate_images,
        }
    }

    async fn fetch_text(&self, name: &str) -> Result<TravelTip, ContentError> {
        let service = self.service.clone();
        let prompt = text_prompt(name);

        let raw = race_remote("text", self.text_timeout, async move {
            service.generate_json(&prompt, &travel_tip_schema()).await
        })
        .await?;

        parse_tip(&raw)
    }

    async fn fetch_image(&self, name: &str) -> Result<ImageReference, ContentError> {
        let service = self.service.clone();
        let prompt = image_prompt(name);

        let parts = race_remote("image", self.image_timeout, async move {
            service.generate_image(&prompt, IMAGE_ASPECT_RATIO).await
        })
        .await?;

        let image = first_inline_image(&parts)
            .ok_or_else(|| ContentError::Malformed("no inline image in response".to_string()))?;
        STANDARD
            .decode(image.data.as_bytes())
            .map_err(|e| ContentError::Malformed(format!("image payload is not base64: {}", e)))?;

        Ok(ImageReference::inline(image.mime_type.as_deref(), &image.data))
    }

    /// Tip for `name`, bounded by the text timeout.
    pub async fn resolve_text(&self, name: &str) -> TravelTip {
        match self.fetch_text(name).await {
            Ok(tip) => tip,
            Err(e) => {
                warn!("Text generation unavailable for {} ({}: {}), using fallback", name, e.as_ref(), e);
                fallback_tip(name)
            }
        }
    }

    /// Image for `name`, bounded by the image timeout. Always yields an image:
    /// the generic picture is the last resort.
    pub async fn resolve_image(&self, name: &str) -> ImageReference {
        match self.fetch_image(name).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Image generation unavailable for {} ({}: {}), using fallback", name, e.as_ref(), e);
                fallback_image(name)
            }
        }
    }

    /// Issues the text and image requests concurrently and waits for both.
    pub async fn resolve(&self, name: &str) -> ResolvedContent {
        if !self.generate_images {
            return ResolvedContent {
                tip: self.resolve_text(name).await,
                image: None,
            };
        }

        let (tip, image) = tokio::join!(self.resolve_text(name), self.resolve_image(name));
        ResolvedContent {
            tip,
            image: Some(image),
        }
    }
}
