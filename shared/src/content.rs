use serde::{Deserialize, Serialize};

/// Auxiliary content shown for a winning slice. The field names match the
/// JSON schema requested from the text model.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelTip {
    pub description: String,
    pub pro_tip: String,
    pub attractions: Vec<String>,
}

/// Image shown in the result view. `uri` is a remote URL or a `data:` URI;
/// `generated` is set only for images produced by the image model.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageReference {
    pub uri: String,
    pub generated: bool,
}

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

impl ImageReference {
    pub fn remote(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            generated: false,
        }
    }

    pub fn inline(mime_type: Option<&str>, base64_payload: &str) -> Self {
        let mime = mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Self {
            uri: format!("data:{};base64,{}", mime, base64_payload),
            generated: true,
        }
    }
}
