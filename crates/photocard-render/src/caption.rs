//! Caption suggestion via an external captioning service
//!
//! Best-effort only: any failure (no endpoint configured, transport error,
//! bad response shape) yields an empty caption and a logged warning, never
//! an error. The caller keeps whatever caption the user already typed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::warn;

const URL_ENV: &str = "PHOTOCARD_CAPTION_URL";
const KEY_ENV: &str = "PHOTOCARD_CAPTION_KEY";

/// A collaborator that proposes a caption for an encoded image
pub trait CaptionSuggester {
    /// Suggest a caption; empty string means no suggestion
    fn suggest(&self, image_bytes: &[u8]) -> String;
}

/// Suggester backed by an HTTP captioning endpoint.
///
/// Sends the base64-encoded image as JSON and expects a `caption` string
/// field back.
pub struct HttpCaptionSuggester {
    url: String,
    api_key: Option<String>,
}

impl HttpCaptionSuggester {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            url: url.into(),
            api_key,
        }
    }

    /// Build from `PHOTOCARD_CAPTION_URL` and `PHOTOCARD_CAPTION_KEY`;
    /// `None` when no endpoint is configured.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(URL_ENV).ok()?;
        Some(Self::new(url, std::env::var(KEY_ENV).ok()))
    }

    fn request(
        &self,
        image_bytes: &[u8],
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let body = serde_json::json!({
            "image": BASE64.encode(image_bytes),
        });
        let mut request = ureq::post(&self.url);
        if let Some(key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {key}"));
        }
        let response: serde_json::Value = request.send_json(body)?.into_json()?;
        Ok(response
            .get("caption")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

impl CaptionSuggester for HttpCaptionSuggester {
    fn suggest(&self, image_bytes: &[u8]) -> String {
        match self.request(image_bytes) {
            Ok(caption) => caption,
            Err(err) => {
                warn!("caption suggestion failed: {err}");
                String::new()
            }
        }
    }
}
