/// Gemini enhancement client
///
/// Wraps the generateContent REST call: sends the base64 image payload and
/// the tier's prompt, requests an image-typed response, and extracts the
/// first inline image payload from the reply. Network failures and
/// missing-image replies both surface as `EnhanceError`; the raw detail is
/// logged rather than shown to the user verbatim.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::media::validate::MediaType;

use super::prompts::QualityTier;

/// The image-capable Gemini model used for restoration
const MODEL: &str = "gemini-2.5-flash-image";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// What went wrong during an enhancement call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    #[error("The AI service could not process the image. Check your connection or try again later.")]
    RequestFailed(String),
    #[error("The AI did not return a valid image. Please try again.")]
    NoImage,
}

/// Client for the remote enhancement provider
#[derive(Debug, Clone)]
pub struct EnhanceClient {
    http: reqwest::Client,
    api_key: String,
}

impl EnhanceClient {
    pub fn new(api_key: String) -> Self {
        EnhanceClient {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Send one enhancement request and return the base64 payload of the
    /// restored image.
    pub async fn enhance(
        &self,
        payload: &str,
        media_type: MediaType,
        tier: QualityTier,
    ) -> Result<String, EnhanceError> {
        let url = format!("{}/{}:generateContent?key={}", API_BASE, MODEL, self.api_key);

        let body = json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": media_type.mime(),
                            "data": payload,
                        }
                    },
                    {
                        "text": tier.prompt(),
                    }
                ]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
            }
        });

        println!("📤 Requesting {} enhancement from Gemini...", tier.label());

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                eprintln!("⚠️  Enhancement request failed: {e}");
                EnhanceError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            eprintln!("⚠️  Failed to read enhancement response: {e}");
            EnhanceError::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let detail: String = text.chars().take(500).collect();
            eprintln!("⚠️  Gemini API error {status}: {detail}");
            return Err(EnhanceError::RequestFailed(format!("HTTP {status}")));
        }

        let image = extract_image_payload(&text)?;
        println!("✅ Enhancement complete ({} base64 chars)", image.len());

        Ok(image)
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(rename = "inlineData", alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    data: String,
}

/// Pull the first inline image payload out of a generateContent reply.
/// A reply without one (e.g. text-only parts) counts as a failure.
fn extract_image_payload(body: &str) -> Result<String, EnhanceError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|_| EnhanceError::NoImage)?;

    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.inline_data)
        .map(|inline| inline.data)
        .find(|data| !data.is_empty())
        .ok_or(EnhanceError::NoImage)
}
