//! HTTP client for the Generative Language API.
//!
//! One call per analysis: prompt text plus an inline media part, with a
//! generation config that pins the response to structured JSON.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::CriaConfig;
use crate::error::AnalysisError;

/// One part of a request: prompt text or inline media.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    pub fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    /// Inline media part; bytes are base64-encoded on construction.
    pub fn inline_data(mime: &str, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: mime.to_string(),
                data: BASE64.encode(bytes),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    // Absent when the answer was blocked upstream.
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Client for `models/<model>:generateContent`.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &CriaConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Send one generation request and return the model's text answer.
    pub async fn generate_content(
        &self,
        parts: Vec<Part>,
        response_schema: Value,
    ) -> Result<String, AnalysisError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        };

        debug!(model = %self.model, "dispatching analysis request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Unknown(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "model endpoint error");
            return Err(AnalysisError::Transport {
                status: status.as_u16(),
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Unknown(format!("unreadable response: {e}")))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| AnalysisError::Unknown("model returned no text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_part_serializes_without_inline_data() {
        let part = Part::text("hello".to_string());
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hello" }));
    }

    #[test]
    fn inline_part_base64_encodes_bytes() {
        let part = Part::inline_data("image/png", b"abc");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["inlineData"]["data"], "YWJj");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn request_body_has_wire_field_names() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("prompt".to_string())],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: serde_json::json!({ "type": "OBJECT" }),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
    }

    #[test]
    fn response_text_is_first_candidate_text() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "{\"answer\":1}" } ] } }
            ]
        }"#;
        let payload: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .unwrap();
        assert_eq!(text, "{\"answer\":1}");
    }
}
