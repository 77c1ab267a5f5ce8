use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::llm::{
    entities::{ImageInput, ModelCallError},
    ports::LLMClient,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Finish reasons the provider uses when it refuses to answer.
const REFUSAL_FINISH_REASONS: [&str; 4] = ["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT"];

impl GeminiResponse {
    fn into_text(self) -> Result<String, ModelCallError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ModelCallError::Blocked(reason));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelCallError::EmptyResponse)?;

        if let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|r| REFUSAL_FINISH_REASONS.contains(r))
        {
            return Err(ModelCallError::Blocked(reason.to_string()));
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ModelCallError::EmptyResponse);
        }
        Ok(text)
    }
}

impl GeminiLLMClient {
    pub fn new(api_key: String, model_name: String) -> Self {
        Self {
            api_key,
            model_name,
            base_url: GEMINI_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    fn generation_config(response_schema: serde_json::Value, temperature: f32) -> GenerationConfig {
        GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema,
            temperature,
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, ModelCallError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini API request failed: {}", e);
                ModelCallError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, message);
            return Err(ModelCallError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to decode Gemini response: {}", e);
            ModelCallError::Decode(e.to_string())
        })?;

        gemini_response.into_text()
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        response_schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String, ModelCallError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: general_purpose::STANDARD.encode(&image.data),
                        },
                    },
                ],
            }],
            generation_config: Some(Self::generation_config(response_schema, temperature)),
        };

        self.call_gemini_api(request).await
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
        temperature: f32,
    ) -> Result<String, ModelCallError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text { text: prompt }],
            }],
            generation_config: Some(Self::generation_config(response_schema, temperature)),
        };

        self.call_gemini_api(request).await
    }
}
