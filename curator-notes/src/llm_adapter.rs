use crate::types::{CuratorError, FetchedImage, GeminiConfig, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};
use url::Url;

/// A single multimodal generation call: one image plus one instruction.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: FetchedImage,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Trait for LLM adapters that can turn an image and a prompt into text
#[async_trait]
pub trait LlmAdapter: Send + Sync {
    /// Get the name of this LLM adapter
    fn adapter_name(&self) -> String;

    /// Run one generation. `Ok(None)` means the model answered without any text.
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>>;
}

/// Adapter for the Gemini `generateContent` REST endpoint.
pub struct GeminiAdapter {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl GeminiAdapter {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(CuratorError::Configuration("Gemini API key is empty".to_string()));
        }

        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(&format!("v1beta/models/{}:generateContent", config.model)))
            .map_err(|e| CuratorError::Configuration(format!("Invalid Gemini base URL '{}': {}", config.base_url, e)))?;

        let client = Client::builder()
            .build()
            .map_err(|e| CuratorError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl LlmAdapter for GeminiAdapter {
    fn adapter_name(&self) -> String {
        format!("Gemini ({})", self.model)
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![
                    RequestPart {
                        inline_data: Some(InlineData {
                            mime_type: &request.image.mime_type,
                            data: STANDARD.encode(&request.image.bytes),
                        }),
                        text: None,
                    },
                    RequestPart {
                        inline_data: None,
                        text: Some(request.prompt.as_str()),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        debug!(
            "Calling {} with {} image bytes ({})",
            self.adapter_name(),
            request.image.bytes.len(),
            request.image.mime_type
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CuratorError::Generation {
                reason: "request to model endpoint failed".to_string(),
                source: Some(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CuratorError::generation(format!(
                "model endpoint returned HTTP {}: {}",
                status,
                detail.trim()
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| CuratorError::Generation {
            reason: "could not decode model response".to_string(),
            source: Some(e),
        })?;

        let text = parsed.text();
        match &text {
            Some(text) => info!("{} returned {} chars", self.adapter_name(), text.len()),
            None => warn!(
                "{} returned no text (finish reason: {})",
                self.adapter_name(),
                parsed
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .unwrap_or("none")
            ),
        }
        Ok(text)
    }
}

/// What a [`MockLlmAdapter`] answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Empty,
    Fail(String),
}

/// Mock LLM adapter for development and testing
///
/// Clones share one request log.
#[derive(Clone)]
pub struct MockLlmAdapter {
    name: String,
    response: MockResponse,
    response_delay_ms: u64,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockLlmAdapter {
    pub fn new(name: String, response: MockResponse) -> Self {
        Self {
            name,
            response,
            response_delay_ms: 0,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new("default".to_string(), MockResponse::Text(text.into()))
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn simulate_processing(&self) {
        if self.response_delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.response_delay_ms)).await;
        }
    }
}

#[async_trait]
impl LlmAdapter for MockLlmAdapter {
    fn adapter_name(&self) -> String {
        format!("Mock LLM Adapter ({})", self.name)
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.simulate_processing().await;

        match &self.response {
            MockResponse::Text(text) => Ok(Some(text.clone())),
            MockResponse::Empty => Ok(None),
            MockResponse::Fail(reason) => Err(CuratorError::generation(reason.clone())),
        }
    }
}
