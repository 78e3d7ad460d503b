use crate::fetcher::ImageFetcher;
use crate::llm_adapter::{GeminiAdapter, GenerationRequest, LlmAdapter};
use crate::prompt::build_prompt;
use crate::types::{ArtworkRecord, CuratorError, FetchConfig, GeminiConfig, InterpretationRequest, Result};
use async_trait::async_trait;
use tracing::{debug, info};

/// Produces a curator's note for an artwork.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret_artwork(&self, artwork: &ArtworkRecord) -> Result<String>;
}

/// Fetches the artwork image, pairs it with the curator prompt and asks the
/// model for a note. Nothing is cached or retried; every call starts fresh.
pub struct InterpretationGenerator {
    fetcher: ImageFetcher,
    adapter: Box<dyn LlmAdapter>,
    temperature: f32,
    max_output_tokens: u32,
}

impl InterpretationGenerator {
    /// Build a generator backed by Gemini. Fails when no API key is configured.
    pub fn from_config(gemini: &GeminiConfig, fetch: FetchConfig) -> Result<Self> {
        let adapter = GeminiAdapter::new(gemini)?;
        info!("Interpretation generator ready ({})", adapter.adapter_name());
        Ok(Self::with_adapter(
            ImageFetcher::new(fetch)?,
            Box::new(adapter),
            gemini.temperature,
            gemini.max_output_tokens,
        ))
    }

    pub fn with_adapter(
        fetcher: ImageFetcher,
        adapter: Box<dyn LlmAdapter>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            fetcher,
            adapter,
            temperature,
            max_output_tokens,
        }
    }

    pub fn adapter_name(&self) -> String {
        self.adapter.adapter_name()
    }
}

#[async_trait]
impl Interpreter for InterpretationGenerator {
    async fn interpret_artwork(&self, artwork: &ArtworkRecord) -> Result<String> {
        let request = InterpretationRequest::from(artwork);
        debug!(
            "Interpreting artwork {} ({:?} by {})",
            request.artwork_id, request.title, request.artist_name
        );

        let prompt = build_prompt(&request);
        let image = self.fetcher.fetch(&request.image_url).await?;

        let generation = GenerationRequest {
            prompt,
            image,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        match self.adapter.generate(&generation).await? {
            Some(text) if !text.trim().is_empty() => {
                info!("Generated interpretation for artwork {} ({} chars)", request.artwork_id, text.len());
                Ok(text)
            }
            _ => Err(CuratorError::EmptyOutput),
        }
    }
}
