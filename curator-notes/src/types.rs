use std::env;
use std::fmt;

// Use the interfaces crate for gallery records
pub use interfaces::defs::{ArtistRecord, ArtworkRecord, CollectionRecord, GalleryRepository};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Curator-Notes/1.0".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash-lite";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            max_output_tokens: 200,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_BASE_URL` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CuratorError::Configuration(
                    "GEMINI_API_KEY environment variable not set. Please add your API key to the .env file."
                        .to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model;
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryConfig {
    pub database_url: Option<String>,
    pub fetch: FetchConfig,
}

impl GalleryConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            fetch: FetchConfig::default(),
        }
    }
}

/// What gets interpreted, built per call from a resolved artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretationRequest {
    pub artwork_id: i64,
    pub title: String,
    pub artist_name: String,
    pub image_url: String,
}

impl From<&ArtworkRecord> for InterpretationRequest {
    fn from(artwork: &ArtworkRecord) -> Self {
        Self {
            artwork_id: artwork.id,
            title: artwork.title.clone(),
            artist_name: artwork.artist.name.clone(),
            image_url: artwork.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Pipeline stage a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Generation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Generation => write!(f, "generation"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to fetch artwork image from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("AI service returned empty response")]
    EmptyOutput,

    #[error("Failed to generate AI interpretation: {reason}")]
    Generation {
        reason: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Repository error")]
    Repository(#[from] anyhow::Error),
}

impl CuratorError {
    pub fn generation(reason: impl Into<String>) -> Self {
        CuratorError::Generation {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            CuratorError::Fetch { .. } => Some(Stage::Fetch),
            CuratorError::EmptyOutput | CuratorError::Generation { .. } => Some(Stage::Generation),
            CuratorError::Configuration(_) | CuratorError::Repository(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;
