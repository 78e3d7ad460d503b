pub mod types;
pub mod fetcher;
pub mod prompt;
pub mod llm_adapter;
pub mod interpreter;
pub mod schema;
pub mod interpretation;

pub use types::*;
pub use fetcher::ImageFetcher;
pub use llm_adapter::{GeminiAdapter, GenerationRequest, LlmAdapter, MockLlmAdapter, MockResponse};
pub use interpreter::{InterpretationGenerator, Interpreter};
pub use schema::{AiInterpretation, Artist, Artwork, Collection, GalleryQuery, GraphQlResponse};
pub use interpretation::{InterpretationOutcome, InterpretationQuery};
