use crate::interpreter::Interpreter;
use crate::schema::{parse_id, AiInterpretation};
use crate::types::{CuratorError, GalleryRepository, Stage};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Every way a single interpretation request can end.
#[derive(Debug)]
pub enum InterpretationOutcome {
    NotFound,
    LookupFailed(CuratorError),
    FetchFailed(CuratorError),
    EmptyOutput,
    GenerationFailed(CuratorError),
    Success(AiInterpretation),
}

impl InterpretationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InterpretationOutcome::Success(_))
    }

    /// Collapse to what callers see: the interpretation, or nothing.
    pub fn into_result(self) -> Option<AiInterpretation> {
        match self {
            InterpretationOutcome::Success(interpretation) => Some(interpretation),
            _ => None,
        }
    }
}

/// The `generateArtworkInterpretation` resolver.
///
/// Callers only ever get a full interpretation or nothing. Why nothing came
/// back is kept in [`InterpretationOutcome`] and in the logs.
#[derive(Clone)]
pub struct InterpretationQuery {
    repository: Arc<dyn GalleryRepository>,
    interpreter: Arc<dyn Interpreter>,
}

impl InterpretationQuery {
    pub fn new(repository: Arc<dyn GalleryRepository>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self {
            repository,
            interpreter,
        }
    }

    pub async fn resolve_interpretation(&self, artwork_id: &str) -> InterpretationOutcome {
        let Some(id) = parse_id(artwork_id) else {
            debug!("Artwork id {:?} is not numeric", artwork_id);
            return InterpretationOutcome::NotFound;
        };

        let artwork = match self.repository.resolve_artwork_by_id(id).await {
            Ok(Some(artwork)) => artwork,
            Ok(None) => return InterpretationOutcome::NotFound,
            Err(e) => return InterpretationOutcome::LookupFailed(CuratorError::Repository(e)),
        };

        match self.interpreter.interpret_artwork(&artwork).await {
            Ok(content) => InterpretationOutcome::Success(AiInterpretation::ephemeral(artwork.id, content, Utc::now())),
            Err(CuratorError::EmptyOutput) => InterpretationOutcome::EmptyOutput,
            Err(e) if e.stage() == Some(Stage::Fetch) => InterpretationOutcome::FetchFailed(e),
            Err(e) => InterpretationOutcome::GenerationFailed(e),
        }
    }

    pub async fn generate_artwork_interpretation(&self, artwork_id: &str) -> Option<AiInterpretation> {
        match self.resolve_interpretation(artwork_id).await {
            InterpretationOutcome::Success(interpretation) => {
                info!("Interpretation {} ready for {}", interpretation.id, interpretation.context);
                Some(interpretation)
            }
            InterpretationOutcome::NotFound => {
                info!("No artwork found for id {:?}", artwork_id);
                None
            }
            InterpretationOutcome::EmptyOutput => {
                error!(
                    "Interpretation failed for artwork {} at generation stage: {}",
                    artwork_id,
                    CuratorError::EmptyOutput
                );
                None
            }
            InterpretationOutcome::LookupFailed(e) => {
                error!("Artwork lookup failed for id {}: {:#}", artwork_id, anyhow::Error::new(e));
                None
            }
            InterpretationOutcome::FetchFailed(e) | InterpretationOutcome::GenerationFailed(e) => {
                let stage = e.stage().unwrap_or(Stage::Generation);
                error!(
                    "Interpretation failed for artwork {} at {} stage: {:#}",
                    artwork_id,
                    stage,
                    anyhow::Error::new(e)
                );
                None
            }
        }
    }
}
