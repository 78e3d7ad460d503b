use crate::types::{ArtistRecord, ArtworkRecord, CollectionRecord, GalleryRepository, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub artist: Artist,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub artworks: Vec<Artwork>,
}

/// A curator's note generated on demand. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInterpretation {
    pub id: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
    pub context: String,
}

impl AiInterpretation {
    pub fn ephemeral(artwork_id: i64, content: String, generated_at: DateTime<Utc>) -> Self {
        Self {
            id: ephemeral_id(artwork_id, generated_at),
            content,
            generated_at,
            context: format!("artwork:{}", artwork_id),
        }
    }
}

/// `ephemeral-<artwork id>-<unix seconds>.<micros>`; the same inputs always give the same id.
pub fn ephemeral_id(artwork_id: i64, generated_at: DateTime<Utc>) -> String {
    format!(
        "ephemeral-{}-{}.{:06}",
        artwork_id,
        generated_at.timestamp(),
        generated_at.timestamp_subsec_micros()
    )
}

/// Response envelope, `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct GraphQlResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> GraphQlResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl From<ArtistRecord> for Artist {
    fn from(record: ArtistRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            bio: record.bio,
        }
    }
}

impl From<ArtworkRecord> for Artwork {
    fn from(record: ArtworkRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            image_url: record.image_url,
            artist: record.artist.into(),
        }
    }
}

/// Ids arrive as opaque strings; anything that is not an integer key matches nothing.
///
/// Spellings of the same integer (`"1"`, `"01"`, `"+1"`) name the same artwork,
/// and everything derived from the id (context, ephemeral id) uses the canonical form.
pub fn parse_id(id: &str) -> Option<i64> {
    id.trim().parse::<i64>().ok()
}

/// Plain lookups over the gallery.
#[derive(Clone)]
pub struct GalleryQuery {
    repository: Arc<dyn GalleryRepository>,
}

impl GalleryQuery {
    pub fn new(repository: Arc<dyn GalleryRepository>) -> Self {
        Self { repository }
    }

    pub async fn artist(&self) -> Result<Option<Artist>> {
        Ok(self.repository.get_artist().await?.map(Artist::from))
    }

    pub async fn collections(&self) -> Result<Vec<Collection>> {
        let records = self.repository.list_collections().await?;
        futures::future::try_join_all(records.into_iter().map(|record| self.with_artworks(record))).await
    }

    pub async fn collection(&self, id: &str) -> Result<Option<Collection>> {
        let Some(id) = parse_id(id) else {
            debug!("Collection id {:?} is not numeric", id);
            return Ok(None);
        };

        match self.repository.get_collection(id).await? {
            Some(record) => Ok(Some(self.with_artworks(record).await?)),
            None => Ok(None),
        }
    }

    pub async fn artwork(&self, id: &str) -> Result<Option<Artwork>> {
        let Some(id) = parse_id(id) else {
            debug!("Artwork id {:?} is not numeric", id);
            return Ok(None);
        };

        Ok(self.repository.resolve_artwork_by_id(id).await?.map(Artwork::from))
    }

    async fn with_artworks(&self, record: CollectionRecord) -> Result<Collection> {
        let artworks = self.repository.list_artworks_in_collection(record.id).await?;
        Ok(Collection {
            id: record.id.to_string(),
            title: record.title,
            description: record.description,
            artworks: artworks.into_iter().map(Artwork::from).collect(),
        })
    }
}
