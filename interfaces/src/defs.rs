use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub artist: ArtistRecord,
    pub collection_id: Option<i64>,
}

// Object style note:
// Records handed out by a repository are already resolved and read-only.
// Callers never write back through them; anything derived from a record
// (prompts, interpretations) is built fresh per request and dropped after
// the response is serialized.

/// Read access to the gallery's artists, collections and artworks.
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// The gallery artist. With several rows present, the lowest id wins.
    async fn get_artist(&self) -> Result<Option<ArtistRecord>>;

    /// All collections ordered by id.
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>>;

    async fn get_collection(&self, id: i64) -> Result<Option<CollectionRecord>>;

    /// Artworks belonging to a collection, ordered by id.
    async fn list_artworks_in_collection(&self, collection_id: i64) -> Result<Vec<ArtworkRecord>>;

    /// Look up one artwork together with its artist.
    async fn resolve_artwork_by_id(&self, id: i64) -> Result<Option<ArtworkRecord>>;
}
