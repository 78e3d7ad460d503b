use anyhow::Result;
use async_trait::async_trait;

use crate::defs::{ArtistRecord, ArtworkRecord, CollectionRecord, GalleryRepository};

/// A gallery held entirely in memory.
///
/// Used as a fixture in tests and as a stand-in when no database is configured.
#[derive(Clone, Debug, Default)]
pub struct InMemoryGallery {
    artists: Vec<ArtistRecord>,
    collections: Vec<CollectionRecord>,
    artworks: Vec<ArtworkRecord>,
}

impl InMemoryGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, artist: ArtistRecord) -> Self {
        self.artists.push(artist);
        self.artists.sort_by_key(|artist| artist.id);
        self
    }

    pub fn with_collection(mut self, collection: CollectionRecord) -> Self {
        self.collections.push(collection);
        self.collections.sort_by_key(|collection| collection.id);
        self
    }

    pub fn with_artwork(mut self, artwork: ArtworkRecord) -> Self {
        self.artworks.push(artwork);
        self.artworks.sort_by_key(|artwork| artwork.id);
        self
    }
}

#[async_trait]
impl GalleryRepository for InMemoryGallery {
    async fn get_artist(&self) -> Result<Option<ArtistRecord>> {
        Ok(self.artists.first().cloned())
    }

    async fn list_collections(&self) -> Result<Vec<CollectionRecord>> {
        Ok(self.collections.clone())
    }

    async fn get_collection(&self, id: i64) -> Result<Option<CollectionRecord>> {
        Ok(self.collections.iter().find(|collection| collection.id == id).cloned())
    }

    async fn list_artworks_in_collection(&self, collection_id: i64) -> Result<Vec<ArtworkRecord>> {
        Ok(self
            .artworks
            .iter()
            .filter(|artwork| artwork.collection_id == Some(collection_id))
            .cloned()
            .collect())
    }

    async fn resolve_artwork_by_id(&self, id: i64) -> Result<Option<ArtworkRecord>> {
        Ok(self.artworks.iter().find(|artwork| artwork.id == id).cloned())
    }
}
