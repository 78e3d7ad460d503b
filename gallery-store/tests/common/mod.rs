#![allow(dead_code)]

// Re-export commonly used test types and utilities
pub use gallery_store::database::GalleryDatabase;
pub use interfaces::defs::GalleryRepository;

/// Test fixture values
pub const TEST_ARTIST_NAME: &str = "Test Artist";
pub const TEST_IMAGE_URL_1: &str = "https://img.example/a.jpg";
pub const TEST_IMAGE_URL_2: &str = "https://img.example/b.jpg";

pub struct SeededGallery {
    pub db: GalleryDatabase,
    pub artist_id: i64,
    pub collection_id: i64,
    pub artwork_ids: Vec<i64>,
}

/// Set up an in-memory database with schema and a clean state
pub async fn setup_test_database() -> anyhow::Result<GalleryDatabase> {
    let db = GalleryDatabase::in_memory().await?;
    db.setup_schema().await?;
    db.clear().await?;
    Ok(db)
}

/// One artist, one collection and two artworks, like the gallery fixture
pub async fn setup_seeded_gallery() -> anyhow::Result<SeededGallery> {
    let db = setup_test_database().await?;
    let artist_id = db.insert_artist(TEST_ARTIST_NAME, Some("Paints outdoors.")).await?;
    let collection_id = db.insert_collection("Test Collection", None).await?;
    let first = db.insert_artwork("Test Artwork 1", TEST_IMAGE_URL_1, artist_id, Some(collection_id)).await?;
    let second = db.insert_artwork("Test Artwork 2", TEST_IMAGE_URL_2, artist_id, Some(collection_id)).await?;
    Ok(SeededGallery {
        db,
        artist_id,
        collection_id,
        artwork_ids: vec![first, second],
    })
}
