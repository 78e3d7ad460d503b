use anyhow::Result;
use async_trait::async_trait;
use interfaces::defs::{ArtistRecord, ArtworkRecord, CollectionRecord, GalleryRepository};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

const ARTWORK_COLUMNS: &str = r#"
    SELECT artworks.id AS id, artworks.title AS title, artworks.image_url AS image_url,
           artworks.collection_id AS collection_id,
           artists.id AS artist_id, artists.name AS artist_name, artists.bio AS artist_bio
    FROM artworks
    JOIN artists ON artists.id = artworks.artist_id
"#;

pub struct GalleryDatabase {
    pool: SqlitePool,
}

impl GalleryDatabase {
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        info!("Connected to gallery database");
        Ok(Self { pool })
    }

    /// A private database that lives as long as this value.
    ///
    /// Pinned to a single connection: every SQLite `:memory:` connection
    /// opens its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn setup_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS artists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                bio TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS collections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(255) NOT NULL,
                description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS artworks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(255) NOT NULL,
                image_url VARCHAR(512) NOT NULL,
                artist_id INTEGER NOT NULL REFERENCES artists(id),
                collection_id INTEGER REFERENCES collections(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("Gallery schema ready");
        Ok(())
    }

    pub async fn insert_artist(&self, name: &str, bio: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO artists (name, bio) VALUES ($1, $2)")
            .bind(name)
            .bind(bio)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_collection(&self, title: &str, description: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO collections (title, description) VALUES ($1, $2)")
            .bind(title)
            .bind(description)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_artwork(
        &self,
        title: &str,
        image_url: &str,
        artist_id: i64,
        collection_id: Option<i64>,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO artworks (title, image_url, artist_id, collection_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(title)
        .bind(image_url)
        .bind(artist_id)
        .bind(collection_id)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Remove every row, children first.
    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM artworks").execute(&self.pool).await?;
        sqlx::query("DELETE FROM collections").execute(&self.pool).await?;
        sqlx::query("DELETE FROM artists").execute(&self.pool).await?;
        Ok(())
    }
}

fn artwork_from_row(row: &SqliteRow) -> Result<ArtworkRecord> {
    Ok(ArtworkRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        image_url: row.try_get("image_url")?,
        collection_id: row.try_get("collection_id")?,
        artist: ArtistRecord {
            id: row.try_get("artist_id")?,
            name: row.try_get("artist_name")?,
            bio: row.try_get("artist_bio")?,
        },
    })
}

fn collection_from_row(row: &SqliteRow) -> Result<CollectionRecord> {
    Ok(CollectionRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl GalleryRepository for GalleryDatabase {
    async fn get_artist(&self) -> Result<Option<ArtistRecord>> {
        let row = sqlx::query("SELECT id, name, bio FROM artists ORDER BY id LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(ArtistRecord {
                id: r.try_get("id")?,
                name: r.try_get("name")?,
                bio: r.try_get("bio")?,
            })),
            None => Ok(None),
        }
    }

    async fn list_collections(&self) -> Result<Vec<CollectionRecord>> {
        let rows = sqlx::query("SELECT id, title, description FROM collections ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(collection_from_row).collect()
    }

    async fn get_collection(&self, id: i64) -> Result<Option<CollectionRecord>> {
        let row = sqlx::query("SELECT id, title, description FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(collection_from_row).transpose()
    }

    async fn list_artworks_in_collection(&self, collection_id: i64) -> Result<Vec<ArtworkRecord>> {
        let query = format!("{} WHERE artworks.collection_id = $1 ORDER BY artworks.id", ARTWORK_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(collection_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(artwork_from_row).collect()
    }

    async fn resolve_artwork_by_id(&self, id: i64) -> Result<Option<ArtworkRecord>> {
        let query = format!("{} WHERE artworks.id = $1", ARTWORK_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        debug!("Resolved artwork {}: found={}", id, row.is_some());
        row.as_ref().map(artwork_from_row).transpose()
    }
}
