use clap::{Parser, Subcommand};
use curator_notes::{
    GalleryConfig, GalleryQuery, GeminiConfig, GraphQlResponse, InterpretationGenerator, InterpretationQuery,
};
use gallery_store::GalleryDatabase;
use interfaces::{ArtistRecord, ArtworkRecord, CollectionRecord, GalleryRepository, InMemoryGallery};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "curator-notes", about = "Gallery catalog queries and on-demand curator's notes")]
struct Cli {
    /// Gallery database URL, e.g. sqlite://gallery.db (defaults to $DATABASE_URL, then a demo gallery)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// The gallery artist
    Artist,
    /// All collections with their artworks
    Collections,
    /// One collection by id
    Collection { id: String },
    /// One artwork by id
    Artwork { id: String },
    /// Generate a curator's note for an artwork
    Interpret { artwork_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = GalleryConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }

    let repository = open_repository(&config).await?;
    let gallery = GalleryQuery::new(repository.clone());

    match cli.command {
        Command::Artist => print_field("artist", &gallery.artist().await?)?,
        Command::Collections => print_field("collections", &gallery.collections().await?)?,
        Command::Collection { id } => print_field("collection", &gallery.collection(&id).await?)?,
        Command::Artwork { id } => print_field("artwork", &gallery.artwork(&id).await?)?,
        Command::Interpret { artwork_id } => {
            let gemini = GeminiConfig::from_env().map_err(|e| {
                error!("Cannot start the interpretation generator: {}", e);
                e
            })?;
            let generator = InterpretationGenerator::from_config(&gemini, config.fetch.clone())?;
            info!("Interpreting artwork {} with {}", artwork_id, generator.adapter_name());
            let query = InterpretationQuery::new(repository, Arc::new(generator));

            let interpretation = query.generate_artwork_interpretation(&artwork_id).await;
            print_field("generateArtworkInterpretation", &interpretation)?;
        }
    }

    Ok(())
}

async fn open_repository(config: &GalleryConfig) -> anyhow::Result<Arc<dyn GalleryRepository>> {
    match &config.database_url {
        Some(url) => {
            info!("Connecting to database: {}", url);
            let db = GalleryDatabase::new(url).await?;
            db.setup_schema().await?;
            Ok(Arc::new(db))
        }
        None => {
            warn!("DATABASE_URL not set, serving the built-in demo gallery");
            Ok(Arc::new(demo_gallery()))
        }
    }
}

fn demo_gallery() -> InMemoryGallery {
    let artist = ArtistRecord {
        id: 1,
        name: "Gallery Artist".to_string(),
        bio: None,
    };

    InMemoryGallery::new()
        .with_artist(artist.clone())
        .with_collection(CollectionRecord {
            id: 1,
            title: "Selected Works".to_string(),
            description: None,
        })
        .with_artwork(ArtworkRecord {
            id: 1,
            title: "Untitled Study I".to_string(),
            image_url: "https://example.com/image-1.jpg".to_string(),
            artist: artist.clone(),
            collection_id: Some(1),
        })
        .with_artwork(ArtworkRecord {
            id: 2,
            title: "Untitled Study II".to_string(),
            image_url: "https://example.com/image-2.jpg".to_string(),
            artist,
            collection_id: Some(1),
        })
}

fn print_field<T: Serialize>(field: &str, value: &T) -> anyhow::Result<()> {
    let response = GraphQlResponse::new(json!({ field: value }));
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
