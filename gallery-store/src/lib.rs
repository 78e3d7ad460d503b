pub mod database;

pub use database::GalleryDatabase;
