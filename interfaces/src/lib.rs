pub mod defs;
pub mod memory;

pub use defs::{ArtistRecord, ArtworkRecord, CollectionRecord, GalleryRepository};
pub use memory::InMemoryGallery;
