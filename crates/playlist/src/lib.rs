// Streaming playlist (M3U8) document handling: master/media classification,
// segment location rewriting, canonical re-serialization.
pub mod document;
pub mod error;
pub mod rewrite;

pub use document::PlaylistDocument;
pub use error::PlaylistError;
pub use rewrite::{rewrite_references, to_absolute_path};
