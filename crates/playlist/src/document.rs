// Playlist document model: classifies raw manifest bytes into the
// master/media shapes and re-serializes them to canonical text.

use m3u8_rs::{MasterPlaylist, MediaPlaylist, parse_playlist_res};

use crate::error::PlaylistError;

/// A parsed manifest, classified by structural content: master playlists
/// carry variant-stream references, media playlists carry segment entries.
#[derive(Debug, Clone)]
pub enum PlaylistDocument {
    Master(MasterPlaylist),
    Media(MediaPlaylist),
}

impl PlaylistDocument {
    /// Parses raw manifest bytes. Input matching neither playlist shape
    /// yields `Parse` with the underlying parser diagnostic.
    pub fn parse(bytes: &[u8]) -> Result<Self, PlaylistError> {
        match parse_playlist_res(bytes) {
            Ok(m3u8_rs::Playlist::MasterPlaylist(pl)) => Ok(Self::Master(pl)),
            Ok(m3u8_rs::Playlist::MediaPlaylist(pl)) => Ok(Self::Media(pl)),
            Err(e) => Err(PlaylistError::Parse(format!("{e}"))),
        }
    }

    pub fn is_master(&self) -> bool {
        matches!(self, Self::Master(_))
    }

    /// Re-serializes the document to canonical manifest text. Tag order and
    /// required headers are preserved; a parsed-then-unmodified document
    /// round-trips to an equivalent document under re-parse.
    pub fn write(&self) -> Result<Vec<u8>, PlaylistError> {
        let mut out = Vec::new();
        match self {
            Self::Master(pl) => pl.write_to(&mut out)?,
            Self::Media(pl) => pl.write_to(&mut out)?,
        }
        Ok(out)
    }
}
