use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    /// The bytes did not conform to the playlist grammar. Carries the
    /// underlying parser diagnostic for the operator log.
    #[error("playlist parse error: {0}")]
    Parse(String),

    #[error("playlist serialize error: {source}")]
    Serialize {
        #[from]
        source: io::Error,
    },
}
