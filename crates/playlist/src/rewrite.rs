// Segment location rewriting: absolutizes relative references against the
// manifest's directory prefix.

use tracing::trace;

use crate::document::PlaylistDocument;

/// Absolutizes a single location reference. References already carrying a
/// transport scheme prefix are returned untouched.
pub fn to_absolute_path(prefix: &str, reference: &str) -> String {
    if reference.starts_with("http") {
        reference.to_string()
    } else {
        format!("{prefix}/{reference}")
    }
}

/// Rewrites every segment location of a media playlist to an absolute path
/// under `prefix`. Already-absolute locations and all non-location tags pass
/// through unchanged; tag order is preserved. Idempotent.
///
/// Master playlists pass through untouched: the variant references they
/// carry are resolved by the host pipeline against the original request URL.
pub fn rewrite_references(doc: &mut PlaylistDocument, prefix: &str) {
    let PlaylistDocument::Media(playlist) = doc else {
        return;
    };
    for segment in &mut playlist.segments {
        let absolute = to_absolute_path(prefix, &segment.uri);
        if absolute != segment.uri {
            trace!(from = %segment.uri, to = %absolute, "rewrote segment location");
            segment.uri = absolute;
        }
    }
}
