// Custom-scheme playlist loading interceptor engine.
//
// Intercepts loading requests that carry the private playlist scheme,
// fetches the real manifest over the transport scheme, rewrites relative
// segment locations to absolute ones, and resolves the original request
// with the transformed bytes. Failures at any stage reject the request with
// a single fixed transport-style error code.

pub mod config;
pub mod error;
pub mod fetch;
pub mod interceptor;
pub mod playback;
pub mod request;
pub mod scheme;

// Re-exports for easier access
pub use config::SchemeConfig;
pub use error::{BAD_REQUEST_ERROR_CODE, LoaderError};
pub use fetch::{ManifestFetch, ManifestFetcher};
pub use interceptor::PlaylistInterceptor;
pub use playback::{
    AssetPreparation, ControlSurface, ItemState, ItemStatus, PlaybackFailure, PlaybackSession,
    PlaybackState, PlayerFeeds, PlayerSubscriptions, PlayerTransport, SessionCommand,
    VideoFillMode, player_channels,
};
pub use request::{InterceptedRequest, LoadingOutcome};
pub use scheme::SchemeTranslator;
