// Interception pipeline: accepts private-scheme loading requests and
// completes them with rewritten manifest bytes.

use std::sync::Arc;

use bytes::Bytes;
use playlist::{PlaylistDocument, rewrite_references};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::config::SchemeConfig;
use crate::error::{BAD_REQUEST_ERROR_CODE, LoaderError};
use crate::fetch::ManifestFetch;
use crate::request::InterceptedRequest;
use crate::scheme::SchemeTranslator;

/// Resource-loading interceptor for one playback session.
///
/// The owning session decides teardown: cancelling the token (or dropping
/// the interceptor) rejects every still-pending request, so none is left
/// unresolved.
pub struct PlaylistInterceptor {
    translator: SchemeTranslator,
    fetcher: Arc<dyn ManifestFetch>,
    token: CancellationToken,
}

impl PlaylistInterceptor {
    pub fn new(config: SchemeConfig, fetcher: Arc<dyn ManifestFetch>) -> Self {
        Self {
            translator: SchemeTranslator::new(config),
            fetcher,
            token: CancellationToken::new(),
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Synchronous accept decision for the host pipeline: `false` leaves the
    /// request untouched for the host to load itself; `true` spawns
    /// asynchronous handling that will complete the request exactly once.
    ///
    /// Must be called within a tokio runtime.
    pub fn intercept(&self, request: Arc<InterceptedRequest>) -> bool {
        if !self.translator.matches(request.url()) {
            return false;
        }
        let translator = self.translator.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(url = %request.url(), "session torn down, rejecting pending request");
                    request.reject(BAD_REQUEST_ERROR_CODE);
                }
                result = handle_request(&translator, fetcher.as_ref(), &request) => {
                    if let Err(e) = result {
                        error!(url = %request.url(), error = %e, "manifest interception failed");
                        request.reject(e.response_code());
                    }
                }
            }
        });
        true
    }
}

impl Drop for PlaylistInterceptor {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Runs one accepted request through translation, fetch, parse, rewrite
/// (media playlists only) and serialization, then resolves it. Any error is
/// returned for the caller to turn into a rejection. Requests are
/// independent and share no rewrite state.
async fn handle_request(
    translator: &SchemeTranslator,
    fetcher: &dyn ManifestFetch,
    request: &InterceptedRequest,
) -> Result<(), LoaderError> {
    let url = translator.translate(request.url())?;
    let bytes = fetcher.fetch(&url).await?;
    let mut document = PlaylistDocument::parse(&bytes).map_err(LoaderError::from)?;
    // Relative locations must become absolute under the transport scheme:
    // the host pipeline would otherwise resolve them against the private
    // scheme. Master playlists pass through untouched.
    rewrite_references(&mut document, SchemeTranslator::directory_prefix(&url));
    let body = document.write().map_err(LoaderError::from)?;
    request.resolve(Bytes::from(body));
    Ok(())
}
