// Loading-request bridge: single-assignment completion slot for one
// intercepted loading request.

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::BAD_REQUEST_ERROR_CODE;

/// Terminal outcome of one intercepted loading request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingOutcome {
    /// Response body handed to the host pipeline, followed by completion.
    Loaded(Bytes),
    /// Transport-style failure carrying the fixed numeric code.
    Failed { code: u16 },
}

/// One pending loading request offered by the host pipeline.
///
/// The completion slot is a oneshot sender consumed by move: the first
/// `resolve`/`reject` fulfils the request, later attempts find the slot
/// empty and are ignored. Dropping an unfulfilled request rejects it, so no
/// code path can leave the host pipeline waiting forever.
#[derive(Debug)]
pub struct InterceptedRequest {
    url: String,
    slot: Mutex<Option<oneshot::Sender<LoadingOutcome>>>,
}

impl InterceptedRequest {
    /// Creates a request for `url` plus the receiver on which the host
    /// pipeline awaits the outcome.
    pub fn new(url: impl Into<String>) -> (Self, oneshot::Receiver<LoadingOutcome>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                url: url.into(),
                slot: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Original private-scheme URL carried by the request.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_completed(&self) -> bool {
        self.slot.lock().is_none()
    }

    /// Delivers `data` as the successful response body.
    pub fn resolve(&self, data: Bytes) {
        self.complete(LoadingOutcome::Loaded(data));
    }

    /// Completes the request with a transport-style error.
    pub fn reject(&self, code: u16) {
        self.complete(LoadingOutcome::Failed { code });
    }

    fn complete(&self, outcome: LoadingOutcome) {
        let Some(tx) = self.slot.lock().take() else {
            warn!(url = %self.url, "ignoring completion of an already-completed request");
            return;
        };
        if tx.send(outcome).is_err() {
            debug!(url = %self.url, "host pipeline dropped the outcome receiver");
        }
    }
}

impl Drop for InterceptedRequest {
    fn drop(&mut self) {
        if let Some(tx) = self.slot.get_mut().take() {
            warn!(url = %self.url, "request dropped unfulfilled, rejecting");
            let _ = tx.send(LoadingOutcome::Failed {
                code: BAD_REQUEST_ERROR_CODE,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_delivers_the_body_once() {
        let (request, rx) = InterceptedRequest::new("cplp://host/a.m3u8");
        assert!(!request.is_completed());
        request.resolve(Bytes::from_static(b"#EXTM3U\n"));
        assert!(request.is_completed());
        assert_eq!(
            rx.await.expect("outcome"),
            LoadingOutcome::Loaded(Bytes::from_static(b"#EXTM3U\n")),
        );
    }

    #[tokio::test]
    async fn reject_carries_the_code() {
        let (request, rx) = InterceptedRequest::new("cplp://host/a.m3u8");
        request.reject(BAD_REQUEST_ERROR_CODE);
        assert_eq!(
            rx.await.expect("outcome"),
            LoadingOutcome::Failed {
                code: BAD_REQUEST_ERROR_CODE
            },
        );
    }

    #[tokio::test]
    async fn later_completion_attempts_are_ignored() {
        let (request, rx) = InterceptedRequest::new("cplp://host/a.m3u8");
        request.resolve(Bytes::from_static(b"first"));
        request.reject(BAD_REQUEST_ERROR_CODE);
        request.resolve(Bytes::from_static(b"third"));
        assert_eq!(
            rx.await.expect("outcome"),
            LoadingOutcome::Loaded(Bytes::from_static(b"first")),
        );
    }

    #[tokio::test]
    async fn dropping_an_unfulfilled_request_rejects_it() {
        let (request, rx) = InterceptedRequest::new("cplp://host/a.m3u8");
        drop(request);
        assert_eq!(
            rx.await.expect("outcome"),
            LoadingOutcome::Failed {
                code: BAD_REQUEST_ERROR_CODE
            },
        );
    }
}
