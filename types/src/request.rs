//! Cross-thread application requests.
//!
//! Probe callbacks and GUI widgets never act on the application directly.
//! They post an [`AppRequest`] to a [`RequestSink`] and the control thread
//! picks it up later.

use serde::{Deserialize, Serialize};

/// Which candidate a swap should bring in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index")]
pub enum SwapTarget {
    /// The next candidate in rotation order.
    Next,
    /// A fixed slot of an indexed catalog.
    Index(usize),
}

impl std::fmt::Display for SwapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// Requests that must be handled on the control (GUI) thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target")]
pub enum AppRequest {
    /// Start a hot-swap cycle.
    Swap(SwapTarget),
    /// Stop the loop and tear the pipeline down.
    Quit,
}

/// Destination for [`AppRequest`]s. Implementations must be callable from any thread.
pub trait RequestSink: Send + Sync {
    fn post(&self, request: AppRequest);
}

impl<F> RequestSink for F
where
    F: Fn(AppRequest) + Send + Sync,
{
    fn post(&self, request: AppRequest) {
        self(request)
    }
}

/// What the control loop should do after handling something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Quit,
}

impl LoopAction {
    pub fn is_quit(self) -> bool {
        self == LoopAction::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let sink = move |request: AppRequest| seen_clone.lock().unwrap().push(request);

        sink.post(AppRequest::Swap(SwapTarget::Index(2)));
        sink.post(AppRequest::Quit);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![AppRequest::Swap(SwapTarget::Index(2)), AppRequest::Quit]
        );
    }

    #[test]
    fn test_request_json_shape() {
        let json = serde_json::to_string(&AppRequest::Swap(SwapTarget::Index(3))).unwrap();
        assert_eq!(json, r#"{"type":"Swap","target":{"kind":"Index","index":3}}"#);

        let quit: AppRequest = serde_json::from_str(r#"{"type":"Quit"}"#).unwrap();
        assert_eq!(quit, AppRequest::Quit);
    }
}
