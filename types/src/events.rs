//! Typed events driving the hot-swap state machine.

use crate::request::SwapTarget;
use serde::{Deserialize, Serialize};

/// Events that advance or abort a swap cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SwapEvent {
    /// A timer tick or a user action asked for a swap
    UserRequestedSwap(SwapTarget),
    /// The upstream blocking probe fired; no data is in transit
    PadBlocked,
    /// The injected EOS left the outgoing element
    DrainComplete,
    /// The pipeline posted an error message
    PipelineError {
        error: String,
        debug: Option<String>,
        source: Option<String>,
    },
}

impl SwapEvent {
    /// Get a human-readable description of the event.
    pub fn description(&self) -> String {
        match self {
            SwapEvent::UserRequestedSwap(target) => format!("Swap requested ({})", target),
            SwapEvent::PadBlocked => "Upstream pad blocked".to_string(),
            SwapEvent::DrainComplete => "Outgoing element drained".to_string(),
            SwapEvent::PipelineError { error, source, .. } => {
                if let Some(src) = source {
                    format!("Pipeline error from {}: {}", src, error)
                } else {
                    format!("Pipeline error: {}", error)
                }
            }
        }
    }
}
