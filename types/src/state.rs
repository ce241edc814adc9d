//! Pipeline and hot-swap state definitions.

use serde::{Deserialize, Serialize};

/// GStreamer pipeline state.
///
/// These states correspond to the GStreamer GST_STATE enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum PipelineState {
    /// No state has been set (initial state)
    #[default]
    Null,
    /// The pipeline is ready to go to PAUSED
    Ready,
    /// The pipeline is paused
    Paused,
    /// The pipeline is playing/running
    Playing,
}

impl PipelineState {
    /// Whether an element in this state may receive buffers and events.
    pub fn is_at_least_paused(self) -> bool {
        self >= PipelineState::Paused
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Ready => write!(f, "READY"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Playing => write!(f, "PLAYING"),
        }
    }
}

/// Phase of the element hot-swap protocol.
///
/// A cycle always walks the phases in declaration order and ends back in
/// `Flowing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SwapPhase {
    /// Data flows through the current element; swap requests are accepted.
    #[default]
    Flowing,
    /// A blocking probe is installed upstream and waits for the pad to go quiet.
    BlockingRequested,
    /// The upstream pad is blocked and an EOS is draining the outgoing element.
    BlockedDraining,
    /// The drain finished; the outgoing element is being replaced.
    Swapping,
}

impl SwapPhase {
    /// Whether a new swap request can start a cycle.
    pub fn accepts_requests(self) -> bool {
        self == SwapPhase::Flowing
    }
}

impl std::fmt::Display for SwapPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flowing => write!(f, "FLOWING"),
            Self::BlockingRequested => write!(f, "BLOCKING_REQUESTED"),
            Self::BlockedDraining => write!(f, "BLOCKED_DRAINING"),
            Self::Swapping => write!(f, "SWAPPING"),
        }
    }
}

/// Snapshot of the hot-swap machinery for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SwapStatus {
    pub phase: SwapPhase,
    /// Name of the element currently linked into the swap slot
    pub current: String,
    /// Number of completed swap cycles
    pub swaps_completed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_state_ordering() {
        assert!(!PipelineState::Null.is_at_least_paused());
        assert!(!PipelineState::Ready.is_at_least_paused());
        assert!(PipelineState::Paused.is_at_least_paused());
        assert!(PipelineState::Playing.is_at_least_paused());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SwapPhase::BlockedDraining.to_string(), "BLOCKED_DRAINING");
        assert_eq!(PipelineState::Playing.to_string(), "PLAYING");
        assert!(SwapPhase::Flowing.accepts_requests());
        assert!(!SwapPhase::Swapping.accepts_requests());
    }
}
