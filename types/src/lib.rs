//! Shared types for the hotswap GStreamer demos.
//!
//! This crate contains the framework-independent vocabulary shared between
//! the backend (pipelines, probes, bus handling) and the frontend (GUIs).

/// Video effects cycled through by default.
pub const DEFAULT_VIDEO_EFFECTS: &str =
    "identity,exclusion,navigationtest,agingtv,videoflip,vertigotv,gaussianblur,shagadelictv,edgetv";

/// Audio visualizers offered by the indexed variant, one per button.
pub const DEFAULT_VISUALIZERS: &str = "spacescope,spectrascope,synaescope,wavescope";

/// Default period between two swaps in the cycling variant.
pub const DEFAULT_SWAP_INTERVAL_MS: u64 = 1000;

pub mod effects;
pub mod events;
pub mod request;
pub mod state;

// Re-export commonly used types
pub use effects::parse_effect_list;
pub use events::SwapEvent;
pub use request::{AppRequest, LoopAction, RequestSink, SwapTarget};
pub use state::{PipelineState, SwapPhase, SwapStatus};
