//! Element hot-swap protocol.
//!
//! Replacing an element while data flows takes four steps: block the pad
//! feeding it, drain it by pushing an EOS through it, relink a new element in
//! its place, and let the blocked pad go. The state machine in [`machine`]
//! tracks the protocol, [`driver`] executes it against a [`SwapGraph`], and
//! [`controller`] is the control-thread context object that owns the driver.
//!
//! Nothing in this module depends on GStreamer; `crate::gst` provides the
//! pad-probe backed [`SwapGraph`].

pub mod controller;
pub mod driver;
pub mod machine;
pub mod pool;

#[cfg(test)]
pub(crate) mod sim;

pub use controller::{ControlEvent, SwapController};
pub use driver::HotSwap;
pub use machine::{ExhaustionPolicy, IgnoreReason, SwapAction, SwapMachine};
pub use pool::{CandidatePool, Selection};

use std::fmt;
use thiserror::Error;

/// One-shot callback handed to a probe. Runs on whichever thread pushes data.
pub type ProbeCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Failed to install probe on {0}")]
    Probe(String),

    #[error("{0} refused the end-of-stream event")]
    EosRefused(String),

    #[error("Pad not found: {element}:{pad}")]
    PadNotFound { element: String, pad: String },

    #[error("Failed to change state of {element}: {reason}")]
    StateChange { element: String, reason: String },

    #[error("Failed to remove {0} from the pipeline")]
    Detach(String),

    #[error("Failed to link {0} into the pipeline: {1}")]
    Attach(String, String),

    #[error("No candidate elements could be created")]
    NoCandidates,
}

/// The pipeline operations the hot-swap protocol needs.
///
/// Implementations are shared between the control thread and streaming
/// threads, so every method takes `&self`.
pub trait SwapGraph: Send + Sync + 'static {
    type Element: Clone + PartialEq + fmt::Debug + Send + 'static;

    /// Name used in logs and status displays.
    fn element_name(&self, element: &Self::Element) -> String;

    /// Install a blocking probe on the pad feeding the swap slot.
    ///
    /// `on_blocked` runs once, on the streaming thread, when the pad is
    /// blocked. The probe removes itself after the callback returns.
    fn block_upstream(&self, on_blocked: ProbeCallback) -> Result<(), SwapError>;

    /// Install an EOS probe on the output of `element` and send an EOS into
    /// its input. `on_drained` runs once when the EOS reaches the probe; the
    /// EOS is then dropped.
    fn drain(&self, element: &Self::Element, on_drained: ProbeCallback) -> Result<(), SwapError>;

    /// Bring `element` down to NULL.
    fn deactivate(&self, element: &Self::Element) -> Result<(), SwapError>;

    /// Remove `element` from the pipeline, unlinking it.
    fn detach(&self, element: &Self::Element) -> Result<(), SwapError>;

    /// Add `element` to the pipeline and link it between the slot neighbours.
    fn attach(&self, element: &Self::Element) -> Result<(), SwapError>;

    /// Bring `element` to the state of the pipeline.
    fn activate(&self, element: &Self::Element) -> Result<(), SwapError>;

    /// Tear the whole pipeline down to NULL.
    fn stop(&self) -> Result<(), SwapError>;
}
