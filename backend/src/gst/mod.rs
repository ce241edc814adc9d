//! GStreamer integration.

pub mod bus;
pub mod chain;
pub mod graph;
pub mod messages;

pub use bus::BusPoster;
pub use chain::{ChainPreset, ChainSpec, SwapPipeline};
pub use graph::GstSwapGraph;

use gstreamer as gst;
use gstreamer::prelude::*;
use hotswap_types::PipelineState;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("GStreamer error: {0}")]
    GStreamer(#[from] gst::glib::Error),

    #[error("GStreamer boolean error: {0}")]
    BoolError(#[from] gst::glib::BoolError),

    #[error("Failed to create element: {0}")]
    ElementCreation(String),

    #[error("Failed to link elements: {0} -> {1}")]
    LinkError(String, String),

    #[error("Pipeline state change failed: {0}")]
    StateChange(String),

    #[error("Pad not found: {element}:{pad}")]
    PadNotFound { element: String, pad: String },

    #[error("Pipeline has no bus")]
    NoBus,

    #[error("Invalid value '{value}' for {element}:{property}")]
    InvalidProperty {
        element: String,
        property: String,
        value: String,
    },

    #[error(transparent)]
    Swap(#[from] crate::swap::SwapError),
}

/// Create an element, optionally giving it a name.
pub fn make_element(factory: &str, name: Option<&str>) -> Result<gst::Element, PipelineError> {
    let mut builder = gst::ElementFactory::make(factory);
    if let Some(name) = name {
        builder = builder.name(name);
    }
    builder.build().map_err(|e| {
        error!("Failed to create element {}: {}", factory, e);
        PipelineError::ElementCreation(format!("{}: {}", factory, e))
    })
}

/// Create an element for a candidate pool; failures are reported as `None`.
pub fn make_candidate(factory: &str) -> Option<gst::Element> {
    match gst::ElementFactory::make(factory).build() {
        Ok(element) => Some(element),
        Err(e) => {
            debug!("Candidate {} unavailable: {}", factory, e);
            None
        }
    }
}

/// Link elements in order, naming the first pair that fails.
pub fn link_chain(elements: &[&gst::Element]) -> Result<(), PipelineError> {
    for pair in elements.windows(2) {
        pair[0].link(pair[1]).map_err(|_| {
            PipelineError::LinkError(pair[0].name().to_string(), pair[1].name().to_string())
        })?;
    }
    Ok(())
}

/// Set the pipeline state, mapping a failure to [`PipelineError::StateChange`].
pub fn set_state(pipeline: &gst::Pipeline, state: gst::State) -> Result<(), PipelineError> {
    pipeline.set_state(state).map_err(|e| {
        PipelineError::StateChange(format!("{} to {:?}: {}", pipeline.name(), state, e))
    })?;
    Ok(())
}

pub fn pipeline_state(state: gst::State) -> PipelineState {
    match state {
        gst::State::Null => PipelineState::Null,
        gst::State::Ready => PipelineState::Ready,
        gst::State::Paused => PipelineState::Paused,
        gst::State::Playing => PipelineState::Playing,
        _ => PipelineState::Null,
    }
}
