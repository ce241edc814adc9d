//! Pad-probe backed [`SwapGraph`].

use crate::swap::{ProbeCallback, SwapError, SwapGraph};
use gstreamer as gst;
use gstreamer::prelude::*;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// A swap slot between two fixed neighbours of a pipeline.
///
/// `block_pad` is the source pad feeding the slot, usually the output of a
/// queue so that blocking it does not stall the source thread.
#[derive(Debug, Clone)]
pub struct GstSwapGraph {
    pipeline: gst::Pipeline,
    block_pad: gst::Pad,
    before: gst::Element,
    after: gst::Element,
}

impl GstSwapGraph {
    pub fn new(
        pipeline: gst::Pipeline,
        block_pad: gst::Pad,
        before: gst::Element,
        after: gst::Element,
    ) -> Self {
        Self {
            pipeline,
            block_pad,
            before,
            after,
        }
    }

    pub fn pipeline(&self) -> &gst::Pipeline {
        &self.pipeline
    }

    fn pad(element: &gst::Element, name: &str) -> Result<gst::Pad, SwapError> {
        element.static_pad(name).ok_or_else(|| SwapError::PadNotFound {
            element: element.name().to_string(),
            pad: name.to_string(),
        })
    }
}

impl SwapGraph for GstSwapGraph {
    type Element = gst::Element;

    fn element_name(&self, element: &gst::Element) -> String {
        element
            .factory()
            .map(|factory| factory.name().to_string())
            .unwrap_or_else(|| element.name().to_string())
    }

    fn block_upstream(&self, on_blocked: ProbeCallback) -> Result<(), SwapError> {
        let callback = Mutex::new(Some(on_blocked));
        self.block_pad
            .add_probe(gst::PadProbeType::BLOCK_DOWNSTREAM, move |pad, _info| {
                debug!("Pad {} is blocked now", pad.name());
                // May fire again before the removal takes effect
                let on_blocked = callback.lock().take();
                if let Some(on_blocked) = on_blocked {
                    on_blocked();
                }
                gst::PadProbeReturn::Remove
            })
            .map(|_| ())
            .ok_or_else(|| SwapError::Probe(self.block_pad.name().to_string()))
    }

    fn drain(&self, element: &gst::Element, on_drained: ProbeCallback) -> Result<(), SwapError> {
        let src_pad = Self::pad(element, "src")?;
        let sink_pad = Self::pad(element, "sink")?;

        let callback = Mutex::new(Some(on_drained));
        let probe_id = src_pad
            .add_probe(
                gst::PadProbeType::BLOCK | gst::PadProbeType::EVENT_DOWNSTREAM,
                move |pad, info| {
                    let is_eos = matches!(
                        &info.data,
                        Some(gst::PadProbeData::Event(event)) if event.type_() == gst::EventType::Eos
                    );
                    if !is_eos {
                        trace!("Passing event through {}", pad.name());
                        return gst::PadProbeReturn::Pass;
                    }

                    if let Some(id) = info.id.take() {
                        pad.remove_probe(id);
                    }
                    let on_drained = callback.lock().take();
                    if let Some(on_drained) = on_drained {
                        on_drained();
                    }
                    // The EOS only marked the end of the old element's data
                    gst::PadProbeReturn::Drop
                },
            )
            .ok_or_else(|| SwapError::Probe(src_pad.name().to_string()))?;

        debug!("Sending EOS into {}", element.name());
        if !sink_pad.send_event(gst::event::Eos::new()) {
            // The probe would wait forever for an EOS that never comes
            src_pad.remove_probe(probe_id);
            return Err(SwapError::EosRefused(element.name().to_string()));
        }
        Ok(())
    }

    fn deactivate(&self, element: &gst::Element) -> Result<(), SwapError> {
        element
            .set_state(gst::State::Null)
            .map(|_| ())
            .map_err(|e| SwapError::StateChange {
                element: element.name().to_string(),
                reason: e.to_string(),
            })
    }

    fn detach(&self, element: &gst::Element) -> Result<(), SwapError> {
        self.pipeline
            .remove(element)
            .map_err(|_| SwapError::Detach(element.name().to_string()))
    }

    fn attach(&self, element: &gst::Element) -> Result<(), SwapError> {
        let name = element.name().to_string();
        self.pipeline
            .add(element)
            .map_err(|e| SwapError::Attach(name.clone(), e.to_string()))?;
        gst::Element::link_many([&self.before, element, &self.after])
            .map_err(|e| SwapError::Attach(name, e.to_string()))
    }

    fn activate(&self, element: &gst::Element) -> Result<(), SwapError> {
        element
            .sync_state_with_parent()
            .map_err(|e| SwapError::StateChange {
                element: element.name().to_string(),
                reason: e.to_string(),
            })
    }

    fn stop(&self) -> Result<(), SwapError> {
        self.pipeline
            .set_state(gst::State::Null)
            .map(|_| ())
            .map_err(|e| SwapError::StateChange {
                element: self.pipeline.name().to_string(),
                reason: e.to_string(),
            })
    }
}
