//! In-memory [`SwapGraph`] for exercising the protocol without GStreamer.
//!
//! The slot sits between two fixed neighbours:
//! `queue -> convert_in -> [slot] -> convert_out -> sink`. Probes run on the
//! thread that pushes data, like real pad probes, and the graph records
//! anything a correct protocol must never do.

use super::{ProbeCallback, SwapError, SwapGraph};
use hotswap_types::PipelineState;
use parking_lot::Mutex;
use std::collections::HashMap;

const BEFORE: &str = "convert_in";
const AFTER: &str = "convert_out";
const SLOT: &str = "<slot>";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimElement(String);

impl SimElement {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
struct SimState {
    pipeline_state: PipelineState,
    slot: Option<SimElement>,
    bin: Vec<String>,
    links: Vec<(String, String)>,
    element_states: HashMap<String, PipelineState>,
    block_probe: Option<ProbeCallback>,
    drain_probe: Option<ProbeCallback>,
    defer_eos: bool,
    fail_attach: bool,
    refuse_eos: bool,
    block_fires: usize,
    eos_seen_downstream: usize,
    delivered: HashMap<String, usize>,
    violations: Vec<String>,
}

pub(crate) struct SimGraph {
    state: Mutex<SimState>,
}

impl SimGraph {
    pub fn new(pipeline_state: PipelineState) -> Self {
        let state = SimState {
            pipeline_state,
            bin: ["queue", BEFORE, AFTER, "sink"].map(String::from).to_vec(),
            links: vec![
                ("queue".to_string(), BEFORE.to_string()),
                (AFTER.to_string(), "sink".to_string()),
            ],
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Link the starting element, the way a chain builder does before the
    /// pipeline runs.
    pub fn install_initial(&self, element: &SimElement) {
        self.attach(element).unwrap();
        self.activate(element).unwrap();
    }

    /// Keep the EOS inside the outgoing element until [`SimGraph::release_eos`].
    pub fn defer_eos(&self, defer: bool) {
        self.state.lock().defer_eos = defer;
    }

    pub fn fail_attach(&self, fail: bool) {
        self.state.lock().fail_attach = fail;
    }

    /// Make the outgoing element reject the injected EOS, like a flushing pad.
    pub fn refuse_eos(&self, refuse: bool) {
        self.state.lock().refuse_eos = refuse;
    }

    /// One buffer travels from the upstream queue to the sink.
    pub fn push_buffer(&self) {
        let probe = {
            let mut state = self.state.lock();
            let probe = state.block_probe.take();
            if probe.is_some() {
                state.block_fires += 1;
            }
            probe
        };
        if let Some(on_blocked) = probe {
            on_blocked();
        }

        let mut state = self.state.lock();
        match state.slot.clone() {
            None => state.violations.push("buffer reached an unlinked slot".to_string()),
            Some(element) => {
                let element_state = state.element_states.get(element.name()).copied().unwrap_or_default();
                if !element_state.is_at_least_paused() {
                    state
                        .violations
                        .push(format!("buffer reached {} in {}", element.name(), element_state));
                }
                *state.delivered.entry(element.0).or_default() += 1;
            }
        }
    }

    /// Let a deferred EOS leave the outgoing element.
    pub fn release_eos(&self) {
        self.deliver_eos();
    }

    fn deliver_eos(&self) {
        let probe = self.state.lock().drain_probe.take();
        match probe {
            Some(on_drained) => on_drained(),
            None => self.state.lock().eos_seen_downstream += 1,
        }
    }

    pub fn slot(&self) -> Option<SimElement> {
        self.state.lock().slot.clone()
    }

    pub fn state_of(&self, name: &str) -> PipelineState {
        self.state.lock().element_states.get(name).copied().unwrap_or_default()
    }

    pub fn block_fires(&self) -> usize {
        self.state.lock().block_fires
    }

    pub fn eos_seen_downstream(&self) -> usize {
        self.state.lock().eos_seen_downstream
    }

    pub fn delivered_to(&self, name: &str) -> usize {
        self.state.lock().delivered.get(name).copied().unwrap_or(0)
    }

    pub fn violations(&self) -> Vec<String> {
        self.state.lock().violations.clone()
    }

    /// Element count and links, with the slot element anonymised.
    pub fn shape(&self) -> (usize, Vec<(String, String)>) {
        let state = self.state.lock();
        let slot_name = state.slot.as_ref().map(|e| e.name().to_string());
        let rename = |name: &String| {
            if Some(name) == slot_name.as_ref() {
                SLOT.to_string()
            } else {
                name.clone()
            }
        };
        let mut links: Vec<_> = state.links.iter().map(|(a, b)| (rename(a), rename(b))).collect();
        links.sort();
        (state.bin.len(), links)
    }
}

impl SwapGraph for SimGraph {
    type Element = SimElement;

    fn element_name(&self, element: &SimElement) -> String {
        element.name().to_string()
    }

    fn block_upstream(&self, on_blocked: ProbeCallback) -> Result<(), SwapError> {
        let mut state = self.state.lock();
        if state.block_probe.is_some() {
            state.violations.push("second blocking probe installed".to_string());
        }
        state.block_probe = Some(on_blocked);
        Ok(())
    }

    fn drain(&self, element: &SimElement, on_drained: ProbeCallback) -> Result<(), SwapError> {
        let defer = {
            let mut state = self.state.lock();
            if state.slot.as_ref() != Some(element) {
                return Err(SwapError::PadNotFound {
                    element: element.name().to_string(),
                    pad: "src".to_string(),
                });
            }
            if state.refuse_eos {
                return Err(SwapError::EosRefused(element.name().to_string()));
            }
            state.drain_probe = Some(on_drained);
            state.defer_eos
        };
        if !defer {
            self.deliver_eos();
        }
        Ok(())
    }

    fn deactivate(&self, element: &SimElement) -> Result<(), SwapError> {
        self.state
            .lock()
            .element_states
            .insert(element.name().to_string(), PipelineState::Null);
        Ok(())
    }

    fn detach(&self, element: &SimElement) -> Result<(), SwapError> {
        let mut state = self.state.lock();
        if state.slot.as_ref() != Some(element) {
            return Err(SwapError::Detach(element.name().to_string()));
        }
        let name = element.name();
        state.links.retain(|(a, b)| a != name && b != name);
        state.bin.retain(|e| e != name);
        state.slot = None;
        Ok(())
    }

    fn attach(&self, element: &SimElement) -> Result<(), SwapError> {
        let mut state = self.state.lock();
        if state.fail_attach {
            return Err(SwapError::Attach(element.name().to_string(), "refused".to_string()));
        }
        let name = element.name().to_string();
        state.bin.push(name.clone());
        state.links.push((BEFORE.to_string(), name.clone()));
        state.links.push((name.clone(), AFTER.to_string()));
        state.element_states.entry(name).or_default();
        state.slot = Some(element.clone());
        Ok(())
    }

    fn activate(&self, element: &SimElement) -> Result<(), SwapError> {
        let mut state = self.state.lock();
        let target = state.pipeline_state;
        state.element_states.insert(element.name().to_string(), target);
        Ok(())
    }

    fn stop(&self) -> Result<(), SwapError> {
        let mut state = self.state.lock();
        state.pipeline_state = PipelineState::Null;
        for element_state in state.element_states.values_mut() {
            *element_state = PipelineState::Null;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_without_activate_is_flagged() {
        let graph = SimGraph::new(PipelineState::Playing);
        graph.attach(&SimElement::new("raw")).unwrap();
        graph.push_buffer();
        assert_eq!(graph.violations(), vec!["buffer reached raw in NULL".to_string()]);
        assert_eq!(graph.delivered_to("raw"), 1);
    }

    #[test]
    fn test_eos_without_probe_reaches_downstream() {
        let graph = SimGraph::new(PipelineState::Playing);
        let element = SimElement::new("a");
        graph.install_initial(&element);
        graph.deliver_eos();
        assert_eq!(graph.eos_seen_downstream(), 1);
    }
}
