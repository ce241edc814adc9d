//! Executes the hot-swap protocol against a [`SwapGraph`].
//!
//! The machine lock is only held while the machine decides. Graph calls are
//! made without it because a probe may fire synchronously from inside them,
//! on the calling thread, and re-enter the driver.

use super::machine::{ExhaustionPolicy, SwapAction, SwapMachine};
use super::pool::CandidatePool;
use super::{SwapError, SwapGraph};
use hotswap_types::{AppRequest, RequestSink, SwapEvent, SwapPhase, SwapStatus, SwapTarget};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, error, info};

/// Shared handle to a hot-swappable slot in a pipeline.
pub struct HotSwap<G: SwapGraph> {
    inner: Arc<Inner<G>>,
}

impl<G: SwapGraph> Clone for HotSwap<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<G: SwapGraph> {
    graph: G,
    machine: Mutex<SwapMachine<G::Element>>,
    requests: Arc<dyn RequestSink>,
}

impl<G: SwapGraph> HotSwap<G> {
    /// `initial` must already be linked into the slot of `graph`.
    pub fn new(
        graph: G,
        initial: G::Element,
        pool: CandidatePool<G::Element>,
        policy: ExhaustionPolicy,
        requests: Arc<dyn RequestSink>,
    ) -> Self {
        debug!(
            "Hot-swap slot starts with '{}', {} candidate(s)",
            graph.element_name(&initial),
            pool.len()
        );
        Self {
            inner: Arc::new(Inner {
                graph,
                machine: Mutex::new(SwapMachine::new(initial, pool, policy)),
                requests,
            }),
        }
    }

    pub fn graph(&self) -> &G {
        &self.inner.graph
    }

    pub fn phase(&self) -> SwapPhase {
        self.inner.machine.lock().phase()
    }

    /// The element currently linked into the slot.
    pub fn current(&self) -> G::Element {
        self.inner.machine.lock().current().clone()
    }

    pub fn status(&self) -> SwapStatus {
        let (phase, current, swaps_completed) = {
            let machine = self.inner.machine.lock();
            (machine.phase(), machine.current().clone(), machine.swaps_completed())
        };
        SwapStatus {
            phase,
            current: self.inner.graph.element_name(&current),
            swaps_completed,
        }
    }

    /// Names of the candidates, in the order `SwapTarget::Index` addresses them.
    pub fn catalog(&self) -> Vec<String> {
        let elements = self.inner.machine.lock().pool().elements();
        elements
            .iter()
            .map(|element| self.inner.graph.element_name(element))
            .collect()
    }

    /// Start a swap cycle. Must be called from the control thread.
    ///
    /// Returns the action the request resolved to. The rest of the cycle runs
    /// from probe callbacks.
    pub fn request(&self, target: SwapTarget) -> Result<SwapAction<G::Element>, SwapError> {
        self.inner.handle(SwapEvent::UserRequestedSwap(target))
    }

    /// Stop accepting swap requests.
    pub fn halt(&self) {
        self.inner.machine.lock().halt();
    }
}

impl<G: SwapGraph> Inner<G> {
    fn handle(self: &Arc<Self>, event: SwapEvent) -> Result<SwapAction<G::Element>, SwapError> {
        let action = self.machine.lock().advance(&event);
        self.execute(action.clone())?;
        Ok(action)
    }

    /// Entry point for probe callbacks. Failures here cannot be returned to
    /// anyone, so they turn into a quit request for the control thread.
    fn on_probe(self: &Arc<Self>, event: SwapEvent) {
        if let Err(err) = self.handle(event) {
            error!("Hot-swap failed: {}", err);
            self.machine.lock().halt();
            self.requests.post(AppRequest::Quit);
        }
    }

    fn probe_callback(self: &Arc<Self>, event: SwapEvent) -> super::ProbeCallback {
        let weak: Weak<Self> = Arc::downgrade(self);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_probe(event);
            }
        })
    }

    fn execute(self: &Arc<Self>, action: SwapAction<G::Element>) -> Result<(), SwapError> {
        match action {
            SwapAction::InstallBlock => {
                let on_blocked = self.probe_callback(SwapEvent::PadBlocked);
                if let Err(err) = self.graph.block_upstream(on_blocked) {
                    self.machine.lock().abort_cycle();
                    return Err(err);
                }
            }
            SwapAction::Drain { outgoing } => {
                debug!("Draining '{}'", self.graph.element_name(&outgoing));
                let on_drained = self.probe_callback(SwapEvent::DrainComplete);
                if let Err(err) = self.graph.drain(&outgoing, on_drained) {
                    self.machine.lock().abort_cycle();
                    return Err(err);
                }
            }
            SwapAction::Commit { outgoing, incoming } => {
                info!(
                    "Switching from '{}' to '{}'",
                    self.graph.element_name(&outgoing),
                    self.graph.element_name(&incoming)
                );
                if let Err(err) = self.replace(&outgoing, &incoming) {
                    self.machine.lock().abort_cycle();
                    return Err(err);
                }
                self.machine.lock().finish_commit();
            }
            SwapAction::RequestShutdown => {
                self.requests.post(AppRequest::Quit);
            }
            SwapAction::Ignore(reason) => {
                debug!("Swap event ignored: {:?}", reason);
            }
        }
        Ok(())
    }

    fn replace(&self, outgoing: &G::Element, incoming: &G::Element) -> Result<(), SwapError> {
        self.graph.deactivate(outgoing)?;
        self.graph.detach(outgoing)?;
        self.graph.attach(incoming)?;
        self.graph.activate(incoming)?;
        Ok(())
    }
}
