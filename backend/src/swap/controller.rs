//! Control-thread side of the hot-swap machinery.
//!
//! Probe callbacks and widgets post [`AppRequest`]s; the bus, a channel or a
//! GUI frame hands them to [`SwapController::handle`] on the thread that
//! created the controller. The controller is deliberately `!Send`, so it
//! cannot be moved into a streaming-thread callback.

use super::{HotSwap, SwapGraph};
use hotswap_types::{AppRequest, LoopAction, PipelineState, SwapEvent, SwapStatus};
use std::marker::PhantomData;
use tracing::{debug, error, info, warn};

/// Everything the control loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Request(AppRequest),
    Swap(SwapEvent),
    EndOfStream,
    StateChanged {
        old: PipelineState,
        new: PipelineState,
    },
}

pub struct SwapController<G: SwapGraph> {
    hotswap: HotSwap<G>,
    running: bool,
    failed: bool,
    _control_thread: PhantomData<*const ()>,
}

impl<G: SwapGraph> SwapController<G> {
    pub fn new(hotswap: HotSwap<G>) -> Self {
        Self {
            hotswap,
            running: true,
            failed: false,
            _control_thread: PhantomData,
        }
    }

    pub fn hotswap(&self) -> &HotSwap<G> {
        &self.hotswap
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the loop stopped because of an error.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn status(&self) -> SwapStatus {
        self.hotswap.status()
    }

    pub fn dispatch(&mut self, request: AppRequest) -> LoopAction {
        if !self.running {
            return LoopAction::Quit;
        }
        match request {
            AppRequest::Swap(target) => {
                if let Err(err) = self.hotswap.request(target) {
                    error!("Failed to start swap ({}): {}", target, err);
                }
                LoopAction::Continue
            }
            AppRequest::Quit => self.shutdown(),
        }
    }

    pub fn handle(&mut self, event: ControlEvent) -> LoopAction {
        match event {
            ControlEvent::Request(request) => self.dispatch(request),
            ControlEvent::Swap(event @ SwapEvent::PipelineError { .. }) => {
                error!("{}", event.description());
                if let SwapEvent::PipelineError { debug: Some(ref info), .. } = event {
                    error!("Debugging information: {}", info);
                }
                self.hotswap.halt();
                self.failed = true;
                self.shutdown()
            }
            ControlEvent::Swap(event) => {
                warn!("Ignoring '{}' outside a probe", event.description());
                LoopAction::Continue
            }
            ControlEvent::EndOfStream => {
                info!("End-Of-Stream reached");
                self.shutdown()
            }
            ControlEvent::StateChanged { old, new } => {
                debug!("Pipeline state changed from {} to {}", old, new);
                LoopAction::Continue
            }
        }
    }

    /// Stop the pipeline. Safe to call more than once.
    pub fn shutdown(&mut self) -> LoopAction {
        if self.running {
            self.running = false;
            info!("Shutting down pipeline");
            self.hotswap.halt();
            if let Err(err) = self.hotswap.graph().stop() {
                warn!("Failed to stop pipeline: {}", err);
            }
        }
        LoopAction::Quit
    }
}
