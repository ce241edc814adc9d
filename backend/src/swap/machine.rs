//! Hot-swap state machine.
//!
//! The machine decides what the driver does next. It never calls into the
//! pipeline itself, so it can be held under a lock that graph operations
//! (and the probes they fire synchronously) never need.

use super::pool::{CandidatePool, Selection};
use hotswap_types::{SwapEvent, SwapPhase, SwapTarget};
use tracing::{debug, info, warn};

/// What to do when a rotation request finds nothing to swap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Ask the control thread to stop the application.
    #[default]
    Shutdown,
    /// Log and keep running with the current element.
    Ignore,
}

/// Why an event did not advance the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A cycle is already in progress.
    Busy(SwapPhase),
    /// The requested element is already in place.
    Unchanged,
    /// The requested catalog slot does not exist.
    OutOfRange(usize),
    /// Nothing left to swap to.
    Exhausted,
    /// A probe event arrived in a phase that does not expect it.
    Unexpected(SwapPhase),
    /// A pipeline error stopped the machinery.
    Halted,
}

/// Next step for the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapAction<E> {
    /// Install the upstream blocking probe.
    InstallBlock,
    /// Install the EOS probe on `outgoing` and send it an EOS.
    Drain { outgoing: E },
    /// Replace `outgoing` with `incoming`, then call [`SwapMachine::finish_commit`].
    Commit { outgoing: E, incoming: E },
    /// Post a quit request to the control thread.
    RequestShutdown,
    /// Nothing to do.
    Ignore(IgnoreReason),
}

#[derive(Debug)]
pub struct SwapMachine<E> {
    phase: SwapPhase,
    current: E,
    pending: Option<E>,
    pool: CandidatePool<E>,
    policy: ExhaustionPolicy,
    swaps_completed: u64,
    halted: bool,
}

impl<E: Clone + PartialEq + std::fmt::Debug> SwapMachine<E> {
    pub fn new(current: E, pool: CandidatePool<E>, policy: ExhaustionPolicy) -> Self {
        Self {
            phase: SwapPhase::Flowing,
            current,
            pending: None,
            pool,
            policy,
            swaps_completed: 0,
            halted: false,
        }
    }

    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    pub fn current(&self) -> &E {
        &self.current
    }

    pub fn pending(&self) -> Option<&E> {
        self.pending.as_ref()
    }

    pub fn pool(&self) -> &CandidatePool<E> {
        &self.pool
    }

    pub fn swaps_completed(&self) -> u64 {
        self.swaps_completed
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Feed one event into the machine.
    pub fn advance(&mut self, event: &SwapEvent) -> SwapAction<E> {
        match event {
            SwapEvent::UserRequestedSwap(target) => self.request(*target),
            SwapEvent::PadBlocked => {
                if self.phase != SwapPhase::BlockingRequested {
                    return self.unexpected(event);
                }
                self.phase = SwapPhase::BlockedDraining;
                SwapAction::Drain {
                    outgoing: self.current.clone(),
                }
            }
            SwapEvent::DrainComplete => {
                if self.phase != SwapPhase::BlockedDraining {
                    return self.unexpected(event);
                }
                let Some(incoming) = self.pending.clone() else {
                    return self.unexpected(event);
                };
                self.phase = SwapPhase::Swapping;
                SwapAction::Commit {
                    outgoing: self.current.clone(),
                    incoming,
                }
            }
            SwapEvent::PipelineError { .. } => {
                self.halt();
                SwapAction::Ignore(IgnoreReason::Halted)
            }
        }
    }

    /// Refuse every further request. Used after pipeline errors and failed commits.
    pub fn halt(&mut self) {
        if !self.halted {
            warn!("Stopping hot-swap machinery in phase {}", self.phase);
        }
        self.halted = true;
    }

    fn request(&mut self, target: SwapTarget) -> SwapAction<E> {
        if self.halted {
            return SwapAction::Ignore(IgnoreReason::Halted);
        }
        if !self.phase.accepts_requests() {
            debug!("Ignoring swap request ({}) while {}", target, self.phase);
            return SwapAction::Ignore(IgnoreReason::Busy(self.phase));
        }

        match self.pool.select(target, &self.current) {
            Selection::Candidate(incoming) => {
                self.pending = Some(incoming);
                self.phase = SwapPhase::BlockingRequested;
                SwapAction::InstallBlock
            }
            Selection::Unchanged => {
                debug!("Swap target {} is already in place", target);
                SwapAction::Ignore(IgnoreReason::Unchanged)
            }
            Selection::OutOfRange(index) => {
                warn!("No candidate at index {} ({} available)", index, self.pool.len());
                SwapAction::Ignore(IgnoreReason::OutOfRange(index))
            }
            Selection::Exhausted => match self.policy {
                ExhaustionPolicy::Shutdown => {
                    info!("No more candidates, shutting down");
                    SwapAction::RequestShutdown
                }
                ExhaustionPolicy::Ignore => {
                    warn!("No candidate to swap to, keeping the current element");
                    SwapAction::Ignore(IgnoreReason::Exhausted)
                }
            },
        }
    }

    fn unexpected(&self, event: &SwapEvent) -> SwapAction<E> {
        warn!("Unexpected '{}' while {}", event.description(), self.phase);
        SwapAction::Ignore(IgnoreReason::Unexpected(self.phase))
    }

    /// The replacement finished: the pending element is now current.
    pub fn finish_commit(&mut self) {
        if self.phase != SwapPhase::Swapping {
            warn!("finish_commit called while {}", self.phase);
            return;
        }
        if let Some(incoming) = self.pending.take() {
            let outgoing = std::mem::replace(&mut self.current, incoming);
            self.pool.commit(outgoing, &self.current);
            self.swaps_completed += 1;
        }
        self.phase = SwapPhase::Flowing;
    }

    /// Abandon the cycle in progress and return to `Flowing` with the current
    /// element unchanged.
    pub fn abort_cycle(&mut self) {
        if self.phase != SwapPhase::Flowing {
            debug!("Aborting swap cycle in phase {}", self.phase);
        }
        self.pending = None;
        self.phase = SwapPhase::Flowing;
    }
}
