//! Candidate elements a swap can bring in.

use hotswap_types::SwapTarget;
use std::collections::VecDeque;
use tracing::warn;

/// Result of looking up a swap target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<E> {
    /// Swap this element in.
    Candidate(E),
    /// Nothing left to swap to.
    Exhausted,
    /// The target is the element already in the pipeline.
    Unchanged,
    /// The requested index does not exist.
    OutOfRange(usize),
}

/// The pool of elements not currently doing the work.
#[derive(Debug, Clone)]
pub enum CandidatePool<E> {
    /// FIFO rotation: the head comes in, the outgoing element goes to the tail.
    Rotating(VecDeque<E>),
    /// Fixed catalog addressed by index, the current element included.
    Indexed(Vec<E>),
}

impl<E: Clone + PartialEq> CandidatePool<E> {
    pub fn rotating(candidates: impl IntoIterator<Item = E>) -> Self {
        Self::Rotating(candidates.into_iter().collect())
    }

    pub fn indexed(candidates: impl IntoIterator<Item = E>) -> Self {
        Self::Indexed(candidates.into_iter().collect())
    }

    /// Build a pool from factory names, skipping the ones `make` cannot create.
    pub fn from_factories<F>(names: &[String], rotating: bool, mut make: F) -> Self
    where
        F: FnMut(&str) -> Option<E>,
    {
        let elements = names.iter().filter_map(|name| {
            let element = make(name);
            if element.is_none() {
                warn!("Skipping candidate '{}': element could not be created", name);
            }
            element
        });

        if rotating {
            Self::rotating(elements)
        } else {
            Self::indexed(elements)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Rotating(queue) => queue.len(),
            Self::Indexed(slots) => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The candidates in index order.
    pub fn elements(&self) -> Vec<E> {
        match self {
            Self::Rotating(queue) => queue.iter().cloned().collect(),
            Self::Indexed(slots) => slots.clone(),
        }
    }

    /// Remove the element that starts out in the pipeline.
    ///
    /// A rotating pool hands out its head; an indexed catalog keeps every
    /// slot and returns a copy of the first one.
    pub fn take_initial(&mut self) -> Option<E> {
        match self {
            Self::Rotating(queue) => queue.pop_front(),
            Self::Indexed(slots) => slots.first().cloned(),
        }
    }

    /// Look up what `target` refers to, given the element currently in place.
    ///
    /// This does not modify the pool; [`CandidatePool::commit`] does the
    /// bookkeeping once the swap actually happened.
    pub fn select(&self, target: SwapTarget, current: &E) -> Selection<E> {
        match (self, target) {
            (Self::Rotating(queue), SwapTarget::Next) => match queue.front() {
                Some(next) => Selection::Candidate(next.clone()),
                None => Selection::Exhausted,
            },
            (Self::Rotating(queue), SwapTarget::Index(index)) => {
                if queue.is_empty() {
                    return Selection::Exhausted;
                }
                match queue.get(index) {
                    Some(next) => Selection::Candidate(next.clone()),
                    None => Selection::OutOfRange(index),
                }
            }
            (Self::Indexed(slots), SwapTarget::Index(index)) => {
                if slots.is_empty() {
                    return Selection::Exhausted;
                }
                match slots.get(index) {
                    Some(slot) if slot == current => Selection::Unchanged,
                    Some(slot) => Selection::Candidate(slot.clone()),
                    None => Selection::OutOfRange(index),
                }
            }
            (Self::Indexed(slots), SwapTarget::Next) => {
                if slots.is_empty() {
                    return Selection::Exhausted;
                }
                let next = match slots.iter().position(|slot| slot == current) {
                    Some(position) => (position + 1) % slots.len(),
                    None => 0,
                };
                if &slots[next] == current {
                    Selection::Exhausted
                } else {
                    Selection::Candidate(slots[next].clone())
                }
            }
        }
    }

    /// Record that `incoming` replaced `outgoing` in the pipeline.
    pub fn commit(&mut self, outgoing: E, incoming: &E) {
        if let Self::Rotating(queue) = self {
            if let Some(position) = queue.iter().position(|candidate| candidate == incoming) {
                queue.remove(position);
            }
            queue.push_back(outgoing);
        }
    }
}
