//! Basic tutorial 4: position and duration queries, and a one-off seek.

use super::report_error;
use crate::gst::{make_element, pipeline_state, set_state, PipelineError};
use gstreamer as gst;
use gstreamer::prelude::*;
use hotswap_types::PipelineState;
use std::time::Duration;
use tracing::{info, warn};

/// How often position is refreshed while playing.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);
/// Position past which the one seek happens.
pub const SEEK_AFTER: gst::ClockTime = gst::ClockTime::from_seconds(10);
/// Where the seek goes.
pub const SEEK_TARGET: gst::ClockTime = gst::ClockTime::from_seconds(30);

/// Playback bookkeeping between bus messages and refresh ticks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    pub playing: bool,
    pub seek_enabled: bool,
    pub seek_done: bool,
    pub duration: Option<gst::ClockTime>,
}

impl PlaybackState {
    /// Record a pipeline state change. Returns `true` when playback just started
    /// and the seeking capabilities should be queried.
    pub fn on_state_changed(&mut self, new: PipelineState) -> bool {
        let was_playing = self.playing;
        self.playing = new == PipelineState::Playing;
        self.playing && !was_playing
    }

    /// A DURATION_CHANGED message makes the cached duration stale.
    pub fn invalidate_duration(&mut self) {
        self.duration = None;
    }

    /// Decide on the refresh tick whether to seek. Seeks at most once.
    pub fn seek_target(&mut self, position: Option<gst::ClockTime>) -> Option<gst::ClockTime> {
        if !self.playing || !self.seek_enabled || self.seek_done {
            return None;
        }
        match position {
            Some(position) if position > SEEK_AFTER => {
                self.seek_done = true;
                Some(SEEK_TARGET)
            }
            _ => None,
        }
    }
}

pub fn build(uri: &str) -> Result<gst::Element, PipelineError> {
    let playbin = make_element("playbin", Some("playbin"))?;
    playbin.set_property("uri", uri);
    Ok(playbin)
}

fn query_seeking(playbin: &gst::Element, state: &mut PlaybackState) {
    let mut query = gst::query::Seeking::new(gst::Format::Time);
    if playbin.query(&mut query) {
        let (seekable, start, end) = query.result();
        state.seek_enabled = seekable;
        if seekable {
            info!("Seeking is ENABLED from {} to {}", start, end);
        } else {
            info!("Seeking is DISABLED for this stream.");
        }
    } else {
        warn!("Seeking query failed.");
    }
}

fn refresh(playbin: &gst::Element, state: &mut PlaybackState) -> Result<(), PipelineError> {
    let Some(position) = playbin.query_position::<gst::ClockTime>() else {
        warn!("Could not query current position.");
        return Ok(());
    };

    if state.duration.is_none() {
        state.duration = playbin.query_duration::<gst::ClockTime>();
        if state.duration.is_none() {
            warn!("Could not query current duration.");
        }
    }

    info!("Position {} / {}", position, state.duration.display());

    if let Some(target) = state.seek_target(Some(position)) {
        info!("Reached 10s, performing seek...");
        playbin.seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)?;
    }
    Ok(())
}

/// Play `uri`, refreshing position every [`REFRESH_INTERVAL`].
pub fn run(uri: &str) -> anyhow::Result<()> {
    let playbin = build(uri)?;
    let bus = playbin.bus().ok_or(PipelineError::NoBus)?;
    let pipeline = playbin
        .clone()
        .downcast::<gst::Pipeline>()
        .map_err(|_| PipelineError::ElementCreation("playbin is not a pipeline".to_string()))?;

    set_state(&pipeline, gst::State::Playing)?;

    let mut state = PlaybackState::default();
    let timeout = gst::ClockTime::from_mseconds(REFRESH_INTERVAL.as_millis() as u64);
    let result = loop {
        let msg = bus.timed_pop_filtered(
            timeout,
            &[
                gst::MessageType::StateChanged,
                gst::MessageType::Error,
                gst::MessageType::Eos,
                gst::MessageType::DurationChanged,
            ],
        );

        let Some(msg) = msg else {
            if state.playing {
                refresh(&playbin, &mut state)?;
            }
            continue;
        };

        match msg.view() {
            gst::MessageView::Error(err) => break Err(report_error(err)),
            gst::MessageView::Eos(_) => {
                info!("End-Of-Stream reached.");
                break Ok(());
            }
            gst::MessageView::DurationChanged(_) => state.invalidate_duration(),
            gst::MessageView::StateChanged(state_changed) => {
                if state_changed.src() == Some(playbin.upcast_ref::<gst::Object>()) {
                    let new = pipeline_state(state_changed.current());
                    info!(
                        "Pipeline state changed from {} to {}",
                        pipeline_state(state_changed.old()),
                        new
                    );
                    if state.on_state_changed(new) {
                        query_seeking(&playbin, &mut state);
                    }
                }
            }
            _ => warn!("Unexpected message received."),
        }
    };

    set_state(&pipeline, gst::State::Null)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_happens_once_past_ten_seconds() {
        let mut state = PlaybackState::default();
        assert!(state.on_state_changed(PipelineState::Playing));
        state.seek_enabled = true;

        assert_eq!(state.seek_target(Some(gst::ClockTime::from_seconds(5))), None);
        assert_eq!(state.seek_target(Some(SEEK_AFTER)), None);
        assert_eq!(
            state.seek_target(Some(gst::ClockTime::from_mseconds(10_100))),
            Some(SEEK_TARGET)
        );
        assert_eq!(state.seek_target(Some(gst::ClockTime::from_seconds(31))), None);
        assert!(state.seek_done);
    }

    #[test]
    fn test_no_seek_when_disabled_or_paused() {
        let mut state = PlaybackState::default();
        state.on_state_changed(PipelineState::Playing);
        assert_eq!(state.seek_target(Some(gst::ClockTime::from_seconds(20))), None);

        state.seek_enabled = true;
        assert!(!state.on_state_changed(PipelineState::Paused));
        assert_eq!(state.seek_target(Some(gst::ClockTime::from_seconds(20))), None);
        assert!(!state.seek_done);
    }

    #[test]
    fn test_state_changes_and_duration() {
        let mut state = PlaybackState {
            duration: Some(gst::ClockTime::from_seconds(52)),
            ..Default::default()
        };
        assert!(state.on_state_changed(PipelineState::Playing));
        // Already playing, no second seeking query
        assert!(!state.on_state_changed(PipelineState::Playing));

        state.invalidate_duration();
        assert_eq!(state.duration, None);
    }
}
