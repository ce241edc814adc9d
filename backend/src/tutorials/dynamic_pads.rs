//! Basic tutorial 3: link `uridecodebin` pads as they appear.

use super::report_error;
use crate::gst::{link_chain, make_element, pipeline_state, set_state, PipelineError};
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// Classify a caps structure name by its raw media prefix.
pub fn classify_caps(name: &str) -> Option<MediaKind> {
    if name.starts_with("audio/x-raw") {
        Some(MediaKind::Audio)
    } else if name.starts_with("video/x-raw") {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// What happened to a freshly added pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PadOutcome {
    Linked(MediaKind),
    AlreadyLinked(MediaKind),
    /// Not raw audio or video; the caps name is kept for the log
    Ignored(String),
    LinkFailed(MediaKind),
}

/// Entry points of the audio and video branches.
#[derive(Debug, Clone)]
pub struct Branches {
    audio: gst::Element,
    video: gst::Element,
}

impl Branches {
    fn sink_for(&self, kind: MediaKind) -> &gst::Element {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }

    /// Link `new_pad` to the branch matching its caps.
    pub fn link_pad(&self, new_pad: &gst::Pad) -> PadOutcome {
        let caps = new_pad
            .current_caps()
            .unwrap_or_else(|| new_pad.query_caps(None));
        let name = caps
            .structure(0)
            .map(|s| s.name().to_string())
            .unwrap_or_default();

        let Some(kind) = classify_caps(&name) else {
            return PadOutcome::Ignored(name);
        };

        let Some(sink_pad) = self.sink_for(kind).static_pad("sink") else {
            return PadOutcome::LinkFailed(kind);
        };
        if sink_pad.is_linked() {
            return PadOutcome::AlreadyLinked(kind);
        }

        match new_pad.link(&sink_pad) {
            Ok(_) => PadOutcome::Linked(kind),
            Err(_) => PadOutcome::LinkFailed(kind),
        }
    }
}

/// `uridecodebin uri=U` plus unlinked audio and video branches.
pub fn build(uri: &str) -> Result<(gst::Pipeline, Branches), PipelineError> {
    let source = make_element("uridecodebin", Some("source"))?;
    let audioconvert = make_element("audioconvert", Some("audioconvert"))?;
    let resample = make_element("audioresample", Some("resample"))?;
    let audiosink = make_element("autoaudiosink", Some("audiosink"))?;
    let videoconvert = make_element("videoconvert", Some("videoconvert"))?;
    let videosink = make_element("autovideosink", Some("videosink"))?;

    let pipeline = gst::Pipeline::with_name("test-pipeline");
    pipeline.add_many([
        &source,
        &audioconvert,
        &resample,
        &audiosink,
        &videoconvert,
        &videosink,
    ])?;
    link_chain(&[&audioconvert, &resample, &audiosink])?;
    link_chain(&[&videoconvert, &videosink])?;

    source.set_property("uri", uri);

    let branches = Branches {
        audio: audioconvert,
        video: videoconvert,
    };

    let pad_branches = branches.clone();
    source.connect_pad_added(move |src, new_pad| {
        info!("Received new pad '{}' from '{}'", new_pad.name(), src.name());
        match pad_branches.link_pad(new_pad) {
            PadOutcome::Linked(kind) => info!("Link succeeded ({:?})", kind),
            PadOutcome::AlreadyLinked(kind) => info!("{:?} branch is already linked. Ignoring.", kind),
            PadOutcome::Ignored(name) => info!("It has type '{}' which is not raw audio or video. Ignoring.", name),
            PadOutcome::LinkFailed(kind) => warn!("Type is {:?} but link failed.", kind),
        }
    });

    Ok((pipeline, branches))
}

/// Play until error or end of stream, logging pipeline state changes.
pub fn run(uri: &str) -> anyhow::Result<()> {
    let (pipeline, _branches) = build(uri)?;
    let bus = pipeline.bus().ok_or(PipelineError::NoBus)?;

    set_state(&pipeline, gst::State::Playing)?;

    let mut result = Ok(());
    for msg in bus.iter_timed_filtered(
        gst::ClockTime::NONE,
        &[
            gst::MessageType::Error,
            gst::MessageType::Eos,
            gst::MessageType::StateChanged,
        ],
    ) {
        match msg.view() {
            gst::MessageView::Error(err) => {
                result = Err(report_error(err));
                break;
            }
            gst::MessageView::Eos(_) => {
                info!("End-Of-Stream reached.");
                break;
            }
            gst::MessageView::StateChanged(state_changed) => {
                if state_changed.src() == Some(pipeline.upcast_ref::<gst::Object>()) {
                    info!(
                        "Pipeline state changed from {} to {}",
                        pipeline_state(state_changed.old()),
                        pipeline_state(state_changed.current())
                    );
                }
            }
            _ => error!("Unexpected message received."),
        }
    }

    set_state(&pipeline, gst::State::Null)?;
    result
}
