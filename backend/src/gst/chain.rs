//! Linear swap pipelines.
//!
//! Every preset builds
//! `source -> [caps] -> queue -> convert -> SLOT -> convert -> queue -> sink`.
//! The first queue's source pad is where the blocking probe goes: the queue
//! decouples the source thread, so blocking its output only stalls the
//! streaming thread that feeds the slot.

use super::{link_chain, make_candidate, make_element, set_state, BusPoster, GstSwapGraph, PipelineError};
use crate::config::PipelineConfig;
use crate::swap::{CandidatePool, ExhaustionPolicy, HotSwap, SwapController, SwapError};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_video::{VideoCapsBuilder, VideoFormat};
use hotswap_types::{parse_effect_list, RequestSink};
use std::sync::Arc;
use tracing::{debug, info};

/// Raw YUV formats the video effects are offered.
const YUV_FORMATS: [VideoFormat; 18] = [
    VideoFormat::I420,
    VideoFormat::Yv12,
    VideoFormat::Yuy2,
    VideoFormat::Uyvy,
    VideoFormat::Ayuv,
    VideoFormat::Y41b,
    VideoFormat::Y42b,
    VideoFormat::Yvyu,
    VideoFormat::Y444,
    VideoFormat::V210,
    VideoFormat::V216,
    VideoFormat::Nv12,
    VideoFormat::Nv21,
    VideoFormat::Uyvp,
    VideoFormat::A420,
    VideoFormat::Yuv9,
    VideoFormat::Yvu9,
    VideoFormat::Iyu1,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPreset {
    /// Test video through a video effect.
    VideoEffects,
    /// Audio through a visualizer producing video.
    AudioVisualizer,
}

impl ChainPreset {
    fn converters(self) -> (&'static str, &'static str) {
        match self {
            ChainPreset::VideoEffects => ("videoconvert", "videoconvert"),
            ChainPreset::AudioVisualizer => ("audioconvert", "videoconvert"),
        }
    }
}

/// Everything needed to build a swap pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSpec {
    pub preset: ChainPreset,
    pub source: String,
    pub sink: String,
    pub width: u32,
    pub height: u32,
    /// Candidate factory names; the first one that can be created starts in the slot
    pub candidates: Vec<String>,
    /// Rotating queue instead of a fixed catalog
    pub rotating: bool,
    pub policy: ExhaustionPolicy,
}

impl ChainSpec {
    /// Timer or button driven rotation through video effects.
    pub fn video_effects(config: &PipelineConfig, policy: ExhaustionPolicy) -> Self {
        Self {
            preset: ChainPreset::VideoEffects,
            source: "videotestsrc".to_string(),
            sink: config.sink.clone(),
            width: config.width,
            height: config.height,
            candidates: parse_effect_list(&config.effects),
            rotating: true,
            policy,
        }
    }

    /// Button-per-visualizer catalog.
    pub fn audio_visualizer(config: &PipelineConfig) -> Self {
        Self {
            preset: ChainPreset::AudioVisualizer,
            source: config.source.clone(),
            sink: config.sink.clone(),
            width: config.width,
            height: config.height,
            candidates: parse_effect_list(&config.visualizers),
            rotating: false,
            policy: ExhaustionPolicy::Ignore,
        }
    }

    /// Visualizers taken in turn, like the video effect rotation.
    pub fn rotating_visualizers(config: &PipelineConfig, policy: ExhaustionPolicy) -> Self {
        Self {
            rotating: true,
            policy,
            ..Self::audio_visualizer(config)
        }
    }

    fn caps(&self) -> gst::Caps {
        VideoCapsBuilder::new()
            .width(self.width as i32)
            .height(self.height as i32)
            .format_list(YUV_FORMATS)
            .build()
    }
}

/// A running-ready pipeline with a hot-swappable slot.
pub struct SwapPipeline {
    pipeline: gst::Pipeline,
    hotswap: HotSwap<GstSwapGraph>,
}

impl SwapPipeline {
    /// Build the pipeline; swap requests from streaming threads go to its bus.
    pub fn build(spec: &ChainSpec) -> Result<Self, PipelineError> {
        let pipeline = gst::Pipeline::with_name("pipeline");
        let poster = BusPoster::new(&pipeline);
        Self::build_with_sink(spec, pipeline, Arc::new(poster))
    }

    pub fn build_with_sink(
        spec: &ChainSpec,
        pipeline: gst::Pipeline,
        requests: Arc<dyn RequestSink>,
    ) -> Result<Self, PipelineError> {
        let mut pool = CandidatePool::from_factories(&spec.candidates, spec.rotating, make_candidate);
        let initial = pool.take_initial().ok_or(SwapError::NoCandidates)?;
        info!(
            "Starting with '{}', {} candidate(s) in the pool",
            initial.factory().map(|f| f.name().to_string()).unwrap_or_default(),
            pool.len()
        );

        let source = make_element(&spec.source, Some("source"))?;
        if source.has_property("is-live") {
            source.set_property("is-live", true);
            debug!("Enabled is-live on source {}", spec.source);
        }

        let capsfilter = match spec.preset {
            ChainPreset::VideoEffects => {
                let filter = make_element("capsfilter", Some("caps"))?;
                filter.set_property("caps", spec.caps());
                Some(filter)
            }
            ChainPreset::AudioVisualizer => None,
        };

        let (before_factory, after_factory) = spec.preset.converters();
        let block_queue = make_element("queue", Some("block_queue"))?;
        let before = make_element(before_factory, Some("convert_before"))?;
        let after = make_element(after_factory, Some("convert_after"))?;
        let output_queue = make_element("queue", Some("output_queue"))?;
        let sink = make_element(&spec.sink, Some("sink"))?;

        let mut chain: Vec<&gst::Element> = vec![&source];
        chain.extend(capsfilter.as_ref());
        chain.extend([&block_queue, &before, &initial, &after, &output_queue, &sink]);

        pipeline.add_many(chain.iter().copied())?;
        link_chain(&chain)?;

        let block_pad = block_queue
            .static_pad("src")
            .ok_or_else(|| PipelineError::PadNotFound {
                element: block_queue.name().to_string(),
                pad: "src".to_string(),
            })?;

        let graph = GstSwapGraph::new(pipeline.clone(), block_pad, before, after);
        let hotswap = HotSwap::new(graph, initial, pool, spec.policy, requests);

        Ok(Self { pipeline, hotswap })
    }

    pub fn pipeline(&self) -> &gst::Pipeline {
        &self.pipeline
    }

    pub fn hotswap(&self) -> &HotSwap<GstSwapGraph> {
        &self.hotswap
    }

    pub fn play(&self) -> Result<(), PipelineError> {
        info!("Setting pipeline to PLAYING");
        set_state(&self.pipeline, gst::State::Playing)
    }

    /// Hand the pipeline to a control-thread controller.
    pub fn into_controller(self) -> SwapController<GstSwapGraph> {
        SwapController::new(self.hotswap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotswap_types::AppRequest;

    fn spec(candidates: &[&str]) -> ChainSpec {
        ChainSpec {
            preset: ChainPreset::VideoEffects,
            source: "videotestsrc".to_string(),
            sink: "fakesink".to_string(),
            width: 320,
            height: 240,
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
            rotating: true,
            policy: ExhaustionPolicy::Shutdown,
        }
    }

    fn null_sink() -> Arc<dyn RequestSink> {
        Arc::new(|_request: AppRequest| {})
    }

    #[test]
    fn test_presets_from_config() {
        let config = PipelineConfig::default();

        let video = ChainSpec::video_effects(&config, ExhaustionPolicy::Shutdown);
        assert_eq!(video.candidates.len(), 9);
        assert!(video.rotating);

        let audio = ChainSpec::audio_visualizer(&config);
        assert_eq!(audio.candidates, vec!["spacescope", "spectrascope", "synaescope", "wavescope"]);
        assert!(!audio.rotating);
        assert_eq!(audio.policy, ExhaustionPolicy::Ignore);
        assert_eq!(audio.preset.converters(), ("audioconvert", "videoconvert"));

        let rotating = ChainSpec::rotating_visualizers(&config, ExhaustionPolicy::Ignore);
        assert_eq!(rotating.preset, ChainPreset::AudioVisualizer);
        assert_eq!(rotating.candidates, audio.candidates);
        assert_eq!(rotating.source, config.source);
        assert!(rotating.rotating);
        assert_eq!(rotating.policy, ExhaustionPolicy::Ignore);
    }

    #[test]
    fn test_video_caps() {
        gst::init().unwrap();
        let caps = spec(&["identity"]).caps();
        let structure = caps.structure(0).unwrap();
        assert_eq!(structure.name().as_str(), "video/x-raw");
        assert_eq!(structure.get::<i32>("width").unwrap(), 320);
        assert_eq!(structure.get::<gst::List>("format").unwrap().as_slice().len(), YUV_FORMATS.len());
    }

    #[test]
    fn test_build_links_the_chain() {
        gst::init().unwrap();

        let swap = SwapPipeline::build_with_sink(
            &spec(&["identity", "nonexistent_element_xyz", "identity"]),
            gst::Pipeline::with_name("chain"),
            null_sink(),
        )
        .unwrap();

        // source, caps, 2 queues, 2 converters, slot, sink
        assert_eq!(swap.pipeline().children().len(), 8);
        let status = swap.hotswap().status();
        assert_eq!(status.current, "identity");
        assert_eq!(status.swaps_completed, 0);

        let before = swap.pipeline().by_name("convert_before").unwrap();
        let peer = before.static_pad("src").unwrap().peer().unwrap();
        assert_eq!(peer.parent_element().unwrap(), swap.hotswap().current());
    }

    #[test]
    fn test_build_without_candidates_fails() {
        gst::init().unwrap();

        let result = SwapPipeline::build_with_sink(
            &spec(&["nonexistent_element_xyz"]),
            gst::Pipeline::new(),
            null_sink(),
        );
        assert!(matches!(result, Err(PipelineError::Swap(SwapError::NoCandidates))));
    }

    #[test]
    fn test_build_with_missing_sink_fails() {
        gst::init().unwrap();

        let mut spec = spec(&["identity"]);
        spec.sink = "nonexistent_sink_xyz".to_string();
        let result = SwapPipeline::build_with_sink(&spec, gst::Pipeline::new(), null_sink());
        assert!(matches!(result, Err(PipelineError::ElementCreation(_))));
    }
}
