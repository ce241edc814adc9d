//! Basic tutorial 2: build a pipeline by hand and wait for it to finish.

use super::report_error;
use crate::gst::{link_chain, make_element, set_state, PipelineError};
use gstreamer as gst;
use gstreamer::glib;
use gstreamer::prelude::*;
use tracing::{info, warn};

/// `videotestsrc pattern=P ! vertigotv ! videoconvert ! autovideosink`
pub fn build(pattern: &str, sink: &str) -> Result<gst::Pipeline, PipelineError> {
    let source = make_element("videotestsrc", Some("source"))?;
    let effect = make_element("vertigotv", Some("effect"))?;
    let convert = make_element("videoconvert", Some("convert"))?;
    let sink = make_element(sink, Some("sink"))?;

    set_enum_property(&source, "pattern", pattern)?;

    let pipeline = gst::Pipeline::with_name("test-pipeline");
    pipeline.add_many([&source, &effect, &convert, &sink])?;
    link_chain(&[&source, &effect, &convert, &sink])?;
    Ok(pipeline)
}

/// Set an enum property from its nick, name or number, refusing unknown values.
fn set_enum_property(element: &gst::Element, property: &str, value: &str) -> Result<(), PipelineError> {
    let invalid = || PipelineError::InvalidProperty {
        element: element.name().to_string(),
        property: property.to_string(),
        value: value.to_string(),
    };

    let pspec = element.find_property(property).ok_or_else(invalid)?;
    let class = glib::EnumClass::with_type(pspec.value_type()).ok_or_else(invalid)?;
    let known = class.value_by_nick(value).is_some()
        || class.value_by_name(value).is_some()
        || value.parse::<i32>().ok().and_then(|v| class.value(v)).is_some();
    if !known {
        return Err(invalid());
    }

    element.set_property_from_str(property, value);
    Ok(())
}

/// Play until the pipeline reports an error or reaches the end of the stream.
pub fn run(pattern: &str) -> anyhow::Result<()> {
    let pipeline = build(pattern, "autovideosink")?;
    let bus = pipeline.bus().ok_or(PipelineError::NoBus)?;

    set_state(&pipeline, gst::State::Playing)?;

    let msg = bus.timed_pop_filtered(
        gst::ClockTime::NONE,
        &[gst::MessageType::Error, gst::MessageType::Eos],
    );

    let result = match msg.as_ref().map(|m| m.view()) {
        Some(gst::MessageView::Error(err)) => Err(report_error(err)),
        Some(gst::MessageView::Eos(_)) => {
            info!("End-Of-Stream reached.");
            Ok(())
        }
        _ => {
            warn!("Unexpected message received.");
            Ok(())
        }
    };

    set_state(&pipeline, gst::State::Null)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reaches_eos() {
        gst::init().unwrap();
        if gst::ElementFactory::find("vertigotv").is_none() {
            // effectv plugin not installed
            return;
        }

        let pipeline = build("ball", "fakesink").unwrap();
        let source = pipeline.by_name("source").unwrap();
        source.set_property("num-buffers", 5i32);
        let bus = pipeline.bus().unwrap();

        pipeline.set_state(gst::State::Playing).unwrap();
        let msg = bus
            .timed_pop_filtered(
                gst::ClockTime::from_seconds(10),
                &[gst::MessageType::Error, gst::MessageType::Eos],
            )
            .unwrap();
        pipeline.set_state(gst::State::Null).unwrap();

        assert_eq!(msg.type_(), gst::MessageType::Eos);
    }

    #[test]
    fn test_enum_property_accepts_nick_and_number() {
        gst::init().unwrap();
        let source = make_element("videotestsrc", None).unwrap();

        set_enum_property(&source, "pattern", "snow").unwrap();
        set_enum_property(&source, "pattern", "18").unwrap();
        assert!(matches!(
            set_enum_property(&source, "pattern", "999"),
            Err(PipelineError::InvalidProperty { .. })
        ));
    }

    #[test]
    fn test_unknown_pattern_is_an_error() {
        gst::init().unwrap();
        if gst::ElementFactory::find("vertigotv").is_none() {
            return;
        }

        let result = build("no-such-pattern", "fakesink");
        match result {
            Err(PipelineError::InvalidProperty { element, property, value }) => {
                assert_eq!(element, "source");
                assert_eq!(property, "pattern");
                assert_eq!(value, "no-such-pattern");
            }
            other => panic!("expected an invalid pattern error, got {:?}", other),
        }
    }
}
