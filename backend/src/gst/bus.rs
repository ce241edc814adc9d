//! Bus message handling and the two control loop flavours.
//!
//! Streaming threads post requests with a [`BusPoster`]; the control thread
//! turns bus messages into [`ControlEvent`]s with [`translate`] and feeds them
//! to the [`SwapController`], either from a glib main loop bus watch or by
//! polling the bus from a GUI frame.

use super::{messages, pipeline_state, GstSwapGraph, PipelineError};
use crate::swap::{ControlEvent, SwapController};
use gstreamer as gst;
use gstreamer::glib;
use gstreamer::prelude::*;
use hotswap_types::{AppRequest, LoopAction, RequestSink, SwapEvent, SwapTarget};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Posts [`AppRequest`]s as application messages on the pipeline bus.
///
/// Posting is thread-safe; handling happens wherever the bus is read.
#[derive(Debug, Clone)]
pub struct BusPoster {
    pipeline: gst::Pipeline,
}

impl BusPoster {
    pub fn new(pipeline: &gst::Pipeline) -> Self {
        Self {
            pipeline: pipeline.clone(),
        }
    }
}

impl RequestSink for BusPoster {
    fn post(&self, request: AppRequest) {
        trace!("Posting {:?} on the bus of {}", request, self.pipeline.name());
        let msg = messages::application_message(&request, &self.pipeline);
        if self.pipeline.post_message(msg).is_err() {
            warn!("Failed to post {:?}: bus is flushing", request);
        }
    }
}

/// Map a bus message to what the control loop cares about.
pub fn translate(msg: &gst::Message, pipeline: &gst::Pipeline) -> Option<ControlEvent> {
    use gst::MessageView;

    match msg.view() {
        MessageView::Application(app) => {
            let request = app.structure().and_then(messages::from_structure);
            if request.is_none() {
                debug!("Ignoring unknown application message");
            }
            request.map(ControlEvent::Request)
        }
        MessageView::Error(err) => Some(ControlEvent::Swap(SwapEvent::PipelineError {
            error: err.error().to_string(),
            debug: err.debug().map(|d| d.to_string()),
            source: err.src().map(|s| s.name().to_string()),
        })),
        MessageView::Warning(w) => {
            warn!(
                "Pipeline warning: {} (debug: {:?}, source: {:?})",
                w.error(),
                w.debug(),
                w.src().map(|s| s.name())
            );
            None
        }
        MessageView::Eos(_) => Some(ControlEvent::EndOfStream),
        MessageView::StateChanged(state_changed) => {
            let from_pipeline = msg
                .src()
                .is_some_and(|s| s == pipeline.upcast_ref::<gst::Object>());
            from_pipeline.then(|| ControlEvent::StateChanged {
                old: pipeline_state(state_changed.old()),
                new: pipeline_state(state_changed.current()),
            })
        }
        _ => None,
    }
}

/// Drain every pending bus message into `controller`. Meant to be called
/// from a GUI frame.
pub fn pump(
    bus: &gst::Bus,
    pipeline: &gst::Pipeline,
    controller: &mut SwapController<GstSwapGraph>,
) -> LoopAction {
    while let Some(msg) = bus.pop() {
        if let Some(event) = translate(&msg, pipeline) {
            if controller.handle(event).is_quit() {
                return LoopAction::Quit;
            }
        }
    }
    if controller.is_running() {
        LoopAction::Continue
    } else {
        LoopAction::Quit
    }
}

/// Run a glib main loop until the controller quits. With an `interval`, a
/// timer asks for the next swap on every tick.
///
/// Returns `true` if the loop stopped because of a pipeline error.
pub fn run_main_loop(
    controller: SwapController<GstSwapGraph>,
    interval: Option<Duration>,
) -> Result<bool, PipelineError> {
    let pipeline = controller.hotswap().graph().pipeline().clone();
    let bus = pipeline.bus().ok_or(PipelineError::NoBus)?;
    let main_loop = glib::MainLoop::new(None, false);
    let controller = Rc::new(RefCell::new(controller));

    let _watch = {
        let controller = controller.clone();
        let main_loop = main_loop.clone();
        bus.add_watch_local(move |_bus, msg| {
            let Some(event) = translate(msg, &pipeline) else {
                return glib::ControlFlow::Continue;
            };
            if controller.borrow_mut().handle(event).is_quit() {
                main_loop.quit();
                return glib::ControlFlow::Break;
            }
            glib::ControlFlow::Continue
        })?
    };

    let timer = interval.map(|interval| {
        let controller = controller.clone();
        let main_loop = main_loop.clone();
        glib::timeout_add_local(interval, move || {
            let action = controller
                .borrow_mut()
                .dispatch(AppRequest::Swap(SwapTarget::Next));
            if action.is_quit() {
                main_loop.quit();
                return glib::ControlFlow::Break;
            }
            glib::ControlFlow::Continue
        })
    });

    info!("Running main loop");
    main_loop.run();

    if let Some(timer) = timer {
        // Already gone if the timer itself broke out of the loop
        if glib::MainContext::default().find_source_by_id(&timer).is_some() {
            timer.remove();
        }
    }

    let mut controller = controller.borrow_mut();
    controller.shutdown();
    Ok(controller.failed())
}
