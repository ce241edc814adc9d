//! Native GUI module - opens the frontend windows on the main thread.
//!
//! GUI is enabled by default. Use --features no-gui to disable.

use crate::gst::GstSwapGraph;
use crate::swap::SwapController;
use std::path::Path;

#[cfg(not(feature = "no-gui"))]
use {
    crate::gst::{bus, BusPoster, PipelineError},
    gstreamer::prelude::ElementExt,
    hotswap_frontend::{GalleryPage, Stylesheet, SwapControls, Theme},
    hotswap_types::RequestSink,
    std::cell::RefCell,
    std::rc::Rc,
    std::sync::Arc,
};

/// Wire a controller to a window: clicks go to the pipeline bus, each frame
/// drains the bus on the GUI thread.
#[cfg(not(feature = "no-gui"))]
fn swap_controls(
    controller: &Rc<RefCell<SwapController<GstSwapGraph>>>,
) -> Result<SwapControls, PipelineError> {
    let pipeline = controller.borrow().hotswap().graph().pipeline().clone();
    let pipeline_bus = pipeline.bus().ok_or(PipelineError::NoBus)?;
    let requests: Arc<dyn RequestSink> = Arc::new(BusPoster::new(&pipeline));

    let pump = {
        let controller = controller.clone();
        Box::new(move || bus::pump(&pipeline_bus, &pipeline, &mut controller.borrow_mut()))
    };
    let status = {
        let controller = controller.clone();
        Box::new(move || controller.borrow().status())
    };

    Ok(SwapControls {
        requests,
        pump,
        status,
    })
}

/// Run `window` with controls for `controller`, then stop the pipeline.
///
/// Returns `true` if the pipeline stopped because of an error.
#[cfg(not(feature = "no-gui"))]
fn run_with_controller(
    controller: SwapController<GstSwapGraph>,
    window: impl FnOnce(SwapControls) -> eframe::Result<()>,
) -> anyhow::Result<bool> {
    let controller = Rc::new(RefCell::new(controller));
    let controls = swap_controls(&controller)?;

    let result = window(controls);

    // Closing the window counts as quit
    let mut controller = controller.borrow_mut();
    controller.shutdown();
    result.map_err(|e| anyhow::anyhow!("GUI error: {}", e))?;
    Ok(controller.failed())
}

#[cfg(not(feature = "no-gui"))]
pub fn launch_swap_button(
    controller: SwapController<GstSwapGraph>,
    theme: Theme,
) -> anyhow::Result<bool> {
    tracing::info!("Launching swap button window...");
    run_with_controller(controller, |controls| {
        hotswap_frontend::run_swap_button(controls, theme)
    })
}

#[cfg(not(feature = "no-gui"))]
pub fn launch_visualizer(
    controller: SwapController<GstSwapGraph>,
    labels: Vec<String>,
    theme: Theme,
) -> anyhow::Result<bool> {
    tracing::info!("Launching visualizer window...");
    run_with_controller(controller, |controls| {
        hotswap_frontend::run_visualizer(labels, controls, theme)
    })
}

/// Open one widget gallery page, styled from `stylesheet` or the built-in sheet.
#[cfg(not(feature = "no-gui"))]
pub fn launch_gallery(page: GalleryPage, stylesheet: Option<&Path>) -> anyhow::Result<()> {
    let stylesheet = match stylesheet {
        Some(path) => {
            tracing::info!("Loading stylesheet {}", path.display());
            Stylesheet::load(path)?
        }
        None => Stylesheet::builtin(),
    };
    hotswap_frontend::run_gallery(page, stylesheet)
        .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

#[cfg(feature = "no-gui")]
pub fn launch_swap_button(
    mut controller: SwapController<GstSwapGraph>,
    _theme: hotswap_frontend::Theme,
) -> anyhow::Result<bool> {
    controller.shutdown();
    anyhow::bail!("GUI disabled. Rebuild without --features no-gui")
}

#[cfg(feature = "no-gui")]
pub fn launch_visualizer(
    mut controller: SwapController<GstSwapGraph>,
    _labels: Vec<String>,
    _theme: hotswap_frontend::Theme,
) -> anyhow::Result<bool> {
    controller.shutdown();
    anyhow::bail!("GUI disabled. Rebuild without --features no-gui")
}

#[cfg(feature = "no-gui")]
pub fn launch_gallery(
    _page: hotswap_frontend::GalleryPage,
    _stylesheet: Option<&Path>,
) -> anyhow::Result<()> {
    anyhow::bail!("GUI disabled. Rebuild without --features no-gui")
}
