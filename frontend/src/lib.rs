//! Hotswap frontend library.
//!
//! Native egui windows that trigger element swaps. The frontend never touches
//! GStreamer: it posts requests through a `RequestSink` and lets the backend
//! pump its bus once per frame.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod gallery;
pub mod stylesheet;
pub mod themes;

pub use app::{SwapButtonApp, SwapControls, VisualizerApp};
pub use gallery::{GalleryApp, GalleryPage};
pub use stylesheet::Stylesheet;
pub use themes::Theme;

fn native_options(size: [f32; 2], title: &str) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_title(title),
        ..Default::default()
    }
}

/// Single "Click" button window. Blocks until the window closes.
pub fn run_swap_button(controls: SwapControls, theme: Theme) -> eframe::Result<()> {
    tracing::info!("Opening swap button window");

    eframe::run_native(
        "Swap",
        native_options([300.0, 200.0], "Swap"),
        Box::new(move |cc| Ok(Box::new(SwapButtonApp::new(cc, controls, theme)))),
    )
}

/// One button per visualizer plus "Quit". Blocks until the window closes.
pub fn run_visualizer(labels: Vec<String>, controls: SwapControls, theme: Theme) -> eframe::Result<()> {
    tracing::info!("Opening visualizer window with {} buttons", labels.len());

    eframe::run_native(
        "Visualizers",
        native_options([320.0, 240.0], "Audio visualizers"),
        Box::new(move |cc| Ok(Box::new(VisualizerApp::new(cc, labels, controls, theme)))),
    )
}

pub fn run_gallery(page: GalleryPage, stylesheet: Stylesheet) -> eframe::Result<()> {
    tracing::info!("Opening widget gallery page '{}'", page);

    eframe::run_native(
        "Widget gallery",
        native_options(page.window_size(), page.title()),
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(cc, page, stylesheet)))),
    )
}
