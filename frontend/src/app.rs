//! Swap trigger windows.

use crate::themes::Theme;
use hotswap_types::{AppRequest, LoopAction, RequestSink, SwapStatus, SwapTarget};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// How often the bus is polled while the window is idle.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The backend side of a swap window.
///
/// `pump` runs once per frame on the GUI thread and handles whatever the
/// pipeline posted since the last frame. `status` is read for display only.
pub struct SwapControls {
    pub requests: Arc<dyn RequestSink>,
    pub pump: Box<dyn FnMut() -> LoopAction>,
    pub status: Box<dyn Fn() -> SwapStatus>,
}

impl SwapControls {
    pub fn post(&self, request: AppRequest) {
        debug!("GUI posting {:?}", request);
        self.requests.post(request);
    }

    /// Handle pending messages. Returns `true` when the window should close.
    pub fn pump_frame(&mut self, ctx: &egui::Context) -> bool {
        if (self.pump)().is_quit() {
            info!("Closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return true;
        }
        ctx.request_repaint_after(POLL_INTERVAL);
        false
    }

    fn status_line(&self, ui: &mut egui::Ui, theme: Theme) {
        let status = (self.status)();
        let color = if status.phase.accepts_requests() {
            theme.idle_color()
        } else {
            theme.busy_color()
        };
        ui.horizontal(|ui| {
            ui.colored_label(color, "●");
            ui.label(format!(
                "{} ({}, {} swaps)",
                status.current, status.phase, status.swaps_completed
            ));
        });
    }
}

/// One "Click" button asking for the next element.
pub struct SwapButtonApp {
    controls: SwapControls,
    theme: Theme,
}

impl SwapButtonApp {
    pub fn new(cc: &eframe::CreationContext<'_>, controls: SwapControls, theme: Theme) -> Self {
        cc.egui_ctx.set_visuals(theme.visuals());
        Self { controls, theme }
    }

    fn ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if ui.button("Click").clicked() {
                self.controls.post(AppRequest::Swap(SwapTarget::Next));
            }
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                self.controls.status_line(ui, self.theme);
            });
        });
    }
}

impl eframe::App for SwapButtonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.controls.pump_frame(ctx) {
            return;
        }
        self.ui(ctx);
    }
}

/// Grid position of button `index` in a two-column layout.
pub fn grid_cell(index: usize) -> (usize, usize) {
    (index / 2, index % 2)
}

/// One button per catalog entry plus "Quit".
pub struct VisualizerApp {
    labels: Vec<String>,
    controls: SwapControls,
    theme: Theme,
}

impl VisualizerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        labels: Vec<String>,
        controls: SwapControls,
        theme: Theme,
    ) -> Self {
        cc.egui_ctx.set_visuals(theme.visuals());
        Self {
            labels,
            controls,
            theme,
        }
    }

    fn ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut clicked = None;
            egui::Grid::new("visualizers")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    for (index, label) in self.labels.iter().enumerate() {
                        if ui.add_sized([140.0, 40.0], egui::Button::new(label.as_str())).clicked() {
                            clicked = Some(index);
                        }
                        if grid_cell(index).1 == 1 {
                            ui.end_row();
                        }
                    }
                });

            if let Some(index) = clicked {
                info!("Button clicked (index={})", index);
                self.controls.post(AppRequest::Swap(SwapTarget::Index(index)));
            }

            ui.add_space(8.0);
            if ui.add_sized([288.0, 32.0], egui::Button::new("Quit")).clicked() {
                self.controls.post(AppRequest::Quit);
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                self.controls.status_line(ui, self.theme);
            });
        });
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.controls.pump_frame(ctx) {
            return;
        }
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Mutex;

    fn controls(quit_after: usize) -> (SwapControls, Arc<Mutex<Vec<AppRequest>>>, Rc<Cell<usize>>) {
        let posted = Arc::new(Mutex::new(Vec::new()));
        let posted_clone = posted.clone();
        let frames = Rc::new(Cell::new(0));
        let frames_clone = frames.clone();
        let controls = SwapControls {
            requests: Arc::new(move |request: AppRequest| posted_clone.lock().unwrap().push(request)),
            pump: Box::new(move || {
                frames_clone.set(frames_clone.get() + 1);
                if frames_clone.get() >= quit_after {
                    LoopAction::Quit
                } else {
                    LoopAction::Continue
                }
            }),
            status: Box::new(SwapStatus::default),
        };
        (controls, posted, frames)
    }

    #[test]
    fn test_pump_closes_on_quit() {
        let ctx = egui::Context::default();
        let (mut controls, _, frames) = controls(2);

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(!controls.pump_frame(ctx));
        });
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(controls.pump_frame(ctx));
        });
        assert_eq!(frames.get(), 2);
    }

    #[test]
    fn test_post_goes_to_sink() {
        let (controls, posted, _) = controls(usize::MAX);
        controls.post(AppRequest::Swap(SwapTarget::Index(3)));
        controls.post(AppRequest::Quit);
        assert_eq!(
            *posted.lock().unwrap(),
            vec![AppRequest::Swap(SwapTarget::Index(3)), AppRequest::Quit]
        );
    }

    #[test]
    fn test_grid_cells() {
        let cells: Vec<_> = (0..4).map(grid_cell).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
