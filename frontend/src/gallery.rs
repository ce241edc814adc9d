//! Widget layout demos: buttons, stacking, grids and stylesheets.

use crate::stylesheet::Stylesheet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryPage {
    /// One button that logs a line
    Click,
    /// Two buttons stacked vertically
    TwoButtons,
    /// Two buttons side by side over a spanning quit button
    Grid,
    /// Named buttons styled from the stylesheet
    Styled,
}

impl GalleryPage {
    pub const ALL: [GalleryPage; 4] = [
        GalleryPage::Click,
        GalleryPage::TwoButtons,
        GalleryPage::Grid,
        GalleryPage::Styled,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GalleryPage::Click => "Button",
            GalleryPage::TwoButtons => "Two buttons",
            GalleryPage::Grid => "Grid",
            GalleryPage::Styled => "Styled buttons",
        }
    }

    pub fn window_size(self) -> [f32; 2] {
        match self {
            GalleryPage::Click => [300.0, 200.0],
            GalleryPage::Grid => [200.0, 200.0],
            GalleryPage::TwoButtons | GalleryPage::Styled => [500.0, 500.0],
        }
    }
}

impl fmt::Display for GalleryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GalleryPage::Click => "click",
            GalleryPage::TwoButtons => "two-buttons",
            GalleryPage::Grid => "grid",
            GalleryPage::Styled => "styled",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GalleryPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GalleryPage::ALL
            .into_iter()
            .find(|page| page.to_string() == s)
            .ok_or_else(|| {
                let names: Vec<_> = GalleryPage::ALL.iter().map(|p| p.to_string()).collect();
                format!("unknown page '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// What a click on a gallery button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Log(&'static str),
    Close,
}

/// A button on a page: widget name (for styling), label and action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryButton {
    pub name: &'static str,
    pub label: &'static str,
    pub action: ButtonAction,
}

const fn log_button(name: &'static str, label: &'static str, line: &'static str) -> GalleryButton {
    GalleryButton {
        name,
        label,
        action: ButtonAction::Log(line),
    }
}

pub fn buttons(page: GalleryPage) -> Vec<GalleryButton> {
    match page {
        GalleryPage::Click => vec![log_button("click", "Click", "clicked")],
        GalleryPage::TwoButtons => vec![
            log_button("button1", "Click me!", "clicked 1"),
            log_button("button2", "No, click me!", "clicked 2"),
        ],
        GalleryPage::Grid => vec![
            log_button("wow", "wow", "Hello world!"),
            log_button("oh", "oh", "Hello world!"),
            GalleryButton {
                name: "quit",
                label: "byeee",
                action: ButtonAction::Close,
            },
        ],
        GalleryPage::Styled => vec![
            log_button("button1", "This is a simple button", "simple"),
            log_button("button2", "This is a stylish button", "stylish"),
            log_button("it", "SAVE CHANGES", "saved"),
        ],
    }
}

pub struct GalleryApp {
    page: GalleryPage,
    buttons: Vec<GalleryButton>,
    stylesheet: Stylesheet,
}

impl GalleryApp {
    pub fn new(cc: &eframe::CreationContext<'_>, page: GalleryPage, stylesheet: Stylesheet) -> Self {
        cc.egui_ctx.set_visuals(stylesheet.theme.visuals());
        Self {
            page,
            buttons: buttons(page),
            stylesheet,
        }
    }

    fn widget(&self, ui: &mut egui::Ui, button: &GalleryButton) -> egui::Response {
        match self.page {
            GalleryPage::Styled => ui.add(self.stylesheet.button(button.name, button.label)),
            _ => ui.button(button.label),
        }
    }

    fn show(&self, ui: &mut egui::Ui) -> Option<ButtonAction> {
        let mut action = None;
        let mut handle = |response: egui::Response, button: &GalleryButton| {
            if response.clicked() {
                action = Some(button.action);
            }
        };

        match self.page {
            GalleryPage::Click => {
                for button in &self.buttons {
                    handle(self.widget(ui, button), button);
                }
            }
            GalleryPage::TwoButtons | GalleryPage::Styled => {
                ui.vertical_centered(|ui| {
                    for button in &self.buttons {
                        ui.add_space(10.0);
                        handle(self.widget(ui, button), button);
                    }
                });
            }
            GalleryPage::Grid => {
                let (top, bottom) = self.buttons.split_at(2);
                egui::Grid::new("gallery-grid").num_columns(2).show(ui, |ui| {
                    for button in top {
                        handle(self.widget(ui, button), button);
                    }
                    ui.end_row();
                });
                for button in bottom {
                    // Spans both columns
                    let response = ui.add_sized([ui.available_width(), 20.0], egui::Button::new(button.label));
                    handle(response, button);
                }
            }
        }
        action
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let action = egui::CentralPanel::default().show(ctx, |ui| self.show(ui)).inner;
        match action {
            Some(ButtonAction::Log(line)) => info!("{}", line),
            Some(ButtonAction::Close) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            None => {}
        }
    }
}
