//! Nord color themes for every window.

use egui::style::WidgetVisuals;
use egui::{Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Nord color palette, limited to the shades the themes use
mod nord {
    use egui::Color32;

    // Polar Night - dark backgrounds
    pub const NORD0: Color32 = Color32::from_rgb(0x2e, 0x34, 0x40);
    pub const NORD1: Color32 = Color32::from_rgb(0x3b, 0x42, 0x52);
    pub const NORD2: Color32 = Color32::from_rgb(0x43, 0x4c, 0x5e);
    pub const NORD3: Color32 = Color32::from_rgb(0x4c, 0x56, 0x6a);

    // Snow Storm - light text/backgrounds
    pub const NORD4: Color32 = Color32::from_rgb(0xd8, 0xde, 0xe9);
    pub const NORD5: Color32 = Color32::from_rgb(0xe5, 0xe9, 0xf0);
    pub const NORD6: Color32 = Color32::from_rgb(0xec, 0xef, 0xf4);

    // Frost - accent blues/cyans
    pub const NORD8: Color32 = Color32::from_rgb(0x88, 0xc0, 0xd0);
    pub const NORD9: Color32 = Color32::from_rgb(0x81, 0xa1, 0xc1);
    pub const NORD10: Color32 = Color32::from_rgb(0x5e, 0x81, 0xac);

    // Aurora - semantic colors
    pub const NORD11: Color32 = Color32::from_rgb(0xbf, 0x61, 0x6a); // red/error
    pub const NORD12: Color32 = Color32::from_rgb(0xd0, 0x87, 0x70); // orange/warning
    pub const NORD14: Color32 = Color32::from_rgb(0xa3, 0xbe, 0x8c); // green/ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    NordDark,
    NordLight,
}

impl Theme {
    pub fn visuals(self) -> Visuals {
        match self {
            Theme::NordDark => nord_dark(),
            Theme::NordLight => nord_light(),
        }
    }

    /// Color for "something is happening" indicators, e.g. a swap in progress.
    pub fn busy_color(self) -> Color32 {
        nord::NORD12
    }

    pub fn idle_color(self) -> Color32 {
        nord::NORD14
    }
}

/// Background, border and text for one interaction state.
fn widget(fill: Color32, border: Color32, text: Color32, text_width: f32) -> WidgetVisuals {
    let mut visuals = Visuals::dark().widgets.inactive;
    visuals.bg_fill = fill;
    visuals.weak_bg_fill = fill;
    visuals.bg_stroke = Stroke::new(1.0, border);
    visuals.fg_stroke = Stroke::new(text_width, text);
    visuals
}

/// Create Nord Dark theme visuals
pub fn nord_dark() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_fill = nord::NORD0;
    visuals.panel_fill = nord::NORD0;
    visuals.faint_bg_color = nord::NORD1;
    visuals.extreme_bg_color = nord::NORD1;
    visuals.override_text_color = Some(nord::NORD4);
    visuals.selection.bg_fill = nord::NORD3;
    visuals.selection.stroke = Stroke::new(1.0, nord::NORD8);
    visuals.warn_fg_color = nord::NORD12;
    visuals.error_fg_color = nord::NORD11;

    visuals.widgets.noninteractive = widget(nord::NORD1, nord::NORD3, nord::NORD4, 1.0);
    visuals.widgets.inactive = widget(nord::NORD2, nord::NORD3, nord::NORD4, 1.0);
    visuals.widgets.hovered = widget(nord::NORD3, nord::NORD8, nord::NORD6, 1.0);
    visuals.widgets.active = widget(nord::NORD9, nord::NORD8, nord::NORD6, 2.0);
    visuals.widgets.open = widget(nord::NORD2, nord::NORD8, nord::NORD4, 1.0);

    visuals.window_stroke = Stroke::new(1.0, nord::NORD3);
    visuals
}

/// Create Nord Light theme visuals
pub fn nord_light() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.window_fill = nord::NORD6;
    visuals.panel_fill = nord::NORD6;
    visuals.faint_bg_color = nord::NORD5;
    visuals.extreme_bg_color = nord::NORD4;
    visuals.override_text_color = Some(nord::NORD0);
    visuals.selection.bg_fill = nord::NORD4;
    visuals.selection.stroke = Stroke::new(1.0, nord::NORD10);
    visuals.warn_fg_color = nord::NORD12;
    visuals.error_fg_color = nord::NORD11;

    visuals.widgets.noninteractive = widget(nord::NORD5, nord::NORD4, nord::NORD1, 1.0);
    visuals.widgets.inactive = widget(nord::NORD5, nord::NORD4, nord::NORD2, 1.0);
    visuals.widgets.hovered = widget(nord::NORD4, nord::NORD10, nord::NORD0, 1.0);
    visuals.widgets.active = widget(nord::NORD9, nord::NORD10, nord::NORD6, 2.0);
    visuals.widgets.open = widget(nord::NORD5, nord::NORD10, nord::NORD1, 1.0);

    visuals.window_stroke = Stroke::new(1.0, nord::NORD4);
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_visuals() {
        assert!(Theme::NordDark.visuals().dark_mode);
        assert!(!Theme::NordLight.visuals().dark_mode);
        assert_eq!(nord_dark().widgets.active.fg_stroke.width, 2.0);
        assert_eq!(nord_light().panel_fill, nord::NORD6);
    }

    #[test]
    fn test_status_colors_stand_out() {
        for theme in [Theme::NordDark, Theme::NordLight] {
            let visuals = theme.visuals();
            assert_ne!(theme.busy_color(), theme.idle_color());
            assert_ne!(theme.busy_color(), visuals.panel_fill);
            assert_ne!(theme.idle_color(), visuals.panel_fill);
        }
    }
}
