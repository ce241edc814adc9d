//! Per-widget styling loaded from a TOML stylesheet.
//!
//! Widgets are looked up by name:
//!
//! ```toml
//! theme = "nord_dark"
//!
//! [button.button2]
//! background = "#5e81ac"
//! text = "#eceff4"
//! corner_radius = 8
//! font_size = 18.0
//! ```

use crate::themes::Theme;
use egui::{Color32, RichText, Stroke};
use figment::providers::{Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Stylesheet used when no file is given.
pub const DEFAULT_STYLESHEET: &str = r##"
theme = "nord_dark"

[button.button2]
background = "#5e81ac"
text = "#eceff4"
border = "#88c0d0"
corner_radius = 8
font_size = 18.0

[button.it]
background = "#a3be8c"
text = "#2e3440"
corner_radius = 12
font_size = 22.0
"##;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub background: Option<String>,
    pub text: Option<String>,
    pub border: Option<String>,
    pub corner_radius: Option<u8>,
    pub font_size: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub button: HashMap<String, ButtonStyle>,
}

fn color(value: &Option<String>) -> Option<Color32> {
    let hex = value.as_deref()?;
    match Color32::from_hex(hex) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!("Ignoring invalid color '{}' in stylesheet", hex);
            None
        }
    }
}

impl Stylesheet {
    pub fn load(path: &Path) -> Result<Self, figment::Error> {
        Figment::new().merge(Toml::file_exact(path)).extract()
    }

    pub fn parse(contents: &str) -> Result<Self, figment::Error> {
        Figment::new().merge(Toml::string(contents)).extract()
    }

    pub fn builtin() -> Self {
        Self::parse(DEFAULT_STYLESHEET).unwrap_or_default()
    }

    /// A button labelled `label`, styled by the rules for `name` if any.
    pub fn button(&self, name: &str, label: &str) -> egui::Button<'static> {
        let Some(style) = self.button.get(name) else {
            return egui::Button::new(label.to_string());
        };

        let mut text = RichText::new(label.to_string());
        if let Some(color) = color(&style.text) {
            text = text.color(color);
        }
        if let Some(size) = style.font_size {
            text = text.size(size);
        }

        let mut button = egui::Button::new(text);
        if let Some(fill) = color(&style.background) {
            button = button.fill(fill);
        }
        if let Some(border) = color(&style.border) {
            button = button.stroke(Stroke::new(1.0, border));
        }
        if let Some(radius) = style.corner_radius {
            button = button.corner_radius(radius);
        }
        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stylesheet() {
        let sheet = Stylesheet::builtin();
        assert_eq!(sheet.theme, Theme::NordDark);
        let style = &sheet.button["button2"];
        assert_eq!(style.corner_radius, Some(8));
        assert_eq!(color(&style.background), Some(Color32::from_rgb(0x5e, 0x81, 0xac)));
        assert!(!sheet.button.contains_key("button1"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("it.toml");
        std::fs::write(&path, "theme = \"nord_light\"\n[button.it]\nfont_size = 30.0\n").unwrap();

        let sheet = Stylesheet::load(&path).unwrap();
        assert_eq!(sheet.theme, Theme::NordLight);
        assert_eq!(sheet.button["it"].font_size, Some(30.0));
        assert_eq!(sheet.button["it"].background, None);

        assert!(Stylesheet::load(&temp_dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_invalid_color_is_ignored() {
        assert_eq!(color(&Some("not-a-color".to_string())), None);
        assert_eq!(color(&None), None);
    }
}
