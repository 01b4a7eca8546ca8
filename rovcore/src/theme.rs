//! Console themes
//!
//! Each theme is a small palette. [`ThemeStyle::apply`] turns a palette into
//! egui visuals; the `theme-<name>` body class is the name the page state and
//! the preference store use for it.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

/// Selectable UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Tech,
    Dark,
    Light,
    Ocean,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Tech, Theme::Dark, Theme::Light, Theme::Ocean];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Tech => "tech",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Ocean => "ocean",
        }
    }

    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn body_class(self) -> String {
        format!("theme-{}", self.name())
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Tech => Palette {
                dark: true,
                background: Color32::from_rgb(14, 20, 28),
                panel: Color32::from_rgb(20, 30, 42),
                text: Color32::from_rgb(214, 236, 244),
                accent: Color32::from_rgb(0, 200, 220),
                outline: Color32::from_rgb(40, 90, 110),
            },
            Theme::Dark => Palette {
                dark: true,
                background: Color32::from_rgb(22, 22, 22),
                panel: Color32::from_rgb(32, 32, 32),
                text: Color32::from_rgb(228, 228, 228),
                accent: Color32::from_rgb(255, 140, 0),
                outline: Color32::from_rgb(70, 70, 70),
            },
            Theme::Light => Palette {
                dark: false,
                background: Color32::from_rgb(250, 250, 250),
                panel: Color32::from_rgb(238, 238, 238),
                text: Color32::from_rgb(20, 20, 20),
                accent: Color32::from_rgb(30, 100, 200),
                outline: Color32::from_rgb(170, 170, 170),
            },
            Theme::Ocean => Palette {
                dark: true,
                background: Color32::from_rgb(6, 34, 54),
                panel: Color32::from_rgb(10, 48, 74),
                text: Color32::from_rgb(220, 240, 245),
                accent: Color32::from_rgb(64, 200, 160),
                outline: Color32::from_rgb(30, 90, 120),
            },
        }
    }
}

/// Colors a theme is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub dark: bool,
    pub background: Color32,
    pub panel: Color32,
    pub text: Color32,
    pub accent: Color32,
    pub outline: Color32,
}

/// Sizes shared by every theme.
pub struct ThemeStyle {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for ThemeStyle {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl ThemeStyle {
    /// Apply a theme to an egui context
    pub fn apply(&self, ctx: &egui::Context, theme: Theme) {
        let palette = theme.palette();
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = if palette.dark { Visuals::dark() } else { Visuals::light() };

        visuals.override_text_color = Some(palette.text);
        visuals.window_fill = palette.panel;
        visuals.panel_fill = palette.background;
        visuals.faint_bg_color = palette.panel;
        visuals.extreme_bg_color = palette.panel;
        visuals.hyperlink_color = palette.accent;

        visuals.window_rounding = Rounding::same(2.0);
        visuals.menu_rounding = Rounding::same(2.0);
        visuals.window_stroke = Stroke::new(1.0, palette.outline);

        let tint = |ws: &mut egui::style::WidgetVisuals, fill: Color32, stroke: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, stroke);
            ws.fg_stroke = Stroke::new(1.0, palette.text);
            ws.rounding = Rounding::same(2.0);
        };
        tint(&mut visuals.widgets.noninteractive, palette.background, palette.outline);
        tint(&mut visuals.widgets.inactive, palette.panel, palette.outline);
        tint(&mut visuals.widgets.hovered, palette.panel, palette.accent);
        tint(&mut visuals.widgets.active, palette.accent, palette.accent);
        tint(&mut visuals.widgets.open, palette.panel, palette.accent);

        visuals.selection.bg_fill = palette.accent.gamma_multiply(0.6);
        visuals.selection.stroke = Stroke::new(1.0, palette.accent);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style.spacing.slider_width = 220.0;

        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let fill = ui.visuals().panel_fill;
    let stroke = ui.visuals().widgets.noninteractive.bg_stroke;
    let frame_resp = egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            egui::menu::bar(ui, add_contents).inner
        });
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::THEMES;

    #[test]
    fn test_names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
        }
        assert_eq!(Theme::from_name("Tech"), None);
        assert_eq!(Theme::default(), Theme::Tech);
    }

    #[test]
    fn test_matches_select_options() {
        let names: Vec<_> = Theme::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, THEMES);
    }

    #[test]
    fn test_body_class() {
        assert_eq!(Theme::Ocean.body_class(), "theme-ocean");
    }

    #[test]
    fn test_apply_sets_visuals() {
        let ctx = egui::Context::default();
        ThemeStyle::default().apply(&ctx, Theme::Light);
        assert!(!ctx.style().visuals.dark_mode);
        ThemeStyle::default().apply(&ctx, Theme::Tech);
        assert!(ctx.style().visuals.dark_mode);
        assert_eq!(ctx.style().visuals.panel_fill, Theme::Tech.palette().background);
    }
}
