//! Custom widgets for the settings form

use crate::schema::NumericRange;
use crate::value::parse_float;
use egui::Ui;

/// Which half of a slider pair the user edited this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PairInput {
    /// The slider moved; carries the new slider text.
    Slider(String),
    /// The numeric display was typed into; carries its raw text.
    Display(String),
}

/// Draw a slider with its numeric display to the right.
///
/// Both halves render from the text the page holds for them. Nothing is
/// written back here; the returned [`PairInput`] names the edited half so the
/// caller can route it through the form controller.
pub fn slider_pair(
    ui: &mut Ui,
    id_source: &str,
    range: NumericRange,
    slider_text: &str,
    display_text: Option<&str>,
) -> Option<PairInput> {
    let mut input = None;
    ui.horizontal(|ui| {
        let mut value = parse_float(slider_text);
        let slider = egui::Slider::new(&mut value, range.min..=range.max)
            .step_by(range.step)
            .show_value(false);
        if ui.add(slider).changed() {
            input = Some(PairInput::Slider(range.format(value)));
        }

        if let Some(display_text) = display_text {
            let mut text = display_text.to_string();
            let edit = egui::TextEdit::singleline(&mut text)
                .id_source(id_source)
                .desired_width(64.0);
            if ui.add(edit).changed() {
                input = Some(PairInput::Display(text));
            }
        }
    });
    input
}

/// Titled group box for one section of the form.
pub fn settings_group<R>(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.strong(title);
        ui.add_space(6.0);
        add_contents(ui)
    })
    .inner
}

/// Status bar: panel fill, 1px top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    let fill = ui.visuals().panel_fill;
    let stroke = ui.visuals().widgets.noninteractive.bg_stroke;
    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}
