//! Settings page for the ROV topside console

use crate::config::AppConfig;
use crate::window::{self, ShutdownPolicy};
use egui::Context;
use rovcore::mediamtx::{apply_camera_settings, CameraSettings};
use rovcore::schema::{FieldId, FieldKind};
use rovcore::theme::menu_bar;
use rovcore::value::{parse_float, FieldValue};
use rovcore::widgets::{settings_group, slider_pair, status_bar, PairInput};
use rovcore::{
    Effect, ElementId, FormController, FormEvent, FormState, PreferenceStore, ThemeStyle,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Form sections, in page order.
const SECTIONS: &[(&str, &[FieldId])] = &[
    (
        "connection",
        &[
            FieldId::Resolution,
            FieldId::Joystick,
            FieldId::AutoConnect,
            FieldId::Theme,
            FieldId::StreamIp,
        ],
    ),
    (
        "camera stream",
        &[
            FieldId::RpiCameraMode,
            FieldId::RpiCameraWidth,
            FieldId::RpiCameraHeight,
            FieldId::RpiCameraFps,
            FieldId::RpiCameraBitrate,
            FieldId::RpiCameraIdrPeriod,
            FieldId::RpiCameraVFlip,
            FieldId::RpiCameraHFlip,
        ],
    ),
    (
        "image",
        &[
            FieldId::RpiCameraBrightness,
            FieldId::RpiCameraContrast,
            FieldId::RpiCameraSaturation,
            FieldId::RpiCameraSharpness,
        ],
    ),
    (
        "exposure & focus",
        &[
            FieldId::RpiCameraExposure,
            FieldId::RpiCameraAwb,
            FieldId::RpiCameraDenoise,
            FieldId::RpiCameraMetering,
            FieldId::RpiCameraShutter,
            FieldId::RpiCameraGain,
            FieldId::RpiCameraAfMode,
        ],
    ),
];

pub struct SettingsApp {
    state: FormState,
    controller: FormController,
    prefs: Box<dyn PreferenceStore>,
    style: ThemeStyle,
    mediamtx_config: Option<PathBuf>,
    shutdown: ShutdownPolicy,
    /// Set by file > quit so the close is honored on every platform.
    quit_requested: bool,
    /// Pending acknowledgment; the form is blocked while it is shown.
    acknowledgment: Option<String>,
    status: String,
}

impl SettingsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, prefs: Box<dyn PreferenceStore>, config: AppConfig) -> Self {
        let mut state = FormState::from_schema();
        let (controller, effects) =
            FormController::initialize(&mut state, prefs.as_ref(), config.stream_ip_policy);

        let mut app = Self {
            state,
            controller,
            prefs,
            style: ThemeStyle::default(),
            mediamtx_config: config.mediamtx_config,
            shutdown: ShutdownPolicy::current(),
            quit_requested: false,
            acknowledgment: None,
            status: "ready".to_string(),
        };
        app.run_effects(&cc.egui_ctx, effects);
        app
    }

    fn dispatch(&mut self, ctx: &Context, event: FormEvent) {
        let effects = self.controller.handle(&mut self.state, event);
        self.run_effects(ctx, effects);
    }

    fn run_effects(&mut self, ctx: &Context, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ApplyTheme(theme) => {
                    self.style.apply(ctx, theme);
                }
                Effect::Persist { key, value } => {
                    if let Err(e) = self.prefs.set(key, &value) {
                        warn!(key = key.as_str(), error = %e, "failed to store preference");
                    }
                }
                Effect::EmitRecord(record) => {
                    info!("full settings object:\n{}", record.to_pretty_json());
                }
                Effect::Acknowledge(message) => {
                    self.status = message.clone();
                    self.acknowledgment = Some(message);
                }
                Effect::WriteCameraSettings(settings) => self.write_camera_settings(&settings),
            }
        }
    }

    fn write_camera_settings(&mut self, settings: &CameraSettings) {
        let Some(path) = &self.mediamtx_config else {
            warn!("no mediamtx_config configured, camera settings not written");
            self.status = "no mediamtx config set".to_string();
            return;
        };
        self.status = match apply_camera_settings(path, settings) {
            Ok(()) => format!("camera settings written to {}", path.display()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to update mediamtx config");
                format!("could not update {}: {}", path.display(), e)
            }
        };
    }

    /// Render one field's control. Returns the edit, if any.
    fn render_field(&self, ui: &mut egui::Ui, field: FieldId) -> Option<FormEvent> {
        let element = ElementId::Field(field);
        if !self.state.contains(element) {
            return None;
        }
        let text = self.state.text(element).unwrap_or_default();
        let edit = |value: FieldValue| Some(FormEvent::edit(element, value));

        match field.kind() {
            FieldKind::Select(options) => {
                let mut picked = None;
                egui::ComboBox::from_id_source(field.element_id())
                    .selected_text(text)
                    .show_ui(ui, |ui| {
                        for option in options {
                            if ui.selectable_label(text == *option, *option).clicked() {
                                picked = Some(option.to_string());
                            }
                        }
                    });
                picked.and_then(|value| edit(FieldValue::Text(value)))
            }
            FieldKind::Checkbox => {
                let mut checked = self.state.checked(element).unwrap_or(false);
                if ui.checkbox(&mut checked, "").changed() {
                    edit(FieldValue::Checked(checked))
                } else {
                    None
                }
            }
            FieldKind::Text => {
                let mut value = text.to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut value)
                        .id_source(field.element_id())
                        .hint_text("192.168.1.100"),
                );
                if response.changed() {
                    edit(FieldValue::Text(value))
                } else {
                    None
                }
            }
            FieldKind::Number(range) => {
                let mut value = parse_float(text);
                let drag = egui::DragValue::new(&mut value)
                    .clamp_range(range.min..=range.max)
                    .speed(range.step);
                if ui.add(drag).changed() {
                    edit(FieldValue::Text(range.format(value)))
                } else {
                    None
                }
            }
            FieldKind::Slider(range) => {
                let display = self.state.text(ElementId::Display(field));
                let display_id = ElementId::Display(field).dom_id();
                match slider_pair(ui, display_id, range, text, display)? {
                    PairInput::Slider(value) => edit(FieldValue::Text(value)),
                    PairInput::Display(value) => Some(FormEvent::edit(
                        ElementId::Display(field),
                        FieldValue::Text(value),
                    )),
                }
            }
        }
    }

    fn render_form(&self, ui: &mut egui::Ui) -> Vec<FormEvent> {
        let mut events = Vec::new();
        for (title, fields) in SECTIONS {
            settings_group(ui, title, |ui| {
                egui::Grid::new(*title)
                    .num_columns(2)
                    .spacing([24.0, 8.0])
                    .min_col_width(140.0)
                    .show(ui, |ui| {
                        for field in fields.iter().copied() {
                            if !self.state.contains(ElementId::Field(field)) {
                                continue;
                            }
                            ui.label(field.label());
                            events.extend(self.render_field(ui, field));
                            ui.end_row();
                        }
                    });
            });
            ui.add_space(10.0);
        }

        if self.state.has_form() {
            ui.horizontal(|ui| {
                if ui.button("save settings").clicked() {
                    events.push(FormEvent::Submit);
                }
                if ui.button("reset camera defaults").clicked() {
                    events.push(FormEvent::ResetCameraDefaults);
                }
            });
        }
        events
    }

    fn render_acknowledgment(&mut self, ctx: &Context) {
        let Some(message) = &self.acknowledgment else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("saved")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                if ui.button("ok").clicked() {
                    dismissed = true;
                }
            });
        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.acknowledgment = None;
        }
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let policy = if self.quit_requested { ShutdownPolicy::Quit } else { self.shutdown };
        window::handle_close_request(ctx, policy);
        window::handle_fullscreen_key(ctx);

        let blocked = self.acknowledgment.is_some();
        let can_export = self.mediamtx_config.is_some();
        let mut events = Vec::new();
        let mut quit = false;

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    ui.menu_button("file", |ui| {
                        if ui.button("save").clicked() {
                            events.push(FormEvent::Submit);
                            ui.close_menu();
                        }
                        if ui.button("reset camera defaults").clicked() {
                            events.push(FormEvent::ResetCameraDefaults);
                            ui.close_menu();
                        }
                        if ui
                            .add_enabled(can_export, egui::Button::new("apply camera to mediamtx.yml"))
                            .clicked()
                        {
                            events.push(FormEvent::ExportCamera);
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui.button("quit").clicked() {
                            quit = true;
                            ui.close_menu();
                        }
                    });
                    ui.menu_button("view", |ui| {
                        if ui.button("toggle full screen (F11)").clicked() {
                            window::toggle_fullscreen(ctx);
                            ui.close_menu();
                        }
                    });
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, &self.status);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(ctx.style().visuals.panel_fill).inner_margin(egui::Margin::same(20.0)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("settings");
                    ui.add_space(10.0);
                    let form = ui.add_enabled_ui(!blocked, |ui| self.render_form(ui));
                    events.extend(form.inner);
                });
            });

        self.render_acknowledgment(ctx);

        if quit {
            self.quit_requested = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        for event in events {
            self.dispatch(ctx, event);
        }
    }
}
