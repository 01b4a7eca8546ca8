//! Settings form controller
//!
//! The page is an explicit [`FormState`]: the controls that exist and their
//! values, plus the body theme class. [`FormController`] owns the behavior.
//! It is set up once per page load and afterwards turns each [`FormEvent`]
//! into state changes and a list of [`Effect`]s. The UI layer renders the
//! state and carries out the effects; nothing here touches egui or disk.
//!
//! Listeners follow the page that was loaded: theme changes are only
//! handled if the theme selector existed at load, a slider pair only syncs if
//! both halves existed, and submit only works if the form existed.

use crate::mediamtx::CameraSettings;
use crate::record::ConfigRecord;
use crate::schema::FieldId;
use crate::storage::{PreferenceKey, PreferenceStore};
use crate::theme::Theme;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Acknowledgment shown after every submit.
pub const SAVED_MESSAGE: &str = "settings saved (not persisted yet)";

/// Identifies one control on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    /// The control backing a schema field.
    Field(FieldId),
    /// The numeric display paired with a slider field.
    Display(FieldId),
}

impl ElementId {
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::Field(field) => field.element_id(),
            ElementId::Display(field) => field.display_element_id().unwrap_or(""),
        }
    }
}

/// Current contents of the settings page.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: BTreeMap<ElementId, FieldValue>,
    body_class: String,
    has_form: bool,
}

impl FormState {
    /// A page with no controls and no form.
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
            body_class: String::new(),
            has_form: false,
        }
    }

    /// The full settings page: every schema field at its default, an empty
    /// display next to each slider, and the form itself.
    pub fn from_schema() -> Self {
        let mut state = Self::empty();
        for field in FieldId::ALL {
            state.insert(ElementId::Field(field), field.default_value());
        }
        for field in FieldId::SLIDER_PAIRS {
            state.insert(ElementId::Display(field), FieldValue::text(""));
        }
        state.has_form = true;
        state
    }

    pub fn with_form(mut self, present: bool) -> Self {
        self.has_form = present;
        self
    }

    pub fn with(mut self, element: ElementId, value: FieldValue) -> Self {
        self.insert(element, value);
        self
    }

    pub fn without(mut self, element: ElementId) -> Self {
        self.values.remove(&element);
        self
    }

    pub fn insert(&mut self, element: ElementId, value: FieldValue) {
        self.values.insert(element, value);
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.values.contains_key(&element)
    }

    pub fn get(&self, element: ElementId) -> Option<&FieldValue> {
        self.values.get(&element)
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.get(element).and_then(FieldValue::as_text)
    }

    pub fn checked(&self, element: ElementId) -> Option<bool> {
        self.get(element).and_then(FieldValue::as_checked)
    }

    pub fn body_class(&self) -> &str {
        &self.body_class
    }

    pub fn has_form(&self) -> bool {
        self.has_form
    }

    /// Overwrite an existing control's value. Missing controls are left alone.
    fn assign(&mut self, element: ElementId, value: FieldValue) -> bool {
        match self.values.get_mut(&element) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// What to do with the stream address when the form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamIpPolicy {
    /// Always store the submitted address, even when empty or missing.
    /// A previously saved address is cleared by an empty submit.
    #[default]
    Overwrite,
    /// Only store non-blank addresses.
    NonEmptyOnly,
}

/// User interaction with the page.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A control's value changed.
    Edit { element: ElementId, value: FieldValue },
    /// The settings form was submitted.
    Submit,
    /// Restore every camera field to the stream defaults.
    ResetCameraDefaults,
    /// Write the camera fields into the ROV's mediamtx config.
    ExportCamera,
}

impl FormEvent {
    pub fn edit(element: ElementId, value: FieldValue) -> Self {
        FormEvent::Edit { element, value }
    }
}

/// Side effects the UI layer must carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Restyle the window for a theme.
    ApplyTheme(Theme),
    /// Write a preference.
    Persist { key: PreferenceKey, value: String },
    /// Dump a submitted record to the diagnostic log.
    EmitRecord(ConfigRecord),
    /// Show a blocking acknowledgment.
    Acknowledge(String),
    /// Apply camera settings to the configured mediamtx file.
    WriteCameraSettings(CameraSettings),
}

/// Event handling for one loaded settings page.
#[derive(Debug, Clone)]
pub struct FormController {
    policy: StreamIpPolicy,
    theme_bound: bool,
    synced: BTreeSet<FieldId>,
    submit_bound: bool,
}

impl FormController {
    /// Restore preferences into the page and bind listeners to whatever
    /// controls exist. Returns the controller and the effects of loading.
    pub fn initialize(
        state: &mut FormState,
        prefs: &dyn PreferenceStore,
        policy: StreamIpPolicy,
    ) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        let theme_element = ElementId::Field(FieldId::Theme);
        let theme_bound = state.contains(theme_element);
        if theme_bound {
            let theme = prefs
                .get(PreferenceKey::GuiTheme)
                .and_then(|name| Theme::from_name(&name))
                .unwrap_or_default();
            state.assign(theme_element, FieldValue::text(theme.name()));
            state.body_class = theme.body_class();
            effects.push(Effect::ApplyTheme(theme));
        }

        let ip_element = ElementId::Field(FieldId::StreamIp);
        if let Some(saved) = prefs.get(PreferenceKey::StreamIp).filter(|ip| !ip.is_empty()) {
            state.assign(ip_element, FieldValue::Text(saved));
        }

        let mut synced = BTreeSet::new();
        for field in FieldId::SLIDER_PAIRS {
            let slider = ElementId::Field(field);
            let display = ElementId::Display(field);
            if let (Some(value), true) = (state.get(slider).cloned(), state.contains(display)) {
                state.assign(display, value);
                synced.insert(field);
            }
        }

        let controller = Self {
            policy,
            theme_bound,
            synced,
            submit_bound: state.has_form(),
        };
        (controller, effects)
    }

    pub fn handle(&self, state: &mut FormState, event: FormEvent) -> Vec<Effect> {
        match event {
            FormEvent::Edit { element, value } => self.on_edit(state, element, value),
            FormEvent::Submit => self.on_submit(state),
            FormEvent::ResetCameraDefaults => self.on_reset_camera(state),
            FormEvent::ExportCamera => {
                let record = ConfigRecord::from_form(state);
                vec![Effect::WriteCameraSettings(CameraSettings::from_record(&record))]
            }
        }
    }

    fn on_edit(&self, state: &mut FormState, element: ElementId, value: FieldValue) -> Vec<Effect> {
        if !state.assign(element, value.clone()) {
            return Vec::new();
        }
        match element {
            ElementId::Field(FieldId::Theme) if self.theme_bound => {
                let name = value.as_text().unwrap_or_default().to_string();
                state.body_class = format!("theme-{name}");
                let mut effects = Vec::new();
                if let Some(theme) = Theme::from_name(&name) {
                    effects.push(Effect::ApplyTheme(theme));
                }
                effects.push(Effect::Persist {
                    key: PreferenceKey::GuiTheme,
                    value: name,
                });
                effects
            }
            ElementId::Field(field) if self.synced.contains(&field) => {
                state.assign(ElementId::Display(field), value);
                Vec::new()
            }
            ElementId::Display(field) if self.synced.contains(&field) => {
                state.assign(ElementId::Field(field), value);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_submit(&self, state: &FormState) -> Vec<Effect> {
        if !self.submit_bound {
            return Vec::new();
        }
        let record = ConfigRecord::from_form(state);
        let stream_ip = record.stream_ip.clone().unwrap_or_default();
        let persist = match self.policy {
            StreamIpPolicy::Overwrite => true,
            StreamIpPolicy::NonEmptyOnly => !stream_ip.trim().is_empty(),
        };

        let mut effects = vec![Effect::EmitRecord(record)];
        if persist {
            effects.push(Effect::Persist {
                key: PreferenceKey::StreamIp,
                value: stream_ip,
            });
        }
        effects.push(Effect::Acknowledge(SAVED_MESSAGE.to_string()));
        effects
    }

    fn on_reset_camera(&self, state: &mut FormState) -> Vec<Effect> {
        for field in FieldId::ALL.into_iter().filter(|f| f.is_camera()) {
            let default = field.default_value();
            state.assign(ElementId::Field(field), default.clone());
            if self.synced.contains(&field) {
                state.assign(ElementId::Display(field), default);
            }
        }
        Vec::new()
    }
}
