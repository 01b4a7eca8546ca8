//! The flat configuration record assembled when the form is submitted.

use crate::form::{ElementId, FormState};
use crate::schema::FieldId;
use crate::value::parse_float;
use serde::{Deserialize, Serialize};

/// Device and display settings collected from the form.
///
/// String and boolean entries are `None` when their control is missing from
/// the page; numeric entries are 0 in that case. Serialized keys are the
/// element ids, and every key is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    pub resolution: Option<String>,
    pub joystick: Option<String>,
    pub auto_connect: Option<bool>,
    pub theme: Option<String>,
    #[serde(rename = "streamIP")]
    pub stream_ip: Option<String>,
    pub rpi_camera_mode: Option<String>,
    pub rpi_camera_width: f64,
    pub rpi_camera_height: f64,
    #[serde(rename = "rpiCameraFPS")]
    pub rpi_camera_fps: f64,
    pub rpi_camera_bitrate: f64,
    #[serde(rename = "rpiCameraIDRPeriod")]
    pub rpi_camera_idr_period: f64,
    pub rpi_camera_v_flip: Option<bool>,
    pub rpi_camera_h_flip: Option<bool>,
    pub rpi_camera_brightness: f64,
    pub rpi_camera_contrast: f64,
    pub rpi_camera_saturation: f64,
    pub rpi_camera_sharpness: f64,
    pub rpi_camera_exposure: Option<String>,
    #[serde(rename = "rpiCameraAWB")]
    pub rpi_camera_awb: Option<String>,
    pub rpi_camera_denoise: Option<String>,
    pub rpi_camera_metering: Option<String>,
    pub rpi_camera_shutter: f64,
    pub rpi_camera_gain: f64,
    pub rpi_camera_af_mode: Option<String>,
}

/// A single record entry, typed by how it was read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordValue<'a> {
    Text(Option<&'a str>),
    Number(f64),
    Flag(Option<bool>),
}

impl ConfigRecord {
    /// Read every schema field out of the page.
    pub fn from_form(form: &FormState) -> Self {
        let get = |field: FieldId| form.text(ElementId::Field(field)).map(str::to_string);
        let num = |field: FieldId| form.text(ElementId::Field(field)).map_or(0.0, parse_float);
        let flag = |field: FieldId| form.checked(ElementId::Field(field));

        Self {
            resolution: get(FieldId::Resolution),
            joystick: get(FieldId::Joystick),
            auto_connect: flag(FieldId::AutoConnect),
            theme: get(FieldId::Theme),
            stream_ip: get(FieldId::StreamIp),
            rpi_camera_mode: get(FieldId::RpiCameraMode),
            rpi_camera_width: num(FieldId::RpiCameraWidth),
            rpi_camera_height: num(FieldId::RpiCameraHeight),
            rpi_camera_fps: num(FieldId::RpiCameraFps),
            rpi_camera_bitrate: num(FieldId::RpiCameraBitrate),
            rpi_camera_idr_period: num(FieldId::RpiCameraIdrPeriod),
            rpi_camera_v_flip: flag(FieldId::RpiCameraVFlip),
            rpi_camera_h_flip: flag(FieldId::RpiCameraHFlip),
            rpi_camera_brightness: num(FieldId::RpiCameraBrightness),
            rpi_camera_contrast: num(FieldId::RpiCameraContrast),
            rpi_camera_saturation: num(FieldId::RpiCameraSaturation),
            rpi_camera_sharpness: num(FieldId::RpiCameraSharpness),
            rpi_camera_exposure: get(FieldId::RpiCameraExposure),
            rpi_camera_awb: get(FieldId::RpiCameraAwb),
            rpi_camera_denoise: get(FieldId::RpiCameraDenoise),
            rpi_camera_metering: get(FieldId::RpiCameraMetering),
            rpi_camera_shutter: num(FieldId::RpiCameraShutter),
            rpi_camera_gain: num(FieldId::RpiCameraGain),
            rpi_camera_af_mode: get(FieldId::RpiCameraAfMode),
        }
    }

    pub fn get(&self, field: FieldId) -> RecordValue<'_> {
        fn text(s: &Option<String>) -> RecordValue<'_> {
            RecordValue::Text(s.as_deref())
        }
        match field {
            FieldId::Resolution => text(&self.resolution),
            FieldId::Joystick => text(&self.joystick),
            FieldId::AutoConnect => RecordValue::Flag(self.auto_connect),
            FieldId::Theme => text(&self.theme),
            FieldId::StreamIp => text(&self.stream_ip),
            FieldId::RpiCameraMode => text(&self.rpi_camera_mode),
            FieldId::RpiCameraWidth => RecordValue::Number(self.rpi_camera_width),
            FieldId::RpiCameraHeight => RecordValue::Number(self.rpi_camera_height),
            FieldId::RpiCameraFps => RecordValue::Number(self.rpi_camera_fps),
            FieldId::RpiCameraBitrate => RecordValue::Number(self.rpi_camera_bitrate),
            FieldId::RpiCameraIdrPeriod => RecordValue::Number(self.rpi_camera_idr_period),
            FieldId::RpiCameraVFlip => RecordValue::Flag(self.rpi_camera_v_flip),
            FieldId::RpiCameraHFlip => RecordValue::Flag(self.rpi_camera_h_flip),
            FieldId::RpiCameraBrightness => RecordValue::Number(self.rpi_camera_brightness),
            FieldId::RpiCameraContrast => RecordValue::Number(self.rpi_camera_contrast),
            FieldId::RpiCameraSaturation => RecordValue::Number(self.rpi_camera_saturation),
            FieldId::RpiCameraSharpness => RecordValue::Number(self.rpi_camera_sharpness),
            FieldId::RpiCameraExposure => text(&self.rpi_camera_exposure),
            FieldId::RpiCameraAwb => text(&self.rpi_camera_awb),
            FieldId::RpiCameraDenoise => text(&self.rpi_camera_denoise),
            FieldId::RpiCameraMetering => text(&self.rpi_camera_metering),
            FieldId::RpiCameraShutter => RecordValue::Number(self.rpi_camera_shutter),
            FieldId::RpiCameraGain => RecordValue::Number(self.rpi_camera_gain),
            FieldId::RpiCameraAfMode => text(&self.rpi_camera_af_mode),
        }
    }

    /// Human-readable dump for the log.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("<unprintable record: {e}>"))
    }
}
