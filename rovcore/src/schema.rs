//! Typed schema of the topside settings form.
//!
//! Every control the form renders and every key the submitted record carries
//! is a [`FieldId`]. The element id string is the camelCase key used in the
//! serialized record and in the ROV's mediamtx config.

use crate::value::{format_number, FieldValue};

/// Inclusive numeric range with a suggested edit step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Digits after the decimal point in `step`.
    pub fn decimals(&self) -> usize {
        let step = format_number(self.step);
        step.split_once('.').map_or(0, |(_, frac)| frac.len())
    }

    /// Text for a value a widget stepped through this range, rounded to the
    /// step's precision.
    pub fn format(&self, value: f64) -> String {
        let scale = 10f64.powi(self.decimals() as i32);
        format_number((value * scale).round() / scale)
    }
}

/// What kind of control backs a field, and how its value is read on submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Drop-down with a fixed option list. Read as a string.
    Select(&'static [&'static str]),
    /// Read as a boolean (checked state).
    Checkbox,
    /// Free text. Read as a string.
    Text,
    /// Numeric input. Read as a number.
    Number(NumericRange),
    /// Slider with a paired numeric display. Read as a number.
    Slider(NumericRange),
}

pub const RESOLUTIONS: &[&str] = &["1080p", "720p", "480p"];
pub const JOYSTICKS: &[&str] = &["xbox", "ps4", "wheel", "gamepad"];
pub const THEMES: &[&str] = &["tech", "dark", "light", "ocean"];
/// Sensor modes as `width:height:bit-depth`.
pub const CAMERA_MODES: &[&str] = &["1640:1232:8", "1920:1080:10", "3280:2464:10", "640:480:10"];
pub const EXPOSURE_MODES: &[&str] = &["normal", "short", "long", "custom"];
pub const AWB_MODES: &[&str] = &[
    "auto",
    "incandescent",
    "tungsten",
    "fluorescent",
    "indoor",
    "daylight",
    "cloudy",
    "custom",
];
pub const DENOISE_MODES: &[&str] = &["off", "cdn_off", "cdn_fast", "cdn_hq"];
pub const METERING_MODES: &[&str] = &["centre", "spot", "matrix", "custom"];
pub const AF_MODES: &[&str] = &["auto", "manual", "continuous"];

/// A named field of the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Resolution,
    Joystick,
    AutoConnect,
    Theme,
    StreamIp,
    RpiCameraMode,
    RpiCameraWidth,
    RpiCameraHeight,
    RpiCameraFps,
    RpiCameraBitrate,
    RpiCameraIdrPeriod,
    RpiCameraVFlip,
    RpiCameraHFlip,
    RpiCameraBrightness,
    RpiCameraContrast,
    RpiCameraSaturation,
    RpiCameraSharpness,
    RpiCameraExposure,
    RpiCameraAwb,
    RpiCameraDenoise,
    RpiCameraMetering,
    RpiCameraShutter,
    RpiCameraGain,
    RpiCameraAfMode,
}

impl FieldId {
    /// All fields, in record order.
    pub const ALL: [FieldId; 24] = [
        FieldId::Resolution,
        FieldId::Joystick,
        FieldId::AutoConnect,
        FieldId::Theme,
        FieldId::StreamIp,
        FieldId::RpiCameraMode,
        FieldId::RpiCameraWidth,
        FieldId::RpiCameraHeight,
        FieldId::RpiCameraFps,
        FieldId::RpiCameraBitrate,
        FieldId::RpiCameraIdrPeriod,
        FieldId::RpiCameraVFlip,
        FieldId::RpiCameraHFlip,
        FieldId::RpiCameraBrightness,
        FieldId::RpiCameraContrast,
        FieldId::RpiCameraSaturation,
        FieldId::RpiCameraSharpness,
        FieldId::RpiCameraExposure,
        FieldId::RpiCameraAwb,
        FieldId::RpiCameraDenoise,
        FieldId::RpiCameraMetering,
        FieldId::RpiCameraShutter,
        FieldId::RpiCameraGain,
        FieldId::RpiCameraAfMode,
    ];

    /// Slider fields that own a paired numeric display.
    pub const SLIDER_PAIRS: [FieldId; 4] = [
        FieldId::RpiCameraBrightness,
        FieldId::RpiCameraContrast,
        FieldId::RpiCameraSaturation,
        FieldId::RpiCameraSharpness,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            FieldId::Resolution => "resolution",
            FieldId::Joystick => "joystick",
            FieldId::AutoConnect => "autoConnect",
            FieldId::Theme => "theme",
            FieldId::StreamIp => "streamIP",
            FieldId::RpiCameraMode => "rpiCameraMode",
            FieldId::RpiCameraWidth => "rpiCameraWidth",
            FieldId::RpiCameraHeight => "rpiCameraHeight",
            FieldId::RpiCameraFps => "rpiCameraFPS",
            FieldId::RpiCameraBitrate => "rpiCameraBitrate",
            FieldId::RpiCameraIdrPeriod => "rpiCameraIDRPeriod",
            FieldId::RpiCameraVFlip => "rpiCameraVFlip",
            FieldId::RpiCameraHFlip => "rpiCameraHFlip",
            FieldId::RpiCameraBrightness => "rpiCameraBrightness",
            FieldId::RpiCameraContrast => "rpiCameraContrast",
            FieldId::RpiCameraSaturation => "rpiCameraSaturation",
            FieldId::RpiCameraSharpness => "rpiCameraSharpness",
            FieldId::RpiCameraExposure => "rpiCameraExposure",
            FieldId::RpiCameraAwb => "rpiCameraAWB",
            FieldId::RpiCameraDenoise => "rpiCameraDenoise",
            FieldId::RpiCameraMetering => "rpiCameraMetering",
            FieldId::RpiCameraShutter => "rpiCameraShutter",
            FieldId::RpiCameraGain => "rpiCameraGain",
            FieldId::RpiCameraAfMode => "rpiCameraAfMode",
        }
    }

    /// Element id of the numeric display paired with a slider (`<id>Val`).
    pub fn display_element_id(self) -> Option<&'static str> {
        match self {
            FieldId::RpiCameraBrightness => Some("rpiCameraBrightnessVal"),
            FieldId::RpiCameraContrast => Some("rpiCameraContrastVal"),
            FieldId::RpiCameraSaturation => Some("rpiCameraSaturationVal"),
            FieldId::RpiCameraSharpness => Some("rpiCameraSharpnessVal"),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Resolution => "resolution",
            FieldId::Joystick => "joystick",
            FieldId::AutoConnect => "auto-connect",
            FieldId::Theme => "theme",
            FieldId::StreamIp => "stream address",
            FieldId::RpiCameraMode => "sensor mode",
            FieldId::RpiCameraWidth => "width",
            FieldId::RpiCameraHeight => "height",
            FieldId::RpiCameraFps => "fps",
            FieldId::RpiCameraBitrate => "bitrate",
            FieldId::RpiCameraIdrPeriod => "IDR period",
            FieldId::RpiCameraVFlip => "flip vertical",
            FieldId::RpiCameraHFlip => "flip horizontal",
            FieldId::RpiCameraBrightness => "brightness",
            FieldId::RpiCameraContrast => "contrast",
            FieldId::RpiCameraSaturation => "saturation",
            FieldId::RpiCameraSharpness => "sharpness",
            FieldId::RpiCameraExposure => "exposure",
            FieldId::RpiCameraAwb => "white balance",
            FieldId::RpiCameraDenoise => "denoise",
            FieldId::RpiCameraMetering => "metering",
            FieldId::RpiCameraShutter => "shutter (µs)",
            FieldId::RpiCameraGain => "gain",
            FieldId::RpiCameraAfMode => "autofocus",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Resolution => FieldKind::Select(RESOLUTIONS),
            FieldId::Joystick => FieldKind::Select(JOYSTICKS),
            FieldId::AutoConnect => FieldKind::Checkbox,
            FieldId::Theme => FieldKind::Select(THEMES),
            FieldId::StreamIp => FieldKind::Text,
            FieldId::RpiCameraMode => FieldKind::Select(CAMERA_MODES),
            FieldId::RpiCameraWidth => FieldKind::Number(NumericRange::new(16.0, 3280.0, 1.0)),
            FieldId::RpiCameraHeight => FieldKind::Number(NumericRange::new(16.0, 2464.0, 1.0)),
            FieldId::RpiCameraFps => FieldKind::Number(NumericRange::new(1.0, 120.0, 1.0)),
            FieldId::RpiCameraBitrate => {
                FieldKind::Number(NumericRange::new(10_000.0, 25_000_000.0, 10_000.0))
            }
            FieldId::RpiCameraIdrPeriod => FieldKind::Number(NumericRange::new(1.0, 600.0, 1.0)),
            FieldId::RpiCameraVFlip | FieldId::RpiCameraHFlip => FieldKind::Checkbox,
            FieldId::RpiCameraBrightness => FieldKind::Slider(NumericRange::new(-1.0, 1.0, 0.05)),
            FieldId::RpiCameraContrast
            | FieldId::RpiCameraSaturation
            | FieldId::RpiCameraSharpness => FieldKind::Slider(NumericRange::new(0.0, 16.0, 0.1)),
            FieldId::RpiCameraExposure => FieldKind::Select(EXPOSURE_MODES),
            FieldId::RpiCameraAwb => FieldKind::Select(AWB_MODES),
            FieldId::RpiCameraDenoise => FieldKind::Select(DENOISE_MODES),
            FieldId::RpiCameraMetering => FieldKind::Select(METERING_MODES),
            FieldId::RpiCameraShutter => {
                FieldKind::Number(NumericRange::new(0.0, 1_000_000.0, 100.0))
            }
            FieldId::RpiCameraGain => FieldKind::Number(NumericRange::new(0.0, 16.0, 0.1)),
            FieldId::RpiCameraAfMode => FieldKind::Select(AF_MODES),
        }
    }

    /// Fields forwarded to the camera (the `rpiCamera*` keys).
    pub fn is_camera(self) -> bool {
        self >= FieldId::RpiCameraMode
    }

    pub fn is_slider(self) -> bool {
        matches!(self.kind(), FieldKind::Slider(_))
    }

    /// Value a freshly rendered form starts with.
    ///
    /// Camera fields use the stream defaults the ROV applies on first boot.
    pub fn default_value(self) -> FieldValue {
        let text = |s: &str| FieldValue::Text(s.to_string());
        let number = |n: f64| FieldValue::Text(format_number(n));
        match self {
            FieldId::Resolution => text("1080p"),
            FieldId::Joystick => text("xbox"),
            FieldId::AutoConnect => FieldValue::Checked(false),
            FieldId::Theme => text("tech"),
            FieldId::StreamIp => text(""),
            FieldId::RpiCameraMode => text("1640:1232:8"),
            FieldId::RpiCameraWidth => number(360.0),
            FieldId::RpiCameraHeight => number(240.0),
            FieldId::RpiCameraFps => number(30.0),
            FieldId::RpiCameraBitrate => number(500_000.0),
            FieldId::RpiCameraIdrPeriod => number(60.0),
            FieldId::RpiCameraVFlip | FieldId::RpiCameraHFlip => FieldValue::Checked(false),
            FieldId::RpiCameraBrightness => number(0.0),
            FieldId::RpiCameraContrast
            | FieldId::RpiCameraSaturation
            | FieldId::RpiCameraSharpness => number(1.0),
            FieldId::RpiCameraExposure => text("normal"),
            FieldId::RpiCameraAwb => text("auto"),
            FieldId::RpiCameraDenoise => text("off"),
            FieldId::RpiCameraMetering => text("centre"),
            FieldId::RpiCameraShutter | FieldId::RpiCameraGain => number(0.0),
            FieldId::RpiCameraAfMode => text("continuous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids_unique() {
        let mut ids: Vec<&str> = FieldId::ALL.iter().map(|f| f.element_id()).collect();
        ids.extend(FieldId::ALL.iter().filter_map(|f| f.display_element_id()));
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_range_decimals() {
        assert_eq!(NumericRange::new(-1.0, 1.0, 0.05).decimals(), 2);
        assert_eq!(NumericRange::new(0.0, 16.0, 0.1).decimals(), 1);
        assert_eq!(NumericRange::new(1.0, 120.0, 1.0).decimals(), 0);
        assert_eq!(NumericRange::new(0.0, 1e6, 100.0).decimals(), 0);
    }

    #[test]
    fn test_range_format_drops_snap_error() {
        // egui snaps a slider value with start + ((v - start) / step).round() * step
        let snap = |range: NumericRange, v: f64| {
            range.min + ((v - range.min) / range.step).round() * range.step
        };
        let brightness = NumericRange::new(-1.0, 1.0, 0.05);
        assert_eq!(brightness.format(snap(brightness, 0.05)), "0.05");
        assert_eq!(brightness.format(snap(brightness, 0.15)), "0.15");
        assert_eq!(brightness.format(snap(brightness, 0.3)), "0.3");
        assert_eq!(brightness.format(snap(brightness, -1.0)), "-1");
        assert_eq!(brightness.format(snap(brightness, 0.0)), "0");

        let contrast = NumericRange::new(0.0, 16.0, 0.1);
        assert_eq!(contrast.format(snap(contrast, 0.3)), "0.3");
        assert_eq!(contrast.format(snap(contrast, 1.7)), "1.7");

        let fps = NumericRange::new(1.0, 120.0, 1.0);
        assert_eq!(fps.format(30.0), "30");
        assert_eq!(fps.format(29.6), "30");
    }

    #[test]
    fn test_only_sliders_have_displays() {
        for field in FieldId::ALL {
            assert_eq!(field.display_element_id().is_some(), field.is_slider());
        }
        assert_eq!(
            FieldId::RpiCameraContrast.display_element_id(),
            Some("rpiCameraContrastVal")
        );
        assert!(FieldId::SLIDER_PAIRS.iter().all(|f| f.is_slider()));
    }

    #[test]
    fn test_camera_fields() {
        let camera: Vec<_> = FieldId::ALL.into_iter().filter(|f| f.is_camera()).collect();
        assert_eq!(camera.len(), 19);
        assert!(camera.iter().all(|f| f.element_id().starts_with("rpiCamera")));
        assert!(!FieldId::StreamIp.is_camera());
    }

    #[test]
    fn test_defaults_match_kind() {
        for field in FieldId::ALL {
            let default = field.default_value();
            match field.kind() {
                FieldKind::Checkbox => assert!(default.as_checked().is_some()),
                FieldKind::Select(options) => {
                    let value = default.as_text().unwrap();
                    assert!(options.contains(&value), "{value} not an option of {field:?}");
                }
                _ => assert!(default.as_text().is_some()),
            }
        }
    }
}
