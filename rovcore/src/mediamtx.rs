//! Camera settings in the ROV's mediamtx config.
//!
//! The ROV serves its Pi camera through mediamtx; the `rpiCamera*` keys of the
//! `paths.cam` section control it. [`CameraSettings`] is the camera slice of a
//! submitted record and [`apply_camera_settings`] merges it into a config file,
//! leaving every other key untouched.

use crate::record::{ConfigRecord, RecordValue};
use crate::schema::FieldId;
use crate::storage::{Result, StorageError};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::info;

/// One camera setting as mediamtx expects it.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl CameraValue {
    fn from_number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            CameraValue::Integer(n as i64)
        } else {
            CameraValue::Float(n)
        }
    }

    fn to_yaml(&self) -> Value {
        match self {
            CameraValue::Text(s) => Value::String(s.clone()),
            CameraValue::Integer(n) => Value::Number((*n).into()),
            CameraValue::Float(n) => Value::Number((*n).into()),
            CameraValue::Flag(b) => Value::Bool(*b),
        }
    }
}

/// The `rpiCamera*` entries of a record, in schema order.
///
/// Entries whose control was missing from the page are left out so they
/// don't clobber what the file already has.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraSettings {
    entries: Vec<(FieldId, CameraValue)>,
}

impl CameraSettings {
    pub fn from_record(record: &ConfigRecord) -> Self {
        let entries = FieldId::ALL
            .into_iter()
            .filter(|f| f.is_camera())
            .filter_map(|field| {
                let value = match record.get(field) {
                    RecordValue::Text(text) => CameraValue::Text(text?.to_string()),
                    RecordValue::Number(n) => CameraValue::from_number(n),
                    RecordValue::Flag(flag) => CameraValue::Flag(flag?),
                };
                Some((field, value))
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: FieldId) -> Option<&CameraValue> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CameraValue)> {
        self.entries.iter().map(|(f, v)| (f.element_id(), v))
    }

    /// Merge into a parsed mediamtx document. Returns false, leaving the
    /// document as it was, when there is no `paths.cam` mapping.
    pub fn merge_into(&self, doc: &mut Value) -> bool {
        let Some(cam) = doc.get_mut("paths").and_then(|paths| paths.get_mut("cam")) else {
            return false;
        };
        if cam.is_null() {
            *cam = Value::Mapping(Mapping::new());
        }
        let Some(cam) = cam.as_mapping_mut() else {
            return false;
        };
        for (key, value) in self.iter() {
            cam.insert(Value::String(key.to_string()), value.to_yaml());
        }
        true
    }
}

/// Write `settings` into the `paths.cam` section of the mediamtx config at `path`.
pub fn apply_camera_settings(path: &Path, settings: &CameraSettings) -> Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let mut doc: Value = serde_yaml::from_str(&contents)?;
    if !settings.merge_into(&mut doc) {
        return Err(StorageError::MissingCamPath(path.to_path_buf()));
    }
    std::fs::write(path, serde_yaml::to_string(&doc)?)?;
    info!(path = %path.display(), entries = settings.len(), "camera config updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ElementId, FormState};
    use crate::value::FieldValue;

    const MEDIAMTX: &str = r#"logLevel: info
rtspAddress: ":8554"
paths:
  cam:
    source: rpiCamera
    rpiCameraWidth: 1920
  other:
    source: publisher
"#;

    fn defaults() -> CameraSettings {
        CameraSettings::from_record(&ConfigRecord::from_form(&FormState::from_schema()))
    }

    #[test]
    fn test_projection_types() {
        let settings = defaults();
        assert_eq!(settings.len(), 19);
        assert_eq!(settings.get(FieldId::RpiCameraWidth), Some(&CameraValue::Integer(360)));
        assert_eq!(settings.get(FieldId::RpiCameraVFlip), Some(&CameraValue::Flag(false)));
        assert_eq!(
            settings.get(FieldId::RpiCameraAfMode),
            Some(&CameraValue::Text("continuous".into()))
        );
        assert_eq!(settings.get(FieldId::StreamIp), None);
        assert!(settings.iter().all(|(key, _)| key.starts_with("rpiCamera")));
    }

    #[test]
    fn test_projection_skips_missing() {
        let form = FormState::from_schema()
            .without(ElementId::Field(FieldId::RpiCameraAwb))
            .without(ElementId::Field(FieldId::RpiCameraHFlip))
            .with(ElementId::Field(FieldId::RpiCameraGain), FieldValue::text("1.5"));
        let settings = CameraSettings::from_record(&ConfigRecord::from_form(&form));
        assert_eq!(settings.len(), 17);
        assert_eq!(settings.get(FieldId::RpiCameraGain), Some(&CameraValue::Float(1.5)));
    }

    #[test]
    fn test_apply_updates_cam_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediamtx.yml");
        std::fs::write(&path, MEDIAMTX).unwrap();

        apply_camera_settings(&path, &defaults()).unwrap();

        let doc: Value = serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let cam = &doc["paths"]["cam"];
        assert_eq!(cam["source"], Value::from("rpiCamera"));
        assert_eq!(cam["rpiCameraWidth"], Value::from(360));
        assert_eq!(cam["rpiCameraBitrate"], Value::from(500000));
        assert_eq!(cam["rpiCameraMetering"], Value::from("centre"));
        assert_eq!(cam["rpiCameraHFlip"], Value::from(false));
        assert_eq!(doc["paths"]["other"]["source"], Value::from("publisher"));
        assert_eq!(doc["logLevel"], Value::from("info"));
        assert_eq!(doc["rtspAddress"], Value::from(":8554"));
    }

    #[test]
    fn test_apply_fills_empty_cam() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediamtx.yml");
        std::fs::write(&path, "paths:\n  cam:\n").unwrap();

        apply_camera_settings(&path, &defaults()).unwrap();
        let doc: Value = serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["paths"]["cam"]["rpiCameraFPS"], Value::from(30));
    }

    #[test]
    fn test_apply_without_cam_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediamtx.yml");
        std::fs::write(&path, "paths:\n  all: {}\n").unwrap();

        let err = apply_camera_settings(&path, &defaults()).unwrap_err();
        assert!(matches!(err, StorageError::MissingCamPath(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "paths:\n  all: {}\n");
    }

    #[test]
    fn test_apply_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = apply_camera_settings(&dir.path().join("nope.yml"), &defaults()).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
