//! rovcore: shared library for the ROV topside console

pub mod form;
pub mod mediamtx;
pub mod record;
pub mod schema;
pub mod storage;
pub mod theme;
pub mod value;
pub mod widgets;

pub use form::{Effect, ElementId, FormController, FormEvent, FormState, StreamIpPolicy};
pub use record::ConfigRecord;
pub use schema::FieldId;
pub use storage::{JsonPreferences, PreferenceKey, PreferenceStore};
pub use theme::{Theme, ThemeStyle};
