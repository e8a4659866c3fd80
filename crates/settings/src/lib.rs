//! Settings model for the modal editing engine.
//!
//! Settings live in [`SettingsRegistry`] instances grouped into three scopes:
//!
//! * [`GlobalSettings`]: one per engine, shared by every session.
//! * [`LocalSettings`]: one per text buffer.
//! * [`WindowSettings`]: one per view.
//!
//! Local and window scopes hold a handle to the global scope rather than
//! shadowing its names; each setting lives in exactly one scope.

/// Error types for setting mutation.
pub mod error;
/// Bit flag views over comma separated settings.
pub mod flags;
/// Global scope.
pub mod global;
/// Buffer-local scope.
pub mod local;
/// String to value parsing.
pub mod parse;
/// Named setting collections with change notification.
pub mod registry;
/// Setting values and definitions.
pub mod value;
/// Per-view scope.
pub mod window;

pub use error::{Result, SettingError};
pub use flags::{ClipboardOptions, KeyModelOptions, NumberFormat, SelectModeOptions};
pub use global::GlobalSettings;
pub use local::LocalSettings;
pub use registry::{ObserverId, SettingChanged, SettingsRegistry};
pub use value::{ComputedValue, Setting, SettingKind, SettingValue};
pub use window::WindowSettings;
