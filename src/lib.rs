//! # shader-prefs
//!
//! Typed, validated preferences for a live-wallpaper shader editor.
//!
//! This crate bridges a persisted string-keyed settings store and the
//! strongly-typed configuration values the rest of the application
//! consumes. Each value is decoded independently with a typed fallback,
//! cached as a plain field, and exposed through getters and
//! write-through setters.
//!
//! The design priorities are:
//!
//! - **Explicit contract:** every decode is a named function returning
//!   result-or-previous-value; nothing is validated implicitly.
//! - **Resilience:** a missing or malformed stored value keeps the
//!   previous in-memory value, so [`Preferences::refresh`] is idempotent
//!   and survives transient store errors.
//! - **Safety:** the file-backed store writes through a temporary file
//!   so a crash cannot corrupt existing data.
//! - **Easy unit testing:** the store and resource collaborators are
//!   traits; [`MemoryStore`] and [`StaticResources`] run everything
//!   in-process.
//!
//! The one hard failure is an unknown font name: the shipped font table
//! is fixed, and a stored name outside it is a configuration defect
//! reported with the offending name, never papered over.
//!
//! ## Example
//!
//! ```rust
//! use shader_prefs::{Color, MemoryStore, Preferences, StaticResources, BUNDLED_FONTS};
//!
//! let mut resources = StaticResources::new(Color::argb(0x66, 0x00, 0x00, 0x00), "roboto_mono");
//! for name in BUNDLED_FONTS {
//!     // A real host registers the bundled TTF bytes here.
//!     resources = resources.with_font(name, vec![0u8; 4]);
//! }
//!
//! let mut prefs = Preferences::init(&resources, Box::new(MemoryStore::new()))?;
//! assert_eq!(prefs.tab_width(), 4);
//! assert!(prefs.runs_on_change());
//!
//! prefs.set_wallpaper_shader(42);
//! assert_eq!(prefs.wallpaper_shader(), 42);
//! # Ok::<(), shader_prefs::PrefsError>(())
//! ```

pub mod fonts;
pub mod preferences;
pub mod resources;
pub mod storage;

pub use fonts::{FontTable, BUNDLED_FONTS};
pub use preferences::{keys, Preferences, RunMode, SensorDelay};
pub use resources::{Color, FontFace, ResourceProvider, StaticResources};
pub use storage::{BackingStore, Editor, MemoryStore, PrefValue, TomlStore};

use thiserror::Error;

/// Failures surfaced by the preference layer.
///
/// Recoverable conditions (missing keys, malformed numbers, unknown
/// enum encodings) never reach this type; they are absorbed by keeping
/// the previous value.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// A font name outside the bundled table was requested.
    #[error("font {0:?} not found")]
    UnknownFont(String),

    /// The preferences file exists but is not valid TOML.
    #[error("malformed preferences file {path}: {source}")]
    Malformed {
        path: String,
        source: toml::de::Error,
    },

    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}
