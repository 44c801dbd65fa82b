//! The fixed table of selectable editor fonts.

use std::collections::BTreeMap;

use crate::resources::{FontFace, ResourceProvider};
use crate::PrefsError;

/// Names of the bundled monospace fonts selectable in settings. The
/// persisted `font` key holds one of these.
pub const BUNDLED_FONTS: [&str; 5] = [
    "fira_code",
    "ibm_plex_mono",
    "jetbrains_mono",
    "roboto_mono",
    "source_code_pro",
];

/// Immutable name-to-face table, built once at initialization.
#[derive(Debug)]
pub struct FontTable {
    faces: BTreeMap<String, FontFace>,
}

impl FontTable {
    /// Loads every bundled font from `resources`.
    pub fn load(resources: &dyn ResourceProvider) -> Result<Self, PrefsError> {
        let mut faces = BTreeMap::new();
        for name in BUNDLED_FONTS {
            faces.insert(name.to_string(), resources.font(name)?);
        }
        Ok(Self { faces })
    }

    /// Looks up `name`, failing with the offending name when it is not
    /// one of the bundled fonts.
    pub fn get(&self, name: &str) -> Result<&FontFace, PrefsError> {
        self.faces
            .get(name)
            .ok_or_else(|| PrefsError::UnknownFont(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }
}
