//! Application resources the preference layer reads at startup.

use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::PrefsError;

/// Packed ARGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// A font asset: the face name plus its raw TTF/OTF bytes, shared
/// cheaply between the table and the active selection.
#[derive(Clone)]
pub struct FontFace {
    name: String,
    data: Arc<[u8]>,
}

impl FontFace {
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Provider of the fixed resources resolved at initialization.
pub trait ResourceProvider: Debug {
    /// Color drawn behind translucent system bars.
    fn system_bar_color(&self) -> Color;

    /// Name of the font selected when the store holds none.
    fn default_font_name(&self) -> &str;

    /// Bundled font asset registered under `name`. A missing asset is a
    /// packaging defect reported with the offending name.
    fn font(&self, name: &str) -> Result<FontFace, PrefsError>;
}

/// In-memory resource set. Hosts register the bundled font bytes at
/// startup; tests register placeholders.
#[derive(Debug)]
pub struct StaticResources {
    system_bar_color: Color,
    default_font_name: String,
    fonts: BTreeMap<String, FontFace>,
}

impl StaticResources {
    pub fn new(system_bar_color: Color, default_font_name: impl Into<String>) -> Self {
        Self {
            system_bar_color,
            default_font_name: default_font_name.into(),
            fonts: BTreeMap::new(),
        }
    }

    /// Registers the asset bytes for one font name.
    pub fn with_font(mut self, name: &str, data: impl Into<Arc<[u8]>>) -> Self {
        self.fonts.insert(name.to_string(), FontFace::new(name, data));
        self
    }
}

impl ResourceProvider for StaticResources {
    fn system_bar_color(&self) -> Color {
        self.system_bar_color
    }

    fn default_font_name(&self) -> &str {
        &self.default_font_name
    }

    fn font(&self, name: &str) -> Result<FontFace, PrefsError> {
        self.fonts
            .get(name)
            .cloned()
            .ok_or_else(|| PrefsError::UnknownFont(name.to_string()))
    }
}
