//! The typed, validated view of the persisted editor settings.

use crate::fonts::FontTable;
use crate::resources::{Color, FontFace, ResourceProvider};
use crate::storage::{BackingStore, Editor, PrefValue};
use crate::PrefsError;

/// Persisted key identifiers. Stable across versions since they name
/// entries in the user's settings file.
pub mod keys {
    pub const WALLPAPER_SHADER: &str = "shader";
    pub const SAVE_BATTERY: &str = "save_battery";
    pub const RUN_MODE: &str = "run_mode";
    pub const UPDATE_DELAY: &str = "update_delay";
    pub const SENSOR_DELAY: &str = "sensor_delay";
    pub const TEXT_SIZE: &str = "text_size";
    pub const FONT: &str = "font";
    pub const USE_LIGATURES: &str = "use_ligatures";
    pub const TAB_WIDTH: &str = "tab_width";
    pub const SHOW_INSERT_TAB: &str = "show_insert_tab";
    pub const USE_TAB_FOR_INDENT: &str = "use_tab_for_indent";
    pub const EXPORT_TABS: &str = "export_tabs";
    pub const SAVE_ON_RUN: &str = "save_on_run";
    pub const DEFAULT_NEW_SHADER: &str = "default_new_shader";
    pub const DISABLE_HIGHLIGHTING: &str = "disable_highlighting";
    pub const AUTO_SAVE: &str = "auto_save";
    // Actions owned by the settings UI; no values are read under them.
    pub const IMPORT_FROM_DIRECTORY: &str = "import_from_directory";
    pub const EXPORT_TO_DIRECTORY: &str = "export_to_directory";
    pub const IMPORT_DATABASE: &str = "import_database";
    pub const EXPORT_DATABASE: &str = "export_database";
    pub const SHOW_LINE_NUMBERS: &str = "show_line_numbers";
}

/// How shader execution is triggered in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Recompile and run on every source change.
    Auto,
    /// Run only on explicit request.
    Manual,
    /// Run on request, never in the background.
    ManualExtra,
    /// Run on request in a separate task.
    ManualExtraNew,
}

impl RunMode {
    /// Decodes the persisted small-integer encoding.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(RunMode::Auto),
            2 => Some(RunMode::Manual),
            3 => Some(RunMode::ManualExtra),
            4 => Some(RunMode::ManualExtraNew),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RunMode::Auto => 1,
            RunMode::Manual => 2,
            RunMode::ManualExtra => 3,
            RunMode::ManualExtraNew => 4,
        }
    }
}

/// Sampling rate requested from the sensor service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDelay {
    Fastest,
    Game,
    Normal,
    Ui,
}

impl SensorDelay {
    /// Decodes the persisted name; `None` for unrecognized input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Fastest" => Some(SensorDelay::Fastest),
            "Game" => Some(SensorDelay::Game),
            "Normal" => Some(SensorDelay::Normal),
            "UI" => Some(SensorDelay::Ui),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SensorDelay::Fastest => "Fastest",
            SensorDelay::Game => "Game",
            SensorDelay::Normal => "Normal",
            SensorDelay::Ui => "UI",
        }
    }
}

/// Typed, validated view of the persisted editor settings.
///
/// Construct once at startup with [`Preferences::init`] and call
/// [`Preferences::refresh`] after the backing store changes. Accessors
/// read cached fields and never touch storage.
#[derive(Debug)]
pub struct Preferences {
    store: Box<dyn BackingStore>,
    fonts: FontTable,
    default_font: String,
    system_bar_color: Color,

    wallpaper_shader_id: i64,
    save_battery: bool,
    run_mode: RunMode,
    update_delay: i32,
    sensor_delay: SensorDelay,
    text_size: i32,
    font: FontFace,
    use_ligatures: bool,
    tab_width: i32,
    export_tabs: bool,
    show_insert_tab: bool,
    use_tab_for_indent: bool,
    save_on_run: bool,
    battery_low: bool,
    power_connected: bool,
    default_new_shader_id: i64,
    disable_highlighting: bool,
    auto_save: bool,
    show_line_numbers: bool,
}

impl Preferences {
    /// Resolves the startup resources, seeds defaults for unset keys
    /// into `store` (existing values are untouched), and performs one
    /// [`refresh`](Self::refresh).
    ///
    /// Fails when a bundled font is missing from `resources`, when the
    /// provider's default font name is not in the table, or when the
    /// store holds an unknown font name.
    pub fn init(
        resources: &dyn ResourceProvider,
        store: Box<dyn BackingStore>,
    ) -> Result<Self, PrefsError> {
        let system_bar_color = resources.system_bar_color();
        let fonts = FontTable::load(resources)?;
        let default_font = resources.default_font_name().to_string();
        let font = fonts.get(&default_font)?.clone();

        let mut prefs = Self {
            store,
            fonts,
            default_font,
            system_bar_color,
            wallpaper_shader_id: 1,
            save_battery: true,
            run_mode: RunMode::Auto,
            update_delay: 1000,
            sensor_delay: SensorDelay::Normal,
            text_size: 12,
            font,
            use_ligatures: true,
            tab_width: 4,
            export_tabs: false,
            show_insert_tab: true,
            use_tab_for_indent: true,
            save_on_run: true,
            battery_low: false,
            power_connected: false,
            default_new_shader_id: 0,
            disable_highlighting: false,
            auto_save: true,
            show_line_numbers: true,
        };
        prefs.seed_defaults();
        prefs.refresh()?;
        Ok(prefs)
    }

    // Writes the hard-coded defaults for every key the store does not
    // hold yet.
    fn seed_defaults(&mut self) {
        let defaults = [
            (keys::WALLPAPER_SHADER, PrefValue::Str("1".into())),
            (keys::SAVE_BATTERY, PrefValue::Bool(true)),
            (
                keys::RUN_MODE,
                PrefValue::Str(RunMode::Auto.code().to_string()),
            ),
            (keys::UPDATE_DELAY, PrefValue::Str("1000".into())),
            (
                keys::SENSOR_DELAY,
                PrefValue::Str(SensorDelay::Normal.name().into()),
            ),
            (keys::TEXT_SIZE, PrefValue::Str("12".into())),
            (keys::FONT, PrefValue::Str(self.default_font.clone())),
            (keys::USE_LIGATURES, PrefValue::Bool(true)),
            (keys::TAB_WIDTH, PrefValue::Str("4".into())),
            (keys::SHOW_INSERT_TAB, PrefValue::Bool(true)),
            (keys::USE_TAB_FOR_INDENT, PrefValue::Bool(true)),
            (keys::EXPORT_TABS, PrefValue::Bool(false)),
            (keys::SAVE_ON_RUN, PrefValue::Bool(true)),
            (keys::DEFAULT_NEW_SHADER, PrefValue::Str("0".into())),
            (keys::DISABLE_HIGHLIGHTING, PrefValue::Bool(false)),
            (keys::AUTO_SAVE, PrefValue::Bool(true)),
            (keys::SHOW_LINE_NUMBERS, PrefValue::Bool(true)),
        ];
        let missing: Vec<(&str, PrefValue)> = defaults
            .into_iter()
            .filter(|(key, _)| !self.store.contains(key))
            .collect();
        if missing.is_empty() {
            return;
        }
        let mut editor = Editor::new(self.store.as_mut());
        for (key, value) in missing {
            editor.put(key, value);
        }
    }

    /// Re-reads every persisted key and updates the cached fields.
    ///
    /// Each key is decoded independently; a missing or malformed value
    /// keeps the field's previous value. Only an unknown font name
    /// fails the call.
    pub fn refresh(&mut self) -> Result<(), PrefsError> {
        self.wallpaper_shader_id = parse_or(
            self.store.get_string(keys::WALLPAPER_SHADER),
            self.wallpaper_shader_id,
        );
        self.save_battery = self.store.get_bool(keys::SAVE_BATTERY, self.save_battery);
        self.run_mode = self
            .store
            .get_string(keys::RUN_MODE)
            .and_then(|s| s.parse().ok())
            .and_then(RunMode::from_code)
            .unwrap_or(self.run_mode);
        self.update_delay = parse_or(self.store.get_string(keys::UPDATE_DELAY), self.update_delay);
        self.sensor_delay = self
            .store
            .get_string(keys::SENSOR_DELAY)
            .and_then(|s| SensorDelay::from_name(&s))
            .unwrap_or(self.sensor_delay);
        self.text_size = parse_or(self.store.get_string(keys::TEXT_SIZE), self.text_size);
        let font_name = self
            .store
            .get_string(keys::FONT)
            .unwrap_or_else(|| self.default_font.clone());
        self.font = self.fonts.get(&font_name)?.clone();
        self.use_ligatures = self.store.get_bool(keys::USE_LIGATURES, self.use_ligatures);
        self.tab_width = parse_or(self.store.get_string(keys::TAB_WIDTH), self.tab_width);
        self.export_tabs = self.store.get_bool(keys::EXPORT_TABS, self.export_tabs);
        self.show_insert_tab = self
            .store
            .get_bool(keys::SHOW_INSERT_TAB, self.show_insert_tab);
        self.use_tab_for_indent = self
            .store
            .get_bool(keys::USE_TAB_FOR_INDENT, self.use_tab_for_indent);
        self.save_on_run = self.store.get_bool(keys::SAVE_ON_RUN, self.save_on_run);
        self.disable_highlighting = self
            .store
            .get_bool(keys::DISABLE_HIGHLIGHTING, self.disable_highlighting);
        self.auto_save = self.store.get_bool(keys::AUTO_SAVE, self.auto_save);
        self.default_new_shader_id = parse_or(
            self.store.get_string(keys::DEFAULT_NEW_SHADER),
            self.default_new_shader_id,
        );
        self.show_line_numbers = self
            .store
            .get_bool(keys::SHOW_LINE_NUMBERS, self.show_line_numbers);
        Ok(())
    }

    /// Direct handle to the backing store, for observers that need raw
    /// key access.
    pub fn store(&self) -> &dyn BackingStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn BackingStore {
        self.store.as_mut()
    }

    pub fn wallpaper_shader(&self) -> i64 {
        self.wallpaper_shader_id
    }

    /// Updates the active wallpaper shader and persists it.
    pub fn set_wallpaper_shader(&mut self, id: i64) {
        self.wallpaper_shader_id = id;
        self.put_string(keys::WALLPAPER_SHADER, id.to_string());
    }

    pub fn default_new_shader(&self) -> i64 {
        self.default_new_shader_id
    }

    /// Updates the template for newly created shaders and persists it.
    pub fn set_default_new_shader(&mut self, id: i64) {
        self.default_new_shader_id = id;
        self.put_string(keys::DEFAULT_NEW_SHADER, id.to_string());
    }

    pub fn save_battery(&self) -> bool {
        self.save_battery
    }

    /// True when the editor recompiles on every source change.
    pub fn runs_on_change(&self) -> bool {
        self.run_mode == RunMode::Auto
    }

    /// True unless the mode confines execution to the foreground.
    pub fn runs_in_background(&self) -> bool {
        !matches!(
            self.run_mode,
            RunMode::ManualExtra | RunMode::ManualExtraNew
        )
    }

    pub fn runs_in_new_task(&self) -> bool {
        self.run_mode == RunMode::ManualExtraNew
    }

    /// Frame delay in milliseconds.
    pub fn update_delay(&self) -> i32 {
        self.update_delay
    }

    pub fn sensor_delay(&self) -> SensorDelay {
        self.sensor_delay
    }

    /// Editor text size in points.
    pub fn text_size(&self) -> i32 {
        self.text_size
    }

    pub fn font(&self) -> &FontFace {
        &self.font
    }

    pub fn use_ligatures(&self) -> bool {
        self.use_ligatures
    }

    pub fn tab_width(&self) -> i32 {
        self.tab_width
    }

    pub fn export_tabs(&self) -> bool {
        self.export_tabs
    }

    pub fn show_insert_tab(&self) -> bool {
        self.show_insert_tab
    }

    pub fn use_tab_for_indent(&self) -> bool {
        self.use_tab_for_indent
    }

    pub fn save_on_run(&self) -> bool {
        self.save_on_run
    }

    pub fn highlighting_disabled(&self) -> bool {
        self.disable_highlighting
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn system_bar_color(&self) -> Color {
        self.system_bar_color
    }

    pub fn is_battery_low(&self) -> bool {
        self.battery_low
    }

    /// Driven by the host's battery-level observer; never persisted.
    pub fn set_battery_low(&mut self, is_low: bool) {
        self.battery_low = is_low;
    }

    pub fn is_power_connected(&self) -> bool {
        self.power_connected
    }

    /// Driven by the host's power-connection observer; never persisted.
    pub fn set_power_connected(&mut self, is_connected: bool) {
        self.power_connected = is_connected;
    }

    fn put_string(&mut self, key: &str, value: String) {
        Editor::new(self.store.as_mut()).put_string(key, value);
    }
}

// Parses a stored string, keeping `previous` on a missing key, empty
// string, or parse failure.
fn parse_or<T: std::str::FromStr>(stored: Option<String>, previous: T) -> T {
    match stored {
        Some(s) if !s.is_empty() => s.parse().unwrap_or(previous),
        _ => previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_keeps_previous_on_bad_input() {
        assert_eq!(parse_or::<i32>(None, 7), 7);
        assert_eq!(parse_or(Some(String::new()), 7), 7);
        assert_eq!(parse_or(Some("abc".to_string()), 7), 7);
        assert_eq!(parse_or(Some("12".to_string()), 7), 12);
        assert_eq!(parse_or(Some("-3".to_string()), 7i64), -3);
    }

    #[test]
    fn run_mode_codes_round_trip() {
        for code in 1..=4 {
            assert_eq!(RunMode::from_code(code).unwrap().code(), code);
        }
        assert_eq!(RunMode::from_code(0), None);
        assert_eq!(RunMode::from_code(5), None);
    }

    #[test]
    fn sensor_delay_names() {
        assert_eq!(SensorDelay::from_name("Fastest"), Some(SensorDelay::Fastest));
        assert_eq!(SensorDelay::from_name("Game"), Some(SensorDelay::Game));
        assert_eq!(SensorDelay::from_name("Normal"), Some(SensorDelay::Normal));
        assert_eq!(SensorDelay::from_name("UI"), Some(SensorDelay::Ui));
        assert_eq!(SensorDelay::from_name("ui"), None);
        assert_eq!(SensorDelay::from_name(""), None);
    }
}
