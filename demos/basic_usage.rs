//! Minimal end-to-end walkthrough: open a file-backed store,
//! initialize the preference layer, read a few values, change the
//! active shader.

use shader_prefs::{Color, Preferences, PrefsError, StaticResources, TomlStore, BUNDLED_FONTS};

fn main() -> Result<(), PrefsError> {
    let mut resources = StaticResources::new(Color::argb(0x66, 0x00, 0x00, 0x00), "roboto_mono");
    for name in BUNDLED_FONTS {
        // A real host registers the bundled TTF bytes here.
        resources = resources.with_font(name, vec![0u8; 4]);
    }

    let dir = std::env::temp_dir().join("shader-prefs-demo");
    let store = TomlStore::open_in(&dir)?;
    println!("preferences file: {}", store.path().display());

    let mut prefs = Preferences::init(&resources, Box::new(store))?;
    println!("update delay: {} ms", prefs.update_delay());
    println!("tab width:    {}", prefs.tab_width());
    println!("font:         {}", prefs.font().name());
    println!("sensor delay: {:?}", prefs.sensor_delay());

    prefs.set_wallpaper_shader(42);
    prefs.refresh()?;
    println!("shader id:    {}", prefs.wallpaper_shader());

    Ok(())
}
