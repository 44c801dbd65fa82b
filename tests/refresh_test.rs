use shader_prefs::{
    keys, BackingStore, Color, MemoryStore, PrefValue, Preferences, PrefsError, SensorDelay,
    StaticResources, BUNDLED_FONTS,
};

fn test_resources() -> StaticResources {
    let mut resources = StaticResources::new(Color::argb(0x66, 0x00, 0x00, 0x00), "roboto_mono");
    for name in BUNDLED_FONTS {
        resources = resources.with_font(name, vec![0u8; 4]);
    }
    resources
}

fn init_prefs() -> Preferences {
    Preferences::init(&test_resources(), Box::new(MemoryStore::new()))
        .expect("init should succeed")
}

fn put_string(prefs: &mut Preferences, key: &str, value: &str) {
    prefs
        .store_mut()
        .apply(&[(key.to_string(), PrefValue::Str(value.to_string()))])
        .expect("memory store apply cannot fail");
}

fn put_bool(prefs: &mut Preferences, key: &str, value: bool) {
    prefs
        .store_mut()
        .apply(&[(key.to_string(), PrefValue::Bool(value))])
        .expect("memory store apply cannot fail");
}

#[test]
fn refresh_is_idempotent() {
    let mut prefs = init_prefs();
    put_string(&mut prefs, keys::UPDATE_DELAY, "250");
    put_string(&mut prefs, keys::SENSOR_DELAY, "Game");
    put_bool(&mut prefs, keys::SAVE_BATTERY, false);

    prefs.refresh().expect("refresh should succeed");
    let first = (
        prefs.update_delay(),
        prefs.sensor_delay(),
        prefs.save_battery(),
        prefs.tab_width(),
        prefs.font().name().to_string(),
    );

    prefs.refresh().expect("refresh should succeed");
    let second = (
        prefs.update_delay(),
        prefs.sensor_delay(),
        prefs.save_battery(),
        prefs.tab_width(),
        prefs.font().name().to_string(),
    );

    assert_eq!(first, second);
    assert_eq!(first.0, 250);
    assert_eq!(first.1, SensorDelay::Game);
    assert!(!first.2);
}

#[test]
fn malformed_number_retains_previous_value() {
    let mut prefs = init_prefs();
    put_string(&mut prefs, keys::UPDATE_DELAY, "2000");
    prefs.refresh().expect("refresh should succeed");
    assert_eq!(prefs.update_delay(), 2000);

    // Not reset to the hard-coded 1000: the prior cached value wins.
    put_string(&mut prefs, keys::UPDATE_DELAY, "abc");
    prefs.refresh().expect("refresh should succeed");
    assert_eq!(prefs.update_delay(), 2000);

    put_string(&mut prefs, keys::UPDATE_DELAY, "");
    prefs.refresh().expect("refresh should succeed");
    assert_eq!(prefs.update_delay(), 2000);
}

#[test]
fn sensor_delay_maps_known_names_and_retains_unknown() {
    let mut prefs = init_prefs();

    for (name, expected) in [
        ("Fastest", SensorDelay::Fastest),
        ("Game", SensorDelay::Game),
        ("Normal", SensorDelay::Normal),
        ("UI", SensorDelay::Ui),
    ] {
        put_string(&mut prefs, keys::SENSOR_DELAY, name);
        prefs.refresh().expect("refresh should succeed");
        assert_eq!(prefs.sensor_delay(), expected);
    }

    put_string(&mut prefs, keys::SENSOR_DELAY, "unknown");
    prefs.refresh().expect("refresh should succeed");
    assert_eq!(prefs.sensor_delay(), SensorDelay::Ui);
}

#[test]
fn run_mode_predicates_follow_the_stored_code() {
    let mut prefs = init_prefs();

    put_string(&mut prefs, keys::RUN_MODE, "4");
    prefs.refresh().expect("refresh should succeed");
    assert!(prefs.runs_in_new_task());
    assert!(!prefs.runs_in_background());
    assert!(!prefs.runs_on_change());

    put_string(&mut prefs, keys::RUN_MODE, "3");
    prefs.refresh().expect("refresh should succeed");
    assert!(!prefs.runs_in_new_task());
    assert!(!prefs.runs_in_background());
    assert!(!prefs.runs_on_change());

    put_string(&mut prefs, keys::RUN_MODE, "2");
    prefs.refresh().expect("refresh should succeed");
    assert!(!prefs.runs_in_new_task());
    assert!(prefs.runs_in_background());
    assert!(!prefs.runs_on_change());

    // Out-of-range code retains the previous mode.
    put_string(&mut prefs, keys::RUN_MODE, "9");
    prefs.refresh().expect("refresh should succeed");
    assert!(prefs.runs_in_background());
    assert!(!prefs.runs_on_change());
}

#[test]
fn booleans_follow_the_store() {
    let mut prefs = init_prefs();

    put_bool(&mut prefs, keys::USE_LIGATURES, false);
    put_bool(&mut prefs, keys::DISABLE_HIGHLIGHTING, true);
    put_bool(&mut prefs, keys::SHOW_LINE_NUMBERS, false);
    prefs.refresh().expect("refresh should succeed");

    assert!(!prefs.use_ligatures());
    assert!(prefs.highlighting_disabled());
    assert!(!prefs.show_line_numbers());
}

#[test]
fn font_change_takes_effect_on_refresh() {
    let mut prefs = init_prefs();
    put_string(&mut prefs, keys::FONT, "fira_code");
    prefs.refresh().expect("refresh should succeed");
    assert_eq!(prefs.font().name(), "fira_code");
}

#[test]
fn unknown_stored_font_fails_refresh_naming_the_font() {
    let mut prefs = init_prefs();
    put_string(&mut prefs, keys::FONT, "comic_sans");

    let err = prefs.refresh().expect_err("unknown font must fail");
    assert!(err.to_string().contains("comic_sans"));
    match err {
        PrefsError::UnknownFont(name) => assert_eq!(name, "comic_sans"),
        other => panic!("expected UnknownFont, got {other:?}"),
    }
}
