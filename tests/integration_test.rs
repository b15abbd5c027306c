use mockbox_shell::platform::{
    BroadcastThemeSignal, FileStore, ManualClock, MemoryStore, RecordingRouter, RecordingSink,
};
use mockbox_shell::{
    EngineState, InvalidModeError, NavigationConfig, NavigationCoordinator, ResolvedTheme,
    SettingsCoordinator, ShellConfig, ThemeConfig, ThemeMode, ThemePreferenceEngine,
};
use anyhow::Result;
use std::env;
use std::fs;
use std::rc::Rc;
use std::time::Duration;

const SETTLE: Duration = Duration::from_millis(200);

struct ThemeFixture {
    store: MemoryStore,
    signal: BroadcastThemeSignal,
    sink: RecordingSink,
    clock: ManualClock,
}

impl ThemeFixture {
    fn new(prefers_dark: bool) -> Self {
        Self {
            store: MemoryStore::new(),
            signal: BroadcastThemeSignal::new(prefers_dark),
            sink: RecordingSink::new(),
            clock: ManualClock::new(),
        }
    }

    /// Builds a fresh engine over the shared collaborators, as a restart would.
    fn engine(&self) -> ThemePreferenceEngine {
        ThemePreferenceEngine::new(
            Box::new(self.store.clone()),
            Box::new(self.signal.clone()),
            Box::new(self.sink.clone()),
            Rc::new(self.clock.clone()),
            &ThemeConfig::default(),
        )
    }
}

fn navigation(initial: &str) -> (NavigationCoordinator, RecordingRouter, ManualClock) {
    let router = RecordingRouter::new();
    let clock = ManualClock::new();
    let config = NavigationConfig {
        initial_path: initial.to_string(),
        ..NavigationConfig::default()
    };
    let coordinator =
        NavigationCoordinator::new(Box::new(router.clone()), Rc::new(clock.clone()), &config);
    (coordinator, router, clock)
}

// ============================================================================
// Theme engine
// ============================================================================

#[test]
fn test_set_mode_resolves_every_mode() {
    for prefers_dark in [false, true] {
        let fixture = ThemeFixture::new(prefers_dark);
        let mut engine = fixture.engine();
        engine.mount();

        engine.set_mode(ThemeMode::Light);
        assert_eq!(engine.resolved(), ResolvedTheme::Light);

        engine.set_mode(ThemeMode::Dark);
        assert_eq!(engine.resolved(), ResolvedTheme::Dark);

        engine.set_mode(ThemeMode::System);
        assert_eq!(engine.resolved(), ResolvedTheme::from_prefers_dark(prefers_dark));
    }
}

#[test]
fn test_repeated_set_mode_keeps_one_marker() {
    let fixture = ThemeFixture::new(false);
    let mut engine = fixture.engine();
    engine.mount();

    engine.set_mode(ThemeMode::Dark);
    engine.set_mode(ThemeMode::Dark);
    engine.set_mode(ThemeMode::Dark);

    assert_eq!(engine.resolved(), ResolvedTheme::Dark);
    assert_eq!(fixture.sink.active_classes(), vec![ResolvedTheme::Dark]);
}

#[test]
fn test_mode_survives_restart() {
    let fixture = ThemeFixture::new(false);
    {
        let mut engine = fixture.engine();
        engine.mount();
        engine.set_mode(ThemeMode::Dark);
    }

    let mut restarted = fixture.engine();
    let preference = restarted.initialize();
    assert_eq!(preference.mode(), ThemeMode::Dark);
    assert_eq!(fixture.store.raw("theme").as_deref(), Some("dark"));
}

#[test]
fn test_invalid_mode_name_changes_nothing() {
    let fixture = ThemeFixture::new(false);
    let mut engine = fixture.engine();
    engine.mount();
    engine.set_mode(ThemeMode::Light);
    let applied_before = fixture.sink.applied().len();

    let result = engine.set_mode_named("blue");

    assert_eq!(result, Err(InvalidModeError("blue".to_string())));
    assert_eq!(engine.mode(), ThemeMode::Light);
    assert_eq!(engine.resolved(), ResolvedTheme::Light);
    assert_eq!(fixture.sink.applied().len(), applied_before);
    assert_eq!(fixture.store.raw("theme").as_deref(), Some("light"));
}

#[test]
fn test_set_mode_named_accepts_literals() {
    let fixture = ThemeFixture::new(true);
    let mut engine = fixture.engine();
    engine.mount();

    assert!(engine.set_mode_named("light").is_ok());
    assert_eq!(engine.resolved(), ResolvedTheme::Light);
    assert!(engine.set_mode_named("system").is_ok());
    assert_eq!(engine.resolved(), ResolvedTheme::Dark);
}

#[test]
fn test_os_change_followed_only_in_system_mode() {
    let fixture = ThemeFixture::new(false);
    let mut engine = fixture.engine();
    engine.mount();
    assert_eq!(engine.resolved(), ResolvedTheme::Light);

    fixture.signal.set_prefers_dark(true);
    engine.poll();
    assert_eq!(engine.resolved(), ResolvedTheme::Dark);
    assert_eq!(fixture.sink.active_classes(), vec![ResolvedTheme::Dark]);

    engine.set_mode(ThemeMode::Dark);
    fixture.signal.set_prefers_dark(false);
    engine.poll();
    engine.on_system_theme_changed(false);
    assert_eq!(engine.resolved(), ResolvedTheme::Dark);
}

#[test]
fn test_missing_os_signal_resolves_dark() {
    let fixture = ThemeFixture {
        signal: BroadcastThemeSignal::unavailable(),
        ..ThemeFixture::new(false)
    };
    let mut engine = fixture.engine();
    engine.mount();
    assert_eq!(engine.state(), EngineState::Dark);
}

#[test]
fn test_storage_failures_are_absorbed() {
    let fixture = ThemeFixture::new(false);
    fixture.store.insert_raw("theme", "light");
    fixture.store.set_unavailable(true);

    let mut engine = fixture.engine();
    assert_eq!(engine.initialize().mode(), ThemeMode::System);

    engine.mount();
    engine.set_mode(ThemeMode::Dark);
    assert_eq!(engine.mode(), ThemeMode::Dark);
    assert_eq!(engine.resolved(), ResolvedTheme::Dark);
    assert_eq!(fixture.store.raw("theme").as_deref(), Some("light"));
}

#[test]
fn test_overlapping_transitions_end_cleanly() {
    let fixture = ThemeFixture::new(false);
    let mut engine = fixture.engine();
    engine.mount();

    fixture.clock.advance(Duration::from_millis(100));
    engine.set_mode(ThemeMode::Dark);

    fixture.clock.advance(Duration::from_millis(100));
    engine.poll();
    // Timers are not cancelled: the first swap's timer also ends the second marker.
    assert!(!fixture.sink.is_transitioning());

    fixture.clock.advance(Duration::from_millis(100));
    engine.poll();
    assert!(!fixture.sink.is_transitioning());
    assert_eq!(fixture.sink.transitions_begun(), 2);
    assert_eq!(engine.next_deadline(), None);
}

#[test]
fn test_engine_with_file_store_round_trip() -> Result<()> {
    let dir = env::temp_dir().join(format!("mockbox_shell_it_{}", std::process::id()));
    let path = dir.join("preferences.json");
    let _ = fs::remove_file(&path);

    let fixture = ThemeFixture::new(false);
    let build = || {
        ThemePreferenceEngine::new(
            Box::new(FileStore::new(&path)),
            Box::new(fixture.signal.clone()),
            Box::new(fixture.sink.clone()),
            Rc::new(fixture.clock.clone()),
            &ThemeConfig::default(),
        )
    };

    let mut engine = build();
    engine.mount();
    engine.set_mode(ThemeMode::Light);

    let mut settings = FileStore::new(&path);
    SettingsCoordinator::save_setting(&mut settings, "sidebar_collapsed", &true);

    let mut restarted = build();
    assert_eq!(restarted.initialize().mode(), ThemeMode::Light);
    let collapsed: bool = SettingsCoordinator::load_setting(Some(&settings), "sidebar_collapsed");
    assert!(collapsed);

    let text = fs::read_to_string(&path)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(json["theme"], "light");

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}

// ============================================================================
// Navigation coordinator
// ============================================================================

#[test]
fn test_navigate_to_current_path_is_noop() {
    let (mut nav, router, _clock) = navigation("/mocks");

    assert!(!nav.request_navigate("/mocks"));

    assert!(!nav.is_navigating());
    assert_eq!(router.push_count(), 0);
}

#[test]
fn test_navigation_happy_path() {
    let (mut nav, router, clock) = navigation("/mocks");

    assert!(nav.request_navigate("/dashboard"));
    assert!(nav.is_navigating());
    assert_eq!(nav.target_path(), Some("/dashboard"));
    assert_eq!(router.pushes(), vec!["/dashboard".to_string()]);

    nav.on_location_settled("/dashboard");
    nav.poll();
    assert!(nav.is_navigating());

    clock.advance(SETTLE);
    nav.poll();
    assert!(!nav.is_navigating());
    assert_eq!(nav.current_path(), "/dashboard");
    assert_eq!(nav.target_path(), None);
}

#[test]
fn test_superseding_navigation() {
    let (mut nav, router, clock) = navigation("/mocks");

    nav.request_navigate("/a");
    assert!(nav.is_navigating());
    nav.request_navigate("/b");
    assert!(nav.is_navigating());

    assert_eq!(nav.target_path(), Some("/b"));
    assert_eq!(router.pushes(), vec!["/a".to_string(), "/b".to_string()]);

    nav.on_location_settled("/b");
    clock.advance(SETTLE);
    nav.poll();
    assert!(!nav.is_navigating());
    assert_eq!(nav.current_path(), "/b");
}

#[test]
fn test_external_location_change_updates_current_path() {
    let (mut nav, router, _clock) = navigation("/dashboard");

    nav.on_location_settled("/templates");

    assert!(!nav.is_navigating());
    assert_eq!(nav.current_path(), "/templates");
    assert!(!nav.request_navigate("/templates"));
    assert_eq!(router.push_count(), 0);
}

#[test]
fn test_unsettled_navigation_stays_in_flight_without_timeout() {
    let (mut nav, _router, clock) = navigation("/mocks");
    nav.request_navigate("/dashboard");

    clock.advance(Duration::from_secs(600));
    nav.poll();

    assert!(nav.is_navigating());
    assert_eq!(nav.next_deadline(), None);
}

#[test]
fn test_config_file_drives_coordinators() -> Result<()> {
    let config = ShellConfig::from_json(
        r#"{"theme": {"storage_key": "ui.theme"}, "navigation": {"initial_path": "/builder", "settle_ms": 50}}"#,
    )?;

    let router = RecordingRouter::new();
    let clock = ManualClock::new();
    let mut nav = NavigationCoordinator::new(Box::new(router), Rc::new(clock.clone()), &config.navigation);
    assert_eq!(nav.current_path(), "/builder");

    nav.request_navigate("/mocks");
    nav.on_location_settled("/mocks");
    clock.advance(Duration::from_millis(50));
    nav.poll();
    assert!(!nav.is_navigating());

    let fixture = ThemeFixture::new(false);
    let mut engine = ThemePreferenceEngine::new(
        Box::new(fixture.store.clone()),
        Box::new(fixture.signal.clone()),
        Box::new(fixture.sink.clone()),
        Rc::new(fixture.clock.clone()),
        &config.theme,
    );
    engine.mount();
    engine.set_mode(ThemeMode::Light);
    assert_eq!(fixture.store.raw("ui.theme").as_deref(), Some("light"));
    Ok(())
}
