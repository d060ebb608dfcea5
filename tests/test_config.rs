use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use river_run::config::*;
use river_run::entities::EntityKind;
use river_run::error::ConfigError;

use tracing_subscriber::fmt;

fn invalid_field(err: ConfigError) -> &'static str {
    match err {
        ConfigError::Invalid { field, .. } => field,
        other => panic!("expected Invalid, got {other:?}"),
    }
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Run `f` with a subscriber that writes into the returned buffer.
fn capture_logs(f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    sink.text()
}

// ── Defaults ──────────────────────────────────────────────────────────────────

#[test]
fn defaults_are_valid() {
    GameConfig::default().validate().unwrap();
}

#[test]
fn default_geometry() {
    let c = GameConfig::default();
    assert_eq!(c.screen.width_in_tiles(), 30);
    assert_eq!(c.screen.height_in_tiles(), 30);
    assert_eq!(c.screen.scroll_speed, 3);
    assert_eq!(c.carve.band_width, 7);
    assert_eq!(c.seed, None);
}

#[test]
fn default_spawn_table() {
    let s = SpawnConfig::default();
    assert_eq!(s.max_attempts, 200);
    assert_eq!(s.kind(EntityKind::Bomb).cap, 5);
    assert_eq!(s.kind(EntityKind::Bomb).probability, 100);
    assert_eq!(s.kind(EntityKind::Fuel).cap, 1);
    assert!(s.kind(EntityKind::Boat).enabled);
    assert!(!s.kind(EntityKind::Helicopter).enabled);
    assert!(!s.kind(EntityKind::Jet).enabled);
}

// ── from_toml ─────────────────────────────────────────────────────────────────

#[test]
fn empty_toml_gives_defaults() {
    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let text = r#"
        seed = 7

        [screen]
        scroll_speed = 5

        [spawn.fuel]
        cap = 2
        probability = 0
        enabled = true
    "#;
    let c = GameConfig::from_toml(text).unwrap();
    assert_eq!(c.seed, Some(7));
    assert_eq!(c.screen.scroll_speed, 5);
    assert_eq!(c.screen.width, 900);
    assert_eq!(c.spawn.fuel.cap, 2);
    assert_eq!(c.spawn.bomb.cap, 5);
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = GameConfig::from_toml("[screen]\nwidth = \"wide\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn partial_kind_table_keeps_that_kinds_defaults() {
    let c = GameConfig::from_toml("[spawn.bomb]\ncap = 1\n").unwrap();
    assert_eq!(c.spawn.bomb.cap, 1);
    assert_eq!(c.spawn.bomb.probability, 100);
    assert!(c.spawn.bomb.enabled);
    assert_eq!(c.spawn.boat, SpawnConfig::default().boat);
    assert_eq!(c.spawn.max_attempts, 200);
}

#[test]
fn reserved_kind_can_be_switched_on_alone() {
    let c = GameConfig::from_toml("[spawn.helicopter]\nenabled = true\n").unwrap();
    assert!(c.spawn.helicopter.enabled);
    assert_eq!(c.spawn.helicopter.cap, 5);
    assert_eq!(c.spawn.helicopter.probability, 0);
}

#[test]
fn spawn_table_without_kinds() {
    let c = GameConfig::from_toml("[spawn]\nmax_attempts = 10\n").unwrap();
    assert_eq!(c.spawn.max_attempts, 10);
    assert_eq!(c.spawn.fuel, SpawnConfig::default().fuel);
}

#[test]
fn kind_field_of_wrong_type_is_a_parse_error() {
    let err = GameConfig::from_toml("[spawn.bomb]\ncap = \"many\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ── validate ──────────────────────────────────────────────────────────────────

#[test]
fn width_must_be_a_tile_multiple() {
    let err = GameConfig::from_toml("[screen]\nwidth = 905\n").unwrap_err();
    assert_eq!(invalid_field(err), "screen.width");
}

#[test]
fn tile_size_must_be_positive() {
    let err = GameConfig::from_toml("[screen]\ntile_size = 0\n").unwrap_err();
    assert_eq!(invalid_field(err), "screen.tile_size");
}

#[test]
fn scroll_speed_must_be_positive() {
    let err = GameConfig::from_toml("[screen]\nscroll_speed = 0\n").unwrap_err();
    assert_eq!(invalid_field(err), "screen.scroll_speed");
}

#[test]
fn border_must_leave_water() {
    let err = GameConfig::from_toml("[screen]\nborder_tiles = 15\n").unwrap_err();
    assert_eq!(invalid_field(err), "screen.border_tiles");
}

#[test]
fn chance_must_be_a_probability() {
    let err = GameConfig::from_toml("[automaton]\nchance_to_start_alive = 1.5\n").unwrap_err();
    assert_eq!(invalid_field(err), "automaton.chance_to_start_alive");
}

#[test]
fn band_must_be_at_least_two_wide() {
    let err = GameConfig::from_toml("[carve]\nband_width = 1\nmargin = 5\n").unwrap_err();
    assert_eq!(invalid_field(err), "carve.band_width");
}

#[test]
fn margin_must_keep_band_off_the_edges() {
    let err = GameConfig::from_toml("[carve]\nmargin = 3\n").unwrap_err();
    assert_eq!(invalid_field(err), "carve.margin");
}

#[test]
fn margin_must_fit_the_screen() {
    let err = GameConfig::from_toml("[carve]\nmargin = 15\n").unwrap_err();
    assert_eq!(invalid_field(err), "carve.margin");
}

#[test]
fn max_attempts_must_be_positive() {
    let err = GameConfig::from_toml("[spawn]\nmax_attempts = 0\n").unwrap_err();
    assert_eq!(invalid_field(err), "spawn.max_attempts");
}

#[test]
fn fuel_settings_are_checked() {
    let err = GameConfig::from_toml("[player]\nmax_fuel = 0.0\n").unwrap_err();
    assert_eq!(invalid_field(err), "player.max_fuel");
    let err = GameConfig::from_toml("[player]\ndefuel_rate = -1.0\n").unwrap_err();
    assert_eq!(invalid_field(err), "player.refuel_rate");
}

#[test]
fn player_must_fit_on_screen() {
    let err = GameConfig::from_toml("[player]\nwidth = 1000\n").unwrap_err();
    assert_eq!(invalid_field(err), "player.width");
}

#[test]
fn entities_must_fit_on_screen() {
    let mut c = GameConfig::default();
    c.screen.height = 30;
    c.screen.width = 300;
    c.carve.margin = 4;
    // fuel strips are 60 tall
    assert_eq!(invalid_field(c.validate().unwrap_err()), "spawn");
}

// ── load_from ─────────────────────────────────────────────────────────────────

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let (c, source) = GameConfig::load_from(&path).unwrap();
    assert_eq!(c, GameConfig::default());
    assert_eq!(source, ConfigSource::Defaults(path));
}

#[test]
fn loads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("river_run.toml");
    fs::write(&path, "[player]\nlives = 5\n").unwrap();
    let (c, source) = GameConfig::load_from(&path).unwrap();
    assert_eq!(c.player.lives, 5);
    assert_eq!(source, ConfigSource::File(path));
}

#[test]
fn invalid_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("river_run.toml");
    fs::write(&path, "[screen]\nframe_rate = 0\n").unwrap();
    let err = GameConfig::load_from(&path).unwrap_err();
    assert_eq!(invalid_field(err), "screen.frame_rate");
}

#[test]
fn unreadable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load_from(dir.path()).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, dir.path()),
        other => panic!("expected Io, got {other:?}"),
    }
}

// ── Load reporting ────────────────────────────────────────────────────────────

#[test]
fn loading_leaves_reporting_to_the_caller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("river_run.toml");
    fs::write(&path, "[player]\nlives = 5\n").unwrap();
    let logs = capture_logs(|| {
        GameConfig::load_from(&path).unwrap();
        GameConfig::load_from(dir.path().join("nope.toml")).unwrap();
    });
    assert_eq!(logs, "");
}

#[test]
fn source_reports_loaded_file() {
    let source = ConfigSource::File("custom.toml".into());
    let logs = capture_logs(|| source.log());
    assert!(logs.contains("Loaded config from custom.toml"), "{logs}");
}

#[test]
fn source_reports_default_fallback() {
    let source = ConfigSource::Defaults("nope.toml".into());
    let logs = capture_logs(|| source.log());
    assert!(logs.contains("nope.toml not found, using defaults"), "{logs}");
}

#[test]
fn default_log_file() {
    assert_eq!(GameConfig::default().log_file, std::path::PathBuf::from(LOG_FILE));
}

#[test]
fn error_messages_name_the_field() {
    let err = GameConfig::from_toml("[screen]\nwidth = 905\n").unwrap_err();
    assert!(err.to_string().contains("screen.width"));
}
