//! Game configuration.
//!
//! Every tunable lives here: screen geometry, automaton parameters, carving,
//! spawn caps and player handling. Values load from a TOML file; anything
//! missing falls back to the defaults below.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::EntityKind;
use crate::error::ConfigError;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "river_run.toml";

/// Environment variable that overrides [`CONFIG_FILE`].
pub const CONFIG_ENV: &str = "RIVER_RUN_CONFIG";

/// Default log file, also used when the config itself fails to load.
pub const LOG_FILE: &str = "river_run.log";

/// Where a loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing at this path; built-in defaults.
    Defaults(PathBuf),
}

impl ConfigSource {
    /// Report the outcome. Call once a subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Defaults(path) => {
                info!("Config file {} not found, using defaults", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub automaton: AutomatonConfig,
    pub carve: CarveConfig,
    pub spawn: SpawnConfig,
    pub player: PlayerConfig,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Where the binary writes its log (the terminal is busy drawing).
    pub log_file: PathBuf,
}

/// Visible area and scroll timing. All lengths are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    pub tile_size: i32,
    /// Pixels every row and entity moves down per tick
    pub scroll_speed: i32,
    /// Frame rate cap in Hz
    pub frame_rate: u32,
    /// Land columns on each side of the initial screen
    pub border_tiles: usize,
    /// Rows generated per appended chunk
    pub chunk_height: usize,
}

/// Cellular-automaton parameters for the noise map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Probability that a cell starts alive (land)
    pub chance_to_start_alive: f64,
    /// Smoothing passes; more passes give rounder islands
    pub generation_steps: usize,
    /// A live cell with fewer alive neighbours than this dies
    pub death_limit: usize,
    /// A dead cell with more alive neighbours than this is born
    pub birth_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    /// Width in tiles of the channel cleared on every row
    pub band_width: usize,
    /// Closest the channel center may come to either edge, in tiles
    pub margin: usize,
}

/// Per-kind spawn settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindConfig {
    /// Maximum live instances of this kind
    pub cap: usize,
    /// Reserved weighting. Spawning is gated by `cap` alone.
    pub probability: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpawnTable")]
pub struct SpawnConfig {
    /// Placement samples tried before a spawn is skipped for the tick
    pub max_attempts: u32,
    pub bomb: KindConfig,
    pub boat: KindConfig,
    pub fuel: KindConfig,
    pub helicopter: KindConfig,
    pub jet: KindConfig,
}

/// `[spawn]` as written in the file. Anything left out, including single
/// fields of a kind table, keeps that kind's default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpawnTable {
    max_attempts: Option<u32>,
    bomb: KindTable,
    boat: KindTable,
    fuel: KindTable,
    helicopter: KindTable,
    jet: KindTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KindTable {
    cap: Option<usize>,
    probability: Option<u32>,
    enabled: Option<bool>,
}

impl KindTable {
    fn over(self, base: KindConfig) -> KindConfig {
        KindConfig {
            cap: self.cap.unwrap_or(base.cap),
            probability: self.probability.unwrap_or(base.probability),
            enabled: self.enabled.unwrap_or(base.enabled),
        }
    }
}

impl From<SpawnTable> for SpawnConfig {
    fn from(table: SpawnTable) -> Self {
        let base = SpawnConfig::default();
        Self {
            max_attempts: table.max_attempts.unwrap_or(base.max_attempts),
            bomb: table.bomb.over(base.bomb),
            boat: table.boat.over(base.boat),
            fuel: table.fuel.over(base.fuel),
            helicopter: table.helicopter.over(base.helicopter),
            jet: table.jet.over(base.jet),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_fuel: f64,
    /// Fuel gained per tick over a fuel strip
    pub refuel_rate: f64,
    /// Fuel burned per tick otherwise
    pub defuel_rate: f64,
    /// Pixels moved per key press
    pub move_step: i32,
    pub lives: u32,
    pub width: i32,
    pub height: i32,
    /// Pixels a bullet climbs per tick
    pub bullet_speed: i32,
    /// Side length of the square bullet
    pub bullet_size: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            automaton: AutomatonConfig::default(),
            carve: CarveConfig::default(),
            spawn: SpawnConfig::default(),
            player: PlayerConfig::default(),
            seed: None,
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            tile_size: 30,
            scroll_speed: 3,
            frame_rate: 60,
            border_tiles: 3,
            chunk_height: 30,
        }
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            chance_to_start_alive: 0.35,
            generation_steps: 6,
            death_limit: 4,
            birth_limit: 3,
        }
    }
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            band_width: 7,
            margin: 5,
        }
    }
}

impl KindConfig {
    fn new(cap: usize, probability: u32, enabled: bool) -> Self {
        Self {
            cap,
            probability,
            enabled,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_attempts: 200,
            bomb: KindConfig::new(5, 100, true),
            boat: KindConfig::new(5, 0, true),
            fuel: KindConfig::new(1, 0, true),
            // reserved kinds: no movement or art yet
            helicopter: KindConfig::new(5, 0, false),
            jet: KindConfig::new(5, 0, false),
        }
    }
}

impl SpawnConfig {
    pub fn kind(&self, kind: EntityKind) -> &KindConfig {
        match kind {
            EntityKind::Bomb => &self.bomb,
            EntityKind::Boat => &self.boat,
            EntityKind::Fuel => &self.fuel,
            EntityKind::Helicopter => &self.helicopter,
            EntityKind::Jet => &self.jet,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_fuel: 100.0,
            refuel_rate: 0.5,
            defuel_rate: 0.05,
            move_step: 30,
            lives: 3,
            width: 30,
            height: 30,
            bullet_speed: 5,
            bullet_size: 14,
        }
    }
}

impl ScreenConfig {
    /// Terrain width in tiles.
    pub fn width_in_tiles(&self) -> usize {
        (self.width / self.tile_size) as usize
    }

    /// Rows needed to cover the screen, without lookahead.
    pub fn height_in_tiles(&self) -> usize {
        (self.height / self.tile_size) as usize
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl GameConfig {
    /// Resolve the config path: `$RIVER_RUN_CONFIG`, else `./river_run.toml`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Load from [`Self::config_path`].
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Load and validate a config file. A missing file yields the defaults.
    ///
    /// Logs nothing; report the returned [`ConfigSource`] once logging is up.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource), ConfigError> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_toml(&contents)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and the cross-field constraints the terrain relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.screen;
        if s.tile_size <= 0 {
            return Err(invalid("screen.tile_size", "must be positive"));
        }
        if s.width <= 0 || s.width % s.tile_size != 0 {
            return Err(invalid(
                "screen.width",
                format!("must be a positive multiple of tile_size ({})", s.tile_size),
            ));
        }
        if s.height <= 0 || s.height % s.tile_size != 0 {
            return Err(invalid(
                "screen.height",
                format!("must be a positive multiple of tile_size ({})", s.tile_size),
            ));
        }
        if s.scroll_speed <= 0 {
            return Err(invalid("screen.scroll_speed", "must be positive"));
        }
        if s.frame_rate == 0 {
            return Err(invalid("screen.frame_rate", "must be positive"));
        }
        if s.chunk_height == 0 {
            return Err(invalid("screen.chunk_height", "must be positive"));
        }

        let width = s.width_in_tiles();
        if s.border_tiles == 0 || 2 * s.border_tiles >= width {
            return Err(invalid(
                "screen.border_tiles",
                format!("must be in 1..{}", width.div_ceil(2)),
            ));
        }

        let a = &self.automaton;
        if !(0.0..=1.0).contains(&a.chance_to_start_alive) {
            return Err(invalid("automaton.chance_to_start_alive", "must be within 0..=1"));
        }

        let c = &self.carve;
        if c.band_width < 2 {
            return Err(invalid(
                "carve.band_width",
                "must be at least 2 so neighbouring rows share a column",
            ));
        }
        // keeps the band off columns 0 and width-1
        if c.margin < c.band_width / 2 + 1 {
            return Err(invalid(
                "carve.margin",
                format!("must be at least {}", c.band_width / 2 + 1),
            ));
        }
        if width < 2 * c.margin + 1 {
            return Err(invalid(
                "carve.margin",
                format!("leaves no room for the channel in {width} columns"),
            ));
        }

        if self.spawn.max_attempts == 0 {
            return Err(invalid("spawn.max_attempts", "must be positive"));
        }

        let p = &self.player;
        if p.max_fuel <= 0.0 {
            return Err(invalid("player.max_fuel", "must be positive"));
        }
        if p.refuel_rate < 0.0 || p.defuel_rate < 0.0 {
            return Err(invalid("player.refuel_rate", "fuel rates must not be negative"));
        }
        if p.width <= 0 || p.height <= 0 || p.width > s.width || p.height > s.height {
            return Err(invalid("player.width", "player must fit on screen"));
        }
        if p.move_step <= 0 || p.bullet_speed <= 0 || p.bullet_size <= 0 {
            return Err(invalid("player.move_step", "steps and sizes must be positive"));
        }
        for kind in EntityKind::ALL {
            let (w, h) = kind.size();
            if w > s.width || h > s.height {
                return Err(invalid("spawn", format!("{} does not fit on screen", kind.label())));
            }
        }

        Ok(())
    }
}
