//! Scrolling river terrain.
//!
//! The grid is a deque of tile rows. The front row is the oldest and sits
//! lowest on screen; the back row is the leading edge above the screen.
//! Every tick all rows slide down. A fresh chunk is generated as soon as the
//! leading row reaches the top edge, and rows that fall off the bottom are
//! dropped, so the grid never holds more than a screen plus one chunk.

use std::collections::VecDeque;
use std::io;
use std::ops::Range;

use rand::Rng;
use tracing::debug;

use crate::carve::Carver;
use crate::config::{AutomatonConfig, GameConfig, ScreenConfig};
use crate::entities::Rect;
use crate::noise_map::{generate_noise_map, NoiseMap};
use crate::render::{Canvas, Paint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub col: usize,
    pub is_land: bool,
    /// Colour brightness, 200..=255.
    pub shade: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerrainRow {
    /// Top edge in screen pixels.
    pub y: i32,
    pub tiles: Vec<Tile>,
    /// Columns cleared by the carver.
    pub carved: Range<usize>,
}

/// What one [`TileGrid::scroll`] call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollReport {
    pub appended_rows: usize,
    pub evicted_rows: usize,
}

pub struct TileGrid {
    rows: VecDeque<TerrainRow>,
    carver: Carver,
    screen: ScreenConfig,
    automaton: AutomatonConfig,
    width: usize,
    chunks_generated: u64,
}

fn random_shade(rng: &mut impl Rng) -> u8 {
    rng.gen_range(200..=255)
}

impl TileGrid {
    /// Build a grid and fill the first screen. `config` must pass
    /// [`GameConfig::validate`]; the tile maths relies on it.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        debug_assert!(config.validate().is_ok(), "terrain needs a validated config");
        let width = config.screen.width_in_tiles();
        let mut grid = Self {
            rows: VecDeque::new(),
            carver: Carver::new(width, &config.carve),
            screen: config.screen.clone(),
            automaton: config.automaton.clone(),
            width,
            chunks_generated: 0,
        };
        grid.initialize(rng);
        grid
    }

    /// Build the starting terrain bottom-up: one row per screen row plus one
    /// lookahead row above the top edge. Each row is a straight channel with
    /// `border_tiles` of land on both sides, then carved.
    pub fn initialize(&mut self, rng: &mut impl Rng) {
        self.rows.clear();
        let border = self.screen.border_tiles;
        let tile = self.screen.tile_size;

        for i in 0..=self.screen.height_in_tiles() {
            let y = self.screen.height - tile * (i as i32 + 1);
            let tiles = (0..self.width)
                .map(|col| Tile {
                    col,
                    is_land: col < border || col >= self.width - border,
                    shade: random_shade(rng),
                })
                .collect();
            self.push_row(y, tiles, rng);
        }
        debug!("Initialized terrain with {} rows", self.rows.len());
    }

    /// Advance every row by the scroll speed, then top up and trim the grid.
    pub fn scroll(&mut self, rng: &mut impl Rng) -> ScrollReport {
        let speed = self.screen.scroll_speed;
        for row in self.rows.iter_mut() {
            row.y += speed;
        }

        let mut report = ScrollReport::default();

        while self.leading_row().y >= 0 {
            report.appended_rows += self.append_chunk(rng);
        }

        while self
            .rows
            .front()
            .is_some_and(|row| row.y >= self.screen.height)
        {
            self.rows.pop_front();
            report.evicted_rows += 1;
        }
        if report.evicted_rows > 0 {
            debug!("Evicted {} terrain rows", report.evicted_rows);
        }

        report
    }

    /// Generate one chunk from a fresh noise map and stack it above the
    /// leading row. Returns the number of rows added.
    pub fn append_chunk(&mut self, rng: &mut impl Rng) -> usize {
        let map = generate_noise_map(
            self.screen.chunk_height,
            self.width,
            &self.automaton,
            rng,
        );
        let added = self.append_noise_rows(&map, rng);
        self.chunks_generated += 1;
        debug!(
            "Appended chunk #{} ({} rows, carve center {})",
            self.chunks_generated,
            added,
            self.carver.center()
        );
        added
    }

    /// Turn each noise row into a carved tile row. Live cells and both edge
    /// columns become land.
    pub fn append_noise_rows(&mut self, map: &NoiseMap, rng: &mut impl Rng) -> usize {
        assert_eq!(map.cols(), self.width, "noise map width must match terrain");
        let last = self.width - 1;
        let tile = self.screen.tile_size;

        for r in 0..map.rows() {
            let y = self.leading_row().y - tile;
            let tiles = map
                .row(r)
                .iter()
                .enumerate()
                .map(|(col, &alive)| Tile {
                    col,
                    is_land: alive || col == 0 || col == last,
                    shade: random_shade(rng),
                })
                .collect();
            self.push_row(y, tiles, rng);
        }
        map.rows()
    }

    fn push_row(&mut self, y: i32, mut tiles: Vec<Tile>, rng: &mut impl Rng) {
        let carved = self.carver.carve(&mut tiles, rng);
        debug_assert_eq!(tiles.len(), self.width);
        debug_assert!(tiles[0].is_land && tiles[self.width - 1].is_land);
        self.rows.push_back(TerrainRow { y, tiles, carved });
    }

    /// True if any land tile overlaps `rect`.
    pub fn check_for_land_collisions(&self, rect: &Rect) -> bool {
        let tile = self.screen.tile_size;
        self.rows
            .iter()
            .filter(|row| row.y < rect.bottom() && rect.top() < row.y + tile)
            .any(|row| {
                row.tiles
                    .iter()
                    .any(|t| t.is_land && self.tile_rect(row, t).intersects(rect))
            })
    }

    /// Draw every on-screen tile.
    pub fn draw(&self, canvas: &mut impl Canvas) -> io::Result<()> {
        let tile = self.screen.tile_size;
        for row in self
            .rows
            .iter()
            .filter(|row| row.y + tile > 0 && row.y < self.screen.height)
        {
            for t in &row.tiles {
                let paint = if t.is_land {
                    Paint::Land(t.shade)
                } else {
                    Paint::Water(t.shade)
                };
                canvas.fill_rect(self.tile_rect(row, t), paint)?;
            }
        }
        Ok(())
    }

    pub fn tile_rect(&self, row: &TerrainRow, tile: &Tile) -> Rect {
        let size = self.screen.tile_size;
        Rect::new(tile.col as i32 * size, row.y, size, size)
    }

    /// Rows from bottom (oldest) to top (leading).
    pub fn rows(&self) -> impl Iterator<Item = &TerrainRow> {
        self.rows.iter()
    }

    pub fn row(&self, index: usize) -> Option<&TerrainRow> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Topmost generated row.
    pub fn leading_row(&self) -> &TerrainRow {
        self.rows.back().expect("terrain always holds at least one row")
    }

    /// Bottommost stored row.
    pub fn trailing_row(&self) -> &TerrainRow {
        self.rows.front().expect("terrain always holds at least one row")
    }

    pub fn width_in_tiles(&self) -> usize {
        self.width
    }

    pub fn tile_size(&self) -> i32 {
        self.screen.tile_size
    }

    /// Column the next generated row's channel will be centred on.
    pub fn carve_center(&self) -> usize {
        self.carver.center()
    }

    pub fn chunks_generated(&self) -> u64 {
        self.chunks_generated
    }
}
