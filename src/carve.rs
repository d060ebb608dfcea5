//! Channel carving.
//!
//! Every terrain row gets a band of water cleared around a center column.
//! The center random-walks one column at most per row, so consecutive bands
//! always overlap and the river never closes off.

use std::ops::Range;

use rand::Rng;

use crate::config::CarveConfig;
use crate::terrain::Tile;

#[derive(Clone, Debug)]
pub struct Carver {
    center: usize,
    band_width: usize,
    margin: usize,
    width: usize,
}

impl Carver {
    /// Start in the middle of a `width`-tile terrain.
    pub fn new(width: usize, cfg: &CarveConfig) -> Self {
        debug_assert!(width >= 2 * cfg.margin + 1);
        let mut carver = Self {
            center: width / 2,
            band_width: cfg.band_width,
            margin: cfg.margin,
            width,
        };
        carver.clamp();
        carver
    }

    pub fn center(&self) -> usize {
        self.center
    }

    /// Lowest and highest column the center may take.
    pub fn center_bounds(&self) -> (usize, usize) {
        (self.margin, self.width - self.margin - 1)
    }

    /// Columns the next [`carve`](Self::carve) will clear.
    pub fn band(&self) -> Range<usize> {
        let start = self.center - self.band_width / 2;
        start..start + self.band_width
    }

    /// Clear the band on `row`, then advance the center by -1, 0 or +1.
    /// Returns the columns that were cleared.
    pub fn carve(&mut self, row: &mut [Tile], rng: &mut impl Rng) -> Range<usize> {
        debug_assert_eq!(row.len(), self.width);
        let band = self.band();
        for tile in &mut row[band.clone()] {
            tile.is_land = false;
        }
        self.step(rng.gen_range(-1..=1));
        band
    }

    /// Move the center by `delta` columns and clamp it into bounds.
    pub fn step(&mut self, delta: i32) {
        let moved = self.center as i64 + delta as i64;
        self.center = moved.max(0) as usize;
        self.clamp();
    }

    fn clamp(&mut self) {
        let (lo, hi) = self.center_bounds();
        self.center = self.center.clamp(lo, hi);
    }
}
