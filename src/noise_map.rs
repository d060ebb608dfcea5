//! Cellular-automaton noise maps.
//!
//! A map starts as random static and is smoothed by repeated birth/death
//! passes until the live cells clump into islands. `true` means land.

use rand::Rng;

use crate::config::AutomatonConfig;

/// Row-major boolean grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseMap {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl NoiseMap {
    /// An all-dead (all-water) map.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Build from explicit rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "noise map rows must share one width"
        );
        Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.cols + col] = alive;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Generate a smoothed `rows × cols` map.
pub fn generate_noise_map(
    rows: usize,
    cols: usize,
    params: &AutomatonConfig,
    rng: &mut impl Rng,
) -> NoiseMap {
    let mut map = seed_map(rows, cols, params.chance_to_start_alive, rng);
    for _ in 0..params.generation_steps {
        map = simulation_step(&map, params);
    }
    map
}

/// Each cell independently starts alive with probability `chance`.
pub fn seed_map(rows: usize, cols: usize, chance: f64, rng: &mut impl Rng) -> NoiseMap {
    let mut map = NoiseMap::new(rows, cols);
    for cell in map.cells.iter_mut() {
        *cell = rng.gen::<f64>() < chance;
    }
    map
}

/// One birth/death pass. Reads only `old`, so cell order does not matter.
pub fn simulation_step(old: &NoiseMap, params: &AutomatonConfig) -> NoiseMap {
    let mut next = NoiseMap::new(old.rows, old.cols);
    for r in 0..old.rows {
        for c in 0..old.cols {
            let neighbours = count_alive_neighbors(old, r, c);
            let alive = if old.get(r, c) {
                neighbours >= params.death_limit
            } else {
                neighbours > params.birth_limit
            };
            next.set(r, c, alive);
        }
    }
    next
}

/// Alive cells among the 8 surrounding `(row, col)`.
///
/// Off-grid neighbours above or below count as dead. Off-grid neighbours to
/// the left or right count as alive, which pulls the side walls toward land.
pub fn count_alive_neighbors(map: &NoiseMap, row: usize, col: usize) -> usize {
    let mut count = 0;
    for dr in -1i64..=1 {
        for dc in -1i64..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let nr = row as i64 + dr;
            let nc = col as i64 + dc;
            if nr < 0 || nr >= map.rows as i64 {
                continue;
            }
            if nc < 0 || nc >= map.cols as i64 {
                count += 1;
            } else if map.get(nr as usize, nc as usize) {
                count += 1;
            }
        }
    }
    count
}
