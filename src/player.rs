//! Player state transitions.
//!
//! Like the rest of the per-frame logic, each function takes the current
//! `Player` by reference and returns a new one; the caller decides whether
//! to keep it.

use crate::config::{PlayerConfig, ScreenConfig};
use crate::entities::{Bullet, Player, PlayerStatus, Rect};

/// Fuel this close to zero is treated as empty, absorbing float drift.
const FUEL_EPSILON: f64 = 1e-6;

/// Gap between the aircraft's nose and a freshly fired bullet.
const MUZZLE_GAP: i32 = 5;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Starting position: bottom row, just right of centre.
pub fn start_rect(cfg: &PlayerConfig, screen: &ScreenConfig) -> Rect {
    Rect::new(
        screen.width / 2 - cfg.width / 2 + 10,
        screen.height - cfg.height,
        cfg.width,
        cfg.height,
    )
}

pub fn new_player(cfg: &PlayerConfig, screen: &ScreenConfig) -> Player {
    Player {
        rect: start_rect(cfg, screen),
        fuel: cfg.max_fuel,
        lives: cfg.lives,
        status: PlayerStatus::Flying,
    }
}

/// Back to the start with a full tank, keeping the remaining lives.
pub fn respawn(player: &Player, cfg: &PlayerConfig, screen: &ScreenConfig) -> Player {
    Player {
        rect: start_rect(cfg, screen),
        fuel: cfg.max_fuel,
        status: PlayerStatus::Flying,
        ..player.clone()
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Shift by `(dx, dy)` only if the whole aircraft stays on screen.
fn nudge(player: &Player, dx: i32, dy: i32, screen: &ScreenConfig) -> Player {
    let moved = player.rect.translated(dx, dy);
    let on_screen = moved.left() >= 0
        && moved.right() <= screen.width
        && moved.top() >= 0
        && moved.bottom() <= screen.height;
    if !on_screen {
        return player.clone();
    }
    Player {
        rect: moved,
        ..player.clone()
    }
}

pub fn move_left(player: &Player, cfg: &PlayerConfig, screen: &ScreenConfig) -> Player {
    nudge(player, -cfg.move_step, 0, screen)
}

pub fn move_right(player: &Player, cfg: &PlayerConfig, screen: &ScreenConfig) -> Player {
    nudge(player, cfg.move_step, 0, screen)
}

pub fn move_forward(player: &Player, cfg: &PlayerConfig, screen: &ScreenConfig) -> Player {
    nudge(player, 0, -cfg.move_step, screen)
}

pub fn move_back(player: &Player, cfg: &PlayerConfig, screen: &ScreenConfig) -> Player {
    nudge(player, 0, cfg.move_step, screen)
}

// ── Fuel & damage ────────────────────────────────────────────────────────────

/// Take on fuel, topping off at `max_fuel`.
pub fn refuel(player: &Player, cfg: &PlayerConfig) -> Player {
    Player {
        fuel: (player.fuel + cfg.refuel_rate).min(cfg.max_fuel),
        ..player.clone()
    }
}

/// Burn one tick of fuel. Running an empty tank destroys the aircraft.
pub fn defuel(player: &Player, cfg: &PlayerConfig) -> Player {
    if player.fuel <= FUEL_EPSILON {
        return kill(&Player {
            fuel: 0.0,
            ..player.clone()
        });
    }
    let mut fuel = player.fuel - cfg.defuel_rate;
    if fuel <= FUEL_EPSILON {
        fuel = 0.0;
    }
    Player {
        fuel,
        ..player.clone()
    }
}

/// Destroy the aircraft and take a life. No effect if already destroyed,
/// so several hits in one tick cost a single life.
pub fn kill(player: &Player) -> Player {
    if player.status == PlayerStatus::Destroyed {
        return player.clone();
    }
    Player {
        lives: player.lives.saturating_sub(1),
        status: PlayerStatus::Destroyed,
        ..player.clone()
    }
}

// ── Weapons ──────────────────────────────────────────────────────────────────

/// A bullet centred over the aircraft, just ahead of its nose.
pub fn shoot(player: &Player, cfg: &PlayerConfig) -> Bullet {
    let size = cfg.bullet_size;
    Bullet {
        rect: Rect::new(
            player.rect.x + (player.rect.w - size) / 2,
            player.rect.y - (size + MUZZLE_GAP),
            size,
            size,
        ),
        speed: cfg.bullet_speed,
    }
}
