//! Game state and the per-frame tick.
//!
//! The tick runs a fixed pipeline: spawn, scroll and move, despawn, collide,
//! burn fuel, resolve death. All randomness comes through the injected RNG,
//! so a seeded RNG replays a run exactly.

use std::io;

use rand::Rng;
use tracing::info;

use crate::config::GameConfig;
use crate::entities::{Action, Bullet, EntityKind, GameStatus, Player, PlayerStatus, Rect};
use crate::player::{
    defuel, kill, move_back, move_forward, move_left, move_right, new_player, refuel, respawn,
    shoot,
};
use crate::render::{Canvas, Paint};
use crate::spawn::SpawnManager;
use crate::terrain::{ScrollReport, TileGrid};

pub struct GameState {
    pub config: GameConfig,
    pub terrain: TileGrid,
    pub spawner: SpawnManager,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub status: GameStatus,
    pub frame: u64,
}

/// What happened during one [`tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub scroll: ScrollReport,
    /// The player sat on a fuel strip this tick
    pub refueled: bool,
    /// The player was destroyed this tick
    pub crashed: bool,
    /// Bullets that struck a hazard
    pub hits: usize,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh terrain, no entities, player at the start position.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    let terrain = TileGrid::new(&config, rng);
    let spawner = SpawnManager::new(&config);
    let player = new_player(&config.player, &config.screen);
    GameState {
        config,
        terrain,
        spawner,
        player,
        bullets: Vec::new(),
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Apply one input action. Ignored unless the game is running and the
/// aircraft is flying; `Quit` is left to the caller.
pub fn apply_action(state: &mut GameState, action: Action) {
    if state.status != GameStatus::Playing || state.player.status != PlayerStatus::Flying {
        return;
    }
    let cfg = &state.config.player;
    let screen = &state.config.screen;
    match action {
        Action::MoveLeft => state.player = move_left(&state.player, cfg, screen),
        Action::MoveRight => state.player = move_right(&state.player, cfg, screen),
        Action::MoveForward => state.player = move_forward(&state.player, cfg, screen),
        Action::MoveBack => state.player = move_back(&state.player, cfg, screen),
        Action::Shoot => state.bullets.push(shoot(&state.player, cfg)),
        Action::Quit => {}
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) -> TickReport {
    let mut report = TickReport::default();
    if state.status != GameStatus::Playing {
        return report;
    }

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    state.spawner.spawn_tick(&state.terrain, rng);

    // ── 2. Scroll & move ─────────────────────────────────────────────────────
    report.scroll = state.terrain.scroll(rng);
    state.spawner.scroll_all();
    for bullet in state.bullets.iter_mut() {
        bullet.rect.y -= bullet.speed;
    }
    state.spawner.move_all(&state.terrain);

    // ── 3. Despawn off-screen ────────────────────────────────────────────────
    state.bullets.retain(|b| !b.off_screen());
    state.spawner.despawn_offscreen();

    // ── 4. Collisions ────────────────────────────────────────────────────────
    if state.terrain.check_for_land_collisions(&state.player.rect) {
        state.player = kill(&state.player);
    }
    match state.spawner.detect_collision(&state.player.rect) {
        Some(EntityKind::Fuel) => {
            state.player = refuel(&state.player, &state.config.player);
            report.refueled = true;
        }
        Some(_) => state.player = kill(&state.player),
        None => {}
    }

    let spent = state.spawner.detect_bullet_collisions(&state.bullets);
    report.hits = spent.len();
    let mut index = 0;
    state.bullets.retain(|_| {
        let keep = !spent.contains(&index);
        index += 1;
        keep
    });

    // ── 5. Fuel ──────────────────────────────────────────────────────────────
    if !report.refueled {
        state.player = defuel(&state.player, &state.config.player);
    }

    // ── 6. Death ─────────────────────────────────────────────────────────────
    if state.player.status == PlayerStatus::Destroyed {
        report.crashed = true;
        if state.player.lives == 0 {
            state.status = GameStatus::GameOver;
            info!("Game over after {} frames", state.frame + 1);
        } else {
            info!("Player crashed, {} lives left", state.player.lives);
            respawn_player(state);
        }
    }

    state.frame += 1;
    report
}

/// Put the player back on the start row, in the column nearest the start
/// that is clear of land and entities. Falls back to the start column.
fn respawn_player(state: &mut GameState) {
    let fresh = respawn(&state.player, &state.config.player, &state.config.screen);
    let x = find_clear_x(state, fresh.rect);
    state.player = Player {
        rect: Rect { x, ..fresh.rect },
        ..fresh
    };
}

fn find_clear_x(state: &GameState, start: Rect) -> i32 {
    let step = state.config.screen.tile_size;
    let max_x = state.config.screen.width - start.w;
    let is_clear = |x: i32| {
        let rect = Rect { x, ..start };
        !state.terrain.check_for_land_collisions(&rect)
            && state.spawner.detect_collision(&rect).is_none()
    };

    for k in 0..=state.config.screen.width / step {
        for x in [start.x - k * step, start.x + k * step] {
            if (0..=max_x).contains(&x) && is_clear(x) {
                return x;
            }
        }
    }
    start.x
}

// ── Drawing ──────────────────────────────────────────────────────────────────

/// Emit the draw requests for one frame: terrain, entities, bullets, player,
/// fuel readout. The caller adds any overlays and presents.
pub fn draw(state: &GameState, canvas: &mut impl Canvas) -> io::Result<()> {
    state.terrain.draw(canvas)?;
    state.spawner.draw(canvas)?;
    for bullet in &state.bullets {
        canvas.fill_rect(bullet.rect, Paint::Bullet)?;
    }
    canvas.fill_rect(state.player.rect, Paint::Player)?;
    let hud = format!("Fuel {:>3}  Lives {}", state.player.fuel as u32, state.player.lives);
    canvas.draw_text(0, 0, &hud, Paint::Hud)
}
