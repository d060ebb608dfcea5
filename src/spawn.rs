//! Hazard and collectible lifecycle.
//!
//! The manager owns every spawned entity plus a live count per kind. Entities
//! are addressed by [`EntityId`]; removals during a pass only mark the entity
//! and a compaction afterwards drops the marked ones.

use std::io;

use rand::Rng;
use tracing::{debug, warn};

use crate::config::{GameConfig, SpawnConfig};
use crate::entities::{Behavior, Bullet, Entity, EntityId, EntityKind, Rect};
use crate::render::{Canvas, Paint};
use crate::terrain::TileGrid;

#[derive(Clone, Debug)]
struct Slot {
    entity: Entity,
    dead: bool,
}

pub struct SpawnManager {
    config: SpawnConfig,
    screen_width: i32,
    screen_height: i32,
    scroll_speed: i32,
    slots: Vec<Slot>,
    counts: [usize; EntityKind::COUNT],
    next_id: u64,
}

impl SpawnManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.spawn.clone(),
            screen_width: config.screen.width,
            screen_height: config.screen.height,
            scroll_speed: config.screen.scroll_speed,
            slots: Vec::new(),
            counts: [0; EntityKind::COUNT],
            next_id: 0,
        }
    }

    /// Place a new `kind` at a random on-screen spot clear of land and of
    /// every live entity. Gives up after `max_attempts` samples.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        terrain: &TileGrid,
        rng: &mut impl Rng,
    ) -> Option<EntityId> {
        let (w, h) = kind.size();
        let max_x = (self.screen_width - w).max(0);
        let max_y = (self.screen_height - h).max(0);

        for _ in 0..self.config.max_attempts {
            let rect = Rect::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y), w, h);
            if terrain.check_for_land_collisions(&rect) || self.detect_collision(&rect).is_some() {
                continue;
            }
            return Some(self.insert(kind, rect));
        }

        warn!(
            "No free spot for {} after {} attempts, skipping",
            kind.label(),
            self.config.max_attempts
        );
        None
    }

    /// Place a `kind` at `rect` as is, without the land and overlap checks.
    pub fn insert(&mut self, kind: EntityKind, rect: Rect) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            entity: Entity {
                id,
                kind,
                rect,
                heading: 1,
                flipped: false,
            },
            dead: false,
        });
        self.counts[kind.index()] += 1;
        debug!("Spawned {} {:?} at ({}, {})", kind.label(), id, rect.x, rect.y);
        id
    }

    /// Top up every enabled kind that is below its cap by one instance.
    pub fn spawn_tick(&mut self, terrain: &TileGrid, rng: &mut impl Rng) {
        for kind in EntityKind::ALL {
            let settings = self.config.kind(kind);
            if settings.enabled && self.live_count(kind) < settings.cap {
                self.spawn(kind, terrain, rng);
            }
        }
    }

    /// Move everything down with the terrain.
    pub fn scroll_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.entity.rect.y += self.scroll_speed;
        }
    }

    /// Run each kind's own movement.
    pub fn move_all(&mut self, terrain: &TileGrid) {
        for slot in self.slots.iter_mut().filter(|s| !s.dead) {
            let entity = &mut slot.entity;
            match entity.kind.behavior() {
                Behavior::Stationary => {}
                Behavior::Patrol { speed } => {
                    if terrain.check_for_land_collisions(&entity.rect) {
                        entity.heading = -entity.heading;
                        entity.flipped = !entity.flipped;
                    }
                    entity.rect.x += entity.heading * speed;
                }
            }
        }
    }

    /// Remove one entity. Unknown or already removed ids are ignored.
    pub fn despawn(&mut self, id: EntityId) {
        if self.mark_dead(id) {
            self.compact();
        }
    }

    /// Remove everything whose top edge is below the screen.
    pub fn despawn_offscreen(&mut self) {
        let gone: Vec<EntityId> = self
            .entities()
            .filter(|e| e.rect.top() >= self.screen_height)
            .map(|e| e.id)
            .collect();
        for id in gone {
            self.mark_dead(id);
        }
        self.compact();
    }

    /// Kind of the first live entity overlapping `rect`, in spawn order.
    pub fn detect_collision(&self, rect: &Rect) -> Option<EntityKind> {
        self.entities()
            .find(|e| e.rect.intersects(rect))
            .map(|e| e.kind)
    }

    /// Despawn every hazard hit by a bullet. Returns the indices of the
    /// bullets that hit something; removing them is up to the caller.
    pub fn detect_bullet_collisions(&mut self, bullets: &[Bullet]) -> Vec<usize> {
        let mut spent = Vec::new();
        for (bi, bullet) in bullets.iter().enumerate() {
            let mut hit = false;
            for slot in self.slots.iter_mut() {
                if slot.dead || !slot.entity.kind.is_hazard() {
                    continue;
                }
                if bullet.rect.intersects(&slot.entity.rect) {
                    slot.dead = true;
                    self.counts[slot.entity.kind.index()] -= 1;
                    debug!("Shot down {} {:?}", slot.entity.kind.label(), slot.entity.id);
                    hit = true;
                }
            }
            if hit {
                spent.push(bi);
            }
        }
        self.compact();
        spent
    }

    pub fn draw(&self, canvas: &mut impl Canvas) -> io::Result<()> {
        for e in self.entities() {
            canvas.fill_rect(e.rect, Paint::Entity(e.kind))?;
        }
        Ok(())
    }

    /// Live entities in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter(|s| !s.dead).map(|s| &s.entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities().find(|e| e.id == id)
    }

    pub fn live_count(&self, kind: EntityKind) -> usize {
        self.counts[kind.index()]
    }

    pub fn len(&self) -> usize {
        self.entities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark `id` dead and release its count. Returns false if it was not live.
    fn mark_dead(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| !s.dead && s.entity.id == id) else {
            return false;
        };
        slot.dead = true;
        self.counts[slot.entity.kind.index()] -= 1;
        debug!("Despawned {} {:?}", slot.entity.kind.label(), id);
        true
    }

    fn compact(&mut self) {
        self.slots.retain(|s| !s.dead);
    }
}
