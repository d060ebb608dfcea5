//! Game entity types: pure data, no logic beyond geometry.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in screen pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True if the two boxes share interior area. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

// ── Spawned entities ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Bomb,
    Boat,
    /// Refuelling strip; the only collectible.
    Fuel,
    /// Reserved, disabled in the default config.
    Helicopter,
    /// Reserved, disabled in the default config.
    Jet,
}

/// How an entity moves on its own, on top of the terrain scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Stationary,
    /// Sweeps sideways `speed` px per tick and turns around on land contact.
    Patrol { speed: i32 },
}

impl EntityKind {
    pub const COUNT: usize = 5;

    /// Spawn order within a tick.
    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::Bomb,
        EntityKind::Boat,
        EntityKind::Fuel,
        EntityKind::Helicopter,
        EntityKind::Jet,
    ];

    /// Dense index for per-kind tables.
    pub fn index(self) -> usize {
        match self {
            EntityKind::Bomb => 0,
            EntityKind::Boat => 1,
            EntityKind::Fuel => 2,
            EntityKind::Helicopter => 3,
            EntityKind::Jet => 4,
        }
    }

    /// Bounding box size `(w, h)` in pixels.
    pub fn size(self) -> (i32, i32) {
        match self {
            EntityKind::Bomb => (30, 30),
            EntityKind::Boat => (50, 30),
            EntityKind::Fuel => (30, 60),
            EntityKind::Helicopter => (40, 30),
            EntityKind::Jet => (40, 20),
        }
    }

    pub fn behavior(self) -> Behavior {
        match self {
            EntityKind::Boat => Behavior::Patrol { speed: 1 },
            EntityKind::Bomb | EntityKind::Fuel | EntityKind::Helicopter | EntityKind::Jet => {
                Behavior::Stationary
            }
        }
    }

    /// Hazards kill on contact and can be shot; collectibles cannot.
    pub fn is_hazard(self) -> bool {
        self != EntityKind::Fuel
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Bomb => "bomb",
            EntityKind::Boat => "boat",
            EntityKind::Fuel => "fuel",
            EntityKind::Helicopter => "helicopter",
            EntityKind::Jet => "jet",
        }
    }
}

/// Stable handle to a spawned entity; never reused within a manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub rect: Rect,
    /// +1 = moving right, -1 = moving left. Only patrolling kinds use it.
    pub heading: i32,
    /// Orientation flag flipped on every turn-around.
    pub flipped: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Pixels climbed per tick.
    pub speed: i32,
}

impl Bullet {
    /// True once the bullet's bottom edge has left the top of the screen.
    pub fn off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Flying,
    Destroyed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub fuel: f64,
    pub lives: u32,
    pub status: PlayerStatus,
}

// ── Game flow ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Discrete input actions, produced by the front end once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Shoot,
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBack,
    Quit,
}
