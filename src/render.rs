//! Drawing seam between the game core and whatever puts pixels on screen.
//!
//! The core never talks to a terminal or window directly; it describes each
//! frame as a list of filled boxes and text through a [`Canvas`].

use std::io;

use crate::entities::{EntityKind, Rect};

/// What a filled box or text run represents; the canvas picks the colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    /// Land tile with a cosmetic shade (200..=255)
    Land(u8),
    /// Water tile with a cosmetic shade (200..=255)
    Water(u8),
    Entity(EntityKind),
    Player,
    Bullet,
    /// Overlay text such as the fuel readout
    Hud,
}

pub trait Canvas {
    /// Fill `rect` (screen pixels) with `paint`.
    fn fill_rect(&mut self, rect: Rect, paint: Paint) -> io::Result<()>;

    /// Write `text` with its top-left corner at pixel `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, paint: Paint) -> io::Result<()>;

    /// Show the finished frame. Called exactly once per tick.
    fn present(&mut self) -> io::Result<()>;
}
