//! Stars: stationary transformers
//!
//! A star permanently occupies its cell. A gremlin of the same color that
//! touches it starts transforming.

use glam::IVec2;

use super::grid::SolidityGrid;
use super::sprite::Sprite;
use crate::consts::{SHEET_ROWS_PER_COLOR, STAR_ANIM_ROW, STAR_FRAME_TIME, TILE_SIZE};
use crate::renderer::{Renderer, SpriteSheet};

/// Star color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarKind {
    Red,
    Green,
    Blue,
}

impl StarKind {
    pub fn from_color(color: u16) -> Option<Self> {
        match color {
            0 => Some(StarKind::Red),
            1 => Some(StarKind::Green),
            2 => Some(StarKind::Blue),
            _ => None,
        }
    }

    pub fn color(&self) -> u8 {
        match self {
            StarKind::Red => 0,
            StarKind::Green => 1,
            StarKind::Blue => 2,
        }
    }

    /// Animated idle row of this color's block in the gremlin sheet
    pub fn sheet_row(&self) -> i32 {
        self.color() as i32 * SHEET_ROWS_PER_COLOR + STAR_ANIM_ROW
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: IVec2,
    pub kind: StarKind,
    sprite: Sprite,
}

impl Star {
    /// Create a star and claim its cell
    pub fn new(pos: IVec2, kind: StarKind, grid: &mut SolidityGrid) -> Self {
        grid.set_solid_at(pos, true);
        Self {
            pos,
            kind,
            sprite: Sprite::new(TILE_SIZE, TILE_SIZE, kind.sheet_row()),
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Re-claim the cell, then advance the 4-frame idle loop
    pub fn update(&mut self, grid: &mut SolidityGrid, dt: f32) {
        grid.set_solid_at(self.pos, true);
        self.sprite
            .animate(self.kind.sheet_row(), 0, 3, STAR_FRAME_TIME, dt);
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.sprite
            .draw(renderer, SpriteSheet::Gremlin, self.pos * TILE_SIZE);
    }
}
