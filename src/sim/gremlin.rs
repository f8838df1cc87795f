//! Gremlins: the movable actors
//!
//! On a direction press every idle, awake gremlin tries to slide that way.
//! A sliding gremlin reserves the cell ahead of it, keeps going until the
//! next cell is solid, and remembers the cell it stopped against (its
//! contact cell). Touching a star of the same color starts the transform;
//! when the transform finishes the gremlin is soft-removed.

use glam::IVec2;

use super::grid::SolidityGrid;
use super::sprite::Sprite;
use super::star::Star;
use crate::consts::*;
use crate::renderer::{Renderer, SpriteSheet};

/// Push direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Input presses for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Direction pressed this frame
    pub direction: Option<Direction>,
    /// Confirm/accept (dismisses the outcome box)
    pub confirm: bool,
    /// Restart the current stage
    pub restart: bool,
}

impl FrameInput {
    pub fn push(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Default::default()
        }
    }
}

/// Gremlin color. Boulders are the non-hostile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GremlinKind {
    Red,
    Green,
    Blue,
    Boulder,
}

impl GremlinKind {
    pub fn from_color(color: u16) -> Option<Self> {
        match color {
            0 => Some(GremlinKind::Red),
            1 => Some(GremlinKind::Green),
            2 => Some(GremlinKind::Blue),
            3 => Some(GremlinKind::Boulder),
            _ => None,
        }
    }

    pub fn color(&self) -> u8 {
        match self {
            GremlinKind::Red => 0,
            GremlinKind::Green => 1,
            GremlinKind::Blue => 2,
            GremlinKind::Boulder => 3,
        }
    }

    /// Does this kind count towards clearing the stage?
    pub fn is_hostile(&self) -> bool {
        *self != GremlinKind::Boulder
    }

    /// Can a star of `star`'s color transform this gremlin?
    pub fn matches(&self, star: &Star) -> bool {
        self.is_hostile() && self.color() == star.kind.color()
    }
}

/// Motion state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Idle,
    /// Moving one cell towards `target`, `timer` seconds into the step
    Sliding {
        dir: Direction,
        target: IVec2,
        timer: f32,
    },
    /// Playing the transform animation
    Transforming { timer: f32 },
}

#[derive(Debug, Clone)]
pub struct Gremlin {
    pub pos: IVec2,
    pub kind: GremlinKind,
    /// False once removed; the gremlin stays in the stage's list
    pub exists: bool,
    /// Set when a star starts transforming this gremlin
    pub dying: bool,
    /// One-shot guard for the transform sound
    pub transform_cue_played: bool,
    pub sleeping: bool,
    motion: Motion,
    contact: Option<IVec2>,
    sprite: Sprite,
}

impl Gremlin {
    /// Create a gremlin and claim its cell
    pub fn new(pos: IVec2, kind: GremlinKind, sleeping: bool, grid: &mut SolidityGrid) -> Self {
        grid.set_solid_at(pos, true);
        let mut gremlin = Self {
            pos,
            kind,
            exists: true,
            dying: false,
            transform_cue_played: false,
            sleeping,
            motion: Motion::Idle,
            contact: None,
            sprite: Sprite::new(TILE_SIZE, TILE_SIZE, 0),
        };
        gremlin.sprite.row = gremlin.sheet_row();
        gremlin
    }

    /// True while sliding or transforming
    pub fn active(&self) -> bool {
        self.exists && !matches!(self.motion, Motion::Idle)
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Cell this gremlin last stopped against, if any
    pub fn contact(&self) -> Option<IVec2> {
        self.contact
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn wake(&mut self) {
        if self.sleeping {
            log::debug!("Gremlin at {} woke up", self.pos);
            self.sleeping = false;
        }
    }

    /// Start transforming if this gremlin touches a matching star
    pub fn on_star_collision(&mut self, star: &Star) {
        if !self.exists || self.dying || !self.kind.matches(star) {
            return;
        }
        let touching = self.pos == star.pos || self.contact == Some(star.pos);
        if !touching {
            return;
        }

        self.dying = true;
        self.motion = Motion::Transforming { timer: 0.0 };
    }

    pub fn update(&mut self, input: &FrameInput, grid: &mut SolidityGrid, dt: f32) {
        if !self.exists {
            return;
        }

        match self.motion {
            Motion::Idle => {
                if !self.sleeping && !self.dying {
                    if let Some(dir) = input.direction {
                        self.try_start(dir, grid);
                    }
                }
            }
            Motion::Sliding { dir, target, timer } => {
                let timer = timer + dt;
                if timer >= GREMLIN_STEP_TIME {
                    self.arrive(dir, target, timer - GREMLIN_STEP_TIME, grid);
                } else {
                    self.motion = Motion::Sliding { dir, target, timer };
                }
            }
            Motion::Transforming { timer } => {
                let timer = timer + dt;
                if timer >= TRANSFORM_TIME {
                    self.exists = false;
                    self.motion = Motion::Idle;
                    grid.set_solid_at(self.pos, false);
                } else {
                    self.motion = Motion::Transforming { timer };
                }
            }
        }

        self.animate(dt);
    }

    fn try_start(&mut self, dir: Direction, grid: &mut SolidityGrid) {
        let next = self.pos + dir.delta();
        if grid.is_solid_at(next) {
            self.contact = Some(next);
            return;
        }
        grid.set_solid_at(next, true);
        self.contact = None;
        self.motion = Motion::Sliding {
            dir,
            target: next,
            timer: 0.0,
        };
    }

    fn arrive(&mut self, dir: Direction, target: IVec2, leftover: f32, grid: &mut SolidityGrid) {
        grid.set_solid_at(self.pos, false);
        self.pos = target;

        let next = self.pos + dir.delta();
        if grid.is_solid_at(next) {
            self.contact = Some(next);
            self.motion = Motion::Idle;
            return;
        }
        grid.set_solid_at(next, true);
        self.motion = Motion::Sliding {
            dir,
            target: next,
            timer: leftover,
        };
    }

    fn sheet_row(&self) -> i32 {
        let base = self.kind.color() as i32 * SHEET_ROWS_PER_COLOR;
        let offset = match self.motion {
            Motion::Transforming { .. } => GREMLIN_TRANSFORM_ROW,
            Motion::Sliding { .. } => GREMLIN_MOVE_ROW,
            Motion::Idle if self.sleeping => GREMLIN_SLEEP_ROW,
            Motion::Idle => GREMLIN_IDLE_ROW,
        };
        base + offset
    }

    fn animate(&mut self, dt: f32) {
        let row = self.sheet_row();
        match self.motion {
            Motion::Transforming { .. } => {
                self.sprite.animate(row, 0, 3, TRANSFORM_TIME / 4.0, dt)
            }
            _ => self.sprite.animate(row, 0, 3, GREMLIN_FRAME_TIME, dt),
        }
    }

    /// Pixel offset of the gremlin inside the play field
    pub fn draw_pos(&self) -> IVec2 {
        match self.motion {
            Motion::Sliding { dir, timer, .. } => {
                let t = (timer / GREMLIN_STEP_TIME).clamp(0.0, 1.0);
                self.pos * TILE_SIZE + dir.delta() * (t * TILE_SIZE as f32) as i32
            }
            _ => self.pos * TILE_SIZE,
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.exists {
            return;
        }
        self.sprite
            .draw(renderer, SpriteSheet::Gremlin, self.draw_pos());
    }
}
