//! Stage: per-frame simulation and termination
//!
//! Owns the solidity grid and the actor lists. Each frame it probes star
//! collisions, turns the actors' continuous motion into discrete moves
//! (one per idle -> moving transition) and checks for a win or a loss.

use std::cell::Cell;
use std::rc::Rc;

use glam::IVec2;

use super::gremlin::{FrameInput, Gremlin};
use super::grid::SolidityGrid;
use super::star::Star;
use super::tilemap::{TILE_WALL, TileObject, Tilemap};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::renderer::{Renderer, SpriteSheet, colors};

/// How a stage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn won(&self) -> bool {
        *self == Outcome::Won
    }
}

/// Receives the stage's terminal outcome
pub trait OutcomeListener {
    fn show_outcome(&mut self, outcome: Outcome);
}

/// Shared slot holding the last reported outcome. Clones share the slot,
/// so the owner keeps one half and hands the other to the stage.
#[derive(Debug, Clone, Default)]
pub struct OutcomeLatch(Rc<Cell<Option<Outcome>>>);

impl OutcomeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self) -> Option<Outcome> {
        self.0.get()
    }

    pub fn take(&self) -> Option<Outcome> {
        self.0.take()
    }
}

impl OutcomeListener for OutcomeLatch {
    fn show_outcome(&mut self, outcome: Outcome) {
        self.0.set(Some(outcome));
    }
}

pub struct Stage {
    index: u32,
    tilemap: Rc<Tilemap>,
    width: i32,
    height: i32,
    grid: SolidityGrid,
    /// Never shrinks; removed gremlins are flagged, not dropped
    gremlins: Vec<Gremlin>,
    stars: Vec<Star>,
    moves: i32,
    currently_moving: bool,
    was_moving_last_frame: bool,
    /// Top-left of the play field on screen
    origin: IVec2,
    listener: Box<dyn OutcomeListener>,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("index", &self.index)
            .field("name", &self.tilemap.name)
            .field("moves", &self.moves)
            .field("gremlins", &self.gremlins.len())
            .field("stars", &self.stars.len())
            .field("currently_moving", &self.currently_moving)
            .finish()
    }
}

impl Stage {
    /// Build a stage from its tile map, placing actors in row-major order
    pub fn new(index: u32, tilemap: Rc<Tilemap>, listener: Box<dyn OutcomeListener>) -> Self {
        let mut grid = SolidityGrid::from_tilemap(&tilemap);
        let mut gremlins = Vec::new();
        let mut stars = Vec::new();

        for (pos, obj) in tilemap.objects() {
            match obj {
                TileObject::Wall => {}
                TileObject::Gremlin { kind, sleeping } => {
                    gremlins.push(Gremlin::new(pos, kind, sleeping, &mut grid));
                }
                TileObject::Star { kind } => stars.push(Star::new(pos, kind, &mut grid)),
            }
        }

        let width = tilemap.width as i32;
        let height = tilemap.height as i32;
        let origin = IVec2::new(
            SCREEN_WIDTH / 2 - width * TILE_SIZE / 2,
            STAGE_Y_OFF + (SCREEN_HEIGHT - STAGE_Y_OFF) / 2 - height * TILE_SIZE / 2,
        );

        log::info!(
            "Stage {} \"{}\": {}x{}, {} gremlins, {} stars, {} moves",
            index,
            tilemap.name,
            width,
            height,
            gremlins.len(),
            stars.len(),
            tilemap.move_limit
        );

        Self {
            index,
            moves: tilemap.move_limit,
            tilemap,
            width,
            height,
            grid,
            gremlins,
            stars,
            currently_moving: false,
            was_moving_last_frame: false,
            origin,
            listener,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn grid(&self) -> &SolidityGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SolidityGrid {
        &mut self.grid
    }

    pub fn gremlins(&self) -> &[Gremlin] {
        &self.gremlins
    }

    pub fn gremlins_mut(&mut self) -> &mut [Gremlin] {
        &mut self.gremlins
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Remaining moves
    pub fn moves(&self) -> i32 {
        self.moves
    }

    /// Whether any actor was active at the start of the last update
    pub fn is_moving(&self) -> bool {
        self.currently_moving
    }

    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    /// Existing gremlins that still count towards the win
    pub fn hostile_count(&self) -> usize {
        self.gremlins
            .iter()
            .filter(|g| g.exists && g.kind.is_hostile())
            .count()
    }

    /// Advance one frame
    pub fn update(&mut self, input: &FrameInput, audio: &mut dyn AudioSink, dt: f32) {
        self.was_moving_last_frame = self.currently_moving;
        self.currently_moving = false;
        let mut hostile_count = 0;
        let mut transform_triggered = false;

        // Collisions are probed before anything moves this frame
        for gremlin in &mut self.gremlins {
            if gremlin.exists && gremlin.kind.is_hostile() {
                hostile_count += 1;
            }

            for star in &self.stars {
                gremlin.on_star_collision(star);
            }

            if gremlin.active() {
                self.currently_moving = true;
                // Checked per gremlin so every dying gremlin gets its cue once
                if gremlin.dying && !gremlin.transform_cue_played {
                    gremlin.transform_cue_played = true;
                    transform_triggered = true;
                }
            }
        }

        if transform_triggered {
            audio.play_sample(SoundEffect::Transform, SAMPLE_VOLUME);
        }

        if hostile_count == 0 {
            log::info!("Stage {} cleared with {} moves left", self.index, self.moves);
            self.listener.show_outcome(Outcome::Won);
            return;
        }

        // A push only starts from rest; presses mid-slide are dropped
        let motion_input = if self.currently_moving {
            FrameInput {
                direction: None,
                ..input.clone()
            }
        } else {
            input.clone()
        };
        for gremlin in &mut self.gremlins {
            gremlin.update(&motion_input, &mut self.grid, dt);
        }
        self.wake_touched_sleepers();

        // Only idle -> moving counts as a move
        if self.currently_moving && !self.was_moving_last_frame {
            audio.play_sample(SoundEffect::Move, SAMPLE_VOLUME);
            self.moves -= 1;
            log::debug!("Stage {}: move counted, {} left", self.index, self.moves);

            if self.moves < 0 {
                log::info!("Stage {} lost: out of moves", self.index);
                self.listener.show_outcome(Outcome::Lost);
                return;
            }
        }

        for star in &mut self.stars {
            star.update(&mut self.grid, dt);
        }
    }

    /// Sleeping gremlins wake when another gremlin stops against them
    fn wake_touched_sleepers(&mut self) {
        let contacts: Vec<IVec2> = self
            .gremlins
            .iter()
            .filter(|g| g.exists)
            .filter_map(|g| g.contact())
            .collect();
        if contacts.is_empty() {
            return;
        }
        for gremlin in self.gremlins.iter_mut().filter(|g| g.exists && g.sleeping) {
            if contacts.contains(&gremlin.pos) {
                gremlin.wake();
            }
        }
    }

    fn draw_background(&self, renderer: &mut dyn Renderer) {
        renderer.clear(colors::BACKGROUND);

        let pos = self.origin - IVec2::splat(BORDER_SIZE);
        let size = IVec2::new(self.width, self.height) * TILE_SIZE + IVec2::splat(BORDER_SIZE * 2 + 2);
        renderer.fill_rect(pos + IVec2::splat(SHADOW_OFFSET), size, colors::SHADOW);
        renderer.fill_rect(pos - IVec2::ONE, size, colors::OUTLINE);
        self.draw_borders(renderer, pos);

        renderer.fill_rect(
            self.origin,
            IVec2::new(self.width, self.height) * TILE_SIZE,
            colors::PLAYFIELD,
        );
    }

    fn draw_borders(&self, renderer: &mut dyn Renderer, pos: IVec2) {
        let piece = IVec2::splat(BORDER_SIZE);
        let far = pos + IVec2::new(self.width, self.height) * TILE_SIZE + piece;
        let mut region = |src: IVec2, dest: IVec2| {
            renderer.draw_region(SpriteSheet::Borders, src * BORDER_SIZE, piece, dest)
        };

        for x in 0..self.width * 2 {
            let dx = self.origin.x + x * BORDER_SIZE;
            region(IVec2::new(1, 0), IVec2::new(dx, pos.y));
            region(IVec2::new(1, 2), IVec2::new(dx, far.y));
        }
        for y in 0..self.height * 2 {
            let dy = self.origin.y + y * BORDER_SIZE;
            region(IVec2::new(0, 1), IVec2::new(pos.x, dy));
            region(IVec2::new(2, 1), IVec2::new(far.x, dy));
        }

        region(IVec2::new(0, 0), pos);
        region(IVec2::new(2, 0), IVec2::new(far.x, pos.y));
        region(IVec2::new(0, 2), IVec2::new(pos.x, far.y));
        region(IVec2::new(2, 2), far);
    }

    fn draw_walls(&self, renderer: &mut dyn Renderer) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tilemap.tile(x, y) == TILE_WALL {
                    renderer.draw_region(
                        SpriteSheet::Wall,
                        IVec2::ZERO,
                        IVec2::splat(TILE_SIZE),
                        IVec2::new(x, y) * TILE_SIZE,
                    );
                }
            }
        }
    }

    fn draw_info(&self, renderer: &mut dyn Renderer) {
        let bottom = SCREEN_HEIGHT - INFO_BOTTOM_OFFSET;

        renderer.draw_text(
            &format!("Stage {}", self.index),
            IVec2::new(SCREEN_WIDTH / 2, INFO_INDEX_Y),
            true,
        );
        renderer.draw_text(
            &format!("\"{}\"", self.tilemap.name),
            IVec2::new(SCREEN_WIDTH / 2, INFO_NAME_Y),
            true,
        );

        let label = "Difficulty: ";
        renderer.draw_text(label, IVec2::new(INFO_SIDE_MARGIN, bottom), false);
        renderer.draw_text(
            &self.tilemap.difficulty_label(),
            IVec2::new(INFO_SIDE_MARGIN + label.len() as i32 * FONT_ADVANCE, bottom),
            false,
        );

        let moves = format!("Moves: {}", self.moves);
        let x = SCREEN_WIDTH - (moves.len() as i32 + 1) * FONT_ADVANCE + INFO_SIDE_MARGIN;
        renderer.draw_text(&moves, IVec2::new(x, bottom), false);
    }

    /// Draw the stage. Reads simulation state only.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.draw_background(renderer);

        renderer.set_translation(self.origin);
        self.draw_walls(renderer);
        for gremlin in &self.gremlins {
            gremlin.draw(renderer);
        }
        for star in &self.stars {
            star.draw(renderer);
        }
        renderer.set_translation(IVec2::ZERO);

        self.draw_info(renderer);
    }
}
