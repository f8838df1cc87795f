//! Game flow
//!
//! Owns the current stage and decides what happens after it reports an
//! outcome: a win moves on to the next stage, a loss rebuilds the same one.

use glam::IVec2;
use thiserror::Error;

use crate::assets::AssetPack;
use crate::audio::AudioManager;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::{Renderer, colors};
use crate::settings::Settings;
use crate::sim::{FrameInput, Outcome, OutcomeLatch, Stage};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Stage {0} not found in level pack")]
    StageNotFound(u32),
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Stage ended, waiting for confirm
    ShowingOutcome(Outcome),
    /// Every stage in the pack has been cleared
    Complete,
}

#[derive(Debug)]
pub struct Game {
    assets: AssetPack,
    stage: Stage,
    latch: OutcomeLatch,
    phase: GamePhase,
    audio: AudioManager,
}

impl Game {
    pub fn new(assets: AssetPack, settings: &Settings) -> Result<Self, GameError> {
        let latch = OutcomeLatch::new();
        let stage = build_stage(&assets, settings.start_stage, &latch)?;
        Ok(Self {
            assets,
            stage,
            latch,
            phase: GamePhase::Playing,
            audio: AudioManager::from_settings(settings),
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Replace the stage with a fresh copy of stage `index`
    pub fn reset(&mut self, index: u32) -> Result<(), GameError> {
        self.latch.take();
        self.stage = build_stage(&self.assets, index, &self.latch)?;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Playing => {
                if input.restart {
                    log::info!("Restarting stage {}", self.stage.index());
                    return self.reset(self.stage.index());
                }
                self.stage.update(input, &mut self.audio, dt);
                if let Some(outcome) = self.latch.take() {
                    self.phase = GamePhase::ShowingOutcome(outcome);
                }
            }
            GamePhase::ShowingOutcome(outcome) => {
                if input.confirm {
                    self.advance(outcome)?;
                }
            }
            GamePhase::Complete => {}
        }
        Ok(())
    }

    fn advance(&mut self, outcome: Outcome) -> Result<(), GameError> {
        let index = self.stage.index();
        if !outcome.won() {
            return self.reset(index);
        }
        if (index as usize) < self.assets.len() {
            self.reset(index + 1)
        } else {
            log::info!("All {} stages cleared", self.assets.len());
            self.phase = GamePhase::Complete;
            Ok(())
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.stage.draw(renderer);

        let message = match self.phase {
            GamePhase::Playing => return,
            GamePhase::ShowingOutcome(Outcome::Won) => "Stage clear!",
            GamePhase::ShowingOutcome(Outcome::Lost) => "Out of moves!",
            GamePhase::Complete => "All stages clear!",
        };
        let size = IVec2::new(160, 40);
        let pos = IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / 2 - size / 2;
        renderer.fill_rect(pos, size, colors::INFO_BOX);
        renderer.draw_text(message, IVec2::new(SCREEN_WIDTH / 2, pos.y + 16), true);
    }
}

fn build_stage(assets: &AssetPack, index: u32, latch: &OutcomeLatch) -> Result<Stage, GameError> {
    let tilemap = assets
        .tilemap(index)
        .ok_or(GameError::StageNotFound(index))?;
    Ok(Stage::new(index, tilemap, Box::new(latch.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::renderer::DrawList;
    use crate::sim::{Direction, Tilemap};

    fn pack() -> AssetPack {
        AssetPack::from_tilemaps(vec![
            Tilemap::new("one", 3, 1, vec![2, 0, 5]).with_move_limit(1),
            Tilemap::new("two", 3, 1, vec![3, 0, 6]).with_move_limit(0),
        ])
        .unwrap()
    }

    fn run(game: &mut Game, frames: usize) {
        for _ in 0..frames {
            game.update(&FrameInput::default(), SIM_DT).unwrap();
        }
    }

    fn confirm(game: &mut Game) {
        let input = FrameInput {
            confirm: true,
            ..Default::default()
        };
        game.update(&input, SIM_DT).unwrap();
    }

    #[test]
    fn test_missing_start_stage() {
        let settings = Settings {
            start_stage: 9,
            ..Default::default()
        };
        assert_eq!(
            Game::new(pack(), &settings).unwrap_err(),
            GameError::StageNotFound(9)
        );
    }

    #[test]
    fn test_win_advances_then_loss_restarts() {
        let mut game = Game::new(pack(), &Settings::default()).unwrap();
        game.update(&FrameInput::push(Direction::Right), SIM_DT).unwrap();
        run(&mut game, 120);
        assert_eq!(game.phase(), GamePhase::ShowingOutcome(Outcome::Won));

        // Waits for confirm
        run(&mut game, 10);
        assert_eq!(game.stage().index(), 1);
        confirm(&mut game);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.stage().index(), 2);

        // Stage two has no moves to spend
        game.update(&FrameInput::push(Direction::Right), SIM_DT).unwrap();
        run(&mut game, 2);
        assert_eq!(game.phase(), GamePhase::ShowingOutcome(Outcome::Lost));
        confirm(&mut game);
        assert_eq!(game.stage().index(), 2);
        assert_eq!(game.stage().moves(), 0);
        assert_eq!(game.stage().gremlins()[0].pos, IVec2::ZERO);
    }

    #[test]
    fn test_clearing_last_stage_completes() {
        let settings = Settings {
            start_stage: 2,
            ..Default::default()
        };
        let maps = vec![
            Tilemap::new("one", 1, 1, vec![0]),
            Tilemap::new("rocks", 1, 1, vec![11]),
        ];
        let mut game = Game::new(AssetPack::from_tilemaps(maps).unwrap(), &settings).unwrap();
        run(&mut game, 1);
        assert_eq!(game.phase(), GamePhase::ShowingOutcome(Outcome::Won));
        confirm(&mut game);
        assert_eq!(game.phase(), GamePhase::Complete);

        let mut list = DrawList::new();
        game.draw(&mut list);
        assert!(list.texts().contains(&"All stages clear!"));
    }

    #[test]
    fn test_restart_rebuilds_stage() {
        let mut game = Game::new(pack(), &Settings::default()).unwrap();
        game.update(&FrameInput::push(Direction::Right), SIM_DT).unwrap();
        run(&mut game, 1);
        assert_eq!(game.stage().moves(), 0);

        let restart = FrameInput {
            restart: true,
            ..Default::default()
        };
        game.update(&restart, SIM_DT).unwrap();
        assert_eq!(game.stage().moves(), 1);
        assert_eq!(game.stage().gremlins()[0].pos, IVec2::ZERO);
        assert!(!game.stage().grid().is_solid(1, 0));
    }

    #[test]
    fn test_move_cues_reach_audio() {
        let mut game = Game::new(pack(), &Settings::default()).unwrap();
        game.update(&FrameInput::push(Direction::Right), SIM_DT).unwrap();
        run(&mut game, 1);
        let cues = game.audio_mut().drain();
        assert_eq!(cues.len(), 1);
    }
}
