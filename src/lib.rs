//! Gremlin Stars - a tile-grid push puzzle
//!
//! Core modules:
//! - `sim`: Deterministic stage simulation (grid, actors, move budget, win/lose)
//! - `renderer`: Drawing seam implemented by platform backends
//! - `audio`: Sound cue requests and volume handling
//! - `assets`: JSON level packs
//! - `game`: Stage flow (advance on win, retry on loss)
//! - `settings`: Persisted preferences

pub mod assets;
pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, AssetPack};
pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use game::{Game, GameError, GamePhase};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Virtual screen size in pixels
    pub const SCREEN_WIDTH: i32 = 256;
    pub const SCREEN_HEIGHT: i32 = 240;
    /// Space reserved above the play field for the stage title
    pub const STAGE_Y_OFF: i32 = 8;

    /// Grid cell size in pixels
    pub const TILE_SIZE: i32 = 16;
    pub const BORDER_SIZE: i32 = 8;
    pub const SHADOW_OFFSET: i32 = 12;

    /// HUD text layout
    pub const FONT_ADVANCE: i32 = 10;
    pub const INFO_INDEX_Y: i32 = 8;
    pub const INFO_NAME_Y: i32 = 24;
    pub const INFO_BOTTOM_OFFSET: i32 = 16;
    pub const INFO_SIDE_MARGIN: i32 = 2;

    /// Each color owns a block of rows in the gremlin sheet
    pub const SHEET_ROWS_PER_COLOR: i32 = 5;
    pub const GREMLIN_IDLE_ROW: i32 = 0;
    pub const GREMLIN_SLEEP_ROW: i32 = 1;
    pub const STAR_ANIM_ROW: i32 = 2;
    pub const GREMLIN_MOVE_ROW: i32 = 3;
    pub const GREMLIN_TRANSFORM_ROW: i32 = 4;

    /// Seconds per star animation frame (8 ticks at 60 Hz)
    pub const STAR_FRAME_TIME: f32 = 8.0 / 60.0;
    /// Seconds per gremlin animation frame
    pub const GREMLIN_FRAME_TIME: f32 = 10.0 / 60.0;
    /// Seconds to slide one cell
    pub const GREMLIN_STEP_TIME: f32 = 0.125;
    /// Seconds from touching a star to removal
    pub const TRANSFORM_TIME: f32 = 0.5;

    /// Volume of the move and transform cues
    pub const SAMPLE_VOLUME: f32 = 0.30;
}
