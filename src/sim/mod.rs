//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by frame input and elapsed time
//! - Stable iteration order (actors are never removed, only flagged)
//! - No rendering or platform dependencies beyond the draw/audio traits

pub mod gremlin;
pub mod grid;
pub mod sprite;
pub mod stage;
pub mod star;
pub mod tilemap;

pub use gremlin::{Direction, FrameInput, Gremlin, GremlinKind, Motion};
pub use grid::SolidityGrid;
pub use sprite::Sprite;
pub use stage::{Outcome, OutcomeLatch, OutcomeListener, Stage};
pub use star::{Star, StarKind};
pub use tilemap::{TileObject, Tilemap};
