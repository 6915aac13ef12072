//! Core game model - pure, deterministic, and testable
//!
//! Data and pure rules for a falling-block puzzle: the board, piece shapes, rotation
//! kicks, the bag generator, scoring tables and the immutable game state. Nothing here
//! performs I/O or reads a clock, so the same seed always produces the same game.
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision queries, row clears and column gravity
//! - [`pieces`]: pivot-relative shapes for the seven standard pieces and the heavy piece
//! - [`kicks`]: SRS wall kick offsets per rotation transition
//! - [`rng`]: LCG and the 7-bag generator (difficulty-biased, serializable cursor)
//! - [`scoring`]: line, T-spin, combo, back-to-back and perfect clear scoring; levels
//! - [`game_state`]: the aggregate value every transition replaces
//! - [`config`]: game setup and validation
//! - [`report`]: lock and item effect reports

pub mod board;
pub mod config;
pub mod game_state;
pub mod kicks;
pub mod pieces;
pub mod report;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use config::{ConfigError, GameConfig, GameMode, ItemConfig};
pub use game_state::{ActivePiece, FinalResult, GameState, HeldPiece};
pub use kicks::kicks;
pub use pieces::{get_shape, Piece};
pub use report::{EffectReport, LockReport, Pivot};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, ScoreInput, ScoreResult};
