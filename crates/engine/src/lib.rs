//! Rules engine for blockfall
//!
//! [`RulesEngine`] turns one immutable [`GameState`](blockfall_core::GameState) into the
//! next: movement, rotation with wall kicks, hold, hard drop and the lock step (spin
//! detection, line clears, scoring, streaks, spawning). In arcade mode it also drives
//! the [`items`] system.
//!
//! ```
//! use blockfall_engine::RulesEngine;
//! use blockfall_core::types::Command;
//!
//! let engine = RulesEngine::classic();
//! let state = engine.new_game(12345);
//!
//! let moved = engine.apply(&state, Command::MoveLeft);
//! assert!(!moved.is_noop(&state));
//!
//! let dropped = engine.apply(&moved.state, Command::HardDrop);
//! assert!(dropped.lock.is_some());
//! assert!(dropped.state.score() > 0);
//! ```

pub mod items;
pub mod rules;

pub use blockfall_core as core;
pub use items::{ItemEffect, ItemSystem};
pub use rules::{detect_tspin, RulesEngine, Transition};
