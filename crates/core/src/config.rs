//! Game configuration
//!
//! Everything fixed at game start: board size, starting level, difficulty, rotation
//! system, hold, queue length and the item setup. Configurations deserialize from JSON
//! with every field optional (missing fields take the classic defaults).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    Difficulty, ItemKind, AREA_CLEAR_RADIUS, BOARD_HEIGHT, BOARD_WIDTH, LINES_PER_ITEM, MAX_LEVEL,
    NEXT_QUEUE_LEN, START_LEVEL,
};

pub const MIN_BOARD_WIDTH: u8 = 4;
pub const MAX_BOARD_WIDTH: u8 = 40;
pub const MIN_BOARD_HEIGHT: u8 = 4;
pub const MAX_BOARD_HEIGHT: u8 = 60;

/// Gameplay policy: plain rules, or rules plus the item system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Arcade,
}

/// Item system settings (only consulted in arcade mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Item kinds the cadence may hand out
    pub enabled: Vec<ItemKind>,
    /// Cleared lines between item drops
    pub lines_per_item: u32,
    /// Half-width of the area clear square
    pub area_radius: u8,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            enabled: ItemKind::ALL.to_vec(),
            lines_per_item: LINES_PER_ITEM,
            area_radius: AREA_CLEAR_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub start_level: u32,
    pub difficulty: Difficulty,
    pub srs_enabled: bool,
    pub hold_enabled: bool,
    pub next_queue_len: usize,
    pub mode: GameMode,
    pub items: ItemConfig,
    /// Fixed seed; `None` lets the caller pick one per game
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            start_level: START_LEVEL,
            difficulty: Difficulty::Normal,
            srs_enabled: true,
            hold_enabled: true,
            next_queue_len: NEXT_QUEUE_LEN,
            mode: GameMode::Classic,
            items: ItemConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Standard rules without items
    pub fn classic() -> Self {
        Self::default()
    }

    /// Standard rules plus every item kind
    pub fn arcade() -> Self {
        Self {
            mode: GameMode::Arcade,
            ..Self::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn items_enabled(&self) -> bool {
        self.mode == GameMode::Arcade
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&self.board_width) {
            return Err(ConfigError::BoardWidth(self.board_width));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&self.board_height) {
            return Err(ConfigError::BoardHeight(self.board_height));
        }
        if !(START_LEVEL..=MAX_LEVEL).contains(&self.start_level) {
            return Err(ConfigError::StartLevel(self.start_level));
        }
        if self.next_queue_len == 0 {
            return Err(ConfigError::EmptyNextQueue);
        }
        if self.items_enabled() {
            if self.items.lines_per_item == 0 {
                return Err(ConfigError::ZeroItemInterval);
            }
            if self.items.enabled.is_empty() {
                return Err(ConfigError::NoItemsEnabled);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width {0} outside 4..=40")]
    BoardWidth(u8),
    #[error("board height {0} outside 4..=60")]
    BoardHeight(u8),
    #[error("start level {0} outside 1..=15")]
    StartLevel(u32),
    #[error("next queue length must be at least 1")]
    EmptyNextQueue,
    #[error("lines per item must be at least 1")]
    ZeroItemInterval,
    #[error("arcade mode needs at least one enabled item")]
    NoItemsEnabled,
}
