//! Shared types and constants
//!
//! Plain data used by every other crate in the workspace: piece kinds, rotation states,
//! item kinds, difficulty presets, commands and the scoring tables. Nothing here knows
//! about a board or a game state.
//!
//! # Board Dimensions
//!
//! Default playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn pivot**: (`width / 2 - 1`, 0)
//!
//! Boards of other sizes are allowed through configuration; the size is fixed for the
//! lifetime of a game.
//!
//! # Scoring Tables
//!
//! | Clear | Points |
//! |-------|--------|
//! | Single / Double / Triple / Tetris | 100 / 300 / 500 / 800 |
//! | T-spin 0 / 1 / 2 / 3 lines | 400 / 800 / 1200 / 1600 |
//! | T-spin mini 0 / 1 / 2 lines | 100 / 200 / 400 |
//! | Perfect clear 1 / 2 / 3 / 4 lines | 800 / 1200 / 1800 / 2000 |
//!
//! Back-to-back multiplies the base by 3/2, combos add `50 * combo * level`, and the
//! whole total is scaled by the level.
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 800ms |
//! | 2 | 650ms |
//! | 3 | 500ms |
//! | 4 | 400ms |
//! | 5 | 320ms |
//! | 6 | 250ms |
//! | 7 | 200ms |
//! | 8 | 160ms |
//! | 9+ | 120ms floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, ItemKind, PieceKind, Rotation, RotationDirection};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate(RotationDirection::Clockwise), Rotation::East);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(ItemKind::from_str("lineClear"), Some(ItemKind::LineClear));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: u8 = 20;

/// Default number of pieces shown in the next queue
pub const NEXT_QUEUE_LEN: usize = 6;

/// Level a new game starts at
pub const START_LEVEL: u32 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 15;

/// Lines needed per level step (`level * LINES_PER_LEVEL` to leave `level`)
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear points indexed by line count
pub const LINE_SCORES: [i64; 5] = [0, 100, 300, 500, 800];

/// T-spin points indexed by line count (0-3)
pub const TSPIN_SCORES: [i64; 4] = [400, 800, 1200, 1600];

/// T-spin mini points indexed by line count (0-2)
pub const TSPIN_MINI_SCORES: [i64; 3] = [100, 200, 400];

/// Perfect clear bonus indexed by line count (4+ uses the last entry)
pub const PERFECT_CLEAR_SCORES: [i64; 5] = [0, 800, 1200, 1800, 2000];

/// Combo bonus per combo step (scaled by level)
pub const COMBO_BASE: i64 = 50;

/// Back-to-back multiplier numerator (3/2)
pub const B2B_NUMERATOR: i64 = 3;

/// Back-to-back multiplier denominator (3/2)
pub const B2B_DENOMINATOR: i64 = 2;

/// Points per cell of manual soft drop
pub const SOFT_DROP_POINTS: i64 = 1;

/// Points per cell of hard drop
pub const HARD_DROP_POINTS: i64 = 2;

/// Drop intervals by level (milliseconds per row)
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Drop interval floor for levels past the table
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Default number of cleared lines between item drops
pub const LINES_PER_ITEM: u32 = 10;

/// Default area clear radius (radius 2 is a 5x5 square)
pub const AREA_CLEAR_RADIUS: u8 = 2;

/// Piece kinds, including the item-only heavy piece
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **Heavy**: Gray, six cells, never rotates and never comes out of the bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    Heavy,
}

impl PieceKind {
    /// The seven bag kinds, in canonical order
    pub const STANDARD: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Heavy"), Some(PieceKind::Heavy));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "heavy" => Some(PieceKind::Heavy),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::Heavy => "heavy",
        }
    }

    /// Display color
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::Heavy => Color::Gray,
        }
    }

    /// Whether the piece has rotation states (O and the heavy piece do not)
    pub fn can_rotate(&self) -> bool {
        !matches!(self, PieceKind::O | PieceKind::Heavy)
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, PieceKind::Heavy)
    }
}

/// Cell colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
    Gray,
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (0° rotation)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise (270° clockwise)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Index in the North/East/South/West cycle
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Direction of a single quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Power-up kinds a piece can carry
///
/// - **AreaClear**: clears a square around the lock pivot
/// - **CrossClear**: clears the pivot's row and column
/// - **LineClear**: marks one placed cell; its row is removed regardless of fill
/// - **HeavyDrop**: the next piece is the heavy piece, which digs straight down
/// - **SpeedReset**: resets the soft drop speed multiplier
/// - **BonusScore**: flat bonus scaled by level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    AreaClear,
    CrossClear,
    LineClear,
    HeavyDrop,
    SpeedReset,
    BonusScore,
}

impl ItemKind {
    pub const ALL: [ItemKind; 6] = [
        ItemKind::AreaClear,
        ItemKind::CrossClear,
        ItemKind::LineClear,
        ItemKind::HeavyDrop,
        ItemKind::SpeedReset,
        ItemKind::BonusScore,
    ];

    /// Parse item kind from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "areaclear" => Some(ItemKind::AreaClear),
            "crossclear" => Some(ItemKind::CrossClear),
            "lineclear" => Some(ItemKind::LineClear),
            "heavydrop" => Some(ItemKind::HeavyDrop),
            "speedreset" => Some(ItemKind::SpeedReset),
            "bonusscore" => Some(ItemKind::BonusScore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::AreaClear => "areaClear",
            ItemKind::CrossClear => "crossClear",
            ItemKind::LineClear => "lineClear",
            ItemKind::HeavyDrop => "heavyDrop",
            ItemKind::SpeedReset => "speedReset",
            ItemKind::BonusScore => "bonusScore",
        }
    }
}

/// Difficulty presets
///
/// Difficulty biases the piece generator and scales gravity; it never changes scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                i_piece_bias: 1.2,
                speed_multiplier: 0.8,
            },
            Difficulty::Normal => DifficultySettings {
                i_piece_bias: 1.0,
                speed_multiplier: 1.0,
            },
            Difficulty::Hard => DifficultySettings {
                i_piece_bias: 0.8,
                speed_multiplier: 1.2,
            },
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Tuning values behind a [`Difficulty`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Above 1.0 an extra I may join a bag, below 1.0 the I may be left out
    pub i_piece_bias: f64,
    /// Gravity speed factor (intervals are divided by it)
    pub speed_multiplier: f64,
}

/// Discrete player/timer commands
///
/// `Gravity` is the caller-scheduled automatic descent; `SoftDrop` is the manual one
/// and scores a point per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Manual one-cell descent (scores)
    SoftDrop,
    /// Automatic one-cell descent; locks when the piece cannot fall
    Gravity,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Instantly drop piece to lowest valid position and lock
    HardDrop,
    /// Swap with the hold slot (once per piece)
    Hold,
    Pause,
    Resume,
}

impl Command {
    /// Parse command from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "gravity" => Some(Command::Gravity),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "harddrop" => Some(Command::HardDrop),
            "hold" => Some(Command::Hold),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Gravity => "gravity",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Resume => "resume",
        }
    }
}

/// T-Spin detection result
///
/// - **None**: Not a T-spin
/// - **Mini**: 3+ corners filled but not both front corners (and no final-candidate kick)
/// - **Full**: 3+ corners filled with both front corners, or reached via the last kick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TSpinKind {
    #[default]
    None,
    Mini,
    Full,
}

impl TSpinKind {
    pub fn is_spin(&self) -> bool {
        !matches!(self, TSpinKind::None)
    }
}
