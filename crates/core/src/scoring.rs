//! Scoring module - line clear, spin, streak and drop scoring
//!
//! Rules, in order of application for a clearing lock:
//! - base points from the line table, or the T-spin / T-spin mini tables
//! - back-to-back applies a 3/2 multiplier to the base when this clear and the previous
//!   one are both difficult (a tetris or any T-spin)
//! - combo bonus `COMBO_BASE * combo * level`, using the combo count before this clear
//! - perfect clear bonus when the board ends up empty
//! - the whole total is scaled by the level
//!
//! A T-spin that clears nothing scores its table value times the level and nothing else.

use crate::types::{
    Difficulty, TSpinKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, DROP_INTERVALS,
    DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    PERFECT_CLEAR_SCORES, SOFT_DROP_POINTS, TSPIN_MINI_SCORES, TSPIN_SCORES,
};

/// Inputs to a lock's score, taken before the lock updates any streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreInput {
    pub lines: usize,
    pub tspin: TSpinKind,
    pub level: u32,
    /// Combo count before this lock
    pub combo: u32,
    /// Back-to-back count before this lock
    pub back_to_back: u32,
    pub perfect_clear: bool,
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points, after the B2B multiplier, before level scaling
    pub base: i64,
    pub combo_bonus: i64,
    pub perfect_clear_bonus: i64,
    pub total: i64,
    /// Whether this clear is a tetris or any T-spin
    pub difficult: bool,
    pub b2b_applied: bool,
}

/// Table points for a clear (no multipliers)
pub fn base_score(lines: usize, tspin: TSpinKind) -> i64 {
    match tspin {
        TSpinKind::Full => TSPIN_SCORES[lines.min(TSPIN_SCORES.len() - 1)],
        TSpinKind::Mini => TSPIN_MINI_SCORES[lines.min(TSPIN_MINI_SCORES.len() - 1)],
        TSpinKind::None => LINE_SCORES[lines.min(LINE_SCORES.len() - 1)],
    }
}

/// A tetris or any T-spin
pub fn is_difficult(lines: usize, tspin: TSpinKind) -> bool {
    lines == 4 || tspin.is_spin()
}

/// Apply the B2B multiplier (3/2, floored) to a point value.
pub fn apply_b2b_multiplier(points: i64) -> i64 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// `COMBO_BASE * combo * level`; zero when no combo is running
pub fn combo_bonus(combo: u32, level: u32) -> i64 {
    COMBO_BASE * i64::from(combo) * i64::from(level)
}

pub fn perfect_clear_bonus(lines: usize) -> i64 {
    PERFECT_CLEAR_SCORES[lines.min(PERFECT_CLEAR_SCORES.len() - 1)]
}

/// Calculate the complete score for a lock.
pub fn calculate_score(input: ScoreInput) -> ScoreResult {
    let level = i64::from(input.level);

    if input.lines == 0 {
        let base = if input.tspin.is_spin() {
            base_score(0, input.tspin)
        } else {
            0
        };
        return ScoreResult {
            base,
            total: base * level,
            difficult: input.tspin.is_spin(),
            ..ScoreResult::default()
        };
    }

    let difficult = is_difficult(input.lines, input.tspin);
    let b2b_applied = difficult && input.back_to_back > 0;

    let mut base = base_score(input.lines, input.tspin);
    if b2b_applied {
        base = apply_b2b_multiplier(base);
    }

    let combo_bonus = combo_bonus(input.combo, input.level);
    let perfect_clear_bonus = if input.perfect_clear {
        perfect_clear_bonus(input.lines)
    } else {
        0
    };

    let total = (base + combo_bonus + perfect_clear_bonus).saturating_mul(level);

    ScoreResult {
        base,
        combo_bonus,
        perfect_clear_bonus,
        total,
        difficult,
        b2b_applied,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> i64 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    i64::from(cells) * per_cell
}

/// Level bookkeeping after lines were added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub lines_for_next_level: u32,
    pub leveled_up: bool,
}

/// Advance the level while the line total has reached the next threshold.
///
/// Leaving level `n` takes `n * LINES_PER_LEVEL` total lines; the level caps at
/// `MAX_LEVEL`.
pub fn advance_level(level: u32, lines_for_next_level: u32, total_lines: u32) -> LevelProgress {
    let mut progress = LevelProgress {
        level,
        lines_for_next_level,
        leveled_up: false,
    };
    while total_lines >= progress.lines_for_next_level && progress.level < MAX_LEVEL {
        progress.level += 1;
        progress.lines_for_next_level = progress.level * LINES_PER_LEVEL;
        progress.leveled_up = true;
    }
    progress
}

/// Gravity interval for a level (in milliseconds).
///
/// Levels start at 1, so level 1 reads the first table entry. The table value is divided
/// by the difficulty speed factor and by the soft drop speed multiplier, never going
/// below 1ms.
pub fn drop_interval_ms(level: u32, difficulty: Difficulty, soft_drop_multiplier: f64) -> u32 {
    let base = DROP_INTERVALS
        .get(level.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS);
    let speed = difficulty.settings().speed_multiplier * soft_drop_multiplier.max(f64::EPSILON);
    ((f64::from(base) / speed) as u32).max(1)
}
