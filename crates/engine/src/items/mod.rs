//! Item effect system
//!
//! Arcade games hand out an item every few cleared lines. The item rides on the next
//! spawned piece and fires when that piece locks. Each board-affecting kind is an
//! [`ItemEffect`] applied to the engine's working copy of the state; the heavy piece
//! works through the step and settle hooks in [`heavy`] instead.

use std::fmt;

use blockfall_core::types::ItemKind;
use blockfall_core::{Board, EffectReport, GameState, ItemConfig, Pivot};

pub mod area;
pub mod bonus_score;
pub mod cross;
pub mod heavy;
pub mod marked_line;
pub mod speed_reset;

pub use area::AreaClear;
pub use bonus_score::BonusScore;
pub use cross::CrossClear;
pub use marked_line::MarkedLineClear;
pub use speed_reset::SpeedReset;

/// Points per block removed by the area and cross clears
pub const POINTS_PER_EFFECT_BLOCK: i64 = 5;

/// One item kind's effect.
///
/// `apply` edits the state it is given and describes the outcome; it never panics and
/// leaves the state untouched when the pivot is off the board. Points in the report
/// are not added to the score here.
pub trait ItemEffect: fmt::Debug + Send + Sync {
    fn kind(&self) -> ItemKind;

    fn apply(&self, state: &mut GameState, pivot: Pivot) -> EffectReport;
}

/// Gravity in the columns an effect emptied cells in, then a sweep for rows it completed.
///
/// Nothing moves when nothing was cleared; untouched columns keep their overhangs.
pub(crate) fn gravity_and_recheck(board: &mut Board, cleared: &[(i32, i32)]) -> usize {
    if cleared.is_empty() {
        return 0;
    }
    let mut columns: Vec<i32> = cleared.iter().map(|&(x, _)| x).collect();
    columns.sort_unstable();
    columns.dedup();
    for x in columns {
        board.compact_column(x);
    }
    board.clear_full_rows().len()
}

/// Registry of effects plus the item cadence
#[derive(Debug)]
pub struct ItemSystem {
    config: ItemConfig,
    effects: Vec<Box<dyn ItemEffect>>,
}

impl ItemSystem {
    pub fn new(config: ItemConfig) -> Self {
        let effects: Vec<Box<dyn ItemEffect>> = vec![
            Box::new(AreaClear::new(config.area_radius)),
            Box::new(CrossClear),
            Box::new(MarkedLineClear),
            Box::new(SpeedReset),
            Box::new(BonusScore),
        ];
        Self { config, effects }
    }

    pub fn config(&self) -> &ItemConfig {
        &self.config
    }

    pub fn effect(&self, kind: ItemKind) -> Option<&dyn ItemEffect> {
        self.effects
            .iter()
            .find(|effect| effect.kind() == kind)
            .map(|effect| effect.as_ref())
    }

    /// Fire the effect a locked piece carried.
    ///
    /// `LineClear` works through its marker and `HeavyDrop` through the settle step, so
    /// neither has anything to do here.
    pub fn apply_carried(
        &self,
        kind: ItemKind,
        state: &mut GameState,
        pivot: Pivot,
    ) -> Option<EffectReport> {
        match kind {
            ItemKind::LineClear | ItemKind::HeavyDrop => None,
            _ => self.effect(kind).map(|effect| effect.apply(state, pivot)),
        }
    }

    /// Put a line clear marker on one of the freshly placed cells
    pub fn attach_marker(&self, state: &mut GameState, placed: &[(i32, i32)]) -> Option<(i32, i32)> {
        let on_board: Vec<(i32, i32)> = placed
            .iter()
            .copied()
            .filter(|&(x, y)| !state.board().is_out_of_bounds(x, y))
            .collect();
        let (x, y) = *state.rng_mut().choose(&on_board)?;
        let cell = state.board().get(x, y)?;
        state
            .board_mut()
            .set(x, y, cell.with_marker(ItemKind::LineClear));
        Some((x, y))
    }

    /// Remove every marked row, if any
    pub fn clear_marked_lines(&self, state: &mut GameState) -> Option<EffectReport> {
        if MarkedLineClear::marked_rows(state).is_empty() {
            return None;
        }
        Some(MarkedLineClear.apply(state, Pivot::new(0, 0)))
    }

    /// Count `lines` against the item counter, queueing an item when it runs out.
    ///
    /// The counter restarts at the full interval; extra lines do not carry over.
    pub fn advance_cadence(&self, state: &mut GameState, lines: usize) -> Option<ItemKind> {
        let remaining = i64::from(state.lines_until_next_item()) - lines as i64;
        if remaining > 0 {
            state.set_lines_until_next_item(remaining as u32);
            return None;
        }

        state.set_lines_until_next_item(self.config.lines_per_item);
        let kind = *state.rng_mut().choose(&self.config.enabled)?;
        state.set_pending_item(Some(kind));
        Some(kind)
    }
}

impl Default for ItemSystem {
    fn default() -> Self {
        Self::new(ItemConfig::default())
    }
}
