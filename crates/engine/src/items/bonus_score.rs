use blockfall_core::types::ItemKind;
use blockfall_core::{EffectReport, GameState, Pivot};

use super::ItemEffect;

pub const BONUS_BASE: i64 = 500;
pub const BONUS_PER_LEVEL: i64 = 50;

/// Flat points scaled by level; the board is left alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusScore;

impl ItemEffect for BonusScore {
    fn kind(&self) -> ItemKind {
        ItemKind::BonusScore
    }

    fn apply(&self, state: &mut GameState, pivot: Pivot) -> EffectReport {
        if state.board().is_out_of_bounds(pivot.col, pivot.row) {
            return EffectReport::failed(self.kind(), "pivot outside the board");
        }
        let bonus = BONUS_BASE + i64::from(state.level()) * BONUS_PER_LEVEL;
        EffectReport {
            bonus_score: bonus,
            ..EffectReport::succeeded(self.kind(), format!("bonus {bonus}"))
        }
    }
}
