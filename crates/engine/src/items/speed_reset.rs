use blockfall_core::types::ItemKind;
use blockfall_core::{EffectReport, GameState, Pivot};

use super::ItemEffect;

pub const SPEED_RESET_BONUS: i64 = 100;

/// Puts the soft drop speed back to its base and raises the one-shot flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedReset;

impl ItemEffect for SpeedReset {
    fn kind(&self) -> ItemKind {
        ItemKind::SpeedReset
    }

    fn apply(&self, state: &mut GameState, pivot: Pivot) -> EffectReport {
        if state.board().is_out_of_bounds(pivot.col, pivot.row) {
            return EffectReport::failed(self.kind(), "pivot outside the board");
        }
        state.request_speed_reset();
        EffectReport {
            bonus_score: SPEED_RESET_BONUS,
            ..EffectReport::succeeded(self.kind(), "soft drop speed reset")
        }
    }
}
