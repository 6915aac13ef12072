//! SRS wall kick data
//!
//! Each transition lists `(dx, dy)` candidates tried in order after a raw rotation;
//! candidate 0 is the unshifted placement. O and the heavy piece never rotate, so the
//! rules engine skips this table for them.

use crate::types::{PieceKind, Rotation};

/// A wall kick offset
pub type Kick = (i32, i32);

/// Indexed by [`transition_index`]
type KickTable = [[Kick; 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
static JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table
static I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// The unshifted placement only
pub static NO_KICK: [Kick; 1] = [(0, 0)];

/// Row of the kick tables for a quarter-turn transition
fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    match (from, to) {
        (Rotation::North, Rotation::East) => Some(0),
        (Rotation::North, Rotation::West) => Some(1),
        (Rotation::East, Rotation::North) => Some(2),
        (Rotation::East, Rotation::South) => Some(3),
        (Rotation::South, Rotation::East) => Some(4),
        (Rotation::South, Rotation::West) => Some(5),
        (Rotation::West, Rotation::South) => Some(6),
        (Rotation::West, Rotation::North) => Some(7),
        _ => None,
    }
}

/// Ordered kick candidates for rotating `kind` from `from` to `to`.
///
/// Anything without a table entry (O, heavy, half turns) gets the single unshifted
/// candidate.
pub fn kicks(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [Kick] {
    let Some(index) = transition_index(from, to) else {
        return &NO_KICK;
    };
    match kind {
        PieceKind::I => &I_KICKS[index],
        PieceKind::T | PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L => {
            &JLSTZ_KICKS[index]
        }
        PieceKind::O | PieceKind::Heavy => &NO_KICK,
    }
}
