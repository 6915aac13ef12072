//! Pieces module - piece shapes and rotation states
//!
//! Shapes are lists of mino offsets relative to the piece pivot, with y growing
//! downward. The pivot is the origin `(0, 0)`: it is the cell a piece's `(x, y)`
//! position refers to, the center for T-spin corner checks, and the default anchor for
//! item effects. Standard kinds follow the guideline SRS orientations; the heavy piece
//! has a single orientation.
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::types::{Color, PieceKind, Rotation, RotationDirection};

/// Offset of a single mino relative to the pivot
pub type MinoOffset = (i32, i32);

/// Indexed by `Rotation::index()` (N, E, S, W)
type RotationShapes = [[MinoOffset; 4]; 4];

static I_SHAPES: RotationShapes = [
    // N: horizontal on the pivot row
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    // E: vertical, right of the pivot
    [(1, -1), (1, 0), (1, 1), (1, 2)],
    // S: horizontal, one row below
    [(-1, 1), (0, 1), (1, 1), (2, 1)],
    // W: vertical through the pivot
    [(0, -1), (0, 0), (0, 1), (0, 2)],
];

static O_SHAPES: RotationShapes = [[(0, -1), (1, -1), (0, 0), (1, 0)]; 4];

static T_SHAPES: RotationShapes = [
    [(0, -1), (-1, 0), (0, 0), (1, 0)],
    [(0, -1), (0, 0), (1, 0), (0, 1)],
    [(-1, 0), (0, 0), (1, 0), (0, 1)],
    [(0, -1), (-1, 0), (0, 0), (0, 1)],
];

static S_SHAPES: RotationShapes = [
    [(0, -1), (1, -1), (-1, 0), (0, 0)],
    [(0, -1), (0, 0), (1, 0), (1, 1)],
    [(0, 0), (1, 0), (-1, 1), (0, 1)],
    [(-1, -1), (-1, 0), (0, 0), (0, 1)],
];

static Z_SHAPES: RotationShapes = [
    [(-1, -1), (0, -1), (0, 0), (1, 0)],
    [(1, -1), (0, 0), (1, 0), (0, 1)],
    [(-1, 0), (0, 0), (0, 1), (1, 1)],
    [(0, -1), (-1, 0), (0, 0), (-1, 1)],
];

static J_SHAPES: RotationShapes = [
    [(-1, -1), (-1, 0), (0, 0), (1, 0)],
    [(0, -1), (1, -1), (0, 0), (0, 1)],
    [(-1, 0), (0, 0), (1, 0), (1, 1)],
    [(0, -1), (0, 0), (-1, 1), (0, 1)],
];

static L_SHAPES: RotationShapes = [
    [(1, -1), (-1, 0), (0, 0), (1, 0)],
    [(0, -1), (0, 0), (0, 1), (1, 1)],
    [(-1, 0), (0, 0), (1, 0), (-1, 1)],
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
];

/// `.##.` over `####`, pivot on the lower row
static HEAVY_SHAPE: [MinoOffset; 6] = [(0, -1), (1, -1), (-1, 0), (0, 0), (1, 0), (2, 0)];

/// Get the mino offsets for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static [MinoOffset] {
    let r = rotation.index();
    match kind {
        PieceKind::I => &I_SHAPES[r],
        PieceKind::O => &O_SHAPES[r],
        PieceKind::T => &T_SHAPES[r],
        PieceKind::S => &S_SHAPES[r],
        PieceKind::Z => &Z_SHAPES[r],
        PieceKind::J => &J_SHAPES[r],
        PieceKind::L => &L_SHAPES[r],
        PieceKind::Heavy => &HEAVY_SHAPE,
    }
}

/// An immutable piece definition in one rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
}

impl Piece {
    /// A piece in its spawn (north) orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Mino offsets for the current rotation
    pub fn shape(&self) -> &'static [MinoOffset] {
        get_shape(self.kind, self.rotation)
    }

    /// The piece one quarter turn in `direction`; non-rotating kinds come back unchanged
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        if !self.kind.can_rotate() {
            return *self;
        }
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }

    /// Absolute cells when the pivot sits at (x, y)
    pub fn cells_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> {
        self.shape().iter().map(move |&(dx, dy)| (x + dx, y + dy))
    }
}
