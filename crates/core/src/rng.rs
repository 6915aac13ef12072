//! RNG module - bag-based piece generation
//!
//! Implements the "7-bag" randomizer: each bag holds one of each standard piece
//! (I, O, T, S, Z, J, L), shuffled; draws walk the bag and a new bag is shuffled when it
//! runs out. Difficulty may bias a fresh bag (an extra I on easy, a missing I on hard).
//!
//! Everything here is plain serializable data, so a generator can be shipped to a
//! remote peer and resumed there with an identical sequence.

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, PieceKind};

/// Chance that a biased difficulty alters a fresh bag
pub const BAG_BIAS_CHANCE: f64 = 0.2;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG repeat with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Pick one element uniformly
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_range(items.len() as u32) as usize;
        items.get(index)
    }
}

/// Bag piece generator.
///
/// The struct itself is the replay cursor: serialize it to capture the exact position
/// in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceGenerator {
    seed: u32,
    difficulty: Difficulty,
    rng: SimpleRng,
    /// Current bag of pieces
    bag: Vec<PieceKind>,
    /// Index into current bag
    bag_index: usize,
    /// Pieces handed out since the last (re)start
    drawn: u64,
}

impl PieceGenerator {
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        let mut generator = Self {
            seed,
            difficulty,
            rng: SimpleRng::new(seed),
            bag: Vec::with_capacity(PieceKind::STANDARD.len() + 1),
            bag_index: 0,
            drawn: 0,
        };
        generator.refill_bag();
        generator
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend_from_slice(&PieceKind::STANDARD);

        let bias = self.difficulty.settings().i_piece_bias;
        if bias > 1.0 {
            if self.rng.chance(BAG_BIAS_CHANCE) {
                self.bag.push(PieceKind::I);
            }
        } else if bias < 1.0 && self.rng.chance(BAG_BIAS_CHANCE) {
            self.bag.retain(|kind| *kind != PieceKind::I);
        }

        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        self.drawn += 1;
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.clone().draw()
    }

    /// Non-destructive lookahead of the next `n` pieces.
    ///
    /// Runs a copy of the cursor, so the preview always matches the following draws,
    /// across bag boundaries included.
    pub fn preview(&self, n: usize) -> Vec<PieceKind> {
        let mut cursor = self.clone();
        (0..n).map(|_| cursor.draw()).collect()
    }

    /// Start over with a fresh seed (difficulty is kept)
    pub fn restart(&mut self, seed: u32) {
        *self = Self::new(seed, self.difficulty);
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn drawn(&self) -> u64 {
        self.drawn
    }

    /// Remaining pieces of the current bag
    pub fn current_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index.min(self.bag.len())..]
    }
}

/// Infinite stream of draws
impl Iterator for PieceGenerator {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, Difficulty::Normal)
    }
}
