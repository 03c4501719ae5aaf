//! Injected luck rolls.
//!
//! Every probabilistic decision in a match (blocking, dodging, outgoing
//! damage, weapon wear, class shields) consults one luck roll:
//!
//! ```text
//! luck_roll = (uniform[0, 100) + luck) / 100
//! ```
//!
//! The draw comes from a [`LuckSource`] passed into the resolver, never from
//! a global generator. [`SeededLuck`] reproduces a match exactly from a
//! `u64` seed; [`FixedLuck`] pins every roll to one value for tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::math::Fixed;

/// Exclusive upper bound of the uniform draw, as raw fixed-point bits.
const DRAW_CEILING_BITS: i64 = 100_i64 << Fixed::FRAC_NBITS;

/// Source of luck rolls.
pub trait LuckSource {
    /// Produce one roll for a combatant with the given luck stat.
    fn luck_roll(&mut self, luck: u32) -> Fixed;
}

impl<L: LuckSource + ?Sized> LuckSource for &mut L {
    fn luck_roll(&mut self, luck: u32) -> Fixed {
        (**self).luck_roll(luck)
    }
}

impl<L: LuckSource + ?Sized> LuckSource for Box<L> {
    fn luck_roll(&mut self, luck: u32) -> Fixed {
        (**self).luck_roll(luck)
    }
}

/// Seeded, reproducible luck backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct SeededLuck {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededLuck {
    /// Create a luck source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw uniform draw in `[0, 100)`.
    pub fn draw(&mut self) -> Fixed {
        Fixed::from_bits(self.rng.gen_range(0..DRAW_CEILING_BITS))
    }
}

impl LuckSource for SeededLuck {
    fn luck_roll(&mut self, luck: u32) -> Fixed {
        let roll = (self.draw() + Fixed::from_num(luck)) / Fixed::from_num(100);
        tracing::trace!(luck, roll = %roll, "luck roll");
        roll
    }
}

/// Luck source that returns the same roll every time, ignoring the luck stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLuck(pub Fixed);

impl FixedLuck {
    /// Every roll is `value`.
    #[must_use]
    pub fn new(value: Fixed) -> Self {
        Self(value)
    }

    /// Worst possible luck: every roll is 0.
    #[must_use]
    pub fn worst() -> Self {
        Self(Fixed::ZERO)
    }
}

impl LuckSource for FixedLuck {
    fn luck_roll(&mut self, _luck: u32) -> Fixed {
        self.0
    }
}
