//! Scripted luck sources for tests.

use arena_core::luck::LuckSource;
use arena_core::math::Fixed;

/// Replays a fixed script of rolls, cycling when it runs out.
///
/// The combatant's luck stat is ignored, so every decision sees exactly the
/// scripted value.
#[derive(Debug, Clone)]
pub struct ScriptedLuck {
    rolls: Vec<Fixed>,
    next: usize,
    drawn: usize,
}

impl ScriptedLuck {
    /// Script from fixed-point rolls.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = Fixed>) -> Self {
        let rolls: Vec<Fixed> = rolls.into_iter().collect();
        assert!(!rolls.is_empty(), "a luck script needs at least one roll");
        Self {
            rolls,
            next: 0,
            drawn: 0,
        }
    }

    /// Script from float rolls (test convenience).
    #[must_use]
    pub fn from_f64s(rolls: &[f64]) -> Self {
        Self::new(rolls.iter().map(|&r| Fixed::from_num(r)))
    }

    /// Total rolls handed out so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl LuckSource for ScriptedLuck {
    fn luck_roll(&mut self, _luck: u32) -> Fixed {
        let roll = self.rolls[self.next];
        self.next = (self.next + 1) % self.rolls.len();
        self.drawn += 1;
        roll
    }
}

/// Counts rolls while delegating to another source.
#[derive(Debug, Clone)]
pub struct CountingLuck<L> {
    inner: L,
    /// Rolls drawn so far.
    pub count: usize,
}

impl<L: LuckSource> CountingLuck<L> {
    /// Wrap `inner`.
    pub fn new(inner: L) -> Self {
        Self { inner, count: 0 }
    }
}

impl<L: LuckSource> LuckSource for CountingLuck<L> {
    fn luck_roll(&mut self, luck: u32) -> Fixed {
        self.count += 1;
        self.inner.luck_roll(luck)
    }
}
