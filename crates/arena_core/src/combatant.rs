//! Combatants: stats, damage pipeline and movement.
//!
//! A [`Combatant`] owns exactly one [`Weapon`] and stands on a 1-D line.
//! Incoming attacks run through a fixed pipeline, each step drawing a
//! fresh luck roll of the *receiving* combatant:
//!
//! 1. count the hit
//! 2. block: the blocking weapon soaks the whole attack
//! 3. dodge: the attack is negated
//! 4. hit: the archetype's absorb strategy applies the damage
//!
//! Block and dodge are shared by every class; only step 4 is overridden.

use serde::{Deserialize, Serialize};

use crate::archetype::{Absorbed, Archetype};
use crate::catalog::WeaponKind;
use crate::error::{ArenaError, Result};
use crate::luck::LuckSource;
use crate::math::{fixed_serde, floor_at_zero, Fixed};
use crate::weapon::Weapon;

/// Each point of speed adds this much to the dodge chance (in percent).
pub const DODGE_PER_SPEED: u32 = 3;

/// Index of a combatant in its roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Create an ID from a roster index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of resolving one incoming attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingOutcome {
    /// The defender's weapon soaked the attack.
    Blocked,
    /// The attack missed entirely.
    Dodged,
    /// The attack landed.
    Hit(Absorbed),
}

/// A weapon that broke and the one that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponBreak {
    /// Kind that broke.
    pub from: WeaponKind,
    /// Replacement issued from the fallback chain.
    pub to: WeaponKind,
}

/// A fighter in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    archetype: Archetype,
    #[serde(with = "fixed_serde")]
    life: Fixed,
    #[serde(with = "fixed_serde")]
    magic: Fixed,
    speed: u32,
    #[serde(with = "fixed_serde")]
    attack: Fixed,
    agility: u32,
    luck: u32,
    position: i64,
    weapon: Weapon,
    hits_received: u32,
}

impl Combatant {
    /// Create a combatant of the given class at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::NegativePosition`] if `position < 0`.
    pub fn new(archetype: Archetype, position: i64, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if position < 0 {
            return Err(ArenaError::NegativePosition { name, position });
        }

        let profile = archetype.profile();
        Ok(Self {
            name,
            archetype,
            life: Fixed::from_num(profile.life),
            magic: Fixed::from_num(profile.magic),
            speed: profile.speed.max(1),
            attack: Fixed::from_num(profile.attack),
            agility: profile.agility,
            luck: profile.luck.min(100),
            position,
            weapon: profile.weapon.forge(),
            hits_received: 0,
        })
    }

    /// Plain fighter.
    pub fn base(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Base, position, name)
    }

    /// Warrior.
    pub fn warrior(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Warrior, position, name)
    }

    /// Archer.
    pub fn archer(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Archer, position, name)
    }

    /// Mage.
    pub fn mage(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Mage, position, name)
    }

    /// Dwarf.
    pub fn dwarf(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Dwarf, position, name)
    }

    /// Crossbowman.
    pub fn crossbowman(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Crossbowman, position, name)
    }

    /// Demiurge.
    pub fn demiurge(position: i64, name: impl Into<String>) -> Result<Self> {
        Self::new(Archetype::Demiurge, position, name)
    }

    /// Builder method to override current life (floored at zero).
    #[must_use]
    pub fn with_life(mut self, life: Fixed) -> Self {
        self.life = floor_at_zero(life);
        self
    }

    /// Builder method to override current magic (floored at zero).
    #[must_use]
    pub fn with_magic(mut self, magic: Fixed) -> Self {
        self.magic = floor_at_zero(magic);
        self
    }

    /// Builder method to swap the equipped weapon.
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = weapon;
        self
    }

    /// Builder method to preset the received-hit counter.
    #[must_use]
    pub fn with_hits_received(mut self, hits: u32) -> Self {
        self.hits_received = hits;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Class name for reports.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.archetype.description()
    }

    /// Current life.
    #[must_use]
    pub const fn life(&self) -> Fixed {
        self.life
    }

    /// Current magic.
    #[must_use]
    pub const fn magic(&self) -> Fixed {
        self.magic
    }

    /// Maximum step per turn.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Base attack.
    #[must_use]
    pub const fn attack(&self) -> Fixed {
        self.attack
    }

    /// Agility.
    #[must_use]
    pub const fn agility(&self) -> u32 {
        self.agility
    }

    /// Luck stat.
    #[must_use]
    pub const fn luck(&self) -> u32 {
        self.luck
    }

    /// Position on the line.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Equipped weapon.
    #[must_use]
    pub const fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    /// Number of attacks received so far (blocked and dodged included).
    #[must_use]
    pub const fn hits_received(&self) -> u32 {
        self.hits_received
    }

    /// Dead combatants never act again.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.life <= Fixed::ZERO
    }

    /// Opposite of [`Combatant::is_dead`].
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Distance to another combatant.
    #[must_use]
    pub fn distance_to(&self, other: &Combatant) -> u32 {
        u32::try_from(self.position.abs_diff(other.position)).unwrap_or(u32::MAX)
    }

    // ========================================================================
    // Damage pipeline
    // ========================================================================

    /// One luck roll using this combatant's luck stat.
    pub fn luck_roll(&self, luck: &mut dyn LuckSource) -> Fixed {
        luck.luck_roll(self.luck)
    }

    /// Damage this combatant would deal at `distance`.
    ///
    /// Zero when the target is out of weapon range or the weapon is broken.
    pub fn compute_outgoing_damage(&self, distance: u32, luck: &mut dyn LuckSource) -> Fixed {
        if distance > self.weapon.range {
            return Fixed::ZERO;
        }
        let weapon_damage = self.weapon.current_damage();
        if weapon_damage <= Fixed::ZERO {
            return Fixed::ZERO;
        }

        let distance = Fixed::from_num(distance);
        (self.archetype.outgoing())(self, distance, weapon_damage, luck)
    }

    /// Run an incoming attack through block, dodge and hit.
    pub fn resolve_incoming_attack(
        &mut self,
        raw_damage: Fixed,
        luck: &mut dyn LuckSource,
    ) -> IncomingOutcome {
        self.hits_received = self.hits_received.saturating_add(1);

        if self.luck_roll(luck) > self.block_threshold() {
            self.weapon.take_damage(raw_damage);
            return IncomingOutcome::Blocked;
        }

        if self.luck_roll(luck) > self.dodge_threshold() {
            return IncomingOutcome::Dodged;
        }

        IncomingOutcome::Hit(self.apply_damage(raw_damage, luck))
    }

    /// Apply landed damage through this class's absorb strategy.
    pub fn apply_damage(&mut self, damage: Fixed, luck: &mut dyn LuckSource) -> Absorbed {
        (self.archetype.absorb())(self, damage, luck)
    }

    /// `(100 - luck) / 100`
    fn block_threshold(&self) -> Fixed {
        (Fixed::from_num(100) - Fixed::from_num(self.luck)) / Fixed::from_num(100)
    }

    /// `(100 - agility - 3 * speed) / 100`; may be negative for very agile fighters.
    fn dodge_threshold(&self) -> Fixed {
        let evasion = Fixed::from_num(self.agility)
            + Fixed::from_num(self.speed) * Fixed::from_num(DODGE_PER_SPEED);
        (Fixed::from_num(100) - evasion) / Fixed::from_num(100)
    }

    /// Subtract life, flooring at zero. Returns the life actually removed.
    pub(crate) fn lose_life(&mut self, amount: Fixed) -> Fixed {
        let before = self.life;
        self.life = floor_at_zero(self.life - amount);
        before - self.life
    }

    pub(crate) fn set_magic(&mut self, magic: Fixed) {
        self.magic = floor_at_zero(magic);
    }

    // ========================================================================
    // Movement and equipment
    // ========================================================================

    /// Step at most `speed` toward `target_position`. Returns the new position.
    pub fn move_toward(&mut self, target_position: i64) -> i64 {
        let delta = target_position - self.position;
        let step = delta.abs().min(i64::from(self.speed));
        self.position += delta.signum() * step;
        self.position
    }

    /// Shift along the line (used when knocked back by a collision).
    pub(crate) fn displace(&mut self, by: i64) {
        self.position += by;
    }

    pub(crate) fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    /// Replace a broken weapon with its fallback.
    pub fn check_weapon(&mut self) -> Option<WeaponBreak> {
        if !self.weapon.is_broken() {
            return None;
        }
        let from = self.weapon.kind;
        let to = from.fallback();
        self.weapon = to.forge();
        Some(WeaponBreak { from, to })
    }
}
