//! Equipped weapons and durability wear.
//!
//! A [`Weapon`] is a catalog record plus mutable durability. Damage output
//! falls off in two steps as the weapon wears:
//!
//! - full `base_attack` while durability is at least 30% of its maximum
//! - half `base_attack` below that
//! - nothing once durability reaches zero (broken)

use serde::{Deserialize, Serialize};

use crate::catalog::WeaponKind;
use crate::math::{fixed_serde, floor_at_zero, percent, Fixed};

/// Durability below this percentage of the maximum halves damage.
pub const WORN_THRESHOLD_PERCENT: i64 = 30;

/// Remaining durability of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Durability {
    /// Never degrades (bare hands).
    Unbreakable,
    /// Wears down from `max` towards zero.
    Finite {
        /// Current durability, always in `[0, max]`.
        #[serde(with = "fixed_serde")]
        current: Fixed,
        /// Durability when freshly equipped.
        #[serde(with = "fixed_serde")]
        max: Fixed,
    },
}

impl Durability {
    /// Full durability for the given maximum (`None` = unbreakable).
    #[must_use]
    pub fn full(max: Option<u32>) -> Self {
        match max {
            Some(max) => Durability::Finite {
                current: Fixed::from_num(max),
                max: Fixed::from_num(max),
            },
            None => Durability::Unbreakable,
        }
    }

    /// Current durability, or `None` when unbreakable.
    #[must_use]
    pub fn current(&self) -> Option<Fixed> {
        match self {
            Durability::Unbreakable => None,
            Durability::Finite { current, .. } => Some(*current),
        }
    }
}

/// A weapon held by a combatant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    /// Catalog identity.
    pub kind: WeaponKind,
    /// Attack added to the wielder's own attack.
    #[serde(with = "fixed_serde")]
    pub base_attack: Fixed,
    /// Remaining durability.
    pub durability: Durability,
    /// Maximum attack distance (at least 1).
    pub range: u32,
}

impl Weapon {
    /// Create a weapon of the given kind at full durability.
    #[must_use]
    pub fn new(kind: WeaponKind) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            base_attack: Fixed::from_num(spec.base_attack),
            durability: Durability::full(spec.durability),
            range: spec.range.max(1),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Wear the weapon down by `amount`, flooring durability at zero.
    pub fn take_damage(&mut self, amount: Fixed) {
        if let Durability::Finite { current, .. } = &mut self.durability {
            *current = floor_at_zero(*current - amount);
        }
    }

    /// Attack contributed by the weapon at its current durability.
    #[must_use]
    pub fn current_damage(&self) -> Fixed {
        match self.durability {
            Durability::Unbreakable => self.base_attack,
            Durability::Finite { current, max } => {
                if current <= Fixed::ZERO {
                    Fixed::ZERO
                } else if current >= max * percent(WORN_THRESHOLD_PERCENT) {
                    self.base_attack
                } else {
                    self.base_attack / Fixed::from_num(2)
                }
            }
        }
    }

    /// Whether durability has run out.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        match self.durability {
            Durability::Unbreakable => false,
            Durability::Finite { current, .. } => current <= Fixed::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_sword_full_damage() {
        let sword = Weapon::new(WeaponKind::Sword);
        assert_eq!(sword.current_damage(), Fixed::from_num(25));
        assert!(!sword.is_broken());
        assert_eq!(sword.range, 1);
    }

    #[test]
    fn test_worn_weapon_halves_damage() {
        let mut sword = Weapon::new(WeaponKind::Sword);
        // 500 * 30% = 150; exactly at the threshold still counts as full
        sword.take_damage(Fixed::from_num(350));
        assert_eq!(sword.current_damage(), Fixed::from_num(25));

        sword.take_damage(Fixed::from_num(1));
        assert_eq!(sword.current_damage(), Fixed::from_num(12.5));
    }

    #[test]
    fn test_broken_weapon_deals_nothing() {
        let mut bow = Weapon::new(WeaponKind::Bow);
        bow.take_damage(Fixed::from_num(10_000));
        assert!(bow.is_broken());
        assert_eq!(bow.current_damage(), Fixed::ZERO);
        assert_eq!(bow.durability.current(), Some(Fixed::ZERO));
    }

    #[test]
    fn test_bare_hands_never_degrade() {
        let mut hands = Weapon::new(WeaponKind::BareHands);
        hands.take_damage(Fixed::from_num(1_000_000));
        assert!(!hands.is_broken());
        assert_eq!(hands.durability, Durability::Unbreakable);
        assert_eq!(hands.current_damage(), Fixed::ONE);
    }

    #[test]
    fn test_damage_monotonic_under_wear() {
        let mut staff = Weapon::new(WeaponKind::Staff);
        let mut previous = staff.current_damage();
        for _ in 0..40 {
            staff.take_damage(Fixed::from_num(10));
            let now = staff.current_damage();
            assert!(now <= previous);
            previous = now;
        }
        assert_eq!(previous, Fixed::ZERO);
    }
}
