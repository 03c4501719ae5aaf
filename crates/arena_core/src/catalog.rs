//! Fixed weapon catalog and the breakage fallback chain.
//!
//! Every weapon in the arena is one of a closed set of [`WeaponKind`]s. Each
//! kind maps to a static [`WeaponSpec`] record; upgraded weapons are written
//! as their base record with a few fields overridden. When an equipped
//! weapon breaks, [`WeaponKind::fallback`] names its replacement:
//!
//! ```text
//! Sword, Axe, Bow, Long Bow, Staff, Storm Staff -> Knife -> Bare Hands
//! ```
//!
//! Bare hands never break, so the chain always terminates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::weapon::Weapon;

/// Static stat record for a weapon kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSpec {
    /// Display name.
    pub name: &'static str,
    /// Attack added to the wielder's own attack.
    pub base_attack: u32,
    /// Starting durability. `None` means the weapon never degrades.
    pub durability: Option<u32>,
    /// Maximum attack distance.
    pub range: u32,
}

/// Bare hands: the last resort, never breaks.
pub const BARE_HANDS: WeaponSpec = WeaponSpec {
    name: "Bare Hands",
    base_attack: 1,
    durability: None,
    range: 1,
};

/// Light weapon every heavier weapon degrades into.
pub const KNIFE: WeaponSpec = WeaponSpec {
    name: "Knife",
    base_attack: 5,
    durability: Some(300),
    range: 1,
};

/// Standard melee weapon.
pub const SWORD: WeaponSpec = WeaponSpec {
    name: "Sword",
    base_attack: 25,
    durability: Some(500),
    range: 1,
};

/// Heavier sword variant; keeps the sword's reach.
pub const AXE: WeaponSpec = WeaponSpec {
    name: "Axe",
    base_attack: 27,
    durability: Some(800),
    ..SWORD
};

/// Standard ranged weapon.
pub const BOW: WeaponSpec = WeaponSpec {
    name: "Bow",
    base_attack: 10,
    durability: Some(200),
    range: 3,
};

/// Longer-reaching bow; keeps the bow's durability.
pub const LONG_BOW: WeaponSpec = WeaponSpec {
    name: "Long Bow",
    base_attack: 15,
    range: 4,
    ..BOW
};

/// Standard caster weapon.
pub const STAFF: WeaponSpec = WeaponSpec {
    name: "Staff",
    base_attack: 8,
    durability: Some(300),
    range: 2,
};

/// Upgraded staff; keeps the staff's durability.
pub const STORM_STAFF: WeaponSpec = WeaponSpec {
    name: "Storm Staff",
    base_attack: 10,
    range: 3,
    ..STAFF
};

/// Identifier of a weapon in the catalog.
///
/// Fallback lookups are keyed on this identifier, never on the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Unarmed.
    BareHands,
    /// Knife.
    Knife,
    /// Sword.
    Sword,
    /// Axe (upgraded sword).
    Axe,
    /// Bow.
    Bow,
    /// Long bow (upgraded bow).
    LongBow,
    /// Staff.
    Staff,
    /// Storm staff (upgraded staff).
    StormStaff,
}

impl WeaponKind {
    /// Every weapon kind in catalog order.
    pub const ALL: [WeaponKind; 8] = [
        WeaponKind::BareHands,
        WeaponKind::Knife,
        WeaponKind::Sword,
        WeaponKind::Axe,
        WeaponKind::Bow,
        WeaponKind::LongBow,
        WeaponKind::Staff,
        WeaponKind::StormStaff,
    ];

    /// Static stat record for this kind.
    #[must_use]
    pub const fn spec(self) -> &'static WeaponSpec {
        match self {
            WeaponKind::BareHands => &BARE_HANDS,
            WeaponKind::Knife => &KNIFE,
            WeaponKind::Sword => &SWORD,
            WeaponKind::Axe => &AXE,
            WeaponKind::Bow => &BOW,
            WeaponKind::LongBow => &LONG_BOW,
            WeaponKind::Staff => &STAFF,
            WeaponKind::StormStaff => &STORM_STAFF,
        }
    }

    /// Display name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.spec().name
    }

    /// Identifier used in data files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            WeaponKind::BareHands => "bare_hands",
            WeaponKind::Knife => "knife",
            WeaponKind::Sword => "sword",
            WeaponKind::Axe => "axe",
            WeaponKind::Bow => "bow",
            WeaponKind::LongBow => "long_bow",
            WeaponKind::Staff => "staff",
            WeaponKind::StormStaff => "storm_staff",
        }
    }

    /// The weapon issued when a weapon of this kind breaks.
    #[must_use]
    pub const fn fallback(self) -> WeaponKind {
        match self {
            WeaponKind::Sword
            | WeaponKind::Axe
            | WeaponKind::Bow
            | WeaponKind::LongBow
            | WeaponKind::Staff
            | WeaponKind::StormStaff => WeaponKind::Knife,
            WeaponKind::Knife => WeaponKind::BareHands,
            WeaponKind::BareHands => WeaponKind::BareHands,
        }
    }

    /// Create a fresh weapon of this kind at full durability.
    #[must_use]
    pub fn forge(self) -> Weapon {
        Weapon::new(self)
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeaponKind {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ArenaError::UnknownWeapon(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrades_inherit_base_fields() {
        assert_eq!(AXE.range, SWORD.range);
        assert_eq!(LONG_BOW.durability, BOW.durability);
        assert_eq!(STORM_STAFF.durability, STAFF.durability);
        assert_eq!(AXE.durability, Some(800));
        assert_eq!(LONG_BOW.range, 4);
        assert_eq!(STORM_STAFF.range, 3);
    }

    #[test]
    fn test_fallback_chain_terminates_at_bare_hands() {
        for kind in WeaponKind::ALL {
            let mut current = kind;
            let mut steps = 0;
            while current != WeaponKind::BareHands {
                current = current.fallback();
                steps += 1;
                assert!(steps <= 2, "{kind} does not reach bare hands");
            }
        }
        assert_eq!(WeaponKind::BareHands.fallback(), WeaponKind::BareHands);
    }

    #[test]
    fn test_heavy_weapons_fall_back_to_knife() {
        for kind in [
            WeaponKind::Sword,
            WeaponKind::Axe,
            WeaponKind::Bow,
            WeaponKind::LongBow,
            WeaponKind::Staff,
            WeaponKind::StormStaff,
        ] {
            assert_eq!(kind.fallback(), WeaponKind::Knife);
        }
        assert_eq!(WeaponKind::Knife.fallback(), WeaponKind::BareHands);
    }

    #[test]
    fn test_parse_ids() {
        for kind in WeaponKind::ALL {
            assert_eq!(kind.id().parse::<WeaponKind>().unwrap(), kind);
        }
        assert!(matches!(
            "trident".parse::<WeaponKind>(),
            Err(ArenaError::UnknownWeapon(_))
        ));
    }

    #[test]
    fn test_only_bare_hands_is_unbreakable() {
        for kind in WeaponKind::ALL {
            assert_eq!(
                kind.spec().durability.is_none(),
                kind == WeaponKind::BareHands
            );
        }
    }
}
