//! The closed set of combatant classes.
//!
//! Each [`Archetype`] carries a static [`ClassProfile`] (starting stats and
//! weapon) and two strategy functions:
//!
//! - an [`OutgoingStrategy`] that turns attack, weapon damage and a luck
//!   roll into outgoing damage
//! - an [`AbsorbStrategy`] that applies a landed hit to life and magic
//!
//! Upgraded classes reuse their parent's profile through struct update and
//! wrap the parent's strategy instead of replacing it, e.g. the Dwarf halves
//! every sixth hit and then hands the result to the Warrior's magic shield.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::WeaponKind;
use crate::combatant::Combatant;
use crate::error::ArenaError;
use crate::luck::LuckSource;
use crate::math::{floor_at_zero, percent, Fixed};

/// Life below which the Warrior shield can trigger.
pub const SHIELD_LIFE_THRESHOLD: i64 = 60;
/// A Warrior shield roll must beat this percentage.
pub const SHIELD_ROLL_PERCENT: i64 = 80;
/// Mages ward while magic is above this value.
pub const WARD_MAGIC_THRESHOLD: i64 = 50;
/// Flat magic cost of a Mage ward, regardless of the damage halved.
pub const WARD_MAGIC_COST: i64 = 12;
/// Dwarves shrug off every n-th hit received.
pub const STOUT_HIT_INTERVAL: u32 = 6;
/// A Dwarf shrug roll must beat this percentage.
pub const STOUT_ROLL_PERCENT: i64 = 50;
/// A Demiurge empower roll must beat this percentage.
pub const EMPOWER_ROLL_PERCENT: i64 = 60;

/// Starting stats and equipment of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProfile {
    /// Human-readable class name used by reporters.
    pub description: &'static str,
    /// Starting life.
    pub life: u32,
    /// Starting magic.
    pub magic: u32,
    /// Maximum step per turn.
    pub speed: u32,
    /// Base attack.
    pub attack: u32,
    /// Dodge bonus.
    pub agility: u32,
    /// Luck stat added to every roll (0-100).
    pub luck: u32,
    /// Weapon equipped at creation.
    pub weapon: WeaponKind,
}

/// Plain fighter with bare hands.
pub const BASE: ClassProfile = ClassProfile {
    description: "Player",
    life: 100,
    magic: 20,
    speed: 1,
    attack: 10,
    agility: 5,
    luck: 10,
    weapon: WeaponKind::BareHands,
};

/// Sword fighter with a magic shield when wounded.
pub const WARRIOR: ClassProfile = ClassProfile {
    description: "Warrior",
    life: 120,
    speed: 2,
    attack: 10,
    weapon: WeaponKind::Sword,
    ..BASE
};

/// Bow fighter that hits harder from further away.
pub const ARCHER: ClassProfile = ClassProfile {
    description: "Archer",
    life: 80,
    magic: 35,
    attack: 5,
    agility: 10,
    weapon: WeaponKind::Bow,
    ..BASE
};

/// Staff caster that wards off half of every hit while magic lasts.
pub const MAGE: ClassProfile = ClassProfile {
    description: "Mage",
    life: 70,
    magic: 100,
    attack: 5,
    agility: 8,
    weapon: WeaponKind::Staff,
    ..BASE
};

/// Upgraded Warrior.
pub const DWARF: ClassProfile = ClassProfile {
    description: "Dwarf",
    life: 130,
    attack: 15,
    luck: 20,
    weapon: WeaponKind::Axe,
    ..WARRIOR
};

/// Upgraded Archer.
pub const CROSSBOWMAN: ClassProfile = ClassProfile {
    description: "Crossbowman",
    life: 85,
    attack: 8,
    agility: 20,
    luck: 15,
    weapon: WeaponKind::LongBow,
    ..ARCHER
};

/// Upgraded Mage.
pub const DEMIURGE: ClassProfile = ClassProfile {
    description: "Demiurge",
    life: 80,
    magic: 120,
    attack: 6,
    luck: 12,
    weapon: WeaponKind::StormStaff,
    ..MAGE
};

/// Computes outgoing damage.
///
/// Arguments: attacker, effective distance (at least 1), current weapon
/// damage (positive), luck source. Range and broken-weapon gating happen
/// before the strategy is called.
pub type OutgoingStrategy = fn(&Combatant, Fixed, Fixed, &mut dyn LuckSource) -> Fixed;

/// Applies a landed hit to the defender.
pub type AbsorbStrategy = fn(&mut Combatant, Fixed, &mut dyn LuckSource) -> Absorbed;

/// What a landed hit actually cost the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Absorbed {
    /// Life removed.
    pub life_lost: Fixed,
    /// Magic spent shielding.
    pub magic_spent: Fixed,
}

/// Combatant class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Plain fighter.
    Base,
    /// Sword fighter.
    Warrior,
    /// Bow fighter.
    Archer,
    /// Staff caster.
    Mage,
    /// Upgraded Warrior.
    Dwarf,
    /// Upgraded Archer.
    Crossbowman,
    /// Upgraded Mage.
    Demiurge,
}

impl Archetype {
    /// Every archetype in table order.
    pub const ALL: [Archetype; 7] = [
        Archetype::Base,
        Archetype::Warrior,
        Archetype::Archer,
        Archetype::Mage,
        Archetype::Dwarf,
        Archetype::Crossbowman,
        Archetype::Demiurge,
    ];

    /// Starting stats of this class.
    #[must_use]
    pub const fn profile(self) -> &'static ClassProfile {
        match self {
            Archetype::Base => &BASE,
            Archetype::Warrior => &WARRIOR,
            Archetype::Archer => &ARCHER,
            Archetype::Mage => &MAGE,
            Archetype::Dwarf => &DWARF,
            Archetype::Crossbowman => &CROSSBOWMAN,
            Archetype::Demiurge => &DEMIURGE,
        }
    }

    /// The class this one upgrades, if any.
    #[must_use]
    pub const fn parent(self) -> Option<Archetype> {
        match self {
            Archetype::Base => None,
            Archetype::Warrior | Archetype::Archer | Archetype::Mage => Some(Archetype::Base),
            Archetype::Dwarf => Some(Archetype::Warrior),
            Archetype::Crossbowman => Some(Archetype::Archer),
            Archetype::Demiurge => Some(Archetype::Mage),
        }
    }

    /// Identifier used in data files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Archetype::Base => "base",
            Archetype::Warrior => "warrior",
            Archetype::Archer => "archer",
            Archetype::Mage => "mage",
            Archetype::Dwarf => "dwarf",
            Archetype::Crossbowman => "crossbowman",
            Archetype::Demiurge => "demiurge",
        }
    }

    /// Human-readable class name.
    #[must_use]
    pub const fn description(self) -> &'static str {
        self.profile().description
    }

    /// Outgoing damage formula for this class.
    #[must_use]
    pub fn outgoing(self) -> OutgoingStrategy {
        match self {
            Archetype::Base | Archetype::Warrior | Archetype::Mage | Archetype::Dwarf => {
                standard_damage
            }
            Archetype::Archer | Archetype::Crossbowman => ranged_damage,
            Archetype::Demiurge => empowered_damage,
        }
    }

    /// Incoming damage handling for this class.
    #[must_use]
    pub fn absorb(self) -> AbsorbStrategy {
        match self {
            Archetype::Base | Archetype::Archer | Archetype::Crossbowman => plain_absorb,
            Archetype::Warrior => magic_shield,
            Archetype::Mage | Archetype::Demiurge => arcane_ward,
            Archetype::Dwarf => stout_shield,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for Archetype {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Archetype::ALL
            .into_iter()
            .find(|archetype| archetype.id() == wanted)
            .ok_or_else(|| ArenaError::UnknownArchetype(s.to_string()))
    }
}

// ============================================================================
// Outgoing strategies
// ============================================================================

/// `(attack + weapon) * roll / distance`, a collision counting as distance 1.
fn standard_damage(
    attacker: &Combatant,
    distance: Fixed,
    weapon_damage: Fixed,
    luck: &mut dyn LuckSource,
) -> Fixed {
    let distance = distance.max(Fixed::ONE);
    (attacker.attack() + weapon_damage) * attacker.luck_roll(luck) / distance
}

/// `(attack + weapon) * roll * distance / range`, nothing at point blank.
fn ranged_damage(
    attacker: &Combatant,
    distance: Fixed,
    weapon_damage: Fixed,
    luck: &mut dyn LuckSource,
) -> Fixed {
    let range = Fixed::from_num(attacker.weapon().range);
    (attacker.attack() + weapon_damage) * attacker.luck_roll(luck) * distance / range
}

/// Standard damage, boosted by half again on a good roll while magic remains.
fn empowered_damage(
    attacker: &Combatant,
    distance: Fixed,
    weapon_damage: Fixed,
    luck: &mut dyn LuckSource,
) -> Fixed {
    let damage = standard_damage(attacker, distance, weapon_damage, luck);
    if attacker.magic() > Fixed::ZERO
        && attacker.luck_roll(luck) > percent(EMPOWER_ROLL_PERCENT)
    {
        damage * Fixed::from_num(3) / Fixed::from_num(2)
    } else {
        damage
    }
}

// ============================================================================
// Absorb strategies
// ============================================================================

/// All damage goes to life.
fn plain_absorb(defender: &mut Combatant, damage: Fixed, _luck: &mut dyn LuckSource) -> Absorbed {
    Absorbed {
        life_lost: defender.lose_life(damage),
        magic_spent: Fixed::ZERO,
    }
}

/// Wounded Warriors may soak damage with magic; overflow still hits life.
fn magic_shield(defender: &mut Combatant, damage: Fixed, luck: &mut dyn LuckSource) -> Absorbed {
    let shielded = defender.life() < Fixed::from_num(SHIELD_LIFE_THRESHOLD)
        && defender.luck_roll(luck) > percent(SHIELD_ROLL_PERCENT)
        && defender.magic() > Fixed::ZERO;
    if !shielded {
        return plain_absorb(defender, damage, luck);
    }

    let magic = defender.magic();
    if damage > magic {
        defender.set_magic(Fixed::ZERO);
        Absorbed {
            life_lost: defender.lose_life(damage - magic),
            magic_spent: magic,
        }
    } else {
        defender.set_magic(magic - damage);
        Absorbed {
            life_lost: Fixed::ZERO,
            magic_spent: damage,
        }
    }
}

/// While magic is high, halve the hit and pay a flat magic cost.
fn arcane_ward(defender: &mut Combatant, damage: Fixed, luck: &mut dyn LuckSource) -> Absorbed {
    if defender.magic() <= Fixed::from_num(WARD_MAGIC_THRESHOLD) {
        return plain_absorb(defender, damage, luck);
    }

    let before = defender.magic();
    defender.set_magic(floor_at_zero(before - Fixed::from_num(WARD_MAGIC_COST)));
    Absorbed {
        life_lost: defender.lose_life(damage / Fixed::from_num(2)),
        magic_spent: before - defender.magic(),
    }
}

/// Every sixth hit may be halved before the Warrior shield sees it.
fn stout_shield(defender: &mut Combatant, damage: Fixed, luck: &mut dyn LuckSource) -> Absorbed {
    let shrugged = defender.hits_received() % STOUT_HIT_INTERVAL == 0
        && defender.luck_roll(luck) > percent(STOUT_ROLL_PERCENT);
    let damage = if shrugged {
        damage / Fixed::from_num(2)
    } else {
        damage
    };
    magic_shield(defender, damage, luck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luck::FixedLuck;

    fn roll(value: f64) -> FixedLuck {
        FixedLuck::new(Fixed::from_num(value))
    }

    #[test]
    fn test_profiles_match_class_table() {
        let table = [
            (Archetype::Base, 100, 20, 1, 10, 5, 10, WeaponKind::BareHands),
            (Archetype::Warrior, 120, 20, 2, 10, 5, 10, WeaponKind::Sword),
            (Archetype::Archer, 80, 35, 1, 5, 10, 10, WeaponKind::Bow),
            (Archetype::Mage, 70, 100, 1, 5, 8, 10, WeaponKind::Staff),
            (Archetype::Dwarf, 130, 20, 2, 15, 5, 20, WeaponKind::Axe),
            (Archetype::Crossbowman, 85, 35, 1, 8, 20, 15, WeaponKind::LongBow),
            (Archetype::Demiurge, 80, 120, 1, 6, 8, 12, WeaponKind::StormStaff),
        ];
        for (archetype, life, magic, speed, attack, agility, luck, weapon) in table {
            let p = archetype.profile();
            assert_eq!(
                (p.life, p.magic, p.speed, p.attack, p.agility, p.luck, p.weapon),
                (life, magic, speed, attack, agility, luck, weapon),
                "{archetype:?}"
            );
        }
    }

    #[test]
    fn test_parents() {
        assert_eq!(Archetype::Dwarf.parent(), Some(Archetype::Warrior));
        assert_eq!(Archetype::Crossbowman.parent(), Some(Archetype::Archer));
        assert_eq!(Archetype::Demiurge.parent(), Some(Archetype::Mage));
        assert_eq!(Archetype::Base.parent(), None);
    }

    #[test]
    fn test_parse_archetype() {
        assert_eq!("Dwarf".parse::<Archetype>().unwrap(), Archetype::Dwarf);
        assert_eq!("crossbowman".parse::<Archetype>().unwrap(), Archetype::Crossbowman);
        assert!(matches!(
            "paladin".parse::<Archetype>(),
            Err(ArenaError::UnknownArchetype(_))
        ));
    }

    #[test]
    fn test_mage_ward_halves_and_costs_flat_magic() {
        let mut mage = Combatant::mage(0, "Merlin").unwrap();
        let absorbed = mage.apply_damage(Fixed::from_num(30), &mut roll(0.0));
        assert_eq!(absorbed.life_lost, Fixed::from_num(15));
        assert_eq!(absorbed.magic_spent, Fixed::from_num(12));
        assert_eq!(mage.life(), Fixed::from_num(55));
        assert_eq!(mage.magic(), Fixed::from_num(88));
    }

    #[test]
    fn test_mage_without_magic_takes_full_damage() {
        let mut mage = Combatant::mage(0, "Merlin")
            .unwrap()
            .with_magic(Fixed::from_num(50));
        mage.apply_damage(Fixed::from_num(30), &mut roll(0.0));
        assert_eq!(mage.life(), Fixed::from_num(40));
        assert_eq!(mage.magic(), Fixed::from_num(50));
    }

    #[test]
    fn test_warrior_shield_needs_low_life() {
        let mut warrior = Combatant::warrior(0, "Conan").unwrap();
        warrior.apply_damage(Fixed::from_num(10), &mut roll(1.0));
        assert_eq!(warrior.life(), Fixed::from_num(110));
        assert_eq!(warrior.magic(), Fixed::from_num(20));
    }

    #[test]
    fn test_warrior_shield_soaks_with_magic() {
        let mut warrior = Combatant::warrior(0, "Conan")
            .unwrap()
            .with_life(Fixed::from_num(50));
        let absorbed = warrior.apply_damage(Fixed::from_num(15), &mut roll(0.9));
        assert_eq!(absorbed.life_lost, Fixed::ZERO);
        assert_eq!(warrior.life(), Fixed::from_num(50));
        assert_eq!(warrior.magic(), Fixed::from_num(5));
    }

    #[test]
    fn test_warrior_shield_overflow_hits_life() {
        let mut warrior = Combatant::warrior(0, "Conan")
            .unwrap()
            .with_life(Fixed::from_num(50));
        let absorbed = warrior.apply_damage(Fixed::from_num(30), &mut roll(0.9));
        assert_eq!(absorbed.magic_spent, Fixed::from_num(20));
        assert_eq!(absorbed.life_lost, Fixed::from_num(10));
        assert_eq!(warrior.magic(), Fixed::ZERO);
        assert_eq!(warrior.life(), Fixed::from_num(40));
    }

    #[test]
    fn test_warrior_shield_fails_on_low_roll() {
        let mut warrior = Combatant::warrior(0, "Conan")
            .unwrap()
            .with_life(Fixed::from_num(50));
        warrior.apply_damage(Fixed::from_num(15), &mut roll(0.8));
        assert_eq!(warrior.life(), Fixed::from_num(35));
        assert_eq!(warrior.magic(), Fixed::from_num(20));
    }

    #[test]
    fn test_dwarf_halves_sixth_hit_before_shield() {
        let mut dwarf = Combatant::dwarf(0, "Gimli")
            .unwrap()
            .with_life(Fixed::from_num(50))
            .with_hits_received(6);
        // Halved to 20, then the shield soaks all 20 magic
        let absorbed = dwarf.apply_damage(Fixed::from_num(40), &mut roll(0.9));
        assert_eq!(absorbed.magic_spent, Fixed::from_num(20));
        assert_eq!(absorbed.life_lost, Fixed::ZERO);
        assert_eq!(dwarf.life(), Fixed::from_num(50));
    }

    #[test]
    fn test_dwarf_other_hits_not_halved() {
        let mut dwarf = Combatant::dwarf(0, "Gimli").unwrap().with_hits_received(5);
        dwarf.apply_damage(Fixed::from_num(40), &mut roll(0.9));
        assert_eq!(dwarf.life(), Fixed::from_num(90));
    }

    #[test]
    fn test_archer_damage_grows_with_distance() {
        let archer = Combatant::archer(0, "Robin").unwrap();
        let mut luck = roll(1.0);
        // (5 + 10) * 1.0 * d / 3
        assert_eq!(archer.compute_outgoing_damage(3, &mut luck), Fixed::from_num(15));
        assert_eq!(archer.compute_outgoing_damage(1, &mut luck), Fixed::from_num(5));
        assert_eq!(archer.compute_outgoing_damage(4, &mut luck), Fixed::ZERO);
    }

    #[test]
    fn test_archer_point_blank_deals_nothing() {
        let archer = Combatant::archer(0, "Robin").unwrap();
        assert_eq!(archer.compute_outgoing_damage(0, &mut roll(1.0)), Fixed::ZERO);

        let crossbowman = Combatant::crossbowman(0, "Bolt").unwrap();
        assert_eq!(crossbowman.compute_outgoing_damage(0, &mut roll(1.0)), Fixed::ZERO);
    }

    #[test]
    fn test_standard_collision_counts_as_adjacent() {
        let warrior = Combatant::warrior(0, "Conan").unwrap();
        // (10 + 25) * 1.0 / 1
        assert_eq!(warrior.compute_outgoing_damage(0, &mut roll(1.0)), Fixed::from_num(35));
        assert_eq!(warrior.compute_outgoing_damage(1, &mut roll(1.0)), Fixed::from_num(35));
    }

    #[test]
    fn test_demiurge_empowered_on_good_roll() {
        let demiurge = Combatant::demiurge(0, "Prospero").unwrap();
        // (6 + 10) * 1.0 / 2 = 8, then * 1.5
        let damage = demiurge.compute_outgoing_damage(2, &mut roll(1.0));
        assert_eq!(damage, Fixed::from_num(12));

        // Roll 0.5 fails the empower check: (6 + 10) * 0.5 / 2 = 4
        let damage = demiurge.compute_outgoing_damage(2, &mut roll(0.5));
        assert_eq!(damage, Fixed::from_num(4));
    }

    #[test]
    fn test_demiurge_without_magic_not_empowered() {
        let demiurge = Combatant::demiurge(0, "Prospero")
            .unwrap()
            .with_magic(Fixed::ZERO);
        let damage = demiurge.compute_outgoing_damage(2, &mut roll(1.0));
        assert_eq!(damage, Fixed::from_num(8));
    }
}
