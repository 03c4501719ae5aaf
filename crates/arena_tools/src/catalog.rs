//! Weapon and class table dump.

use std::fmt::Write as _;

use arena_core::archetype::Archetype;
use arena_core::catalog::WeaponKind;
use serde::Serialize;

/// One row of the weapon table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponRow {
    /// Data-file identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Attack bonus.
    pub attack: u32,
    /// Starting durability (`None` = unbreakable).
    pub durability: Option<u32>,
    /// Reach.
    pub range: u32,
    /// Replacement once broken (`None` = never breaks).
    pub breaks_into: Option<&'static str>,
}

/// One row of the class table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRow {
    /// Data-file identifier.
    pub id: &'static str,
    /// Display name.
    pub description: &'static str,
    /// Parent class identifier.
    pub parent: Option<&'static str>,
    /// Starting life.
    pub life: u32,
    /// Starting magic.
    pub magic: u32,
    /// Speed.
    pub speed: u32,
    /// Attack.
    pub attack: u32,
    /// Agility.
    pub agility: u32,
    /// Luck.
    pub luck: u32,
    /// Starting weapon identifier.
    pub weapon: &'static str,
}

/// Both tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Weapons in catalog order.
    pub weapons: Vec<WeaponRow>,
    /// Classes in table order.
    pub classes: Vec<ClassRow>,
}

impl Catalog {
    /// Collect the built-in tables.
    #[must_use]
    pub fn collect() -> Self {
        let weapons = WeaponKind::ALL
            .into_iter()
            .map(|kind| {
                let spec = kind.spec();
                let fallback = kind.fallback();
                WeaponRow {
                    id: kind.id(),
                    name: spec.name,
                    attack: spec.base_attack,
                    durability: spec.durability,
                    range: spec.range,
                    breaks_into: (fallback != kind).then(|| fallback.id()),
                }
            })
            .collect();

        let classes = Archetype::ALL
            .into_iter()
            .map(|archetype| {
                let p = archetype.profile();
                ClassRow {
                    id: archetype.id(),
                    description: p.description,
                    parent: archetype.parent().map(Archetype::id),
                    life: p.life,
                    magic: p.magic,
                    speed: p.speed,
                    attack: p.attack,
                    agility: p.agility,
                    luck: p.luck,
                    weapon: p.weapon.id(),
                }
            })
            .collect();

        Self { weapons, classes }
    }

    /// Render as two aligned text tables.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:>6} {:>10} {:>5}  {}",
            "WEAPON", "NAME", "ATTACK", "DURABILITY", "RANGE", "BREAKS INTO"
        );
        for w in &self.weapons {
            let durability = w.durability.map_or_else(|| "inf".to_string(), |d| d.to_string());
            let _ = writeln!(
                out,
                "{:<12} {:<12} {:>6} {:>10} {:>5}  {}",
                w.id,
                w.name,
                w.attack,
                durability,
                w.range,
                w.breaks_into.unwrap_or("-")
            );
        }

        out.push('\n');
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:>5} {:>5} {:>5} {:>6} {:>7} {:>4}  {}",
            "CLASS", "PARENT", "LIFE", "MAGIC", "SPEED", "ATTACK", "AGILITY", "LUCK", "WEAPON"
        );
        for c in &self.classes {
            let _ = writeln!(
                out,
                "{:<12} {:<12} {:>5} {:>5} {:>5} {:>6} {:>7} {:>4}  {}",
                c.id,
                c.parent.unwrap_or("-"),
                c.life,
                c.magic,
                c.speed,
                c.attack,
                c.agility,
                c.luck,
                c.weapon
            );
        }
        out
    }

    /// Render as pretty RON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot happen for these types in
    /// practice.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
