//! Combat events emitted while resolving turns.
//!
//! The core never prints. Every observable step of a turn is appended to
//! the round's event list so an external reporter can render it.

use serde::{Deserialize, Serialize};

use crate::catalog::WeaponKind;
use crate::combatant::CombatantId;
use crate::math::{fixed_serde, Fixed};

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A combatant stepped along the line.
    Moved {
        /// Who moved.
        combatant: CombatantId,
        /// Position before the step.
        from: i64,
        /// Position after the step.
        to: i64,
    },
    /// An attack was attempted (the target was in range).
    Attacked {
        /// Attacker.
        attacker: CombatantId,
        /// Target.
        target: CombatantId,
        /// Weapon used.
        weapon: WeaponKind,
        /// Distance at the time of the attack.
        distance: u32,
        /// Damage sent to the target, after the collision bonus.
        #[serde(with = "fixed_serde")]
        damage: Fixed,
        /// Attacker and target shared a position.
        collision: bool,
    },
    /// The defender's weapon soaked the attack.
    Blocked {
        /// Defender.
        defender: CombatantId,
        /// Damage soaked by the weapon.
        #[serde(with = "fixed_serde")]
        damage: Fixed,
    },
    /// The defender avoided the attack.
    Dodged {
        /// Defender.
        defender: CombatantId,
    },
    /// The attack landed.
    Hit {
        /// Defender.
        defender: CombatantId,
        /// Life removed.
        #[serde(with = "fixed_serde")]
        life_lost: Fixed,
        /// Magic spent shielding.
        #[serde(with = "fixed_serde")]
        magic_spent: Fixed,
    },
    /// A weapon broke and was replaced.
    WeaponBroken {
        /// Owner of the weapon.
        combatant: CombatantId,
        /// Broken kind.
        from: WeaponKind,
        /// Replacement kind.
        to: WeaponKind,
    },
    /// A combatant's life reached zero.
    Died {
        /// Who died.
        combatant: CombatantId,
        /// Who landed the final blow.
        killer: CombatantId,
    },
}

impl CombatEvent {
    /// Whether this event records a death.
    #[must_use]
    pub fn is_death(&self) -> bool {
        matches!(self, CombatEvent::Died { .. })
    }
}
