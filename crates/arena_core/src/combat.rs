//! Turn resolution: target selection, movement and attacks.
//!
//! A turn is the only place two combatants interact. The acting combatant
//! picks the weakest living opponent, steps toward it and, if the target is
//! within weapon range, attacks:
//!
//! 1. the attacker's weapon wears by `10 * luck_roll` whether or not the
//!    attack lands
//! 2. outgoing damage is computed for the current distance
//! 3. on a collision (same position) the target is knocked back one step
//!    and the damage is doubled
//! 4. the target resolves the attack (block, dodge or hit)
//! 5. the attacker swaps a broken weapon for its fallback

use tracing::debug;

use crate::combatant::{Combatant, CombatantId, IncomingOutcome};
use crate::events::CombatEvent;
use crate::luck::LuckSource;
use crate::math::Fixed;

/// Weapon wear per attack, multiplied by the attacker's luck roll.
pub const WEAR_PER_ATTACK: i64 = 10;

/// Collision damage multiplier.
pub const COLLISION_MULTIPLIER: i64 = 2;

/// Knock-back distance on a collision.
pub const COLLISION_KNOCKBACK: i64 = 1;

/// Pick the living opponent with the lowest life.
///
/// Ties go to the first candidate in roster order. Returns `None` when at
/// most one combatant is alive.
#[must_use]
pub fn select_target(roster: &[Combatant], actor: CombatantId) -> Option<CombatantId> {
    let living = roster.iter().filter(|c| c.is_alive()).count();
    if living <= 1 {
        return None;
    }

    let mut chosen: Option<(usize, Fixed)> = None;
    for (index, candidate) in roster.iter().enumerate() {
        if index == actor.index() || candidate.is_dead() {
            continue;
        }
        if chosen.map_or(true, |(_, life)| candidate.life() < life) {
            chosen = Some((index, candidate.life()));
        }
    }

    chosen.and_then(|(index, _)| u32::try_from(index).ok().map(CombatantId::new))
}

/// Attempt an attack from `attacker` on `target`.
///
/// Returns `false` without side effects when the target is out of range.
pub fn execute_attack(
    attacker_id: CombatantId,
    attacker: &mut Combatant,
    target_id: CombatantId,
    target: &mut Combatant,
    luck: &mut dyn LuckSource,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let distance = attacker.distance_to(target);
    if distance > attacker.weapon().range {
        return false;
    }

    let wear = Fixed::from_num(WEAR_PER_ATTACK) * attacker.luck_roll(luck);
    attacker.weapon_mut().take_damage(wear);

    let mut damage = attacker.compute_outgoing_damage(distance, luck);
    let collision = distance == 0;
    if collision {
        target.displace(COLLISION_KNOCKBACK);
        damage *= Fixed::from_num(COLLISION_MULTIPLIER);
    }

    debug!(
        attacker = %attacker.name(),
        target = %target.name(),
        weapon = %attacker.weapon().kind,
        distance,
        damage = %damage,
        collision,
        "attack"
    );
    events.push(CombatEvent::Attacked {
        attacker: attacker_id,
        target: target_id,
        weapon: attacker.weapon().kind,
        distance,
        damage,
        collision,
    });

    let was_alive = target.is_alive();
    match target.resolve_incoming_attack(damage, luck) {
        IncomingOutcome::Blocked => events.push(CombatEvent::Blocked {
            defender: target_id,
            damage,
        }),
        IncomingOutcome::Dodged => events.push(CombatEvent::Dodged {
            defender: target_id,
        }),
        IncomingOutcome::Hit(absorbed) => events.push(CombatEvent::Hit {
            defender: target_id,
            life_lost: absorbed.life_lost,
            magic_spent: absorbed.magic_spent,
        }),
    }

    if was_alive && target.is_dead() {
        debug!(victim = %target.name(), killer = %attacker.name(), "combatant died");
        events.push(CombatEvent::Died {
            combatant: target_id,
            killer: attacker_id,
        });
    }

    if let Some(change) = attacker.check_weapon() {
        debug!(
            combatant = %attacker.name(),
            from = %change.from,
            to = %change.to,
            "weapon broke"
        );
        events.push(CombatEvent::WeaponBroken {
            combatant: attacker_id,
            from: change.from,
            to: change.to,
        });
    }

    true
}

/// Play one turn for `actor`: choose a target, move, attack.
///
/// Dead actors and actors without a living opponent do nothing.
pub fn take_turn(
    roster: &mut [Combatant],
    actor: CombatantId,
    luck: &mut dyn LuckSource,
    events: &mut Vec<CombatEvent>,
) {
    let index = actor.index();
    match roster.get(index) {
        Some(combatant) if combatant.is_alive() => {}
        _ => return,
    }

    let Some(target) = select_target(roster, actor) else {
        return;
    };

    let (me, foe) = pair_mut(roster, index, target.index());
    let from = me.position();
    let to = me.move_toward(foe.position());
    if to != from {
        events.push(CombatEvent::Moved {
            combatant: actor,
            from,
            to,
        });
    }

    execute_attack(actor, me, target, foe, luck, events);
}

/// Borrow two distinct roster entries mutably.
fn pair_mut(roster: &mut [Combatant], a: usize, b: usize) -> (&mut Combatant, &mut Combatant) {
    debug_assert_ne!(a, b, "a combatant cannot target itself");
    if a < b {
        let (left, right) = roster.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = roster.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
