//! Plain-text round log.
//!
//! The core only emits [`CombatEvent`]s; this module turns them into the
//! human-readable log printed by `arena_headless run`.

use std::fmt::Write as _;

use arena_core::combatant::{Combatant, CombatantId};
use arena_core::events::CombatEvent;
use arena_core::math::Fixed;
use arena_core::simulation::{MatchOutcome, MatchResult, RoundReport};

/// Header printed before every round.
#[must_use]
pub fn round_header(round: u32) -> String {
    format!("----- Round {round} -----")
}

/// `Warrior "Conan"`, or the raw ID if it is not in the roster.
fn label(roster: &[Combatant], id: CombatantId) -> String {
    match roster.get(id.index()) {
        Some(c) => format!("{} \"{}\"", c.description(), c.name()),
        None => format!("combatant {id}"),
    }
}

/// Render one event as a single line.
#[must_use]
pub fn render_event(roster: &[Combatant], event: &CombatEvent) -> String {
    match event {
        CombatEvent::Moved {
            combatant,
            from,
            to,
        } => format!("{} moves {from} -> {to}", label(roster, *combatant)),
        CombatEvent::Attacked {
            attacker,
            target,
            weapon,
            distance,
            damage,
            collision,
        } => {
            let mut line = format!(
                "{} attacks {} with {weapon} from {distance}: {damage} damage",
                label(roster, *attacker),
                label(roster, *target),
            );
            if *collision {
                line.push_str(" (collision, knocked back)");
            }
            line
        }
        CombatEvent::Blocked { defender, damage } => format!(
            "{} blocks; weapon absorbs {damage}",
            label(roster, *defender)
        ),
        CombatEvent::Dodged { defender } => format!("{} dodges", label(roster, *defender)),
        CombatEvent::Hit {
            defender,
            life_lost,
            magic_spent,
        } => {
            let mut line = format!("{} loses {life_lost} life", label(roster, *defender));
            if *magic_spent > Fixed::ZERO {
                let _ = write!(line, " and {magic_spent} magic");
            }
            line
        }
        CombatEvent::WeaponBroken {
            combatant,
            from,
            to,
        } => format!(
            "{}'s {from} breaks, falls back to {to}",
            label(roster, *combatant)
        ),
        CombatEvent::Died { combatant, killer } => format!(
            "{} is killed by {}",
            label(roster, *combatant),
            label(roster, *killer)
        ),
    }
}

/// Header plus one line per event.
#[must_use]
pub fn render_round(roster: &[Combatant], report: &RoundReport) -> String {
    let mut out = round_header(report.round);
    for event in &report.events {
        out.push('\n');
        out.push_str(&render_event(roster, event));
    }
    out
}

/// Final line of a match.
#[must_use]
pub fn render_outcome(result: &MatchResult) -> String {
    match result.outcome {
        MatchOutcome::Winner(_) => match result.winner() {
            Some(winner) => format!(
                "Winner: {} \"{}\" (life={})",
                winner.description(),
                winner.name(),
                winner.life()
            ),
            None => "Winner not in roster".to_string(),
        },
        MatchOutcome::Draw => "Everyone died. No survivors!".to_string(),
        MatchOutcome::Stalemate { rounds } => {
            let standing = result.roster.iter().filter(|c| c.is_alive()).count();
            format!("Stalemate after {rounds} rounds: {standing} combatants still standing")
        }
    }
}
