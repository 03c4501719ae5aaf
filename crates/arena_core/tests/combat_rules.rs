//! End-to-end combat rules with pinned luck.

use arena_core::combat::{execute_attack, take_turn};
use arena_core::prelude::*;
use arena_test_utils::fixtures::{fixed, fixed_f};
use arena_test_utils::luck::ScriptedLuck;

fn swordsman(position: i64, name: &str) -> Combatant {
    Combatant::base(position, name)
        .unwrap()
        .with_weapon(WeaponKind::Sword.forge())
}

fn id(index: u32) -> CombatantId {
    CombatantId::new(index)
}

#[test]
fn zero_roll_attack_lands_for_nothing() {
    let mut attacker = swordsman(0, "A");
    let mut defender = Combatant::base(1, "B").unwrap();
    let mut events = Vec::new();

    execute_attack(
        id(0),
        &mut attacker,
        id(1),
        &mut defender,
        &mut FixedLuck::worst(),
        &mut events,
    );

    assert!(events.iter().any(|e| matches!(e, CombatEvent::Hit { .. })));
    assert_eq!(defender.life(), fixed(100));
    assert_eq!(defender.hits_received(), 1);
}

#[test]
fn half_roll_attack_takes_outgoing_damage_from_life() {
    let mut attacker = swordsman(0, "A");
    let mut defender = Combatant::base(1, "B").unwrap();
    let mut events = Vec::new();

    execute_attack(
        id(0),
        &mut attacker,
        id(1),
        &mut defender,
        &mut FixedLuck::new(fixed_f(0.5)),
        &mut events,
    );

    // (10 + 25) * 0.5 / 1
    assert_eq!(defender.life(), fixed_f(82.5));
    assert_eq!(attacker.weapon().durability.current(), Some(fixed(495)));
    assert!(events.contains(&CombatEvent::Hit {
        defender: id(1),
        life_lost: fixed_f(17.5),
        magic_spent: Fixed::ZERO,
    }));
}

#[test]
fn block_sends_all_damage_to_defender_weapon() {
    let mut attacker = swordsman(0, "A");
    let mut defender = swordsman(1, "B");
    let mut events = Vec::new();

    execute_attack(
        id(0),
        &mut attacker,
        id(1),
        &mut defender,
        &mut FixedLuck::new(Fixed::ONE),
        &mut events,
    );

    assert_eq!(defender.life(), fixed(100));
    assert_eq!(defender.magic(), fixed(20));
    assert_eq!(defender.weapon().durability.current(), Some(fixed(465)));
    assert_eq!(attacker.weapon().durability.current(), Some(fixed(490)));
}

#[test]
fn dodge_sends_damage_nowhere() {
    let mut defender = swordsman(1, "B");
    // block roll 0.0 fails, dodge roll 1.0 succeeds
    let mut luck = ScriptedLuck::from_f64s(&[0.0, 1.0]);

    let outcome = defender.resolve_incoming_attack(fixed(50), &mut luck);

    assert_eq!(outcome, IncomingOutcome::Dodged);
    assert_eq!(defender.life(), fixed(100));
    assert_eq!(defender.weapon().durability.current(), Some(fixed(500)));
}

#[test]
fn collision_with_full_roll_doubles_and_pushes() {
    let mut roster = vec![
        Combatant::warrior(3, "A").unwrap(),
        Combatant::base(4, "B").unwrap(),
    ];
    let mut events = Vec::new();

    // Warrior steps onto B's square
    take_turn(&mut roster, id(0), &mut FixedLuck::new(Fixed::ONE), &mut events);

    assert_eq!(roster[0].position(), 4);
    assert_eq!(roster[1].position(), 5);
    assert!(events.contains(&CombatEvent::Attacked {
        attacker: id(0),
        target: id(1),
        weapon: WeaponKind::Sword,
        distance: 0,
        damage: fixed(70),
        collision: true,
    }));
}

#[test]
fn archer_out_of_range_does_nothing_but_move() {
    let mut roster = vec![
        Combatant::archer(0, "A").unwrap(),
        Combatant::base(10, "B").unwrap(),
    ];
    let mut events = Vec::new();

    take_turn(&mut roster, id(0), &mut FixedLuck::new(Fixed::ONE), &mut events);

    assert_eq!(
        events,
        vec![CombatEvent::Moved {
            combatant: id(0),
            from: 0,
            to: 1
        }]
    );
    assert_eq!(roster[0].weapon().durability.current(), Some(fixed(200)));
}

#[test]
fn archer_damage_grows_with_distance() {
    let archer = Combatant::archer(0, "A").unwrap();
    let near = archer.compute_outgoing_damage(1, &mut FixedLuck::new(Fixed::ONE));
    let far = archer.compute_outgoing_damage(3, &mut FixedLuck::new(Fixed::ONE));
    // (5 + 10) * 1 * d / 3
    assert_eq!(near, fixed(5));
    assert_eq!(far, fixed(15));
}

#[test]
fn archer_family_deals_nothing_at_point_blank() {
    for archer in [
        Combatant::archer(0, "A").unwrap(),
        Combatant::crossbowman(0, "C").unwrap(),
    ] {
        let damage = archer.compute_outgoing_damage(0, &mut FixedLuck::new(Fixed::ONE));
        assert_eq!(damage, Fixed::ZERO, "{} at distance 0", archer.name());
    }
}

#[test]
fn crossbowman_uses_archer_formula_with_long_bow() {
    let crossbowman = Combatant::crossbowman(0, "C").unwrap();
    let mut luck = FixedLuck::new(Fixed::ONE);
    // (8 + 15) * 1 * d / 4
    assert_eq!(crossbowman.compute_outgoing_damage(4, &mut luck), fixed(23));
    assert_eq!(crossbowman.compute_outgoing_damage(2, &mut luck), fixed_f(11.5));
    assert_eq!(crossbowman.compute_outgoing_damage(5, &mut luck), Fixed::ZERO);
}

#[test]
fn dwarf_halves_only_every_sixth_incoming_attack() {
    let mut dwarf = Combatant::dwarf(0, "G").unwrap();
    // 0.75: no block (> 0.8), no dodge (> 0.89), shrug roll passes (> 0.5)
    let mut luck = FixedLuck::new(fixed_f(0.75));

    let mut halved = Vec::new();
    for hit in 1..=6 {
        match dwarf.resolve_incoming_attack(fixed(10), &mut luck) {
            IncomingOutcome::Hit(absorbed) if absorbed.life_lost == fixed(5) => halved.push(hit),
            IncomingOutcome::Hit(_) => {}
            other => panic!("expected a landed hit, got {other:?}"),
        }
    }

    assert_eq!(halved, vec![6]);
    assert_eq!(dwarf.hits_received(), 6);
    assert_eq!(dwarf.life(), fixed(75));
}

#[test]
fn demiurge_empower_needs_second_roll() {
    let demiurge = Combatant::demiurge(0, "D").unwrap();
    // (6 + 10) * 1 / 1 = 16, second roll 0.75 beats 0.6 -> 24
    let mut boosted = ScriptedLuck::from_f64s(&[1.0, 0.75]);
    assert_eq!(demiurge.compute_outgoing_damage(1, &mut boosted), fixed(24));
    assert_eq!(boosted.drawn(), 2);

    let mut plain = ScriptedLuck::from_f64s(&[1.0, 0.5]);
    assert_eq!(demiurge.compute_outgoing_damage(1, &mut plain), fixed(16));
}

#[test]
fn heavy_weapon_breaks_down_to_bare_hands() {
    let mut sword = WeaponKind::Sword.forge();
    sword.take_damage(fixed(500));
    let mut fighter = Combatant::base(0, "A").unwrap().with_weapon(sword);

    assert_eq!(
        fighter.check_weapon().map(|b| b.to),
        Some(WeaponKind::Knife)
    );
    assert_eq!(fighter.weapon().durability.current(), Some(fixed(300)));
    assert_eq!(fighter.check_weapon(), None);
}

#[test]
fn guaranteed_dodges_hit_round_cap() {
    let roster = vec![
        Combatant::base(0, "A").unwrap(),
        Combatant::base(1, "B").unwrap(),
    ];
    // Per attack: wear, damage, block, dodge
    let mut luck = ScriptedLuck::from_f64s(&[0.0, 0.0, 0.0, 1.0]);
    let mut arena = Arena::with_config(roster, MatchConfig::capped(50));

    let mut dodges = 0;
    let outcome = arena.run_with_reporter(&mut luck, |arena, report| {
        dodges += report
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Dodged { .. }))
            .count();
        assert!(arena.roster().iter().all(|c| c.life() == fixed(100)));
    });

    assert_eq!(outcome, MatchOutcome::Stalemate { rounds: 50 });
    assert_eq!(dodges, 100);
}

#[test]
fn lone_survivor_wins_without_an_attack() {
    let roster = vec![
        Combatant::mage(0, "Alive").unwrap(),
        Combatant::warrior(1, "Dead").unwrap().with_life(Fixed::ZERO),
    ];

    let result = run_match(roster, &mut FixedLuck::new(Fixed::ONE));

    assert_eq!(result.outcome, MatchOutcome::Winner(id(0)));
    assert_eq!(result.rounds, 0);
    let winner = result.winner().unwrap();
    assert_eq!(winner.name(), "Alive");
    assert_eq!(winner.weapon().durability.current(), Some(fixed(300)));
}

#[test]
fn killed_combatant_does_not_act_later_in_round() {
    let roster = vec![
        Combatant::dwarf(0, "Killer").unwrap(),
        Combatant::base(1, "Victim").unwrap().with_life(fixed(1)),
        Combatant::base(30, "Far").unwrap(),
    ];
    let mut arena = Arena::new(roster);

    let report = arena.step_round(&mut FixedLuck::new(fixed_f(0.5))).unwrap();

    assert_eq!(report.deaths().collect::<Vec<_>>(), vec![id(1)]);
    assert!(!report.events.iter().any(|e| matches!(
        e,
        CombatEvent::Moved { combatant, .. } | CombatEvent::Attacked { attacker: combatant, .. }
            if *combatant == id(1)
    )));
}
