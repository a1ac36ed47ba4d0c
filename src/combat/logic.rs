use super::types::{Ability, LogKind};
use crate::character::hero::Poison;
use crate::core::constants::*;
use crate::core::dice::Dice;
use crate::core::game_state::GameState;
use crate::core::progression::{resolve_defeat, DefeatReport};

#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    HeroAttack {
        damage: f64,
        was_crit: bool,
        was_powerful: bool,
    },
    /// The boss timer ran out; attacks wait for the boss to reset.
    AttackSuppressed,
    Dodged,
    MonsterHealed {
        amount: f64,
    },
    MonsterDefeated(DefeatReport),
    PoisonInflicted {
        damage_per_tick: f64,
    },
    PoisonTick {
        damage: f64,
        remaining_ticks: u32,
    },
    /// Hero hp hit zero and was restored in place.
    HeroRevived,
    BossTimerExpired,
    BossReset,
}

/// Whether the hero may swing this tick.
pub fn hero_attack_suppressed(state: &GameState) -> bool {
    state.is_boss_fight && state.boss_timer == 0
}

/// Resolves one hero → monster attack.
///
/// Dodge is checked before powerful strike and crit; a dodged swing deals
/// nothing and leaves the powerful strike armed. Damage may drive the
/// monster below zero. A healer's one heal lands before the death check,
/// which clamps hp and runs the defeat pipeline exactly once.
pub fn hero_attack<D: Dice + ?Sized>(state: &mut GameState, dice: &mut D) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    if hero_attack_suppressed(state) {
        events.push(CombatEvent::AttackSuppressed);
        return events;
    }
    if !state.monster.is_alive() {
        return events;
    }

    let stats = state.stats();

    if state.monster.has(Ability::Dodge) && dice.chance(DODGE_CHANCE) {
        let text = format!("{} dodged the attack!", state.monster.name);
        state.combat_log.push(text, LogKind::Warning);
        events.push(CombatEvent::Dodged);
        return events;
    }

    let mut damage = stats.damage;
    let mut was_crit = false;
    let mut was_powerful = false;
    if state.effects.powerful_strike_active {
        state.effects.powerful_strike_active = false;
        damage *= POWERFUL_STRIKE_MULTIPLIER;
        was_powerful = true;
        state.combat_log.push(
            format!("POWERFUL STRIKE! Hero attacks for {} damage.", damage),
            LogKind::Crit,
        );
    } else if dice.chance(stats.crit_chance) {
        damage = (damage * state.hero.crit_multiplier).round();
        was_crit = true;
        state.combat_log.push(
            format!("CRITICAL HIT! Hero attacks for {} damage.", damage),
            LogKind::Crit,
        );
    } else {
        state
            .combat_log
            .push(format!("Hero attacks for {} damage.", damage), LogKind::Attack);
    }

    state.monster.hp -= damage;
    events.push(CombatEvent::HeroAttack {
        damage,
        was_crit,
        was_powerful,
    });

    let monster = &mut state.monster;
    if monster.has(Ability::Heal)
        && !monster.used_heal_this_encounter
        && monster.hp < monster.max_hp * MONSTER_HEAL_THRESHOLD
    {
        let amount = (monster.max_hp * MONSTER_HEAL_FRACTION).round();
        monster.hp = (monster.hp + amount).min(monster.max_hp);
        monster.used_heal_this_encounter = true;
        let text = format!("{} heals for {} HP!", monster.name, amount);
        state.combat_log.push(text, LogKind::Warning);
        events.push(CombatEvent::MonsterHealed { amount });
    }

    if state.monster.hp <= 0.0 {
        state.monster.hp = 0.0;
        let report = resolve_defeat(state, dice);
        events.push(CombatEvent::MonsterDefeated(report));
    }

    events
}

/// Resolves the monster → hero side of a tick: poison infliction, poison
/// damage, and the in-place revive when hp reaches zero.
pub fn monster_attack<D: Dice + ?Sized>(state: &mut GameState, dice: &mut D) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let max_hp = state.stats().max_hp;

    if state.monster.is_alive()
        && state.monster.has(Ability::Poison)
        && !state.hero.is_poisoned()
        && dice.chance(POISON_CHANCE)
    {
        let damage_per_tick = max_hp * POISON_MAX_HP_FRACTION;
        state.hero.status_effects.poison = Some(Poison {
            remaining_ticks: POISON_TICKS,
            damage_per_tick,
        });
        let text = format!("{} poisoned you!", state.monster.name);
        state.combat_log.push(text, LogKind::Warning);
        events.push(CombatEvent::PoisonInflicted { damage_per_tick });
    }

    if let Some(mut poison) = state.hero.status_effects.poison.take() {
        state.hero.hp -= poison.damage_per_tick;
        poison.remaining_ticks = poison.remaining_ticks.saturating_sub(1);
        events.push(CombatEvent::PoisonTick {
            damage: poison.damage_per_tick,
            remaining_ticks: poison.remaining_ticks,
        });
        if poison.remaining_ticks > 0 {
            state.hero.status_effects.poison = Some(poison);
        } else {
            state.combat_log.push("The poison wears off.", LogKind::Info);
        }
    }

    if state.hero.hp <= 0.0 {
        state.hero.hp = max_hp;
        state
            .combat_log
            .push("You were defeated but recover your strength!", LogKind::Warning);
        events.push(CombatEvent::HeroRevived);
    }

    events
}

/// One second of the boss countdown. A no-op outside boss fights.
pub fn boss_timer_tick(state: &mut GameState) -> Option<CombatEvent> {
    if !state.is_boss_fight {
        return None;
    }

    if state.boss_timer == 0 {
        state.monster.reset_hp();
        state.boss_timer = BOSS_TIME_LIMIT_SECONDS;
        let text = format!("{} recovers! Try again.", state.monster.name);
        state.combat_log.push(text, LogKind::Warning);
        return Some(CombatEvent::BossReset);
    }

    state.boss_timer -= 1;
    if state.boss_timer == 0 {
        state
            .combat_log
            .push("Time's up! The boss regains its strength.", LogKind::Warning);
        return Some(CombatEvent::BossTimerExpired);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::Monster;
    use crate::core::dice::ScriptedDice;
    use std::collections::BTreeSet;

    /// Hero with exactly 10 damage and no crit, against a 50 hp dummy.
    fn plain_fight() -> GameState {
        let mut state = GameState::new();
        for pet in state.pets.roster.values_mut() {
            pet.level = 0;
        }
        state.hero.base_crit_chance = 0.0;
        state.monster = Monster::starter();
        state
    }

    fn with_ability(state: &mut GameState, ability: Ability) {
        state.monster.abilities = BTreeSet::from([ability]);
    }

    #[test]
    fn test_five_plain_attacks_defeat_fifty_hp_monster_once() {
        let mut state = plain_fight();
        // No drop on kill
        let mut dice = ScriptedDice::constant(0.99);

        let mut defeats = 0;
        for i in 0..5 {
            let events = hero_attack(&mut state, &mut dice);
            defeats += events
                .iter()
                .filter(|e| matches!(e, CombatEvent::MonsterDefeated(_)))
                .count();
            if i < 4 {
                assert_eq!(state.monster.hp, 50.0 - 10.0 * (i + 1) as f64);
            }
        }
        assert_eq!(state.monster.hp, 0.0);
        assert_eq!(defeats, 1);

        // Awaiting respawn: further attacks do nothing
        let events = hero_attack(&mut state, &mut dice);
        assert!(events.is_empty());
        assert_eq!(state.hero.gold, 5);
    }

    #[test]
    fn test_forced_dodge_nullifies_every_attack() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Dodge);
        let mut dice = ScriptedDice::constant(0.1);

        for _ in 0..4 {
            let events = hero_attack(&mut state, &mut dice);
            assert_eq!(events, vec![CombatEvent::Dodged]);
            assert_eq!(state.monster.hp, 50.0);
            assert!(state
                .combat_log
                .last()
                .is_some_and(|e| e.text.contains("dodged")));
        }

        // Dodge roll fails, then the crit roll fails
        dice.push(0.5);
        dice.push(0.5);
        let events = hero_attack(&mut state, &mut dice);
        assert!(matches!(events[0], CombatEvent::HeroAttack { damage, .. } if damage == 10.0));
        assert_eq!(state.monster.hp, 40.0);
    }

    #[test]
    fn test_dodge_keeps_powerful_strike_armed() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Dodge);
        state.effects.powerful_strike_active = true;

        hero_attack(&mut state, &mut ScriptedDice::new(&[0.0]));
        assert!(state.effects.powerful_strike_active);

        let events = hero_attack(&mut state, &mut ScriptedDice::new(&[0.9]));
        assert!(!state.effects.powerful_strike_active);
        assert!(matches!(
            events[0],
            CombatEvent::HeroAttack { damage, was_powerful: true, .. } if damage == 30.0
        ));
    }

    #[test]
    fn test_powerful_strike_takes_priority_over_crit() {
        let mut state = plain_fight();
        state.hero.base_crit_chance = 1.0;
        state.effects.powerful_strike_active = true;
        let events = hero_attack(&mut state, &mut ScriptedDice::constant(0.0));
        assert!(matches!(
            events[0],
            CombatEvent::HeroAttack { was_crit: false, was_powerful: true, .. }
        ));
        assert_eq!(state.monster.hp, 20.0);
    }

    #[test]
    fn test_crit_multiplies_damage() {
        let mut state = plain_fight();
        state.hero.base_crit_chance = 0.5;
        let events = hero_attack(&mut state, &mut ScriptedDice::new(&[0.1]));
        assert!(matches!(
            events[0],
            CombatEvent::HeroAttack { damage, was_crit: true, .. } if damage == 15.0
        ));
        assert!(state.combat_log.contains(LogKind::Crit, "CRITICAL"));
    }

    #[test]
    fn test_monster_heals_once_below_half() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Heal);
        state.monster.hp = 30.0;
        let mut dice = ScriptedDice::constant(0.9);

        // 30 - 10 = 20 < 25, heals 3 (5% of 50 rounded)
        let events = hero_attack(&mut state, &mut dice);
        assert!(events.contains(&CombatEvent::MonsterHealed { amount: 3.0 }));
        assert_eq!(state.monster.hp, 23.0);
        assert!(state.monster.used_heal_this_encounter);

        hero_attack(&mut state, &mut dice);
        assert_eq!(state.monster.hp, 13.0);
    }

    #[test]
    fn test_heal_runs_before_the_death_check() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Heal);
        state.monster.max_hp = 100.0;
        state.monster.hp = 9.0;

        // 9 - 10 = -1, heals 5, survives on 4
        let events = hero_attack(&mut state, &mut ScriptedDice::constant(0.9));
        assert!(events.contains(&CombatEvent::MonsterHealed { amount: 5.0 }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, CombatEvent::MonsterDefeated(_))));
        assert_eq!(state.monster.hp, 4.0);

        // Heal is spent; the next hit kills
        let events = hero_attack(&mut state, &mut ScriptedDice::constant(0.9));
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::MonsterDefeated(_))));
        assert_eq!(state.monster.hp, 0.0);
    }

    #[test]
    fn test_heal_too_small_to_save_the_monster() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Heal);
        state.monster.hp = 2.0;

        // 2 - 10 = -8, heals 3, still dead
        let events = hero_attack(&mut state, &mut ScriptedDice::constant(0.9));
        assert!(events.contains(&CombatEvent::MonsterHealed { amount: 3.0 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::MonsterDefeated(_))));
        assert_eq!(state.monster.hp, 0.0);
    }

    #[test]
    fn test_boss_timer_counts_down_suppresses_and_resets() {
        let mut state = plain_fight();
        state.is_boss_fight = true;
        state.boss_timer = 2;
        state.monster.hp = 10.0;

        assert_eq!(boss_timer_tick(&mut state), None);
        assert_eq!(boss_timer_tick(&mut state), Some(CombatEvent::BossTimerExpired));
        assert!(hero_attack_suppressed(&state));
        assert_eq!(
            hero_attack(&mut state, &mut ScriptedDice::constant(0.9)),
            vec![CombatEvent::AttackSuppressed]
        );
        assert_eq!(state.monster.hp, 10.0);

        assert_eq!(boss_timer_tick(&mut state), Some(CombatEvent::BossReset));
        assert_eq!(state.monster.hp, state.monster.max_hp);
        assert_eq!(state.boss_timer, 30);
        assert!(!hero_attack_suppressed(&state));
    }

    #[test]
    fn test_boss_timer_idle_outside_boss_fight() {
        let mut state = GameState::new();
        state.boss_timer = 0;
        assert_eq!(boss_timer_tick(&mut state), None);
        assert_eq!(state.boss_timer, 0);
        assert!(!hero_attack_suppressed(&state));
    }

    #[test]
    fn test_poison_inflicted_and_ticks_out() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Poison);
        let mut dice = ScriptedDice::new(&[0.1]);

        let events = monster_attack(&mut state, &mut dice);
        assert_eq!(events[0], CombatEvent::PoisonInflicted { damage_per_tick: 2.0 });
        // Inflicted and ticked on the same turn
        assert_eq!(state.hero.hp, 98.0);
        assert_eq!(
            state.hero.status_effects.poison.map(|p| p.remaining_ticks),
            Some(4)
        );

        // Already poisoned: no new roll consumed
        for _ in 0..4 {
            monster_attack(&mut state, &mut dice);
        }
        assert_eq!(dice.remaining(), 0);
        assert_eq!(state.hero.hp, 90.0);
        assert!(!state.hero.is_poisoned());
    }

    #[test]
    fn test_poison_death_revives_in_place() {
        let mut state = plain_fight();
        state.hero.hp = 1.0;
        state.hero.status_effects.poison = Some(Poison {
            remaining_ticks: 3,
            damage_per_tick: 2.0,
        });
        let events = monster_attack(&mut state, &mut ScriptedDice::constant(0.9));
        assert!(events.contains(&CombatEvent::HeroRevived));
        assert_eq!(state.hero.hp, 100.0);
    }

    #[test]
    fn test_dead_monster_does_not_poison() {
        let mut state = plain_fight();
        with_ability(&mut state, Ability::Poison);
        state.monster.hp = 0.0;
        let events = monster_attack(&mut state, &mut ScriptedDice::constant(0.0));
        assert!(events.is_empty());
        assert!(!state.hero.is_poisoned());
    }
}
