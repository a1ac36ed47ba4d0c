//! Pure state transitions driven by timer events.
//!
//! [`apply`] takes one [`GameEvent`] and returns a [`TickResult`] describing
//! what happened, so the scheduling layer (and the presentation above it)
//! never reaches into game logic and the transitions can be tested without
//! any timers.

use crate::combat::logic::{boss_timer_tick, hero_attack, monster_attack, CombatEvent};
use crate::combat::skills::{tick_cooldowns, SkillId};
use crate::core::dice::Dice;
use crate::core::game_state::GameState;
use crate::core::progression::spawn_next_monster;

/// Timer-driven inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// 1 Hz: hero attack, then monster attack.
    CombatTick,
    /// 1 Hz: skill cooldowns.
    CooldownTick,
    /// 1 Hz: boss countdown.
    BossTimerTick,
    /// One-shot, shortly after a kill.
    SpawnMonster,
}

/// A single event produced by a transition.
///
/// The presentation layer maps these to visual effects; the text form of
/// each is already in the combat log.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    Combat(CombatEvent),
    SkillReady(SkillId),
    MonsterSpawned { name: String, is_boss: bool },
}

/// Result of applying one [`GameEvent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events in chronological order.
    pub events: Vec<TickEvent>,
    /// A monster died; the caller should schedule [`GameEvent::SpawnMonster`].
    pub respawn_requested: bool,
}

impl TickResult {
    pub fn leveled_up(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event,
                TickEvent::Combat(CombatEvent::MonsterDefeated(report)) if report.levels_gained > 0
            )
        })
    }
}

/// Applies one event to the state.
pub fn apply<D: Dice + ?Sized>(state: &mut GameState, event: GameEvent, dice: &mut D) -> TickResult {
    let mut result = TickResult::default();

    match event {
        GameEvent::CombatTick => {
            for combat in hero_attack(state, dice) {
                if matches!(combat, CombatEvent::MonsterDefeated(_)) {
                    result.respawn_requested = true;
                }
                result.events.push(TickEvent::Combat(combat));
            }
            result
                .events
                .extend(monster_attack(state, dice).into_iter().map(TickEvent::Combat));
        }
        GameEvent::CooldownTick => {
            result
                .events
                .extend(tick_cooldowns(state).into_iter().map(TickEvent::SkillReady));
        }
        GameEvent::BossTimerTick => {
            if let Some(combat) = boss_timer_tick(state) {
                result.events.push(TickEvent::Combat(combat));
            }
        }
        GameEvent::SpawnMonster => {
            // A stale respawn must not replace a living monster
            if !state.monster.is_alive() {
                spawn_next_monster(state, dice);
                result.events.push(TickEvent::MonsterSpawned {
                    name: state.monster.name.clone(),
                    is_boss: state.monster.is_boss,
                });
            }
        }
    }

    result
}
