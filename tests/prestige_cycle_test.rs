//! Integration test: complete prestige cycle
//!
//! Level gate → reset → relic spending → the next, higher gate.

use hero_idle::character::{
    can_prestige, relics_for_reset, PassiveId, PetId, PrestigeUpgradeId, UpgradeTrackId,
};
use hero_idle::core::{Game, GameEvent, GameState, ScriptedDice};
use hero_idle::items::{create_item, ItemType, Rarity};

fn game(state: GameState) -> Game<ScriptedDice> {
    Game::new(state, ScriptedDice::constant(0.99))
}

/// Level 50 hero on stage 12 with some of everything a reset touches.
fn veteran() -> GameState {
    let mut state = GameState::new();
    state.hero.level = 50;
    state.hero.max_hp = 1_080.0;
    state.hero.base_damage = 255.0;
    state.hero.hp = 500.0;
    state.hero.gold = 12_345;
    state.hero.skill_points = 4;
    state.hero.materials.scrap = 20;
    state.hero.materials.essence = 3;
    state.stage = 12;
    state.monsters_killed_in_stage = 6;

    let id = state.allocate_item_id();
    state.inventory.push(create_item(id, ItemType::Shield, Rarity::Epic, 12));
    let id = state.allocate_item_id();
    state
        .hero
        .equipment
        .replace(create_item(id, ItemType::Weapon, Rarity::Rare, 12));
    state
}

#[test]
fn test_first_prestige_resets_the_run() {
    let mut game = game(veteran());
    assert!(can_prestige(game.state()));
    assert_eq!(relics_for_reset(game.state()), 52);

    assert_eq!(game.prestige(), Some(52));

    let state = game.state();
    assert_eq!(state.hero.level, 1);
    assert_eq!(state.hero.gold, 0);
    assert_eq!(state.hero.materials.scrap, 20);
    assert_eq!(state.hero.materials.essence, 3);
    assert_eq!(state.hero.skill_points, 4);
    assert!(state.inventory.is_empty());
    assert_eq!(state.hero.equipment.iter_equipped().count(), 0);
    assert_eq!(state.stage, 1);
    assert_eq!(state.monsters_killed_in_stage, 0);
    assert_eq!(state.upgrades[&UpgradeTrackId::Damage].cost, 10);

    assert_eq!(state.prestige.level, 1);
    assert_eq!(state.prestige.relics, 52);
    assert_eq!(state.prestige.next_level_req, 60);
    assert_eq!(state.hero.hp, state.stats().max_hp);
}

#[test]
fn test_prestige_below_the_gate_is_a_no_op() {
    let mut state = veteran();
    state.hero.level = 49;
    let mut game = game(state);
    let before = game.snapshot();

    assert_eq!(game.prestige(), None);
    assert_eq!(game.state(), &before);
}

#[test]
fn test_item_ids_keep_climbing_across_a_reset() {
    let mut game = game(veteran());
    let next_id = game.state().next_item_id;
    game.prestige();
    assert_eq!(game.state().next_item_id, next_id);
}

#[test]
fn test_relics_buy_permanent_damage() {
    let mut game = game(veteran());
    game.prestige();
    // Base 10, wolf +5%
    let before = game.state().stats().damage;
    assert!((before - 10.5).abs() < 1e-9);

    assert!(game.buy_prestige_upgrade(PrestigeUpgradeId::Damage));
    assert!(game.buy_prestige_upgrade(PrestigeUpgradeId::Damage));
    let state = game.state();
    let upgrade = &state.prestige_upgrades[&PrestigeUpgradeId::Damage];
    assert_eq!(upgrade.level, 2);
    // 1 + 2 then + 3
    assert_eq!(state.prestige.relics, 52 - 1 - 3);
    assert_eq!(upgrade.cost, 6);
    assert!((state.stats().damage - 10.0 * 1.2 * 1.05).abs() < 1e-9);
}

#[test]
fn test_relic_gold_bonus_applies_to_kills() {
    let mut game = game(veteran());
    game.prestige();
    assert!(game.buy_prestige_upgrade(PrestigeUpgradeId::Gold));

    let mut state = game.into_state();
    state.monster.hp = 1.0;
    state.monster.gold_reward = 10;
    let mut game = Game::new(state, ScriptedDice::constant(0.99));
    game.handle(GameEvent::CombatTick);
    // 10 × 1.1
    assert_eq!(game.state().hero.gold, 11);
}

#[test]
fn test_passives_and_pets_survive_prestige() {
    let mut state = veteran();
    state.hero.gold = 1_000;
    let mut game = game(state);

    assert!(game.buy_passive(PassiveId::Damage));
    assert!(game.level_up_pet(PetId::Dragon));
    assert!(game.set_active_pet(PetId::Dragon));
    let passives = game.state().passive_skills.clone();
    let pets = game.state().pets.clone();

    game.prestige();
    assert_eq!(game.state().passive_skills, passives);
    assert_eq!(game.state().pets, pets);
}

#[test]
fn test_second_prestige_needs_level_sixty() {
    let mut game = game(veteran());
    game.prestige();

    let mut state = game.into_state();
    state.hero.level = 59;
    state.stage = 20;
    let mut game = Game::new(state, ScriptedDice::constant(0.99));
    assert_eq!(game.prestige(), None);

    let mut state = game.into_state();
    state.hero.level = 60;
    let mut game = Game::new(state, ScriptedDice::constant(0.99));
    assert_eq!(game.prestige(), Some(20 / 5 + 60));
    let prestige = &game.state().prestige;
    assert_eq!(prestige.level, 2);
    assert_eq!(prestige.relics, 52 + 64);
    assert_eq!(prestige.next_level_req, 70);
}
