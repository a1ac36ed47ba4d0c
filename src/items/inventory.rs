//! Equipment and inventory transactions.
//!
//! Every operation is all-or-nothing: when the item is missing or the hero
//! cannot pay, it returns false/`None` and the state is left untouched.
//! After a successful change the hero's hp is clamped to the new effective
//! maximum.

use super::types::{Item, ItemId, ItemType, UpgradeCost};
use crate::combat::types::LogKind;
use crate::core::game_state::GameState;

fn take_from_inventory(state: &mut GameState, id: ItemId) -> Option<Item> {
    let index = state.inventory.iter().position(|item| item.id == id)?;
    Some(state.inventory.remove(index))
}

/// Moves an inventory item into its slot. A previously equipped item
/// returns to the inventory.
pub fn equip(state: &mut GameState, id: ItemId) -> bool {
    let Some(item) = take_from_inventory(state, id) else {
        return false;
    };

    let name = item.display_name();
    if let Some(previous) = state.hero.equipment.replace(item) {
        state.inventory.push(previous);
    }
    state.combat_log.push(format!("Equipped {}.", name), LogKind::Info);
    state.clamp_hero_hp();
    true
}

/// Moves the item in `slot` back to the inventory.
pub fn unequip(state: &mut GameState, slot: ItemType) -> bool {
    let Some(item) = state.hero.equipment.take(slot) else {
        return false;
    };
    state.inventory.push(item);
    state.clamp_hero_hp();
    true
}

/// Destroys an inventory item for materials. Returns `(scrap, essence)`.
pub fn dismantle(state: &mut GameState, id: ItemId) -> Option<(u64, u64)> {
    let item = take_from_inventory(state, id)?;
    let (scrap, essence) = item.rarity.dismantle_yield();
    state.hero.materials.scrap += scrap;
    state.hero.materials.essence += essence;
    state.combat_log.push(
        format!(
            "Dismantled {} for {} scrap and {} essence.",
            item.display_name(),
            scrap,
            essence
        ),
        LogKind::Reward,
    );
    Some((scrap, essence))
}

/// Sells an inventory item. Returns the gold received.
pub fn sell(state: &mut GameState, id: ItemId) -> Option<u64> {
    let item = take_from_inventory(state, id)?;
    let gold = item.sell_price();
    state.hero.gold += gold;
    state.combat_log.push(
        format!("Sold {} for {} gold.", item.display_name(), gold),
        LogKind::Reward,
    );
    Some(gold)
}

/// Cost of upgrading the item in `slot`, if one is equipped.
pub fn next_item_upgrade_cost(state: &GameState, slot: ItemType) -> Option<UpgradeCost> {
    state.hero.equipment.get(slot).map(Item::upgrade_cost)
}

pub fn can_upgrade_item(state: &GameState, slot: ItemType) -> bool {
    next_item_upgrade_cost(state, slot).is_some_and(|cost| {
        state.hero.gold >= cost.gold
            && state.hero.materials.scrap >= cost.scrap
            && state.hero.materials.essence >= cost.essence
    })
}

/// Upgrades the equipped item in `slot` one level. The item keeps its id.
pub fn upgrade_item(state: &mut GameState, slot: ItemType) -> bool {
    if !can_upgrade_item(state, slot) {
        return false;
    }
    let Some(item) = state.hero.equipment.get_mut(slot) else {
        return false;
    };

    let cost = item.upgrade_cost();
    state.hero.gold -= cost.gold;
    state.hero.materials.scrap -= cost.scrap;
    state.hero.materials.essence -= cost.essence;

    item.value += item.upgrade_increment();
    item.upgrade_level += 1;
    let text = format!("Upgraded to {}!", item.display_name());

    state.combat_log.push(text, LogKind::Reward);
    state.clamp_hero_hp();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::create_item;
    use crate::items::Rarity;

    fn state_with(items: &[(ItemType, Rarity)]) -> GameState {
        let mut state = GameState::new();
        for &(item_type, rarity) in items {
            let id = state.allocate_item_id();
            state.inventory.push(create_item(id, item_type, rarity, 1));
        }
        state
    }

    #[test]
    fn test_equip_moves_item_into_slot() {
        let mut state = state_with(&[(ItemType::Weapon, Rarity::Common)]);
        assert!(equip(&mut state, 1));
        assert!(state.inventory.is_empty());
        assert_eq!(state.hero.equipment.get(ItemType::Weapon).map(|i| i.id), Some(1));
        assert!((state.stats().damage - 15.5).abs() < 1e-9);
    }

    #[test]
    fn test_equip_swaps_previous_item_back() {
        let mut state = state_with(&[
            (ItemType::Weapon, Rarity::Common),
            (ItemType::Weapon, Rarity::Epic),
        ]);
        equip(&mut state, 1);
        assert!(equip(&mut state, 2));

        assert_eq!(state.hero.equipment.get(ItemType::Weapon).map(|i| i.id), Some(2));
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(state.inventory[0].id, 1);
    }

    #[test]
    fn test_equip_already_equipped_is_noop() {
        let mut state = state_with(&[(ItemType::Amulet, Rarity::Rare)]);
        equip(&mut state, 1);
        let before = state.clone();
        assert!(!equip(&mut state, 1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_unequip_clamps_hp() {
        let mut state = state_with(&[(ItemType::Shield, Rarity::Rare)]);
        equip(&mut state, 1);
        state.restore_hero_hp();
        assert_eq!(state.hero.hp, 150.0);

        assert!(unequip(&mut state, ItemType::Shield));
        assert_eq!(state.hero.hp, 100.0);
        assert_eq!(state.inventory.len(), 1);

        assert!(!unequip(&mut state, ItemType::Shield));
    }

    #[test]
    fn test_dismantle_yields_materials_by_rarity() {
        let mut state = state_with(&[
            (ItemType::Weapon, Rarity::Common),
            (ItemType::Weapon, Rarity::Rare),
            (ItemType::Weapon, Rarity::Epic),
        ]);
        assert_eq!(dismantle(&mut state, 1), Some((1, 0)));
        assert_eq!(dismantle(&mut state, 2), Some((3, 1)));
        assert_eq!(dismantle(&mut state, 3), Some((5, 3)));
        assert_eq!(state.hero.materials.scrap, 9);
        assert_eq!(state.hero.materials.essence, 4);
        assert!(state.inventory.is_empty());
        assert_eq!(dismantle(&mut state, 3), None);
    }

    #[test]
    fn test_sell_scales_with_upgrade_level() {
        let mut state = state_with(&[
            (ItemType::Weapon, Rarity::Rare),
            (ItemType::Shield, Rarity::Epic),
        ]);
        state.inventory[1].upgrade_level = 3;
        assert_eq!(sell(&mut state, 1), Some(50));
        // 200 * 2.5
        assert_eq!(sell(&mut state, 2), Some(500));
        assert_eq!(state.hero.gold, 550);
        assert_eq!(sell(&mut state, 1), None);
    }

    #[test]
    fn test_upgrade_item_spends_and_improves() {
        let mut state = state_with(&[(ItemType::Weapon, Rarity::Rare)]);
        equip(&mut state, 1);
        state.hero.gold = 1_000;
        state.hero.materials.scrap = 20;
        state.hero.materials.essence = 5;

        assert!(upgrade_item(&mut state, ItemType::Weapon));
        let item = state.hero.equipment.get(ItemType::Weapon).unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.upgrade_level, 1);
        // 10 + 5 * 2 * 0.1
        assert!((item.value - 11.0).abs() < 1e-9);
        assert_eq!(state.hero.gold, 900);
        assert_eq!(state.hero.materials.scrap, 15);
        assert_eq!(state.hero.materials.essence, 4);

        let cost = next_item_upgrade_cost(&state, ItemType::Weapon).unwrap();
        assert_eq!((cost.gold, cost.scrap, cost.essence), (200, 10, 2));
    }

    #[test]
    fn test_upgrade_item_unaffordable_or_empty_is_noop() {
        let mut state = state_with(&[(ItemType::Weapon, Rarity::Rare)]);
        equip(&mut state, 1);
        state.hero.gold = 1_000;
        state.hero.materials.scrap = 20;
        // Rare needs essence
        let before = state.clone();
        assert!(!upgrade_item(&mut state, ItemType::Weapon));
        assert_eq!(state, before);

        assert!(!upgrade_item(&mut state, ItemType::Shield));
        assert_eq!(state, before);
    }

    #[test]
    fn test_common_upgrade_needs_no_essence() {
        let mut state = state_with(&[(ItemType::Amulet, Rarity::Common)]);
        equip(&mut state, 1);
        state.hero.gold = 100;
        state.hero.materials.scrap = 5;
        assert!(upgrade_item(&mut state, ItemType::Amulet));
        assert_eq!(state.hero.gold, 0);
        assert_eq!(state.hero.materials.scrap, 0);
    }
}
