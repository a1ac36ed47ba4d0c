use super::types::{Item, ItemType};
use serde::{Deserialize, Serialize};

/// Hero equipment slots, one per item type.
///
/// IMPORTANT: When adding new slots, use `#[serde(default)]` so older
/// snapshots still load through the deep-merge reconciler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub shield: Option<Item>,
    #[serde(default)]
    pub amulet: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: ItemType) -> Option<&Item> {
        match slot {
            ItemType::Weapon => self.weapon.as_ref(),
            ItemType::Shield => self.shield.as_ref(),
            ItemType::Amulet => self.amulet.as_ref(),
        }
    }

    pub fn get_mut(&mut self, slot: ItemType) -> Option<&mut Item> {
        self.slot_mut(slot).as_mut()
    }

    /// Puts `item` into its slot, returning whatever was there before.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        self.slot_mut(item.item_type).replace(item)
    }

    pub fn take(&mut self, slot: ItemType) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.shield, &self.amulet]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.iter_equipped().any(|item| item.id == id)
    }

    fn slot_mut(&mut self, slot: ItemType) -> &mut Option<Item> {
        match slot {
            ItemType::Weapon => &mut self.weapon,
            ItemType::Shield => &mut self.shield,
            ItemType::Amulet => &mut self.amulet,
        }
    }
}
