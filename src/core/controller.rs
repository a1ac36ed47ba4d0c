//! The single owner of a [`GameState`].
//!
//! Every mutation, timer-driven or player-requested, goes through a method
//! on [`Game`], so there is exactly one writer. Requests re-validate their
//! preconditions and are no-ops when they fail.

use super::dice::Dice;
use super::game_state::GameState;
use super::offline::{self, OfflineReport};
use super::tick::{self, GameEvent, TickResult};
use crate::character::passives::{self, PassiveId};
use crate::character::pets::{self, PetId};
use crate::character::prestige::{self, PrestigeUpgradeId};
use crate::character::upgrades::{self, UpgradeTrackId};
use crate::combat::skills::{self, SkillId};
use crate::items::{self, ItemId, ItemType};
use chrono::NaiveDate;

pub struct Game<D: Dice> {
    state: GameState,
    dice: D,
}

impl<D: Dice> Game<D> {
    pub fn new(state: GameState, dice: D) -> Self {
        Self { state, dice }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A complete copy of the state for persistence.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Applies one timer event.
    pub fn handle(&mut self, event: GameEvent) -> TickResult {
        tick::apply(&mut self.state, event, &mut self.dice)
    }

    pub fn use_skill(&mut self, id: SkillId) -> bool {
        skills::use_skill(&mut self.state, id)
    }

    pub fn buy_upgrade(&mut self, id: UpgradeTrackId) -> bool {
        upgrades::buy_upgrade(&mut self.state, id)
    }

    pub fn equip(&mut self, id: ItemId) -> bool {
        items::equip(&mut self.state, id)
    }

    pub fn unequip(&mut self, slot: ItemType) -> bool {
        items::unequip(&mut self.state, slot)
    }

    pub fn dismantle(&mut self, id: ItemId) -> Option<(u64, u64)> {
        items::dismantle(&mut self.state, id)
    }

    pub fn sell(&mut self, id: ItemId) -> Option<u64> {
        items::sell(&mut self.state, id)
    }

    pub fn upgrade_item(&mut self, slot: ItemType) -> bool {
        items::upgrade_item(&mut self.state, slot)
    }

    /// Returns the relics gained, or `None` below the level gate.
    pub fn prestige(&mut self) -> Option<u64> {
        prestige::perform_prestige(&mut self.state)
    }

    pub fn buy_prestige_upgrade(&mut self, id: PrestigeUpgradeId) -> bool {
        prestige::buy_prestige_upgrade(&mut self.state, id)
    }

    pub fn buy_passive(&mut self, id: PassiveId) -> bool {
        passives::buy_passive(&mut self.state, id)
    }

    pub fn level_up_pet(&mut self, id: PetId) -> bool {
        pets::level_up_pet(&mut self.state, id)
    }

    pub fn set_active_pet(&mut self, id: PetId) -> bool {
        pets::set_active_pet(&mut self.state, id)
    }

    pub fn claim_daily_reward_on(&mut self, today: NaiveDate) -> bool {
        offline::claim_daily_reward(&mut self.state, today)
    }

    pub fn claim_daily_reward(&mut self) -> bool {
        self.claim_daily_reward_on(offline::today())
    }

    pub fn apply_offline_progress_at(
        &mut self,
        last_save_ms: i64,
        now_ms: i64,
    ) -> Option<OfflineReport> {
        offline::process_offline_progression_at(&mut self.state, last_save_ms, now_ms)
    }

    pub fn apply_offline_progress(&mut self, last_save_ms: i64) -> Option<OfflineReport> {
        offline::process_offline_progression(&mut self.state, last_save_ms)
    }

    pub fn toggle_music(&mut self) -> bool {
        self.state.toggle_music()
    }

    pub fn toggle_sfx(&mut self) -> bool {
        self.state.toggle_sfx()
    }
}
