//! Drives a [`Game`] from the timer set.

use super::autosave::{AutosaveReport, Autosaver};
use super::scheduler::{Scheduler, Task};
use crate::config::EngineConfig;
use crate::core::controller::Game;
use crate::core::dice::Dice;
use crate::core::game_state::GameState;
use crate::core::tick::{GameEvent, TickResult};

pub struct Engine<D: Dice> {
    game: Game<D>,
    scheduler: Scheduler,
    autosaver: Option<Autosaver>,
    respawn_delay_ms: u64,
    /// Wall-clock epoch milliseconds at virtual time zero.
    clock_origin_ms: i64,
}

impl<D: Dice> Engine<D> {
    pub fn new(game: Game<D>, config: &EngineConfig, clock_origin_ms: i64) -> Self {
        let mut scheduler = Scheduler::with_intervals(config);
        // Saved between a kill and its respawn
        if !game.state().monster.is_alive() {
            scheduler.once(config.respawn_delay_ms, Task::Game(GameEvent::SpawnMonster));
        }
        Self {
            game,
            scheduler,
            autosaver: None,
            respawn_delay_ms: config.respawn_delay_ms,
            clock_origin_ms,
        }
    }

    pub fn with_autosaver(mut self, autosaver: Autosaver) -> Self {
        self.autosaver = Some(autosaver);
        self
    }

    pub fn game(&self) -> &Game<D> {
        &self.game
    }

    /// Player requests go through here between ticks.
    pub fn game_mut(&mut self) -> &mut Game<D> {
        &mut self.game
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn wall_clock_ms(&self) -> i64 {
        self.clock_origin_ms + self.scheduler.now_ms() as i64
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Runs every timer due up to `until_ms` of virtual time, one at a
    /// time, each to completion.
    pub fn run_until(&mut self, until_ms: u64) -> Vec<TickResult> {
        let mut results = Vec::new();
        while let Some(task) = self.scheduler.pop_due(until_ms) {
            match task {
                Task::Game(event) => {
                    let result = self.game.handle(event);
                    if result.respawn_requested {
                        self.scheduler
                            .once(self.respawn_delay_ms, Task::Game(GameEvent::SpawnMonster));
                    }
                    results.push(result);
                }
                Task::Autosave => self.autosave(),
            }
        }
        results
    }

    fn autosave(&self) {
        if let Some(autosaver) = &self.autosaver {
            autosaver.submit(self.game.snapshot(), self.wall_clock_ms());
        }
    }

    /// Stops every timer, writes a final snapshot, and hands back the state.
    pub fn shutdown(mut self) -> (GameState, Option<AutosaveReport>) {
        self.scheduler.stop();
        self.autosave();
        let report = self.autosaver.take().map(Autosaver::shutdown);
        (self.game.into_state(), report)
    }
}
