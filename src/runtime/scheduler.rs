//! Deterministic timer set over a virtual millisecond clock.
//!
//! Timers fire in due-time order; timers due at the same instant fire in
//! the order they were registered. Nothing here sleeps: the caller decides
//! how virtual time maps to wall time.

use crate::config::EngineConfig;
use crate::core::tick::GameEvent;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Game(GameEvent),
    Autosave,
}

#[derive(Debug, Clone)]
struct Timer {
    task: Task,
    due_ms: u64,
    /// `None` for one-shot timers.
    period_ms: Option<u64>,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    timers: Vec<Timer>,
    next_seq: u64,
    stopped: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the fixed intervals: combat, cooldowns, boss countdown and
    /// autosave.
    pub fn with_intervals(config: &EngineConfig) -> Self {
        let mut scheduler = Self::new();
        scheduler.every(config.combat_tick_ms, Task::Game(GameEvent::CombatTick));
        scheduler.every(config.cooldown_tick_ms, Task::Game(GameEvent::CooldownTick));
        scheduler.every(config.boss_tick_ms, Task::Game(GameEvent::BossTimerTick));
        scheduler.every(config.autosave_interval_ms, Task::Autosave);
        scheduler
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Fires `task` every `period_ms`, first after one period. Zero periods
    /// are ignored.
    pub fn every(&mut self, period_ms: u64, task: Task) {
        if self.stopped || period_ms == 0 {
            return;
        }
        self.push(task, self.now_ms + period_ms, Some(period_ms));
    }

    /// Fires `task` once after `delay_ms`.
    pub fn once(&mut self, delay_ms: u64, task: Task) {
        if self.stopped {
            return;
        }
        self.push(task, self.now_ms + delay_ms, None);
    }

    fn push(&mut self, task: Task, due_ms: u64, period_ms: Option<u64>) {
        self.timers.push(Timer {
            task,
            due_ms,
            period_ms,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Due time of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the
    /// clock to its due time. Repeating timers are rearmed. When nothing is
    /// due the clock moves to `until_ms` and `None` is returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i);

        let Some(index) = index else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let timer = &mut self.timers[index];
        self.now_ms = self.now_ms.max(timer.due_ms);
        let task = timer.task;
        match timer.period_ms {
            Some(period) => {
                timer.due_ms += period;
                timer.seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(task)
    }

    /// Cancels every timer. Later registrations are ignored.
    pub fn stop(&mut self) {
        self.timers.clear();
        self.stopped = true;
    }
}
