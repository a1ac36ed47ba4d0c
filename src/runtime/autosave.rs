//! Background autosave worker.
//!
//! Snapshots are captured on the game thread and handed over a channel; the
//! worker writes them so a slow disk never stalls a tick. When several
//! snapshots queue up only the newest is written.

use crate::core::game_state::GameState;
use crate::persistence::{save_snapshot, KeyValueStore};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

enum Command {
    Save(Box<GameState>, i64),
    Shutdown,
}

/// Totals reported when the worker shuts down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutosaveReport {
    pub saves: u32,
    pub failures: u32,
    pub coalesced: u32,
}

pub struct Autosaver {
    sender: Sender<Command>,
    handle: Option<JoinHandle<AutosaveReport>>,
}

impl Autosaver {
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || run_worker(store.as_ref(), receiver));
        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Queues a snapshot taken at `timestamp_ms`. Never blocks.
    pub fn submit(&self, snapshot: GameState, timestamp_ms: i64) {
        // A dead worker already reported its failure; nothing left to do
        let _ = self
            .sender
            .send(Command::Save(Box::new(snapshot), timestamp_ms));
    }

    /// Writes anything still queued and stops the worker.
    pub fn shutdown(mut self) -> AutosaveReport {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> AutosaveReport {
        let _ = self.sender.send(Command::Shutdown);
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                eprintln!("Autosave worker panicked");
                AutosaveReport::default()
            }
            None => AutosaveReport::default(),
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop_and_join();
        }
    }
}

fn run_worker(store: &dyn KeyValueStore, receiver: Receiver<Command>) -> AutosaveReport {
    let mut report = AutosaveReport::default();

    while let Ok(command) = receiver.recv() {
        let (mut latest, mut shutdown) = match command {
            Command::Save(state, at) => (Some((state, at)), false),
            Command::Shutdown => (None, true),
        };

        // Coalesce a backlog down to its newest snapshot
        while let Ok(next) = receiver.try_recv() {
            match next {
                Command::Save(state, at) => {
                    if latest.is_some() {
                        report.coalesced += 1;
                    }
                    latest = Some((state, at));
                }
                Command::Shutdown => shutdown = true,
            }
        }

        if let Some((state, at)) = latest {
            match save_snapshot(store, &state, at) {
                Ok(()) => report.saves += 1,
                Err(e) => {
                    report.failures += 1;
                    eprintln!("Autosave failed: {}", e);
                }
            }
        }

        if shutdown {
            break;
        }
    }

    report
}
