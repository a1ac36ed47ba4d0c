//! Hero Idle - simulation core of an idle RPG.
//!
//! A hero fights an endless stream of monsters on fixed timers, earning gold,
//! experience and loot, with prestige resets and offline catch-up. The
//! engine is split into pure state transitions ([`core::tick::apply`]) and a
//! scheduling layer ([`runtime`]) that drives them; persistence goes through
//! a key-value collaborator ([`persistence::KeyValueStore`]).

pub mod build_info;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod items;
pub mod persistence;
pub mod runtime;
