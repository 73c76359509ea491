//! Backend-agnostic sound management for game loops.
//!
//! This crate provides:
//! - [`SoundManager`]: Tracks sound instances and fans out global parameter
//!   changes, the per-frame tick, and focus-driven pause/resume
//! - [`SoundBackend`] / [`Sound`]: Capability traits a concrete audio
//!   backend implements
//! - [`SilentBackend`]: No-audio backend for headless and test environments
//! - [`JsonCache`]: Keyed cache for audio-sprite maps
//! - [`EventQueue`]: The manager's own event channel, independent of the
//!   host's event system

pub mod backend;
pub mod cache;
pub mod config;
pub mod events;
pub mod manager;
pub mod params;
pub mod sound;

pub use backend::{SilentBackend, SilentSound, SoundBackend};
pub use cache::{JsonCache, SpriteEntry, SpriteMap, parse_sprite_json};
pub use config::SoundConfig;
pub use events::{EventQueue, SoundEvent};
pub use manager::{FocusState, SoundManager};
pub use params::AudioParams;
pub use sound::{Marker, PlaybackState, Sound, SoundId};

#[cfg(test)]
mod test_utils;
