use std::collections::HashMap;

use anyhow::Result;
use tracing::warn;

use crate::cache::SpriteMap;
use crate::config::SoundConfig;
use crate::params::AudioParams;
use crate::sound::{Marker, PlaybackState, Sound, SoundId};

/// Factory capability supplied by a concrete audio backend.
/// Implementations: SilentBackend (headless), MockBackend (testing).
///
/// Backends that cannot produce audio may return a functioning no-op sound;
/// the manager's behavior never depends on whether playback actually occurs.
pub trait SoundBackend {
    type Sound: Sound;

    /// Create a sound bound to the asset `key`. The manager assigns `id` and
    /// appends the result to its registry.
    fn create(&mut self, id: SoundId, key: &str, config: &SoundConfig) -> Result<Self::Sound>;

    /// Create a synthetic oscillator source at `frequency` Hz.
    fn add_oscillator(
        &mut self,
        id: SoundId,
        frequency: f64,
        config: &SoundConfig,
    ) -> Result<Self::Sound>;
}

/// No-audio backend for headless and test environments.
///
/// Every operation succeeds and every sound it creates tracks full playback
/// state without producing output.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl SilentBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SoundBackend for SilentBackend {
    type Sound = SilentSound;

    fn create(&mut self, id: SoundId, key: &str, config: &SoundConfig) -> Result<Self::Sound> {
        Ok(SilentSound::new(id, key, config.clone()))
    }

    fn add_oscillator(
        &mut self,
        id: SoundId,
        frequency: f64,
        config: &SoundConfig,
    ) -> Result<Self::Sound> {
        Ok(SilentSound::new(id, &format!("oscillator:{frequency}"), config.clone()))
    }
}

/// Sound instance that tracks playback state without rendering audio.
#[derive(Debug)]
pub struct SilentSound {
    id: SoundId,
    key: String,
    config: SoundConfig,
    state: PlaybackState,
    markers: HashMap<String, Marker>,
    spritemap: Option<SpriteMap>,
    /// Effective playback rate, recomputed on every global rate/detune write.
    total_rate: f64,
    /// Playback position in seconds, advanced by `update` while playing.
    position: f64,
}

impl SilentSound {
    fn new(id: SoundId, key: &str, config: SoundConfig) -> Self {
        let total_rate = AudioParams::default().effective_rate(config.rate, config.detune);
        let position = config.seek;
        Self {
            id,
            key: key.to_string(),
            config,
            state: PlaybackState::Stopped,
            markers: HashMap::new(),
            spritemap: None,
            total_rate,
            position,
        }
    }

    /// Begin playback from the configured start offset.
    pub fn play(&mut self) {
        self.position = self.config.seek;
        self.state = PlaybackState::Playing;
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current playback position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Effective playback rate after combining global and per-sound values.
    pub fn total_rate(&self) -> f64 {
        self.total_rate
    }

    pub fn config(&self) -> &SoundConfig {
        &self.config
    }

    pub fn markers(&self) -> &HashMap<String, Marker> {
        &self.markers
    }

    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.get(name)
    }
}

impl Sound for SilentSound {
    fn id(&self) -> SoundId {
        self.id
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn update(&mut self, _time: f64, delta: f64) {
        if self.state == PlaybackState::Playing {
            self.position += delta * self.total_rate;
        }
    }

    fn set_rate(&mut self, globals: &AudioParams) {
        self.total_rate = globals.effective_rate(self.config.rate, self.config.detune);
    }

    fn add_marker(&mut self, marker: Marker) -> bool {
        if self.markers.contains_key(&marker.name) {
            warn!("Duplicate marker '{}' on sound '{}'", marker.name, self.key);
            return false;
        }
        self.markers.insert(marker.name.clone(), marker);
        true
    }

    fn spritemap(&self) -> Option<&SpriteMap> {
        self.spritemap.as_ref()
    }

    fn set_spritemap(&mut self, map: SpriteMap) {
        self.spritemap = Some(map);
    }

    fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.position = self.config.seek;
    }

    fn destroy(&mut self) {
        self.stop();
        self.markers.clear();
        self.spritemap = None;
    }
}
