use crate::cache::SpriteMap;
use crate::config::SoundConfig;
use crate::params::AudioParams;

/// Handle for referencing tracked sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u64);

/// Playback state of a single sound instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// A named, time-bounded sub-region of a multi-clip audio asset.
///
/// `duration` is derived from the sprite-map entry as `end - start` and is
/// non-negative for well-formed sprite data.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Name, unique within one sound's spritemap.
    pub name: String,
    /// Start offset within the asset, in seconds.
    pub start: f64,
    /// Length of the clip, in seconds.
    pub duration: f64,
    /// Playback options applied when the marker is played.
    pub config: SoundConfig,
}

/// Abstraction over per-backend sound instances.
/// Implementations: SilentSound (headless), MockSound (testing).
///
/// The manager only ever drives a sound through this trait; it never
/// inspects backend internals. Implementations must not call back into the
/// manager from these methods: `sounds` is traversed without locking on the
/// assumption that membership is stable for the duration of one fan-out.
pub trait Sound {
    /// Manager-assigned handle.
    fn id(&self) -> SoundId;

    /// Asset key this sound is bound to.
    fn key(&self) -> &str;

    /// Advance time-driven state (marker position, scheduled stops). Called
    /// once per host tick, only from the manager's own update fan-out.
    fn update(&mut self, time: f64, delta: f64);

    /// Recompute the effective playback rate from the global parameters and
    /// this sound's own rate/detune. Called by the manager whenever the
    /// global rate or detune changes.
    fn set_rate(&mut self, globals: &AudioParams);

    /// Register a named sub-clip. Returns `false` if the name is already
    /// taken on this sound.
    fn add_marker(&mut self, marker: Marker) -> bool;

    /// Sprite map this sound was expanded from, if any.
    fn spritemap(&self) -> Option<&SpriteMap>;

    /// Attach the sprite map the markers were generated from.
    fn set_spritemap(&mut self, map: SpriteMap);

    fn pause(&mut self);

    fn resume(&mut self);

    fn stop(&mut self);

    /// Release backend resources. The manager drops the instance right
    /// after, so no method is called again once this runs.
    fn destroy(&mut self);
}
