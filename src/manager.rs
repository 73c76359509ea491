use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::backend::SoundBackend;
use crate::cache::{JsonCache, SpriteMap};
use crate::config::SoundConfig;
use crate::events::{EventQueue, SoundEvent};
use crate::params::AudioParams;
use crate::sound::{Marker, Sound, SoundId};

/// Whether the host window currently has user attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Focused,
    Blurred,
}

/// The shared control layer over a pluggable audio backend.
///
/// Owns the registry of tracked sounds, the global playback parameters, the
/// focus lifecycle, and the per-frame update fan-out. Instance creation is
/// delegated to the backend; the manager never inspects a sound beyond the
/// [`Sound`] trait.
///
/// All operations run synchronously to completion on the host thread. The
/// registry is never mutated during a fan-out traversal, so no locking is
/// needed; sounds must not call back into the manager (see [`Sound`]).
pub struct SoundManager<B: SoundBackend> {
    backend: B,
    /// Tracked sounds in creation order.
    sounds: Vec<B::Sound>,
    params: AudioParams,
    /// When true, all sounds are paused on host blur and resumed on focus.
    /// Evaluated at notification time, so it can be toggled at any point.
    pub pause_on_blur: bool,
    focus: FocusState,
    destroyed: bool,
    next_id: u64,
    /// The manager's own event channel, independent of the host's.
    pub events: EventQueue,
    sprite_maps: JsonCache<SpriteMap>,
}

impl<B: SoundBackend> SoundManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sounds: Vec::new(),
            params: AudioParams::default(),
            pause_on_blur: true,
            focus: FocusState::Focused,
            destroyed: false,
            next_id: 1,
            events: EventQueue::new(),
            sprite_maps: JsonCache::new(),
        }
    }

    fn alloc_id(&mut self) -> SoundId {
        let id = self.next_id;
        self.next_id += 1;
        SoundId(id)
    }

    fn track(&mut self, mut sound: B::Sound) -> SoundId {
        // New sounds pick up the current global rate/detune immediately.
        sound.set_rate(&self.params);
        let id = sound.id();
        let key = sound.key().to_string();
        self.sounds.push(sound);
        debug!("Sound added: {:?} ({key})", id);
        self.events.emit(SoundEvent::Added { id, key });
        id
    }

    /// Create a sound bound to the asset `key` and append it to the
    /// registry.
    pub fn add(&mut self, key: &str, config: SoundConfig) -> Result<SoundId> {
        if self.destroyed {
            return Err(anyhow!("Sound manager already destroyed"));
        }
        let id = self.alloc_id();
        let sound = self.backend.create(id, key, &config)?;
        Ok(self.track(sound))
    }

    /// Create a sound from a sprite-sheet asset, registering one marker per
    /// sprite-map entry.
    ///
    /// The sprite map must already be cached under `key` (see
    /// [`SoundManager::sprite_maps_mut`]); this is the one operation that
    /// fails loudly when the asset lookup comes back empty. The returned
    /// sound ends up in the same state as if each marker had been added
    /// individually, in map-enumeration order.
    pub fn add_audio_sprite(&mut self, key: &str, config: SoundConfig) -> Result<SoundId> {
        let map = self
            .sprite_maps
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("No sprite map cached for key '{key}'"))?;
        let id = self.add(key, config.clone())?;
        if let Some(sound) = self.sounds.last_mut() {
            sound.set_spritemap(map.clone());
            for (name, entry) in &map {
                sound.add_marker(Marker {
                    name: name.clone(),
                    start: entry.start,
                    duration: entry.end - entry.start,
                    config: config.clone(),
                });
            }
        }
        Ok(id)
    }

    /// Create a synthetic oscillator source at `frequency` Hz.
    pub fn add_oscillator(&mut self, frequency: f64, config: SoundConfig) -> Result<SoundId> {
        if self.destroyed {
            return Err(anyhow!("Sound manager already destroyed"));
        }
        let id = self.alloc_id();
        let sound = self.backend.add_oscillator(id, frequency, &config)?;
        Ok(self.track(sound))
    }

    /// Remove one sound from the registry, releasing its backend resources.
    /// Returns `false` if the id is not tracked. Removed sounds are never
    /// visited by later fan-outs.
    pub fn remove(&mut self, id: SoundId) -> bool {
        let Some(index) = self.sounds.iter().position(|s| s.id() == id) else {
            warn!("Remove requested for untracked sound {:?}", id);
            return false;
        };
        let mut sound = self.sounds.remove(index);
        let key = sound.key().to_string();
        sound.destroy();
        debug!("Sound removed: {:?} ({key})", id);
        self.events.emit(SoundEvent::Removed { id, key });
        true
    }

    /// Remove every sound bound to the asset `key`. Returns how many were
    /// removed.
    pub fn remove_by_key(&mut self, key: &str) -> usize {
        let mut removed = Vec::new();
        self.sounds.retain_mut(|sound| {
            if sound.key() == key {
                sound.destroy();
                removed.push(sound.id());
                false
            } else {
                true
            }
        });
        for id in &removed {
            debug!("Sound removed: {:?} ({key})", id);
            self.events.emit(SoundEvent::Removed {
                id: *id,
                key: key.to_string(),
            });
        }
        removed.len()
    }

    /// Pause every sound currently tracked. Sounds added afterwards are
    /// unaffected.
    pub fn pause_all(&mut self) {
        for sound in &mut self.sounds {
            sound.pause();
        }
        self.events.emit(SoundEvent::PauseAll);
    }

    /// Resume every sound currently tracked.
    pub fn resume_all(&mut self) {
        for sound in &mut self.sounds {
            sound.resume();
        }
        self.events.emit(SoundEvent::ResumeAll);
    }

    /// Stop every sound currently tracked.
    pub fn stop_all(&mut self) {
        for sound in &mut self.sounds {
            sound.stop();
        }
        self.events.emit(SoundEvent::StopAll);
    }

    /// Global playback rate.
    pub fn rate(&self) -> f64 {
        self.params.rate
    }

    /// Set the global playback rate and have every tracked sound recompute
    /// its effective rate before returning.
    pub fn set_rate(&mut self, value: f64) {
        self.params.rate = value;
        for sound in &mut self.sounds {
            sound.set_rate(&self.params);
        }
    }

    /// Global detune in cents.
    pub fn detune(&self) -> f64 {
        self.params.detune
    }

    /// Set the global detune and have every tracked sound recompute its
    /// effective rate before returning.
    pub fn set_detune(&mut self, value: f64) {
        self.params.detune = value;
        for sound in &mut self.sounds {
            sound.set_rate(&self.params);
        }
    }

    pub fn mute(&self) -> bool {
        self.params.mute
    }

    /// Set the global mute flag. Read by the backend at mix time; no
    /// per-sound fan-out happens here.
    pub fn set_mute(&mut self, mute: bool) {
        self.params.mute = mute;
    }

    pub fn volume(&self) -> f64 {
        self.params.volume
    }

    /// Set the global volume multiplier. Read by the backend at mix time; no
    /// per-sound fan-out happens here.
    pub fn set_volume(&mut self, volume: f64) {
        self.params.volume = volume;
    }

    pub fn pan(&self) -> f64 {
        self.params.pan
    }

    /// Set the global pan. Read by the backend at mix time; no per-sound
    /// fan-out happens here.
    pub fn set_pan(&mut self, pan: f64) {
        self.params.pan = pan;
    }

    /// Snapshot of all global parameters, for backends that read them at
    /// render time.
    pub fn params(&self) -> &AudioParams {
        &self.params
    }

    /// Advance every tracked sound once per host tick, in creation order.
    /// The manager holds no notion of elapsed time beyond passing it along.
    pub fn update(&mut self, time: f64, delta: f64) {
        for sound in &mut self.sounds {
            sound.update(time, delta);
        }
    }

    /// Handler for the host's focus notifications; wire it to the host's
    /// window-focus event (e.g. winit's `WindowEvent::Focused`).
    ///
    /// Transitions only fire while `pause_on_blur` is set: blur pauses all
    /// sounds, the matching focus resumes them. Detached by [`destroy`].
    ///
    /// [`destroy`]: SoundManager::destroy
    pub fn on_focus_changed(&mut self, focused: bool) {
        if self.destroyed {
            return;
        }
        match (self.focus, focused) {
            (FocusState::Focused, false) if self.pause_on_blur => {
                self.focus = FocusState::Blurred;
                self.on_blur();
            }
            (FocusState::Blurred, true) if self.pause_on_blur => {
                self.focus = FocusState::Focused;
                self.on_focus();
            }
            _ => {}
        }
    }

    fn on_blur(&mut self) {
        debug!("Host blurred, pausing {} sounds", self.sounds.len());
        self.pause_all();
    }

    fn on_focus(&mut self) {
        debug!("Host focused, resuming {} sounds", self.sounds.len());
        self.resume_all();
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    /// Release every tracked sound and detach focus handling. Idempotent;
    /// the manager produces no further side effects afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!("Destroying sound manager ({} sounds)", self.sounds.len());
        for sound in &mut self.sounds {
            sound.stop();
            sound.destroy();
        }
        self.sounds.clear();
        self.destroyed = true;
        self.events.emit(SoundEvent::Destroyed);
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn sound(&self, id: SoundId) -> Option<&B::Sound> {
        self.sounds.iter().find(|s| s.id() == id)
    }

    pub fn sound_mut(&mut self, id: SoundId) -> Option<&mut B::Sound> {
        self.sounds.iter_mut().find(|s| s.id() == id)
    }

    /// Tracked sounds in creation order.
    pub fn sounds(&self) -> impl Iterator<Item = &B::Sound> {
        self.sounds.iter()
    }

    /// Sprite-map cache, populated by the host's asset loader before
    /// [`add_audio_sprite`] is called.
    ///
    /// [`add_audio_sprite`]: SoundManager::add_audio_sprite
    pub fn sprite_maps(&self) -> &JsonCache<SpriteMap> {
        &self.sprite_maps
    }

    pub fn sprite_maps_mut(&mut self) -> &mut JsonCache<SpriteMap> {
        &mut self.sprite_maps
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
