/// Global playback parameters shared by every tracked sound.
///
/// `rate` and `detune` writes on the manager fan out to each sound so cached
/// pitch calculations stay current; `mute`, `volume` and `pan` are read
/// lazily by the backend at mix time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioParams {
    /// Global silencing flag, independent of per-sound mute.
    pub mute: bool,
    /// Gain multiplier, combined multiplicatively with per-sound volume.
    pub volume: f64,
    /// Playback-speed multiplier. 1.0 is full speed, 0.5 half, 2.0 double.
    pub rate: f64,
    /// Pitch offset in cents, conventionally within -1200..=1200.
    pub detune: f64,
    /// Stereo pan, -1.0 (full left) to 1.0 (full right).
    pub pan: f64,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            mute: false,
            volume: 1.0,
            rate: 1.0,
            detune: 0.0,
            pan: 0.0,
        }
    }
}

impl AudioParams {
    /// Combine the global rate/detune with a sound's own rate/detune into
    /// the effective playback rate:
    /// `(sound_rate * rate) * 2^((sound_detune + detune) / 1200)`.
    pub fn effective_rate(&self, sound_rate: f64, sound_detune: f64) -> f64 {
        let cents = self.detune + sound_detune;
        (self.rate * sound_rate) * 2.0_f64.powf(cents / 1200.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let params = AudioParams::default();
        assert!(!params.mute);
        assert!((params.volume - 1.0).abs() < f64::EPSILON);
        assert!((params.rate - 1.0).abs() < f64::EPSILON);
        assert!(params.detune.abs() < f64::EPSILON);
        assert!(params.pan.abs() < f64::EPSILON);
    }

    #[test]
    fn effective_rate_multiplies_rates() {
        let params = AudioParams {
            rate: 2.0,
            ..Default::default()
        };
        assert!((params.effective_rate(0.5, 0.0) - 1.0).abs() < 1e-9);
        assert!((params.effective_rate(1.5, 0.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn effective_rate_detune_in_cents() {
        let params = AudioParams::default();
        // +1200 cents is one octave up, -1200 one octave down.
        assert!((params.effective_rate(1.0, 1200.0) - 2.0).abs() < 1e-9);
        assert!((params.effective_rate(1.0, -1200.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn effective_rate_combines_global_and_sound_detune() {
        let params = AudioParams {
            detune: 600.0,
            ..Default::default()
        };
        assert!((params.effective_rate(1.0, 600.0) - 2.0).abs() < 1e-9);
    }
}
