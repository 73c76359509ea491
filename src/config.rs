use serde::{Deserialize, Serialize};

/// Per-sound creation options.
///
/// Backends are free to ignore options they cannot honor; every field has a
/// safe default so a sound is playable with `SoundConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Initial volume (0.0 - 1.0).
    pub volume: f64,
    /// Whether playback restarts from the beginning when it ends.
    pub looped: bool,
    /// Per-sound playback-speed multiplier.
    pub rate: f64,
    /// Per-sound pitch offset in cents.
    pub detune: f64,
    /// Stereo pan, -1.0 to 1.0.
    pub pan: f64,
    /// Per-sound mute, independent of the global flag.
    pub mute: bool,
    /// Playback start offset within the asset, in seconds.
    pub seek: f64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looped: false,
            rate: 1.0,
            detune: 0.0,
            pan: 0.0,
            mute: false,
            seek: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SoundConfig::default();
        assert!((config.volume - 1.0).abs() < f64::EPSILON);
        assert!((config.rate - 1.0).abs() < f64::EPSILON);
        assert!(!config.looped);
        assert!(!config.mute);
        assert!(config.seek.abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SoundConfig = serde_json::from_str(r#"{"volume": 0.5, "looped": true}"#).unwrap();
        assert!((config.volume - 0.5).abs() < f64::EPSILON);
        assert!(config.looped);
        assert!((config.rate - 1.0).abs() < f64::EPSILON);
        assert!(config.detune.abs() < f64::EPSILON);
    }

    #[test]
    fn roundtrips_through_json() {
        let config = SoundConfig {
            rate: 1.5,
            detune: -100.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SoundConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
