//! Test utilities: a mock backend whose sounds record every call the
//! manager makes, in order, into a shared log.

pub mod mock {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::Result;

    use crate::backend::SoundBackend;
    use crate::cache::SpriteMap;
    use crate::config::SoundConfig;
    use crate::params::AudioParams;
    use crate::sound::{Marker, Sound, SoundId};

    /// One recorded call against a mock sound.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Created { id: u64, key: String },
        Updated { id: u64, time: f64, delta: f64 },
        RateRecalc { id: u64 },
        Paused(u64),
        Resumed(u64),
        Stopped(u64),
        Destroyed(u64),
    }

    /// Call log shared between a `MockBackend` and all sounds it creates,
    /// so calls stay observable after a sound is removed from the manager.
    pub type CallLog = Rc<RefCell<Vec<Call>>>;

    #[derive(Default)]
    pub struct MockBackend {
        log: CallLog,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn log(&self) -> CallLog {
            Rc::clone(&self.log)
        }
    }

    impl SoundBackend for MockBackend {
        type Sound = MockSound;

        fn create(&mut self, id: SoundId, key: &str, config: &SoundConfig) -> Result<Self::Sound> {
            self.log.borrow_mut().push(Call::Created {
                id: id.0,
                key: key.to_string(),
            });
            Ok(MockSound::new(id, key, config.clone(), Rc::clone(&self.log)))
        }

        fn add_oscillator(
            &mut self,
            id: SoundId,
            frequency: f64,
            config: &SoundConfig,
        ) -> Result<Self::Sound> {
            self.create(id, &format!("oscillator:{frequency}"), config)
        }
    }

    pub struct MockSound {
        id: SoundId,
        key: String,
        pub config: SoundConfig,
        /// Markers in registration order.
        pub markers: Vec<Marker>,
        pub spritemap: Option<SpriteMap>,
        /// Globals seen by the most recent `set_rate` call.
        pub last_globals: Option<AudioParams>,
        log: CallLog,
    }

    impl MockSound {
        fn new(id: SoundId, key: &str, config: SoundConfig, log: CallLog) -> Self {
            Self {
                id,
                key: key.to_string(),
                config,
                markers: Vec::new(),
                spritemap: None,
                last_globals: None,
                log,
            }
        }

        pub fn marker(&self, name: &str) -> Option<&Marker> {
            self.markers.iter().find(|m| m.name == name)
        }
    }

    impl Sound for MockSound {
        fn id(&self) -> SoundId {
            self.id
        }

        fn key(&self) -> &str {
            &self.key
        }

        fn update(&mut self, time: f64, delta: f64) {
            self.log.borrow_mut().push(Call::Updated {
                id: self.id.0,
                time,
                delta,
            });
        }

        fn set_rate(&mut self, globals: &AudioParams) {
            self.last_globals = Some(*globals);
            self.log.borrow_mut().push(Call::RateRecalc { id: self.id.0 });
        }

        fn add_marker(&mut self, marker: Marker) -> bool {
            if self.markers.iter().any(|m| m.name == marker.name) {
                return false;
            }
            self.markers.push(marker);
            true
        }

        fn spritemap(&self) -> Option<&SpriteMap> {
            self.spritemap.as_ref()
        }

        fn set_spritemap(&mut self, map: SpriteMap) {
            self.spritemap = Some(map);
        }

        fn pause(&mut self) {
            self.log.borrow_mut().push(Call::Paused(self.id.0));
        }

        fn resume(&mut self) {
            self.log.borrow_mut().push(Call::Resumed(self.id.0));
        }

        fn stop(&mut self) {
            self.log.borrow_mut().push(Call::Stopped(self.id.0));
        }

        fn destroy(&mut self) {
            self.log.borrow_mut().push(Call::Destroyed(self.id.0));
        }
    }

    /// Count log entries matching a predicate.
    pub fn count(log: &CallLog, pred: impl Fn(&Call) -> bool) -> usize {
        log.borrow().iter().filter(|c| pred(*c)).count()
    }
}
