use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One sprite-map entry: the time bounds of a named clip, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub start: f64,
    pub end: f64,
}

/// The name → `{start, end}` mapping describing all markers within one
/// audio asset.
pub type SpriteMap = HashMap<String, SpriteEntry>;

/// Wrapper format produced by audiosprite-style packing tools.
#[derive(Deserialize)]
struct SpriteSheetFile {
    spritemap: SpriteMap,
}

/// Parse sprite-map JSON, accepting either the audiosprite wrapper
/// (`{"spritemap": {...}}`) or the bare mapping.
pub fn parse_sprite_json(json: &str) -> Result<SpriteMap> {
    if let Ok(file) = serde_json::from_str::<SpriteSheetFile>(json) {
        return Ok(file.spritemap);
    }
    serde_json::from_str(json).context("invalid sprite map JSON")
}

/// Generic keyed cache for JSON-derived assets.
///
/// The manager retrieves sprite maps from here; the host's asset loader is
/// responsible for populating it before sprite expansion is requested.
#[derive(Debug, Default)]
pub struct JsonCache<T> {
    entries: HashMap<String, T>,
}

impl<T> JsonCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store an entry, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl JsonCache<SpriteMap> {
    /// Load a sprite-map JSON file and cache it under `key`.
    pub fn load_file(&mut self, key: &str, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sprite map: {}", path.display()))?;
        let map = parse_sprite_json(&content)
            .with_context(|| format!("Failed to parse sprite map: {}", path.display()))?;
        self.insert(key, map);
        Ok(())
    }
}
