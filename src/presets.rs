//! Named exclusion-list presets.
//!
//! A preset pairs a name with the raw `bad_song_indices` to skip. Stored
//! values stay raw: the store never validates, the corpus validator does
//! that at analysis time against the corpus actually being queried.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::exclusions::ExclusionList;

/// Persistent storage for named exclusion lists.
pub trait PresetStore {
    /// Fetch the exclusion list saved under `name`.
    fn load(&self, name: &str) -> Result<ExclusionList>;

    /// Save `list` under `name`, replacing any existing preset with the
    /// same name.
    fn save(&mut self, name: &str, list: &ExclusionList) -> Result<()>;

    /// Names of every stored preset, in storage order.
    fn names(&self) -> Result<Vec<String>>;

    /// Remove the preset saved under `name`.
    fn delete(&mut self, name: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PresetRecord {
    name: String,
    bad_song_indices: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PresetFile {
    presets: Vec<PresetRecord>,
}

/// [`PresetStore`] backed by a single JSON file.
///
/// File shape: `{ "presets": [{ "name": ..., "bad_song_indices": [...] }] }`.
/// A missing file reads as an empty store and is created on first save.
#[derive(Debug)]
pub struct JsonPresetStore {
    path: PathBuf,
}

impl JsonPresetStore {
    /// Open a store at `path`. The file is not touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<PresetFile> {
        if !self.path.exists() {
            return Ok(PresetFile::default());
        }
        let raw = fs_err::read_to_string(&self.path)
            .map_err(|e| Error::io(e, self.path.clone()))?;
        serde_json::from_str(&raw).map_err(|e| Error::preset_parse(e, self.path.clone()))
    }

    fn write_file(&self, file: &PresetFile) -> Result<()> {
        let raw = serde_json::to_string_pretty(file)
            .map_err(|e| Error::preset_parse(e, self.path.clone()))?;
        fs_err::write(&self.path, raw).map_err(|e| Error::io(e, self.path.clone()))
    }
}

impl PresetStore for JsonPresetStore {
    fn load(&self, name: &str) -> Result<ExclusionList> {
        let file = self.read_file()?;
        file.presets
            .into_iter()
            .find(|preset| preset.name == name)
            .map(|preset| ExclusionList(preset.bad_song_indices))
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    fn save(&mut self, name: &str, list: &ExclusionList) -> Result<()> {
        let mut file = self.read_file()?;
        let record = PresetRecord {
            name: name.to_string(),
            bad_song_indices: list.0.clone(),
        };
        if let Some(existing) = file.presets.iter_mut().find(|preset| preset.name == name) {
            debug!(name, "replacing preset");
            *existing = record;
        } else {
            file.presets.push(record);
        }
        self.write_file(&file)
    }

    fn names(&self) -> Result<Vec<String>> {
        let file = self.read_file()?;
        Ok(file.presets.into_iter().map(|preset| preset.name).collect())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let mut file = self.read_file()?;
        let before = file.presets.len();
        file.presets.retain(|preset| preset.name != name);
        if file.presets.len() == before {
            return Err(Error::UnknownPreset(name.to_string()));
        }
        self.write_file(&file)
    }
}
