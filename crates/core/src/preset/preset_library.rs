use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use super::preset::Preset;

/// Fixed set of preset slots plus the one currently selected
#[derive(Clone, Debug, PartialEq)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
    selected: usize,
}

/// On-disk format
#[derive(Serialize, Deserialize)]
struct PresetFile {
    version: String,
    #[serde(default)]
    selected: usize,
    presets: Vec<Preset>,
}

impl PresetLibrary {
    /// `count` empty slots; a library always holds at least one
    pub fn new(count: usize) -> Self {
        let presets = (0..count.max(1))
            .map(|i| Preset::new(format!("Preset {}", i)))
            .collect();

        Self {
            presets,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select a slot, clamping out of range requests to the first or last slot
    pub fn select(&mut self, index: i32) {
        let last = self.presets.len() - 1;
        self.selected = usize::try_from(index).map_or(0, |i| i.min(last));
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Preset> {
        self.presets.get_mut(index)
    }

    /// Write every slot as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if parent != Path::new("") && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let preset_file = PresetFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            selected: self.selected,
            presets: self.presets.clone(),
        };
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, &preset_file)
            .with_context(|| format!("writing {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flushing {}", path.display()))?;

        log::debug!("Saved {} presets to {}", self.presets.len(), path.display());
        Ok(())
    }

    /// Load a preset file, padding or truncating it to `count` slots
    pub fn load(path: &Path, count: usize) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let preset_file: PresetFile = from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;

        let mut library = Self::new(count);
        for (slot, preset) in library.presets.iter_mut().zip(preset_file.presets) {
            *slot = preset;
        }
        library.selected = preset_file.selected.min(library.presets.len() - 1);

        Ok(library)
    }
}
