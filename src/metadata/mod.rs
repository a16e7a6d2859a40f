//! Codepoint metadata persistence
//!
//! The JSON record that makes code points survive regeneration. It is
//! read before enumeration and rewritten only after every artifact has
//! been produced, so a failed run leaves the previous record intact.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Persisted name → code point record
///
/// `count` is the number of icons as of the last successful run and seeds
/// the allocation counter; it is recomputed from the mapping on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
}

impl MetadataRecord {
    /// Load the record from disk.
    ///
    /// An absent file is an empty record; unreadable or malformed content
    /// is a fatal error, since regenerating over a half-understood record
    /// would reassign code points.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No metadata record at {:?}, starting fresh", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata record {}", path.display()))?;
        let record = serde_json::from_str(&contents)
            .with_context(|| format!("malformed metadata record {}", path.display()))?;

        debug!("Loaded metadata record from {:?}", path);
        Ok(record)
    }

    /// Build the record to persist from the run's final mapping.
    ///
    /// `count` is the exact size of the mapping, not the allocator's
    /// running counter.
    pub fn from_mapping(icons: BTreeMap<String, String>) -> Self {
        Self {
            count: icons.len() as u32,
            icons,
        }
    }

    /// The counter value new allocations start from.
    ///
    /// Mirrors the stored count, floored at 1 so an empty or zeroed
    /// record starts numbering at E001. Wider than the stored field so
    /// the counter can advance past any stored value without wrapping.
    pub fn seed(&self) -> u64 {
        u64::from(self.count).max(1)
    }

    /// Write the record to disk, replacing any previous one.
    ///
    /// Written to a temporary file in the destination directory and
    /// renamed into place, so a crash mid-write cannot leave a truncated
    /// record behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create metadata directory {}", parent.display())
                })?;
                parent.to_path_buf()
            }
            _ => std::path::PathBuf::from("."),
        };

        let contents = serde_json::to_string_pretty(self)?;
        let mut file = NamedTempFile::new_in(&parent)
            .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
        file.write_all(contents.as_bytes())?;
        file.persist(path)
            .with_context(|| format!("failed to replace metadata record {}", path.display()))?;

        debug!("Saved metadata record to {:?}", path);
        Ok(())
    }
}
