use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use cardcompare_common::error::{CompareError, CompareResult};
use cardcompare_common::storage::DurableStorage;
use directories::ProjectDirs;

/// Durable storage backed by a directory: each key is a `<key>.json` file.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The per-user data directory, e.g. `~/.local/share/cardcompare` on Linux.
    pub fn default_dir() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "cardcompare")
            .context("could not determine a home directory for the state dir")?;
        Ok(dirs.data_dir().to_path_buf())
    }

    fn path_for(&self, key: &str) -> CompareResult<PathBuf> {
        let key: &str = key.trim();
        if key.is_empty() {
            return Err(CompareError::Storage("storage key is empty".to_string()));
        }
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        Ok(self.dir.join(format!("{file}.json")))
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path: PathBuf = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value: String =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path: PathBuf = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        // Write to a sibling then rename, so a crash never leaves half a file.
        let tmp: PathBuf = path.with_extension("tmp");
        fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}
