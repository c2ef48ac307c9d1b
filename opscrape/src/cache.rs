use derive_more::{Display, From};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};

/// Instruction name as it appears in the wiki's page paths, e.g. `ADC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
pub struct Mnemonic(String);

impl Mnemonic {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ADC.html` => `ADC`; everything after the first `.` is dropped.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name.split('.').next() {
            Some(stem) if !stem.is_empty() => Some(Mnemonic(stem.to_owned())),
            _ => None,
        }
    }
}

impl From<&str> for Mnemonic {
    fn from(s: &str) -> Self {
        Mnemonic(s.to_owned())
    }
}

#[derive(Debug, Clone)]
pub struct CachedPage {
    pub mnemonic: Mnemonic,
    pub html: String,
}

/// One `<mnemonic>.html` file per instruction page.
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CacheDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, mnemonic: &Mnemonic) -> PathBuf {
        self.root.join(format!("{}.html", mnemonic))
    }

    /// Overwrites whatever was cached for `mnemonic` before.
    pub fn store(&self, mnemonic: &Mnemonic, html: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(ScrapeError::io(&self.root))?;
        let path = self.path_for(mnemonic);
        fs::write(&path, html.as_bytes()).map_err(ScrapeError::io(&path))?;
        debug!(path = %path.display(), len = html.len(), "stored page");
        Ok(path)
    }

    /// All cached pages, ordered by file name.
    pub fn load(&self) -> Result<Vec<CachedPage>> {
        let mut files = Vec::new();
        for dirent in fs::read_dir(&self.root).map_err(ScrapeError::io(&self.root))? {
            let dirent = dirent.map_err(ScrapeError::io(&self.root))?;
            let path = dirent.path();
            let file_type = dirent.file_type().map_err(ScrapeError::io(&path))?;
            if !file_type.is_file() {
                continue;
            }
            files.push((dirent.file_name().to_string_lossy().into_owned(), path));
        }
        files.sort();

        let mut pages = Vec::with_capacity(files.len());
        for (name, path) in files {
            let mnemonic = match Mnemonic::from_file_name(&name) {
                Some(m) => m,
                None => {
                    warn!(file = %name, "skipping file without identifier");
                    continue;
                }
            };
            let html = fs::read_to_string(&path).map_err(ScrapeError::io(&path))?;
            pages.push(CachedPage { mnemonic, html });
        }
        Ok(pages)
    }
}
