//! Session files: the key/value store persisted as a JSON object on disk.
//!
//! Paths ending in `.gz` are gzip-compressed. A missing file reads as an empty
//! store, so the first command against a new path starts from scratch.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use polyedit_core::{session, MemoryStore, Store};

/// A [`MemoryStore`] loaded from, and saved back to, a file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

fn is_gz(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("{} does not exist, starting empty", path.display());
            return Ok(FileStore { path, inner: MemoryStore::new() });
        }
        let file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader: Box<dyn Read> = if is_gz(&path) {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let inner: MemoryStore = if text.trim().is_empty() {
            MemoryStore::new()
        } else {
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse session file {}", path.display()))?
        };
        debug!("opened {} with {} keys", path.display(), inner.entries.len());
        Ok(FileStore { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        let writer = BufWriter::new(file);
        let mut writer = if is_gz(&self.path) {
            self.write_json(GzEncoder::new(writer, Compression::default()))?
                .finish()
                .with_context(|| format!("Failed to compress {}", self.path.display()))?
        } else {
            self.write_json(writer)?
        };
        writer.flush()?;
        debug!("saved {}", self.path.display());
        Ok(())
    }

    fn write_json<W: Write>(&self, mut writer: W) -> Result<W> {
        serde_json::to_writer_pretty(&mut writer, &self.inner)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        writeln!(writer)?;
        Ok(writer)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> session::Result<Option<String>> {
        self.inner.get(key)
    }
    fn set(&mut self, key: &str, value: &str) -> session::Result<()> {
        self.inner.set(key, value)
    }
    fn remove(&mut self, key: &str) -> session::Result<()> {
        self.inner.remove(key)
    }
}
