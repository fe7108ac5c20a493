use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::models::request_entry::RequestEntry;
use crate::store::QueueStore;

/// Keeps the queue as a JSON array of entry tuples.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl QueueStore for JsonFileStore {
    fn load(&self) -> Result<Vec<RequestEntry>> {
        if !self.path.exists() {
            info!(
                "[-] no queue file at {}, starting with an empty queue",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let entries: Vec<RequestEntry> = serde_json::from_reader(reader)?;
        info!(
            "[+] restored {} requests from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    fn save(&self, entries: &[RequestEntry]) -> Result<()> {
        // write next to the target so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, entries)?;
            writer.flush()?;
        }
        tmp.persist(&self.path)?;
        debug!(
            "[-] saved {} requests to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
