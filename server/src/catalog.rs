//! The song catalog: short numeric codes for every playable song.
//!
//! Codes are assigned after deduplicating and sorting by (artist, title), so
//! the same CSV and filter always produce the same codes.
use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogSong {
    pub artist: String,
    pub title: String,
}

impl CatalogSong {
    /// The label queued for this song.
    pub fn label(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub delimiter: u8,
    /// Skip the first physical line (the `sep=` hint in song manager exports).
    pub skip_first_line: bool,
    /// Keep only rows whose arrangements mention one of these.
    pub instruments: Vec<String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            skip_first_line: false,
            instruments: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Artist", default)]
    artist: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Arrangements", default)]
    arrangements: String,
}

impl CatalogRow {
    fn matches(&self, instruments: &[String]) -> bool {
        instruments.is_empty()
            || instruments
                .iter()
                .any(|instrument| self.arrangements.contains(instrument.as_str()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    // code n lives at index n - 1
    songs: Vec<CatalogSong>,
}

impl Catalog {
    pub fn from_path(path: impl AsRef<Path>, options: &CatalogOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "[!] song list {} not found, catalog is empty",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let catalog = Self::from_csv(&raw, options)?;
        info!("[+] loaded {} songs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_csv(raw: &str, options: &CatalogOptions) -> Result<Self> {
        let body = if options.skip_first_line {
            raw.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
        } else {
            raw
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut unique = BTreeSet::new();
        for row in reader.deserialize::<CatalogRow>() {
            let row = row?;
            if row.matches(&options.instruments) {
                unique.insert(CatalogSong {
                    artist: row.artist,
                    title: row.title,
                });
            }
        }

        Ok(Self {
            songs: unique.into_iter().collect(),
        })
    }

    pub fn lookup(&self, code: u32) -> Option<String> {
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        self.songs.get(idx).map(CatalogSong::label)
    }

    pub fn songs(&self) -> &[CatalogSong] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
