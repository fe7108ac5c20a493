//! A single viewer's song request.
//!
//! Entries are never edited in place. Every change (new song, promotion,
//! becoming the active song) produces a replacement entry that the queue
//! swaps in before re-sorting.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// On-disk layout: `(waiting, prioritized, timestamp, song, requestee)`.
///
/// `prioritized` keeps the inverted polarity of the stored queue files:
/// `false` means elevated, `true` means normal.
pub type EntryTuple = (bool, bool, f64, String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    // declaration order is the sort order
    Elevated,
    Normal,
}

impl Priority {
    fn from_stored(prioritized: bool) -> Self {
        if prioritized {
            Priority::Normal
        } else {
            Priority::Elevated
        }
    }

    fn to_stored(self) -> bool {
        self == Priority::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryTuple", into = "EntryTuple")]
pub struct RequestEntry {
    pub waiting: bool,
    pub priority: Priority,
    pub timestamp: f64,
    pub song: String,
    pub requestee: String,
}

impl RequestEntry {
    /// A fresh request: waiting, normal priority.
    pub fn new(song: &str, requestee: &str, timestamp: f64) -> Self {
        Self {
            waiting: true,
            priority: Priority::Normal,
            timestamp,
            song: song.to_string(),
            requestee: requestee.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.waiting
    }

    pub fn is_elevated(&self) -> bool {
        self.priority == Priority::Elevated
    }

    /// Same request with a different song; position-relevant fields are kept.
    pub fn with_song(&self, song: &str) -> Self {
        Self {
            song: song.to_string(),
            ..self.clone()
        }
    }

    pub fn elevated(&self) -> Self {
        Self {
            priority: Priority::Elevated,
            ..self.clone()
        }
    }

    pub fn activated(&self) -> Self {
        Self {
            waiting: false,
            ..self.clone()
        }
    }

    /// Queue order: active before waiting, elevated before normal, older
    /// before newer. Song and requestee only break exact ties.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.waiting
            .cmp(&other.waiting)
            .then(self.priority.cmp(&other.priority))
            .then(self.timestamp.total_cmp(&other.timestamp))
            .then_with(|| self.song.cmp(&other.song))
            .then_with(|| self.requestee.cmp(&other.requestee))
    }
}

impl fmt::Display for RequestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} requested by {}", self.song, self.requestee)
    }
}

impl From<EntryTuple> for RequestEntry {
    fn from((waiting, prioritized, timestamp, song, requestee): EntryTuple) -> Self {
        Self {
            waiting,
            priority: Priority::from_stored(prioritized),
            timestamp,
            song,
            requestee,
        }
    }
}

impl From<RequestEntry> for EntryTuple {
    fn from(entry: RequestEntry) -> Self {
        (
            entry.waiting,
            entry.priority.to_stored(),
            entry.timestamp,
            entry.song,
            entry.requestee,
        )
    }
}
