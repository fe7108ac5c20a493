use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::mirror::MirrorSink;
use crate::models::request_entry::RequestEntry;
use crate::render::{self, Document};
use crate::store::QueueStore;

/// Outcome of a queue operation, relayed to whoever asked.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueStatus {
    Enqueued { requestee: String, song: String },
    Updated { requestee: String, song: String },
    Promoted { actor: String, requestee: String },
    NotFound { actor: String, requestee: String },
    EmptyQueue,
    NoLongerQueued { song: String },
    NowPlaying { song: String, requestee: String },
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueStatus::Enqueued { requestee, song } => write!(
                f,
                "@{}: your request for {} is in the queue.",
                requestee, song
            ),
            QueueStatus::Updated { requestee, song } => {
                write!(f, "@{}: your request was updated to {}", requestee, song)
            }
            QueueStatus::Promoted { actor, requestee } => write!(
                f,
                "@{}: the request from {} is now prioritized",
                actor, requestee
            ),
            QueueStatus::NotFound { actor, requestee } => {
                write!(f, "@{}: {} has no request in the queue", actor, requestee)
            }
            QueueStatus::EmptyQueue => write!(f, "Queue is empty, sad."),
            QueueStatus::NoLongerQueued { song } => {
                write!(f, "{} is not in the queue (anymore). Oops.", song)
            }
            QueueStatus::NowPlaying { song, requestee } => {
                write!(f, "Next song: {} requested by {}", song, requestee)
            }
        }
    }
}

/// The live request queue.
///
/// Holds every request in canonical order (see
/// [`RequestEntry::canonical_cmp`]) with at most one entry per requestee and
/// at most one active entry. Each mutation is followed by a save to the
/// store and a fresh rendering pushed to the mirror. Failures of either are
/// logged and never undo the in-memory change.
pub struct RequestQueue {
    entries: Vec<RequestEntry>,
    store: Box<dyn QueueStore>,
    mirror: Box<dyn MirrorSink>,
    document: Document,
}

impl RequestQueue {
    pub fn new(
        store: Box<dyn QueueStore>,
        mut mirror: Box<dyn MirrorSink>,
        document: Document,
    ) -> Result<Self> {
        let mut entries = store.load()?;
        entries.sort_by(RequestEntry::canonical_cmp);
        let entries = drop_conflicting(entries);

        let rendered = render::queue_markdown(&document, &entries);
        match mirror.publish(&rendered) {
            Ok(url) if !url.is_empty() => info!("[+] queue mirrored at {}", url),
            Ok(_) => debug!("[-] queue mirror has no public address"),
            Err(e) => error!("[!] failed to publish queue mirror: {}", e),
        }

        Ok(Self {
            entries,
            store,
            mirror,
            document,
        })
    }

    pub fn submit(&mut self, song: &str, requestee: &str) -> QueueStatus {
        self.submit_at(song, requestee, now())
    }

    /// `submit` with an explicit submission time for new requests.
    pub fn submit_at(&mut self, song: &str, requestee: &str, timestamp: f64) -> QueueStatus {
        let status = match self.index_of(requestee) {
            Some(idx) => {
                let replacement = self.entries[idx].with_song(song);
                self.entries.remove(idx);
                self.entries.push(replacement);
                QueueStatus::Updated {
                    requestee: requestee.to_string(),
                    song: song.to_string(),
                }
            }
            None => {
                self.entries
                    .push(RequestEntry::new(song, requestee, timestamp));
                QueueStatus::Enqueued {
                    requestee: requestee.to_string(),
                    song: song.to_string(),
                }
            }
        };

        self.sort();
        info!("[+] {}", status);
        self.persist();
        status
    }

    pub fn promote(&mut self, requestee: &str, actor: &str) -> QueueStatus {
        let Some(idx) = self.index_of(requestee) else {
            let status = QueueStatus::NotFound {
                actor: actor.to_string(),
                requestee: requestee.to_string(),
            };
            info!("[-] {}", status);
            return status;
        };

        let promoted = self.entries.remove(idx).elevated();
        self.entries.push(promoted);
        self.sort();
        self.persist();

        let status = QueueStatus::Promoted {
            actor: actor.to_string(),
            requestee: requestee.to_string(),
        };
        info!("[+] {}", status);
        status
    }

    /// 1-based position of the requestee's entry.
    pub fn position_of(&self, requestee: &str) -> Option<usize> {
        self.index_of(requestee).map(|idx| idx + 1)
    }

    /// Retire the active song, if any, and make `target` the active one.
    ///
    /// `target` is matched structurally, so a selection that went stale
    /// (edited, promoted or already removed) is reported instead of applied.
    pub fn advance(&mut self, target: &RequestEntry) -> QueueStatus {
        if self.entries.is_empty() {
            info!("[-] advance requested on an empty queue");
            return QueueStatus::EmptyQueue;
        }

        if let Some(active_idx) = self.entries.iter().position(RequestEntry::is_active) {
            let finished = self.entries.remove(active_idx);
            debug!("[-] finished playing {}", finished);
            if self.entries.is_empty() {
                info!("[-] queue ran empty after {}", finished);
                self.persist();
                return QueueStatus::EmptyQueue;
            }
        }

        let Some(target_idx) = self.entries.iter().position(|entry| entry == target) else {
            let status = QueueStatus::NoLongerQueued {
                song: target.song.clone(),
            };
            warn!("[!] {}", status);
            self.persist();
            return status;
        };

        let active = self.entries.remove(target_idx).activated();
        self.entries.push(active);
        self.sort();
        self.persist();

        let status = QueueStatus::NowPlaying {
            song: target.song.clone(),
            requestee: target.requestee.clone(),
        };
        info!("[+] {}", status);
        status
    }

    pub fn first(&self) -> Option<&RequestEntry> {
        self.entries.first()
    }

    pub fn get(&self, index: usize) -> Option<&RequestEntry> {
        self.entries.get(index)
    }

    pub fn entry_for(&self, requestee: &str) -> Option<&RequestEntry> {
        self.entries
            .iter()
            .find(|entry| entry.requestee == requestee)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[RequestEntry] {
        &self.entries
    }

    pub fn render(&self) -> String {
        render::queue_markdown(&self.document, &self.entries)
    }

    pub fn queue_url(&self) -> Option<String> {
        self.mirror.url()
    }

    fn index_of(&self, requestee: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.requestee == requestee)
    }

    fn sort(&mut self) {
        self.entries.sort_by(RequestEntry::canonical_cmp);
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.entries) {
            error!(
                "[!] failed to save queue ({} entries): {}",
                self.entries.len(),
                e
            );
        }

        let rendered = self.render();
        match self.mirror.update(&rendered) {
            Ok(true) => debug!("[-] queue mirror updated"),
            Ok(false) => warn!("[!] queue mirror rejected the update"),
            Err(e) => error!("[!] failed to update queue mirror: {}", e),
        }
    }
}

/// Keeps the first entry per requestee and the first active entry of a
/// sorted load.
fn drop_conflicting(entries: Vec<RequestEntry>) -> Vec<RequestEntry> {
    let mut seen = HashSet::new();
    let mut has_active = false;
    let mut kept = Vec::with_capacity(entries.len());

    for entry in entries {
        if !seen.insert(entry.requestee.clone()) {
            warn!(
                "[!] dropping duplicate request from stored queue: {}",
                entry
            );
            continue;
        }
        if entry.is_active() {
            if has_active {
                warn!(
                    "[!] dropping second active request from stored queue: {}",
                    entry
                );
                continue;
            }
            has_active = true;
        }
        kept.push(entry);
    }

    kept
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}
