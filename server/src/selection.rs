//! How operators pick the next song. The queue itself only knows how to
//! advance to a given entry; these helpers choose that entry.
use rand::seq::IndexedRandom;

use crate::models::request_entry::RequestEntry;

/// The first entry still waiting, or the head when nothing is waiting.
pub fn next_waiting(entries: &[RequestEntry]) -> Option<&RequestEntry> {
    entries
        .iter()
        .find(|entry| entry.waiting)
        .or_else(|| entries.first())
}

pub fn random(entries: &[RequestEntry]) -> Option<&RequestEntry> {
    entries.choose(&mut rand::rng())
}

/// Entry at a 1-based position.
pub fn at_position(entries: &[RequestEntry], position: usize) -> Option<&RequestEntry> {
    position.checked_sub(1).and_then(|idx| entries.get(idx))
}
