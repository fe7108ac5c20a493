pub mod json_store;
pub mod memory_store;

use crate::error::Result;
use crate::models::request_entry::RequestEntry;

/// Durable home of the request queue.
///
/// `save` always receives the whole queue in canonical order and replaces
/// whatever was stored before.
pub trait QueueStore: Send {
    fn load(&self) -> Result<Vec<RequestEntry>>;
    fn save(&self, entries: &[RequestEntry]) -> Result<()>;
}

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
