pub mod hackmd;
pub mod null_mirror;

use crate::error::Result;

/// Somewhere a rendered document can be shown to the audience.
///
/// `publish` creates the document and returns its public address; later
/// renderings go through `update` against the same document.
pub trait MirrorSink: Send {
    fn publish(&mut self, content: &str) -> Result<String>;
    fn update(&mut self, content: &str) -> Result<bool>;
    fn url(&self) -> Option<String>;
}

pub use hackmd::HackMdNote;
pub use null_mirror::NullMirror;
