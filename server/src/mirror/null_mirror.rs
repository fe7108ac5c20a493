use crate::error::Result;
use crate::mirror::MirrorSink;

/// Mirror used when no note service is configured. Accepts every document
/// and never has an address.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMirror;

impl MirrorSink for NullMirror {
    fn publish(&mut self, _content: &str) -> Result<String> {
        Ok(String::new())
    }

    fn update(&mut self, _content: &str) -> Result<bool> {
        Ok(true)
    }

    fn url(&self) -> Option<String> {
        None
    }
}
