pub mod request_entry;
pub mod request_queue;
