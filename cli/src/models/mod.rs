pub mod queue_data;
