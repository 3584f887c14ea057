pub mod hosting;
pub mod message_queue;
pub mod repository;
