//! Runs a [`BatchStreamer`](crate::pipeline::BatchStreamer) off the consumer's event loop.
//!
//! Each run streams on a blocking tokio task and reports through a bounded mpsc channel. Every
//! message travels in a [`WorkerEnvelope`] naming its layer and run, so the consumer can route it
//! and drop messages of runs it has replaced.

mod message;
mod spawn;

pub use message::{LayerId, ProcessFile, RunId, WorkerEnvelope, WorkerMessage};
pub use spawn::{READING_STATUS, WorkerHandle, spawn_source_worker, spawn_worker};

/// Capacity of the channel between workers and the consumer.
pub const CHANNEL_CAPACITY: usize = 64;
