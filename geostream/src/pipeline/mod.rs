//! Turns record batches into features.
//!
//! [`classify`] decides per row whether and where a geometry comes from, [`BatchStreamer`] drives
//! a [`RecordBatchSource`](crate::source::RecordBatchSource) under a [`StreamLimit`].

pub mod classify;
mod limit;
mod stream;

pub use limit::StreamLimit;
pub use stream::{BatchResult, BatchStreamer};
