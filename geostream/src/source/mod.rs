//! Record batch inputs.
//!
//! A [`RecordBatchSource`] hands out Arrow record batches one at a time. [`ParquetSource`] reads
//! them from a local file or an in-memory download, [`MemorySource`] replays prepared batches.
//! [`BatchRows`] turns a batch into [`Row`]s of [`GeoValue`](geostream_geometry::GeoValue)s.

mod location;
mod memory;
mod parquet;
mod row;
mod traits;

pub use location::{SourceData, SourceLocation};
pub use memory::{MemorySource, MemorySourceProbe};
pub use parquet::ParquetSource;
pub use row::{BatchRows, Row};
pub use traits::RecordBatchSource;

/// Rows per record batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 8192;
