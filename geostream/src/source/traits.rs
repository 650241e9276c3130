use anyhow::Result;
use arrow_array::RecordBatch;

/// A pull-based producer of record batches.
pub trait RecordBatchSource: Send {
	/// Returns the next batch, or `None` once the input is exhausted.
	fn next_batch(&mut self) -> Result<Option<RecordBatch>>;

	/// Stops reading. Later calls to `next_batch` return `None`.
	fn cancel(&mut self);

	/// Human readable name used in log messages.
	fn name(&self) -> &str;
}

impl<T: RecordBatchSource + ?Sized> RecordBatchSource for Box<T> {
	fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
		(**self).next_batch()
	}

	fn cancel(&mut self) {
		(**self).cancel();
	}

	fn name(&self) -> &str {
		(**self).name()
	}
}
