use super::RecordBatchSource;
use anyhow::{Result, anyhow};
use arrow_array::RecordBatch;
use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
};

/// Replays a fixed list of batches. An `Err` entry is returned as a source failure.
///
/// Pull and cancel activity is shared through [`MemorySourceProbe`] so it can be inspected after
/// the source has been moved into a streamer.
pub struct MemorySource {
	batches: VecDeque<Result<RecordBatch, String>>,
	probe: MemorySourceProbe,
}

/// Observes a [`MemorySource`].
#[derive(Clone, Debug, Default)]
pub struct MemorySourceProbe {
	pulls: Arc<AtomicUsize>,
	cancelled: Arc<AtomicBool>,
}

impl MemorySourceProbe {
	/// Number of successful or failed `next_batch` calls that reached the batch list.
	pub fn pulls(&self) -> usize {
		self.pulls.load(Ordering::SeqCst)
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

impl MemorySource {
	pub fn new(batches: Vec<RecordBatch>) -> Self {
		Self::with_results(batches.into_iter().map(Ok).collect())
	}

	pub fn with_results(batches: Vec<Result<RecordBatch, String>>) -> Self {
		Self {
			batches: batches.into(),
			probe: MemorySourceProbe::default(),
		}
	}

	pub fn probe(&self) -> MemorySourceProbe {
		self.probe.clone()
	}
}

impl RecordBatchSource for MemorySource {
	fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
		if self.probe.is_cancelled() {
			return Ok(None);
		}
		match self.batches.pop_front() {
			None => Ok(None),
			Some(result) => {
				self.probe.pulls.fetch_add(1, Ordering::SeqCst);
				result.map(Some).map_err(|message| anyhow!(message))
			}
		}
	}

	fn cancel(&mut self) {
		self.probe.cancelled.store(true, Ordering::SeqCst);
		self.batches.clear();
	}

	fn name(&self) -> &str {
		"memory"
	}
}
