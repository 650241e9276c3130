use super::{StreamLimit, classify};
use crate::source::{BatchRows, RecordBatchSource};
use anyhow::{Context, Result};
use arrow_array::RecordBatch;
use geostream_geometry::GeoFeature;

/// The features produced from one input record batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchResult {
	pub features: Vec<GeoFeature>,
	/// Features emitted so far in this run, including this batch.
	pub total_processed: u64,
	pub limit_reached: bool,
}

/// Lazily converts the batches of a source into [`BatchResult`]s.
///
/// Exactly one result is yielded per input batch, possibly with no features. Rows without a
/// geometry are dropped and do not count towards the limit. Once the limit is reached the source
/// is cancelled and the iterator ends after the current batch. A source error is yielded once and
/// also ends the iterator.
pub struct BatchStreamer<S: RecordBatchSource> {
	source: S,
	limit: StreamLimit,
	total_processed: u64,
	rows_examined: u64,
	rows_dropped: u64,
	limit_reached: bool,
	finished: bool,
}

impl<S: RecordBatchSource> BatchStreamer<S> {
	pub fn new(source: S, limit: StreamLimit) -> Self {
		Self {
			source,
			limit,
			total_processed: 0,
			rows_examined: 0,
			rows_dropped: 0,
			limit_reached: false,
			finished: false,
		}
	}

	pub fn total_processed(&self) -> u64 {
		self.total_processed
	}

	/// Rows handed to the classifier, whether or not they produced a feature.
	pub fn rows_examined(&self) -> u64 {
		self.rows_examined
	}

	pub fn rows_dropped(&self) -> u64 {
		self.rows_dropped
	}

	pub fn limit_reached(&self) -> bool {
		self.limit_reached
	}

	pub fn limit(&self) -> StreamLimit {
		self.limit
	}

	fn process_batch(&mut self, batch: &RecordBatch) -> Result<Vec<GeoFeature>> {
		let rows = BatchRows::try_new(batch)?;
		let mut features = Vec::new();
		for index in 0..rows.len() {
			if self.limit.is_reached(self.total_processed) {
				self.limit_reached = true;
				break;
			}
			let row = rows.row(index).with_context(|| format!("reading row {index}"))?;
			self.rows_examined += 1;
			match classify::to_feature(&row, self.total_processed) {
				Some(feature) => {
					features.push(feature);
					self.total_processed += 1;
					if self.limit.is_reached(self.total_processed) {
						self.limit_reached = true;
						break;
					}
				}
				None => self.rows_dropped += 1,
			}
		}
		Ok(features)
	}
}

impl<S: RecordBatchSource> Iterator for BatchStreamer<S> {
	type Item = Result<BatchResult>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let batch = match self.source.next_batch() {
			Ok(Some(batch)) => batch,
			Ok(None) => {
				self.finished = true;
				return None;
			}
			Err(err) => {
				self.finished = true;
				return Some(Err(err));
			}
		};

		let features = match self.process_batch(&batch) {
			Ok(features) => features,
			Err(err) => {
				self.finished = true;
				return Some(Err(err));
			}
		};

		log::debug!(
			"{}: batch of {} rows gave {} features, {} in total",
			self.source.name(),
			batch.num_rows(),
			features.len(),
			self.total_processed
		);

		if self.limit_reached {
			log::info!("{}: feature limit of {} reached", self.source.name(), self.limit);
			self.source.cancel();
			self.finished = true;
		}

		Some(Ok(BatchResult {
			features,
			total_processed: self.total_processed,
			limit_reached: self.limit_reached,
		}))
	}
}
