use super::{RenderSink, UpdatePolicy};
use crate::worker::{LayerId, WorkerMessage};
use anyhow::{Result, ensure};
use enumset::EnumSet;
use geostream_geometry::{GeoCollection, GeoFeature, GeoValue, GeometryKind, detect_kinds};

pub const FINISHED_STATUS: &str = "Finished streaming.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushState {
	Idle,
	/// A push is due at the next frame boundary.
	PendingFlush,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerCounters {
	pub batches: u64,
	pub processed: u64,
	/// Features in the collection last pushed to the sink.
	pub rendered: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
	Running,
	Done { limit_reached: bool },
	Failed,
}

#[derive(Debug, Default)]
struct LayerBuffer {
	collection: GeoCollection,
	dirty: bool,
	kinds: EnumSet<GeometryKind>,
	kinds_detected: bool,
}

/// Accumulates the features of one layer and decides when the sink sees them.
#[derive(Debug)]
pub struct UpdateScheduler {
	layer: LayerId,
	policy: UpdatePolicy,
	state: FlushState,
	buffer: LayerBuffer,
	counters: LayerCounters,
	status: String,
	run_state: RunState,
	bounds: Option<[f64; 4]>,
}

impl UpdateScheduler {
	pub fn new(layer: LayerId, policy: UpdatePolicy) -> Self {
		Self {
			layer,
			policy,
			state: FlushState::Idle,
			buffer: LayerBuffer::default(),
			counters: LayerCounters::default(),
			status: String::new(),
			run_state: RunState::Running,
			bounds: None,
		}
	}

	/// Forgets everything from a previous run and shows an empty layer.
	///
	/// # Errors
	/// Fails when the sink rejects the empty collection. The run is then marked as failed, since no
	/// worker will be started for it.
	pub fn reset(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
		self.state = FlushState::Idle;
		self.buffer = LayerBuffer::default();
		self.counters = LayerCounters::default();
		self.status.clear();
		self.run_state = RunState::Running;
		self.bounds = None;
		if let Err(err) = self.flush(sink) {
			self.status = format!("Render error: {err:#}");
			self.run_state = RunState::Failed;
			log::error!("{}: {err:#}", self.layer);
			return Err(err);
		}
		Ok(())
	}

	/// Applies one worker message.
	///
	/// # Errors
	/// Fails on any message that follows `Done` or `Error`, or when the sink fails.
	pub fn handle(&mut self, message: WorkerMessage, sink: &mut dyn RenderSink) -> Result<()> {
		ensure!(
			self.run_state == RunState::Running,
			"{}: received '{}' message after the run ended",
			self.layer,
			message.kind()
		);
		match message {
			WorkerMessage::Status {
				message,
				batch_count,
				total_processed,
			} => {
				self.status = message;
				if let Some(batches) = batch_count {
					self.counters.batches = batches;
				}
				if let Some(processed) = total_processed {
					self.counters.processed = processed;
				}
			}
			WorkerMessage::Features(features) => self.append(features),
			WorkerMessage::Done { limit_reached, limit } => {
				self.status = match limit.get() {
					Some(limit) if limit_reached => format!("Stopped at limit of {limit}."),
					_ => FINISHED_STATUS.to_string(),
				};
				self.run_state = RunState::Done { limit_reached };
				self.flush(sink)?;
				self.bounds = self.buffer.collection.compute_bounds();
				log::info!("{}: {} ({} features)", self.layer, self.status, self.buffer.collection.len());
			}
			WorkerMessage::Error { message } => {
				self.status = format!("Worker error: {message}");
				self.run_state = RunState::Failed;
				log::error!("{}: {message}", self.layer);
			}
		}
		Ok(())
	}

	fn append(&mut self, features: Vec<GeoFeature>) {
		if features.is_empty() {
			return;
		}
		if !self.buffer.kinds_detected {
			self.buffer.kinds = detect_kinds(features.iter().map(|feature| &feature.geometry));
			self.buffer.kinds_detected = true;
			log::debug!("{}: geometry kinds {:?}", self.layer, self.buffer.kinds);
		}
		let layer = self.layer;
		self.buffer.collection.features.extend(features.into_iter().map(|mut feature| {
			if let Some(id) = feature.id.take() {
				feature.id = Some(GeoValue::from(format!("{layer}-{id}")));
			}
			feature
		}));
		self.buffer.dirty = true;
		if self.policy == UpdatePolicy::Live && self.state == FlushState::Idle {
			self.state = FlushState::PendingFlush;
		}
	}

	/// Called at every frame boundary. Returns whether the sink was updated.
	pub fn on_frame(&mut self, sink: &mut dyn RenderSink) -> Result<bool> {
		if self.state == FlushState::PendingFlush {
			self.flush(sink)?;
			return Ok(true);
		}
		Ok(false)
	}

	fn flush(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
		sink.set_data(&self.layer, &self.buffer.collection)?;
		self.counters.rendered = self.buffer.collection.len() as u64;
		self.buffer.dirty = false;
		self.state = FlushState::Idle;
		Ok(())
	}

	pub fn layer(&self) -> LayerId {
		self.layer
	}

	pub fn policy(&self) -> UpdatePolicy {
		self.policy
	}

	pub fn state(&self) -> FlushState {
		self.state
	}

	pub fn counters(&self) -> LayerCounters {
		self.counters
	}

	pub fn status(&self) -> &str {
		&self.status
	}

	/// Geometry kinds of the first non-empty batch.
	pub fn kinds(&self) -> EnumSet<GeometryKind> {
		self.buffer.kinds
	}

	pub fn collection(&self) -> &GeoCollection {
		&self.buffer.collection
	}

	/// Whether the buffer holds features the sink has not seen.
	pub fn is_dirty(&self) -> bool {
		self.buffer.dirty
	}

	/// Bounding box of all features, known once the run is done.
	pub fn bounds(&self) -> Option<[f64; 4]> {
		self.bounds
	}

	pub fn is_finished(&self) -> bool {
		self.run_state != RunState::Running
	}

	pub fn has_failed(&self) -> bool {
		self.run_state == RunState::Failed
	}

	/// `Some` once the run is done.
	pub fn limit_reached(&self) -> Option<bool> {
		match self.run_state {
			RunState::Done { limit_reached } => Some(limit_reached),
			_ => None,
		}
	}
}
