use super::{RenderSink, UpdatePolicy, UpdateScheduler};
use crate::{
	pipeline::StreamLimit,
	source::SourceLocation,
	worker::{LayerId, ProcessFile, RunId, WorkerEnvelope, WorkerHandle, spawn_worker},
};
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// One input file and everything the consumer knows about its current run.
#[derive(Debug)]
pub struct Layer {
	name: String,
	source: SourceLocation,
	limit: StreamLimit,
	run: RunId,
	scheduler: UpdateScheduler,
	worker: Option<WorkerHandle>,
}

impl Layer {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn source(&self) -> &SourceLocation {
		&self.source
	}

	pub fn limit(&self) -> StreamLimit {
		self.limit
	}

	pub fn run(&self) -> RunId {
		self.run
	}

	pub fn scheduler(&self) -> &UpdateScheduler {
		&self.scheduler
	}
}

/// Owns all layers, starts their workers and routes worker messages to them.
pub struct LayerRegistry<S: RenderSink> {
	layers: BTreeMap<LayerId, Layer>,
	next_layer: u32,
	next_run: u64,
	policy: UpdatePolicy,
	batch_size: usize,
	sink: S,
	sender: mpsc::Sender<WorkerEnvelope>,
}

impl<S: RenderSink> LayerRegistry<S> {
	pub fn new(sink: S, policy: UpdatePolicy, batch_size: usize, sender: mpsc::Sender<WorkerEnvelope>) -> Self {
		Self {
			layers: BTreeMap::new(),
			next_layer: 0,
			next_run: 0,
			policy,
			batch_size,
			sink,
			sender,
		}
	}

	/// Registers a layer and starts streaming it. Without a name the source's file name is used.
	pub fn add(&mut self, name: Option<String>, source: SourceLocation, limit: StreamLimit) -> Result<LayerId> {
		let id = LayerId(self.next_layer);
		self.next_layer += 1;
		let name = name.unwrap_or_else(|| source.file_name());
		log::info!("adding {id} '{name}' from {source}");
		self.layers.insert(
			id,
			Layer {
				name,
				source,
				limit,
				run: RunId(self.next_run),
				scheduler: UpdateScheduler::new(id, self.policy),
				worker: None,
			},
		);
		self.start(id)?;
		Ok(id)
	}

	/// Streams the layer again from the start. Messages of the previous run are ignored from now on.
	pub fn reload(&mut self, id: LayerId) -> Result<()> {
		log::info!("reloading {id}");
		self.start(id)
	}

	fn start(&mut self, id: LayerId) -> Result<()> {
		let layer = self.layers.get_mut(&id).ok_or_else(|| anyhow!("unknown layer {id}"))?;
		if let Some(worker) = layer.worker.take() {
			worker.terminate();
		}
		let run = RunId(self.next_run);
		self.next_run += 1;
		layer.run = run;
		layer.scheduler.reset(&mut self.sink)?;
		let request = ProcessFile {
			source: layer.source.clone(),
			limit: layer.limit,
			batch_size: self.batch_size,
		};
		layer.worker = Some(spawn_worker(id, run, request, self.sender.clone()));
		Ok(())
	}

	/// Stops the layer's worker and clears it from the sink.
	pub fn remove(&mut self, id: LayerId) -> Result<()> {
		let layer = self.layers.remove(&id).ok_or_else(|| anyhow!("unknown layer {id}"))?;
		log::info!("removing {id} '{}'", layer.name);
		if let Some(worker) = &layer.worker {
			worker.terminate();
		}
		self.sink.remove(&id)
	}

	/// Routes a worker message to its layer. Messages of removed layers or superseded runs are dropped.
	pub fn dispatch(&mut self, envelope: WorkerEnvelope) -> Result<()> {
		let WorkerEnvelope { layer: id, run, message } = envelope;
		let Some(layer) = self.layers.get_mut(&id) else {
			log::debug!("dropping '{}' message of removed {id}", message.kind());
			return Ok(());
		};
		if layer.run != run {
			log::debug!("dropping '{}' message of stale {run} for {id}", message.kind());
			return Ok(());
		}
		let terminal = message.is_terminal();
		layer.scheduler.handle(message, &mut self.sink)?;
		if terminal {
			layer.worker = None;
		}
		Ok(())
	}

	/// Gives every layer its frame boundary. Returns the number of layers pushed to the sink.
	pub fn on_frame(&mut self) -> Result<usize> {
		let mut flushed = 0;
		for layer in self.layers.values_mut() {
			if layer.scheduler.on_frame(&mut self.sink)? {
				flushed += 1;
			}
		}
		Ok(flushed)
	}

	/// True once every layer's current run has ended.
	pub fn is_idle(&self) -> bool {
		self.layers.values().all(|layer| layer.scheduler.is_finished())
	}

	pub fn get(&self, id: LayerId) -> Option<&Layer> {
		self.layers.get(&id)
	}

	pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
		self.layers.iter()
	}

	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}

	pub fn sink(&self) -> &S {
		&self.sink
	}
}

impl<S: RenderSink> Drop for LayerRegistry<S> {
	fn drop(&mut self) {
		for layer in self.layers.values() {
			if let Some(worker) = &layer.worker {
				worker.terminate();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		scheduler::{MemorySink, sink::RejectingSink},
		worker::WorkerMessage,
	};
	use geostream_geometry::{GeoCollection, GeoFeature, Geometry};
	use pretty_assertions::assert_eq;

	fn registry(policy: UpdatePolicy) -> (LayerRegistry<MemorySink>, mpsc::Receiver<WorkerEnvelope>) {
		let (sender, receiver) = mpsc::channel(16);
		(LayerRegistry::new(MemorySink::new(), policy, 64, sender), receiver)
	}

	fn missing(name: &str) -> SourceLocation {
		format!("/missing/{name}").parse().unwrap()
	}

	fn envelope(layer: LayerId, run: RunId, message: WorkerMessage) -> WorkerEnvelope {
		WorkerEnvelope { layer, run, message }
	}

	fn point_batch() -> WorkerMessage {
		let mut feature = GeoFeature::new(Geometry::new_point([4.0, 5.0]));
		feature.set_id(0u64);
		WorkerMessage::Features(vec![feature])
	}

	fn done() -> WorkerMessage {
		WorkerMessage::Done {
			limit_reached: false,
			limit: StreamLimit::Unbounded,
		}
	}

	#[tokio::test]
	async fn add_assigns_ids_and_names() -> Result<()> {
		let (mut registry, _receiver) = registry(UpdatePolicy::Live);
		let a = registry.add(None, missing("roads.parquet"), StreamLimit::Unbounded)?;
		let b = registry.add(Some("Rivers".to_string()), missing("x.parquet"), StreamLimit::new(5)?)?;
		assert_eq!((a, b), (LayerId(0), LayerId(1)));
		assert_eq!(registry.get(a).map(Layer::name), Some("roads.parquet"));
		assert_eq!(registry.get(b).map(Layer::name), Some("Rivers"));
		assert_eq!(registry.get(b).map(Layer::limit), Some(StreamLimit::new(5)?));
		assert_eq!(registry.sink().push_count(&a), 1);
		assert_eq!(registry.len(), 2);
		assert!(!registry.is_idle());
		Ok(())
	}

	#[tokio::test]
	async fn routes_messages_and_becomes_idle() -> Result<()> {
		let (mut registry, _receiver) = registry(UpdatePolicy::Live);
		let id = registry.add(None, missing("a.parquet"), StreamLimit::Unbounded)?;
		let run = registry.get(id).map(Layer::run).unwrap();
		registry.dispatch(envelope(id, run, point_batch()))?;
		assert_eq!(registry.on_frame()?, 1);
		assert_eq!(registry.on_frame()?, 0);
		registry.dispatch(envelope(id, run, done()))?;
		assert!(registry.is_idle());
		let latest = registry.sink().latest(&id).unwrap();
		assert_eq!(latest.len(), 1);
		assert_eq!(latest.features[0].id.as_ref().map(ToString::to_string), Some("layer-0-0".to_string()));
		Ok(())
	}

	#[tokio::test]
	async fn reload_discards_stale_messages() -> Result<()> {
		let (mut registry, _receiver) = registry(UpdatePolicy::Final);
		let id = registry.add(None, missing("a.parquet"), StreamLimit::Unbounded)?;
		let old_run = registry.get(id).map(Layer::run).unwrap();
		registry.dispatch(envelope(id, old_run, point_batch()))?;

		registry.reload(id)?;
		let new_run = registry.get(id).map(Layer::run).unwrap();
		assert_ne!(old_run, new_run);
		assert!(registry.get(id).unwrap().scheduler().collection().is_empty());
		assert_eq!(registry.sink().latest(&id), Some(&GeoCollection::new()));

		registry.dispatch(envelope(id, old_run, point_batch()))?;
		registry.dispatch(envelope(id, old_run, done()))?;
		assert!(!registry.is_idle());
		assert!(registry.get(id).unwrap().scheduler().collection().is_empty());

		registry.dispatch(envelope(id, new_run, done()))?;
		assert!(registry.is_idle());
		Ok(())
	}

	#[tokio::test]
	async fn remove_clears_sink_and_ignores_late_messages() -> Result<()> {
		let (mut registry, _receiver) = registry(UpdatePolicy::Live);
		let id = registry.add(None, missing("a.parquet"), StreamLimit::Unbounded)?;
		let run = registry.get(id).map(Layer::run).unwrap();
		registry.remove(id)?;
		assert_eq!(registry.sink().latest(&id), None);
		assert!(registry.is_empty());
		assert!(registry.is_idle());
		registry.dispatch(envelope(id, run, point_batch()))?;
		assert!(registry.remove(id).is_err());
		assert!(registry.reload(id).is_err());
		Ok(())
	}

	#[tokio::test]
	async fn protocol_violation_is_reported() -> Result<()> {
		let (mut registry, _receiver) = registry(UpdatePolicy::Live);
		let id = registry.add(None, missing("a.parquet"), StreamLimit::Unbounded)?;
		let run = registry.get(id).map(Layer::run).unwrap();
		registry.dispatch(envelope(id, run, done()))?;
		assert!(registry.dispatch(envelope(id, run, point_batch())).is_err());
		Ok(())
	}

	#[tokio::test]
	async fn sink_failure_on_start_leaves_registry_idle() {
		let (sender, _receiver) = mpsc::channel(16);
		let mut registry = LayerRegistry::new(RejectingSink, UpdatePolicy::Live, 64, sender);
		let err = registry.add(None, missing("a.parquet"), StreamLimit::Unbounded).unwrap_err();
		assert_eq!(err.to_string(), "cannot write layer-0: disk full");

		let layer = registry.get(LayerId(0)).unwrap();
		assert!(layer.worker.is_none());
		assert!(layer.scheduler().has_failed());
		assert!(registry.is_idle());
		assert!(registry.reload(LayerId(0)).is_err());
		assert!(registry.is_idle());
	}
}
