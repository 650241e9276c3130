//! The consumer's event loop.

use crate::{
	pipeline::StreamLimit,
	scheduler::{LayerRegistry, RenderSink, UpdatePolicy},
	source::{DEFAULT_BATCH_SIZE, SourceLocation},
	worker::{CHANNEL_CAPACITY, LayerId, WorkerEnvelope},
};
use anyhow::{Result, bail};
use std::time::Duration;
use tokio::{
	sync::mpsc,
	time::{MissedTickBehavior, interval},
};

/// Frame clock period unless configured otherwise, roughly one display refresh.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Debug, PartialEq)]
pub struct SessionOptions {
	pub policy: UpdatePolicy,
	pub frame_interval: Duration,
	pub batch_size: usize,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			policy: UpdatePolicy::default(),
			frame_interval: DEFAULT_FRAME_INTERVAL,
			batch_size: DEFAULT_BATCH_SIZE,
		}
	}
}

/// Owns the layers and the receiving end of the worker channel.
pub struct Session<S: RenderSink> {
	registry: LayerRegistry<S>,
	receiver: mpsc::Receiver<WorkerEnvelope>,
	frame_interval: Duration,
}

impl<S: RenderSink> Session<S> {
	pub fn new(sink: S, options: &SessionOptions) -> Self {
		let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
		Self {
			registry: LayerRegistry::new(sink, options.policy, options.batch_size, sender),
			receiver,
			frame_interval: options.frame_interval,
		}
	}

	/// Adds a layer and starts its worker. Must be called inside a tokio runtime.
	pub fn add_layer(&mut self, name: Option<String>, source: SourceLocation, limit: StreamLimit) -> Result<LayerId> {
		self.registry.add(name, source, limit)
	}

	pub fn registry(&self) -> &LayerRegistry<S> {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut LayerRegistry<S> {
		&mut self.registry
	}

	/// Processes worker messages and frame ticks until every layer's run has ended.
	///
	/// A protocol violation by one layer is logged and does not stop the others.
	pub async fn run_until_idle(&mut self) -> Result<()> {
		let mut frames = interval(self.frame_interval);
		frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
		while !self.registry.is_idle() {
			tokio::select! {
				envelope = self.receiver.recv() => {
					let Some(envelope) = envelope else {
						bail!("worker channel closed unexpectedly");
					};
					log::trace!("{} {}: {}", envelope.layer, envelope.run, envelope.message.kind());
					if let Err(err) = self.registry.dispatch(envelope) {
						log::error!("{err:#}");
					}
				}
				_ = frames.tick() => {
					self.registry.on_frame()?;
				}
			}
		}
		self.registry.on_frame()?;
		Ok(())
	}
}
