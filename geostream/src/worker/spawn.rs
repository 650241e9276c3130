use super::{LayerId, ProcessFile, RunId, WorkerEnvelope, WorkerMessage};
use crate::{
	pipeline::{BatchStreamer, StreamLimit},
	source::RecordBatchSource,
};
use anyhow::{Result, anyhow};
use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};
use tokio::{sync::mpsc, task::JoinHandle};

/// First status of every run, sent before any input is read.
pub const READING_STATUS: &str = "Reading file...";

/// Controls a running worker.
#[derive(Debug)]
pub struct WorkerHandle {
	run: RunId,
	cancel: Arc<AtomicBool>,
	task: JoinHandle<()>,
}

impl WorkerHandle {
	pub fn run(&self) -> RunId {
		self.run
	}

	/// Stops the run. Streaming halts before the next batch and no terminal message is sent.
	pub fn terminate(&self) {
		self.cancel.store(true, Ordering::SeqCst);
		self.task.abort();
	}

	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}
}

#[derive(Clone)]
struct Outbox {
	layer: LayerId,
	run: RunId,
	sender: mpsc::Sender<WorkerEnvelope>,
	cancel: Arc<AtomicBool>,
}

impl Outbox {
	fn envelope(&self, message: WorkerMessage) -> WorkerEnvelope {
		WorkerEnvelope {
			layer: self.layer,
			run: self.run,
			message,
		}
	}

	/// Returns `false` once the consumer is gone.
	async fn send(&self, message: WorkerMessage) -> bool {
		self.sender.send(self.envelope(message)).await.is_ok()
	}

	fn blocking_send(&self, message: WorkerMessage) -> bool {
		self.sender.blocking_send(self.envelope(message)).is_ok()
	}

	fn is_cancelled(&self) -> bool {
		self.cancel.load(Ordering::SeqCst)
	}
}

enum StreamEnd {
	Completed { limit_reached: bool },
	Cancelled,
}

/// Streams the file named in `request`, downloading it first if it is remote.
pub fn spawn_worker(
	layer: LayerId,
	run: RunId,
	request: ProcessFile,
	sender: mpsc::Sender<WorkerEnvelope>,
) -> WorkerHandle {
	let cancel = Arc::new(AtomicBool::new(false));
	let outbox = Outbox {
		layer,
		run,
		sender,
		cancel: cancel.clone(),
	};
	let task = tokio::spawn(async move {
		log::info!("{layer} {run}: streaming {} with limit {}", request.source, request.limit);
		if !outbox.send(WorkerMessage::status(READING_STATUS, 0, 0)).await {
			return;
		}
		let limit = request.limit;
		let result = async {
			let data = request.source.fetch().await?;
			let blocking_outbox = outbox.clone();
			tokio::task::spawn_blocking(move || {
				let source = data.open(request.batch_size)?;
				stream_source(source, limit, &blocking_outbox)
			})
			.await
			.map_err(|e| anyhow!("worker task failed: {e}"))?
		}
		.await;
		finish(result, limit, &outbox).await;
	});
	WorkerHandle { run, cancel, task }
}

/// Streams an already opened source.
pub fn spawn_source_worker<S: RecordBatchSource + 'static>(
	layer: LayerId,
	run: RunId,
	source: S,
	limit: StreamLimit,
	sender: mpsc::Sender<WorkerEnvelope>,
) -> WorkerHandle {
	let cancel = Arc::new(AtomicBool::new(false));
	let outbox = Outbox {
		layer,
		run,
		sender,
		cancel: cancel.clone(),
	};
	let task = tokio::spawn(async move {
		if !outbox.send(WorkerMessage::status(READING_STATUS, 0, 0)).await {
			return;
		}
		let blocking_outbox = outbox.clone();
		let result = tokio::task::spawn_blocking(move || stream_source(source, limit, &blocking_outbox))
			.await
			.map_err(|e| anyhow!("worker task failed: {e}"))
			.and_then(|result| result);
		finish(result, limit, &outbox).await;
	});
	WorkerHandle { run, cancel, task }
}

fn stream_source<S: RecordBatchSource>(source: S, limit: StreamLimit, outbox: &Outbox) -> Result<StreamEnd> {
	let mut streamer = BatchStreamer::new(source, limit);
	let mut batch_count = 0u64;
	loop {
		if outbox.is_cancelled() {
			log::debug!("{} {}: cancelled after {batch_count} batches", outbox.layer, outbox.run);
			return Ok(StreamEnd::Cancelled);
		}
		let Some(result) = streamer.next() else {
			break;
		};
		let batch = result?;
		batch_count += 1;
		if !batch.features.is_empty() && !outbox.blocking_send(WorkerMessage::Features(batch.features)) {
			return Ok(StreamEnd::Cancelled);
		}
		let status = format!("Processing batch {batch_count}...");
		if !outbox.blocking_send(WorkerMessage::status(&status, batch_count, batch.total_processed)) {
			return Ok(StreamEnd::Cancelled);
		}
	}
	log::debug!(
		"{} {}: examined {} rows, dropped {}",
		outbox.layer,
		outbox.run,
		streamer.rows_examined(),
		streamer.rows_dropped()
	);
	Ok(StreamEnd::Completed {
		limit_reached: streamer.limit_reached(),
	})
}

async fn finish(result: Result<StreamEnd>, limit: StreamLimit, outbox: &Outbox) {
	let message = match result {
		Ok(StreamEnd::Completed { limit_reached }) => WorkerMessage::Done { limit_reached, limit },
		Ok(StreamEnd::Cancelled) => return,
		Err(err) => {
			log::warn!("{} {}: {err:#}", outbox.layer, outbox.run);
			WorkerMessage::Error {
				message: format!("{err:#}"),
			}
		}
	};
	outbox.send(message).await;
}
