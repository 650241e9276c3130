use crate::{pipeline::StreamLimit, source::SourceLocation};
use geostream_geometry::GeoFeature;
use std::fmt::Display;

/// Identifies a layer. Displayed as `layer-<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u32);

impl Display for LayerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "layer-{}", self.0)
	}
}

/// Identifies one streaming run of a layer. A reload starts a new run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl Display for RunId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "run-{}", self.0)
	}
}

/// Request to stream one file.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessFile {
	pub source: SourceLocation,
	pub limit: StreamLimit,
	pub batch_size: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorkerMessage {
	Status {
		message: String,
		batch_count: Option<u64>,
		total_processed: Option<u64>,
	},
	/// Never empty.
	Features(Vec<GeoFeature>),
	/// Terminal.
	Done { limit_reached: bool, limit: StreamLimit },
	/// Terminal.
	Error { message: String },
}

impl WorkerMessage {
	pub fn status(message: &str, batch_count: u64, total_processed: u64) -> Self {
		WorkerMessage::Status {
			message: message.to_string(),
			batch_count: Some(batch_count),
			total_processed: Some(total_processed),
		}
	}

	pub fn is_terminal(&self) -> bool {
		matches!(self, WorkerMessage::Done { .. } | WorkerMessage::Error { .. })
	}

	pub fn kind(&self) -> &'static str {
		match self {
			WorkerMessage::Status { .. } => "status",
			WorkerMessage::Features(_) => "features",
			WorkerMessage::Done { .. } => "done",
			WorkerMessage::Error { .. } => "error",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkerEnvelope {
	pub layer: LayerId,
	pub run: RunId,
	pub message: WorkerMessage,
}
