//! Consumer side of the worker channel.
//!
//! Incoming features are buffered per layer and pushed to a [`RenderSink`] at frame boundaries
//! (live policy) or once the run is done (final policy).

mod layer;
mod policy;
mod registry;
mod sink;

pub use layer::{FlushState, LayerCounters, UpdateScheduler};
pub use policy::UpdatePolicy;
pub use registry::{Layer, LayerRegistry};
pub use sink::{GeoJsonDirSink, MemorySink, RenderSink};
