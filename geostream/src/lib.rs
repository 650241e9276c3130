//! # geostream
//!
//! Streams geometries out of large Parquet files into incrementally updated GeoJSON layers.
//!
//! Rows are decoded batch by batch on blocking worker tasks. Each row yields a feature when it
//! carries a WKB `geometry`, numeric `lon`/`lat` columns, or a WKB `geometry_bbox` fallback. The
//! consumer buffers the features per layer and pushes them to a [`RenderSink`](scheduler::RenderSink)
//! either at every frame or once the layer is done.
//!
//! ## Usage Example
//!
//! ```no_run
//! use geostream::{
//!     pipeline::StreamLimit,
//!     scheduler::GeoJsonDirSink,
//!     session::{Session, SessionOptions},
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sink = GeoJsonDirSink::new(Path::new("output"), Some(7))?;
//!     let mut session = Session::new(sink, &SessionOptions::default());
//!     session.add_layer(None, "buildings.parquet".parse()?, StreamLimit::new(100_000)?)?;
//!     session.run_until_idle().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod pipeline;
pub mod scheduler;
pub mod session;
pub mod source;
pub mod worker;

pub use geostream_core as core;
pub use geostream_geometry as geometry;
