use crate::worker::LayerId;
use anyhow::{Context, Result};
use geostream_geometry::GeoCollection;
use std::{
	collections::BTreeMap,
	fs,
	path::{Path, PathBuf},
};

/// A renderable data source. Each push replaces the layer's previous data in full.
pub trait RenderSink: Send {
	fn set_data(&mut self, layer: &LayerId, collection: &GeoCollection) -> Result<()>;
	fn remove(&mut self, layer: &LayerId) -> Result<()>;
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
	fn set_data(&mut self, layer: &LayerId, collection: &GeoCollection) -> Result<()> {
		(**self).set_data(layer, collection)
	}

	fn remove(&mut self, layer: &LayerId) -> Result<()> {
		(**self).remove(layer)
	}
}

/// Writes one `<layer>.geojson` file per layer into a directory.
///
/// Files are written to a temporary name first and then renamed, so readers never see a partial
/// document.
#[derive(Debug)]
pub struct GeoJsonDirSink {
	dir: PathBuf,
	precision: Option<u8>,
}

impl GeoJsonDirSink {
	pub fn new(dir: &Path, precision: Option<u8>) -> Result<Self> {
		fs::create_dir_all(dir).with_context(|| format!("creating output directory {dir:?}"))?;
		Ok(Self {
			dir: dir.to_path_buf(),
			precision,
		})
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn layer_path(&self, layer: &LayerId) -> PathBuf {
		self.dir.join(format!("{layer}.geojson"))
	}
}

impl RenderSink for GeoJsonDirSink {
	fn set_data(&mut self, layer: &LayerId, collection: &GeoCollection) -> Result<()> {
		let path = self.layer_path(layer);
		let temp = self.dir.join(format!(".{layer}.geojson.tmp"));
		fs::write(&temp, collection.to_json(self.precision).stringify()).with_context(|| format!("writing {temp:?}"))?;
		fs::rename(&temp, &path).with_context(|| format!("replacing {path:?}"))?;
		log::trace!("wrote {} features to {path:?}", collection.len());
		Ok(())
	}

	fn remove(&mut self, layer: &LayerId) -> Result<()> {
		let path = self.layer_path(layer);
		if path.exists() {
			fs::remove_file(&path).with_context(|| format!("removing {path:?}"))?;
		}
		Ok(())
	}
}

/// Keeps every push in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
	pushes: Vec<(LayerId, GeoCollection)>,
	current: BTreeMap<LayerId, GeoCollection>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// All pushes in order, across layers.
	pub fn pushes(&self) -> &[(LayerId, GeoCollection)] {
		&self.pushes
	}

	pub fn push_count(&self, layer: &LayerId) -> usize {
		self.pushes.iter().filter(|(id, _)| id == layer).count()
	}

	/// What a renderer would currently show for `layer`.
	pub fn latest(&self, layer: &LayerId) -> Option<&GeoCollection> {
		self.current.get(layer)
	}
}

impl RenderSink for MemorySink {
	fn set_data(&mut self, layer: &LayerId, collection: &GeoCollection) -> Result<()> {
		self.pushes.push((*layer, collection.clone()));
		self.current.insert(*layer, collection.clone());
		Ok(())
	}

	fn remove(&mut self, layer: &LayerId) -> Result<()> {
		self.current.remove(layer);
		Ok(())
	}
}

/// Rejects every push, like a sink whose output directory went away.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RejectingSink;

#[cfg(test)]
impl RenderSink for RejectingSink {
	fn set_data(&mut self, layer: &LayerId, _collection: &GeoCollection) -> Result<()> {
		anyhow::bail!("cannot write {layer}: disk full")
	}

	fn remove(&mut self, _layer: &LayerId) -> Result<()> {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use geostream_geometry::{GeoFeature, Geometry};
	use pretty_assertions::assert_eq;

	fn collection() -> GeoCollection {
		let mut feature = GeoFeature::new(Geometry::new_point([1.5, -2.0]));
		feature.set_id("layer-0-0");
		feature.set_property("name".to_string(), "a");
		GeoCollection::from(vec![feature])
	}

	#[test]
	fn dir_sink_writes_and_replaces() -> Result<()> {
		let temp = tempfile::tempdir()?;
		let dir = temp.path().join("out");
		let mut sink = GeoJsonDirSink::new(&dir, None)?;
		let layer = LayerId(0);
		sink.set_data(&layer, &GeoCollection::new())?;
		let path = dir.join("layer-0.geojson");
		assert_eq!(
			fs::read_to_string(&path)?,
			r#"{"features":[],"type":"FeatureCollection"}"#
		);

		sink.set_data(&layer, &collection())?;
		assert_eq!(
			fs::read_to_string(&path)?,
			r#"{"bbox":[1.5,-2,1.5,-2],"features":[{"geometry":{"coordinates":[1.5,-2],"type":"Point"},"id":"layer-0-0","properties":{"name":"a"},"type":"Feature"}],"type":"FeatureCollection"}"#
		);
		assert_eq!(fs::read_dir(&dir)?.count(), 1);

		sink.remove(&layer)?;
		assert!(!path.exists());
		sink.remove(&layer)?;
		Ok(())
	}

	#[test]
	fn repeated_push_is_idempotent() -> Result<()> {
		let temp = tempfile::tempdir()?;
		let mut sink = GeoJsonDirSink::new(temp.path(), Some(3))?;
		let path = sink.layer_path(&LayerId(2));
		sink.set_data(&LayerId(2), &collection())?;
		let first = fs::read(&path)?;
		sink.set_data(&LayerId(2), &collection())?;
		assert_eq!(fs::read(&path)?, first);
		Ok(())
	}

	#[test]
	fn memory_sink_tracks_pushes() -> Result<()> {
		let mut sink = MemorySink::new();
		sink.set_data(&LayerId(0), &GeoCollection::new())?;
		sink.set_data(&LayerId(1), &collection())?;
		sink.set_data(&LayerId(0), &collection())?;
		assert_eq!(sink.pushes().len(), 3);
		assert_eq!(sink.push_count(&LayerId(0)), 2);
		assert_eq!(sink.latest(&LayerId(0)), Some(&collection()));
		sink.remove(&LayerId(0))?;
		assert_eq!(sink.latest(&LayerId(0)), None);
		assert_eq!(sink.push_count(&LayerId(0)), 2);
		Ok(())
	}
}
