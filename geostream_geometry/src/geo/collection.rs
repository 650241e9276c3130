use super::{GeoFeature, merge_bounds};
use geostream_core::json::{JsonObject, JsonValue};

/// An ordered set of features, serialised as a GeoJSON `FeatureCollection`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn from(features: Vec<GeoFeature>) -> Self {
		Self { features }
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	/// Bounding box over all feature geometries.
	#[must_use]
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.features.iter().map(|f| f.geometry.compute_bounds()))
	}

	/// The `bbox` member is only written when the collection has coordinates.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonObject {
		let mut obj = JsonObject::new();
		obj.set("type", JsonValue::from("FeatureCollection"));
		if let Some(bbox) = self.compute_bounds() {
			obj.set("bbox", JsonValue::from(bbox));
		}
		let features_json = JsonValue::from(self.features.iter().map(|f| f.to_json(precision)).collect::<Vec<_>>());
		obj.set("features", features_json);
		obj
	}
}
