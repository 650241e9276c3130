use super::{GeoProperties, GeoValue, Geometry};
use geostream_core::json::JsonObject;

/// One geometry plus its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub id: Option<GeoValue>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_id<T>(&mut self, id: T)
	where
		GeoValue: From<T>,
	{
		self.id = Some(GeoValue::from(id));
	}

	pub fn set_properties(&mut self, properties: GeoProperties) {
		self.properties = properties;
	}

	pub fn set_property<T>(&mut self, key: String, value: T)
	where
		GeoValue: From<T>,
	{
		self.properties.insert(key, GeoValue::from(value));
	}

	/// GeoJSON `Feature` object. The `id` member is omitted when unset.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonObject {
		let mut obj = JsonObject::new();
		obj.set("type", "Feature");
		if let Some(id) = &self.id {
			obj.set("id", id.to_json());
		}
		obj.set("geometry", self.geometry.to_json(precision));
		obj.set("properties", self.properties.to_json());
		obj
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self {
			id: Some(GeoValue::from(13u64)),
			geometry: Geometry::new_point([7.26, 43.7]),
			properties: GeoProperties::from(vec![
				("name", GeoValue::from("Nice")),
				("population", GeoValue::from(348_085)),
				("is_nice", GeoValue::from(true)),
			]),
		}
	}
}
