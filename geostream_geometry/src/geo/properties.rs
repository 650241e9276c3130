use super::GeoValue;
use geostream_core::json::JsonObject;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Feature attributes, ordered by key.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties {
	properties: BTreeMap<String, GeoValue>,
}

impl GeoProperties {
	#[must_use]
	pub fn new() -> GeoProperties {
		GeoProperties {
			properties: BTreeMap::new(),
		}
	}
	pub fn insert(&mut self, key: String, value: GeoValue) {
		self.properties.insert(key, value);
	}
	pub fn remove(&mut self, key: &str) -> Option<GeoValue> {
		self.properties.remove(key)
	}
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.properties.get(key)
	}
	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.properties.contains_key(key)
	}
	#[must_use]
	pub fn len(&self) -> usize {
		self.properties.len()
	}
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.properties.iter()
	}

	#[must_use]
	pub fn to_json(&self) -> JsonObject {
		let mut obj = JsonObject::new();
		for (key, value) in &self.properties {
			obj.set(key, value.to_json());
		}
		obj
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = btree_map::IntoIter<String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl From<Vec<(&str, GeoValue)>> for GeoProperties {
	fn from(value: Vec<(&str, GeoValue)>) -> Self {
		GeoProperties {
			properties: value.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
		}
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		GeoProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn keys_are_ordered() {
		let properties = GeoProperties::from(vec![
			("zeta", GeoValue::from(1)),
			("alpha", GeoValue::from("a")),
			("mid", GeoValue::Null),
		]);
		let keys: Vec<&String> = properties.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, ["alpha", "mid", "zeta"]);
		assert_eq!(properties.to_json().stringify(), r#"{"alpha":"a","mid":null,"zeta":1}"#);
	}

	#[test]
	fn insert_get_remove() {
		let mut properties = GeoProperties::new();
		assert!(properties.is_empty());
		properties.insert("name".to_string(), GeoValue::from("Berlin"));
		assert_eq!(properties.get("name"), Some(&GeoValue::from("Berlin")));
		assert!(properties.contains_key("name"));
		assert_eq!(properties.remove("name"), Some(GeoValue::from("Berlin")));
		assert_eq!(properties.len(), 0);
	}

	#[test]
	fn debug_format() {
		let properties = GeoProperties::from(vec![("a", GeoValue::from(true))]);
		assert_eq!(format!("{properties:?}"), r#"{"a": Bool(true)}"#);
	}
}
