use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, linestring::coordinate_bounds};
use geostream_core::json::JsonValue;
use std::fmt::Debug;

/// A closed loop of coordinates, the building block of polygons.
///
/// Rings are kept exactly as encoded: closure and a minimum point count are not enforced.
#[derive(Clone, PartialEq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// Whether the first and last coordinates coincide.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.0.len() >= 2 && self.0.first() == self.0.last()
	}
}

impl GeometryTrait for RingGeometry {
	/// Returns the coordinates of the ring as a JSON array.
	/// If a precision is specified, coordinates are rounded accordingly.
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(self.0.iter().map(|coord| coord.to_json(precision)).collect::<Vec<_>>())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		coordinate_bounds(&self.0)
	}
}

impl CompositeGeometryTrait<Coordinates> for RingGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<Coordinates> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<Coordinates> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<Coordinates> {
		self.0
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_elements!(RingGeometry, Coordinates);
