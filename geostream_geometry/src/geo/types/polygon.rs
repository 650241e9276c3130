use super::{CompositeGeometryTrait, GeometryTrait, RingGeometry, merge_bounds};
use geostream_core::json::JsonValue;
use std::fmt::Debug;

/// An outer ring followed by zero or more holes.
#[derive(Clone, PartialEq)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl PolygonGeometry {
	/// Returns the outer ring, if the polygon has any rings.
	#[must_use]
	pub fn exterior(&self) -> Option<&RingGeometry> {
		self.0.first()
	}
}

impl GeometryTrait for PolygonGeometry {
	/// Returns the rings as nested JSON arrays, outer ring first.
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(self.0.iter().map(|ring| ring.to_coord_json(precision)).collect::<Vec<_>>())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(GeometryTrait::compute_bounds))
	}
}

impl CompositeGeometryTrait<RingGeometry> for PolygonGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<RingGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<RingGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<RingGeometry> {
		self.0
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_elements!(PolygonGeometry, RingGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	fn square_with_hole() -> PolygonGeometry {
		PolygonGeometry::from(&[
			[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
			[[1, 1], [2, 1], [2, 2], [1, 2], [1, 1]],
		])
	}

	#[test]
	fn exterior_is_first_ring() {
		let polygon = square_with_hole();
		assert_eq!(polygon.len(), 2);
		assert_eq!(polygon.exterior().map(CompositeGeometryTrait::len), Some(5));
		assert_eq!(PolygonGeometry::new().exterior(), None);
	}

	#[test]
	fn compute_bounds_uses_all_rings() {
		assert_eq!(square_with_hole().compute_bounds(), Some([0.0, 0.0, 4.0, 4.0]));
	}

	#[test]
	fn to_coord_json() {
		let polygon = PolygonGeometry::from(&[[[0, 0], [1, 0], [0, 1], [0, 0]]]);
		assert_eq!(polygon.to_coord_json(None).stringify(), "[[[0,0],[1,0],[0,1],[0,0]]]");
	}
}
