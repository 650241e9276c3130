use super::{CompositeGeometryTrait, GeometryTrait, PolygonGeometry, merge_bounds};
use geostream_core::json::JsonValue;
use std::fmt::Debug;

/// A collection of polygons treated as one geometry.
#[derive(Clone, PartialEq)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(
			self
				.0
				.iter()
				.map(|polygon| polygon.to_coord_json(precision))
				.collect::<Vec<_>>(),
		)
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(GeometryTrait::compute_bounds))
	}
}

impl CompositeGeometryTrait<PolygonGeometry> for MultiPolygonGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<PolygonGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<PolygonGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<PolygonGeometry> {
		self.0
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

impl From<PolygonGeometry> for MultiPolygonGeometry {
	fn from(polygon: PolygonGeometry) -> Self {
		Self(vec![polygon])
	}
}

crate::impl_from_elements!(MultiPolygonGeometry, PolygonGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	fn two_squares() -> MultiPolygonGeometry {
		MultiPolygonGeometry::from(&[
			[[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]],
			[[[5, 5], [6, 5], [6, 7], [5, 7], [5, 5]]],
		])
	}

	#[test]
	fn compute_bounds_spans_members() {
		assert_eq!(two_squares().compute_bounds(), Some([0.0, 0.0, 6.0, 7.0]));
		assert_eq!(MultiPolygonGeometry::new().compute_bounds(), None);
	}

	#[test]
	fn to_coord_json_nests_three_levels() {
		let json = two_squares().to_coord_json(None).stringify();
		assert!(json.starts_with("[[[[0,0],[1,0]"));
		assert!(json.ends_with("[5,5]]]]"));
	}

	#[test]
	fn from_single_polygon() {
		let polygon = PolygonGeometry::from(&[[[0, 0], [1, 0], [0, 1], [0, 0]]]);
		let multi = MultiPolygonGeometry::from(polygon.clone());
		assert_eq!(multi.into_inner(), vec![polygon]);
	}
}
