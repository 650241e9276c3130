use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, RingGeometry};
use geostream_core::json::JsonValue;
use std::fmt::Debug;

/// A sequence of connected coordinates forming a line.
#[derive(Clone, PartialEq)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	/// Returns the coordinates as a JSON array of `[x, y]` pairs.
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(self.0.iter().map(|c| c.to_json(precision)).collect::<Vec<_>>())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		coordinate_bounds(&self.0)
	}
}

impl CompositeGeometryTrait<Coordinates> for LineStringGeometry {
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

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

impl From<RingGeometry> for LineStringGeometry {
	fn from(ring: RingGeometry) -> Self {
		Self(ring.0)
	}
}

crate::impl_from_elements!(LineStringGeometry, Coordinates);

pub(crate) fn coordinate_bounds(coords: &[Coordinates]) -> Option<[f64; 4]> {
	let first = coords.first()?;
	let mut bounds = [first.x(), first.y(), first.x(), first.y()];
	for coord in &coords[1..] {
		bounds[0] = bounds[0].min(coord.x());
		bounds[1] = bounds[1].min(coord.y());
		bounds[2] = bounds[2].max(coord.x());
		bounds[3] = bounds[3].max(coord.y());
	}
	Some(bounds)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn to_coord_json() {
		let line = LineStringGeometry::from(&[[0.0, 1.0], [2.0, 3.0]]);
		assert_eq!(line.to_coord_json(None).stringify(), "[[0,1],[2,3]]");
	}

	#[test]
	fn composite_accessors() {
		let mut line = LineStringGeometry::new();
		assert!(line.is_empty());
		line.push(Coordinates::new(1.0, 1.0));
		line.push(Coordinates::new(2.0, 2.0));
		assert_eq!(line.len(), 2);
		assert_eq!(line.into_inner().len(), 2);
	}

	#[test]
	fn compute_bounds() {
		let line = LineStringGeometry::from(&[[3, -1], [-2, 4], [0, 0]]);
		assert_eq!(line.compute_bounds(), Some([-2.0, -1.0, 3.0, 4.0]));
		assert_eq!(LineStringGeometry::new().compute_bounds(), None);
	}

	#[test]
	fn debug_format() {
		let line = LineStringGeometry::from(&[[1, 2], [3, 4]]);
		assert_eq!(format!("{line:?}"), "[[1.0, 2.0], [3.0, 4.0]]");
	}
}
