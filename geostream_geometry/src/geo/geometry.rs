use super::*;
use geostream_core::json::{JsonObject, JsonValue};
use std::fmt::Debug;

/// A decoded geometry. Only the shapes produced by the WKB decoder are represented.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPolygon(MultiPolygonGeometry),
}

impl Geometry {
	pub fn new_point<T>(value: [T; 2]) -> Self
	where
		Coordinates: From<[T; 2]>,
	{
		Self::Point(PointGeometry::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(LineStringGeometry::from(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(PolygonGeometry::from(value))
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(MultiPolygonGeometry::from(value))
	}

	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	#[must_use]
	pub fn kind(&self) -> GeometryKind {
		match self {
			Geometry::Point(_) => GeometryKind::Point,
			Geometry::LineString(_) => GeometryKind::LineString,
			Geometry::Polygon(_) | Geometry::MultiPolygon(_) => GeometryKind::Polygon,
		}
	}

	#[must_use]
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Geometry::Point(g) => g.compute_bounds(),
			Geometry::LineString(g) => g.compute_bounds(),
			Geometry::Polygon(g) => g.compute_bounds(),
			Geometry::MultiPolygon(g) => g.compute_bounds(),
		}
	}

	/// GeoJSON geometry object: `{"type": ..., "coordinates": ...}`.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonObject {
		let coordinates = match self {
			Geometry::Point(g) => g.to_coord_json(precision),
			Geometry::LineString(g) => g.to_coord_json(precision),
			Geometry::Polygon(g) => g.to_coord_json(precision),
			Geometry::MultiPolygon(g) => g.to_coord_json(precision),
		};
		JsonObject::from(vec![
			("type", JsonValue::from(self.type_name())),
			("coordinates", coordinates),
		])
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self::new_multi_polygon(vec![
			vec![
				vec![[0.0, 0.0], [5.0, 0.0], [2.5, 4.0], [0.0, 0.0]],
				vec![[2.0, 1.0], [2.5, 2.0], [3.0, 1.0], [2.0, 1.0]],
			],
			vec![vec![[6.0, 0.0], [9.0, 0.0], [9.0, 4.0], [6.0, 4.0], [6.0, 0.0]]],
		])
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::LineString(g) => g,
			Geometry::Polygon(g) => g,
			Geometry::MultiPolygon(g) => g,
		};
		f.debug_tuple(self.type_name()).field(inner).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case(Geometry::new_point([1.0, 2.0]), "Point", GeometryKind::Point)]
	#[case(Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]]), "LineString", GeometryKind::LineString)]
	#[case(Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]), "Polygon", GeometryKind::Polygon)]
	#[case(Geometry::new_example(), "MultiPolygon", GeometryKind::Polygon)]
	fn type_name_and_kind(#[case] geometry: Geometry, #[case] name: &str, #[case] kind: GeometryKind) {
		assert_eq!(geometry.type_name(), name);
		assert_eq!(geometry.kind(), kind);
	}

	#[test]
	fn to_json_point() {
		let json = Geometry::new_point([13.4, 52.5]).to_json(None);
		assert_eq!(json.stringify(), r#"{"coordinates":[13.4,52.5],"type":"Point"}"#);
	}

	#[test]
	fn compute_bounds() {
		assert_eq!(Geometry::new_example().compute_bounds(), Some([0.0, 0.0, 9.0, 4.0]));
	}

	#[test]
	fn debug_format() {
		let geometry = Geometry::new_line_string(vec![[1.0, 2.0], [3.0, 4.0]]);
		assert_eq!(format!("{geometry:?}"), "LineString([[1.0, 2.0], [3.0, 4.0]])");
	}
}
