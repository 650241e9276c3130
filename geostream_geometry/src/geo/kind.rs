use super::Geometry;
use enumset::{EnumSet, EnumSetType};
use std::fmt::Display;

/// Geometry family with Multi* variants folded into their single counterpart.
#[derive(Debug, EnumSetType, PartialOrd)]
pub enum GeometryKind {
	Point,
	LineString,
	Polygon,
}

impl GeometryKind {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			GeometryKind::Point => "point",
			GeometryKind::LineString => "linestring",
			GeometryKind::Polygon => "polygon",
		}
	}
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Collects the distinct kinds of the given geometries.
pub fn detect_kinds<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> EnumSet<GeometryKind> {
	geometries.into_iter().map(Geometry::kind).collect()
}
