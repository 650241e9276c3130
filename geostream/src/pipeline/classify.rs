//! Per-row geometry extraction.
//!
//! A row yields a feature when one of its geometry sources produces a geometry. Sources are
//! tried in [`GEOMETRY_SOURCE_PRECEDENCE`] order; the first success wins and a failed WKB decode
//! simply falls through to the next source.

use crate::source::Row;
use arrow_schema::{DataType, Schema};
use geostream_geometry::{GeoFeature, GeoProperties, GeoValue, Geometry, wkb};
use std::fmt::Display;

pub const GEOMETRY_COLUMN: &str = "geometry";
pub const BBOX_COLUMN: &str = "geometry_bbox";
pub const LON_COLUMN: &str = "lon";
pub const LAT_COLUMN: &str = "lat";

/// Columns consumed by geometry extraction; they never appear in feature properties.
pub const RESERVED_COLUMNS: [&str; 4] = [GEOMETRY_COLUMN, BBOX_COLUMN, LON_COLUMN, LAT_COLUMN];

/// Largest integer magnitude a JSON consumer can hold without losing precision.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometrySource {
	/// WKB bytes in the `geometry` column.
	Wkb,
	/// A point built from the numeric `lon` and `lat` columns.
	LonLat,
	/// WKB bytes in the `geometry_bbox` column.
	BboxWkb,
}

pub const GEOMETRY_SOURCE_PRECEDENCE: [GeometrySource; 3] =
	[GeometrySource::Wkb, GeometrySource::LonLat, GeometrySource::BboxWkb];

impl GeometrySource {
	pub fn extract(&self, row: &Row) -> Option<Geometry> {
		match self {
			GeometrySource::Wkb => wkb_column(row, GEOMETRY_COLUMN),
			GeometrySource::LonLat => {
				let lon = coordinate(row.get(LON_COLUMN)?)?;
				let lat = coordinate(row.get(LAT_COLUMN)?)?;
				Some(Geometry::new_point([lon, lat]))
			}
			GeometrySource::BboxWkb => wkb_column(row, BBOX_COLUMN),
		}
	}

	/// Whether a schema carries the columns this source reads.
	pub fn is_available(&self, schema: &Schema) -> bool {
		let has = |name: &str, accept: fn(&DataType) -> bool| {
			schema
				.field_with_name(name)
				.is_ok_and(|field| accept(field.data_type()))
		};
		match self {
			GeometrySource::Wkb => has(GEOMETRY_COLUMN, is_binary),
			GeometrySource::LonLat => has(LON_COLUMN, is_numeric) && has(LAT_COLUMN, is_numeric),
			GeometrySource::BboxWkb => has(BBOX_COLUMN, is_binary),
		}
	}
}

impl Display for GeometrySource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			GeometrySource::Wkb => "geometry (WKB)",
			GeometrySource::LonLat => "lon/lat",
			GeometrySource::BboxWkb => "geometry_bbox (WKB)",
		})
	}
}

fn wkb_column(row: &Row, column: &str) -> Option<Geometry> {
	match row.get(column)? {
		GeoValue::Binary(bytes) => wkb::decode(bytes),
		_ => None,
	}
}

fn coordinate(value: &GeoValue) -> Option<f64> {
	let number = match value {
		GeoValue::Double(v) => *v,
		GeoValue::Float(v) => f64::from(*v),
		GeoValue::Int(v) => *v as f64,
		GeoValue::UInt(v) => *v as f64,
		_ => return None,
	};
	(!number.is_nan()).then_some(number)
}

fn is_binary(data_type: &DataType) -> bool {
	matches!(
		data_type,
		DataType::Binary | DataType::LargeBinary | DataType::BinaryView | DataType::FixedSizeBinary(_)
	)
}

fn is_numeric(data_type: &DataType) -> bool {
	data_type.is_numeric()
}

/// Geometry sources a schema can offer, in precedence order.
pub fn available_sources(schema: &Schema) -> Vec<GeometrySource> {
	GEOMETRY_SOURCE_PRECEDENCE
		.into_iter()
		.filter(|source| source.is_available(schema))
		.collect()
}

/// The geometry of a row together with the source it came from.
pub fn classify_with_source(row: &Row) -> Option<(GeometrySource, Geometry)> {
	GEOMETRY_SOURCE_PRECEDENCE
		.iter()
		.find_map(|source| source.extract(row).map(|geometry| (*source, geometry)))
}

/// The geometry of a row, or `None` when the row must be dropped.
pub fn classify(row: &Row) -> Option<Geometry> {
	classify_with_source(row).map(|(_, geometry)| geometry)
}

/// All non-reserved columns of a row, with integers beyond the JSON-safe range turned into
/// decimal strings.
pub fn properties(row: &Row) -> GeoProperties {
	row.iter()
		.filter(|(name, _)| !RESERVED_COLUMNS.contains(name))
		.map(|(name, value)| (name.to_string(), json_safe(value)))
		.collect()
}

fn json_safe(value: &GeoValue) -> GeoValue {
	match value {
		GeoValue::Int(v) if v.unsigned_abs() > MAX_SAFE_INTEGER => GeoValue::String(v.to_string()),
		GeoValue::UInt(v) if *v > MAX_SAFE_INTEGER => GeoValue::String(v.to_string()),
		other => other.clone(),
	}
}

/// Builds the feature for a row, numbering it with `id`.
pub fn to_feature(row: &Row, id: u64) -> Option<GeoFeature> {
	let geometry = classify(row)?;
	let mut feature = GeoFeature::new(geometry);
	feature.set_id(id);
	feature.set_properties(properties(row));
	Some(feature)
}
