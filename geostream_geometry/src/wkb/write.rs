use super::{TYPE_LINESTRING, TYPE_MULTIPOLYGON, TYPE_POINT, TYPE_POLYGON};
use crate::geo::{Coordinates, Geometry, PolygonGeometry};
use anyhow::{Context, Result};
use byteorder::ByteOrder;
use geostream_core::io::{ValueWriter, ValueWriterVec};

/// Byte order of an encoded WKB buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
	Big,
	Little,
}

impl Endianness {
	/// The leading WKB byte order flag.
	#[must_use]
	pub fn flag(self) -> u8 {
		match self {
			Endianness::Big => 0,
			Endianness::Little => 1,
		}
	}
}

/// Encodes a geometry as WKB.
///
/// # Errors
/// Fails if an element count does not fit into 32 bits.
pub fn encode(geometry: &Geometry, endianness: Endianness) -> Result<Vec<u8>> {
	match endianness {
		Endianness::Big => {
			let mut writer = ValueWriterVec::new_be();
			write_geometry(&mut writer, geometry, endianness)?;
			Ok(writer.into_vec())
		}
		Endianness::Little => {
			let mut writer = ValueWriterVec::new_le();
			write_geometry(&mut writer, geometry, endianness)?;
			Ok(writer.into_vec())
		}
	}
}

fn write_geometry<E: ByteOrder>(writer: &mut dyn ValueWriter<E>, geometry: &Geometry, endianness: Endianness) -> Result<()> {
	match geometry {
		Geometry::Point(g) => {
			write_header(writer, endianness, TYPE_POINT)?;
			write_coordinates(writer, g.as_coord())
		}
		Geometry::LineString(g) => {
			write_header(writer, endianness, TYPE_LINESTRING)?;
			write_coordinate_list(writer, &g.0)
		}
		Geometry::Polygon(g) => {
			write_header(writer, endianness, TYPE_POLYGON)?;
			write_polygon(writer, g)
		}
		Geometry::MultiPolygon(g) => {
			write_header(writer, endianness, TYPE_MULTIPOLYGON)?;
			write_count(writer, g.0.len())?;
			for polygon in &g.0 {
				write_header(writer, endianness, TYPE_POLYGON)?;
				write_polygon(writer, polygon)?;
			}
			Ok(())
		}
	}
}

fn write_header<E: ByteOrder>(writer: &mut dyn ValueWriter<E>, endianness: Endianness, type_code: u32) -> Result<()> {
	writer.write_u8(endianness.flag())?;
	writer.write_u32(type_code)
}

fn write_count<E: ByteOrder>(writer: &mut dyn ValueWriter<E>, count: usize) -> Result<()> {
	let count = u32::try_from(count).context("element count exceeds 32 bits")?;
	writer.write_u32(count)
}

fn write_coordinates<E: ByteOrder>(writer: &mut dyn ValueWriter<E>, coord: &Coordinates) -> Result<()> {
	writer.write_f64(coord.x())?;
	writer.write_f64(coord.y())
}

fn write_coordinate_list<E: ByteOrder>(writer: &mut dyn ValueWriter<E>, coords: &[Coordinates]) -> Result<()> {
	write_count(writer, coords.len())?;
	for coord in coords {
		write_coordinates(writer, coord)?;
	}
	Ok(())
}

fn write_polygon<E: ByteOrder>(writer: &mut dyn ValueWriter<E>, polygon: &PolygonGeometry) -> Result<()> {
	write_count(writer, polygon.0.len())?;
	for ring in &polygon.0 {
		write_coordinate_list(writer, &ring.0)?;
	}
	Ok(())
}
