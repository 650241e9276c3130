use super::{TYPE_LINESTRING, TYPE_MULTIPOLYGON, TYPE_POINT, TYPE_POLYGON};
use crate::geo::{
	Coordinates, Geometry, LineStringGeometry, MultiPolygonGeometry, PointGeometry, PolygonGeometry, RingGeometry,
};
use anyhow::{Context, Result, bail};
use byteorder::{BigEndian, ByteOrder};
use geostream_core::io::{ValueReader, ValueReaderSlice};

/// Bytes of one coordinate pair.
const COORD_SIZE: u64 = 16;
/// Bytes of a count field.
const COUNT_SIZE: u64 = 4;
/// Bytes of the per-member header inside a MultiPolygon.
const HEADER_SIZE: u64 = 5;

/// Decodes a WKB buffer, returning `None` for anything that is not a complete, supported geometry.
///
/// Failures are logged and never panic, so callers can fall back to other geometry sources.
#[must_use]
pub fn decode(bytes: &[u8]) -> Option<Geometry> {
	match try_decode(bytes) {
		Ok(geometry) => Some(geometry),
		Err(err) => {
			log::warn!("skipping undecodable WKB geometry ({} bytes): {err:#}", bytes.len());
			None
		}
	}
}

/// Decodes a WKB buffer, reporting why decoding failed.
///
/// # Errors
/// Fails on an unknown byte order flag, an unsupported type code, a truncated buffer, or a
/// declared element count that the remaining bytes cannot hold.
pub fn try_decode(bytes: &[u8]) -> Result<Geometry> {
	let mut reader = ValueReaderSlice::new_le(bytes);
	let flag = reader.read_u8().context("reading byte order flag")?;
	match flag {
		0 => {
			let mut reader = reader.with_byte_order::<BigEndian>(1)?;
			read_geometry(&mut reader)
		}
		1 => read_geometry(&mut reader),
		_ => bail!("invalid byte order flag {flag}"),
	}
}

fn read_geometry<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>) -> Result<Geometry> {
	let type_code = reader.read_u32().context("reading geometry type")? & 0xFF;
	Ok(match type_code {
		TYPE_POINT => Geometry::Point(PointGeometry(read_coordinates(reader)?)),
		TYPE_LINESTRING => Geometry::LineString(LineStringGeometry(read_coordinate_list(reader)?)),
		TYPE_POLYGON => Geometry::Polygon(read_polygon(reader)?),
		TYPE_MULTIPOLYGON => Geometry::MultiPolygon(read_multi_polygon(reader)?),
		_ => bail!("unsupported geometry type {type_code}"),
	})
}

fn read_coordinates<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>) -> Result<Coordinates> {
	let x = reader.read_f64().context("reading x")?;
	let y = reader.read_f64().context("reading y")?;
	Ok(Coordinates::new(x, y))
}

/// Reads a count and checks that `count * element_size` bytes are still available.
fn read_count<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>, element_size: u64) -> Result<usize> {
	let count = reader.read_u32().context("reading element count")?;
	reader.ensure_remaining(u64::from(count) * element_size)?;
	Ok(count as usize)
}

fn read_coordinate_list<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>) -> Result<Vec<Coordinates>> {
	let count = read_count(reader, COORD_SIZE)?;
	let mut coords = Vec::with_capacity(count);
	for _ in 0..count {
		coords.push(read_coordinates(reader)?);
	}
	Ok(coords)
}

fn read_polygon<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>) -> Result<PolygonGeometry> {
	let count = read_count(reader, COUNT_SIZE)?;
	let mut rings = Vec::with_capacity(count);
	for index in 0..count {
		let ring = read_coordinate_list(reader).with_context(|| format!("reading ring {index}"))?;
		rings.push(RingGeometry(ring));
	}
	Ok(PolygonGeometry(rings))
}

fn read_multi_polygon<'a, E: ByteOrder + 'a>(reader: &mut dyn ValueReader<'a, E>) -> Result<MultiPolygonGeometry> {
	let count = read_count(reader, HEADER_SIZE + COUNT_SIZE)?;
	let mut polygons = Vec::with_capacity(count);
	for index in 0..count {
		// member headers repeat the byte order and type; the outer byte order stays in effect
		reader.skip(HEADER_SIZE)?;
		polygons.push(read_polygon(reader).with_context(|| format!("reading polygon {index}"))?);
	}
	Ok(MultiPolygonGeometry(polygons))
}
