//! Well-Known-Binary (WKB) geometry codec.
//!
//! A WKB buffer starts with a one byte order flag (`0` big-endian, `1` little-endian) and a
//! four byte type code whose low eight bits select the shape. All further multi-byte fields use
//! the declared byte order. Supported shapes are Point (1), LineString (2), Polygon (3) and
//! MultiPolygon (6).

mod read;
mod write;

pub use read::{decode, try_decode};
pub use write::{Endianness, encode};

const TYPE_POINT: u32 = 1;
const TYPE_LINESTRING: u32 = 2;
const TYPE_POLYGON: u32 = 3;
const TYPE_MULTIPOLYGON: u32 = 6;
