// Core geometric types: `Coordinates`, `PointGeometry`, `LineStringGeometry`, `RingGeometry`,
// `PolygonGeometry` and `MultiPolygonGeometry`. They share the traits in `traits.rs` for
// GeoJSON coordinate output and bounding-box computation.

mod coordinates;
mod linestring;
mod macros;
mod multi_polygon;
mod point;
mod polygon;
mod ring;
mod traits;

pub use coordinates::*;
pub use linestring::*;
pub use multi_polygon::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
