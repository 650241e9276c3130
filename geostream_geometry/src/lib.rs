mod geo;
pub mod wkb;

pub use geo::*;
