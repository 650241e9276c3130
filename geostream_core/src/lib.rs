//! Binary value readers/writers and a small JSON model shared by the geostream crates.

pub mod io;

pub mod json;
