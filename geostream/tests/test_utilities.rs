#![allow(unused)]

use arrow_array::{ArrayRef, BinaryArray, Float64Array, RecordBatch, StringArray};
use assert_cmd::{Command, cargo};
use geostream::geometry::{Geometry, wkb};
use parquet::arrow::ArrowWriter;
use std::{
	fs::File,
	path::{Path, PathBuf},
	sync::Arc,
};
use tempfile::{TempDir, tempdir};

#[cfg(windows)]
pub const BINARY_NAME: &str = "geostream.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "geostream";

/// Helper to create a Command for the geostream binary.
pub fn geostream_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// Helper to get a temp file path.
pub fn get_temp_output(filename: &str) -> (TempDir, PathBuf) {
	let dir = tempdir().expect("failed to create temp dir");
	let path = dir.path().join(filename);
	(dir, path)
}

/// Writes `count` rows: even rows carry a WKB point at (i, -i), odd rows a lon/lat pair
/// at (i, i), every third row additionally misses both and is dropped.
pub fn write_grid(path: &Path, count: usize) {
	let mut names = Vec::new();
	let mut geometries: Vec<Option<Vec<u8>>> = Vec::new();
	let mut lons = Vec::new();
	let mut lats = Vec::new();
	for i in 0..count {
		let x = i as f64;
		names.push(format!("row {i}"));
		if i % 3 == 2 {
			geometries.push(None);
			lons.push(None);
			lats.push(None);
		} else if i % 2 == 0 {
			let point = wkb::encode(&Geometry::new_point([x, -x]), wkb::Endianness::Little).unwrap();
			geometries.push(Some(point));
			lons.push(None);
			lats.push(None);
		} else {
			geometries.push(None);
			lons.push(Some(x));
			lats.push(Some(x));
		}
	}
	let columns: Vec<(&str, ArrayRef)> = vec![
		("name", Arc::new(StringArray::from(names))),
		(
			"geometry",
			Arc::new(BinaryArray::from_opt_vec(geometries.iter().map(|g| g.as_deref()).collect())),
		),
		("lon", Arc::new(Float64Array::from(lons))),
		("lat", Arc::new(Float64Array::from(lats))),
	];
	let batch = RecordBatch::try_from_iter(columns).unwrap();
	let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), batch.schema(), None).unwrap();
	writer.write(&batch).unwrap();
	writer.close().unwrap();
}

/// Number of rows `write_grid` turns into features.
pub fn grid_features(count: usize) -> usize {
	(0..count).filter(|i| i % 3 != 2).count()
}
