pub mod probe;
pub mod stream;

#[cfg(test)]
pub mod fixtures {
	use anyhow::Result;
	use arrow_array::{ArrayRef, BinaryArray, Float64Array, Int64Array, RecordBatch, StringArray};
	use geostream::geometry::{Geometry, wkb};
	use parquet::arrow::ArrowWriter;
	use std::{fs::File, path::Path, sync::Arc};

	/// Four rows: a WKB point, a lon/lat pair, a row without geometry and a WKB polygon.
	pub fn write_places(path: &Path) -> Result<()> {
		let point = wkb::encode(&Geometry::new_point([13.4, 52.5]), wkb::Endianness::Little)?;
		let polygon = wkb::encode(
			&Geometry::new_polygon(vec![vec![[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 0.0]]]),
			wkb::Endianness::Big,
		)?;
		let columns: Vec<(&str, ArrayRef)> = vec![
			("name", Arc::new(StringArray::from(vec!["Berlin", "Rome", "Nowhere", "Field"]))),
			("population", Arc::new(Int64Array::from(vec![3_755_251, 2_749_031, 0, 12]))),
			(
				"geometry",
				Arc::new(BinaryArray::from_opt_vec(vec![
					Some(point.as_slice()),
					None,
					None,
					Some(polygon.as_slice()),
				])),
			),
			("lon", Arc::new(Float64Array::from(vec![None, Some(12.5), None, None]))),
			("lat", Arc::new(Float64Array::from(vec![None, Some(41.9), None, None]))),
		];
		let batch = RecordBatch::try_from_iter(columns)?;
		let mut writer = ArrowWriter::try_new(File::create(path)?, batch.schema(), None)?;
		writer.write(&batch)?;
		writer.close()?;
		Ok(())
	}
}
