use super::RecordBatchSource;
use anyhow::{Context, Result, ensure};
use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use bytes::Bytes;
use parquet::{
	arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder},
	file::reader::ChunkReader,
};
use std::{fs::File, path::Path};

/// Streams record batches out of a Parquet file.
pub struct ParquetSource {
	name: String,
	schema: SchemaRef,
	num_rows: i64,
	num_row_groups: usize,
	reader: Option<ParquetRecordBatchReader>,
}

impl ParquetSource {
	pub fn from_path(path: &Path, batch_size: usize) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
		Self::new(file, batch_size, path.to_string_lossy().to_string())
	}

	/// Reads from a fully downloaded file.
	pub fn from_bytes(bytes: Bytes, batch_size: usize, name: &str) -> Result<Self> {
		Self::new(bytes, batch_size, name.to_string())
	}

	fn new<T: ChunkReader + 'static>(input: T, batch_size: usize, name: String) -> Result<Self> {
		ensure!(batch_size > 0, "batch size must be positive");
		let builder = ParquetRecordBatchReaderBuilder::try_new(input)
			.with_context(|| format!("reading Parquet metadata of {name}"))?;
		let schema = builder.schema().clone();
		let metadata = builder.metadata();
		let num_rows = metadata.file_metadata().num_rows();
		let num_row_groups = metadata.num_row_groups();
		let reader = builder.with_batch_size(batch_size).build()?;
		log::debug!("opened {name}: {num_rows} rows in {num_row_groups} row groups");
		Ok(Self {
			name,
			schema,
			num_rows,
			num_row_groups,
			reader: Some(reader),
		})
	}

	pub fn schema(&self) -> &SchemaRef {
		&self.schema
	}

	pub fn num_rows(&self) -> i64 {
		self.num_rows
	}

	pub fn num_row_groups(&self) -> usize {
		self.num_row_groups
	}
}

impl RecordBatchSource for ParquetSource {
	fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
		let Some(reader) = self.reader.as_mut() else {
			return Ok(None);
		};
		let batch = reader
			.next()
			.transpose()
			.with_context(|| format!("reading record batch from {}", self.name))?;
		if batch.is_none() {
			self.reader = None;
		}
		Ok(batch)
	}

	fn cancel(&mut self) {
		if self.reader.take().is_some() {
			log::debug!("cancelled reading {}", self.name);
		}
	}

	fn name(&self) -> &str {
		&self.name
	}
}
