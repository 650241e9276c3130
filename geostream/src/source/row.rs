use anyhow::{Result, bail};
use arrow_array::{Array, RecordBatch, cast::AsArray, types::*};
use arrow_cast::display::{ArrayFormatter, FormatOptions};
use arrow_schema::DataType;
use geostream_geometry::GeoValue;

/// The values of one record, in column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
	values: Vec<(String, GeoValue)>,
}

impl Row {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, name: &str, value: GeoValue) {
		self.values.push((name.to_string(), value));
	}

	/// First value of the column named `name`.
	pub fn get(&self, name: &str) -> Option<&GeoValue> {
		self.values.iter().find(|(key, _)| key == name).map(|(_, value)| value)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &GeoValue)> {
		self.values.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl From<Vec<(&str, GeoValue)>> for Row {
	fn from(values: Vec<(&str, GeoValue)>) -> Self {
		Row {
			values: values.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
		}
	}
}

impl IntoIterator for Row {
	type Item = (String, GeoValue);
	type IntoIter = std::vec::IntoIter<(String, GeoValue)>;
	fn into_iter(self) -> Self::IntoIter {
		self.values.into_iter()
	}
}

struct Column<'a> {
	name: &'a str,
	array: &'a dyn Array,
	formatter: Option<ArrayFormatter<'a>>,
}

/// Row-wise access to a record batch.
///
/// Scalar and binary columns map onto the matching [`GeoValue`] variant. Any other column type
/// (dates, decimals, nested types, dictionaries) is rendered as text.
pub struct BatchRows<'a> {
	columns: Vec<Column<'a>>,
	num_rows: usize,
}

impl<'a> BatchRows<'a> {
	pub fn try_new(batch: &'a RecordBatch) -> Result<Self> {
		let options = FormatOptions::default();
		let mut columns = Vec::with_capacity(batch.num_columns());
		for (field, array) in batch.schema_ref().fields().iter().zip(batch.columns()) {
			let array = array.as_ref();
			let formatter = if is_native(array.data_type()) {
				None
			} else {
				log::trace!("column {} of type {} is read as text", field.name(), array.data_type());
				Some(ArrayFormatter::try_new(array, &options)?)
			};
			columns.push(Column {
				name: field.name(),
				array,
				formatter,
			});
		}
		Ok(Self {
			columns,
			num_rows: batch.num_rows(),
		})
	}

	pub fn len(&self) -> usize {
		self.num_rows
	}

	pub fn is_empty(&self) -> bool {
		self.num_rows == 0
	}

	pub fn row(&self, index: usize) -> Result<Row> {
		let mut row = Row {
			values: Vec::with_capacity(self.columns.len()),
		};
		for column in &self.columns {
			let value = if column.array.is_null(index) {
				GeoValue::Null
			} else if let Some(formatter) = &column.formatter {
				GeoValue::String(formatter.value(index).try_to_string()?)
			} else {
				native_value(column.array, index)?
			};
			row.push(column.name, value);
		}
		Ok(row)
	}
}

fn is_native(data_type: &DataType) -> bool {
	use DataType::*;
	matches!(
		data_type,
		Boolean
			| Int8 | Int16
			| Int32 | Int64
			| UInt8 | UInt16
			| UInt32 | UInt64
			| Float32 | Float64
			| Utf8 | LargeUtf8
			| Utf8View | Binary
			| LargeBinary | BinaryView
			| FixedSizeBinary(_)
	)
}

fn native_value(array: &dyn Array, index: usize) -> Result<GeoValue> {
	use DataType::*;
	Ok(match array.data_type() {
		Boolean => GeoValue::Bool(array.as_boolean().value(index)),
		Int8 => GeoValue::Int(i64::from(array.as_primitive::<Int8Type>().value(index))),
		Int16 => GeoValue::Int(i64::from(array.as_primitive::<Int16Type>().value(index))),
		Int32 => GeoValue::Int(i64::from(array.as_primitive::<Int32Type>().value(index))),
		Int64 => GeoValue::Int(array.as_primitive::<Int64Type>().value(index)),
		UInt8 => GeoValue::UInt(u64::from(array.as_primitive::<UInt8Type>().value(index))),
		UInt16 => GeoValue::UInt(u64::from(array.as_primitive::<UInt16Type>().value(index))),
		UInt32 => GeoValue::UInt(u64::from(array.as_primitive::<UInt32Type>().value(index))),
		UInt64 => GeoValue::UInt(array.as_primitive::<UInt64Type>().value(index)),
		Float32 => GeoValue::Float(array.as_primitive::<Float32Type>().value(index)),
		Float64 => GeoValue::Double(array.as_primitive::<Float64Type>().value(index)),
		Utf8 => GeoValue::from(array.as_string::<i32>().value(index)),
		LargeUtf8 => GeoValue::from(array.as_string::<i64>().value(index)),
		Utf8View => GeoValue::from(array.as_string_view().value(index)),
		Binary => GeoValue::Binary(array.as_binary::<i32>().value(index).to_vec()),
		LargeBinary => GeoValue::Binary(array.as_binary::<i64>().value(index).to_vec()),
		BinaryView => GeoValue::Binary(array.as_binary_view().value(index).to_vec()),
		FixedSizeBinary(_) => GeoValue::Binary(array.as_fixed_size_binary().value(index).to_vec()),
		other => bail!("column type {other} has no native value mapping"),
	})
}
