use anyhow::Result;
use geostream::{
	pipeline::classify::available_sources,
	source::{DEFAULT_BATCH_SIZE, ParquetSource, RecordBatchSource, SourceLocation},
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Parquet file to probe, a local path or an http(s) URL
	#[arg(required = true)]
	filename: String,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("probe {:?}", arguments.filename);

	let location: SourceLocation = arguments.filename.parse()?;
	let source = location.fetch().await?.open(DEFAULT_BATCH_SIZE)?;
	print!("{}", describe(&source));

	Ok(())
}

fn describe(source: &ParquetSource) -> String {
	let schema = source.schema();
	let mut text = String::new();
	text.push_str(&format!("source: {}\n", source.name()));
	text.push_str(&format!("rows: {}\n", source.num_rows()));
	text.push_str(&format!("row groups: {}\n", source.num_row_groups()));
	text.push_str("columns:\n");
	for field in schema.fields() {
		let nullable = if field.is_nullable() { ", nullable" } else { "" };
		text.push_str(&format!("  {}: {}{nullable}\n", field.name(), field.data_type()));
	}
	let sources = available_sources(schema);
	if sources.is_empty() {
		text.push_str("geometry: none\n");
	} else {
		let names: Vec<String> = sources.iter().map(ToString::to_string).collect();
		text.push_str(&format!("geometry: {}\n", names.join(", ")));
	}
	text
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{tests::run_command, tools::fixtures::write_places};
	use pretty_assertions::assert_eq;

	#[test]
	fn describe_fixture() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("places.parquet");
		write_places(&path)?;
		let source = ParquetSource::from_path(&path, 16)?;
		let text = describe(&source);
		let expected = format!(
			"source: {}\nrows: 4\nrow groups: 1\ncolumns:\n  name: Utf8\n  population: Int64\n  geometry: Binary, nullable\n  lon: Float64, nullable\n  lat: Float64, nullable\ngeometry: geometry (WKB), lon/lat\n",
			path.to_string_lossy()
		);
		assert_eq!(text, expected);
		Ok(())
	}

	#[test]
	fn probe_local() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("places.parquet");
		write_places(&path)?;
		run_command(vec!["geostream", "probe", "-q", &path.to_string_lossy()])?;
		Ok(())
	}

	#[test]
	fn probe_missing_file() {
		assert!(run_command(vec!["geostream", "probe", "-q", "/no/such/file.parquet"]).is_err());
	}
}
