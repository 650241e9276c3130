use anyhow::{Result, bail, ensure};
use geostream::{
	config::{Config, LayerConfig},
	pipeline::StreamLimit,
	scheduler::{GeoJsonDirSink, LayerRegistry, UpdatePolicy},
	session::Session,
};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Parquet files to stream, local paths or http(s) URLs.
	/// Every file becomes one layer, written as <output>/layer-<n>.geojson
	#[arg(num_args = 0.., verbatim_doc_comment)]
	pub sources: Vec<String>,

	/// Path to a configuration file (YAML) with defaults and additional layers.
	/// Command line arguments override configuration file settings.
	#[arg(short = 'c', long, value_name = "FILE", display_order = 0, verbatim_doc_comment)]
	pub config: Option<PathBuf>,

	/// Maximum number of features per layer, a positive integer or "unbounded". Default: unbounded
	#[arg(short, long, value_name = "N", allow_negative_numbers = true, display_order = 1)]
	pub limit: Option<StreamLimit>,

	/// When layers are written. Default: live
	#[arg(short, long, value_enum, display_order = 1)]
	pub policy: Option<UpdatePolicy>,

	/// Output directory. Default: geostream-output
	#[arg(short, long, value_name = "DIR", display_order = 2)]
	pub output: Option<PathBuf>,

	/// Rows per record batch. Default: 8192
	#[arg(long, display_order = 3)]
	pub batch_size: Option<usize>,

	/// Frame interval in milliseconds for live updates. Default: 16
	#[arg(long, value_name = "MS", display_order = 3)]
	pub frame_ms: Option<u64>,

	/// Round written coordinates to this many decimal places
	#[arg(long, display_order = 3)]
	pub precision: Option<u8>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = if let Some(config_path) = &arguments.config {
		Config::from_path(config_path)?
	} else {
		Config::default()
	};
	config.override_optional_limit(&arguments.limit);
	config.override_optional_update_policy(&arguments.policy);
	config.override_optional_output_dir(&arguments.output);
	config.override_optional_batch_size(&arguments.batch_size);
	config.override_optional_frame_interval_ms(&arguments.frame_ms);
	config
		.layers
		.extend(arguments.sources.iter().map(|source| LayerConfig::from(source.as_str())));
	ensure!(!config.layers.is_empty(), "no sources given");

	let options = config.session_options()?;
	let layers = config
		.layers
		.iter()
		.map(|layer| Ok((layer.name.clone(), layer.location()?)))
		.collect::<Result<Vec<_>>>()?;

	let sink = GeoJsonDirSink::new(&config.output_dir(), arguments.precision)?;
	let mut session = Session::new(sink, &options);
	for (name, location) in layers {
		session.add_layer(name, location, config.limit())?;
	}
	session.run_until_idle().await?;

	print!("{}", summary(session.registry()));

	let failed = session
		.registry()
		.layers()
		.filter(|(_, layer)| layer.scheduler().has_failed())
		.count();
	if failed > 0 {
		bail!("{failed} of {} layers failed", session.registry().len());
	}
	Ok(())
}

fn summary(registry: &LayerRegistry<GeoJsonDirSink>) -> String {
	let mut text = String::new();
	for (id, layer) in registry.layers() {
		let scheduler = layer.scheduler();
		let counters = scheduler.counters();
		text.push_str(&format!("{id} '{}': {}\n", layer.name(), scheduler.status()));
		text.push_str(&format!(
			"  features: {}, batches: {}, rendered: {}\n",
			counters.processed, counters.batches, counters.rendered
		));
		if !scheduler.kinds().is_empty() {
			let kinds: Vec<String> = scheduler.kinds().iter().map(|kind| kind.to_string()).collect();
			text.push_str(&format!("  kinds: {}\n", kinds.join(", ")));
		}
		if let Some(bounds) = scheduler.bounds() {
			text.push_str(&format!(
				"  bbox: [{}, {}, {}, {}]\n",
				bounds[0], bounds[1], bounds[2], bounds[3]
			));
		}
		text.push_str(&format!("  output: {}\n", registry.sink().layer_path(id).display()));
	}
	text
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{tests::run_command, tools::fixtures::write_places};
	use pretty_assertions::assert_eq;
	use std::fs;

	#[test]
	fn stream_to_directory() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let input = dir.path().join("places.parquet");
		write_places(&input)?;
		let output = dir.path().join("out");
		run_command(vec![
			"geostream",
			"stream",
			"-q",
			"--output",
			&output.to_string_lossy(),
			"--batch-size",
			"2",
			&input.to_string_lossy(),
		])?;
		let geojson = fs::read_to_string(output.join("layer-0.geojson"))?;
		assert!(geojson.starts_with(r#"{"bbox":[0,0,13.4,52.5],"features":[{"geometry":{"coordinates":[13.4,52.5],"type":"Point"},"id":"layer-0-0","properties":{"name":"Berlin","population":3755251},"type":"Feature"}"#));
		assert!(geojson.contains(r#""id":"layer-0-2""#));
		assert!(!geojson.contains("Nowhere"));
		Ok(())
	}

	#[test]
	fn limit_and_final_policy() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let input = dir.path().join("places.parquet");
		write_places(&input)?;
		let output = dir.path().join("out");
		run_command(vec![
			"geostream",
			"stream",
			"-q",
			"-o",
			&output.to_string_lossy(),
			"--limit",
			"1",
			"--policy",
			"final",
			&input.to_string_lossy(),
		])?;
		let geojson = fs::read_to_string(output.join("layer-0.geojson"))?;
		assert_eq!(geojson.matches(r#""type":"Feature""#).count(), 1);
		Ok(())
	}

	#[test]
	fn config_file_adds_layers() -> Result<()> {
		let dir = tempfile::tempdir()?;
		write_places(&dir.path().join("places.parquet"))?;
		let config = dir.path().join("geostream.yml");
		fs::write(
			&config,
			"update_policy: final\noutput_dir: result\nlayers:\n  - name: Places\n    source: places.parquet\n",
		)?;
		run_command(vec!["geostream", "stream", "-q", "-c", &config.to_string_lossy()])?;
		assert!(dir.path().join("result").join("layer-0.geojson").exists());
		Ok(())
	}

	#[test]
	fn failed_layer_is_reported() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let output = dir.path().join("out");
		let err = run_command(vec![
			"geostream",
			"stream",
			"-q",
			"-o",
			&output.to_string_lossy(),
			"/no/such/file.parquet",
		])
		.unwrap_err();
		assert_eq!(err.to_string(), "1 of 1 layers failed");
		Ok(())
	}

	#[test]
	fn summary_lists_layers() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let input = dir.path().join("places.parquet");
		write_places(&input)?;
		let output = dir.path().join("out");
		let runtime = tokio::runtime::Runtime::new()?;
		let text = runtime.block_on(async {
			let mut session = Session::new(GeoJsonDirSink::new(&output, None)?, &Default::default());
			session.add_layer(Some("Places".to_string()), input.to_string_lossy().parse()?, StreamLimit::Unbounded)?;
			session.run_until_idle().await?;
			anyhow::Ok(summary(session.registry()))
		})?;
		assert_eq!(
			text,
			format!(
				"layer-0 'Places': Finished streaming.\n  features: 3, batches: 1, rendered: 3\n  kinds: point, polygon\n  bbox: [0, 0, 13.4, 52.5]\n  output: {}\n",
				output.join("layer-0.geojson").display()
			)
		);
		Ok(())
	}
}
