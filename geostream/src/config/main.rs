use super::LayerConfig;
use crate::{pipeline::StreamLimit, scheduler::UpdatePolicy, session::SessionOptions, source::DEFAULT_BATCH_SIZE};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
	time::Duration,
};

pub const DEFAULT_OUTPUT_DIR: &str = "geostream-output";

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Maximum number of features per layer, a positive integer or "unbounded".
	pub limit: Option<StreamLimit>,

	/// "live" pushes features while streaming, "final" only once a layer is done.
	pub update_policy: Option<UpdatePolicy>,

	/// Period of the frame clock in milliseconds.
	pub frame_interval_ms: Option<u64>,

	/// Rows per record batch.
	pub batch_size: Option<usize>,

	/// Directory receiving one GeoJSON file per layer.
	pub output_dir: Option<PathBuf>,

	#[serde(default)]
	pub layers: Vec<LayerConfig>,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses a file and resolves relative paths against the file's directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let mut config = Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))?;
		config.resolve_paths(path.parent().unwrap_or(Path::new("")))?;
		Ok(config)
	}

	pub fn resolve_paths(&mut self, base: &Path) -> Result<()> {
		if let Some(dir) = &self.output_dir
			&& dir.is_relative()
		{
			self.output_dir = Some(base.join(dir));
		}
		for layer in &mut self.layers {
			layer.resolve_paths(base)?;
		}
		Ok(())
	}

	pub fn override_optional_limit(&mut self, limit: &Option<StreamLimit>) {
		if limit.is_some() {
			self.limit = *limit;
		}
	}
	pub fn override_optional_update_policy(&mut self, update_policy: &Option<UpdatePolicy>) {
		if update_policy.is_some() {
			self.update_policy = *update_policy;
		}
	}
	pub fn override_optional_frame_interval_ms(&mut self, frame_interval_ms: &Option<u64>) {
		if frame_interval_ms.is_some() {
			self.frame_interval_ms = *frame_interval_ms;
		}
	}
	pub fn override_optional_batch_size(&mut self, batch_size: &Option<usize>) {
		if batch_size.is_some() {
			self.batch_size = *batch_size;
		}
	}
	pub fn override_optional_output_dir(&mut self, output_dir: &Option<PathBuf>) {
		if output_dir.is_some() {
			self.output_dir = output_dir.clone();
		}
	}

	pub fn limit(&self) -> StreamLimit {
		self.limit.unwrap_or_default()
	}

	pub fn output_dir(&self) -> PathBuf {
		self.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
	}

	/// Checks the numeric settings and fills in defaults.
	pub fn session_options(&self) -> Result<SessionOptions> {
		let batch_size = self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
		ensure!(batch_size > 0, "batch_size must be positive");
		let frame_interval = match self.frame_interval_ms {
			Some(ms) => {
				ensure!(ms > 0, "frame_interval_ms must be positive");
				Duration::from_millis(ms)
			}
			None => SessionOptions::default().frame_interval,
		};
		Ok(SessionOptions {
			policy: self.update_policy.unwrap_or_default(),
			frame_interval,
			batch_size,
		})
	}
}
