use crate::source::SourceLocation;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
	/// Display name. Defaults to the file name of the source.
	pub name: Option<String>,

	/// Local path or http(s) URL of a Parquet file.
	pub source: String,
}

impl LayerConfig {
	pub fn location(&self) -> Result<SourceLocation> {
		self.source.parse().with_context(|| format!("invalid layer source '{}'", self.source))
	}

	pub fn resolve_paths(&mut self, base: &Path) -> Result<()> {
		let mut location = self.location()?;
		location.resolve(base);
		self.source = location.to_string();
		Ok(())
	}
}

impl From<(&str, &str)> for LayerConfig {
	fn from((name, source): (&str, &str)) -> Self {
		Self {
			name: Some(name.to_string()),
			source: source.to_string(),
		}
	}
}

impl From<&str> for LayerConfig {
	fn from(source: &str) -> Self {
		Self {
			name: None,
			source: source.to_string(),
		}
	}
}
