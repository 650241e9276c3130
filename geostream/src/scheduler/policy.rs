use serde::Deserialize;
use std::fmt::Display;

/// When buffered features reach the render sink.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
	/// Push at the next frame boundary after new features arrive.
	#[default]
	Live,
	/// Push once, when the run is done.
	Final,
}

impl Display for UpdatePolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			UpdatePolicy::Live => "live",
			UpdatePolicy::Final => "final",
		})
	}
}
