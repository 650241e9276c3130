use super::ParquetSource;
use anyhow::{Context, Result, ensure};
use bytes::Bytes;
use reqwest::{Client, Url};
use std::{
	fmt::Display,
	path::{Path, PathBuf},
	str::FromStr,
	time::Duration,
};

/// Where a layer's Parquet data lives: a filesystem path or an `http(s)` URL.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceLocation {
	Path(PathBuf),
	Url(Url),
}

/// A source whose bytes are locally available.
pub enum SourceData {
	Path(PathBuf),
	Bytes { name: String, bytes: Bytes },
}

impl SourceLocation {
	/// Final path segment, used as the default layer name.
	pub fn file_name(&self) -> String {
		match self {
			SourceLocation::Path(path) => path
				.file_name()
				.map_or_else(|| path.to_string_lossy().to_string(), |name| name.to_string_lossy().to_string()),
			SourceLocation::Url(url) => url
				.path_segments()
				.and_then(|mut segments| segments.next_back())
				.filter(|segment| !segment.is_empty())
				.map_or_else(|| url.to_string(), str::to_string),
		}
	}

	/// Joins a relative path onto `base`. URLs and absolute paths stay unchanged.
	pub fn resolve(&mut self, base: &Path) {
		if let SourceLocation::Path(path) = self
			&& path.is_relative()
		{
			*path = base.join(&*path);
		}
	}

	/// Makes the data locally readable, downloading remote sources in full.
	pub async fn fetch(&self) -> Result<SourceData> {
		match self {
			SourceLocation::Path(path) => Ok(SourceData::Path(path.clone())),
			SourceLocation::Url(url) => {
				log::info!("downloading {url}");
				let bytes = download(url).await.with_context(|| format!("downloading {url}"))?;
				log::debug!("downloaded {} bytes from {url}", bytes.len());
				Ok(SourceData::Bytes {
					name: url.to_string(),
					bytes,
				})
			}
		}
	}
}

async fn download(url: &Url) -> Result<Bytes> {
	let client = Client::builder().tcp_keepalive(Duration::from_secs(600)).build()?;
	let response = client.get(url.clone()).send().await?;
	let status = response.status();
	ensure!(status.is_success(), "server responded with status {status}");
	Ok(response.bytes().await?)
}

impl SourceData {
	pub fn open(self, batch_size: usize) -> Result<ParquetSource> {
		match self {
			SourceData::Path(path) => ParquetSource::from_path(&path, batch_size),
			SourceData::Bytes { name, bytes } => ParquetSource::from_bytes(bytes, batch_size, &name),
		}
	}
}

impl FromStr for SourceLocation {
	type Err = anyhow::Error;

	fn from_str(text: &str) -> Result<Self> {
		let text = text.trim();
		ensure!(!text.is_empty(), "source must not be empty");
		let lower = text.to_ascii_lowercase();
		if lower.starts_with("http://") || lower.starts_with("https://") {
			let url = Url::parse(text).with_context(|| format!("parsing URL '{text}'"))?;
			Ok(SourceLocation::Url(url))
		} else {
			Ok(SourceLocation::Path(PathBuf::from(text)))
		}
	}
}

impl Display for SourceLocation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SourceLocation::Path(path) => write!(f, "{}", path.display()),
			SourceLocation::Url(url) => write!(f, "{url}"),
		}
	}
}
