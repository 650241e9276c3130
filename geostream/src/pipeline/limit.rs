use anyhow::{Result, anyhow, bail};
use serde::Deserialize;
use std::{fmt::Display, num::NonZeroU64, str::FromStr};

/// Maximum number of features one streaming run may emit.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawLimit")]
pub enum StreamLimit {
	Bounded(NonZeroU64),
	#[default]
	Unbounded,
}

impl StreamLimit {
	pub fn new(limit: u64) -> Result<Self> {
		NonZeroU64::new(limit)
			.map(StreamLimit::Bounded)
			.ok_or_else(|| anyhow!("feature limit must be positive, got 0"))
	}

	pub fn get(&self) -> Option<u64> {
		match self {
			StreamLimit::Bounded(limit) => Some(limit.get()),
			StreamLimit::Unbounded => None,
		}
	}

	/// Whether `total` features exhaust the limit.
	pub fn is_reached(&self, total: u64) -> bool {
		match self {
			StreamLimit::Bounded(limit) => total >= limit.get(),
			StreamLimit::Unbounded => false,
		}
	}
}

impl FromStr for StreamLimit {
	type Err = anyhow::Error;

	fn from_str(text: &str) -> Result<Self> {
		let text = text.trim();
		if text.eq_ignore_ascii_case("unbounded") {
			return Ok(StreamLimit::Unbounded);
		}
		let Ok(limit) = text.parse::<i64>() else {
			bail!("invalid feature limit '{text}', expected a positive integer or 'unbounded'")
		};
		if limit <= 0 {
			bail!("feature limit must be positive, got {limit}")
		}
		StreamLimit::new(limit as u64)
	}
}

impl Display for StreamLimit {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			StreamLimit::Bounded(limit) => write!(f, "{limit}"),
			StreamLimit::Unbounded => f.write_str("unbounded"),
		}
	}
}

/// YAML accepts both `limit: 500` and `limit: unbounded`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
	Number(i64),
	Text(String),
}

impl TryFrom<RawLimit> for StreamLimit {
	type Error = anyhow::Error;

	fn try_from(raw: RawLimit) -> Result<Self> {
		match raw {
			RawLimit::Number(limit) => limit.to_string().parse(),
			RawLimit::Text(text) => text.parse(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("1", Some(1))]
	#[case(" 5000 ", Some(5000))]
	#[case("unbounded", None)]
	#[case("Unbounded", None)]
	fn parse_valid(#[case] text: &str, #[case] expected: Option<u64>) {
		assert_eq!(text.parse::<StreamLimit>().unwrap().get(), expected);
	}

	#[rstest]
	#[case("0", "feature limit must be positive, got 0")]
	#[case("-3", "feature limit must be positive, got -3")]
	#[case("ten", "invalid feature limit 'ten', expected a positive integer or 'unbounded'")]
	#[case("", "invalid feature limit '', expected a positive integer or 'unbounded'")]
	#[case("1.5", "invalid feature limit '1.5', expected a positive integer or 'unbounded'")]
	fn parse_invalid(#[case] text: &str, #[case] message: &str) {
		assert_eq!(text.parse::<StreamLimit>().unwrap_err().to_string(), message);
	}

	#[test]
	fn is_reached() {
		let limit = StreamLimit::new(3).unwrap();
		assert!(!limit.is_reached(2));
		assert!(limit.is_reached(3));
		assert!(limit.is_reached(4));
		assert!(!StreamLimit::Unbounded.is_reached(u64::MAX));
		assert!(StreamLimit::new(0).is_err());
	}

	#[test]
	fn display() {
		assert_eq!(StreamLimit::new(1000).unwrap().to_string(), "1000");
		assert_eq!(StreamLimit::Unbounded.to_string(), "unbounded");
	}

	#[test]
	fn deserialize_from_yaml() {
		let limit: StreamLimit = serde_yaml_ng::from_str("250").unwrap();
		assert_eq!(limit.get(), Some(250));
		let limit: StreamLimit = serde_yaml_ng::from_str("unbounded").unwrap();
		assert_eq!(limit, StreamLimit::Unbounded);
		assert!(serde_yaml_ng::from_str::<StreamLimit>("-1").is_err());
	}
}
