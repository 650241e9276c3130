//! This module defines the `ValueWriter` trait for writing fixed-width values to a byte sink.
//!
//! # Overview
//!
//! The byte order is a type parameter, mirroring `ValueReader`. Writers are used to build binary
//! geometry payloads, for example when encoding fixtures or exporting geometries as WKB.
//!
//! # Examples
//!
//! ```rust
//! use geostream_core::io::{ValueWriter, ValueWriterVec};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterVec::new_be();
//!     writer.write_u32(6)?;
//!     assert_eq!(writer.into_vec(), vec![0, 0, 0, 6]);
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

/// A trait for writing values to various destinations with support for different byte orders.
pub trait ValueWriter<E: ByteOrder> {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position.
	///
	/// # Errors
	///
	/// Returns an error if the position cannot be determined.
	fn position(&mut self) -> Result<u64>;

	/// Returns `true` if nothing has been written yet.
	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	/// Writes an 8-bit unsigned integer.
	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	/// Writes a 32-bit unsigned integer using the specified byte order.
	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.get_writer().write_u32::<E>(value)?)
	}

	/// Writes a 64-bit floating-point value using the specified byte order.
	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}
}
