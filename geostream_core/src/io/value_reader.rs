// This module defines the `ValueReader` trait for reading fixed-width values from a byte source.
//
// # Overview
//
// Implementations read integers and floating-point numbers in the byte order given by the type
// parameter `E`. Every read advances the position and fails with an error, never a panic, when the
// source is exhausted. Binary geometry decoders rely on that: a truncated buffer surfaces as an
// ordinary `Err` that the caller can absorb.
//
// # Examples
//
// ```rust
// use geostream_core::io::{ValueReader, ValueReaderSlice};
//
// let data = &[0x01, 0x02, 0x03, 0x04];
//
// let mut reader_le = ValueReaderSlice::new_le(data);
// assert_eq!(reader_le.read_u16().unwrap(), 0x0201);
//
// let mut reader_be = ValueReaderSlice::new_be(data);
// assert_eq!(reader_be.read_u16().unwrap(), 0x0102);
// ```

use anyhow::{Result, ensure};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from various sources with support for different byte orders.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Sets the current position within the readable data.
	///
	/// # Errors
	/// Returns an error if the position lies beyond the end of the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	/// Checks if there are any bytes remaining to be read.
	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Fails unless at least `length` bytes are left.
	///
	/// Decoders call this before allocating for a declared element count, so that a corrupt
	/// count cannot trigger a huge allocation.
	fn ensure_remaining(&mut self, length: u64) -> Result<()> {
		let remaining = self.remaining();
		ensure!(
			length <= remaining,
			"need {length} bytes at position {}, but only {remaining} remain",
			self.position()
		);
		Ok(())
	}

	/// Advances the position by `length` bytes without interpreting them.
	fn skip(&mut self, length: u64) -> Result<()> {
		self.ensure_remaining(length)?;
		let position = self.position() + length;
		if position == self.len() {
			// set_position rejects the end position, so consume the tail instead
			let mut sink = vec![0u8; length as usize];
			self.get_reader().read_exact(&mut sink)?;
			return Ok(());
		}
		self.set_position(position)
	}

	/// Reads a 64-bit floating point number.
	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<E>()?)
	}

	/// Reads an unsigned 8-bit integer.
	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	/// Reads an unsigned 16-bit integer.
	fn read_u16(&mut self) -> Result<u16> {
		Ok(self.get_reader().read_u16::<E>()?)
	}

	/// Reads an unsigned 32-bit integer.
	fn read_u32(&mut self) -> Result<u32> {
		Ok(self.get_reader().read_u32::<E>()?)
	}
}
