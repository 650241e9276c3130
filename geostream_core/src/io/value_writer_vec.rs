//! This module provides `ValueWriterVec`, a `ValueWriter` that collects bytes in memory.

use super::ValueWriter;
use anyhow::Result;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::{
	io::{Cursor, Write},
	marker::PhantomData,
};

/// Writes values into an in-memory `Vec<u8>` using the byte order `E`.
pub struct ValueWriterVec<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterVec<E> {
	#[must_use]
	pub fn new() -> ValueWriterVec<E> {
		ValueWriterVec {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Consumes the writer and returns the written bytes.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.cursor.into_inner()
	}
}

impl ValueWriterVec<LittleEndian> {
	#[must_use]
	pub fn new_le() -> ValueWriterVec<LittleEndian> {
		ValueWriterVec::new()
	}
}

impl ValueWriterVec<BigEndian> {
	#[must_use]
	pub fn new_be() -> ValueWriterVec<BigEndian> {
		ValueWriterVec::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterVec<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterVec<E> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_write_u8() -> Result<()> {
		let mut writer = ValueWriterVec::new_le();
		writer.write_u8(255)?;
		assert_eq!(writer.into_vec(), vec![0xFF]);
		Ok(())
	}

	#[test]
	fn test_write_u32_byte_orders() -> Result<()> {
		let mut writer = ValueWriterVec::new_le();
		writer.write_u32(3)?;
		assert_eq!(writer.into_vec(), vec![3, 0, 0, 0]);

		let mut writer = ValueWriterVec::new_be();
		writer.write_u32(3)?;
		assert_eq!(writer.into_vec(), vec![0, 0, 0, 3]);
		Ok(())
	}

	#[test]
	fn test_write_f64() -> Result<()> {
		let mut writer = ValueWriterVec::new_be();
		writer.write_f64(2.5)?;
		assert_eq!(writer.into_vec(), 2.5f64.to_be_bytes().to_vec());
		Ok(())
	}

	#[test]
	fn test_position_and_is_empty() -> Result<()> {
		let mut writer = ValueWriterVec::new_le();
		assert!(writer.is_empty()?);
		writer.write_u8(1)?;
		writer.write_u32(2)?;
		assert_eq!(writer.position()?, 5);
		assert!(!writer.is_empty()?);
		Ok(())
	}
}
