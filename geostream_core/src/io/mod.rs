//! Value readers and writers for binary formats.
//!
//! Both traits carry the byte order as a type parameter (`byteorder::LittleEndian` or
//! `byteorder::BigEndian`), so a decoder that only learns the byte order at runtime picks the
//! matching implementation once and stays monomorphic afterwards.

mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_vec;

pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_vec::*;
