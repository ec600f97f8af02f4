//! Record stream I/O: tokenizing and emitting (group code, value) pairs.
//!
//! Both the textual encoding (code line, value line) and the compact binary
//! encoding behind the `AutoCAD Binary DXF` sentinel are supported. The
//! encoding is chosen by [`RecordInput`] from the first bytes of the source,
//! using sequential reads only.

mod reader;
mod writer;

pub use reader::{BinaryRecordReader, RecordInput, RecordReader, TextRecordReader};
pub use writer::{BinaryRecordWriter, RecordWriter, RecordWriterExt, TextRecordWriter};

/// Sentinel that introduces a binary-encoded stream.
pub const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF\r\n\x1a\x00";
