//! Record readers: text, binary, and format auto-detection.

mod binary_reader;
mod text_reader;

pub use binary_reader::BinaryRecordReader;
pub use text_reader::TextRecordReader;

use super::BINARY_SENTINEL;
use crate::error::Result;
use crate::record::Record;
use std::io::Read;

/// Tokenizes one record at a time from an underlying byte source.
///
/// `read_record` returns `Ok(None)` at end of stream and
/// [`MalformedRecord`](crate::DxfError::MalformedRecord) when a token cannot
/// be decoded; the caller decides whether to abort or retry (the offending
/// input has been consumed, so a retry resynchronizes).
pub trait RecordReader {
    /// Read the next (group code, value) pair.
    fn read_record(&mut self) -> Result<Option<Record>>;

    /// Put a record back so the next `read_record` returns it again.
    ///
    /// Needed by loaders that snoop ahead for the next code-0 record; only
    /// one record of look-back is supported.
    fn push_back(&mut self, record: Record);

    /// Position hint for diagnostics: line number for text streams, byte
    /// offset for binary streams.
    fn position(&self) -> usize;
}

/// A record source with the encoding chosen from the stream's first bytes.
///
/// If the source starts with the binary sentinel the rest is decoded as
/// binary records; otherwise the bytes already consumed are replayed through
/// the text decoder. Detection needs sequential reads only, never a seek.
pub enum RecordInput<R: Read> {
    /// Newline-delimited code/value lines
    Text(TextRecordReader<R>),
    /// Compact binary encoding
    Binary(BinaryRecordReader<R>),
}

impl<R: Read> RecordInput<R> {
    /// Sniff the encoding and build the matching reader.
    pub fn new(mut source: R) -> Result<Self> {
        let mut head = Vec::with_capacity(BINARY_SENTINEL.len());
        let mut byte = [0u8; 1];
        while head.len() < BINARY_SENTINEL.len() {
            match source.read(&mut byte)? {
                0 => break,
                _ => head.push(byte[0]),
            }
        }

        if head == BINARY_SENTINEL {
            // The first group code in a binary stream is always 0 (SECTION),
            // so its leading byte is 0. A second zero byte means the stream
            // uses 16-bit group codes; otherwise that byte already belongs
            // to the value of an 8-bit-coded record.
            let mut probe = Vec::with_capacity(2);
            while probe.len() < 2 {
                match source.read(&mut byte)? {
                    0 => break,
                    _ => probe.push(byte[0]),
                }
            }
            let wide_codes = probe == [0, 0];
            Ok(RecordInput::Binary(BinaryRecordReader::with_prefix(
                source, probe, wide_codes,
            )))
        } else {
            Ok(RecordInput::Text(TextRecordReader::with_prefix(
                source, head,
            )))
        }
    }

    /// True if the source carried the binary sentinel.
    pub fn is_binary(&self) -> bool {
        matches!(self, RecordInput::Binary(_))
    }
}

impl<R: Read> RecordReader for RecordInput<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        match self {
            RecordInput::Text(r) => r.read_record(),
            RecordInput::Binary(r) => r.read_record(),
        }
    }

    fn push_back(&mut self, record: Record) {
        match self {
            RecordInput::Text(r) => r.push_back(record),
            RecordInput::Binary(r) => r.push_back(record),
        }
    }

    fn position(&self) -> usize {
        match self {
            RecordInput::Text(r) => r.position(),
            RecordInput::Binary(r) => r.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_text() {
        let data = b"  0\nSECTION\n";
        let input = RecordInput::new(&data[..]).unwrap();
        assert!(!input.is_binary());
    }

    #[test]
    fn test_detect_binary() {
        let mut data = BINARY_SENTINEL.to_vec();
        data.extend_from_slice(&[0, 0]); // 16-bit group code 0
        data.extend_from_slice(b"SECTION\0");
        let input = RecordInput::new(&data[..]).unwrap();
        assert!(input.is_binary());
    }

    #[test]
    fn test_detected_text_replays_consumed_bytes() {
        let data = b"  0\nSECTION\n  2\nHEADER\n";
        let mut input = RecordInput::new(&data[..]).unwrap();
        let rec = input.read_record().unwrap().unwrap();
        assert_eq!(rec.code, 0);
        assert_eq!(rec.as_str(), Some("SECTION"));
        let rec = input.read_record().unwrap().unwrap();
        assert_eq!(rec.code, 2);
        assert_eq!(rec.as_str(), Some("HEADER"));
    }
}
