//! Textual record reader: group-code line followed by value line.

use super::RecordReader;
use crate::error::{DxfError, Result};
use crate::record::{Record, Value, ValueClass};
use encoding_rs::Encoding;
use std::io::{BufReader, Read};

/// Reader for the newline-delimited text encoding.
pub struct TextRecordReader<R: Read> {
    reader: BufReader<R>,
    /// Bytes consumed during format detection, replayed before the stream.
    prefix: Vec<u8>,
    prefix_pos: usize,
    line_number: usize,
    pending: Option<Record>,
    /// Non-UTF8 fallback encoding. `None` means Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: Read> TextRecordReader<R> {
    /// Create a reader over a plain byte source.
    pub fn new(source: R) -> Self {
        Self::with_prefix(source, Vec::new())
    }

    /// Create a reader that first replays `prefix`, then reads from `source`.
    pub fn with_prefix(source: R, prefix: Vec<u8>) -> Self {
        Self {
            reader: BufReader::new(source),
            prefix,
            prefix_pos: 0,
            line_number: 0,
            pending: None,
            encoding: None,
        }
    }

    /// Set the fallback encoding for non-UTF8 value lines.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.prefix_pos < self.prefix.len() {
            let b = self.prefix[self.prefix_pos];
            self.prefix_pos += 1;
            return Ok(Some(b));
        }
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Read one line, decoding non-UTF8 bytes through the configured
    /// fallback (Latin-1 if none). Returns `None` at end of stream.
    ///
    /// Only the line terminator is removed; interior and edge whitespace
    /// is part of the value for string codes.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        loop {
            match self.read_byte()? {
                None => {
                    if bytes.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                Some(b'\n') => break,
                Some(b) => bytes.push(b),
            }
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        self.line_number += 1;

        let line = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => {
                let bytes = err.into_bytes();
                if let Some(enc) = self.encoding {
                    let (decoded, _, _) = enc.decode(&bytes);
                    decoded.into_owned()
                } else {
                    // Latin-1 maps bytes 0-255 directly to code points.
                    bytes.iter().map(|&b| b as char).collect()
                }
            }
        };

        Ok(Some(line))
    }

    fn decode_value(&self, code: i32, raw: &str) -> Result<Value> {
        let malformed = |message: String| DxfError::MalformedRecord {
            line: self.line_number,
            message,
        };
        let value = match ValueClass::of(code) {
            ValueClass::Str => Value::Str(unescape(raw)),
            ValueClass::Hex => Value::Hex(raw.trim().to_string()),
            ValueClass::Double => Value::Double(
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("invalid double '{}' for code {}", raw, code)))?,
            ),
            ValueClass::Float => Value::Float(
                raw.trim()
                    .parse::<f32>()
                    .map_err(|_| malformed(format!("invalid float '{}' for code {}", raw, code)))?,
            ),
            ValueClass::Int8 => Value::Int8(
                raw.trim()
                    .parse::<i8>()
                    .map_err(|_| malformed(format!("invalid int8 '{}' for code {}", raw, code)))?,
            ),
            ValueClass::Int16 => Value::Int16(
                raw.trim()
                    .parse::<i16>()
                    .map_err(|_| malformed(format!("invalid int16 '{}' for code {}", raw, code)))?,
            ),
            ValueClass::Int32 => Value::Int32(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| malformed(format!("invalid int32 '{}' for code {}", raw, code)))?,
            ),
        };
        Ok(value)
    }
}

/// Translate the caret escapes the text encoding uses for control characters.
fn unescape(value: &str) -> String {
    value
        .replace("^J", "\n")
        .replace("^M", "\r")
        .replace("^I", "\t")
        .replace("^ ", "^")
}

impl<R: Read> RecordReader for TextRecordReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        if let Some(record) = self.pending.take() {
            return Ok(Some(record));
        }

        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        // Code lines are right-aligned in a 3-character field.
        let code = code_line
            .trim()
            .parse::<i32>()
            .map_err(|_| DxfError::MalformedRecord {
                line: self.line_number,
                message: format!("invalid group code '{}'", code_line.trim()),
            })?;

        let value_line = match self.read_line()? {
            Some(line) => line,
            None => return Err(DxfError::TruncatedStream),
        };

        let value = self.decode_value(code, &value_line)?;
        Ok(Some(Record::new(code, value)))
    }

    fn push_back(&mut self, record: Record) {
        self.pending = Some(record);
    }

    fn position(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &str) -> TextRecordReader<&[u8]> {
        TextRecordReader::new(data.as_bytes())
    }

    #[test]
    fn test_read_string_record() {
        let mut r = reader("  0\nSECTION\n");
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.code, 0);
        assert_eq!(rec.value, Value::Str("SECTION".to_string()));
        assert!(r.read_record().unwrap().is_none());
    }

    #[test]
    fn test_read_typed_values() {
        let mut r = reader(" 62\n7\n 10\n1.5\n 90\n100000\n330\n1AF\n");
        assert_eq!(r.read_record().unwrap().unwrap().value, Value::Int16(7));
        assert_eq!(r.read_record().unwrap().unwrap().value, Value::Double(1.5));
        assert_eq!(
            r.read_record().unwrap().unwrap().value,
            Value::Int32(100000)
        );
        assert_eq!(
            r.read_record().unwrap().unwrap().value,
            Value::Hex("1AF".to_string())
        );
    }

    #[test]
    fn test_malformed_code_then_resync() {
        let mut r = reader("abc\n  0\nEOF\n");
        assert!(matches!(
            r.read_record(),
            Err(DxfError::MalformedRecord { .. })
        ));
        // The bad line was consumed, so the next read realigns.
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.code, 0);
        assert_eq!(rec.as_str(), Some("EOF"));
    }

    #[test]
    fn test_malformed_value() {
        let mut r = reader(" 10\nnot-a-number\n");
        assert!(matches!(
            r.read_record(),
            Err(DxfError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_missing_value_line() {
        let mut r = reader("  0\n");
        assert!(matches!(r.read_record(), Err(DxfError::TruncatedStream)));
    }

    #[test]
    fn test_push_back() {
        let mut r = reader("  0\nLINE\n  8\nWALLS\n");
        let rec = r.read_record().unwrap().unwrap();
        r.push_back(rec);
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.code, 0);
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.code, 8);
    }

    #[test]
    fn test_caret_escapes() {
        let mut r = reader("  1\nLine1^JLine2^ILine3\n");
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.as_str(), Some("Line1\nLine2\tLine3"));
    }

    #[test]
    fn test_string_value_keeps_edge_blanks() {
        let mut r = reader("  1\n pad \n  2\nname\n");
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.as_str(), Some(" pad "));
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.as_str(), Some("name"));
    }

    #[test]
    fn test_crlf_lines() {
        let mut r = reader("  0\r\nSECTION\r\n");
        let rec = r.read_record().unwrap().unwrap();
        assert_eq!(rec.as_str(), Some("SECTION"));
    }
}
