//! Binary record reader.
//!
//! Binary streams carry group codes either as a single byte with 255 as an
//! escape to a following 16-bit code, or as plain 16-bit little-endian
//! codes. The width is detected from the first two bytes after the sentinel
//! (see [`RecordInput`](super::RecordInput)).

use super::RecordReader;
use crate::error::{DxfError, Result};
use crate::record::{Record, Value, ValueClass};
use std::io::{BufReader, Read};

/// Reader for the compact binary encoding.
pub struct BinaryRecordReader<R: Read> {
    reader: BufReader<R>,
    prefix: Vec<u8>,
    prefix_pos: usize,
    /// True when group codes are 16-bit little-endian; false for the 8-bit
    /// form with the 255 escape.
    wide_codes: bool,
    offset: usize,
    pending: Option<Record>,
}

impl<R: Read> BinaryRecordReader<R> {
    /// Create a reader positioned after the sentinel, replaying `prefix`
    /// before the underlying source.
    pub fn with_prefix(source: R, prefix: Vec<u8>, wide_codes: bool) -> Self {
        Self {
            reader: BufReader::new(source),
            prefix,
            prefix_pos: 0,
            wide_codes,
            offset: 0,
            pending: None,
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.prefix_pos < self.prefix.len() {
            let b = self.prefix[self.prefix_pos];
            self.prefix_pos += 1;
            self.offset += 1;
            return Ok(Some(b));
        }
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte)? {
            0 => Ok(None),
            _ => {
                self.offset += 1;
                Ok(Some(byte[0]))
            }
        }
    }

    /// Fill `buf`, failing with `TruncatedStream` if the source ends first.
    fn read_exact_buf(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?.ok_or(DxfError::TruncatedStream)?;
        }
        Ok(())
    }

    fn read_i16(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.read_exact_buf(&mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact_buf(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_exact_buf(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.read_exact_buf(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    /// Read a NUL-terminated string.
    fn read_cstring(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            match self.read_byte()? {
                None => return Err(DxfError::TruncatedStream),
                Some(0) => break,
                Some(b) => bytes.push(b),
            }
        }
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
        })
    }

    /// Read the next group code, or `None` at a clean end of stream.
    fn read_code(&mut self) -> Result<Option<i32>> {
        let mut code = if self.wide_codes {
            let lo = match self.read_byte()? {
                Some(b) => b,
                None => return Ok(None),
            };
            let hi = self.read_byte()?.ok_or(DxfError::TruncatedStream)?;
            u16::from_le_bytes([lo, hi]) as i32
        } else {
            match self.read_byte()? {
                Some(b) => b as i32,
                None => return Ok(None),
            }
        };
        // 255 escapes to an extended 16-bit code (extended data).
        if !self.wide_codes && code == 255 {
            code = self.read_i16()? as i32;
        }
        Ok(Some(code))
    }

    fn read_value(&mut self, code: i32) -> Result<Value> {
        let value = match ValueClass::of(code) {
            ValueClass::Str => Value::Str(self.read_cstring()?),
            ValueClass::Int8 => {
                let b = self.read_byte()?.ok_or(DxfError::TruncatedStream)?;
                Value::Int8(b as i8)
            }
            ValueClass::Int16 => Value::Int16(self.read_i16()?),
            ValueClass::Int32 => Value::Int32(self.read_i32()?),
            ValueClass::Float => Value::Float(self.read_f32()?),
            ValueClass::Double => Value::Double(self.read_f64()?),
            ValueClass::Hex => {
                if (310..=319).contains(&code) {
                    // Binary chunk: length byte then raw bytes.
                    let len = self.read_byte()?.ok_or(DxfError::TruncatedStream)?;
                    let mut digits = String::with_capacity(len as usize * 2);
                    for _ in 0..len {
                        let b = self.read_byte()?.ok_or(DxfError::TruncatedStream)?;
                        digits.push_str(&format!("{:02X}", b));
                    }
                    Value::Hex(digits)
                } else {
                    // Handles are hex strings even in binary streams.
                    Value::Hex(self.read_cstring()?)
                }
            }
        };
        Ok(value)
    }
}

impl<R: Read> RecordReader for BinaryRecordReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        if let Some(record) = self.pending.take() {
            return Ok(Some(record));
        }
        let code = match self.read_code()? {
            Some(code) => code,
            None => return Ok(None),
        };
        let value = self.read_value(code)?;
        Ok(Some(Record::new(code, value)))
    }

    fn push_back(&mut self, record: Record) {
        self.pending = Some(record);
    }

    fn position(&self) -> usize {
        self.offset
    }
}
