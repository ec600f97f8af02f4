//! Binary record writer.

use super::super::BINARY_SENTINEL;
use super::RecordWriter;
use crate::error::{DxfError, Result};
use crate::record::{Record, Value};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Writer for the compact binary encoding.
///
/// Group codes are always emitted as 16-bit little-endian values; the reader
/// side accepts both this form and the older 8-bit form. Comment records
/// (code 999) have no binary representation and are dropped, so the stream
/// always opens with the `0 SECTION` record format detection keys off.
pub struct BinaryRecordWriter<W: Write> {
    writer: W,
}

impl<W: Write> BinaryRecordWriter<W> {
    /// Create a binary writer, emitting the sentinel up front.
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(BINARY_SENTINEL)?;
        Ok(Self { writer })
    }

    /// Get the inner writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_code(&mut self, code: i32) -> Result<()> {
        self.writer.write_u16::<LittleEndian>(code as u16)?;
        Ok(())
    }

    fn write_cstring(&mut self, value: &str) -> Result<()> {
        self.writer.write_all(value.as_bytes())?;
        self.writer.write_u8(0)?;
        Ok(())
    }
}

fn hex_to_bytes(digits: &str) -> Result<Vec<u8>> {
    let digits = digits.trim();
    if digits.len() % 2 != 0 {
        return Err(DxfError::Custom(format!(
            "odd-length binary chunk '{}'",
            digits
        )));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| DxfError::Custom(format!("invalid binary chunk '{}'", digits)))
        })
        .collect()
}

impl<W: Write> RecordWriter for BinaryRecordWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        if record.code == 999 {
            return Ok(());
        }
        self.write_code(record.code)?;
        match &record.value {
            Value::Int8(v) => self.writer.write_i8(*v)?,
            Value::Int16(v) => self.writer.write_i16::<LittleEndian>(*v)?,
            Value::Int32(v) => self.writer.write_i32::<LittleEndian>(*v)?,
            Value::Float(v) => self.writer.write_f32::<LittleEndian>(*v)?,
            Value::Double(v) => self.writer.write_f64::<LittleEndian>(*v)?,
            Value::Str(v) => self.write_cstring(v)?,
            Value::Hex(v) => {
                if (310..=319).contains(&record.code) {
                    let bytes = hex_to_bytes(v)?;
                    self.writer.write_u8(bytes.len() as u8)?;
                    self.writer.write_all(&bytes)?;
                } else {
                    self.write_cstring(v)?;
                }
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
