//! Textual record writer.

use super::RecordWriter;
use crate::error::Result;
use crate::record::{Record, Value};
use std::io::Write;

/// Writer for the newline-delimited text encoding.
pub struct TextRecordWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextRecordWriter<W> {
    /// Create a new text writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get the inner writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Group codes are right-aligned in a 3-character field.
    fn write_code(&mut self, code: i32) -> Result<()> {
        if (0..10).contains(&code) {
            writeln!(self.writer, "  {}", code)?;
        } else if (10..100).contains(&code) {
            writeln!(self.writer, " {}", code)?;
        } else {
            writeln!(self.writer, "{}", code)?;
        }
        Ok(())
    }

    /// Doubles keep at least one decimal but drop trailing zeros.
    fn write_double_value(&mut self, value: f64) -> Result<()> {
        if value == value.trunc() && value.abs() < 1e16 {
            writeln!(self.writer, "{:.1}", value)?;
        } else {
            let formatted = format!("{:.15}", value);
            let trimmed = formatted.trim_end_matches('0');
            if trimmed.ends_with('.') {
                writeln!(self.writer, "{}0", trimmed)?;
            } else {
                writeln!(self.writer, "{}", trimmed)?;
            }
        }
        Ok(())
    }
}

/// Escape control characters the line-oriented encoding cannot carry raw.
fn escape(value: &str) -> String {
    if !value.contains(['^', '\n', '\r', '\t']) {
        return value.to_string();
    }
    value
        .replace('^', "^ ")
        .replace('\n', "^J")
        .replace('\r', "^M")
        .replace('\t', "^I")
}

impl<W: Write> RecordWriter for TextRecordWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_code(record.code)?;
        match &record.value {
            Value::Int8(v) => writeln!(self.writer, "{}", v)?,
            Value::Int16(v) => writeln!(self.writer, "{}", v)?,
            Value::Int32(v) => writeln!(self.writer, "{}", v)?,
            Value::Float(v) => writeln!(self.writer, "{}", v)?,
            Value::Double(v) => self.write_double_value(*v)?,
            Value::Str(v) => writeln!(self.writer, "{}", escape(v))?,
            Value::Hex(v) => writeln!(self.writer, "{}", v)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::RecordWriterExt;

    #[test]
    fn test_code_alignment() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        w.write_integer(62, 7).unwrap();
        w.write_string(0, "LINE").unwrap();
        w.write_double(140, 2.0).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, " 62\n7\n  0\nLINE\n140\n2.0\n");
    }

    #[test]
    fn test_double_formatting() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        w.write_double(40, 1.0).unwrap();
        w.write_double(41, 0.125).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, " 40\n1.0\n 41\n0.125\n");
    }

    #[test]
    fn test_string_escaping() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        w.write_string(1, "a\nb").unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "  1\na^Jb\n");
    }

    #[test]
    fn test_hex_record() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        w.write_record(&Record::hex(330, "1AF")).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "330\n1AF\n");
    }
}
