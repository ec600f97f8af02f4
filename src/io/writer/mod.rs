//! Record writers: text, binary, and typed convenience emitters.

mod binary_writer;
mod text_writer;

pub use binary_writer::BinaryRecordWriter;
pub use text_writer::TextRecordWriter;

use crate::error::Result;
use crate::record::Record;
use crate::types::Vector3;

/// Emits one record at a time into an underlying byte sink.
pub trait RecordWriter {
    /// Write a single (group code, value) pair.
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Flush the underlying sink.
    fn flush(&mut self) -> Result<()>;
}

/// Typed convenience emitters on top of [`RecordWriter`].
///
/// Values are coerced to the variant the code's type class calls for, so
/// entity writers don't repeat the code-range table.
pub trait RecordWriterExt: RecordWriter {
    /// Write a string value.
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_record(&Record::string(code, value))
    }

    /// Write an integer, narrowed per the code's type class.
    fn write_integer(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_record(&Record::integer(code, value))
    }

    /// Write a double-precision value.
    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_record(&Record::double(code, value))
    }

    /// Write a 3D point across the x/y/z code triplet
    /// (`base`, `base + 10`, `base + 20`).
    fn write_point(&mut self, base: i32, point: Vector3) -> Result<()> {
        self.write_double(base, point.x)?;
        self.write_double(base + 10, point.y)?;
        self.write_double(base + 20, point.z)
    }

    /// Write a code-0 type marker (`SECTION`, `LINE`, `ENDSEC`, ...).
    fn write_type_marker(&mut self, name: &str) -> Result<()> {
        self.write_string(0, name)
    }
}

impl<W: RecordWriter + ?Sized> RecordWriterExt for W {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_point_codes() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        w.write_point(10, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, " 10\n1.0\n 20\n2.0\n 30\n3.0\n");
    }

    #[test]
    fn test_integer_narrowing() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        w.write_integer(280, 2).unwrap();
        w.write_integer(90, 70000).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "280\n2\n 90\n70000\n");
    }
}
