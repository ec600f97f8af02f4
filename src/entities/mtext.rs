//! Multiline text entity.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{Record, Value};
use crate::types::{BoundingBox3D, Vector3};

/// Paragraph text.
///
/// Long values are split across repeated code-3 records of up to 250
/// characters each, with the remainder in the final code-1 record; the
/// parser reassembles them in stream order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MText {
    pub common: EntityCommon,
    /// Insertion point (codes 10/20/30)
    pub location: Vector3,
    /// Nominal text height (code 40)
    pub height: f64,
    /// Reference rectangle width (code 41)
    pub width: f64,
    /// The full text value (codes 3 and 1, reassembled)
    pub value: String,
    /// Rotation angle in degrees (code 50)
    pub rotation: f64,
    /// Style name (code 7)
    pub style: String,
    /// Attachment point (code 71)
    pub attachment: i16,
    /// Drawing direction (code 72)
    pub direction: i16,
}

/// Chunk size for continuation records on write.
const CHUNK: usize = 250;

impl MText {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("MTEXT")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.location)?;
        writer.write_double(40, self.height)?;
        if self.width != 0.0 {
            writer.write_double(41, self.width)?;
        }
        if self.attachment != 0 {
            writer.write_integer(71, self.attachment as i32)?;
        }
        if self.direction != 0 {
            writer.write_integer(72, self.direction as i32)?;
        }
        self.write_value(writer)?;
        if !self.style.is_empty() {
            writer.write_string(7, &self.style)?;
        }
        if self.rotation != 0.0 {
            writer.write_double(50, self.rotation)?;
        }
        self.common.write_suffix(writer)
    }

    /// Split the value at character boundaries into code-3 continuation
    /// chunks followed by the code-1 remainder.
    fn write_value<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let chars: Vec<char> = self.value.chars().collect();
        let mut rest = chars.as_slice();
        while rest.len() > CHUNK {
            let (chunk, tail) = rest.split_at(CHUNK);
            writer.write_string(3, &chunk.iter().collect::<String>())?;
            rest = tail;
        }
        writer.write_string(1, &rest.iter().collect::<String>())
    }

    /// Bounds cover the insertion point only; glyph metrics are unknown.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }
}

impl EntityFields for MText {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match (record.code, &record.value) {
            // Continuation chunks and the final chunk concatenate.
            (3, Value::Str(s)) | (1, Value::Str(s)) => self.value.push_str(s),
            (7, Value::Str(s)) => self.style = s.clone(),
            (10, _) => self.location.x = record.as_f64()?,
            (20, _) => self.location.y = record.as_f64()?,
            (30, _) => self.location.z = record.as_f64()?,
            (40, _) => self.height = record.as_f64()?,
            (41, _) => self.width = record.as_f64()?,
            (50, _) => self.rotation = record.as_f64()?,
            (71, _) => self.attachment = record.as_i16()?,
            (72, _) => self.direction = record.as_i16()?,
            _ => return Some(record),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_chunked_value_reassembled() {
        let data = "  3\nfirst \n  3\nsecond \n  1\nlast\n 40\n0.2\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mtext = MText::read(&mut input).unwrap();
        assert_eq!(mtext.value, "first second last");
    }

    #[test]
    fn test_long_value_chunked_on_write() {
        let mtext = MText {
            value: "x".repeat(600),
            height: 1.0,
            ..Default::default()
        };
        let mut buf = Vec::new();
        let mut w = crate::io::TextRecordWriter::new(&mut buf);
        mtext.write(&mut w).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("\n  3\n").count(), 2);
        assert_eq!(out.matches("\n  1\n").count(), 1);
    }
}
