//! Single-line text entity.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{Record, Value};
use crate::types::{BoundingBox3D, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    /// Insertion point (codes 10/20/30)
    pub location: Vector3,
    /// Second alignment point (codes 11/21/31)
    pub alignment_point: Vector3,
    /// Text height (code 40)
    pub height: f64,
    /// The text value (code 1)
    pub value: String,
    /// Rotation angle in degrees (code 50)
    pub rotation: f64,
    /// Style name (code 7)
    pub style: String,
    /// Horizontal justification (code 72)
    pub horizontal_justification: i16,
    /// Vertical justification (code 73)
    pub vertical_justification: i16,
}

impl Text {
    pub fn new(location: Vector3, height: f64, value: impl Into<String>) -> Self {
        Self {
            location,
            height,
            value: value.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("TEXT")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.location)?;
        writer.write_double(40, self.height)?;
        writer.write_string(1, &self.value)?;
        if self.rotation != 0.0 {
            writer.write_double(50, self.rotation)?;
        }
        if !self.style.is_empty() {
            writer.write_string(7, &self.style)?;
        }
        if self.horizontal_justification != 0 {
            writer.write_integer(72, self.horizontal_justification as i32)?;
        }
        if self.vertical_justification != 0 {
            writer.write_integer(73, self.vertical_justification as i32)?;
        }
        if self.alignment_point != Vector3::ZERO {
            writer.write_point(11, self.alignment_point)?;
        }
        self.common.write_suffix(writer)
    }

    /// Bounds cover the insertion point only; glyph metrics are unknown.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }
}

impl EntityFields for Text {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match (record.code, &record.value) {
            (1, Value::Str(s)) => self.value = s.clone(),
            (7, Value::Str(s)) => self.style = s.clone(),
            (10, _) => self.location.x = record.as_f64()?,
            (20, _) => self.location.y = record.as_f64()?,
            (30, _) => self.location.z = record.as_f64()?,
            (11, _) => self.alignment_point.x = record.as_f64()?,
            (21, _) => self.alignment_point.y = record.as_f64()?,
            (31, _) => self.alignment_point.z = record.as_f64()?,
            (40, _) => self.height = record.as_f64()?,
            (50, _) => self.rotation = record.as_f64()?,
            (72, _) => self.horizontal_justification = record.as_i16()?,
            (73, _) => self.vertical_justification = record.as_i16()?,
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
    fn test_read_text() {
        let data = " 10\n1.0\n 20\n2.0\n 40\n0.25\n  1\nHello\n 50\n45.0\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let text = Text::read(&mut input).unwrap();
        assert_eq!(text.value, "Hello");
        assert_eq!(text.height, 0.25);
        assert_eq!(text.rotation, 45.0);
    }

    #[test]
    fn test_no_flatten_geometry() {
        let text = Text::new(Vector3::ZERO, 1.0, "x");
        assert!(text.bounding_box().is_some());
    }
}
