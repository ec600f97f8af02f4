//! Point entity.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Vector3};

/// A single location marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub common: EntityCommon,
    /// Location (codes 10/20/30)
    pub location: Vector3,
    /// Optional thickness (code 39)
    pub thickness: f64,
}

impl Point {
    pub fn new(location: Vector3) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("POINT")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.location)?;
        if self.thickness != 0.0 {
            writer.write_double(39, self.thickness)?;
        }
        self.common.write_suffix(writer)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }
}

impl EntityFields for Point {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.location.x = record.as_f64()?,
            20 => self.location.y = record.as_f64()?,
            30 => self.location.z = record.as_f64()?,
            39 => self.thickness = record.as_f64()?,
            _ => return Some(record),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{TextRecordReader, TextRecordWriter};

    #[test]
    fn test_read_point() {
        let data = " 10\n1.0\n 20\n2.0\n 30\n3.0\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let point = Point::read(&mut input).unwrap();
        assert_eq!(point.location, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_write_point() {
        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        Point::new(Vector3::new(1.0, 2.0, 0.0)).write(&mut w).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "  0\nPOINT\n  8\n0\n 10\n1.0\n 20\n2.0\n 30\n0.0\n"
        );
    }
}
