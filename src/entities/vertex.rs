//! Polyline vertex entity.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Vector3};

/// One vertex of a heavyweight polyline.
///
/// Vertices occur inside a POLYLINE/SEQEND run but are also accepted as
/// standalone entities for leniency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    pub common: EntityCommon,
    /// Location (codes 10/20/30)
    pub location: Vector3,
    /// Bulge of the following segment (code 42); 0 means straight
    pub bulge: f64,
    /// Start width (code 40)
    pub start_width: f64,
    /// End width (code 41)
    pub end_width: f64,
    /// Vertex flags (code 70)
    pub flags: i16,
}

impl Vertex {
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
        writer.write_type_marker("VERTEX")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.location)?;
        if self.start_width != 0.0 {
            writer.write_double(40, self.start_width)?;
        }
        if self.end_width != 0.0 {
            writer.write_double(41, self.end_width)?;
        }
        if self.bulge != 0.0 {
            writer.write_double(42, self.bulge)?;
        }
        if self.flags != 0 {
            writer.write_integer(70, self.flags as i32)?;
        }
        self.common.write_suffix(writer)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }
}

impl EntityFields for Vertex {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.location.x = record.as_f64()?,
            20 => self.location.y = record.as_f64()?,
            30 => self.location.z = record.as_f64()?,
            40 => self.start_width = record.as_f64()?,
            41 => self.end_width = record.as_f64()?,
            42 => self.bulge = record.as_f64()?,
            70 => self.flags = record.as_i16()?,
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
    fn test_read_vertex() {
        let data = " 10\n1.0\n 20\n2.0\n 42\n0.5\n 70\n1\n  0\nSEQEND\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let vertex = Vertex::read(&mut input).unwrap();
        assert_eq!(vertex.location, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(vertex.bulge, 0.5);
        assert_eq!(vertex.flags, 1);
    }
}
