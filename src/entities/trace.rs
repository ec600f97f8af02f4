//! Trace entity. Identical record layout to SOLID under a different tag.

use super::solid::{handle_corner_record, quad_outline};
use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub common: EntityCommon,
    /// Corner points (codes 10/11/12/13 with 2x/3x offsets)
    pub corners: [Vector3; 4],
    /// Optional thickness (code 39)
    pub thickness: f64,
}

impl Trace {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("TRACE")?;
        self.common.write_prefix(writer)?;
        for (i, corner) in self.corners.iter().enumerate() {
            writer.write_point(10 + i as i32, *corner)?;
        }
        if self.thickness != 0.0 {
            writer.write_double(39, self.thickness)?;
        }
        self.common.write_suffix(writer)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&self.corners)
    }

    pub fn flatten(&self) -> Vec<Segment> {
        quad_outline(&self.corners)
    }
}

impl EntityFields for Trace {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10..=13 | 20..=23 | 30..=33 => {
                if handle_corner_record(&mut self.corners, &record) {
                    None
                } else {
                    Some(record)
                }
            }
            39 => {
                self.thickness = record.as_f64()?;
                None
            }
            _ => Some(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_read_trace() {
        let data = " 10\n0.0\n 11\n2.0\n 21\n0.5\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let trace = Trace::read(&mut input).unwrap();
        assert_eq!(trace.corners[1], Vector3::new(2.0, 0.5, 0.0));
    }
}
