//! 3DFACE entity.

use super::solid::handle_corner_record;
use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

/// A three- or four-sided planar face.
///
/// Unlike SOLID, the corners form the outline in storage order. Bits 0-3
/// of the flags mark the corresponding edge invisible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face3D {
    pub common: EntityCommon,
    /// Corner points (codes 10/11/12/13 with 2x/3x offsets)
    pub corners: [Vector3; 4],
    /// Invisible-edge flags (code 70)
    pub flags: i16,
}

impl Face3D {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("3DFACE")?;
        self.common.write_prefix(writer)?;
        for (i, corner) in self.corners.iter().enumerate() {
            writer.write_point(10 + i as i32, *corner)?;
        }
        if self.flags != 0 {
            writer.write_integer(70, self.flags as i32)?;
        }
        self.common.write_suffix(writer)
    }

    pub fn is_edge_visible(&self, edge: usize) -> bool {
        edge < 4 && self.flags & (1 << edge) == 0
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&self.corners)
    }

    /// Visible edges of the outline, in storage order.
    pub fn flatten(&self) -> Vec<Segment> {
        (0..4)
            .filter(|&edge| self.is_edge_visible(edge))
            .map(|edge| [self.corners[edge], self.corners[(edge + 1) % 4]])
            .collect()
    }
}

impl EntityFields for Face3D {
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
            70 => {
                self.flags = record.as_i16()?;
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
    fn test_invisible_edges_skipped() {
        // Edge 1 (corner 1 to corner 2) is flagged invisible.
        let data = " 10\n0.0\n 11\n1.0\n 12\n1.0\n 22\n1.0\n 13\n0.0\n 23\n1.0\n 70\n2\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let face = Face3D::read(&mut input).unwrap();
        let segments = face.flatten();
        assert_eq!(segments.len(), 3);
        assert!(!face.is_edge_visible(1));
    }
}
