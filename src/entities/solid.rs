//! Solid entity: a filled quadrilateral (or triangle).

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

/// A filled two-dimensional quad.
///
/// Corners use codes 10-13; the third and fourth corners are stored in
/// swapped order on disk, so the outline runs 0-1-3-2. A triangle repeats
/// the last corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    pub common: EntityCommon,
    /// Corner points (codes 10/11/12/13 with 2x/3x offsets)
    pub corners: [Vector3; 4],
    /// Optional thickness (code 39)
    pub thickness: f64,
}

/// Outline of a quad whose third and fourth corners are stored swapped.
pub(crate) fn quad_outline(corners: &[Vector3; 4]) -> Vec<Segment> {
    vec![
        [corners[0], corners[1]],
        [corners[1], corners[3]],
        [corners[3], corners[2]],
        [corners[2], corners[0]],
    ]
}

/// Route a corner-point record into `corners`; shared with [`Trace`] and
/// [`Face3D`](super::Face3D), which use the same code layout.
///
/// [`Trace`]: super::Trace
pub(crate) fn handle_corner_record(corners: &mut [Vector3; 4], record: &Record) -> bool {
    let index = (record.code % 10) as usize;
    if index > 3 {
        return false;
    }
    let value = match record.as_f64() {
        Some(v) => v,
        None => return false,
    };
    match record.code / 10 {
        1 => corners[index].x = value,
        2 => corners[index].y = value,
        3 => corners[index].z = value,
        _ => return false,
    }
    true
}

impl Solid {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("SOLID")?;
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

impl EntityFields for Solid {
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
    fn test_corner_codes() {
        let data = " 10\n0.0\n 20\n0.0\n 11\n1.0\n 21\n0.0\n 12\n0.0\n 22\n1.0\n 13\n1.0\n 23\n1.0\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let solid = Solid::read(&mut input).unwrap();
        assert_eq!(solid.corners[3], Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_outline_order() {
        let mut solid = Solid::default();
        solid.corners = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ];
        let segments = solid.flatten();
        assert_eq!(segments.len(), 4);
        // The outline visits corner 3 before corner 2.
        assert_eq!(segments[1][1], Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(segments[2][1], Vector3::new(0.0, 1.0, 0.0));
    }
}
