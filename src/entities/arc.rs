//! Circular arc entity.

use super::{read_entity_records, EntityCommon, EntityFields, CURVE_SEGMENTS};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

/// A circular arc swept counterclockwise from `start_angle` to `end_angle`.
///
/// Angles are in degrees, matching the on-disk representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: EntityCommon,
    /// Center (codes 10/20/30)
    pub center: Vector3,
    /// Radius (code 40)
    pub radius: f64,
    /// Start angle in degrees (code 50)
    pub start_angle: f64,
    /// End angle in degrees (code 51)
    pub end_angle: f64,
}

impl Default for Arc {
    fn default() -> Self {
        Self {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }
}

impl Arc {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("ARC")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.center)?;
        writer.write_double(40, self.radius)?;
        writer.write_double(50, self.start_angle)?;
        writer.write_double(51, self.end_angle)?;
        self.common.write_suffix(writer)
    }

    /// Swept angle in radians, counterclockwise, in `(0, 2π]`.
    fn sweep(&self) -> f64 {
        let mut sweep = (self.end_angle - self.start_angle).to_radians();
        while sweep <= 0.0 {
            sweep += std::f64::consts::TAU;
        }
        sweep
    }

    fn point_at(&self, angle: f64) -> Vector3 {
        self.center + Vector3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0)
    }

    /// Conservative bounds: the full circle's box. Tight arc bounds would
    /// need quadrant analysis and the extra area is harmless for indexing.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let r = Vector3::new(self.radius, self.radius, 0.0);
        Some(BoundingBox3D::new(self.center - r, self.center + r))
    }

    pub fn flatten(&self) -> Vec<Segment> {
        let sweep = self.sweep();
        // Scale the segment count with the swept fraction, minimum two.
        let count = ((CURVE_SEGMENTS as f64 * sweep / std::f64::consts::TAU).ceil() as usize).max(2);
        let start = self.start_angle.to_radians();
        let step = sweep / count as f64;
        (0..count)
            .map(|i| {
                [
                    self.point_at(start + step * i as f64),
                    self.point_at(start + step * (i + 1) as f64),
                ]
            })
            .collect()
    }
}

impl EntityFields for Arc {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.center.x = record.as_f64()?,
            20 => self.center.y = record.as_f64()?,
            30 => self.center.z = record.as_f64()?,
            40 => self.radius = record.as_f64()?,
            50 => self.start_angle = record.as_f64()?,
            51 => self.end_angle = record.as_f64()?,
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
    fn test_read_arc() {
        let data = " 10\n0.0\n 20\n0.0\n 40\n1.0\n 50\n0.0\n 51\n90.0\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let arc = Arc::read(&mut input).unwrap();
        assert_eq!(arc.start_angle, 0.0);
        assert_eq!(arc.end_angle, 90.0);
    }

    #[test]
    fn test_flatten_quarter_arc_endpoints() {
        let arc = Arc {
            radius: 1.0,
            start_angle: 0.0,
            end_angle: 90.0,
            ..Default::default()
        };
        let segments = arc.flatten();
        let first = segments.first().unwrap()[0];
        let last = segments.last().unwrap()[1];
        assert!(first.distance(&Vector3::new(1.0, 0.0, 0.0)) < 1e-9);
        assert!(last.distance(&Vector3::new(0.0, 1.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_sweep_wraps_through_zero() {
        let arc = Arc {
            radius: 1.0,
            start_angle: 270.0,
            end_angle: 90.0,
            ..Default::default()
        };
        assert!((arc.sweep() - std::f64::consts::PI).abs() < 1e-9);
    }
}
