//! Circle entity.

use super::{read_entity_records, EntityCommon, EntityFields, CURVE_SEGMENTS};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    pub common: EntityCommon,
    /// Center (codes 10/20/30)
    pub center: Vector3,
    /// Radius (code 40)
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self {
            center,
            radius,
            ..Default::default()
        }
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("CIRCLE")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.center)?;
        writer.write_double(40, self.radius)?;
        self.common.write_suffix(writer)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let r = Vector3::new(self.radius, self.radius, 0.0);
        Some(BoundingBox3D::new(self.center - r, self.center + r))
    }

    pub fn flatten(&self) -> Vec<Segment> {
        let step = std::f64::consts::TAU / CURVE_SEGMENTS as f64;
        let at = |i: usize| {
            let angle = step * i as f64;
            self.center + Vector3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0)
        };
        (0..CURVE_SEGMENTS)
            .map(|i| [at(i), at(i + 1)])
            .collect()
    }
}

impl EntityFields for Circle {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.center.x = record.as_f64()?,
            20 => self.center.y = record.as_f64()?,
            30 => self.center.z = record.as_f64()?,
            40 => self.radius = record.as_f64()?,
            _ => return Some(record),
        }
        None
    }
}
