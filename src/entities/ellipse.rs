//! Ellipse entity.

use super::{read_entity_records, EntityCommon, EntityFields, CURVE_SEGMENTS};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

/// An elliptical arc.
///
/// The major axis is stored as an endpoint relative to the center; the
/// minor axis is derived from the extrusion normal and the axis ratio.
/// Parameters are in radians on disk, unlike [`Arc`](super::Arc) angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: EntityCommon,
    /// Center (codes 10/20/30)
    pub center: Vector3,
    /// Major axis endpoint relative to the center (codes 11/21/31)
    pub major_axis: Vector3,
    /// Minor-to-major axis ratio (code 40)
    pub ratio: f64,
    /// Start parameter in radians (code 41)
    pub start_param: f64,
    /// End parameter in radians (code 42)
    pub end_param: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Self {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            major_axis: Vector3::new(1.0, 0.0, 0.0),
            ratio: 1.0,
            start_param: 0.0,
            end_param: std::f64::consts::TAU,
        }
    }
}

impl Ellipse {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("ELLIPSE")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.center)?;
        writer.write_point(11, self.major_axis)?;
        writer.write_double(40, self.ratio)?;
        writer.write_double(41, self.start_param)?;
        writer.write_double(42, self.end_param)?;
        self.common.write_suffix(writer)
    }

    /// Minor axis direction scaled by the ratio, in the entity plane.
    fn minor_axis(&self) -> Vector3 {
        self.common.extrusion.cross(&self.major_axis) * self.ratio
    }

    fn point_at(&self, param: f64) -> Vector3 {
        self.center + self.major_axis * param.cos() + self.minor_axis() * param.sin()
    }

    /// Conservative bounds spanning both axis extremes.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let minor = self.minor_axis();
        BoundingBox3D::from_points(&[
            self.center + self.major_axis + minor,
            self.center + self.major_axis - minor,
            self.center - self.major_axis + minor,
            self.center - self.major_axis - minor,
        ])
    }

    pub fn flatten(&self) -> Vec<Segment> {
        let mut sweep = self.end_param - self.start_param;
        while sweep <= 0.0 {
            sweep += std::f64::consts::TAU;
        }
        let count = ((CURVE_SEGMENTS as f64 * sweep / std::f64::consts::TAU).ceil() as usize).max(2);
        let step = sweep / count as f64;
        (0..count)
            .map(|i| {
                [
                    self.point_at(self.start_param + step * i as f64),
                    self.point_at(self.start_param + step * (i + 1) as f64),
                ]
            })
            .collect()
    }
}

impl EntityFields for Ellipse {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.center.x = record.as_f64()?,
            20 => self.center.y = record.as_f64()?,
            30 => self.center.z = record.as_f64()?,
            11 => self.major_axis.x = record.as_f64()?,
            21 => self.major_axis.y = record.as_f64()?,
            31 => self.major_axis.z = record.as_f64()?,
            40 => self.ratio = record.as_f64()?,
            41 => self.start_param = record.as_f64()?,
            42 => self.end_param = record.as_f64()?,
            _ => return Some(record),
        }
        None
    }
}
