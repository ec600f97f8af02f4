//! Line entity.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

/// A straight segment between two endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub common: EntityCommon,
    /// Start point (codes 10/20/30)
    pub start: Vector3,
    /// End point (codes 11/21/31)
    pub end: Vector3,
    /// Optional thickness (code 39)
    pub thickness: f64,
}

impl Line {
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("LINE")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.start)?;
        writer.write_point(11, self.end)?;
        if self.thickness != 0.0 {
            writer.write_double(39, self.thickness)?;
        }
        self.common.write_suffix(writer)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&[self.start, self.end])
    }

    pub fn flatten(&self) -> Vec<Segment> {
        vec![[self.start, self.end]]
    }
}

impl EntityFields for Line {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.start.x = record.as_f64()?,
            20 => self.start.y = record.as_f64()?,
            30 => self.start.z = record.as_f64()?,
            11 => self.end.x = record.as_f64()?,
            21 => self.end.y = record.as_f64()?,
            31 => self.end.z = record.as_f64()?,
            39 => self.thickness = record.as_f64()?,
            _ => return Some(record),
        }
        None
    }
}
