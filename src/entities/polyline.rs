//! Heavyweight polyline: a POLYLINE header followed by a run of VERTEX
//! entities terminated by SEQEND.

use super::{read_entity_records, EntityCommon, EntityFields, Vertex};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{Record, RecordHolder};
use crate::types::{BoundingBox3D, Segment, Vector3};

/// Closed-polyline flag bit (code 70).
pub const POLYLINE_CLOSED: i16 = 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub common: EntityCommon,
    /// Polyline flags (code 70); bit 0 marks a closed polyline
    pub flags: i16,
    /// Elevation point (codes 10/20/30); z carries the elevation, x/y are
    /// nominally zero but replayed as read
    pub elevation: Vector3,
    /// The vertex run, in stream order
    pub vertices: Vec<Vertex>,
    /// Records attached to the terminating SEQEND, replayed on write
    pub seqend: RecordHolder,
}

impl Polyline {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        entity.read_vertex_run(input)?;
        Ok(entity)
    }

    /// Consume the VERTEX run up to and including SEQEND. A foreign code-0
    /// marker ends the run early and is pushed back; end of stream is left
    /// for the owning section to diagnose.
    fn read_vertex_run<R: RecordReader>(&mut self, input: &mut R) -> Result<()> {
        while let Some(record) = input.read_record()? {
            match record.as_str() {
                Some("VERTEX") if record.code == 0 => {
                    self.vertices.push(Vertex::read(input)?);
                }
                Some("SEQEND") if record.code == 0 => {
                    self.read_seqend(input)?;
                    break;
                }
                _ => {
                    input.push_back(record);
                    break;
                }
            }
        }
        Ok(())
    }

    fn read_seqend<R: RecordReader>(&mut self, input: &mut R) -> Result<()> {
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            self.seqend.add(record);
        }
        Ok(())
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("POLYLINE")?;
        self.common.write_prefix(writer)?;
        writer.write_point(10, self.elevation)?;
        if self.flags != 0 {
            writer.write_integer(70, self.flags as i32)?;
        }
        self.common.write_suffix(writer)?;
        for vertex in &self.vertices {
            vertex.write(writer)?;
        }
        writer.write_type_marker("SEQEND")?;
        self.seqend.write(writer)
    }

    pub fn is_closed(&self) -> bool {
        self.flags & POLYLINE_CLOSED != 0
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let points: Vec<_> = self.vertices.iter().map(|v| v.location).collect();
        BoundingBox3D::from_points(&points)
    }

    /// Consecutive vertex segments; bulges are rendered straight.
    pub fn flatten(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self
            .vertices
            .windows(2)
            .map(|pair| [pair[0].location, pair[1].location])
            .collect();
        if self.is_closed() && self.vertices.len() > 2 {
            segments.push([
                self.vertices[self.vertices.len() - 1].location,
                self.vertices[0].location,
            ]);
        }
        segments
    }
}

impl EntityFields for Polyline {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            10 => self.elevation.x = record.as_f64()?,
            20 => self.elevation.y = record.as_f64()?,
            30 => self.elevation.z = record.as_f64()?,
            70 => self.flags = record.as_i16()?,
            _ => return Some(record),
        }
        None
    }
}
