//! Lightweight polyline entity.
//!
//! Unlike the heavyweight polyline, vertex data is inline: each code-10
//! record starts a new vertex and the following 20/40/41/42 records refine
//! it. Parse order therefore matters here.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector2};

/// Closed-polyline flag bit (code 70).
const LWPOLYLINE_CLOSED: i16 = 1;

/// One inline vertex of a lightweight polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LwVertex {
    /// 2D location (codes 10/20)
    pub position: Vector2,
    /// Start width (code 40)
    pub start_width: f64,
    /// End width (code 41)
    pub end_width: f64,
    /// Bulge of the following segment (code 42)
    pub bulge: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    /// Polyline flags (code 70); bit 0 marks a closed polyline
    pub flags: i16,
    /// Constant width (code 43)
    pub constant_width: f64,
    /// Elevation of the polyline plane (code 38)
    pub elevation: f64,
    /// Inline vertices, in stream order
    pub vertices: Vec<LwVertex>,
}

impl LwPolyline {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("LWPOLYLINE")?;
        self.common.write_prefix(writer)?;
        writer.write_integer(90, self.vertices.len() as i32)?;
        if self.flags != 0 {
            writer.write_integer(70, self.flags as i32)?;
        }
        if self.constant_width != 0.0 {
            writer.write_double(43, self.constant_width)?;
        }
        if self.elevation != 0.0 {
            writer.write_double(38, self.elevation)?;
        }
        for vertex in &self.vertices {
            writer.write_double(10, vertex.position.x)?;
            writer.write_double(20, vertex.position.y)?;
            if vertex.start_width != 0.0 {
                writer.write_double(40, vertex.start_width)?;
            }
            if vertex.end_width != 0.0 {
                writer.write_double(41, vertex.end_width)?;
            }
            if vertex.bulge != 0.0 {
                writer.write_double(42, vertex.bulge)?;
            }
        }
        self.common.write_suffix(writer)
    }

    pub fn is_closed(&self) -> bool {
        self.flags & LWPOLYLINE_CLOSED != 0
    }

    fn last_vertex(&mut self) -> &mut LwVertex {
        if self.vertices.is_empty() {
            self.vertices.push(LwVertex::default());
        }
        self.vertices.last_mut().unwrap()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let points: Vec<_> = self
            .vertices
            .iter()
            .map(|v| v.position.at_elevation(self.elevation))
            .collect();
        BoundingBox3D::from_points(&points)
    }

    /// Consecutive vertex segments lifted to the polyline elevation;
    /// bulges are rendered straight.
    pub fn flatten(&self) -> Vec<Segment> {
        let lift = |v: &LwVertex| v.position.at_elevation(self.elevation);
        let mut segments: Vec<Segment> = self
            .vertices
            .windows(2)
            .map(|pair| [lift(&pair[0]), lift(&pair[1])])
            .collect();
        if self.is_closed() && self.vertices.len() > 2 {
            segments.push([
                lift(&self.vertices[self.vertices.len() - 1]),
                lift(&self.vertices[0]),
            ]);
        }
        segments
    }
}

impl EntityFields for LwPolyline {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            // Vertex count; the vertex list is authoritative, so only used
            // to reserve capacity.
            90 => {
                if let Some(count) = record.as_i32() {
                    self.vertices.reserve(count.max(0) as usize);
                }
            }
            70 => self.flags = record.as_i16()?,
            43 => self.constant_width = record.as_f64()?,
            38 => self.elevation = record.as_f64()?,
            10 => {
                let x = record.as_f64()?;
                self.vertices.push(LwVertex {
                    position: Vector2::new(x, 0.0),
                    ..Default::default()
                });
            }
            20 => self.last_vertex().position.y = record.as_f64()?,
            40 => self.last_vertex().start_width = record.as_f64()?,
            41 => self.last_vertex().end_width = record.as_f64()?,
            42 => self.last_vertex().bulge = record.as_f64()?,
            _ => return Some(record),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    fn parse(data: &str) -> LwPolyline {
        let mut input = TextRecordReader::new(data.as_bytes());
        LwPolyline::read(&mut input).unwrap()
    }

    #[test]
    fn test_inline_vertices() {
        let p = parse(" 90\n2\n 70\n0\n 10\n0.0\n 20\n0.0\n 10\n3.0\n 20\n4.0\n 42\n0.5\n  0\nEOF\n");
        assert_eq!(p.vertices.len(), 2);
        assert_eq!(p.vertices[1].position, Vector2::new(3.0, 4.0));
        assert_eq!(p.vertices[1].bulge, 0.5);
    }

    #[test]
    fn test_elevation_lift() {
        let p = parse(" 38\n2.0\n 10\n0.0\n 20\n0.0\n 10\n1.0\n 20\n0.0\n  0\nEOF\n");
        let segments = p.flatten();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0][0].z, 2.0);
    }
}
