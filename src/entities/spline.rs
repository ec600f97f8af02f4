//! Spline entity.

use super::{read_entity_records, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::Record;
use crate::types::{BoundingBox3D, Segment, Vector3};

/// A NURBS curve, stored as knots, control points, and optional fit points.
///
/// Repeatable records accumulate in stream order: each code-40 appends a
/// knot, each code-10 starts a control point, each code-11 a fit point,
/// each code-41 a weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spline {
    pub common: EntityCommon,
    /// Spline flags (code 70)
    pub flags: i16,
    /// Degree of the curve (code 71)
    pub degree: i16,
    /// Knot values (code 40, repeated)
    pub knots: Vec<f64>,
    /// Control points (codes 10/20/30, repeated)
    pub control_points: Vec<Vector3>,
    /// Weights (code 41, repeated); empty means uniform
    pub weights: Vec<f64>,
    /// Fit points (codes 11/21/31, repeated)
    pub fit_points: Vec<Vector3>,
}

impl Spline {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("SPLINE")?;
        self.common.write_prefix(writer)?;
        writer.write_integer(70, self.flags as i32)?;
        writer.write_integer(71, self.degree as i32)?;
        writer.write_integer(72, self.knots.len() as i32)?;
        writer.write_integer(73, self.control_points.len() as i32)?;
        writer.write_integer(74, self.fit_points.len() as i32)?;
        for knot in &self.knots {
            writer.write_double(40, *knot)?;
        }
        for weight in &self.weights {
            writer.write_double(41, *weight)?;
        }
        for point in &self.control_points {
            writer.write_point(10, *point)?;
        }
        for point in &self.fit_points {
            writer.write_point(11, *point)?;
        }
        self.common.write_suffix(writer)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        // The curve lies in the convex hull of its control points.
        BoundingBox3D::from_points(&self.control_points)
    }

    /// Control polygon as segments; a hull-accurate approximation is out of
    /// scope for indexing purposes.
    pub fn flatten(&self) -> Vec<Segment> {
        self.control_points
            .windows(2)
            .map(|pair| [pair[0], pair[1]])
            .collect()
    }

    fn last_control(&mut self) -> &mut Vector3 {
        if self.control_points.is_empty() {
            self.control_points.push(Vector3::ZERO);
        }
        self.control_points.last_mut().unwrap()
    }

    fn last_fit(&mut self) -> &mut Vector3 {
        if self.fit_points.is_empty() {
            self.fit_points.push(Vector3::ZERO);
        }
        self.fit_points.last_mut().unwrap()
    }
}

impl EntityFields for Spline {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            70 => self.flags = record.as_i16()?,
            71 => self.degree = record.as_i16()?,
            // Counts are implied by the accumulated lists.
            72 | 73 | 74 => {}
            40 => self.knots.push(record.as_f64()?),
            41 => self.weights.push(record.as_f64()?),
            10 => {
                let x = record.as_f64()?;
                self.control_points.push(Vector3::new(x, 0.0, 0.0));
            }
            20 => self.last_control().y = record.as_f64()?,
            30 => self.last_control().z = record.as_f64()?,
            11 => {
                let x = record.as_f64()?;
                self.fit_points.push(Vector3::new(x, 0.0, 0.0));
            }
            21 => self.last_fit().y = record.as_f64()?,
            31 => self.last_fit().z = record.as_f64()?,
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
    fn test_accumulating_fields() {
        let data = " 71\n3\n 40\n0.0\n 40\n0.0\n 40\n1.0\n 10\n0.0\n 20\n0.0\n 10\n1.0\n 20\n2.0\n 30\n3.0\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let spline = Spline::read(&mut input).unwrap();
        assert_eq!(spline.degree, 3);
        assert_eq!(spline.knots, vec![0.0, 0.0, 1.0]);
        assert_eq!(spline.control_points.len(), 2);
        assert_eq!(spline.control_points[1], Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_bounding_box_from_control_points() {
        let data = " 10\n0.0\n 20\n0.0\n 10\n2.0\n 20\n2.0\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let spline = Spline::read(&mut input).unwrap();
        let bounds = spline.bounding_box().unwrap();
        assert_eq!(bounds.max, Vector3::new(2.0, 2.0, 0.0));
    }
}
