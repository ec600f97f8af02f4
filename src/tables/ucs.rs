//! User coordinate system table entry.

use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{RecordHolder, Value};
use crate::types::Vector3;

/// A named coordinate system: an origin and two in-plane axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Ucs {
    /// Name (code 2)
    pub name: String,
    /// Flags (code 70)
    pub flags: i16,
    /// Origin (codes 10/20/30)
    pub origin: Vector3,
    /// X axis direction (codes 11/21/31)
    pub x_axis: Vector3,
    /// Y axis direction (codes 12/22/32)
    pub y_axis: Vector3,
    /// Records the typed fields did not interpret
    pub extra: RecordHolder,
}

impl Default for Ucs {
    fn default() -> Self {
        Self {
            name: String::new(),
            flags: 0,
            origin: Vector3::ZERO,
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
            extra: RecordHolder::new(),
        }
    }
}

impl Ucs {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut ucs = Ucs::default();
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            match (record.code, &record.value) {
                (2, Value::Str(s)) => ucs.name = s.clone(),
                (70, _) => {
                    if let Some(flags) = record.as_i16() {
                        ucs.flags = flags;
                    }
                }
                (10, _) | (20, _) | (30, _) | (11, _) | (21, _) | (31, _) | (12, _) | (22, _)
                | (32, _) => {
                    if let Some(v) = record.as_f64() {
                        let target = match record.code % 10 {
                            0 => &mut ucs.origin,
                            1 => &mut ucs.x_axis,
                            _ => &mut ucs.y_axis,
                        };
                        match record.code / 10 {
                            1 => target.x = v,
                            2 => target.y = v,
                            _ => target.z = v,
                        }
                    }
                }
                _ => ucs.extra.add(record),
            }
        }
        Ok(ucs)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("UCS")?;
        writer.write_string(2, &self.name)?;
        writer.write_integer(70, self.flags as i32)?;
        writer.write_point(10, self.origin)?;
        writer.write_point(11, self.x_axis)?;
        writer.write_point(12, self.y_axis)?;
        self.extra.write(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_read_ucs() {
        let data = "  2\nPLAN\n 10\n1.0\n 20\n2.0\n 11\n0.0\n 21\n1.0\n 12\n-1.0\n 22\n0.0\n  0\nENDTAB\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let ucs = Ucs::read(&mut input).unwrap();
        assert_eq!(ucs.name, "PLAN");
        assert_eq!(ucs.origin, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(ucs.x_axis, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(ucs.y_axis, Vector3::new(-1.0, 0.0, 0.0));
    }
}
