//! Block definition.
//!
//! A block owns child entities up to the matching ENDBLK marker. Block
//! definitions live in the BLOCKS section and are referenced by name from
//! [`Insert`](super::Insert) entities.

use super::{read_entity_records, Entity, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{Record, RecordHolder, Value};
use crate::types::{BoundingBox3D, Segment, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub common: EntityCommon,
    /// Block name (code 2; code 3 repeats it)
    pub name: String,
    /// Block flags (code 70)
    pub flags: i16,
    /// Base point (codes 10/20/30)
    pub base: Vector3,
    /// External reference path (code 1)
    pub xref_path: String,
    /// Child entities, in stream order
    pub entities: Vec<Entity>,
    /// Records attached to the ENDBLK marker, replayed on write
    pub endblk: RecordHolder,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut block = Self::default();
        read_entity_records(input, &mut block)?;
        block.read_children(input)?;
        Ok(block)
    }

    /// Consume child entities up to and including ENDBLK. End of stream is
    /// left for the owning section to diagnose.
    fn read_children<R: RecordReader>(&mut self, input: &mut R) -> Result<()> {
        while let Some(record) = input.read_record()? {
            if record.code != 0 {
                input.push_back(record);
                break;
            }
            match record.as_str() {
                Some("ENDBLK") => {
                    self.read_endblk(input)?;
                    break;
                }
                // ENDSEC means the block was never closed; hand the marker
                // back so the section still terminates cleanly.
                Some("ENDSEC") | None => {
                    input.push_back(record);
                    break;
                }
                Some(name) => {
                    let name = name.to_string();
                    self.entities.push(Entity::read(&name, input)?);
                }
            }
        }
        Ok(())
    }

    fn read_endblk<R: RecordReader>(&mut self, input: &mut R) -> Result<()> {
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            self.endblk.add(record);
        }
        Ok(())
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("BLOCK")?;
        self.common.write_prefix(writer)?;
        writer.write_string(2, &self.name)?;
        writer.write_integer(70, self.flags as i32)?;
        writer.write_point(10, self.base)?;
        writer.write_string(3, &self.name)?;
        if !self.xref_path.is_empty() {
            writer.write_string(1, &self.xref_path)?;
        }
        self.common.write_suffix(writer)?;
        for entity in &self.entities {
            entity.write(writer)?;
        }
        writer.write_type_marker("ENDBLK")?;
        self.endblk.write(writer)
    }

    /// Union of the child bounds, in block-local coordinates.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        let mut bounds: Option<BoundingBox3D> = None;
        for entity in &self.entities {
            if let Some(child) = entity.bounding_box() {
                bounds = Some(match bounds {
                    Some(b) => b.union(&child),
                    None => child,
                });
            }
        }
        bounds
    }

    pub fn flatten(&self) -> Vec<Segment> {
        self.entities.iter().flat_map(|e| e.flatten()).collect()
    }
}

impl EntityFields for Block {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match (record.code, &record.value) {
            (2, Value::Str(s)) => self.name = s.clone(),
            // Code 3 duplicates the name; prefer code 2 when both occur.
            (3, Value::Str(s)) => {
                if self.name.is_empty() {
                    self.name = s.clone();
                }
            }
            (1, Value::Str(s)) => self.xref_path = s.clone(),
            (70, _) => self.flags = record.as_i16()?,
            (10, _) => self.base.x = record.as_f64()?,
            (20, _) => self.base.y = record.as_f64()?,
            (30, _) => self.base.z = record.as_f64()?,
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
    fn test_block_children() {
        let data = "  2\nDOOR\n 70\n0\n 10\n0.0\n  0\nLINE\n 10\n0.0\n 11\n1.0\n  0\nCIRCLE\n 40\n0.5\n  0\nENDBLK\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let block = Block::read(&mut input).unwrap();
        assert_eq!(block.name, "DOOR");
        assert_eq!(block.entities.len(), 2);
        let next = input.read_record().unwrap().unwrap();
        assert_eq!(next.as_str(), Some("EOF"));
    }

    #[test]
    fn test_unclosed_block_stops_at_endsec() {
        let data = "  2\nBAD\n  0\nLINE\n 10\n0.0\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let block = Block::read(&mut input).unwrap();
        assert_eq!(block.entities.len(), 1);
        // ENDSEC is handed back for the section loop.
        let next = input.read_record().unwrap().unwrap();
        assert_eq!(next.as_str(), Some("ENDSEC"));
    }

    #[test]
    fn test_bounds_union_children() {
        let data = "  2\nB\n  0\nLINE\n 10\n0.0\n 11\n1.0\n 21\n2.0\n  0\nENDBLK\n  0\nEOF\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let block = Block::read(&mut input).unwrap();
        let bounds = block.bounding_box().unwrap();
        assert_eq!(bounds.max.y, 2.0);
    }
}
