//! Block insert entity.

use super::{read_entity_records, Entity, EntityCommon, EntityFields};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{Record, RecordHolder, Value};
use crate::types::{BoundingBox3D, Vector3};

/// A reference to a block definition, placed with scale and rotation.
///
/// When code 66 is nonzero the insert owns a run of attached entities
/// (attribute values in practice) terminated by SEQEND.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub common: EntityCommon,
    /// Referenced block name (code 2)
    pub block_name: String,
    /// Insertion point (codes 10/20/30)
    pub location: Vector3,
    /// Scale factors (codes 41/42/43), 1.0 by default
    pub scale: Vector3,
    /// Rotation angle in degrees (code 50)
    pub rotation: f64,
    /// Column and row counts (codes 70/71), 1 by default
    pub columns: i16,
    pub rows: i16,
    /// Column and row spacing (codes 44/45)
    pub column_spacing: f64,
    pub row_spacing: f64,
    /// Entities-follow flag (code 66)
    pub entities_follow: i16,
    /// Attached entity run, present when `entities_follow` is set
    pub attached: Vec<Entity>,
    /// Records attached to the terminating SEQEND, replayed on write
    pub seqend: RecordHolder,
}

impl Default for Insert {
    fn default() -> Self {
        Self {
            common: EntityCommon::new(),
            block_name: String::new(),
            location: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            columns: 1,
            rows: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
            entities_follow: 0,
            attached: Vec::new(),
            seqend: RecordHolder::new(),
        }
    }
}

impl Insert {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut entity = Self::default();
        read_entity_records(input, &mut entity)?;
        if entity.entities_follow != 0 {
            entity.read_attached_run(input)?;
        }
        Ok(entity)
    }

    /// Consume attached entities up to and including SEQEND. End of stream
    /// is left for the owning section to diagnose.
    fn read_attached_run<R: RecordReader>(&mut self, input: &mut R) -> Result<()> {
        while let Some(record) = input.read_record()? {
            if record.code != 0 {
                input.push_back(record);
                break;
            }
            match record.as_str() {
                Some("SEQEND") => {
                    self.read_seqend(input)?;
                    break;
                }
                Some(name) => {
                    let name = name.to_string();
                    self.attached.push(Entity::read(&name, input)?);
                }
                None => {
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
        writer.write_type_marker("INSERT")?;
        self.common.write_prefix(writer)?;
        if !self.attached.is_empty() || self.entities_follow != 0 {
            writer.write_integer(66, 1)?;
        }
        writer.write_string(2, &self.block_name)?;
        writer.write_point(10, self.location)?;
        if self.scale != Vector3::new(1.0, 1.0, 1.0) {
            writer.write_double(41, self.scale.x)?;
            writer.write_double(42, self.scale.y)?;
            writer.write_double(43, self.scale.z)?;
        }
        if self.rotation != 0.0 {
            writer.write_double(50, self.rotation)?;
        }
        if self.columns != 1 {
            writer.write_integer(70, self.columns as i32)?;
        }
        if self.rows != 1 {
            writer.write_integer(71, self.rows as i32)?;
        }
        if self.column_spacing != 0.0 {
            writer.write_double(44, self.column_spacing)?;
        }
        if self.row_spacing != 0.0 {
            writer.write_double(45, self.row_spacing)?;
        }
        self.common.write_suffix(writer)?;
        if !self.attached.is_empty() || self.entities_follow != 0 {
            for entity in &self.attached {
                entity.write(writer)?;
            }
            writer.write_type_marker("SEQEND")?;
            self.seqend.write(writer)?;
        }
        Ok(())
    }

    /// Bounds cover the insertion point; expanding the referenced block
    /// requires the owning document (see `Model::resolve_block`).
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        Some(BoundingBox3D::from_point(self.location))
    }
}

impl EntityFields for Insert {
    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match (record.code, &record.value) {
            (2, Value::Str(s)) => self.block_name = s.clone(),
            (10, _) => self.location.x = record.as_f64()?,
            (20, _) => self.location.y = record.as_f64()?,
            (30, _) => self.location.z = record.as_f64()?,
            (41, _) => self.scale.x = record.as_f64()?,
            (42, _) => self.scale.y = record.as_f64()?,
            (43, _) => self.scale.z = record.as_f64()?,
            (50, _) => self.rotation = record.as_f64()?,
            (70, _) => self.columns = record.as_i16()?,
            (71, _) => self.rows = record.as_i16()?,
            (44, _) => self.column_spacing = record.as_f64()?,
            (45, _) => self.row_spacing = record.as_f64()?,
            (66, _) => self.entities_follow = record.as_i16()?,
            _ => return Some(record),
        }
        None
    }
}
