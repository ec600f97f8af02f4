//! ENTITIES section.

use super::next_record;
use crate::entities::Entity;
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter};
use crate::notification::{NotificationCollection, NotificationKind};
use crate::types::BoundingBox3D;

const NAME: &str = "ENTITIES";

/// The ENTITIES section: the drawing's model-space entities, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitiesSection {
    pub entities: Vec<Entity>,
}

impl EntitiesSection {
    pub(crate) fn read<R: RecordReader>(
        input: &mut R,
        notifications: &mut NotificationCollection,
    ) -> Result<Self> {
        let mut section = Self::default();
        loop {
            let record = next_record(input, NAME)?;
            if record.code != 0 {
                // A stray value record between entities cannot be attributed.
                notifications.notify(
                    NotificationKind::SkippedRecord,
                    format!("stray record (code {}) between entities", record.code),
                );
                continue;
            }
            let tag = record.as_str().unwrap_or("").to_string();
            if tag == "ENDSEC" {
                break;
            }
            section.entities.push(Entity::read(&tag, input)?);
        }
        Ok(section)
    }

    pub(crate) fn write_body<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for entity in &self.entities {
            entity.write(writer)?;
        }
        Ok(())
    }

    /// Union of the entity bounds; `None` when nothing has geometry.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DxfError;
    use crate::io::TextRecordReader;

    #[test]
    fn test_read_entities() {
        let data = "  0\nLINE\n 10\n0.0\n 11\n1.0\n  0\nCIRCLE\n 40\n2.0\n  0\nXFUTURE\n 70\n1\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = EntitiesSection::read(&mut input, &mut notifications).unwrap();
        assert_eq!(section.entities.len(), 3);
        assert_eq!(section.entities[2].type_name(), "XFUTURE");
    }

    #[test]
    fn test_stray_record_skipped_with_notification() {
        let data = " 70\n9\n  0\nLINE\n 10\n0.0\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = EntitiesSection::read(&mut input, &mut notifications).unwrap();
        assert_eq!(section.entities.len(), 1);
        assert!(notifications.has_kind(NotificationKind::SkippedRecord));
    }

    #[test]
    fn test_missing_endsec() {
        let data = "  0\nLINE\n 10\n0.0\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let err = EntitiesSection::read(&mut input, &mut notifications).unwrap_err();
        assert!(matches!(err, DxfError::TruncatedSection(name) if name == "ENTITIES"));
    }
}
