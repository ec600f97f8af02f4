//! BLOCKS section.

use super::next_record;
use crate::entities::{Block, Entity};
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter};
use crate::notification::{NotificationCollection, NotificationKind};

const NAME: &str = "BLOCKS";

/// The BLOCKS section: an ordered list of block definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlocksSection {
    pub blocks: Vec<Block>,
}

impl BlocksSection {
    pub(crate) fn read<R: RecordReader>(
        input: &mut R,
        notifications: &mut NotificationCollection,
    ) -> Result<Self> {
        let mut section = Self::default();
        loop {
            let record = next_record(input, NAME)?;
            if record.code != 0 {
                notifications.notify(
                    NotificationKind::SkippedRecord,
                    format!("stray record (code {}) between blocks", record.code),
                );
                continue;
            }
            let tag = record.as_str().unwrap_or("").to_string();
            match tag.as_str() {
                "ENDSEC" => break,
                "BLOCK" => section.blocks.push(Block::read(input)?),
                other => {
                    // A non-block entity at block level is tolerated but
                    // reported; its records are dropped with it.
                    notifications.notify(
                        NotificationKind::UnknownType,
                        format!("unexpected '{}' marker between blocks", other),
                    );
                    let _ = Entity::read(&tag, input)?;
                }
            }
        }
        Ok(section)
    }

    pub(crate) fn write_body<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for block in &self.blocks {
            block.write(writer)?;
        }
        Ok(())
    }

    /// Look up a block definition by name.
    pub fn find(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_read_blocks() {
        let data = "  0\nBLOCK\n  2\nDOOR\n 70\n0\n  0\nLINE\n 10\n0.0\n  0\nENDBLK\n  0\nBLOCK\n  2\nWINDOW\n  0\nENDBLK\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = BlocksSection::read(&mut input, &mut notifications).unwrap();
        assert_eq!(section.blocks.len(), 2);
        assert_eq!(section.find("DOOR").unwrap().entities.len(), 1);
        assert!(section.find("WINDOW").unwrap().entities.is_empty());
    }
}
