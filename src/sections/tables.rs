//! TABLES section.

use super::next_record;
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter};
use crate::notification::{NotificationCollection, NotificationKind};
use crate::tables::Table;

const NAME: &str = "TABLES";

/// The TABLES section: an ordered list of symbol tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablesSection {
    pub tables: Vec<Table>,
}

impl TablesSection {
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
                    format!("stray record (code {}) between tables", record.code),
                );
                continue;
            }
            let tag = record.as_str().unwrap_or("").to_string();
            match tag.as_str() {
                "ENDSEC" => break,
                "TABLE" => section
                    .tables
                    .push(Table::read(input, notifications)?),
                other => {
                    notifications.notify(
                        NotificationKind::SkippedRecord,
                        format!("unexpected '{}' marker between tables", other),
                    );
                    skip_block(input, NAME)?;
                }
            }
        }
        Ok(section)
    }

    pub(crate) fn write_body<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for table in &self.tables {
            table.write(writer)?;
        }
        Ok(())
    }

    /// Look up a table by name ("LAYER", "UCS", ...).
    pub fn find(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }
}

/// Consume records up to the next code-0 marker, which is pushed back.
fn skip_block<R: RecordReader>(input: &mut R, section: &str) -> Result<()> {
    loop {
        let record = next_record(input, section)?;
        if record.code == 0 {
            input.push_back(record);
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_read_tables() {
        let data = "  0\nTABLE\n  2\nLAYER\n 70\n1\n  0\nLAYER\n  2\nWALLS\n  0\nENDTAB\n  0\nTABLE\n  2\nUCS\n 70\n0\n  0\nENDTAB\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = TablesSection::read(&mut input, &mut notifications).unwrap();
        assert_eq!(section.tables.len(), 2);
        assert!(section.find("LAYER").is_some());
        assert!(section.find("UCS").unwrap().is_empty());
    }

    #[test]
    fn test_stray_marker_skipped_with_notification() {
        let data = "  0\nJUNK\n 70\n9\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = TablesSection::read(&mut input, &mut notifications).unwrap();
        assert!(section.tables.is_empty());
        assert!(notifications.has_kind(NotificationKind::SkippedRecord));
    }
}
