//! Document sections.
//!
//! A drawing is an ordered run of named sections between `0 SECTION` /
//! `0 ENDSEC` markers. Known section names get typed models; anything else
//! is preserved raw by [`UnknownSection`].
//!
//! Every section parser owns the stream from just after the `2 <name>`
//! record up to and including ENDSEC, and fails with
//! [`DxfError::TruncatedSection`] when the stream ends before the marker.

mod blocks;
mod classes;
mod entities;
mod header;
mod objects;
mod tables;
mod unknown;

pub use blocks::BlocksSection;
pub use classes::{CadClass, ClassesSection};
pub use entities::EntitiesSection;
pub use header::HeaderSection;
pub use objects::{CadObject, ObjectsSection};
pub use tables::TablesSection;
pub use unknown::UnknownSection;

use crate::error::{DxfError, Result};
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::notification::NotificationCollection;
use crate::record::Record;

/// Read the next record inside the section `name`, treating end of stream
/// as a truncated section.
pub(crate) fn next_record<R: RecordReader>(input: &mut R, name: &str) -> Result<Record> {
    input
        .read_record()?
        .ok_or_else(|| DxfError::TruncatedSection(name.to_string()))
}

/// One section of a drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Header(HeaderSection),
    Classes(ClassesSection),
    Tables(TablesSection),
    Blocks(BlocksSection),
    Entities(EntitiesSection),
    Objects(ObjectsSection),
    Unknown(UnknownSection),
}

impl Section {
    /// Parse the section body; the `0 SECTION` and `2 <name>` records have
    /// already been consumed.
    pub fn read<R: RecordReader>(
        name: &str,
        input: &mut R,
        notifications: &mut NotificationCollection,
    ) -> Result<Section> {
        let section = match name {
            "HEADER" => Section::Header(HeaderSection::read(input)?),
            "CLASSES" => Section::Classes(ClassesSection::read(input)?),
            "TABLES" => Section::Tables(TablesSection::read(input, notifications)?),
            "BLOCKS" => Section::Blocks(BlocksSection::read(input, notifications)?),
            "ENTITIES" => Section::Entities(EntitiesSection::read(input, notifications)?),
            "OBJECTS" => Section::Objects(ObjectsSection::read(input)?),
            other => Section::Unknown(UnknownSection::read(other, input)?),
        };
        Ok(section)
    }

    /// Write the section, including its SECTION and ENDSEC markers.
    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("SECTION")?;
        writer.write_string(2, self.name())?;
        match self {
            Section::Header(s) => s.write_body(writer)?,
            Section::Classes(s) => s.write_body(writer)?,
            Section::Tables(s) => s.write_body(writer)?,
            Section::Blocks(s) => s.write_body(writer)?,
            Section::Entities(s) => s.write_body(writer)?,
            Section::Objects(s) => s.write_body(writer)?,
            Section::Unknown(s) => s.write_body(writer)?,
        }
        writer.write_type_marker("ENDSEC")
    }

    pub fn name(&self) -> &str {
        match self {
            Section::Header(_) => "HEADER",
            Section::Classes(_) => "CLASSES",
            Section::Tables(_) => "TABLES",
            Section::Blocks(_) => "BLOCKS",
            Section::Entities(_) => "ENTITIES",
            Section::Objects(_) => "OBJECTS",
            Section::Unknown(s) => s.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_dispatch_by_name() {
        let data = "  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = Section::read("ENTITIES", &mut input, &mut notifications).unwrap();
        assert!(matches!(section, Section::Entities(_)));
        assert_eq!(section.name(), "ENTITIES");
    }

    #[test]
    fn test_truncated_section() {
        let data = "  0\nLINE\n 10\n1.0\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let err = Section::read("ENTITIES", &mut input, &mut notifications).unwrap_err();
        assert!(matches!(err, DxfError::TruncatedSection(name) if name == "ENTITIES"));
    }
}
