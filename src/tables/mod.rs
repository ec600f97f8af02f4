//! Symbol tables: named resource definitions referenced by entities.
//!
//! A table is a named container of records of one kind (layers, coordinate
//! systems, ...). Named lookups go through a by-name index kept alongside
//! the entry list; insertion order is preserved for output.

mod layer;
mod ucs;
mod unknown;

pub use layer::{Layer, LayerFlags};
pub use ucs::Ucs;
pub use unknown::UnknownTableRecord;

use crate::error::{DxfError, Result};
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::notification::{NotificationCollection, NotificationKind};
use crate::record::{Record, RecordHolder};
use ahash::AHashMap;

/// One entry in a symbol table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRecord {
    Layer(Layer),
    Ucs(Ucs),
    Unknown(UnknownTableRecord),
}

impl TableRecord {
    /// Parse the entry whose code-0 type marker was just consumed.
    pub fn read<R: RecordReader>(type_name: &str, input: &mut R) -> Result<TableRecord> {
        let entry = match type_name {
            "LAYER" => TableRecord::Layer(Layer::read(input)?),
            "UCS" => TableRecord::Ucs(Ucs::read(input)?),
            other => TableRecord::Unknown(UnknownTableRecord::read(other, input)?),
        };
        Ok(entry)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match self {
            TableRecord::Layer(r) => r.write(writer),
            TableRecord::Ucs(r) => r.write(writer),
            TableRecord::Unknown(r) => r.write(writer),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            TableRecord::Layer(_) => "LAYER",
            TableRecord::Ucs(_) => "UCS",
            TableRecord::Unknown(r) => r.type_name(),
        }
    }

    /// The entry name, when the variant models one.
    pub fn name(&self) -> Option<&str> {
        match self {
            TableRecord::Layer(r) => Some(&r.name),
            TableRecord::Ucs(r) => Some(&r.name),
            TableRecord::Unknown(r) => r.name(),
        }
    }
}

/// A named symbol table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name (code 2): "LAYER", "UCS", ...
    pub name: String,
    /// Declared maximum entry count (code 70)
    pub max_entries: i16,
    /// Head records the parser did not interpret
    pub head: RecordHolder,
    entries: Vec<TableRecord>,
    index: AHashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_entries: 0,
            head: RecordHolder::new(),
            entries: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Parse a table whose `0 TABLE` marker was just consumed, up to and
    /// including ENDTAB.
    ///
    /// A duplicate entry name is a [`NotificationKind::DuplicateName`]
    /// warning rather than an error here: both entries are kept, and
    /// lookups resolve to the first.
    pub fn read<R: RecordReader>(
        input: &mut R,
        notifications: &mut NotificationCollection,
    ) -> Result<Table> {
        let mut table = Table::new("");
        // Head records up to the first entry marker.
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            if let Some(record) = table.handle_head_record(record) {
                table.head.add(record);
            }
        }
        // Entries up to ENDTAB. End of stream is left for the owning
        // section to diagnose.
        while let Some(record) = input.read_record()? {
            if record.code != 0 {
                input.push_back(record);
                break;
            }
            let tag = record.as_str().unwrap_or("").to_string();
            match tag.as_str() {
                "ENDTAB" => break,
                "ENDSEC" | "" => {
                    input.push_back(record);
                    break;
                }
                _ => {
                    let entry = TableRecord::read(&tag, input)?;
                    if let Some(name) = entry.name() {
                        if table.index.contains_key(name) {
                            notifications.notify(
                                NotificationKind::DuplicateName,
                                format!("duplicate {} entry '{}'", table.name, name),
                            );
                        }
                    }
                    table.push(entry);
                }
            }
        }
        Ok(table)
    }

    fn handle_head_record(&mut self, record: Record) -> Option<Record> {
        match record.code {
            2 => self.name = record.as_str()?.to_string(),
            70 => self.max_entries = record.as_i16()?,
            _ => return Some(record),
        }
        None
    }

    /// Write the table, including its TABLE and ENDTAB markers.
    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("TABLE")?;
        writer.write_string(2, &self.name)?;
        let declared = (self.entries.len() as i16).max(self.max_entries);
        writer.write_integer(70, declared as i32)?;
        self.head.write(writer)?;
        for entry in &self.entries {
            entry.write(writer)?;
        }
        writer.write_type_marker("ENDTAB")
    }

    /// Append an entry unconditionally, indexing its name if it is the
    /// first with that name.
    fn push(&mut self, entry: TableRecord) {
        if let Some(name) = entry.name() {
            self.index.entry(name.to_string()).or_insert(self.entries.len());
        }
        self.entries.push(entry);
    }

    /// Insert a new entry, rejecting duplicate names.
    pub fn insert(&mut self, entry: TableRecord) -> Result<()> {
        if let Some(name) = entry.name() {
            if self.index.contains_key(name) {
                return Err(DxfError::DuplicateName(name.to_string()));
            }
        }
        self.push(entry);
        Ok(())
    }

    /// Look up an entry by name; duplicates resolve to the first.
    pub fn find(&self, name: &str) -> Option<&TableRecord> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[TableRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    fn parse(data: &str) -> (Table, NotificationCollection) {
        let mut input = TextRecordReader::new(data.as_bytes());
        let mut notifications = NotificationCollection::new();
        let table = Table::read(&mut input, &mut notifications).unwrap();
        (table, notifications)
    }

    #[test]
    fn test_layer_table() {
        let (table, notifications) = parse(
            "  2\nLAYER\n 70\n2\n  0\nLAYER\n  2\nWALLS\n 62\n1\n  0\nLAYER\n  2\nDOORS\n 62\n3\n  0\nENDTAB\n",
        );
        assert_eq!(table.name, "LAYER");
        assert_eq!(table.len(), 2);
        assert!(table.find("DOORS").is_some());
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_duplicate_name_warns_and_keeps_both() {
        let (table, notifications) = parse(
            "  2\nLAYER\n  0\nLAYER\n  2\nWALLS\n 62\n1\n  0\nLAYER\n  2\nWALLS\n 62\n5\n  0\nENDTAB\n",
        );
        assert_eq!(table.len(), 2);
        assert!(notifications.has_kind(NotificationKind::DuplicateName));
        // Lookup resolves to the first occurrence.
        match table.find("WALLS").unwrap() {
            TableRecord::Layer(layer) => assert_eq!(layer.color, 1),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut table = Table::new("LAYER");
        table
            .insert(TableRecord::Layer(Layer::new("WALLS")))
            .unwrap();
        let err = table
            .insert(TableRecord::Layer(Layer::new("WALLS")))
            .unwrap_err();
        assert!(matches!(err, DxfError::DuplicateName(name) if name == "WALLS"));
    }

    #[test]
    fn test_unknown_entry_kind() {
        let (table, _) = parse(
            "  2\nVPORT\n  0\nVPORT\n  2\n*ACTIVE\n 40\n1.0\n  0\nENDTAB\n",
        );
        assert_eq!(table.entries()[0].type_name(), "VPORT");
        assert_eq!(table.find("*ACTIVE").unwrap().name(), Some("*ACTIVE"));
    }
}
