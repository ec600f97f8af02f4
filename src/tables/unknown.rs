//! Fallback for table entry types this library does not model.

use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::RecordHolder;

/// A table entry kept as its raw record sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownTableRecord {
    type_name: String,
    /// Raw records, in stream order
    pub records: RecordHolder,
}

impl UnknownTableRecord {
    pub(crate) fn read<R: RecordReader>(type_name: &str, input: &mut R) -> Result<Self> {
        let mut entry = Self {
            type_name: type_name.to_string(),
            records: RecordHolder::new(),
        };
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            entry.records.add(record);
        }
        Ok(entry)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker(&self.type_name)?;
        self.records.write(writer)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The entry name, found by scanning for a code-2 record.
    pub fn name(&self) -> Option<&str> {
        self.records.find(2).and_then(|r| r.as_str())
    }
}
