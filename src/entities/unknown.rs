//! Fallback for entity types this library does not model.

use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::RecordHolder;

/// An entity kept as its raw record sequence.
///
/// Everything between the type marker and the next code-0 record is
/// retained verbatim and re-emitted on write, so unrecognized content
/// survives a read/write cycle untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEntity {
    type_name: String,
    /// Raw records, in stream order
    pub records: RecordHolder,
}

impl UnknownEntity {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            records: RecordHolder::new(),
        }
    }

    pub(crate) fn read<R: RecordReader>(type_name: &str, input: &mut R) -> Result<Self> {
        let mut entity = Self::new(type_name);
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            entity.records.add(record);
        }
        Ok(entity)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker(&self.type_name)?;
        self.records.write(writer)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Layer reference, found by scanning for a code-8 record.
    pub fn layer(&self) -> &str {
        self.records
            .find(8)
            .and_then(|r| r.as_str())
            .unwrap_or("0")
    }
}
