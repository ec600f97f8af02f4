//! Fallback for section names this library does not model.

use super::next_record;
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter};
use crate::record::Record;

/// A section kept as its raw record sequence, interior code-0 markers
/// included, so it survives a read/write cycle untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownSection {
    name: String,
    /// Raw records, in stream order
    pub records: Vec<Record>,
}

impl UnknownSection {
    pub(crate) fn read<R: RecordReader>(name: &str, input: &mut R) -> Result<Self> {
        let mut section = Self {
            name: name.to_string(),
            records: Vec::new(),
        };
        loop {
            let record = next_record(input, name)?;
            if record.code == 0 && record.as_str() == Some("ENDSEC") {
                break;
            }
            section.records.push(record);
        }
        Ok(section)
    }

    pub(crate) fn write_body<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for record in &self.records {
            writer.write_record(record)?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{TextRecordReader, TextRecordWriter};
    use crate::notification::NotificationCollection;
    use crate::sections::Section;

    #[test]
    fn test_verbatim_round_trip() {
        let body = "  0\nTHING\n 70\n1\n  0\nTHING\n 70\n2\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(body.as_bytes());
        let mut notifications = NotificationCollection::new();
        let section = Section::read("ACME_DATA", &mut input, &mut notifications).unwrap();
        assert_eq!(section.name(), "ACME_DATA");

        let mut buf = Vec::new();
        let mut w = TextRecordWriter::new(&mut buf);
        section.write(&mut w).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, format!("  0\nSECTION\n  2\nACME_DATA\n{}", body));
    }
}
