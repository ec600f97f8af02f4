//! OBJECTS section: non-graphical objects, kept raw.

use super::next_record;
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::RecordHolder;

const NAME: &str = "OBJECTS";

/// One non-graphical object, preserved as its raw record sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CadObject {
    /// Object type tag (DICTIONARY, LAYOUT, ...)
    pub type_name: String,
    /// Raw records, in stream order
    pub records: RecordHolder,
}

/// The OBJECTS section: an ordered list of raw objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectsSection {
    pub objects: Vec<CadObject>,
}

impl ObjectsSection {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut section = Self::default();
        loop {
            let record = next_record(input, NAME)?;
            if record.code == 0 {
                let tag = record.as_str().unwrap_or("").to_string();
                if tag == "ENDSEC" {
                    break;
                }
                section.objects.push(CadObject {
                    type_name: tag,
                    records: RecordHolder::new(),
                });
            } else if let Some(object) = section.objects.last_mut() {
                object.records.add(record);
            }
            // Records before the first marker are dropped; they cannot be
            // attributed to an object.
        }
        Ok(section)
    }

    pub(crate) fn write_body<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for object in &self.objects {
            writer.write_type_marker(&object.type_name)?;
            object.records.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextRecordReader;

    #[test]
    fn test_read_objects() {
        let data = "  0\nDICTIONARY\n  5\nC\n280\n1\n  0\nLAYOUT\n  1\nModel\n  0\nENDSEC\n";
        let mut input = TextRecordReader::new(data.as_bytes());
        let section = ObjectsSection::read(&mut input).unwrap();
        assert_eq!(section.objects.len(), 2);
        assert_eq!(section.objects[0].type_name, "DICTIONARY");
        assert_eq!(section.objects[1].records.len(), 1);
    }
}
