//! CLASSES section.

use super::next_record;
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{RecordHolder, Value};

const NAME: &str = "CLASSES";

/// One CLASS declaration: an application-defined type registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CadClass {
    /// Record name of the class (code 1)
    pub name: String,
    /// Remaining class records, in stream order
    pub records: RecordHolder,
}

/// The CLASSES section: an ordered list of class declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassesSection {
    pub classes: Vec<CadClass>,
}

impl ClassesSection {
    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut section = Self::default();
        loop {
            let record = next_record(input, NAME)?;
            if record.code == 0 {
                if record.as_str() == Some("ENDSEC") {
                    break;
                }
                // A CLASS marker (or, leniently, any marker) opens a new
                // declaration.
                section.classes.push(CadClass::default());
                continue;
            }
            let class = match section.classes.last_mut() {
                Some(class) => class,
                // Records before the first marker have nowhere better to go.
                None => {
                    section.classes.push(CadClass::default());
                    section.classes.last_mut().unwrap()
                }
            };
            match (record.code, &record.value) {
                (1, Value::Str(s)) => class.name = s.clone(),
                _ => class.records.add(record),
            }
        }
        Ok(section)
    }

    pub(crate) fn write_body<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for class in &self.classes {
            writer.write_type_marker("CLASS")?;
            writer.write_string(1, &class.name)?;
            class.records.write(writer)?;
        }
        Ok(())
    }

    /// Look up a class declaration by record name.
    pub fn find(&self, name: &str) -> Option<&CadClass> {
        self.classes.iter().find(|c| c.name == name)
    }
}
