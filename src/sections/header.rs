//! HEADER section: drawing-wide variables.

use super::next_record;
use crate::error::Result;
use crate::io::{RecordReader, RecordWriter};
use crate::record::Record;

const NAME: &str = "HEADER";

/// Header variables, kept as the flat record stream they arrive as.
///
/// A variable is a code-9 record holding the `$NAME` followed by its value
/// records, which run until the next code-9 record or the end of the
/// section. Keeping the stream flat preserves variables with value shapes
/// this library knows nothing about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSection {
    records: Vec<Record>,
}

impl HeaderSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut section = Self::new();
        loop {
            let record = next_record(input, NAME)?;
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

    /// Index of the code-9 record naming `variable`, if present.
    fn variable_start(&self, variable: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.code == 9 && r.as_str() == Some(variable))
    }

    /// End of the variable starting at `start`: the next code-9 record or
    /// the end of the stream.
    fn variable_end(&self, start: usize) -> usize {
        self.records[start + 1..]
            .iter()
            .position(|r| r.code == 9)
            .map(|offset| start + 1 + offset)
            .unwrap_or(self.records.len())
    }

    /// The value records of `variable` (the code-9 record excluded).
    pub fn get_variable(&self, variable: &str) -> Option<&[Record]> {
        let start = self.variable_start(variable)?;
        Some(&self.records[start + 1..self.variable_end(start)])
    }

    /// Replace the value records of `variable`, or append the variable if
    /// it is not present yet.
    pub fn set_variable(&mut self, variable: &str, values: Vec<Record>) {
        match self.variable_start(variable) {
            Some(start) => {
                let end = self.variable_end(start);
                self.records.splice(start + 1..end, values);
            }
            None => {
                self.records.push(Record::string(9, variable));
                self.records.extend(values);
            }
        }
    }

    /// Remove `variable` entirely. Returns true when it was present.
    pub fn remove_variable(&mut self, variable: &str) -> bool {
        match self.variable_start(variable) {
            Some(start) => {
                let end = self.variable_end(start);
                self.records.drain(start..end);
                true
            }
            None => false,
        }
    }

    /// Names of all variables, in stream order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|r| r.code == 9)
            .filter_map(|r| r.as_str())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}
