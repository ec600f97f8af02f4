//! Ordered record storage for unrecognized and extension data.

use super::Record;
use crate::error::Result;
use crate::io::RecordWriter;

/// An ordered collection of records attached to a higher-level object.
///
/// Every entity, table entry and section keeps one of these for the records
/// its typed fields do not interpret, so an unrecognized code survives a
/// read/write cycle verbatim and in its original position. Codes may legally
/// repeat; encounter order is a correctness invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordHolder {
    records: Vec<Record>,
}

impl RecordHolder {
    /// Create an empty holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, preserving encounter order.
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// First record with the given code, if any.
    pub fn find(&self, code: i32) -> Option<&Record> {
        self.records.iter().find(|r| r.code == code)
    }

    /// All records with the given code, in encounter order.
    pub fn all(&self, code: i32) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.code == code)
    }

    /// Iterate over all stored records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the holder is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replay the stored records unchanged, in original order.
    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for record in &self.records {
            writer.write_record(record)?;
        }
        Ok(())
    }
}

impl From<Vec<Record>> for RecordHolder {
    fn from(records: Vec<Record>) -> Self {
        RecordHolder { records }
    }
}

impl<'a> IntoIterator for &'a RecordHolder {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let mut holder = RecordHolder::new();
        holder.add(Record::double(40, 1.0));
        holder.add(Record::string(1001, "APP"));
        holder.add(Record::double(40, 2.0));

        let codes: Vec<i32> = holder.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![40, 1001, 40]);
    }

    #[test]
    fn test_find_returns_first() {
        let mut holder = RecordHolder::new();
        holder.add(Record::double(40, 1.0));
        holder.add(Record::double(40, 2.0));

        assert_eq!(holder.find(40).unwrap().as_f64(), Some(1.0));
        assert!(holder.find(41).is_none());
    }

    #[test]
    fn test_all_repeated_codes() {
        let mut holder = RecordHolder::new();
        holder.add(Record::double(10, 0.0));
        holder.add(Record::double(20, 1.0));
        holder.add(Record::double(10, 2.0));

        let xs: Vec<f64> = holder.all(10).filter_map(|r| r.as_f64()).collect();
        assert_eq!(xs, vec![0.0, 2.0]);
    }
}
