//! Layer table entry.

use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{RecordHolder, Value};
use bitflags::bitflags;

bitflags! {
    /// Layer state bits (code 70).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: i16 {
        const FROZEN = 1;
        const FROZEN_IN_NEW_VIEWPORTS = 2;
        const LOCKED = 4;
    }
}

/// A drawing layer.
///
/// A negative color number marks the layer off; the color itself is the
/// absolute value.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name (code 2)
    pub name: String,
    /// State flags (code 70)
    pub flags: LayerFlags,
    /// Color number (code 62); negative when the layer is off
    pub color: i16,
    /// Line type name (code 6)
    pub line_type: String,
    /// Records the typed fields did not interpret
    pub extra: RecordHolder,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: LayerFlags::empty(),
            color: 7,
            line_type: "CONTINUOUS".to_string(),
            extra: RecordHolder::new(),
        }
    }

    pub(crate) fn read<R: RecordReader>(input: &mut R) -> Result<Self> {
        let mut layer = Layer::new("");
        while let Some(record) = input.read_record()? {
            if record.code == 0 {
                input.push_back(record);
                break;
            }
            match (record.code, &record.value) {
                (2, Value::Str(s)) => layer.name = s.clone(),
                (6, Value::Str(s)) => layer.line_type = s.clone(),
                (62, _) => {
                    if let Some(color) = record.as_i16() {
                        layer.color = color;
                    }
                }
                (70, _) => {
                    if let Some(bits) = record.as_i16() {
                        layer.flags = LayerFlags::from_bits_retain(bits);
                    }
                }
                _ => layer.extra.add(record),
            }
        }
        Ok(layer)
    }

    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_type_marker("LAYER")?;
        writer.write_string(2, &self.name)?;
        writer.write_integer(70, self.flags.bits() as i32)?;
        writer.write_integer(62, self.color as i32)?;
        writer.write_string(6, &self.line_type)?;
        self.extra.write(writer)
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    pub fn is_off(&self) -> bool {
        self.color < 0
    }
}
