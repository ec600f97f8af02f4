//! Typed (group code, value) records.
//!
//! A DXF stream is a flat sequence of group-code/value pairs. The group code
//! alone decides how the value is encoded; the surrounding parse context
//! decides what it *means*. This module owns the code-to-type-class table
//! and the decoded [`Record`] value.

mod holder;

pub use holder::RecordHolder;

use std::fmt;

/// How a value is encoded for a given group code range.
///
/// The mapping is part of the format and is reproduced exactly; codes in
/// undefined ranges fall back to [`ValueClass::Str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit float (kept for completeness; no code range currently maps here)
    Float,
    /// 64-bit float
    Double,
    /// Text string
    Str,
    /// Hex handle or binary chunk, stored as uppercase hex digits
    Hex,
}

impl ValueClass {
    /// The declared type class for a group code.
    pub fn of(code: i32) -> ValueClass {
        match code {
            // Negative codes are not normally written to files; decode as
            // string so they still round-trip.
            i32::MIN..=-1 => ValueClass::Str,
            0..=9 => ValueClass::Str,
            10..=59 => ValueClass::Double,
            60..=79 => ValueClass::Int16,
            80..=89 => ValueClass::Str,
            90..=99 => ValueClass::Int32,
            // Only 100, 102 and 105 are defined here; string covers them all.
            100..=139 => ValueClass::Str,
            140..=147 => ValueClass::Double,
            148..=169 => ValueClass::Str,
            170..=178 => ValueClass::Int16,
            // Extrusion direction components.
            210 | 220 | 230 => ValueClass::Double,
            179..=209 | 211..=219 | 221..=229 | 231..=269 => ValueClass::Str,
            270..=275 => ValueClass::Int8,
            276..=279 => ValueClass::Str,
            280..=289 => ValueClass::Int8,
            290..=299 => ValueClass::Str,
            300..=309 => ValueClass::Str,
            // Binary chunks and handle values.
            310..=319 => ValueClass::Hex,
            320..=329 => ValueClass::Hex,
            330..=369 => ValueClass::Hex,
            370..=999 => ValueClass::Str,
            1000..=1009 => ValueClass::Str,
            // Should be float per the published tables, but real files carry
            // values that do not fit a 32-bit float.
            1010..=1059 => ValueClass::Str,
            1060..=1070 => ValueClass::Int16,
            1071 => ValueClass::Int32,
            _ => ValueClass::Str,
        }
    }
}

/// A decoded record value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Float(f32),
    Double(f64),
    Str(String),
    Hex(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Hex(v) => write!(f, "{}", v),
        }
    }
}

/// One decoded (group code, value) pair. Immutable once read.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The group code
    pub code: i32,
    /// The decoded value
    pub value: Value,
}

impl Record {
    /// Create a record from an already-decoded value.
    pub fn new(code: i32, value: Value) -> Self {
        Record { code, value }
    }

    /// Build a string record, coerced to the code's type class on write.
    pub fn string(code: i32, value: impl Into<String>) -> Self {
        Record::new(code, Value::Str(value.into()))
    }

    /// Build an integer record using the variant the code's class calls for.
    pub fn integer(code: i32, value: i32) -> Self {
        let value = match ValueClass::of(code) {
            ValueClass::Int8 => Value::Int8(value as i8),
            ValueClass::Int32 => Value::Int32(value),
            _ => Value::Int16(value as i16),
        };
        Record::new(code, value)
    }

    /// Build a double record.
    pub fn double(code: i32, value: f64) -> Self {
        Record::new(code, Value::Double(value))
    }

    /// Build a hex record from raw hex digits.
    pub fn hex(code: i32, digits: impl Into<String>) -> Self {
        Record::new(code, Value::Hex(digits.into()))
    }

    /// Value as a string slice, if the value is textual.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::Str(s) | Value::Hex(s) => Some(s),
            _ => None,
        }
    }

    /// Value widened to i32, if the value is any integer variant.
    pub fn as_i32(&self) -> Option<i32> {
        match self.value {
            Value::Int8(v) => Some(v as i32),
            Value::Int16(v) => Some(v as i32),
            Value::Int32(v) => Some(v),
            _ => None,
        }
    }

    /// Value as i16, if the value is a 16-bit-or-narrower integer.
    pub fn as_i16(&self) -> Option<i16> {
        match self.value {
            Value::Int8(v) => Some(v as i16),
            Value::Int16(v) => Some(v),
            Value::Int32(v) => i16::try_from(v).ok(),
            _ => None,
        }
    }

    /// Value as f64, if the value is a floating-point variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_class_ranges() {
        assert_eq!(ValueClass::of(0), ValueClass::Str);
        assert_eq!(ValueClass::of(8), ValueClass::Str);
        assert_eq!(ValueClass::of(10), ValueClass::Double);
        assert_eq!(ValueClass::of(59), ValueClass::Double);
        assert_eq!(ValueClass::of(62), ValueClass::Int16);
        assert_eq!(ValueClass::of(70), ValueClass::Int16);
        assert_eq!(ValueClass::of(90), ValueClass::Int32);
        assert_eq!(ValueClass::of(140), ValueClass::Double);
        assert_eq!(ValueClass::of(175), ValueClass::Int16);
        assert_eq!(ValueClass::of(210), ValueClass::Double);
        assert_eq!(ValueClass::of(211), ValueClass::Str);
        assert_eq!(ValueClass::of(270), ValueClass::Int8);
        assert_eq!(ValueClass::of(280), ValueClass::Int8);
        assert_eq!(ValueClass::of(310), ValueClass::Hex);
        assert_eq!(ValueClass::of(330), ValueClass::Hex);
        assert_eq!(ValueClass::of(999), ValueClass::Str);
        assert_eq!(ValueClass::of(1070), ValueClass::Int16);
        assert_eq!(ValueClass::of(1071), ValueClass::Int32);
        assert_eq!(ValueClass::of(2000), ValueClass::Str);
        assert_eq!(ValueClass::of(-5), ValueClass::Str);
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(Record::integer(62, 7).value, Value::Int16(7));
        assert_eq!(Record::integer(90, 100000).value, Value::Int32(100000));
        assert_eq!(Record::integer(280, 1).value, Value::Int8(1));
    }

    #[test]
    fn test_accessors() {
        let r = Record::double(10, 1.5);
        assert_eq!(r.as_f64(), Some(1.5));
        assert_eq!(r.as_i32(), None);

        let r = Record::integer(70, 3);
        assert_eq!(r.as_i16(), Some(3));
        assert_eq!(r.as_i32(), Some(3));

        let r = Record::string(2, "LAYER");
        assert_eq!(r.as_str(), Some("LAYER"));
    }
}
