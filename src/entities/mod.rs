//! Graphical entity hierarchy.
//!
//! Entities are modeled as a sum type over all known variants plus an
//! [`UnknownEntity`] fallback carrying the raw record sequence, so a new
//! type tag degrades gracefully instead of failing the parse.
//!
//! Parsing is a sequential scan of the record stream up to the next code-0
//! record: each record is first offered to the concrete type's field table,
//! then to the shared [`EntityCommon`] codes, and whatever is left is
//! retained verbatim for lossless round-trip.

mod arc;
mod block;
mod circle;
mod ellipse;
mod face3d;
mod insert;
mod line;
mod lwpolyline;
mod mtext;
mod point;
mod polyline;
mod solid;
mod spline;
mod text;
mod trace;
mod unknown;
mod vertex;

pub use arc::Arc;
pub use block::Block;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use face3d::Face3D;
pub use insert::Insert;
pub use line::Line;
pub use lwpolyline::{LwPolyline, LwVertex};
pub use mtext::MText;
pub use point::Point;
pub use polyline::Polyline;
pub use solid::Solid;
pub use spline::Spline;
pub use text::Text;
pub use trace::Trace;
pub use unknown::UnknownEntity;
pub use vertex::Vertex;

use crate::error::Result;
use crate::io::{RecordReader, RecordWriter, RecordWriterExt};
use crate::record::{Record, RecordHolder, Value};
use crate::types::{BoundingBox3D, Segment, Vector3};

/// Color value meaning "inherit from the layer".
pub const COLOR_BY_LAYER: i16 = 256;

/// Segment count used when flattening a full curve.
pub(crate) const CURVE_SEGMENTS: usize = 32;

/// Fields every graphical entity carries.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Layer reference, by name
    pub layer: String,
    /// Color number; [`COLOR_BY_LAYER`] when inherited
    pub color: i16,
    /// Line type name; empty when unset
    pub line_type: String,
    /// Extrusion direction, Z axis by default
    pub extrusion: Vector3,
    /// Records the typed fields did not interpret
    pub extra: RecordHolder,
}

impl EntityCommon {
    /// Common data for a fresh entity on layer "0".
    pub fn new() -> Self {
        Self {
            layer: "0".to_string(),
            color: COLOR_BY_LAYER,
            line_type: String::new(),
            extrusion: Vector3::UNIT_Z,
            extra: RecordHolder::new(),
        }
    }

    /// Offer a record to the shared field table; hands it back if the code
    /// is not a common one.
    fn handle_record(&mut self, record: Record) -> Option<Record> {
        match (record.code, &record.value) {
            (8, Value::Str(s)) => {
                self.layer = s.clone();
                None
            }
            (6, Value::Str(s)) => {
                self.line_type = s.clone();
                None
            }
            (62, _) => {
                if let Some(color) = record.as_i16() {
                    self.color = color;
                    None
                } else {
                    Some(record)
                }
            }
            (210, _) | (220, _) | (230, _) => {
                if let Some(v) = record.as_f64() {
                    match record.code {
                        210 => self.extrusion.x = v,
                        220 => self.extrusion.y = v,
                        _ => self.extrusion.z = v,
                    }
                    None
                } else {
                    Some(record)
                }
            }
            _ => Some(record),
        }
    }

    /// Write the common records that precede the geometry fields.
    fn write_prefix<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_string(8, &self.layer)?;
        if !self.line_type.is_empty() {
            writer.write_string(6, &self.line_type)?;
        }
        if self.color != COLOR_BY_LAYER {
            writer.write_integer(62, self.color as i32)?;
        }
        Ok(())
    }

    /// Write the extrusion direction and replay retained records.
    fn write_suffix<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        if self.extrusion != Vector3::UNIT_Z {
            writer.write_point(210, self.extrusion)?;
        }
        self.extra.write(writer)
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Seam between the shared parse loop and a concrete entity's field table.
pub(crate) trait EntityFields {
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Consume the record if the code belongs to this type's field table;
    /// hand it back otherwise. Repeatable fields accumulate here.
    fn handle_record(&mut self, record: Record) -> Option<Record>;
}

/// Read records for one entity until the next code-0 record (pushed back)
/// or end of stream (left for the owning section to diagnose).
pub(crate) fn read_entity_records<R, T>(input: &mut R, entity: &mut T) -> Result<()>
where
    R: RecordReader,
    T: EntityFields,
{
    while let Some(record) = input.read_record()? {
        if record.code == 0 {
            input.push_back(record);
            break;
        }
        if let Some(record) = entity.handle_record(record) {
            let common = entity.common_mut();
            if let Some(record) = common.handle_record(record) {
                common.extra.add(record);
            }
        }
    }
    Ok(())
}

/// A graphical drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Polyline(Polyline),
    LwPolyline(LwPolyline),
    Spline(Spline),
    Solid(Solid),
    Trace(Trace),
    Face3D(Face3D),
    Text(Text),
    MText(MText),
    Insert(Insert),
    Vertex(Vertex),
    Block(Block),
    Unknown(UnknownEntity),
}

impl Entity {
    /// Parse the entity whose code-0 type marker was just consumed.
    ///
    /// An unrecognized type tag is not an error: it constructs an
    /// [`UnknownEntity`] that re-emits its records verbatim.
    pub fn read<R: RecordReader>(type_name: &str, input: &mut R) -> Result<Entity> {
        let entity = match type_name {
            "POINT" => Entity::Point(Point::read(input)?),
            "LINE" => Entity::Line(Line::read(input)?),
            "CIRCLE" => Entity::Circle(Circle::read(input)?),
            "ARC" => Entity::Arc(Arc::read(input)?),
            "ELLIPSE" => Entity::Ellipse(Ellipse::read(input)?),
            "POLYLINE" => Entity::Polyline(Polyline::read(input)?),
            "LWPOLYLINE" => Entity::LwPolyline(LwPolyline::read(input)?),
            "SPLINE" => Entity::Spline(Spline::read(input)?),
            "SOLID" => Entity::Solid(Solid::read(input)?),
            "TRACE" => Entity::Trace(Trace::read(input)?),
            "3DFACE" => Entity::Face3D(Face3D::read(input)?),
            "TEXT" => Entity::Text(Text::read(input)?),
            "MTEXT" => Entity::MText(MText::read(input)?),
            "INSERT" => Entity::Insert(Insert::read(input)?),
            "VERTEX" => Entity::Vertex(Vertex::read(input)?),
            "BLOCK" => Entity::Block(Block::read(input)?),
            other => Entity::Unknown(UnknownEntity::read(other, input)?),
        };
        Ok(entity)
    }

    /// Write the entity, including its code-0 type marker.
    pub fn write<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match self {
            Entity::Point(e) => e.write(writer),
            Entity::Line(e) => e.write(writer),
            Entity::Circle(e) => e.write(writer),
            Entity::Arc(e) => e.write(writer),
            Entity::Ellipse(e) => e.write(writer),
            Entity::Polyline(e) => e.write(writer),
            Entity::LwPolyline(e) => e.write(writer),
            Entity::Spline(e) => e.write(writer),
            Entity::Solid(e) => e.write(writer),
            Entity::Trace(e) => e.write(writer),
            Entity::Face3D(e) => e.write(writer),
            Entity::Text(e) => e.write(writer),
            Entity::MText(e) => e.write(writer),
            Entity::Insert(e) => e.write(writer),
            Entity::Vertex(e) => e.write(writer),
            Entity::Block(e) => e.write(writer),
            Entity::Unknown(e) => e.write(writer),
        }
    }

    /// The type tag this entity was read with, or will be written with.
    pub fn type_name(&self) -> &str {
        match self {
            Entity::Point(_) => "POINT",
            Entity::Line(_) => "LINE",
            Entity::Circle(_) => "CIRCLE",
            Entity::Arc(_) => "ARC",
            Entity::Ellipse(_) => "ELLIPSE",
            Entity::Polyline(_) => "POLYLINE",
            Entity::LwPolyline(_) => "LWPOLYLINE",
            Entity::Spline(_) => "SPLINE",
            Entity::Solid(_) => "SOLID",
            Entity::Trace(_) => "TRACE",
            Entity::Face3D(_) => "3DFACE",
            Entity::Text(_) => "TEXT",
            Entity::MText(_) => "MTEXT",
            Entity::Insert(_) => "INSERT",
            Entity::Vertex(_) => "VERTEX",
            Entity::Block(_) => "BLOCK",
            Entity::Unknown(e) => e.type_name(),
        }
    }

    /// Shared entity data; `None` for the unknown fallback, which keeps
    /// everything raw.
    pub fn common(&self) -> Option<&EntityCommon> {
        match self {
            Entity::Point(e) => Some(&e.common),
            Entity::Line(e) => Some(&e.common),
            Entity::Circle(e) => Some(&e.common),
            Entity::Arc(e) => Some(&e.common),
            Entity::Ellipse(e) => Some(&e.common),
            Entity::Polyline(e) => Some(&e.common),
            Entity::LwPolyline(e) => Some(&e.common),
            Entity::Spline(e) => Some(&e.common),
            Entity::Solid(e) => Some(&e.common),
            Entity::Trace(e) => Some(&e.common),
            Entity::Face3D(e) => Some(&e.common),
            Entity::Text(e) => Some(&e.common),
            Entity::MText(e) => Some(&e.common),
            Entity::Insert(e) => Some(&e.common),
            Entity::Vertex(e) => Some(&e.common),
            Entity::Block(e) => Some(&e.common),
            Entity::Unknown(_) => None,
        }
    }

    /// Layer reference by name. The unknown fallback scans its raw records.
    pub fn layer(&self) -> &str {
        match self {
            Entity::Unknown(e) => e.layer(),
            _ => self.common().map(|c| c.layer.as_str()).unwrap_or("0"),
        }
    }

    /// Axis-aligned bounds, when the geometry defines any.
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        match self {
            Entity::Point(e) => e.bounding_box(),
            Entity::Line(e) => e.bounding_box(),
            Entity::Circle(e) => e.bounding_box(),
            Entity::Arc(e) => e.bounding_box(),
            Entity::Ellipse(e) => e.bounding_box(),
            Entity::Polyline(e) => e.bounding_box(),
            Entity::LwPolyline(e) => e.bounding_box(),
            Entity::Spline(e) => e.bounding_box(),
            Entity::Solid(e) => e.bounding_box(),
            Entity::Trace(e) => e.bounding_box(),
            Entity::Face3D(e) => e.bounding_box(),
            Entity::Text(e) => e.bounding_box(),
            Entity::MText(e) => e.bounding_box(),
            Entity::Insert(e) => e.bounding_box(),
            Entity::Vertex(e) => e.bounding_box(),
            Entity::Block(e) => e.bounding_box(),
            Entity::Unknown(_) => None,
        }
    }

    /// Approximate the entity as straight segments.
    ///
    /// Variants without a meaningful line form (a point, a text label)
    /// return an empty sequence, never an error.
    pub fn flatten(&self) -> Vec<Segment> {
        match self {
            Entity::Line(e) => e.flatten(),
            Entity::Circle(e) => e.flatten(),
            Entity::Arc(e) => e.flatten(),
            Entity::Ellipse(e) => e.flatten(),
            Entity::Polyline(e) => e.flatten(),
            Entity::LwPolyline(e) => e.flatten(),
            Entity::Spline(e) => e.flatten(),
            Entity::Solid(e) => e.flatten(),
            Entity::Trace(e) => e.flatten(),
            Entity::Face3D(e) => e.flatten(),
            Entity::Block(e) => e.flatten(),
            _ => Vec::new(),
        }
    }
}
