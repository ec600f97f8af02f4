//! # dxfmodel
//!
//! A pure Rust library for reading, editing, and writing DXF drawings.
//!
//! The drawing interchange format is a flat stream of (group code, value)
//! records in either a line-oriented text encoding or a compact binary
//! encoding. This library parses that stream into a structured document
//! model and writes it back losslessly: record types it does not
//! understand are preserved verbatim through Unknown variants and retained
//! record holders.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dxfmodel::{Model, SpatialIndex, SpatialIndexConfig};
//!
//! // Read a drawing; the encoding is detected from the leading bytes.
//! let file = std::fs::File::open("plan.dxf")?;
//! let model = Model::read(file)?;
//!
//! // Walk the entities and resolve their layers.
//! for entity in model.entities() {
//!     let layer = model.resolve_layer(entity.layer());
//!     println!("{} on {:?}", entity.type_name(), layer.map(|l| &l.name));
//! }
//!
//! // Spatial queries over entity bounds.
//! let index = SpatialIndex::build(&model, &SpatialIndexConfig::default());
//! if let Some(bounds) = index.bounds() {
//!     let hits = index.query(bounds);
//!     println!("{} entities with geometry", hits.len());
//! }
//!
//! // Write it back out.
//! model.write(std::fs::File::create("copy.dxf")?)?;
//! # Ok::<(), dxfmodel::DxfError>(())
//! ```
//!
//! ## Layout
//!
//! - [`record`] - the (group code, value) record layer and type classes
//! - [`io`] - text and binary record readers/writers, format detection
//! - [`entities`] - the graphical entity sum type
//! - [`tables`] - symbol tables (layers, coordinate systems)
//! - [`sections`] - typed section models plus a raw fallback
//! - [`model`] - the document root: ordered sections, diagnostics, lookups
//! - [`spatial`] - a bounding-box partition tree over model entities

pub mod entities;
pub mod error;
pub mod io;
pub mod model;
pub mod notification;
pub mod record;
pub mod sections;
pub mod spatial;
pub mod tables;
pub mod types;

pub use error::{DxfError, Result};
pub use model::{Model, ReadOptions};
pub use notification::{Notification, NotificationCollection, NotificationKind};
pub use record::{Record, RecordHolder, Value, ValueClass};
pub use spatial::{EntityId, SpatialIndex, SpatialIndexConfig};
pub use types::{BoundingBox3D, Segment, Vector2, Vector3};
