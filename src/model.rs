//! The in-memory drawing document.
//!
//! A [`Model`] is an ordered list of sections plus the code-999 comments
//! that precede them. Reading is resilient by default: malformed records
//! and unknown types are reported through the model's
//! [`NotificationCollection`] instead of failing the whole parse; strict
//! mode turns the first malformed record into an error.

use crate::entities::Entity;
use crate::error::{DxfError, Result};
use crate::io::{
    BinaryRecordWriter, RecordInput, RecordReader, RecordWriter, RecordWriterExt,
    TextRecordReader, TextRecordWriter,
};
use crate::notification::{NotificationCollection, NotificationKind};
use crate::record::Record;
use crate::sections::{BlocksSection, EntitiesSection, HeaderSection, Section, TablesSection};
use crate::tables::{Layer, TableRecord};
use ahash::AHashMap;
use once_cell::sync::OnceCell;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Options controlling how a drawing is read.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Fail on the first malformed record instead of skipping it.
    pub strict: bool,
    /// Cooperative cancellation flag, checked between top-level items.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ReadOptions {
    fn check_cancel(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(DxfError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Location of a layer entry: section, table, and entry indices.
type LayerSlot = (usize, usize, usize);
/// Location of a block definition: section and block indices.
type BlockSlot = (usize, usize);

/// An in-memory drawing.
#[derive(Debug, Clone)]
pub struct Model {
    sections: Vec<Section>,
    /// Code-999 comments preceding the first section
    header_comments: Vec<Record>,
    /// Parse diagnostics: skipped records, unknown types, duplicate names
    pub notifications: NotificationCollection,
    layer_cache: OnceCell<AHashMap<String, LayerSlot>>,
    block_cache: OnceCell<AHashMap<String, BlockSlot>>,
}

impl Model {
    /// An empty drawing with no sections.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            header_comments: Vec::new(),
            notifications: NotificationCollection::new(),
            layer_cache: OnceCell::new(),
            block_cache: OnceCell::new(),
        }
    }

    /// Read a drawing, detecting the text or binary encoding from the
    /// leading bytes. Uses default (resilient) options.
    pub fn read<R: Read>(source: R) -> Result<Model> {
        Self::read_with(source, &ReadOptions::default())
    }

    /// Read a drawing with explicit options.
    pub fn read_with<R: Read>(source: R, options: &ReadOptions) -> Result<Model> {
        let mut input = RecordInput::new(source)?;
        Self::read_records(&mut input, options)
    }

    /// Read a drawing from an already-constructed record reader.
    pub fn read_records<R: RecordReader>(input: &mut R, options: &ReadOptions) -> Result<Model> {
        if options.strict {
            parse_model(input, options)
        } else {
            let mut resilient = ResilientReader {
                inner: input,
                notifications: NotificationCollection::new(),
            };
            let mut model = parse_model(&mut resilient, options)?;
            model.notifications.merge(resilient.notifications);
            Ok(model)
        }
    }

    /// Write the drawing in the text encoding.
    pub fn write<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = TextRecordWriter::new(sink);
        self.write_records(&mut writer)
    }

    /// Write the drawing in the binary encoding.
    ///
    /// Header comments are not representable in this encoding and are
    /// omitted; everything else round-trips.
    pub fn write_binary<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = BinaryRecordWriter::new(sink)?;
        self.write_records(&mut writer)
    }

    /// Write the drawing through any record writer: comments first, then
    /// the sections in order, then the EOF marker.
    pub fn write_records<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for comment in &self.header_comments {
            writer.write_record(comment)?;
        }
        for section in &self.sections {
            section.write(writer)?;
        }
        writer.write_type_marker("EOF")?;
        writer.flush()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Mutable section access. Invalidates the name-resolution caches.
    pub fn sections_mut(&mut self) -> &mut Vec<Section> {
        self.invalidate_caches();
        &mut self.sections
    }

    /// The first section with the given name, when present. Duplicate
    /// sections are kept in order; later ones are reachable through
    /// [`sections`](Self::sections).
    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Append a section, preserving document order.
    pub fn add_section(&mut self, section: Section) {
        self.invalidate_caches();
        self.sections.push(section);
    }

    /// Comments (code 999) preceding the first section.
    pub fn header_comments(&self) -> &[Record] {
        &self.header_comments
    }

    pub fn add_header_comment(&mut self, text: &str) {
        self.header_comments.push(Record::string(999, text));
    }

    /// The HEADER section, when present.
    pub fn header(&self) -> Option<&HeaderSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn header_mut(&mut self) -> Option<&mut HeaderSection> {
        self.sections.iter_mut().find_map(|s| match s {
            Section::Header(h) => Some(h),
            _ => None,
        })
    }

    fn entities_section(&self) -> Option<&EntitiesSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Entities(e) => Some(e),
            _ => None,
        })
    }

    /// Model-space entities, in document order. Empty when the drawing has
    /// no ENTITIES section.
    pub fn entities(&self) -> &[Entity] {
        self.entities_section()
            .map(|s| s.entities.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable entity access, creating the ENTITIES section on demand.
    /// Invalidates the name-resolution caches.
    pub fn entities_mut(&mut self) -> &mut Vec<Entity> {
        self.invalidate_caches();
        if !self
            .sections
            .iter()
            .any(|s| matches!(s, Section::Entities(_)))
        {
            self.sections
                .push(Section::Entities(EntitiesSection::default()));
        }
        self.sections
            .iter_mut()
            .find_map(|s| match s {
                Section::Entities(e) => Some(&mut e.entities),
                _ => None,
            })
            .unwrap()
    }

    /// Append an entity, creating the ENTITIES section on demand.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities_mut().push(entity);
    }

    /// Entities whose layer reference matches `layer`.
    pub fn entities_on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.entities().iter().filter(move |e| e.layer() == layer)
    }

    /// The BLOCKS section, when present.
    pub fn blocks(&self) -> Option<&BlocksSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Blocks(b) => Some(b),
            _ => None,
        })
    }

    /// The TABLES section, when present.
    pub fn tables(&self) -> Option<&TablesSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Tables(t) => Some(t),
            _ => None,
        })
    }

    /// Resolve a layer by name. Duplicates resolve to the first
    /// occurrence; lookups are cached until the model is mutated.
    pub fn resolve_layer(&self, name: &str) -> Option<&Layer> {
        let cache = self.layer_cache.get_or_init(|| {
            let mut map = AHashMap::new();
            for (si, section) in self.sections.iter().enumerate() {
                if let Section::Tables(tables) = section {
                    for (ti, table) in tables.tables.iter().enumerate() {
                        if table.name != "LAYER" {
                            continue;
                        }
                        for (ei, entry) in table.entries().iter().enumerate() {
                            if let TableRecord::Layer(layer) = entry {
                                map.entry(layer.name.clone()).or_insert((si, ti, ei));
                            }
                        }
                    }
                }
            }
            map
        });
        let &(si, ti, ei) = cache.get(name)?;
        match &self.sections[si] {
            Section::Tables(tables) => match &tables.tables[ti].entries()[ei] {
                TableRecord::Layer(layer) => Some(layer),
                _ => None,
            },
            _ => None,
        }
    }

    /// Resolve a layer by name, failing with
    /// [`DxfError::UnresolvedReference`] when it is not defined.
    pub fn require_layer(&self, name: &str) -> Result<&Layer> {
        self.resolve_layer(name)
            .ok_or_else(|| DxfError::UnresolvedReference(format!("layer '{}'", name)))
    }

    /// Resolve a block definition by name, with the same caching and
    /// first-occurrence rules as [`resolve_layer`](Self::resolve_layer).
    pub fn resolve_block(&self, name: &str) -> Option<&crate::entities::Block> {
        let cache = self.block_cache.get_or_init(|| {
            let mut map = AHashMap::new();
            for (si, section) in self.sections.iter().enumerate() {
                if let Section::Blocks(blocks) = section {
                    for (bi, block) in blocks.blocks.iter().enumerate() {
                        map.entry(block.name.clone()).or_insert((si, bi));
                    }
                }
            }
            map
        });
        let &(si, bi) = cache.get(name)?;
        match &self.sections[si] {
            Section::Blocks(blocks) => Some(&blocks.blocks[bi]),
            _ => None,
        }
    }

    pub fn require_block(&self, name: &str) -> Result<&crate::entities::Block> {
        self.resolve_block(name)
            .ok_or_else(|| DxfError::UnresolvedReference(format!("block '{}'", name)))
    }

    fn invalidate_caches(&mut self) {
        self.layer_cache.take();
        self.block_cache.take();
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality compares document content; diagnostics and caches are not
/// part of the document.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections && self.header_comments == other.header_comments
    }
}

/// The top-level grammar: comments, SECTION blocks, then the EOF marker.
fn parse_model<R: RecordReader>(input: &mut R, options: &ReadOptions) -> Result<Model> {
    let mut model = Model::new();
    let mut saw_eof = false;
    while let Some(record) = input.read_record()? {
        options.check_cancel()?;
        if record.code == 999 {
            model.header_comments.push(record);
            continue;
        }
        if record.code != 0 {
            model.notifications.notify(
                NotificationKind::SkippedRecord,
                format!("stray record (code {}) at top level", record.code),
            );
            continue;
        }
        let tag = record.as_str().unwrap_or("").to_string();
        match tag.as_str() {
            "EOF" => {
                saw_eof = true;
                break;
            }
            "SECTION" => {
                let name_record =
                    input.read_record()?.ok_or(DxfError::TruncatedStream)?;
                let name = match (name_record.code, name_record.as_str()) {
                    (2, Some(name)) => name.to_string(),
                    _ => {
                        return Err(DxfError::MalformedRecord {
                            line: input.position(),
                            message: "section is missing its name record (code 2)".to_string(),
                        })
                    }
                };
                let section = Section::read(&name, input, &mut model.notifications)?;
                model.sections.push(section);
            }
            other => {
                model.notifications.notify(
                    NotificationKind::SkippedRecord,
                    format!("unexpected '{}' marker at top level", other),
                );
                skip_to_marker(input)?;
            }
        }
    }
    if !saw_eof {
        return Err(DxfError::TruncatedStream);
    }
    Ok(model)
}

/// Consume records up to the next code-0 marker, which is pushed back.
fn skip_to_marker<R: RecordReader>(input: &mut R) -> Result<()> {
    while let Some(record) = input.read_record()? {
        if record.code == 0 {
            input.push_back(record);
            break;
        }
    }
    Ok(())
}

/// Record reader that downgrades malformed records to notifications.
///
/// The text reader consumes the offending line before failing, so a retry
/// realigns on the next line.
struct ResilientReader<'a, R: RecordReader> {
    inner: &'a mut R,
    notifications: NotificationCollection,
}

impl<R: RecordReader> RecordReader for ResilientReader<'_, R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            match self.inner.read_record() {
                Err(DxfError::MalformedRecord { line, message }) => {
                    self.notifications.notify(
                        NotificationKind::SkippedRecord,
                        format!("line {}: {}", line, message),
                    );
                }
                other => return other,
            }
        }
    }

    fn push_back(&mut self, record: Record) {
        self.inner.push_back(record);
    }

    fn position(&self) -> usize {
        self.inner.position()
    }
}

/// Convenience constructor for reading a text drawing held in memory.
impl std::str::FromStr for Model {
    type Err = DxfError;

    fn from_str(s: &str) -> Result<Model> {
        let mut input = TextRecordReader::new(s.as_bytes());
        Model::read_records(&mut input, &ReadOptions::default())
    }
}
