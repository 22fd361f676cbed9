//! Blueprint books and their entries.
//!
//! A book does not hold its children as typed records. Each entry carries the
//! child's own top-level JSON document (`{"blueprint": {...}}` or
//! `{"blueprint-book": {...}}`) as opaque bytes, written as a base64 string:
//!
//! ```json
//! {"index": 0, "blueprint": "eyJibHVlcHJpbnQiOnsiaXRlbSI6ImJsdWVwcmludCIs..."}
//! ```
//!
//! Children are decoded on demand with [`BookEntry::decode`], so a book of
//! books is never expanded further than the caller asks for.
//!
//! On input the game's own entry layouts are accepted too: the bare record
//! under `"blueprint"` / `"blueprint_book"` (and the planner keys), and the
//! wrapped document written inline. These are stored as the wrapped
//! document's bytes like any other entry.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{DecodeError, EncodeError};
use crate::limits::{BLUEPRINT_BOOK_ITEM, BLUEPRINT_ITEM};
use crate::model::blueprint::Blueprint;
use crate::model::common::{Color, Icon};
use crate::model::envelope::{parse_from_json, Document, DocumentKind, DocumentRef};
use crate::model::version::GameVersion;

/// A book of blueprints and nested books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintBook {
    /// Always `"blueprint-book"` for books the game produced.
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<Icon>>,
    /// Entries in order; `blueprints[i].index == i`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blueprints: Option<Vec<BookEntry>>,
    /// Position of the selected entry.
    pub active_index: u32,
    /// Packed game version, see [`GameVersion`].
    pub version: u64,
}

impl BlueprintBook {
    /// Creates an empty book stamped with `version`.
    pub fn new(version: GameVersion) -> Self {
        Self {
            item: BLUEPRINT_BOOK_ITEM.to_string(),
            label: None,
            label_color: None,
            description: None,
            icons: None,
            blueprints: None,
            active_index: 0,
            version: version.to_packed(),
        }
    }

    /// Appends a blueprint as the next entry.
    pub fn add_blueprint(&mut self, blueprint: &Blueprint) -> Result<(), EncodeError> {
        self.push(serde_json::to_vec(&DocumentRef::Blueprint(blueprint))?);
        Ok(())
    }

    /// Appends a nested book as the next entry.
    pub fn add_book(&mut self, book: &BlueprintBook) -> Result<(), EncodeError> {
        self.push(serde_json::to_vec(&DocumentRef::Book(book))?);
        Ok(())
    }

    fn push(&mut self, payload: Vec<u8>) {
        let entries = self.blueprints.get_or_insert_with(Vec::new);
        entries.push(BookEntry {
            index: entries.len() as u32,
            payload,
        });
    }

    /// Returns the entries in order.
    pub fn entries(&self) -> &[BookEntry] {
        self.blueprints.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Decodes the children one at a time, in order.
    pub fn children(&self) -> impl Iterator<Item = Result<Document, DecodeError>> + '_ {
        self.entries().iter().map(BookEntry::decode)
    }

    /// Returns the entry `active_index` points at.
    pub fn active(&self) -> Option<&BookEntry> {
        self.entries().get(self.active_index as usize)
    }

    /// Serializes as a top-level document: `{"blueprint-book": {...}}`.
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(&DocumentRef::Book(self))?)
    }

    /// Parses a top-level document that must hold a book.
    pub fn from_json(json: &[u8]) -> Result<Self, DecodeError> {
        match parse_from_json(json)? {
            Document::Book(book) => Ok(book),
            Document::Blueprint(_) => Err(DecodeError::UnexpectedDocument {
                expected: DocumentKind::Book.name(),
                found: DocumentKind::Blueprint.name(),
            }),
        }
    }

    /// Returns the unpacked `version`.
    pub fn game_version(&self) -> GameVersion {
        GameVersion::from_packed(self.version)
    }
}

/// Key an entry's payload is written under, whatever the child's kind.
const PAYLOAD_KEY: &str = "blueprint";

/// One child of a book: its position and its serialized document.
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    pub index: u32,
    payload: Vec<u8>,
}

impl BookEntry {
    /// Returns the child's top-level JSON document.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Parses the child, whichever kind it is.
    pub fn decode(&self) -> Result<Document, DecodeError> {
        parse_from_json(&self.payload)
    }
}

impl Serialize for BookEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BookEntry", 2)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field(PAYLOAD_KEY, &STANDARD.encode(&self.payload))?;
        state.end()
    }
}

#[derive(Deserialize)]
struct EntryRepr {
    index: u32,
    #[serde(default, rename = "blueprint")]
    payload: Option<Box<RawValue>>,
    #[serde(default, rename = "blueprint-book", alias = "blueprint_book")]
    book: Option<Box<RawValue>>,
    #[serde(default)]
    deconstruction_planner: Option<Box<RawValue>>,
    #[serde(default)]
    upgrade_planner: Option<Box<RawValue>>,
}

#[derive(Deserialize)]
struct ItemProbe {
    item: Option<String>,
}

impl<'de> Deserialize<'de> for BookEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = EntryRepr::deserialize(deserializer)?;
        let payload = if let Some(raw) = repr.payload {
            normalize_payload(&raw).map_err(<D::Error as de::Error>::custom)?
        } else if let Some(raw) = repr.book {
            wrap(BLUEPRINT_BOOK_ITEM, &raw)
        } else if let Some(raw) = repr.deconstruction_planner {
            wrap("deconstruction_planner", &raw)
        } else if let Some(raw) = repr.upgrade_planner {
            wrap("upgrade_planner", &raw)
        } else {
            return Err(de::Error::custom(format!(
                "book entry {} holds neither a blueprint nor a book",
                repr.index
            )));
        };
        Ok(BookEntry {
            index: repr.index,
            payload,
        })
    }
}

/// Turns whatever sits under an entry's `"blueprint"` key into the bytes of
/// a wrapped document.
fn normalize_payload(raw: &RawValue) -> Result<Vec<u8>, String> {
    let text = raw.get();
    if text.starts_with('"') {
        let encoded: String = serde_json::from_str(text).map_err(|e| e.to_string())?;
        return STANDARD.decode(encoded).map_err(|e| e.to_string());
    }

    match serde_json::from_str::<ItemProbe>(text).ok().and_then(|p| p.item) {
        Some(item) if item == BLUEPRINT_BOOK_ITEM => Ok(wrap(BLUEPRINT_BOOK_ITEM, raw)),
        Some(_) => Ok(wrap(BLUEPRINT_ITEM, raw)),
        None => Ok(text.as_bytes().to_vec()),
    }
}

fn wrap(key: &str, raw: &RawValue) -> Vec<u8> {
    format!("{{\"{key}\":{}}}", raw.get()).into_bytes()
}
