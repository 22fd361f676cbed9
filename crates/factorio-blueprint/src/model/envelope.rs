//! The top-level JSON wrapper.
//!
//! Every document is a single-key object naming what it holds:
//! `{"blueprint": {...}}` or `{"blueprint-book": {...}}`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodeError, EncodeError};
use crate::model::blueprint::Blueprint;
use crate::model::book::BlueprintBook;

/// A decoded top-level document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Blueprint(Blueprint),
    Book(BlueprintBook),
}

/// What a [`Document`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Blueprint,
    Book,
}

impl DocumentKind {
    /// Human-readable name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Blueprint => "blueprint",
            DocumentKind::Book => "blueprint book",
        }
    }
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Blueprint(_) => DocumentKind::Blueprint,
            Document::Book(_) => DocumentKind::Book,
        }
    }

    /// Packed game version of the blueprint or book.
    pub fn version(&self) -> u64 {
        match self {
            Document::Blueprint(blueprint) => blueprint.version,
            Document::Book(book) => book.version,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Document::Blueprint(blueprint) => blueprint.label.as_deref(),
            Document::Book(book) => book.label.as_deref(),
        }
    }

    /// Serializes the wrapped document.
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn as_blueprint(&self) -> Option<&Blueprint> {
        match self {
            Document::Blueprint(blueprint) => Some(blueprint),
            Document::Book(_) => None,
        }
    }

    pub fn as_book(&self) -> Option<&BlueprintBook> {
        match self {
            Document::Book(book) => Some(book),
            Document::Blueprint(_) => None,
        }
    }
}

impl From<Blueprint> for Document {
    fn from(blueprint: Blueprint) -> Self {
        Document::Blueprint(blueprint)
    }
}

impl From<BlueprintBook> for Document {
    fn from(book: BlueprintBook) -> Self {
        Document::Book(book)
    }
}

/// Borrowed form used for serialization.
#[derive(Serialize)]
pub(crate) enum DocumentRef<'a> {
    #[serde(rename = "blueprint")]
    Blueprint(&'a Blueprint),
    #[serde(rename = "blueprint-book")]
    Book(&'a BlueprintBook),
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Blueprint(blueprint) => DocumentRef::Blueprint(blueprint),
            Document::Book(book) => DocumentRef::Book(book),
        }
        .serialize(serializer)
    }
}

/// Decoding form: both keys optional so that their absence or coexistence
/// can be reported precisely. Other top-level keys are ignored.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    blueprint: Option<Blueprint>,
    #[serde(default, rename = "blueprint-book", alias = "blueprint_book")]
    book: Option<BlueprintBook>,
}

impl Envelope {
    fn into_document(self) -> Result<Document, DecodeError> {
        match (self.blueprint, self.book) {
            (Some(blueprint), None) => Ok(Document::Blueprint(blueprint)),
            (None, Some(book)) => Ok(Document::Book(book)),
            (None, None) => Err(DecodeError::MissingDocument),
            (Some(_), Some(_)) => Err(DecodeError::AmbiguousDocument),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Envelope::deserialize(deserializer)?
            .into_document()
            .map_err(serde::de::Error::custom)
    }
}

/// Parses a top-level document.
///
/// Fields outside the modelled set are dropped: re-encoding a parsed document
/// writes only what the record types know about. Books keep their children
/// as serialized payloads (see [`crate::model::BookEntry`]).
pub fn parse_from_json(json: &[u8]) -> Result<Document, DecodeError> {
    let envelope: Envelope = serde_json::from_slice(json)?;
    let document = envelope.into_document()?;
    tracing::trace!(kind = document.kind().name(), len = json.len(), "parsed document");
    Ok(document)
}
