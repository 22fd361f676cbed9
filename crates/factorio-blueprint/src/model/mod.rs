//! Data model for blueprint JSON documents.
//!
//! The records form one flat superset schema: every field the format is
//! known to carry is present on the record type, and everything that is not
//! always written is an `Option`. A `None` field is left out of the JSON
//! entirely; `Some(0)`, `Some("")` and `Some(vec![])` are written as such.
//!
//! - Shared value types (positions, colors, signals, icons)
//! - Entities and their wiring
//! - Control behaviors (circuit and logistic configuration)
//! - Train schedules
//! - Blueprints, books and the document envelope
//! - Builders (ergonomic construction)

/// Declares a string enum that keeps unknown values.
///
/// The game adds new tags between releases; a value this crate does not know
/// decodes to `Other` and is written back unchanged.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A value this crate does not model, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Returns the wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )*
                    Self::Other(other) => other.as_str(),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )*
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(value.as_ref()))
            }
        }
    };
}

pub mod blueprint;
pub mod book;
pub mod builder;
pub mod common;
pub mod control;
pub mod entity;
pub mod envelope;
pub mod schedule;
pub mod version;

pub use blueprint::{Blueprint, Wire};
pub use book::{BlueprintBook, BookEntry};
pub use builder::{BlueprintBuilder, EntityBuilder, WireColor};
pub use common::{Color, Icon, Position, SignalId, SignalType, Tile};
pub use control::{
    ArithmeticConditions, CircuitCondition, Comparator, ConstantFilter, ControlBehavior,
    DeciderCondition, DeciderConditions, DeciderOutput, LogisticFilter, LogisticSection,
    LogisticSections, SpeakerCircuitParameters,
};
pub use entity::{
    ConnectionData, ConnectionPoint, Connections, CopperConnection, Entity, InfinityFilter,
    InfinitySettings, Inventory, ItemFilter, RequestFilters, SpeakerAlertParameters,
    SpeakerParameters,
};
pub use envelope::{parse_from_json, Document, DocumentKind};
pub use schedule::{Schedule, ScheduleRecord, WaitCondition, WaitConditionType};
pub use version::GameVersion;
