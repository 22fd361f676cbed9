//! The blueprint record.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::limits::BLUEPRINT_ITEM;
use crate::model::common::{Color, Icon, Position, Tile};
use crate::model::entity::Entity;
use crate::model::envelope::{parse_from_json, Document, DocumentKind, DocumentRef};
use crate::model::schedule::Schedule;
use crate::model::version::GameVersion;

/// A single blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Always `"blueprint"` for blueprints the game produced.
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<Icon>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<Tile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<Vec<Schedule>>,
    /// Circuit and copper wires in the 2.0 flat layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wires: Option<Vec<Wire>>,
    /// Grid size when the blueprint snaps to a grid.
    #[serde(rename = "snap-to-grid", skip_serializing_if = "Option::is_none")]
    pub snap_to_grid: Option<Position>,
    #[serde(
        rename = "absolute-snapping",
        alias = "absolute_snapping",
        skip_serializing_if = "Option::is_none"
    )]
    pub absolute_snapping: Option<bool>,
    #[serde(rename = "position-relative-to-grid", skip_serializing_if = "Option::is_none")]
    pub position_relative_to_grid: Option<Position>,
    /// Packed game version, see [`GameVersion`].
    pub version: u64,
}

impl Blueprint {
    /// Creates an empty blueprint stamped with `version`.
    pub fn new(version: GameVersion) -> Self {
        Self {
            item: BLUEPRINT_ITEM.to_string(),
            label: None,
            label_color: None,
            description: None,
            icons: None,
            entities: None,
            tiles: None,
            schedules: None,
            wires: None,
            snap_to_grid: None,
            absolute_snapping: None,
            position_relative_to_grid: None,
            version: version.to_packed(),
        }
    }

    /// Serializes as a top-level document: `{"blueprint": {...}}`.
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(&DocumentRef::Blueprint(self))?)
    }

    /// Parses a top-level document that must hold a blueprint.
    pub fn from_json(json: &[u8]) -> Result<Self, DecodeError> {
        match parse_from_json(json)? {
            Document::Blueprint(blueprint) => Ok(blueprint),
            Document::Book(_) => Err(DecodeError::UnexpectedDocument {
                expected: DocumentKind::Blueprint.name(),
                found: DocumentKind::Book.name(),
            }),
        }
    }

    /// Returns the unpacked `version`.
    pub fn game_version(&self) -> GameVersion {
        GameVersion::from_packed(self.version)
    }

    /// Returns the entity with the given number.
    pub fn entity(&self, entity_number: u32) -> Option<&Entity> {
        self.entities
            .iter()
            .flatten()
            .find(|e| e.entity_number == entity_number)
    }

    /// Returns the lowest entity number greater than every one in use.
    pub fn next_entity_number(&self) -> u32 {
        self.entities
            .iter()
            .flatten()
            .map(|e| e.entity_number)
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// One wire in the flat layout: `[entity, connector, entity, connector]`.
///
/// Connector ids: 1/2 red/green (input side of combinators), 3/4 red/green
/// output side, 5 and up copper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire(pub u32, pub u8, pub u32, pub u8);

impl Wire {
    /// Returns the two entity numbers the wire joins.
    pub fn entities(&self) -> [u32; 2] {
        [self.0, self.2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testdata::EXAMPLE_JSON;
    use crate::model::entity::RequestFilters;

    #[test]
    fn test_example_document() {
        let blueprint = Blueprint::from_json(EXAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(blueprint.item, "blueprint");
        assert_eq!(blueprint.version, 562949954404356);
        assert_eq!(blueprint.game_version(), GameVersion::new(2, 0, 15, 4));
        assert_eq!(blueprint.label, None);

        let entities = blueprint.entities.as_ref().unwrap();
        assert_eq!(entities.len(), 5);
        assert_eq!(entities[1].direction, Some(8));
        assert_eq!(entities[2].direction, None);
        assert!(matches!(
            blueprint.entity(4).unwrap().request_filters,
            Some(RequestFilters::Sections(_))
        ));
        assert_eq!(blueprint.next_entity_number(), 6);
    }

    #[test]
    fn test_to_json_wraps_record() {
        let blueprint = Blueprint::new(GameVersion::new(2, 0, 15, 4));
        let json = blueprint.to_json().unwrap();
        assert_eq!(
            std::str::from_utf8(&json).unwrap(),
            r#"{"blueprint":{"item":"blueprint","version":562949954404356}}"#
        );
        assert_eq!(blueprint.next_entity_number(), 1);
    }

    #[test]
    fn test_from_json_rejects_book() {
        let err = Blueprint::from_json(
            br#"{"blueprint-book":{"item":"blueprint-book","active_index":0,"version":1}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedDocument { expected: "blueprint", .. }
        ));
    }

    #[test]
    fn test_grid_keys_and_wires() {
        let json = br#"{"blueprint":{
            "item":"blueprint",
            "snap-to-grid":{"x":32,"y":32},
            "absolute_snapping":true,
            "wires":[[1,1,2,1],[2,5,3,5]],
            "version":281479278886912
        }}"#;
        let blueprint = Blueprint::from_json(json).unwrap();
        assert_eq!(blueprint.snap_to_grid, Some(Position::new(32.0, 32.0)));
        assert_eq!(blueprint.absolute_snapping, Some(true));
        let wires = blueprint.wires.as_ref().unwrap();
        assert_eq!(wires[1], Wire(2, 5, 3, 5));
        assert_eq!(wires[0].entities(), [1, 2]);

        let value = serde_json::to_value(&blueprint).unwrap();
        assert_eq!(value["absolute-snapping"], true);
        assert_eq!(value["wires"][0], serde_json::json!([1, 1, 2, 1]));
    }
}
