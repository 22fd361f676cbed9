//! Structural validation for blueprints and books.
//!
//! Decoding accepts anything that matches the schema. These checks cover the
//! invariants the format relies on beyond that: entity numbers are unique and
//! every wire points at an entity of the same blueprint, icon slots are in
//! range, and book entries are indexed by position.
//!
//! Whether a blueprint makes sense in the game (overlapping entities, unknown
//! prototype names, ...) is not checked.

use std::collections::HashSet;

use tracing::warn;

use crate::error::ValidationError;
use crate::limits::MAX_ICONS;
use crate::model::{Blueprint, BlueprintBook, Document, Icon};

/// Validates whichever record the document holds.
///
/// Book children are not decoded; validate them separately if needed.
pub fn validate_document(document: &Document) -> Result<(), ValidationError> {
    match document {
        Document::Blueprint(blueprint) => validate_blueprint(blueprint),
        Document::Book(book) => validate_book(book),
    }
}

/// Validates a blueprint.
pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), ValidationError> {
    validate_icons(blueprint.icons.as_deref())?;

    let entities = blueprint.entities.as_deref().unwrap_or_default();
    let mut numbers = HashSet::with_capacity(entities.len());
    for entity in entities {
        if !numbers.insert(entity.entity_number) {
            return Err(ValidationError::DuplicateEntityNumber {
                entity_number: entity.entity_number,
            });
        }
    }

    for entity in entities {
        for target in entity.connected_entities() {
            if !numbers.contains(&target) {
                return Err(ValidationError::DanglingConnection {
                    from: entity.entity_number,
                    to: target,
                });
            }
        }
    }

    for wire in blueprint.wires.iter().flatten() {
        let [from, to] = wire.entities();
        for (end, other) in [(from, to), (to, from)] {
            if !numbers.contains(&end) {
                return Err(ValidationError::DanglingConnection { from: other, to: end });
            }
        }
    }

    Ok(())
}

/// Validates a book's own fields.
///
/// An empty book with a non-zero `active_index` is accepted with a warning;
/// the game resets the index when the first entry is added.
pub fn validate_book(book: &BlueprintBook) -> Result<(), ValidationError> {
    validate_icons(book.icons.as_deref())?;

    let entries = book.entries();
    for (position, entry) in entries.iter().enumerate() {
        if entry.index as usize != position {
            return Err(ValidationError::BookIndexMismatch {
                position,
                index: entry.index,
            });
        }
    }

    if entries.is_empty() {
        if book.active_index != 0 {
            warn!(active_index = book.active_index, "active index set on empty book");
        }
    } else if book.active_index as usize >= entries.len() {
        return Err(ValidationError::ActiveIndexOutOfRange {
            active_index: book.active_index,
            len: entries.len(),
        });
    }

    Ok(())
}

fn validate_icons(icons: Option<&[Icon]>) -> Result<(), ValidationError> {
    for icon in icons.unwrap_or_default() {
        if !(1..=MAX_ICONS).contains(&icon.index) {
            return Err(ValidationError::IconIndexOutOfRange { index: icon.index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testdata::EXAMPLE_JSON;
    use crate::model::{
        BlueprintBuilder, Entity, GameVersion, Position, SignalId, Wire, WireColor,
    };

    fn two_poles() -> Blueprint {
        BlueprintBuilder::new()
            .entity("small-electric-pole", Position::new(0.5, 0.5), |e| e.neighbour(2))
            .entity("small-electric-pole", Position::new(5.5, 0.5), |e| e.neighbour(1))
            .build()
    }

    #[test]
    fn test_example_is_valid() {
        let blueprint = Blueprint::from_json(EXAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(validate_blueprint(&blueprint), Ok(()));
    }

    #[test]
    fn test_built_blueprint_is_valid() {
        let blueprint = BlueprintBuilder::new()
            .icon(SignalId::item("small-lamp"))
            .entity("small-lamp", Position::new(0.5, 0.5), |e| e)
            .entity("constant-combinator", Position::new(1.5, 0.5), |e| e)
            .connect((1, 1), (2, 1), WireColor::Red)
            .build();
        assert_eq!(validate_document(&Document::from(blueprint)), Ok(()));
        assert_eq!(validate_blueprint(&two_poles()), Ok(()));
    }

    #[test]
    fn test_duplicate_entity_number() {
        let mut blueprint = two_poles();
        blueprint
            .entities
            .as_mut()
            .unwrap()
            .push(Entity::new(2, "wooden-chest", Position::new(3.5, 3.5)));
        assert_eq!(
            validate_blueprint(&blueprint),
            Err(ValidationError::DuplicateEntityNumber { entity_number: 2 })
        );
    }

    #[test]
    fn test_dangling_neighbour() {
        let mut blueprint = two_poles();
        blueprint.entities.as_mut().unwrap()[1].neighbours = Some(vec![1, 7]);
        assert_eq!(
            validate_blueprint(&blueprint),
            Err(ValidationError::DanglingConnection { from: 2, to: 7 })
        );
    }

    #[test]
    fn test_dangling_wire() {
        let mut blueprint = two_poles();
        blueprint.wires = Some(vec![Wire(1, 5, 2, 5), Wire(2, 1, 4, 1)]);
        assert_eq!(
            validate_blueprint(&blueprint),
            Err(ValidationError::DanglingConnection { from: 2, to: 4 })
        );
    }

    #[test]
    fn test_icon_out_of_range() {
        let mut blueprint = two_poles();
        blueprint.icons = Some(vec![Icon {
            index: 5,
            signal: SignalId::item("iron-plate"),
        }]);
        assert_eq!(
            validate_blueprint(&blueprint),
            Err(ValidationError::IconIndexOutOfRange { index: 5 })
        );
    }

    #[test]
    fn test_book_active_index() {
        let mut book = BlueprintBook::new(GameVersion::new(2, 0, 15, 4));
        book.active_index = 3;
        assert_eq!(validate_book(&book), Ok(()));

        book.add_blueprint(&two_poles()).unwrap();
        assert_eq!(
            validate_book(&book),
            Err(ValidationError::ActiveIndexOutOfRange { active_index: 3, len: 1 })
        );

        book.active_index = 0;
        assert_eq!(validate_book(&book), Ok(()));
    }

    #[test]
    fn test_book_index_mismatch() {
        let json = br#"{"blueprint-book":{
            "item":"blueprint-book",
            "blueprints":[
                {"index":0,"blueprint":{"item":"blueprint","version":1}},
                {"index":2,"blueprint":{"item":"blueprint","version":1}}
            ],
            "active_index":0,
            "version":1
        }}"#;
        let book = BlueprintBook::from_json(json).unwrap();
        assert_eq!(
            validate_book(&book),
            Err(ValidationError::BookIndexMismatch { position: 1, index: 2 })
        );
    }
}
