//! Builder API for ergonomic blueprint construction.
//!
//! Entity numbers are assigned in insertion order starting at 1, and icon
//! slots likewise, so the result satisfies the structural checks in
//! [`crate::validate`] without bookkeeping by the caller.
//!
//! # Example
//!
//! ```rust
//! use factorio_blueprint::model::{BlueprintBuilder, GameVersion, Position, SignalId, WireColor};
//!
//! let blueprint = BlueprintBuilder::new()
//!     .label("Clock")
//!     .version(GameVersion::new(2, 0, 15, 4))
//!     .icon(SignalId::item("decider-combinator"))
//!     .entity("decider-combinator", Position::new(0.5, 0.0), |e| e.direction(4))
//!     .entity("constant-combinator", Position::new(1.5, 0.0), |e| e)
//!     .connect((1, 1), (2, 1), WireColor::Red)
//!     .build();
//!
//! assert_eq!(blueprint.entities.as_ref().map(Vec::len), Some(2));
//! ```

use std::collections::BTreeMap;

use crate::limits::MAX_ICONS;
use crate::model::blueprint::Blueprint;
use crate::model::common::{Color, Icon, Position, SignalId, Tile};
use crate::model::control::ControlBehavior;
use crate::model::entity::{ConnectionData, Entity, ItemFilter, RequestFilters};
use crate::model::schedule::Schedule;
use crate::model::version::GameVersion;

/// Color of a circuit wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireColor {
    Red,
    Green,
}

/// Builder for constructing a [`Blueprint`].
#[derive(Debug, Clone)]
pub struct BlueprintBuilder {
    blueprint: Blueprint,
}

impl Default for BlueprintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintBuilder {
    /// Creates a builder for an empty blueprint with version 0.
    pub fn new() -> Self {
        Self {
            blueprint: Blueprint::new(GameVersion::default()),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.blueprint.label = Some(label.into());
        self
    }

    pub fn label_color(mut self, color: Color) -> Self {
        self.blueprint.label_color = Some(color);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.blueprint.description = Some(description.into());
        self
    }

    /// Sets the game version the blueprint claims to come from.
    pub fn version(mut self, version: GameVersion) -> Self {
        self.blueprint.version = version.to_packed();
        self
    }

    /// Adds an icon in the next free slot.
    ///
    /// There are [`MAX_ICONS`] slots; icons beyond the last one are ignored.
    pub fn icon(mut self, signal: SignalId) -> Self {
        let icons = self.blueprint.icons.get_or_insert_with(Vec::new);
        if let Some(index) = u8::try_from(icons.len() + 1).ok().filter(|i| *i <= MAX_ICONS) {
            icons.push(Icon { index, signal });
        }
        self
    }

    // =========================================================================
    // Contents
    // =========================================================================

    /// Adds an entity, numbered after the ones already added.
    pub fn entity<F>(mut self, name: impl Into<String>, position: Position, f: F) -> Self
    where
        F: FnOnce(EntityBuilder) -> EntityBuilder,
    {
        let entities = self.blueprint.entities.get_or_insert_with(Vec::new);
        let number = entities.len() as u32 + 1;
        let builder = f(EntityBuilder::new(Entity::new(number, name, position)));
        entities.push(builder.entity);
        self
    }

    /// Wires two entity terminals together, recording the wire on both ends.
    ///
    /// Each end is `(entity_number, circuit_id)`. Ends naming an entity that
    /// was not added yet are skipped.
    pub fn connect(mut self, from: (u32, u8), to: (u32, u8), color: WireColor) -> Self {
        self.attach(from, to, color);
        if from != to {
            self.attach(to, from, color);
        }
        self
    }

    fn attach(&mut self, (number, circuit_id): (u32, u8), far: (u32, u8), color: WireColor) {
        let Some(entity) = self
            .blueprint
            .entities
            .iter_mut()
            .flatten()
            .find(|e| e.entity_number == number)
        else {
            return;
        };

        let point = entity
            .connections
            .get_or_insert_with(Default::default)
            .point_mut(circuit_id);
        let wires = match color {
            WireColor::Red => &mut point.red,
            WireColor::Green => &mut point.green,
        };
        wires.get_or_insert_with(Vec::new).push(ConnectionData {
            entity_id: far.0,
            circuit_id: (far.1 != 1).then_some(far.1),
        });
    }

    pub fn tile(mut self, name: impl Into<String>, position: Position) -> Self {
        self.blueprint.tiles.get_or_insert_with(Vec::new).push(Tile {
            name: name.into(),
            position,
        });
        self
    }

    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.blueprint.schedules.get_or_insert_with(Vec::new).push(schedule);
        self
    }

    // =========================================================================
    // Grid
    // =========================================================================

    pub fn snap_to_grid(mut self, size: Position) -> Self {
        self.blueprint.snap_to_grid = Some(size);
        self
    }

    pub fn absolute_snapping(mut self, absolute: bool) -> Self {
        self.blueprint.absolute_snapping = Some(absolute);
        self
    }

    pub fn position_relative_to_grid(mut self, offset: Position) -> Self {
        self.blueprint.position_relative_to_grid = Some(offset);
        self
    }

    /// Builds the blueprint.
    pub fn build(self) -> Blueprint {
        self.blueprint
    }
}

/// Builder for the optional fields of one entity.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn direction(mut self, direction: u8) -> Self {
        self.entity.direction = Some(direction);
        self
    }

    pub fn orientation(mut self, orientation: f32) -> Self {
        self.entity.orientation = Some(orientation);
        self
    }

    pub fn recipe(mut self, recipe: impl Into<String>) -> Self {
        self.entity.recipe = Some(recipe.into());
        self
    }

    /// Adds a module or fuel request.
    pub fn item(mut self, name: impl Into<String>, count: u32) -> Self {
        self.entity
            .items
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), count);
        self
    }

    /// Sets the `type` field (`"input"`/`"output"` for undergrounds and loaders).
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.entity.kind = Some(kind.into());
        self
    }

    pub fn bar(mut self, bar: u32) -> Self {
        self.entity.bar = Some(bar);
        self
    }

    /// Adds a filter in the next slot.
    pub fn filter(mut self, name: impl Into<String>) -> Self {
        let filters = self.entity.filters.get_or_insert_with(Vec::new);
        filters.push(ItemFilter {
            name: name.into(),
            index: u32::try_from(filters.len() + 1).ok(),
            count: None,
            mode: None,
            quality: None,
            comparator: None,
        });
        self
    }

    pub fn request_filters(mut self, filters: RequestFilters) -> Self {
        self.entity.request_filters = Some(filters);
        self
    }

    pub fn control_behavior(mut self, behavior: ControlBehavior) -> Self {
        self.entity.control_behavior = Some(behavior);
        self
    }

    /// Adds a copper neighbour (power poles).
    pub fn neighbour(mut self, entity_number: u32) -> Self {
        self.entity.neighbours.get_or_insert_with(Vec::new).push(entity_number);
        self
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.entity.station = Some(station.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.entity.color = Some(color);
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.entity
            .tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }
}
