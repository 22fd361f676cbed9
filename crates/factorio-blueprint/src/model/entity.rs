//! Entities: placed objects and their wiring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::common::{Color, Position, SignalId};
use crate::model::control::{ControlBehavior, LogisticFilter, LogisticSections};

/// One placed object in a blueprint.
///
/// `entity_number` is local to the enclosing blueprint; connections and
/// wires refer to other entities by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_number: u32,
    pub name: String,
    pub position: Position,

    /// 0..16 in 2.0 (multiples of 2 for the eight compass points in 1.x).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<u8>,
    /// Rolling stock orientation, 0.0..1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Connections>,
    /// Power pole copper neighbours, by entity number.
    #[serde(rename = "neighbours", alias = "neighbors", skip_serializing_if = "Option::is_none")]
    pub neighbours: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_behavior: Option<ControlBehavior>,

    /// Module and fuel requests, item name to count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<BTreeMap<String, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    /// Container inventory limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ammo_inventory: Option<Inventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunk_inventory: Option<Inventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infinity_settings: Option<InfinitySettings>,

    /// `"input"` or `"output"` for underground belts and loaders.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Splitter priorities: `"left"` or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_priority: Option<String>,
    /// Splitter output filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Filter inserter and loader filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<ItemFilter>>,
    /// `"whitelist"` or `"blacklist"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_stack_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_filters: Option<RequestFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_from_buffers: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<SpeakerParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_parameters: Option<SpeakerAlertParameters>,

    /// Rocket silo automatic launch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_launch: Option<bool>,
    /// Graphics variation for rocks, trees and similar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Train stop name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_trains_limit: Option<u32>,
    /// Power switch state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_state: Option<bool>,
    /// Mod data; any JSON value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, serde_json::Value>>,
}

impl Entity {
    /// Creates an entity with only the required fields set.
    pub fn new(entity_number: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            entity_number,
            name: name.into(),
            position,
            direction: None,
            orientation: None,
            connections: None,
            neighbours: None,
            control_behavior: None,
            items: None,
            recipe: None,
            bar: None,
            ammo_inventory: None,
            trunk_inventory: None,
            infinity_settings: None,
            kind: None,
            input_priority: None,
            output_priority: None,
            filter: None,
            filters: None,
            filter_mode: None,
            override_stack_size: None,
            drop_position: None,
            pickup_position: None,
            request_filters: None,
            request_from_buffers: None,
            parameters: None,
            alert_parameters: None,
            auto_launch: None,
            variation: None,
            color: None,
            station: None,
            manual_trains_limit: None,
            switch_state: None,
            tags: None,
        }
    }

    /// Returns the entity numbers this entity is circuit- or copper-wired to.
    ///
    /// Duplicates are possible when two wires connect the same pair.
    pub fn connected_entities(&self) -> impl Iterator<Item = u32> + '_ {
        let circuit = self
            .connections
            .iter()
            .flat_map(|c| c.points())
            .flat_map(|point| point.all())
            .map(|data| data.entity_id);
        let copper = self
            .connections
            .iter()
            .flat_map(|c| c.cu0.iter().chain(c.cu1.iter()).flatten())
            .map(|data| data.entity_id);
        let poles = self.neighbours.iter().flatten().copied();
        circuit.chain(copper).chain(poles)
    }
}

/// Circuit connections of one entity, by terminal.
///
/// Terminal `"1"` is the only one for most entities; combinators use `"1"` for
/// input and `"2"` for output. `Cu0`/`Cu1` are the copper terminals of a power
/// switch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Connections {
    #[serde(rename = "1", skip_serializing_if = "Option::is_none")]
    pub one: Option<ConnectionPoint>,
    #[serde(rename = "2", skip_serializing_if = "Option::is_none")]
    pub two: Option<ConnectionPoint>,
    #[serde(rename = "Cu0", skip_serializing_if = "Option::is_none")]
    pub cu0: Option<Vec<CopperConnection>>,
    #[serde(rename = "Cu1", skip_serializing_if = "Option::is_none")]
    pub cu1: Option<Vec<CopperConnection>>,
}

impl Connections {
    /// Returns the circuit terminals that are present.
    pub fn points(&self) -> impl Iterator<Item = &ConnectionPoint> {
        self.one.iter().chain(self.two.iter())
    }

    /// Returns the terminal with the given circuit id (1 or 2), creating it.
    pub fn point_mut(&mut self, circuit_id: u8) -> &mut ConnectionPoint {
        let slot = if circuit_id == 2 { &mut self.two } else { &mut self.one };
        slot.get_or_insert_with(ConnectionPoint::default)
    }
}

/// Wires leaving one terminal, by color.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectionPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<Vec<ConnectionData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<Vec<ConnectionData>>,
}

impl ConnectionPoint {
    /// Returns every wire leaving this terminal, red first.
    pub fn all(&self) -> impl Iterator<Item = &ConnectionData> {
        self.red.iter().flatten().chain(self.green.iter().flatten())
    }
}

/// The far end of a circuit wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionData {
    pub entity_id: u32,
    /// Terminal on the far entity; left out when it is terminal 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_id: Option<u8>,
}

/// The far end of a copper wire attached to a power switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopperConnection {
    pub entity_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_id: Option<u8>,
}

/// An item filter slot.
///
/// Covers inventory slot filters (`index`, `name`), filter inserters (plus
/// `quality`, `comparator`) and infinity-style requests (`count`, `mode`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
}

/// Slot filters and limit of a cargo wagon, car trunk or turret.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<ItemFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<u32>,
}

/// Infinity chest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfinitySettings {
    pub remove_unfiltered_items: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<InfinityFilter>>,
}

/// Infinity chest slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfinityFilter {
    pub name: String,
    pub count: u32,
    /// `"at-least"`, `"at-most"` or `"exactly"`.
    pub mode: String,
    pub index: u32,
}

/// Requests of a requester or buffer chest.
///
/// 1.x exports a flat list of filters; 2.0 exports logistic sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestFilters {
    Legacy(Vec<LogisticFilter>),
    Sections(LogisticSections),
}

/// Programmable speaker playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerParameters {
    pub playback_volume: f64,
    pub playback_globally: bool,
    pub allow_polyphony: bool,
}

/// Programmable speaker alert settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerAlertParameters {
    pub show_alert: bool,
    pub show_on_map: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_signal_id: Option<SignalId>,
    pub alert_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_entity_json() {
        let entity = Entity::new(1, "assembling-machine-3", Position::new(-100.5, -222.5));
        assert_eq!(
            serde_json::to_string(&entity).unwrap(),
            r#"{"entity_number":1,"name":"assembling-machine-3","position":{"x":-100.5,"y":-222.5}}"#
        );
    }

    #[test]
    fn test_direction_zero_is_not_absent() {
        let mut entity = Entity::new(1, "inserter", Position::new(0.5, 0.5));
        entity.direction = Some(0);
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains(r#""direction":0"#));

        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.direction, Some(0));

        let absent: Entity =
            serde_json::from_str(r#"{"entity_number":1,"name":"inserter","position":{"x":0.5,"y":0.5}}"#)
                .unwrap();
        assert_eq!(absent.direction, None);
    }

    #[test]
    fn test_empty_collection_is_kept() {
        let mut entity = Entity::new(3, "small-electric-pole", Position::new(0.5, 0.5));
        entity.neighbours = Some(Vec::new());
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains(r#""neighbours":[]"#));
    }

    #[test]
    fn test_neighbors_alias() {
        let entity: Entity = serde_json::from_str(
            r#"{"entity_number":1,"name":"medium-electric-pole","position":{"x":0.5,"y":0.5},"neighbors":[2,3]}"#,
        )
        .unwrap();
        assert_eq!(entity.neighbours, Some(vec![2, 3]));
    }

    #[test]
    fn test_connections_shape() {
        let json = r#"{
            "entity_number": 1,
            "name": "decider-combinator",
            "position": {"x": 0, "y": 0.5},
            "connections": {
                "1": {"red": [{"entity_id": 2}]},
                "2": {"green": [{"entity_id": 3, "circuit_id": 1}]}
            }
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        let connections = entity.connections.as_ref().unwrap();
        assert_eq!(connections.one.as_ref().unwrap().red.as_ref().unwrap()[0].entity_id, 2);
        assert_eq!(
            connections.two.as_ref().unwrap().green.as_ref().unwrap()[0],
            ConnectionData { entity_id: 3, circuit_id: Some(1) }
        );
        assert_eq!(entity.connected_entities().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_request_filters_both_layouts() {
        let sections: RequestFilters = serde_json::from_str(r#"{"sections":[{"index":1}]}"#).unwrap();
        assert!(matches!(sections, RequestFilters::Sections(_)));

        let legacy: RequestFilters =
            serde_json::from_str(r#"[{"index":1,"name":"iron-plate","count":100}]"#).unwrap();
        match legacy {
            RequestFilters::Legacy(filters) => assert_eq!(filters[0].count, Some(100)),
            other => panic!("expected legacy filters, got {other:?}"),
        }
    }

    #[test]
    fn test_tags_pass_through() {
        let json = r#"{"entity_number":1,"name":"chest","position":{"x":0.5,"y":0.5},"tags":{"mod":{"nested":[1,2]}}}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(
            serde_json::to_value(&entity).unwrap()["tags"]["mod"]["nested"],
            serde_json::json!([1, 2])
        );
    }
}
