//! Train schedules.

use serde::{Deserialize, Serialize};

use crate::model::control::CircuitCondition;

/// The schedule shared by a group of locomotives in the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub schedule: Vec<ScheduleRecord>,
    /// Entity numbers of the locomotives running this schedule.
    pub locomotives: Vec<u32>,
}

/// One station stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub station: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_conditions: Option<Vec<WaitCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,
}

open_enum! {
    /// What a wait condition waits for.
    pub enum WaitConditionType {
        Time => "time",
        Inactivity => "inactivity",
        Full => "full",
        Empty => "empty",
        ItemCount => "item_count",
        FluidCount => "fluid_count",
        Circuit => "circuit",
        RobotsInactive => "robots_inactive",
        PassengerPresent => "passenger_present",
        PassengerNotPresent => "passenger_not_present",
        FuelItemCountAll => "fuel_item_count_all",
        FuelFull => "fuel_full",
        DestinationFullOrNoPath => "destination_full_or_no_path",
        SpecificDestinationFull => "specific_destination_full",
        SpecificDestinationNotFull => "specific_destination_not_full",
    }
}

/// A departure condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitCondition {
    #[serde(rename = "type")]
    pub kind: WaitConditionType,
    /// `"and"` or `"or"` relative to the previous condition.
    pub compare_type: String,
    /// For `time` and `inactivity`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<u32>,
    /// For `item_count`, `fluid_count` and `circuit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<CircuitCondition>,
}

impl WaitCondition {
    /// Waits for a fixed number of ticks.
    pub fn time(ticks: u32) -> Self {
        Self {
            kind: WaitConditionType::Time,
            compare_type: "or".to_string(),
            ticks: Some(ticks),
            condition: None,
        }
    }

    /// Waits for a circuit condition.
    pub fn circuit(condition: CircuitCondition) -> Self {
        Self {
            kind: WaitConditionType::Circuit,
            compare_type: "or".to_string(),
            ticks: None,
            condition: Some(condition),
        }
    }

    /// Joins this condition to the previous one with "and".
    pub fn and(mut self) -> Self {
        self.compare_type = "and".to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::SignalId;
    use crate::model::control::Comparator;

    #[test]
    fn test_schedule_json() {
        let json = r#"{
            "schedule": [
                {"station": "Iron Pickup", "wait_conditions": [{"type": "full", "compare_type": "or"}]},
                {"station": "Iron Drop", "wait_conditions": [
                    {"type": "empty", "compare_type": "or"},
                    {"type": "inactivity", "compare_type": "and", "ticks": 300}
                ]},
                {"station": "Depot", "temporary": true}
            ],
            "locomotives": [1, 2]
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.locomotives, vec![1, 2]);
        assert_eq!(schedule.schedule.len(), 3);

        let drop = &schedule.schedule[1].wait_conditions.as_ref().unwrap()[1];
        assert_eq!(drop.kind, WaitConditionType::Inactivity);
        assert_eq!(drop.ticks, Some(300));
        assert_eq!(schedule.schedule[2].wait_conditions, None);
        assert_eq!(schedule.schedule[2].temporary, Some(true));
    }

    #[test]
    fn test_circuit_wait_condition() {
        let condition = WaitCondition::circuit(CircuitCondition::constant(
            SignalId::virtual_signal("signal-G"),
            Comparator::Equal,
            1,
        ))
        .and();
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["type"], "circuit");
        assert_eq!(value["compare_type"], "and");
        assert!(value.get("ticks").is_none());
        assert_eq!(value["condition"]["comparator"], "=");
    }

    #[test]
    fn test_unknown_condition_type() {
        let condition: WaitCondition =
            serde_json::from_str(r#"{"type":"at_station","compare_type":"or"}"#).unwrap();
        assert_eq!(condition.kind, WaitConditionType::Other("at_station".to_string()));
    }
}
