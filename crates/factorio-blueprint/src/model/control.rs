//! Control behavior: circuit network and logistic configuration of entities.
//!
//! `ControlBehavior` is the union of the configuration blocks of every
//! circuit-connectable entity (lamps, inserters, belts, train stops,
//! roboports, combinators, speakers, ...). Only the fields relevant to the
//! owning entity are ever set.

use serde::{Deserialize, Serialize};

use crate::model::common::SignalId;

open_enum! {
    /// Comparison operator of a circuit condition.
    pub enum Comparator {
        Less => "<",
        Greater => ">",
        Equal => "=",
        GreaterOrEqual => "≥",
        LessOrEqual => "≤",
        NotEqual => "≠",
    }
}

/// `first_signal <comparator> (second_signal | constant)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<i32>,
}

impl CircuitCondition {
    /// Compares a signal against a constant.
    pub fn constant(signal: SignalId, comparator: Comparator, constant: i32) -> Self {
        Self {
            comparator: Some(comparator),
            first_signal: Some(signal),
            second_signal: None,
            constant: Some(constant),
        }
    }
}

/// A request or constant-combinator slot in a logistic section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticFilter {
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<i64>,
}

/// One logistic section (a named or anonymous group of requests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticSection {
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<LogisticFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// The logistic sections of a requester, buffer chest, or constant combinator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogisticSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<LogisticSection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash_not_requested: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_from_buffers: Option<bool>,
}

/// A constant combinator slot in the pre-sections format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantFilter {
    pub index: u32,
    pub signal: SignalId,
    pub count: i32,
}

/// Arithmetic combinator configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArithmeticConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_constant: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_constant: Option<i32>,
    /// `+`, `-`, `*`, `/`, `%`, `^`, `<<`, `>>`, `AND`, `OR`, `XOR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_signal: Option<SignalId>,
}

/// One row of a multi-condition decider combinator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeciderCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    /// `"and"` or `"or"` relative to the previous row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_type: Option<String>,
}

/// One output of a multi-condition decider combinator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeciderOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_count_from_input: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<i32>,
}

/// Decider combinator configuration.
///
/// Holds both the single-condition layout (`first_signal`, `comparator`, ...)
/// and the multi-condition layout (`conditions`, `outputs`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeciderConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_count_from_input: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<DeciderCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<DeciderOutput>>,
}

/// Programmable speaker note selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeakerCircuitParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_value_is_pitch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<u32>,
}

/// Circuit and logistic network configuration of an entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlBehavior {
    // Generic enable/disable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logistic_condition: Option<CircuitCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_to_logistic_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_condition: Option<CircuitCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_enable_disable: Option<bool>,

    // Rail signals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_close_signal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_read_signal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orange_output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue_output_signal: Option<SignalId>,

    // Train stops
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_to_train: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_from_train: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_stopped_train: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_stopped_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_trains_limit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trains_limit_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_trains_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trains_count_signal: Option<SignalId>,

    // Roboports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_logistics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_robot_stats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_logistic_output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_logistic_output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_construction_output_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_construction_output_signal: Option<SignalId>,

    // Gates and walls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_open_gate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_read_sensor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_signal: Option<SignalId>,

    // Inserters, belts, containers, drills
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_read_hand_contents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_contents_read_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_mode_of_operation: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_hand_read_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_set_stack_size: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_control_input_signal: Option<SignalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_read_resources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_resource_read_mode: Option<u8>,

    // Combinators, lamps, speakers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<ConstantFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<LogisticSections>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arithmetic_conditions: Option<ArithmeticConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decider_conditions: Option<DeciderConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_parameters: Option<SpeakerCircuitParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_colors: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_behavior_is_empty_object() {
        let json = serde_json::to_string(&ControlBehavior::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_lamp_condition() {
        let behavior = ControlBehavior {
            circuit_condition: Some(CircuitCondition::constant(
                SignalId::virtual_signal("signal-A"),
                Comparator::Greater,
                0,
            )),
            use_colors: Some(true),
            ..Default::default()
        };

        let value = serde_json::to_value(&behavior).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "circuit_condition": {
                    "comparator": ">",
                    "first_signal": {"name": "signal-A", "type": "virtual"},
                    "constant": 0
                },
                "use_colors": true
            })
        );
    }

    #[test]
    fn test_unicode_comparators() {
        let condition: CircuitCondition =
            serde_json::from_str(r#"{"comparator":"≥","constant":5}"#).unwrap();
        assert_eq!(condition.comparator, Some(Comparator::GreaterOrEqual));

        let condition: CircuitCondition = serde_json::from_str(r#"{"comparator":">="}"#).unwrap();
        assert_eq!(condition.comparator, Some(Comparator::Other(">=".to_string())));
    }

    #[test]
    fn test_decider_multi_condition() {
        let json = r#"{
            "conditions": [
                {"first_signal": {"name": "signal-each", "type": "virtual"}, "comparator": "<", "constant": 10},
                {"first_signal": {"name": "iron-plate", "type": "item"}, "comparator": ">", "constant": 0, "compare_type": "and"}
            ],
            "outputs": [{"signal": {"name": "signal-each", "type": "virtual"}}]
        }"#;
        let decider: DeciderConditions = serde_json::from_str(json).unwrap();
        let conditions = decider.conditions.as_ref().unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[1].compare_type.as_deref(), Some("and"));
        assert_eq!(decider.outputs.unwrap()[0].copy_count_from_input, None);
    }
}
