//! Small value types shared by many records.

use serde::{Deserialize, Serialize};

/// A map position in tiles. Entity centers sit on half-tile offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An RGBA color with components in `0.0..=1.0` (some exports use `0..=255`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha; older exports leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: Some(1.0) }
    }

    /// Creates a color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }
}

open_enum! {
    /// Namespace of a signal name.
    pub enum SignalType {
        Item => "item",
        Fluid => "fluid",
        Virtual => "virtual",
        Entity => "entity",
        Recipe => "recipe",
        SpaceLocation => "space-location",
        AsteroidChunk => "asteroid-chunk",
        Quality => "quality",
    }
}

/// Identifies a circuit network signal or an icon.
///
/// A missing `type` means "item" to the game, but the absence is kept as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalId {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SignalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl SignalId {
    /// A signal with no explicit type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            quality: None,
        }
    }

    /// An item signal.
    pub fn item(name: impl Into<String>) -> Self {
        Self::typed(name, SignalType::Item)
    }

    /// A fluid signal.
    pub fn fluid(name: impl Into<String>) -> Self {
        Self::typed(name, SignalType::Fluid)
    }

    /// A virtual signal such as `signal-A` or `signal-each`.
    pub fn virtual_signal(name: impl Into<String>) -> Self {
        Self::typed(name, SignalType::Virtual)
    }

    fn typed(name: impl Into<String>, kind: SignalType) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            quality: None,
        }
    }
}

/// One of the (up to four) icons shown for a blueprint or book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    /// 1-based slot.
    pub index: u8,
    pub signal: SignalId,
}

/// A placed tile (concrete, landfill, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_without_type_omits_key() {
        let json = serde_json::to_string(&SignalId::named("assembling-machine-3")).unwrap();
        assert_eq!(json, r#"{"name":"assembling-machine-3"}"#);
    }

    #[test]
    fn test_signal_type_roundtrip() {
        let json = serde_json::to_string(&SignalId::virtual_signal("signal-A")).unwrap();
        assert_eq!(json, r#"{"name":"signal-A","type":"virtual"}"#);

        let back: SignalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, Some(SignalType::Virtual));
    }

    #[test]
    fn test_unknown_signal_type_is_kept() {
        let signal: SignalId = serde_json::from_str(r#"{"name":"x","type":"planet"}"#).unwrap();
        assert_eq!(signal.kind, Some(SignalType::Other("planet".to_string())));
        assert_eq!(
            serde_json::to_string(&signal).unwrap(),
            r#"{"name":"x","type":"planet"}"#
        );
    }

    #[test]
    fn test_color_alpha_optional() {
        let color: Color = serde_json::from_str(r#"{"r":1,"g":0.5,"b":0}"#).unwrap();
        assert_eq!(color.a, None);
        assert_eq!(serde_json::to_string(&color).unwrap(), r#"{"r":1.0,"g":0.5,"b":0.0}"#);
    }
}
