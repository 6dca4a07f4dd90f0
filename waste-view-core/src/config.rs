//! Card configuration as stored by the dashboard host, and its validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{AreaNumber, EntityKey};

#[derive(thiserror::Error, Debug)]
/// Reasons a configuration is rejected at setup time.
pub enum ConfigError {
    /// Neither an entity list nor an area number was given.
    #[error("Please define entities or area_number")]
    MissingSelection,
    /// The area number is neither a string nor a non-negative integer.
    #[error("Invalid area_number: {0}")]
    InvalidAreaNumber(String),
    /// The configuration does not have the expected shape.
    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Configuration exactly as the host keeps it in the dashboard layout.
///
/// Keys the card does not know about (such as the host's `type`) are ignored.
pub struct RawCardConfig {
    /// Header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit list of sensors to show, in display order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<EntityKey>>,
    /// Collection area whose sensors are discovered automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_number: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// How the card picks the entities it displays.
pub enum Selection {
    /// Show exactly these entities, in this order.
    Entities(Vec<EntityKey>),
    /// Show every waste sensor reporting this area number.
    Area(AreaNumber),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated configuration of one card instance.
pub struct CardConfig {
    title: Option<String>,
    selection: Selection,
}

impl CardConfig {
    /// Build a configuration directly from an entity selection.
    #[must_use]
    pub fn new(title: Option<String>, selection: Selection) -> Self {
        Self { title, selection }
    }

    /// Validate a JSON-like configuration object supplied by the host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] when the value does not deserialize, and the
    /// errors of [`CardConfig::try_from`] otherwise.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw: RawCardConfig = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    /// Configured header text, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Entity selection mode.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

impl TryFrom<RawCardConfig> for CardConfig {
    type Error = ConfigError;

    /// An explicit entity list (even an empty one) takes precedence over the area number.
    /// A `null` or blank area number counts as absent.
    fn try_from(raw: RawCardConfig) -> Result<Self, Self::Error> {
        if let Some(entities) = raw.entities {
            return Ok(Self::new(raw.title, Selection::Entities(entities)));
        }

        let area = match raw.area_number {
            None => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(value) => Some(
                AreaNumber::from_value(&value)
                    .ok_or_else(|| ConfigError::InvalidAreaNumber(value.to_string()))?,
            ),
        };

        let area = area.ok_or(ConfigError::MissingSelection)?;
        Ok(Self::new(raw.title, Selection::Area(area)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_rejects_missing_selection() {
        for value in [
            json!({}),
            json!({ "title": "Bins" }),
            json!({ "area_number": null }),
            json!({ "area_number": "  " }),
        ] {
            let err = CardConfig::from_value(value).unwrap_err();
            assert!(matches!(err, ConfigError::MissingSelection), "{err}");
        }
    }

    #[test]
    fn test_missing_selection_message() {
        let err = CardConfig::from_value(json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Please define entities or area_number");
    }

    #[test]
    fn test_entities_take_precedence() {
        let config = CardConfig::from_value(json!({
            "type": "custom:auckland-waste-card",
            "entities": ["sensor.b", "sensor.a"],
            "area_number": 5
        }))
        .unwrap();

        assert_eq!(
            config.selection(),
            &Selection::Entities(vec![EntityKey::from("sensor.b"), EntityKey::from("sensor.a")])
        );
        assert_eq!(config.title(), None);
    }

    #[test]
    fn test_empty_entity_list_is_accepted() {
        let config = CardConfig::from_value(json!({ "title": "Waste", "entities": [] })).unwrap();
        assert_eq!(config.selection(), &Selection::Entities(Vec::new()));
        assert_eq!(config.title(), Some("Waste"));
    }

    #[test]
    fn test_area_number_modes() {
        let from_int = CardConfig::from_value(json!({ "area_number": 702 })).unwrap();
        let from_text = CardConfig::from_value(json!({ "area_number": "702" })).unwrap();
        assert_eq!(from_int.selection(), from_text.selection());
    }

    #[test]
    fn test_rejects_invalid_area_number() {
        let err = CardConfig::from_value(json!({ "area_number": { "id": 5 } })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAreaNumber(_)), "{err}");

        let err = CardConfig::from_value(json!({ "area_number": 1.5 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAreaNumber(_)), "{err}");
    }

    #[test]
    fn test_rejects_malformed_entities() {
        let err = CardConfig::from_value(json!({ "entities": [1, 2] })).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)), "{err}");

        let err = CardConfig::from_value(json!("sensor.a")).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)), "{err}");
    }
}
