//! Domain data structures for sensor states, snapshots, and display records.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity-key prefix shared by every Auckland waste collection sensor.
pub const SENSOR_PREFIX: &str = "sensor.auckland_waste_";

/// Badge icon for waste streams without a dedicated one.
pub const GENERIC_ICON: &str = "📦";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier of one entity in the host's state store, e.g. `sensor.auckland_waste_rubbish`.
pub struct EntityKey(pub String);

impl EntityKey {
    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        EntityKey(key.to_owned())
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        EntityKey(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Current state of a single entity as pushed by the host.
pub struct State {
    /// Raw state value. For waste sensors this is the next collection date.
    pub state: String,
    /// Named attributes attached to the state.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl State {
    /// Create a state from its value and attributes.
    #[must_use]
    pub fn new(state: impl Into<String>, attributes: HashMap<String, Value>) -> Self {
        Self {
            state: state.into(),
            attributes,
        }
    }

    /// Read an attribute as `T`.
    ///
    /// Missing attributes and attributes of a different type both yield `None`.
    #[must_use]
    pub fn attribute<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|value| T::deserialize(value).ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Every entity state known to the host at one point in time.
///
/// Iteration follows the order in which the host supplied the entries.
pub struct Snapshot {
    states: IndexMap<EntityKey, State>,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the state of `key`, returning the previous state if any.
    pub fn insert(&mut self, key: impl Into<EntityKey>, state: State) -> Option<State> {
        self.states.insert(key.into(), state)
    }

    /// Look up the state of a single entity.
    #[must_use]
    pub fn get(&self, key: &EntityKey) -> Option<&State> {
        self.states.get(key)
    }

    /// Iterate over all entries in host order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &State)> {
        self.states.iter()
    }

    /// Number of entities in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the snapshot holds no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(EntityKey, State)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (EntityKey, State)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Collection area identifier, normalized to its textual form.
///
/// Dashboard configurations often carry the number as an integer while the
/// sensors report it as a string, so both normalize to the same value.
pub struct AreaNumber(String);

impl AreaNumber {
    /// Normalize a JSON value into an area number.
    ///
    /// Strings are trimmed and must not be blank; numbers must be non-negative integers.
    /// Every other value yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| AreaNumber(trimmed.to_owned()))
            }
            Value::Number(number) => number.as_u64().map(|area| AreaNumber(area.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for AreaNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Waste streams reported by the collection sensors.
pub enum WasteType {
    /// General rubbish bin.
    Rubbish,
    /// Mixed recycling.
    Recycle,
    /// Food scraps.
    FoodWaste,
    /// Any stream the card has no dedicated icon for.
    Other(String),
}

impl WasteType {
    /// Raw identifier as reported in the `waste_type` attribute.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            WasteType::Rubbish => "rubbish",
            WasteType::Recycle => "recycle",
            WasteType::FoodWaste => "food-waste",
            WasteType::Other(raw) => raw.as_str(),
        }
    }

    /// Icon shown in the round badge of a row.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            WasteType::Rubbish => "🗑️",
            WasteType::Recycle => "♻️",
            WasteType::FoodWaste => "🍎",
            WasteType::Other(_) => GENERIC_ICON,
        }
    }

    /// Human-friendly label; unknown streams pass their raw identifier through.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            WasteType::Rubbish => "Rubbish",
            WasteType::Recycle => "Recycling",
            WasteType::FoodWaste => "Food Waste",
            WasteType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for WasteType {
    fn from(raw: &str) -> Self {
        match raw {
            "rubbish" => WasteType::Rubbish,
            "recycle" => WasteType::Recycle,
            "food-waste" => WasteType::FoodWaste,
            _ => WasteType::Other(raw.to_owned()),
        }
    }
}

impl From<String> for WasteType {
    fn from(raw: String) -> Self {
        WasteType::from(raw.as_str())
    }
}

impl From<WasteType> for String {
    fn from(waste_type: WasteType) -> Self {
        match waste_type {
            WasteType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One row of the card, derived from a single entity state during a render pass.
pub struct DisplayRecord {
    /// Entity the record was built from.
    pub entity_id: EntityKey,
    /// Friendly name of the entity, or its key when the host supplies none.
    pub name: String,
    /// Raw state value, normally the collection date as `YYYY-MM-DD`.
    pub date: String,
    /// Whole days until the collection.
    pub days_until: Option<i64>,
    /// Weekday of the collection, e.g. `Wednesday`.
    pub day_of_week: Option<String>,
    /// Pre-formatted date such as `Wednesday, 08 October`.
    pub formatted_date: Option<String>,
    /// Waste stream collected.
    pub waste_type: Option<WasteType>,
    /// Collection happens today.
    pub is_today: bool,
    /// Collection happens tomorrow.
    pub is_tomorrow: bool,
}
