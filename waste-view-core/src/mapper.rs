//! Turns entity states into display records.

use tracing::debug;

use crate::model::{DisplayRecord, EntityKey, Snapshot, State, WasteType};

/// Build one display record per entity that currently has a state.
///
/// Records keep the order of `entity_keys`; entities missing from the snapshot are
/// skipped without error.
#[must_use]
pub fn build_display_records(entity_keys: &[EntityKey], snapshot: &Snapshot) -> Vec<DisplayRecord> {
    entity_keys
        .iter()
        .filter_map(|key| {
            let Some(state) = snapshot.get(key) else {
                debug!(entity_id = %key, "entity has no state, skipping");
                return None;
            };
            Some(display_record(key, state))
        })
        .collect()
}

/// Map a single entity state to a display record.
///
/// Every attribute is optional. Absent, empty, or mistyped attributes are left unset.
#[must_use]
pub fn display_record(key: &EntityKey, state: &State) -> DisplayRecord {
    DisplayRecord {
        entity_id: key.clone(),
        name: text_attribute(state, "friendly_name").unwrap_or_else(|| key.to_string()),
        date: state.state.clone(),
        days_until: state.attribute("days_until"),
        day_of_week: text_attribute(state, "day_of_week"),
        formatted_date: text_attribute(state, "formatted_date"),
        waste_type: text_attribute(state, "waste_type").map(WasteType::from),
        is_today: state.attribute("is_today").unwrap_or(false),
        is_tomorrow: state.attribute("is_tomorrow").unwrap_or(false),
    }
}

fn text_attribute(state: &State, key: &str) -> Option<String> {
    state
        .attribute::<String>(key)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snapshot() -> Snapshot {
        serde_json::from_value(json!({
            "sensor.auckland_waste_rubbish": {
                "state": "2025-10-08",
                "attributes": {
                    "friendly_name": "Auckland Waste (702) Rubbish",
                    "date": "2025-10-08",
                    "day_of_week": "Wednesday",
                    "formatted_date": "Wednesday, 08 October",
                    "days_until": 1,
                    "is_today": false,
                    "is_tomorrow": true,
                    "waste_type": "rubbish",
                    "area_number": "702"
                }
            },
            "sensor.bare": { "state": "unknown" }
        }))
        .unwrap()
    }

    #[test]
    fn test_full_record() {
        let records = build_display_records(&[EntityKey::from("sensor.auckland_waste_rubbish")], &snapshot());

        assert_eq!(
            records,
            [DisplayRecord {
                entity_id: EntityKey::from("sensor.auckland_waste_rubbish"),
                name: "Auckland Waste (702) Rubbish".to_owned(),
                date: "2025-10-08".to_owned(),
                days_until: Some(1),
                day_of_week: Some("Wednesday".to_owned()),
                formatted_date: Some("Wednesday, 08 October".to_owned()),
                waste_type: Some(WasteType::Rubbish),
                is_today: false,
                is_tomorrow: true,
            }]
        );
    }

    #[test]
    fn test_missing_attributes_are_unset() {
        let records = build_display_records(&[EntityKey::from("sensor.bare")], &snapshot());
        let [record] = records.as_slice() else {
            panic!("expected exactly one record, got {records:?}");
        };

        assert_eq!(record.name, "sensor.bare");
        assert_eq!(record.date, "unknown");
        assert_eq!(record.days_until, None);
        assert_eq!(record.formatted_date, None);
        assert_eq!(record.waste_type, None);
        assert!(!record.is_today);
        assert!(!record.is_tomorrow);
    }

    #[test]
    fn test_entities_without_state_are_dropped() {
        let keys = [
            EntityKey::from("sensor.gone"),
            EntityKey::from("sensor.bare"),
            EntityKey::from("sensor.auckland_waste_rubbish"),
        ];
        let records = build_display_records(&keys, &snapshot());

        let ids: Vec<&str> = records.iter().map(|record| record.entity_id.as_str()).collect();
        assert_eq!(ids, ["sensor.bare", "sensor.auckland_waste_rubbish"]);
    }
}
