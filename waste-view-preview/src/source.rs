//! Reading card configurations and state snapshots from disk.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::warn;
use waste_view_core::{EntityKey, Snapshot, State};

/// Load a card configuration written as YAML or JSON.
pub(crate) fn load_config(path: &Path) -> Result<Value> {
    let text = read(path)?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("invalid card configuration in {}", path.display()))
}

/// Load a state snapshot written as YAML or JSON.
pub(crate) fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = read(path)?;
    let document: Value = serde_yaml::from_str(&text)
        .with_context(|| format!("cannot parse state snapshot {}", path.display()))?;
    parse_snapshot(document)
        .with_context(|| format!("invalid state snapshot in {}", path.display()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Snapshot documents are either an entity-key map or a `/api/states` style list.
fn parse_snapshot(document: Value) -> Result<Snapshot> {
    match document {
        Value::Null => Ok(Snapshot::new()),
        Value::Object(entries) => entries
            .into_iter()
            .filter_map(|(key, entry)| entity_state(EntityKey::from(key), entry).transpose())
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| listed_state(index, item).transpose())
            .collect(),
        _ => bail!("expected a map of entity states or a list of states"),
    }
}

fn listed_state(index: usize, item: Value) -> Result<Option<(EntityKey, State)>> {
    let Some(Value::String(entity_id)) = item.get("entity_id").cloned() else {
        bail!("state #{index} has no entity_id");
    };
    entity_state(EntityKey::from(entity_id), item)
}

// Scalar states become text the way the host stores them; stateless entries are skipped.
fn entity_state(key: EntityKey, entry: Value) -> Result<Option<(EntityKey, State)>> {
    let Value::Object(mut fields) = entry else {
        bail!("entity {key} is not a map with a state");
    };

    let state = match fields.remove("state") {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | None => {
            warn!(entity = %key, "skipping entity without a state");
            return Ok(None);
        }
        Some(_) => bail!("entity {key} has a state that is not a scalar"),
    };

    let attributes: HashMap<String, Value> = match fields.remove("attributes") {
        Some(Value::Object(attributes)) => attributes.into_iter().collect(),
        Some(Value::Null) | None => HashMap::new(),
        Some(_) => bail!("attributes of entity {key} are not a map"),
    };

    Ok(Some((key, State::new(state, attributes))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Snapshot> {
        parse_snapshot(serde_yaml::from_str(text).unwrap())
    }

    fn keys(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.iter().map(|(key, _)| key.as_str()).collect()
    }

    #[test]
    fn test_map_snapshot() {
        let snapshot = parse(
            "sensor.auckland_waste_rubbish:\n  state: '2025-10-08'\n  attributes:\n    days_until: 2\n",
        )
        .unwrap();
        let state = snapshot
            .get(&EntityKey::from("sensor.auckland_waste_rubbish"))
            .unwrap();
        assert_eq!(state.state, "2025-10-08");
        assert_eq!(state.attribute::<i64>("days_until"), Some(2));
    }

    #[test]
    fn test_state_list_snapshot() {
        let snapshot = parse(
            r#"[{"entity_id": "sensor.b", "state": "x", "last_changed": "2025-10-08T00:00:00Z"},
                {"entity_id": "sensor.a", "state": "y", "attributes": {"area_number": "702"}}]"#,
        )
        .unwrap();
        assert_eq!(keys(&snapshot), ["sensor.b", "sensor.a"]);
    }

    #[test]
    fn test_scalar_states_become_text() {
        let snapshot = parse(
            "sensor.auckland_waste_rubbish: {state: '2025-10-08', attributes: {waste_type: rubbish}}\n\
             sensor.kitchen_temperature: {state: 21.5}\n\
             binary_sensor.door: {state: true}\n",
        )
        .unwrap();

        assert_eq!(
            keys(&snapshot),
            [
                "sensor.auckland_waste_rubbish",
                "sensor.kitchen_temperature",
                "binary_sensor.door"
            ]
        );
        let temperature = snapshot
            .get(&EntityKey::from("sensor.kitchen_temperature"))
            .unwrap();
        assert_eq!(temperature.state, "21.5");
        let door = snapshot.get(&EntityKey::from("binary_sensor.door")).unwrap();
        assert_eq!(door.state, "true");
    }

    #[test]
    fn test_stateless_entity_is_skipped() {
        let snapshot = parse("sensor.a: {state: '1'}\nsensor.b: {attributes: {}}\nsensor.c: {state: ~}\n")
            .unwrap();
        assert_eq!(keys(&snapshot), ["sensor.a"]);
    }

    #[test]
    fn test_errors_name_the_entity() {
        let err = parse("sensor.a: {state: '1'}\nsensor.broken: {state: [1, 2]}\n").unwrap_err();
        assert!(format!("{err:#}").contains("sensor.broken"), "{err:#}");

        let err = parse("sensor.listed: {state: '1', attributes: [1]}\n").unwrap_err();
        assert!(format!("{err:#}").contains("sensor.listed"), "{err:#}");

        let err = parse(r#"[{"state": "1"}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("#0"), "{err:#}");

        assert!(parse("just text").is_err());
    }
}
