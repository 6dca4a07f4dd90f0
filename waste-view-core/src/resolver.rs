//! Picks the entities a card displays from the current snapshot.

use tracing::debug;

use crate::config::Selection;
use crate::model::{AreaNumber, EntityKey, SENSOR_PREFIX, Snapshot};

const AREA_NUMBER_ATTRIBUTE: &str = "area_number";

/// Resolve the ordered list of entities to display.
///
/// An explicit list is returned unchanged. In area mode the snapshot is scanned in host
/// order for waste sensors whose `area_number` attribute matches.
#[must_use]
pub fn resolve_entities(selection: &Selection, snapshot: &Snapshot) -> Vec<EntityKey> {
    match selection {
        Selection::Entities(entities) => entities.clone(),
        Selection::Area(area) => entities_in_area(area, snapshot),
    }
}

fn entities_in_area(area: &AreaNumber, snapshot: &Snapshot) -> Vec<EntityKey> {
    let matches: Vec<EntityKey> = snapshot
        .iter()
        .filter(|(key, _)| key.as_str().starts_with(SENSOR_PREFIX))
        .filter(|(_, state)| {
            state
                .attributes
                .get(AREA_NUMBER_ATTRIBUTE)
                .and_then(AreaNumber::from_value)
                .is_some_and(|candidate| candidate == *area)
        })
        .map(|(key, _)| key.clone())
        .collect();

    debug!(%area, matched = matches.len(), "resolved waste sensors by area number");
    matches
}
