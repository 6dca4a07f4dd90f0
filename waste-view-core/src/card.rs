//! The waste collection card component driven by host pushes.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{CardConfig, RawCardConfig};
use crate::mapper::build_display_records;
use crate::model::Snapshot;
use crate::ports::{CardError, DisplaySurface, MarkupBuffer};
use crate::render::{CardView, DEFAULT_TITLE, Renderer};
use crate::resolver::resolve_entities;

/// Card type under which the component registers.
pub const CARD_TYPE: &str = "auckland-waste-card";
/// Display name shown in the host's card picker.
pub const CARD_NAME: &str = "Auckland Waste Card";
/// Description shown in the host's card picker.
pub const CARD_DESCRIPTION: &str = "A card to display Auckland waste collection days";
/// Layout size hint, in host layout units.
pub const CARD_SIZE: u32 = 3;
/// Element name of the configuration editor the host may create.
pub const EDITOR_ELEMENT: &str = "auckland-waste-card-editor";

/// Card showing upcoming waste collections for a set of sensors.
///
/// The host calls [`WasteCard::set_config`] once and then [`WasteCard::update`] with every
/// new snapshot. Each update renders synchronously into the card's surface.
pub struct WasteCard<S = MarkupBuffer> {
    config: Option<CardConfig>,
    renderer: Renderer,
    surface: S,
}

impl WasteCard<MarkupBuffer> {
    /// Create an unconfigured card rendering into an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Template`] if the card template fails to compile.
    pub fn new() -> Result<Self, CardError> {
        Self::with_surface(MarkupBuffer::default())
    }
}

impl<S: DisplaySurface> WasteCard<S> {
    /// Create an unconfigured card rendering into `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Template`] if the card template fails to compile.
    pub fn with_surface(surface: S) -> Result<Self, CardError> {
        Ok(Self {
            config: None,
            renderer: Renderer::new()?,
            surface,
        })
    }

    /// Validate and store the configuration supplied by the host.
    ///
    /// A rejected configuration also discards the previous one, so the card stays
    /// blank until it is configured again.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Config`] when the configuration selects no entities or is
    /// malformed.
    pub fn set_config(&mut self, config: Value) -> Result<(), CardError> {
        match CardConfig::from_value(config) {
            Ok(config) => {
                debug!(?config, "card configured");
                self.config = Some(config);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "rejected card configuration");
                self.config = None;
                Err(err.into())
            }
        }
    }

    /// Current configuration, if the card has been set up.
    #[must_use]
    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    /// Build the view model for `snapshot` without touching the surface.
    ///
    /// Returns `None` while the card is unconfigured.
    #[must_use]
    pub fn view(&self, snapshot: &Snapshot) -> Option<CardView> {
        let config = self.config.as_ref()?;
        let entities = resolve_entities(config.selection(), snapshot);
        let records = build_display_records(&entities, snapshot);
        Some(CardView::new(config.title(), &records))
    }

    /// Render `snapshot` and replace the surface contents with the result.
    ///
    /// Returns `false` without rendering while the card is unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Template`] if template evaluation fails; the surface keeps
    /// its previous contents in that case.
    pub fn update(&mut self, snapshot: &Snapshot) -> Result<bool, CardError> {
        let Some(view) = self.view(snapshot) else {
            debug!("card has no configuration yet, skipping render");
            return Ok(false);
        };

        let markup = self.renderer.render_view(&view)?;
        debug!(rows = view.rows.len(), "rendered waste card");
        self.surface.replace(markup);
        Ok(true)
    }

    /// Surface the card renders into.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Layout size hint for the host.
    #[must_use]
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Element name of the configuration editor.
    #[must_use]
    pub fn config_element() -> &'static str {
        EDITOR_ELEMENT
    }

    /// Configuration offered when a user adds the card from the picker.
    #[must_use]
    pub fn stub_config() -> RawCardConfig {
        RawCardConfig {
            title: Some(DEFAULT_TITLE.to_owned()),
            entities: Some(Vec::new()),
            area_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::model::State;
    use crate::render::NO_DATA_MESSAGE;

    fn snapshot() -> Snapshot {
        serde_json::from_value(json!({
            "sensor.auckland_waste_food_waste": {
                "state": "2025-10-08",
                "attributes": { "waste_type": "food-waste", "days_until": 0, "is_today": true }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_update_before_config_is_noop() {
        let mut card = WasteCard::new().unwrap();
        assert!(!card.update(&snapshot()).unwrap());
        assert_eq!(card.surface().markup(), None);
        assert_eq!(card.surface().renders(), 0);
    }

    #[test]
    fn test_each_update_renders_once() {
        let mut card = WasteCard::new().unwrap();
        card.set_config(json!({ "entities": ["sensor.auckland_waste_food_waste"] }))
            .unwrap();

        let mut states = snapshot();
        assert!(card.update(&states).unwrap());
        assert!(card.surface().markup().unwrap().contains("Today!"));

        states.insert(
            "sensor.auckland_waste_food_waste",
            State::new("2025-10-15", HashMap::new()),
        );
        assert!(card.update(&states).unwrap());
        let markup = card.surface().markup().unwrap();
        assert!(!markup.contains("Today!"));
        assert!(markup.contains("2025-10-15"));

        assert!(card.update(&Snapshot::new()).unwrap());
        assert_eq!(card.surface().renders(), 3);
        assert!(card.surface().markup().unwrap().contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_rejected_config_clears_previous() {
        let mut card = WasteCard::new().unwrap();
        card.set_config(json!({ "area_number": "702" })).unwrap();
        assert!(card.config().is_some());

        let err = card.set_config(json!({ "title": "Bins" })).unwrap_err();
        assert!(matches!(err, CardError::Config(_)), "{err}");
        assert!(card.config().is_none());
        assert!(!card.update(&snapshot()).unwrap());
    }

    #[test]
    fn test_stub_config_is_valid() {
        let stub = serde_json::to_value(WasteCard::<MarkupBuffer>::stub_config()).unwrap();
        assert_eq!(stub, json!({ "title": "Waste Collection", "entities": [] }));

        let mut card = WasteCard::new().unwrap();
        card.set_config(stub).unwrap();
        assert_eq!(card.card_size(), 3);
        assert_eq!(WasteCard::<MarkupBuffer>::config_element(), "auckland-waste-card-editor");
    }
}
