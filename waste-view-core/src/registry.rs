//! Registry of card types the host can discover and instantiate.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::card::{CARD_DESCRIPTION, CARD_NAME, CARD_TYPE, WasteCard};
use crate::ports::CardError;

/// Constructor for a fresh, unconfigured card.
pub type CardFactory = fn() -> Result<WasteCard, CardError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Picker entry describing a card type.
pub struct CardInfo {
    /// Card type used in dashboard configurations.
    #[serde(rename = "type")]
    pub card_type: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Whether the picker may render a live preview.
    pub preview: bool,
}

/// Picker metadata plus the constructor of one card type.
pub struct CardRegistration {
    /// Static metadata describing the card.
    pub info: CardInfo,
    /// Creates new card instances.
    pub factory: CardFactory,
}

#[derive(Default)]
/// Card types known to the host, in registration order.
pub struct CardRegistry {
    cards: IndexMap<String, CardRegistration>,
}

impl CardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card type.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::DuplicateCardType`] when the type is already registered.
    pub fn register(&mut self, registration: CardRegistration) -> Result<(), CardError> {
        let card_type = registration.info.card_type.clone();
        if self.cards.contains_key(&card_type) {
            return Err(CardError::DuplicateCardType(card_type));
        }
        self.cards.insert(card_type, registration);
        Ok(())
    }

    /// Return metadata for all registered card types.
    #[must_use]
    pub fn cards(&self) -> Vec<CardInfo> {
        self.cards_iter().cloned().collect()
    }

    /// Iterator over card metadata.
    pub fn cards_iter(&self) -> impl Iterator<Item = &CardInfo> {
        self.cards.values().map(|registration| &registration.info)
    }

    /// Instantiate a card of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::UnknownCardType`] when no such type is registered, or the
    /// factory's own error.
    pub fn create(&self, card_type: &str) -> Result<WasteCard, CardError> {
        let registration = self
            .cards
            .get(card_type)
            .ok_or_else(|| CardError::UnknownCardType(card_type.to_owned()))?;
        (registration.factory)()
    }
}

/// Register the waste collection card and log its identification banner.
///
/// Call once during startup.
///
/// # Errors
///
/// Returns [`CardError::DuplicateCardType`] if the card was registered before.
pub fn register(registry: &mut CardRegistry) -> Result<(), CardError> {
    registry.register(CardRegistration {
        info: CardInfo {
            card_type: CARD_TYPE.to_owned(),
            name: CARD_NAME.to_owned(),
            description: CARD_DESCRIPTION.to_owned(),
            preview: true,
        },
        factory: WasteCard::new,
    })?;

    info!("{}", banner());
    Ok(())
}

/// Identification line logged once when the card is registered.
#[must_use]
pub fn banner() -> String {
    format!("AUCKLAND-WASTE-CARD v{}", env!("CARGO_PKG_VERSION"))
}
