//! Seams between the card and its host: the display surface and shared error type.

use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced to the host.
pub enum CardError {
    /// Configuration was rejected at setup time.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The markup template failed to compile or evaluate.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    /// No card is registered under the requested type.
    #[error("Unknown card type: {0}")]
    UnknownCardType(String),
    /// A card type was registered twice.
    #[error("Card type already registered: {0}")]
    DuplicateCardType(String),
}

/// Output area owned by one card instance.
pub trait DisplaySurface {
    /// Replace everything currently shown with `markup`.
    fn replace(&mut self, markup: String);
}

#[derive(Debug, Clone, Default)]
/// Display surface that keeps the most recent markup in memory.
pub struct MarkupBuffer {
    markup: Option<String>,
    renders: usize,
}

impl MarkupBuffer {
    /// Markup of the latest render, or `None` before the first one.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    /// Number of render passes written so far.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl DisplaySurface for MarkupBuffer {
    fn replace(&mut self, markup: String) {
        self.markup = Some(markup);
        self.renders += 1;
    }
}
