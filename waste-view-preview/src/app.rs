use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::info;
use waste_view_core::{CardView, Snapshot, WasteCard};

use crate::source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Rows,
    Markup,
}

pub(crate) struct App {
    pub card: WasteCard,
    pub config_path: PathBuf,
    pub snapshot_path: PathBuf,

    pub screen: Screen,
    pub snapshot: Snapshot,
    pub view: Option<CardView>,
    pub pushed_at: Option<DateTime<Local>>,
    pub markup_scroll: u16,

    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(card: WasteCard, config_path: PathBuf, snapshot_path: PathBuf) -> Self {
        Self {
            card,
            config_path,
            snapshot_path,
            screen: Screen::Rows,
            snapshot: Snapshot::new(),
            view: None,
            pushed_at: None,
            markup_scroll: 0,
            error_message: None,
        }
    }

    /// Read the configuration file and hand it to the card.
    pub(crate) fn load_config(&mut self) -> Result<()> {
        let config = source::load_config(&self.config_path)?;
        let applied = self.card.set_config(config);
        // A rejected configuration blanks the card, so the view has to follow.
        self.view = self.card.view(&self.snapshot);
        applied?;
        Ok(())
    }

    /// Read the snapshot file and push it to the card like a host state change.
    pub(crate) fn reload_snapshot(&mut self) -> Result<()> {
        self.snapshot = source::load_snapshot(&self.snapshot_path)?;
        self.push()
    }

    /// Push the current snapshot to the card again.
    pub(crate) fn push(&mut self) -> Result<()> {
        self.card.update(&self.snapshot)?;
        self.view = self.card.view(&self.snapshot);
        self.pushed_at = Some(Local::now());
        info!(
            entities = self.snapshot.len(),
            rows = self.view.as_ref().map_or(0, |view| view.rows.len()),
            "pushed snapshot to card"
        );
        Ok(())
    }

    pub(crate) fn markup(&self) -> &str {
        self.card.surface().markup().unwrap_or_default()
    }

    pub(crate) fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Rows => Screen::Markup,
            Screen::Markup => Screen::Rows,
        };
        self.markup_scroll = 0;
    }
}
