//! Markup rendering for the card.
//!
//! Row texts are computed here; the HTML template only lays them out. The template is
//! registered under an `.html` name so every interpolated value is HTML-escaped.

use minijinja::Environment;
use serde::Serialize;

use crate::model::{DisplayRecord, GENERIC_ICON, WasteType};

/// Header shown when the configuration has no title.
pub const DEFAULT_TITLE: &str = "Waste Collection";
/// Shown instead of the list when there is nothing to display.
pub const NO_DATA_MESSAGE: &str = "No waste collection data available";
/// Placeholder for the large day counter when `days_until` is unset.
pub const DAYS_PLACEHOLDER: &str = "-";

const TODAY_LABEL: &str = "Today!";
const TOMORROW_LABEL: &str = "Tomorrow";

const CARD_TEMPLATE_NAME: &str = "auckland-waste-card.html";
const CARD_TEMPLATE: &str = include_str!("../templates/auckland-waste-card.html");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Everything the card template needs for one render pass.
pub struct CardView {
    /// Header text.
    pub title: String,
    /// Message shown when `rows` is empty.
    pub no_data: &'static str,
    /// Rows in display order.
    pub rows: Vec<RowView>,
}

impl CardView {
    /// Build the view for a title and the records of the current snapshot.
    #[must_use]
    pub fn new(title: Option<&str>, records: &[DisplayRecord]) -> Self {
        let title = title
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE);

        Self {
            title: title.to_owned(),
            no_data: NO_DATA_MESSAGE,
            rows: records.iter().map(RowView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Pre-computed texts of one card row.
pub struct RowView {
    /// Entity the row belongs to.
    pub entity_id: String,
    /// CSS class selecting the badge colour; the raw waste type.
    pub waste_class: String,
    /// Badge icon.
    pub icon: &'static str,
    /// Waste stream label.
    pub label: String,
    /// Date line.
    pub date: String,
    /// Large day counter.
    pub days_number: String,
    /// `today`, `tomorrow`, or empty.
    pub days_class: &'static str,
    /// Text under the day counter.
    pub days_label: String,
}

impl From<&DisplayRecord> for RowView {
    fn from(record: &DisplayRecord) -> Self {
        let waste_type = record.waste_type.as_ref();

        Self {
            entity_id: record.entity_id.to_string(),
            waste_class: waste_type.map_or_else(String::new, |kind| kind.as_str().to_owned()),
            icon: waste_type.map_or(GENERIC_ICON, WasteType::icon),
            label: waste_type.map_or_else(|| record.name.clone(), |kind| kind.label().to_owned()),
            date: record
                .formatted_date
                .clone()
                .unwrap_or_else(|| record.date.clone()),
            days_number: record
                .days_until
                .map_or_else(|| DAYS_PLACEHOLDER.to_owned(), |days| days.to_string()),
            days_class: days_class(record),
            days_label: days_label(record),
        }
    }
}

/// Text under the day counter; today wins over tomorrow, which wins over the count.
#[must_use]
pub fn days_label(record: &DisplayRecord) -> String {
    if record.is_today {
        TODAY_LABEL.to_owned()
    } else if record.is_tomorrow {
        TOMORROW_LABEL.to_owned()
    } else if let Some(days) = record.days_until {
        format!("{days} days")
    } else {
        String::new()
    }
}

fn days_class(record: &DisplayRecord) -> &'static str {
    if record.is_today {
        "today"
    } else if record.is_tomorrow {
        "tomorrow"
    } else {
        ""
    }
}

/// Renders card markup from display records.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Compile the card template.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if the bundled template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(CARD_TEMPLATE_NAME, CARD_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the card for a title and an ordered list of records.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if template evaluation fails.
    pub fn render(
        &self,
        title: Option<&str>,
        records: &[DisplayRecord],
    ) -> Result<String, minijinja::Error> {
        self.render_view(&CardView::new(title, records))
    }

    /// Render an already built view.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if template evaluation fails.
    pub fn render_view(&self, view: &CardView) -> Result<String, minijinja::Error> {
        self.env.get_template(CARD_TEMPLATE_NAME)?.render(view)
    }
}
