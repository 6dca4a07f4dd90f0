use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use waste_view_core::{CARD_TYPE, CardView, DEFAULT_TITLE, RowView, WasteType};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let title = app
        .view
        .as_ref()
        .map_or(DEFAULT_TITLE, |view| view.title.as_str());
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{CARD_TYPE} · size {}", app.card.card_size())),
    );
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::Rows => draw_rows(frame, app.view.as_ref(), *content_area),
        Screen::Markup => draw_markup(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Rows => "r reload snapshot · c reload config · m/Tab markup · q/Ctrl-C quit",
        Screen::Markup => "↑/↓ scroll · r reload snapshot · c reload config · m/Tab/Esc rows · q quit",
    };

    let pushed = app.pushed_at.map_or_else(
        || "no snapshot pushed".to_owned(),
        |at| format!("pushed {}", at.format("%H:%M:%S")),
    );

    let status_text = if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        format!("{pushed} · {} entities · {nav_hint}", app.snapshot.len())
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_rows(frame: &mut Frame<'_>, view: Option<&CardView>, area: Rect) {
    let Some(view) = view else {
        let paragraph = Paragraph::new("The card is not configured.")
            .block(Block::default().borders(Borders::ALL).title("Collections"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    if view.rows.is_empty() {
        let paragraph = Paragraph::new(view.no_data)
            .block(Block::default().borders(Borders::ALL).title("Collections"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = view.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.icon),
            Cell::from(row.label.clone()).style(Style::default().fg(waste_color(&row.waste_class))),
            Cell::from(row.date.clone()),
            Cell::from(row.days_number.clone()).style(days_style(row)),
            Cell::from(row.days_label.clone()),
        ])
    });

    let column_widths = [
        Constraint::Length(4),
        Constraint::Min(14),
        Constraint::Min(22),
        Constraint::Length(5),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["", "Type", "Date", "Days", ""])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Collections"))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_markup(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let paragraph = Paragraph::new(app.markup())
        .block(Block::default().borders(Borders::ALL).title("Rendered markup"))
        .scroll((app.markup_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn waste_color(waste_class: &str) -> Color {
    match WasteType::from(waste_class) {
        WasteType::Rubbish => Color::Red,
        WasteType::Recycle => Color::Green,
        WasteType::FoodWaste => Color::Yellow,
        WasteType::Other(_) => Color::Gray,
    }
}

fn days_style(row: &RowView) -> Style {
    match row.days_class {
        "today" => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        "tomorrow" => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        _ => Style::default(),
    }
}
