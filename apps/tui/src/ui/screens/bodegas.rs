use crate::app::App;
use crate::ui::widgets::hints::shortcut_line;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use vinos_ibericos::db::{BodegaRecord, FIELDS};

pub fn render_bodegas_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    if app.bodegas.is_empty() {
        let block = Block::default()
            .title("Bodegas")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No bodegas recorded. Press n to add one.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[0]);
    } else {
        render_table(app, f, chunks[0]);
    }

    let status = Paragraph::new(app.status_message.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[1]);

    let help_paragraph = Paragraph::new(shortcut_line(&[
        ("ESC", "Back"),
        ("↑/↓", "Navigate"),
        ("Enter", "Show"),
        ("d", "Delete"),
        ("n", "New"),
        ("r", "Refresh"),
        ("q", "Quit"),
    ]))
    .block(Block::default().borders(Borders::TOP))
    .alignment(Alignment::Center);
    f.render_widget(help_paragraph, chunks[2]);

    if let Some(record) = &app.bodega_view {
        render_record(record, f);
    }
}

fn render_table(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Name"),
        Cell::from("Town"),
        Cell::from("Designation"),
        Cell::from("Lat"),
        Cell::from("Lon"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = app.bodegas.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_bodega_index);

    let rows = app
        .bodegas
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, bodega)| {
            let style = if i == app.selected_bodega_index {
                Style::default()
                    .bg(Color::Rgb(0x59, 0x02, 0x12))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(bodega.id.to_string()),
                Cell::from(bodega.name.clone()),
                Cell::from(bodega.town.clone()),
                Cell::from(bodega.do_name.clone()),
                Cell::from(format!("{:.4}", bodega.lat)),
                Cell::from(format!("{:.4}", bodega.lon)),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(18),
        Constraint::Length(9),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Bodegas ({} of {})",
                    app.selected_bodega_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_record(record: &BodegaRecord, f: &mut Frame<'_>) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(ClearWidget, area);

    let mut lines = vec![TextLine::from(vec![
        Span::styled("Id: ", Style::default().fg(Color::Gray)),
        Span::raw(record.id.to_string()),
    ])];
    lines.extend(FIELDS.iter().map(|spec| {
        let value = record.field(spec.key);
        TextLine::from(vec![
            Span::styled(format!("{}: ", spec.label), Style::default().fg(Color::Gray)),
            value.map_or_else(
                || Span::styled("-", Style::default().fg(Color::DarkGray)),
                Span::raw,
            ),
        ])
    }));

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(format!(" {} ", record.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(paragraph, area);
}
