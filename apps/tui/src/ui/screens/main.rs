use crate::app::App;
use crate::ui::widgets::hints::shortcut_line;
use crate::ui::widgets::popup::ClearWidget;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use vinos_ibericos::detail::{DetailView, ImageStatus};

const WINE: Color = Color::Rgb(0x59, 0x02, 0x12);
const PARCHMENT: Color = Color::Rgb(0xe8, 0xd9, 0xcc);

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(5),    // Content area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(app, f, main_layout[0]);
    render_content_section(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(app, f, main_layout[3]);
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Vinos ",
            Style::default()
                .fg(PARCHMENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Ibéricos",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} regions", app.locations.len()),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(WINE)),
    )
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_location_list(app, f, chunks[0]);

    // The overlay sits over the map panel so the list stays usable
    match &app.detail {
        Some(detail) => render_detail(detail, app.detail_scroll, f, chunks[1]),
        None => render_map_panel(app, f, chunks[1]),
    }
}

fn render_location_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Regions ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let searching = app.search_active || !app.search_query.is_empty();
    let (search_area, list_area) = if searching {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);
        (Some(split[0]), split[1])
    } else {
        (None, inner)
    };

    if let Some(search_area) = search_area {
        let cursor = if app.search_active { "▏" } else { "" };
        let search = Paragraph::new(TextLine::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}{cursor}", app.search_query)),
        ]));
        f.render_widget(search, search_area);
    }

    if app.filtered_indices.is_empty() {
        let message = if app.locations.is_empty() {
            "No regions loaded."
        } else {
            "No match."
        };
        f.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            list_area,
        );
        return;
    }

    let max_visible_rows = list_area.height as usize;
    let offset = scroll_offset(app.filtered_indices.len(), max_visible_rows, app.cursor);

    let lines: Vec<TextLine<'_>> = app
        .filtered_indices
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .filter_map(|(row, &index)| app.locations.get(index).map(|l| (row, l)))
        .map(|(row, location)| {
            let selected = app.selection.is_selected(&location.name);
            let marker = if selected { "● " } else { "  " };
            let mut style = if selected {
                Style::default()
                    .fg(PARCHMENT)
                    .bg(WINE)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if row == app.cursor && !app.search_active {
                style = style.add_modifier(Modifier::REVERSED);
            }
            TextLine::from(Span::styled(format!("{marker}{}", location.name), style))
        })
        .collect();

    f.render_widget(Paragraph::new(Text::from(lines)), list_area);
}

fn render_map_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Map ")
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

    let mut lines = Vec::new();
    match &app.map_plan {
        Some(plan) => {
            let view = plan
                .focused
                .as_ref()
                .map_or_else(|| "all regions".to_string(), |name| format!("focused on {name}"));
            lines.push(TextLine::from(vec![label("View:     "), Span::raw(view)]));
            lines.push(TextLine::from(vec![
                label("Centre:   "),
                Span::raw(format!("{:.4}, {:.4}", plan.center[0], plan.center[1])),
            ]));
            lines.push(TextLine::from(vec![
                label("Zoom:     "),
                Span::raw(plan.zoom.to_string()),
            ]));
            lines.push(TextLine::from(vec![
                label("Markers:  "),
                Span::raw(plan.markers.len().to_string()),
            ]));
            let boundary = plan.boundary.as_ref().map_or_else(
                || "none".to_string(),
                |b| format!("{} points", b.points.len()),
            );
            lines.push(TextLine::from(vec![label("Boundary: "), Span::raw(boundary)]));
        }
        None => lines.push(TextLine::from(label("Map not rendered yet"))),
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![
        label("Document: "),
        Span::raw(app.actions.sink.path().display().to_string()),
    ]));
    lines.push(TextLine::from(vec![
        label("Updates:  "),
        Span::raw(app.actions.sink.writes().to_string()),
    ]));
    lines.push(TextLine::from(""));
    lines.push(shortcut_line(&[("o", "Open in browser")]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_detail(detail: &DetailView, scroll: u16, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(ClearWidget, area);

    let block = Block::default()
        .title(format!(" {} ", detail.name))
        .title_style(
            Style::default()
                .fg(PARCHMENT)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(WINE));

    let mut lines = vec![image_line(detail), TextLine::from("")];
    lines.extend(detail.lines.iter().map(|line| TextLine::from(line.as_str())));

    if !detail.links.is_empty() {
        lines.push(TextLine::from(""));
        for (i, link) in detail.links.iter().enumerate() {
            lines.push(TextLine::from(vec![
                Span::styled(
                    format!("[{}] ", i + 1),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{} ", link.label)),
                Span::styled(
                    link.href.as_str(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    lines.push(TextLine::from(""));
    lines.push(shortcut_line(&[
        ("1-9", "Open link"),
        ("i", "Open image"),
        ("j/k", "Scroll"),
        ("Esc", "Close"),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn image_line(detail: &DetailView) -> TextLine<'_> {
    let size = detail
        .display_size
        .map(|(w, h)| format!(" shown at {w}×{h}"))
        .unwrap_or_default();

    match &detail.image {
        ImageStatus::Loaded { path, .. } => TextLine::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}{size}", path.display())),
        ]),
        ImageStatus::Placeholder { .. } => TextLine::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("placeholder{size}"),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        ImageStatus::Missing => TextLine::from(Span::styled(
            "Image not found",
            Style::default().fg(Color::Red),
        )),
    }
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let selection = app
        .selection
        .current()
        .map_or_else(|| "nothing selected".to_string(), |name| format!("selected: {name}"));

    let status = Paragraph::new(TextLine::from(vec![
        Span::styled(selection, Style::default().fg(PARCHMENT)),
        Span::raw("   "),
        Span::styled(app.status_message.as_str(), Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .title(" Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if app.search_active {
        shortcut_line(&[("Enter", "Keep filter"), ("Esc", "Clear search")])
    } else {
        shortcut_line(&[
            ("Enter", "Select"),
            ("c", "Reset"),
            ("/", "Search"),
            ("o", "Map"),
            ("r", "Reload"),
            ("b", "Bodegas"),
            ("n", "New"),
            ("?", "Help"),
            ("q", "Quit"),
        ])
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
