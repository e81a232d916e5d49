use crate::app::{Notice, NoticeKind};
use crate::ui::widgets::hints::shortcut_line;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
            ratatui::layout::Constraint::Percentage(percent_y),
            ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
            ratatui::layout::Constraint::Percentage(percent_x),
            ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

/// Blocking message drawn above every screen.
pub fn render_notice(f: &mut Frame<'_>, notice: &Notice) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(ClearWidget, area);

    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    };

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let mut lines: Vec<TextLine<'_>> = notice
        .message
        .lines()
        .map(|line| TextLine::from(line.to_string()))
        .collect();
    lines.push(TextLine::from(""));
    lines.push(shortcut_line(&[("Enter/Esc", "Dismiss")]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(ClearWidget, area);

    let section = |title: &'static str| {
        TextLine::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        section("Locations"),
        shortcut_line(&[("↑/↓ PgUp/PgDn Home/End", "Move")]),
        shortcut_line(&[("Enter/Space", "Select or deselect"), ("c", "Reset view")]),
        shortcut_line(&[("/", "Search"), ("o", "Open map"), ("r", "Reload data")]),
        TextLine::from(""),
        section("Detail"),
        shortcut_line(&[
            ("1-9", "Open link"),
            ("i", "Open image"),
            ("j/k", "Scroll"),
            ("Esc", "Close"),
        ]),
        TextLine::from(""),
        section("Bodegas"),
        shortcut_line(&[("b", "Browse"), ("n", "New bodega")]),
        shortcut_line(&[("Enter", "Show"), ("d", "Delete"), ("Esc", "Back")]),
        TextLine::from(""),
        section("Form"),
        shortcut_line(&[("↑/↓", "Field"), ("Enter", "Edit"), ("s", "Submit")]),
        shortcut_line(&[("r", "Clear"), ("Esc", "Cancel")]),
        TextLine::from(""),
        shortcut_line(&[("F1/?", "Close help"), ("q", "Quit")]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}
