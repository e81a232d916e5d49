use crate::app::App;
use crate::ui::widgets::hints::shortcut_line;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use vinos_ibericos::forms::BodegaForm;

#[allow(clippy::cast_possible_truncation)]
pub fn render_form(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let form = &app.form;
    let fields = BodegaForm::fields();

    let height = (fields.len() as u16 + 6).min(area.height);
    let width = 72.min(area.width);
    let form_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(" New bodega ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(block, form_area);

    let mut constraints = vec![Constraint::Length(1); fields.len()];
    constraints.push(Constraint::Length(1)); // Spacer
    constraints.push(Constraint::Length(1)); // Status text
    constraints.push(Constraint::Length(1)); // Help text

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(form_area);

    let field_style = |index: usize| {
        let is_selected = form.focus == index;
        let is_editing = is_selected && form.editing;

        if is_editing {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    for (index, spec) in fields.iter().enumerate() {
        let style = field_style(index);
        let prefix = if form.focus == index && form.editing {
            "► "
        } else if form.focus == index {
            "> "
        } else {
            "  "
        };
        let required = if spec.required { "*" } else { " " };

        let line = TextLine::from(vec![
            Span::styled(format!("{prefix}{:<24}{required} ", spec.label), style),
            Span::styled(form.value(index), style),
        ]);
        f.render_widget(Paragraph::new(line), form_chunks[index]);
    }

    let status = Paragraph::new(app.status_message.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, form_chunks[fields.len() + 1]);

    let help = if form.editing {
        shortcut_line(&[("type", "Edit"), ("Enter/Esc", "Done"), ("Tab", "Next field")])
    } else {
        shortcut_line(&[
            ("↑/↓", "Field"),
            ("Enter", "Edit"),
            ("s", "Submit"),
            ("r", "Clear"),
            ("Esc", "Cancel"),
        ])
    };
    f.render_widget(
        Paragraph::new(help).alignment(Alignment::Center),
        form_chunks[fields.len() + 2],
    );
}
