use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

/// `key: action` pairs with the key highlighted.
pub fn shortcut_line(pairs: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        let separator = if i + 1 < pairs.len() { "   " } else { "" };
        spans.push(Span::raw(format!(": {action}{separator}")));
    }
    TextLine::from(spans)
}
