use crate::error::{ConfigError, ProviderError};
use crate::models::{Exam, LanguageMode};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// One help line from `(key, label)` pairs.
pub fn help_line(keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (i, (key, label)) in keys.iter().enumerate() {
        spans.push(Span::styled(key.to_string(), key_style()));
        let sep = if i + 1 == keys.len() { "" } else { "  " };
        spans.push(Span::from(format!(" {}{}", label, sep)));
    }
    Line::from(spans)
}

pub fn draw_help(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let help = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw_header(f: &mut Frame, area: Rect, title: &str, color: Color) {
    let header = Paragraph::new(title.to_string())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn exam_header(exam: &Exam, detail: &str) -> String {
    format!("CloudMaster - {} {} - {}", exam.code, exam.name, detail)
}

pub fn language_tag(mode: LanguageMode) -> String {
    format!("[{}]", mode.label())
}

/// Maps the catalog's colour tag to a terminal colour.
pub fn exam_color(tag: &str) -> Color {
    match tag {
        "gray" => Color::Gray,
        "blue" => Color::Blue,
        "cyan" => Color::Cyan,
        "teal" => Color::LightCyan,
        "indigo" => Color::LightBlue,
        "violet" => Color::Magenta,
        _ => Color::White,
    }
}

pub fn draw_loading(f: &mut Frame, area: Rect, message: &str) {
    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

pub fn draw_provider_error(f: &mut Frame, area: Rect, error: &ProviderError) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to load content",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        help_line(&[("r", "Retry")]),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(panel, area);
}

pub fn draw_config_error(f: &mut Frame, area: Rect, error: &ConfigError) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Content provider is not configured",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Set OPENROUTER_API_KEY and restart CloudMaster.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Configuration"));
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_help_line_joins_pairs() {
        let line = help_line(&[("Enter", "Select"), ("Esc", "Back")]);
        assert_eq!(plain(&line), "Enter Select  Esc Back");
        assert_eq!(line.spans[0].style, key_style());
    }

    #[test]
    fn test_exam_color_falls_back_to_white() {
        assert_eq!(exam_color("blue"), Color::Blue);
        assert_eq!(exam_color("chartreuse"), Color::White);
    }
}
