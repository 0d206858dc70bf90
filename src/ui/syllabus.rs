use crate::app::{Loadable, SyllabusState};
use crate::models::{Domain, Exam, LanguageMode};
use crate::text::{localized_inline, localized_lines};
use crate::ui::common::{
    draw_header, draw_help, draw_loading, draw_provider_error, exam_color, exam_header, help_line,
};
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const BAR_WIDTH: usize = 20;

/// Weight bar for a domain's exam percentage.
pub fn weight_bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn draw_syllabus(f: &mut Frame, exam: &Exam, state: Option<&SyllabusState>) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(
        f,
        layout.header_area,
        &exam_header(exam, "Syllabus"),
        exam_color(exam.color),
    );

    let mut keys = vec![("Esc", "Home")];
    match state.map(|s| &s.domains) {
        None | Some(Loadable::Loading) => {
            draw_loading(f, layout.content_area, "Generating exam syllabus...");
        }
        Some(Loadable::Failed(e)) => {
            draw_provider_error(f, layout.content_area, e);
            keys.insert(0, ("r", "Retry"));
        }
        Some(Loadable::Loaded(domains)) => {
            let cursor = state.map_or(0, |s| s.cursor);
            draw_domains(f, layout.content_area, domains, cursor);
            keys = vec![
                ("↑/↓", "Navigate"),
                ("s/Enter", "Study"),
                ("p", "Practice"),
                ("m", "Mock exam"),
                ("Esc", "Home"),
            ];
        }
    }

    draw_help(f, layout.help_area, vec![help_line(&keys)]);
}

fn draw_domains(f: &mut Frame, area: ratatui::layout::Rect, domains: &[Domain], cursor: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(8)])
        .split(area);

    let title_width = (chunks[0].width as usize).saturating_sub(BAR_WIDTH + 14);
    let items: Vec<ListItem> = domains
        .iter()
        .map(|domain| {
            let title = localized_inline(&domain.display_title, LanguageMode::En);
            ListItem::new(Line::from(vec![
                Span::from(format!(
                    "{:<width$}",
                    truncate_string(&title, title_width),
                    width = title_width
                )),
                Span::styled(
                    format!(" {} ", weight_bar(domain.percentage)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:>3.0}%", domain.percentage),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Exam domains"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(domain) = domains.get(cursor) {
        let mut text = localized_lines(
            &domain.display_title,
            LanguageMode::All,
            Style::default().add_modifier(Modifier::BOLD),
        );
        text.push(Line::from(""));
        text.extend(localized_lines(
            &domain.description,
            LanguageMode::En,
            Style::default(),
        ));
        let details = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(details, chunks[1]);
    }
}
