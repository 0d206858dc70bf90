use crate::app::{Loadable, StudyState};
use crate::models::{Domain, Exam, StudyModule};
use crate::text::localized_lines;
use crate::ui::common::{
    draw_header, draw_help, draw_loading, draw_provider_error, exam_color, exam_header, help_line,
    language_tag,
};
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::{calculate_max_scroll, estimate_text_height};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn module_lines(module: &StudyModule, state: &StudyState) -> Vec<Line<'static>> {
    let mut text = localized_lines(
        &module.title,
        state.language,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    text.push(Line::from(""));
    text.extend(localized_lines(
        &module.description,
        state.language,
        Style::default(),
    ));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Key points",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    for (i, point) in module.key_points.iter().enumerate() {
        text.push(Line::from(""));
        let mut lines = localized_lines(point, state.language, Style::default());
        if let Some(first) = lines.first_mut() {
            first.spans.insert(
                0,
                Span::styled(
                    format!("{}. ", i + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            );
        }
        text.extend(lines);
    }
    text
}

pub fn draw_study(f: &mut Frame, exam: &Exam, domain: &Domain, state: &mut StudyState) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(
        f,
        layout.header_area,
        &exam_header(exam, &format!("Study: {}", domain.title)),
        exam_color(exam.color),
    );

    let mut keys = vec![("Esc", "Syllabus"), ("h", "Home")];
    match &state.module {
        Loadable::Loading => draw_loading(f, layout.content_area, "Preparing study notes..."),
        Loadable::Failed(e) => {
            draw_provider_error(f, layout.content_area, e);
            keys.insert(0, ("r", "Retry"));
        }
        Loadable::Loaded(module) => {
            let text = module_lines(module, state);
            let visible_height = layout.content_area.height.saturating_sub(2) as usize;
            let text_width = layout.content_area.width.saturating_sub(2) as usize;
            let max_scroll =
                calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
            state.scroll = state.scroll.min(max_scroll);

            let body = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .scroll((state.scroll, 0))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Study notes {}", language_tag(state.language))),
                );
            f.render_widget(body, layout.content_area);
            keys.insert(0, ("↑/↓", "Scroll"));
            keys.insert(1, ("l", "Language"));
        }
    }

    draw_help(f, layout.help_area, vec![help_line(&keys)]);
}
