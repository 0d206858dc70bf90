use crate::catalog::AWS_EXAMS;
use crate::ui::common::{draw_header, draw_help, exam_color, help_line};
use crate::ui::layout::calculate_screen_chunks;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw_home(f: &mut Frame, cursor: usize) {
    let layout = calculate_screen_chunks(f.area());

    draw_header(
        f,
        layout.header_area,
        "CloudMaster - AWS Certification Study Companion",
        Color::Cyan,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(layout.content_area);

    let items: Vec<ListItem> = AWS_EXAMS
        .iter()
        .map(|exam| {
            let color = exam_color(exam.color);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", exam.code),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::from(format!(" {:<34}", exam.name)),
                Span::styled(
                    format!("[{}]", exam.level.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Choose an exam"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(exam) = AWS_EXAMS.get(cursor) {
        let description = Paragraph::new(exam.description)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(exam.name));
        f.render_widget(description, chunks[1]);
    }

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("↑/↓", "Navigate"),
            ("Enter", "Open syllabus"),
            ("q", "Quit"),
        ])],
    );
}
