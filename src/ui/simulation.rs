use crate::app::SimulationState;
use crate::exam_session::{format_time, ExamOutcome, ExamSession, PASSING_PERCENTAGE};
use crate::models::answer_letter;
use crate::text::localized_lines;
use crate::ui::common::{
    draw_header, draw_help, draw_loading, draw_provider_error, exam_color, help_line, language_tag,
};
use crate::ui::layout::{calculate_screen_chunks, calculate_simulation_chunks};
use crate::ui::quiz::{option_lines, question_lines};
use crate::utils::{calculate_max_scroll, estimate_text_height};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn timer_style(session: &ExamSession) -> Style {
    if session.is_low_on_time() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    }
}

pub fn draw_simulation(f: &mut Frame, sim: &mut SimulationState) {
    if sim.session.is_finished() {
        draw_results(f, sim);
    } else {
        draw_running(f, &sim.session);
    }
}

fn draw_running(f: &mut Frame, session: &ExamSession) {
    let layout = calculate_simulation_chunks(f.area());
    let exam = session.exam();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                "{} Mock Exam - Question {} / {}   ",
                exam.code,
                session.current_index() + 1,
                session.target()
            ),
            Style::default()
                .fg(exam_color(exam.color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("⏱ {}", format_time(session.remaining_seconds())),
            timer_style(session),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(session.progress())
        .label(format!("{} answered", session.answered_count()));
    f.render_widget(gauge, layout.progress_area);

    let mut keys = vec![
        ("A-D/1-9", "Answer"),
        ("←/→", "Prev/Next"),
        ("f", "Finish"),
        ("l", "Language"),
    ];

    match session.current_question() {
        Some(question) => {
            let body = Paragraph::new(question_lines(question, session.language))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Question {}", language_tag(session.language))),
                );
            f.render_widget(body, layout.question_area);

            let selection = session.answer_for(session.current_index());
            let mut text = option_lines(question, session.language, selection, false);
            if session.is_advance_pending() {
                text.push(Line::from(""));
                text.push(Line::from(Span::styled(
                    "Generating next question...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            } else if let Some(e) = session.last_error() {
                text.push(Line::from(""));
                text.push(Line::from(Span::styled(
                    format!("Could not load the next question: {}", e),
                    Style::default().fg(Color::Red),
                )));
                keys.insert(0, ("r", "Retry"));
            }
            let options = Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Options"));
            f.render_widget(options, layout.options_area);
        }
        None => match session.last_error() {
            Some(e) => {
                draw_provider_error(f, layout.question_area, e);
                keys.insert(0, ("r", "Retry"));
            }
            None => draw_loading(
                f,
                layout.question_area,
                &format!("Generating question {}...", session.current_index() + 1),
            ),
        },
    }

    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&keys),
            help_line(&[("Esc", "Abandon"), ("Ctrl+C", "Exit App")]),
        ],
    );
}

pub fn outcome_lines(outcome: &ExamOutcome) -> Vec<Line<'static>> {
    let (verdict, color) = if outcome.passed {
        ("PASSED", Color::Green)
    } else {
        ("FAILED", Color::Red)
    };
    vec![
        Line::from(Span::styled(
            format!("{}%  {}", outcome.score, verdict),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "You answered {} out of {} correctly - passing score {}%",
            outcome.correct, outcome.fetched, PASSING_PERCENTAGE
        )),
    ]
}

/// Every fetched question with the user's pick, the correct letter and
/// the explanation.
pub fn review_lines(session: &ExamSession) -> Vec<Line<'static>> {
    let mut text = Vec::new();
    for item in session.review() {
        let (mark, color) = if item.is_correct {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        let chosen = item
            .chosen
            .map(|id| answer_letter(id).to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut heading = localized_lines(
            &item.question.question,
            session.language,
            Style::default().add_modifier(Modifier::BOLD),
        );
        if let Some(first) = heading.first_mut() {
            first.spans.insert(
                0,
                Span::styled(
                    format!("{} Q{}. ", mark, item.index + 1),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            );
        }
        text.extend(heading);
        text.push(Line::from(vec![
            Span::from(format!("Your answer: {}   ", chosen)),
            Span::styled(
                format!("Correct: {}", answer_letter(item.question.correct_id)),
                Style::default().fg(Color::Green),
            ),
        ]));
        text.extend(localized_lines(
            &item.question.explanation,
            session.language,
            Style::default().fg(Color::Gray),
        ));
        text.push(Line::from(""));
    }
    text
}

fn draw_results(f: &mut Frame, sim: &mut SimulationState) {
    let layout = calculate_screen_chunks(f.area());
    let session = &sim.session;
    let exam = session.exam();

    draw_header(
        f,
        layout.header_area,
        &format!("{} Mock Exam - Results", exam.code),
        exam_color(exam.color),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(layout.content_area);

    if let Some(outcome) = session.outcome() {
        let score = Paragraph::new(outcome_lines(&outcome))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(score, chunks[0]);
    }

    let text = review_lines(session);
    let visible_height = chunks[1].height.saturating_sub(2) as usize;
    let text_width = chunks[1].width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
    sim.review_scroll = sim.review_scroll.min(max_scroll);

    let review = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .scroll((sim.review_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Review {}", language_tag(session.language))),
        );
    f.render_widget(review, chunks[1]);

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("↑/↓", "Scroll"),
            ("l", "Language"),
            ("Esc", "Syllabus"),
            ("h", "Home"),
        ])],
    );
}
