use crate::models::{answer_letter, LanguageMode, QuizQuestion};
use crate::quiz_round::{QuizRound, RoundPhase};
use crate::text::localized_lines;
use crate::ui::common::{
    draw_header, draw_help, draw_loading, draw_provider_error, exam_color, exam_header, help_line,
    language_tag,
};
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Scenario context (dimmed) followed by the question itself.
pub fn question_lines(question: &QuizQuestion, language: LanguageMode) -> Vec<Line<'static>> {
    let mut text = Vec::new();
    if let Some(context) = &question.context {
        text.extend(localized_lines(
            context,
            language,
            Style::default().fg(Color::DarkGray),
        ));
        text.push(Line::from(""));
    }
    text.extend(localized_lines(
        &question.question,
        language,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    text
}

/// Lettered options. With `revealed` set, the correct option is marked
/// green and a wrong pick red.
pub fn option_lines(
    question: &QuizQuestion,
    language: LanguageMode,
    selection: Option<u32>,
    revealed: bool,
) -> Vec<Line<'static>> {
    let mut text = Vec::new();
    for option in &question.options {
        let chosen = selection == Some(option.id);
        let (marker, style) = if revealed {
            if question.is_correct(option.id) {
                ("✓", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else if chosen {
                ("✗", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            } else {
                (" ", Style::default().fg(Color::DarkGray))
            }
        } else if chosen {
            ("▶", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            (" ", Style::default())
        };

        let mut lines = localized_lines(&option.text, language, style);
        let prefix = Span::styled(format!("{} {}. ", marker, answer_letter(option.id)), style);
        match lines.first_mut() {
            Some(first) => first.spans.insert(0, prefix),
            None => lines.push(Line::from(prefix)),
        }
        for line in lines.iter_mut().skip(1) {
            line.spans.insert(0, Span::from("     "));
        }
        text.extend(lines);
    }
    text
}

pub fn explanation_lines(
    question: &QuizQuestion,
    language: LanguageMode,
    correct: bool,
) -> Vec<Line<'static>> {
    let verdict = if correct {
        Span::styled(
            "Correct!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("Incorrect. The answer is {}.", answer_letter(question.correct_id)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };
    let mut text = vec![Line::from(""), Line::from(verdict), Line::from("")];
    text.push(Line::from(Span::styled(
        "Explanation:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.extend(localized_lines(&question.explanation, language, Style::default()));
    text
}

pub fn draw_quiz(f: &mut Frame, round: &QuizRound) {
    let layout = calculate_quiz_chunks(f.area());
    let exam = round.exam();

    draw_header(
        f,
        layout.header_area,
        &exam_header(
            exam,
            &format!("Practice: {} - Streak {}", round.domain().title, round.streak()),
        ),
        exam_color(exam.color),
    );

    let mut keys = vec![("l", "Language"), ("Esc", "Syllabus"), ("h", "Home")];
    match round.phase() {
        RoundPhase::Loading => {
            draw_loading(f, layout.question_area, "Generating question...");
        }
        RoundPhase::Failed(e) => {
            draw_provider_error(f, layout.question_area, e);
            keys.insert(0, ("r", "Retry"));
        }
        RoundPhase::Ready {
            question,
            selection,
        } => {
            draw_question(f, round, question, *selection, None);
            keys.insert(0, ("A-D/1-9", "Choose"));
            if selection.is_some() {
                keys.insert(1, ("Enter", "Check"));
            }
        }
        RoundPhase::Revealed {
            question,
            selection,
            correct,
        } => {
            draw_question(f, round, question, Some(*selection), Some(*correct));
            keys.insert(0, ("Enter/n", "Next question"));
        }
    }

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&keys), help_line(&[("Ctrl+C", "Exit App")])],
    );
}

fn draw_question(
    f: &mut Frame,
    round: &QuizRound,
    question: &QuizQuestion,
    selection: Option<u32>,
    verdict: Option<bool>,
) {
    let layout = calculate_quiz_chunks(f.area());
    let body = Paragraph::new(question_lines(question, round.language))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Question {}", language_tag(round.language))),
        );
    f.render_widget(body, layout.question_area);

    let mut text = option_lines(question, round.language, selection, verdict.is_some());
    if let Some(correct) = verdict {
        text.extend(explanation_lines(question, round.language, correct));
    }
    let options = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);
}
