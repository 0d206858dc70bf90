pub mod common;
mod home;
pub mod layout;
mod quiz;
mod simulation;
mod study;
mod syllabus;

use crate::app::{App, Detail};
use crate::navigation::Screen;
use common::{draw_config_error, draw_header, draw_help, exam_color, exam_header, help_line};
use ratatui::Frame;

pub use home::draw_home;
pub use layout::{calculate_quiz_chunks, calculate_screen_chunks, calculate_simulation_chunks};
pub use quiz::draw_quiz;
pub use simulation::draw_simulation;
pub use study::draw_study;
pub use syllabus::draw_syllabus;

/// Renders whichever screen the navigation controller is on.
pub fn draw(f: &mut Frame, app: &mut App) {
    if let (Some(error), Some(exam)) = (&app.config_error, app.nav.selected_exam()) {
        let layout = calculate_screen_chunks(f.area());
        draw_header(
            f,
            layout.header_area,
            &exam_header(exam, "Unavailable"),
            exam_color(exam.color),
        );
        draw_config_error(f, layout.content_area, error);
        draw_help(f, layout.help_area, vec![help_line(&[("Esc/h", "Home")])]);
        return;
    }

    match (app.nav.screen(), &mut app.detail) {
        (Screen::Home, _) => draw_home(f, app.home_cursor),
        (Screen::Syllabus { exam }, _) => draw_syllabus(f, exam, app.syllabus.as_ref()),
        (Screen::Study { exam, domain }, Detail::Study(state)) => {
            draw_study(f, exam, domain, state)
        }
        (Screen::Quiz { .. }, Detail::Quiz(round)) => draw_quiz(f, round),
        (Screen::Simulation { .. }, Detail::Simulation(sim)) => draw_simulation(f, sim),
        (screen, _) => log::error!("No view state for {:?}", screen),
    }
}
