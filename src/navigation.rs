use crate::error::NavigationError;
use crate::models::{Domain, Exam};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Syllabus,
    Study,
    Quiz,
    Simulation,
}

/// How a domain picked from the syllabus is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    Study,
    Quiz,
}

// The selection lives inside the route, so a domain-bound view without its
// exam and domain cannot be represented.
#[derive(Debug, Clone, PartialEq)]
enum Route {
    Home,
    Syllabus { exam: Exam },
    Study { exam: Exam, domain: Domain },
    Quiz { exam: Exam, domain: Domain },
    Simulation { exam: Exam },
}

/// What the active screen needs in order to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Home,
    Syllabus { exam: &'a Exam },
    Study { exam: &'a Exam, domain: &'a Domain },
    Quiz { exam: &'a Exam, domain: &'a Domain },
    Simulation { exam: &'a Exam },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationController {
    route: Route,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self { route: Route::Home }
    }

    pub fn view(&self) -> View {
        match self.route {
            Route::Home => View::Home,
            Route::Syllabus { .. } => View::Syllabus,
            Route::Study { .. } => View::Study,
            Route::Quiz { .. } => View::Quiz,
            Route::Simulation { .. } => View::Simulation,
        }
    }

    pub fn selected_exam(&self) -> Option<&Exam> {
        match &self.route {
            Route::Home => None,
            Route::Syllabus { exam }
            | Route::Study { exam, .. }
            | Route::Quiz { exam, .. }
            | Route::Simulation { exam } => Some(exam),
        }
    }

    pub fn selected_domain(&self) -> Option<&Domain> {
        match &self.route {
            Route::Study { domain, .. } | Route::Quiz { domain, .. } => Some(domain),
            _ => None,
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.route {
            Route::Home => Screen::Home,
            Route::Syllabus { exam } => Screen::Syllabus { exam },
            Route::Study { exam, domain } => Screen::Study { exam, domain },
            Route::Quiz { exam, domain } => Screen::Quiz { exam, domain },
            Route::Simulation { exam } => Screen::Simulation { exam },
        }
    }

    pub fn select_exam(&mut self, exam: Exam) -> Result<(), NavigationError> {
        if self.route != Route::Home {
            return Err(self.reject("select an exam"));
        }
        log::info!("Selected exam {}", exam.code);
        self.route = Route::Syllabus { exam };
        Ok(())
    }

    pub fn select_domain(&mut self, domain: Domain, mode: StudyMode) -> Result<(), NavigationError> {
        let Route::Syllabus { exam } = &self.route else {
            return Err(self.reject("select a domain"));
        };
        let exam = *exam;
        log::info!("Opening domain {:?} in {:?} mode", domain.title, mode);
        self.route = match mode {
            StudyMode::Study => Route::Study { exam, domain },
            StudyMode::Quiz => Route::Quiz { exam, domain },
        };
        Ok(())
    }

    pub fn start_simulation(&mut self) -> Result<(), NavigationError> {
        let Route::Syllabus { exam } = &self.route else {
            return Err(self.reject("start a simulation"));
        };
        self.route = Route::Simulation { exam: *exam };
        Ok(())
    }

    /// Study, quiz and simulation return to the syllabus (dropping the
    /// domain); the syllabus itself returns home.
    pub fn back(&mut self) -> Result<(), NavigationError> {
        self.route = match &self.route {
            Route::Home => return Err(self.reject("go back")),
            Route::Syllabus { .. } => Route::Home,
            Route::Study { exam, .. } | Route::Quiz { exam, .. } | Route::Simulation { exam } => {
                Route::Syllabus { exam: *exam }
            }
        };
        Ok(())
    }

    /// Header click: legal from anywhere, clears the whole selection.
    pub fn back_to_home(&mut self) {
        self.route = Route::Home;
    }

    fn reject(&self, action: &'static str) -> NavigationError {
        let err = NavigationError::InvalidTransition {
            from: self.view(),
            action,
        };
        log::warn!("{}", err);
        err
    }
}
