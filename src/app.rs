use crate::ai_worker::{ContentRequest, ContentResponse, Delivery, FetchWorker, Ticket};
use crate::catalog::AWS_EXAMS;
use crate::error::{ConfigError, ProviderError};
use crate::exam_session::{Advance, ExamSession};
use crate::models::{Domain, LanguageMode, QuizQuestion, StudyModule};
use crate::navigation::{NavigationController, Screen, StudyMode, View};
use crate::quiz_round::QuizRound;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(ProviderError),
    Loaded(T),
}

impl<T> From<Result<T, ProviderError>> for Loadable<T> {
    fn from(result: Result<T, ProviderError>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(e),
        }
    }
}

#[derive(Debug)]
pub struct SyllabusState {
    pub exam_code: &'static str,
    pub domains: Loadable<Vec<Domain>>,
    pub cursor: usize,
    ticket: Ticket,
}

impl SyllabusState {
    pub fn selected_domain(&self) -> Option<&Domain> {
        match &self.domains {
            Loadable::Loaded(domains) => domains.get(self.cursor),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct StudyState {
    pub module: Loadable<StudyModule>,
    pub language: LanguageMode,
    pub scroll: u16,
}

#[derive(Debug)]
pub struct SimulationState {
    pub session: ExamSession,
    pub review_scroll: u16,
}

/// Per-view state below the syllabus. Replaced wholesale on every
/// navigation, which is what discards a torn-down view.
#[derive(Debug)]
pub enum Detail {
    None,
    Study(StudyState),
    Quiz(QuizRound),
    Simulation(SimulationState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

pub struct App {
    pub nav: NavigationController,
    pub home_cursor: usize,
    pub syllabus: Option<SyllabusState>,
    pub detail: Detail,
    pub config_error: Option<ConfigError>,
    worker: Option<FetchWorker>,
    detail_ticket: Ticket,
    next_ticket: Ticket,
}

impl App {
    /// `worker` is `None` when the provider could not be configured; content
    /// screens then show `config_error` instead of loading.
    pub fn new(worker: Option<FetchWorker>, config_error: Option<ConfigError>) -> Self {
        Self {
            nav: NavigationController::new(),
            home_cursor: 0,
            syllabus: None,
            detail: Detail::None,
            config_error,
            worker,
            detail_ticket: 0,
            next_ticket: 1,
        }
    }

    pub fn view(&self) -> View {
        self.nav.view()
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn dispatch(&self, ticket: Ticket, request: ContentRequest) {
        match &self.worker {
            Some(worker) => {
                worker.dispatch(ticket, request);
            }
            None => log::warn!("Provider unavailable, not sending {:?}", request),
        }
    }

    /// Rebuilds view state after a navigation transition.
    fn enter_current_view(&mut self) {
        let ticket = self.issue_ticket();
        self.detail_ticket = ticket;

        let (detail, request) = match self.nav.screen() {
            Screen::Home => {
                self.syllabus = None;
                (Detail::None, None)
            }
            Screen::Syllabus { exam } => {
                let cached = self
                    .syllabus
                    .as_ref()
                    .is_some_and(|s| s.exam_code == exam.code);
                if cached {
                    (Detail::None, None)
                } else {
                    let request = ContentRequest::Syllabus {
                        exam_name: exam.name.to_string(),
                    };
                    self.syllabus = Some(SyllabusState {
                        exam_code: exam.code,
                        domains: Loadable::Loading,
                        cursor: 0,
                        ticket,
                    });
                    (Detail::None, Some(request))
                }
            }
            Screen::Study { exam, domain } => (
                Detail::Study(StudyState {
                    module: Loadable::Loading,
                    language: LanguageMode::default(),
                    scroll: 0,
                }),
                Some(ContentRequest::StudyModule {
                    exam_name: exam.name.to_string(),
                    domain_title: domain.title.clone(),
                }),
            ),
            Screen::Quiz { exam, domain } => {
                let round = QuizRound::new(*exam, domain.clone());
                let request = round.fetch_request();
                (Detail::Quiz(round), Some(request))
            }
            Screen::Simulation { exam } => {
                let mut session = ExamSession::new(*exam);
                let request = session.next_fetch();
                (
                    Detail::Simulation(SimulationState {
                        session,
                        review_scroll: 0,
                    }),
                    request,
                )
            }
        };

        self.detail = detail;
        if let Some(request) = request {
            self.dispatch(ticket, request);
        }
    }

    fn go_back(&mut self) {
        if self.nav.back().is_ok() {
            self.enter_current_view();
        }
    }

    fn go_home(&mut self) {
        self.nav.back_to_home();
        self.enter_current_view();
    }

    /// Routes a provider result to the view that asked for it. Anything
    /// addressed to a discarded view is dropped.
    pub fn handle_delivery(&mut self, delivery: Delivery) {
        let Delivery { ticket, response } = delivery;
        let accepted = match response {
            ContentResponse::Syllabus(result) => match self.syllabus.as_mut() {
                Some(state) if state.ticket == ticket && state.domains == Loadable::Loading => {
                    state.domains = result.into();
                    true
                }
                _ => false,
            },
            ContentResponse::StudyModule(result) => match &mut self.detail {
                Detail::Study(state) if ticket == self.detail_ticket => {
                    state.module = result.into();
                    true
                }
                _ => false,
            },
            ContentResponse::QuizQuestion(result) => match &mut self.detail {
                Detail::Quiz(round) if ticket == self.detail_ticket => round.complete_fetch(result),
                _ => false,
            },
            ContentResponse::MockQuestion { index, result } => {
                let accepted = match &mut self.detail {
                    Detail::Simulation(sim) if ticket == self.detail_ticket => {
                        sim.session.complete_fetch(index, result)
                    }
                    _ => false,
                };
                self.pump_session();
                accepted
            }
        };
        if !accepted {
            log::debug!("Discarded stale response for ticket {}", ticket);
        }
    }

    /// One second of wall-clock time. Only a live exam session counts down.
    pub fn handle_tick(&mut self) {
        if let Detail::Simulation(sim) = &mut self.detail {
            sim.session.tick();
        }
    }

    pub fn is_timer_active(&self) -> bool {
        matches!(&self.detail, Detail::Simulation(sim) if !sim.session.is_finished())
    }

    fn pump_session(&mut self) {
        let request = match &mut self.detail {
            Detail::Simulation(sim) => sim.session.next_fetch(),
            _ => None,
        };
        if let Some(request) = request {
            self.dispatch(self.detail_ticket, request);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppControl {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppControl::Quit;
        }

        match self.view() {
            View::Home => return self.handle_home_key(key.code),
            View::Syllabus => self.handle_syllabus_key(key.code),
            View::Study => self.handle_study_key(key.code),
            View::Quiz => self.handle_quiz_key(key.code),
            View::Simulation => self.handle_simulation_key(key.code),
        }
        AppControl::Continue
    }

    fn handle_home_key(&mut self, code: KeyCode) -> AppControl {
        match code {
            KeyCode::Up => {
                self.home_cursor = self.home_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.home_cursor < AWS_EXAMS.len().saturating_sub(1) {
                    self.home_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(exam) = AWS_EXAMS.get(self.home_cursor)
                    && self.nav.select_exam(*exam).is_ok()
                {
                    self.enter_current_view();
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return AppControl::Quit,
            _ => {}
        }
        AppControl::Continue
    }

    fn handle_syllabus_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('h') => self.go_home(),
            KeyCode::Up => {
                if let Some(state) = self.syllabus.as_mut() {
                    state.cursor = state.cursor.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if let Some(state) = self.syllabus.as_mut()
                    && let Loadable::Loaded(domains) = &state.domains
                    && state.cursor < domains.len().saturating_sub(1)
                {
                    state.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('s') => self.open_domain(StudyMode::Study),
            KeyCode::Char('p') => self.open_domain(StudyMode::Quiz),
            KeyCode::Char('m') => {
                if self.config_error.is_none() && self.nav.start_simulation().is_ok() {
                    self.enter_current_view();
                }
            }
            KeyCode::Char('r') => self.retry_syllabus(),
            _ => {}
        }
    }

    fn open_domain(&mut self, mode: StudyMode) {
        let Some(domain) = self
            .syllabus
            .as_ref()
            .and_then(|s| s.selected_domain())
            .cloned()
        else {
            return;
        };
        if self.nav.select_domain(domain, mode).is_ok() {
            self.enter_current_view();
        }
    }

    fn retry_syllabus(&mut self) {
        let ticket = self.issue_ticket();
        let Some(state) = self.syllabus.as_mut() else {
            return;
        };
        if !matches!(state.domains, Loadable::Failed(_)) {
            return;
        }
        let Some(exam) = self.nav.selected_exam() else {
            return;
        };
        state.domains = Loadable::Loading;
        state.ticket = ticket;
        let request = ContentRequest::Syllabus {
            exam_name: exam.name.to_string(),
        };
        self.dispatch(ticket, request);
    }

    fn handle_study_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('h') => self.go_home(),
            KeyCode::Char('r') => {
                if let Detail::Study(state) = &self.detail
                    && matches!(state.module, Loadable::Failed(_))
                {
                    // Re-entering issues a fresh ticket and request.
                    self.enter_current_view();
                }
            }
            _ => {
                if let Detail::Study(state) = &mut self.detail {
                    match code {
                        KeyCode::Char('l') => state.language = state.language.next(),
                        KeyCode::Up => state.scroll = state.scroll.saturating_sub(1),
                        KeyCode::Down => state.scroll = state.scroll.saturating_add(1),
                        _ => {}
                    }
                }
            }
        }
    }

    fn handle_quiz_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => return self.go_back(),
            KeyCode::Char('h') => return self.go_home(),
            _ => {}
        }
        let Detail::Quiz(round) = &mut self.detail else {
            return;
        };
        let request = match code {
            KeyCode::Char('l') => {
                round.cycle_language();
                None
            }
            KeyCode::Char('r') => round.retry(),
            KeyCode::Char('n') => round.next(),
            KeyCode::Enter => {
                if round.is_revealed() {
                    round.next()
                } else {
                    round.check();
                    None
                }
            }
            _ => {
                if let Some(id) = round.question().and_then(|q| option_for_key(q, code)) {
                    round.select(id);
                }
                None
            }
        };
        if let Some(request) = request {
            self.dispatch(self.detail_ticket, request);
        }
    }

    fn handle_simulation_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => return self.go_back(),
            KeyCode::Char('h') => return self.go_home(),
            _ => {}
        }
        let Detail::Simulation(sim) = &mut self.detail else {
            return;
        };
        let session = &mut sim.session;

        if session.is_finished() {
            match code {
                KeyCode::Up => sim.review_scroll = sim.review_scroll.saturating_sub(1),
                KeyCode::Down => sim.review_scroll = sim.review_scroll.saturating_add(1),
                KeyCode::Char('l') => session.cycle_language(),
                _ => {}
            }
            return;
        }

        let mut retry = None;
        match code {
            KeyCode::Right | KeyCode::Char('n') => {
                if session.advance() == Advance::Pending {
                    log::debug!("Waiting for question {}", session.current_index() + 2);
                }
            }
            KeyCode::Left | KeyCode::Char('p') => {
                session.retreat();
            }
            KeyCode::Char('f') => session.finish(),
            KeyCode::Char('l') => session.cycle_language(),
            KeyCode::Char('r') => retry = session.retry_fetch(),
            _ => {
                if let Some(id) = session
                    .current_question()
                    .and_then(|q| option_for_key(q, code))
                {
                    session.answer(id);
                }
            }
        }

        if let Some(request) = retry {
            self.dispatch(self.detail_ticket, request);
        }
        self.pump_session();
    }
}

/// Digits pick the n-th option; letters pick the option with that letter.
pub fn option_for_key(question: &QuizQuestion, code: KeyCode) -> Option<u32> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    if let Some(n) = c.to_digit(10) {
        return n
            .checked_sub(1)
            .and_then(|i| question.options.get(i as usize))
            .map(|o| o.id);
    }
    if c.is_ascii_alphabetic() {
        let id = c.to_ascii_lowercase() as u32 - 'a' as u32;
        return question.option(id).map(|o| o.id);
    }
    None
}
