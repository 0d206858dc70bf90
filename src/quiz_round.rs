use crate::ai::ContentProvider;
use crate::ai_worker::ContentRequest;
use crate::error::ProviderError;
use crate::models::{Domain, Exam, LanguageMode, QuizQuestion};

#[derive(Debug, Clone, PartialEq)]
pub enum RoundPhase {
    Loading,
    Failed(ProviderError),
    Ready {
        question: QuizQuestion,
        selection: Option<u32>,
    },
    Revealed {
        question: QuizQuestion,
        selection: u32,
        correct: bool,
    },
}

/// Single-question practice loop for one exam domain.
#[derive(Debug, Clone)]
pub struct QuizRound {
    exam: Exam,
    domain: Domain,
    phase: RoundPhase,
    streak: u32,
    pub language: LanguageMode,
}

impl QuizRound {
    /// Starts in `Loading`; the caller issues `fetch_request()`.
    pub fn new(exam: Exam, domain: Domain) -> Self {
        Self {
            exam,
            domain,
            phase: RoundPhase::Loading,
            streak: 0,
            language: LanguageMode::default(),
        }
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        match &self.phase {
            RoundPhase::Ready { question, .. } | RoundPhase::Revealed { question, .. } => {
                Some(question)
            }
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<u32> {
        match self.phase {
            RoundPhase::Ready { selection, .. } => selection,
            RoundPhase::Revealed { selection, .. } => Some(selection),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RoundPhase::Loading
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, RoundPhase::Revealed { .. })
    }

    pub fn fetch_request(&self) -> ContentRequest {
        ContentRequest::QuizQuestion {
            exam_name: self.exam.name.to_string(),
            domain_title: self.domain.title.clone(),
        }
    }

    /// Settles the outstanding fetch. Ignored unless a fetch is outstanding.
    pub fn complete_fetch(&mut self, result: Result<QuizQuestion, ProviderError>) -> bool {
        if !self.is_loading() {
            log::debug!("Ignoring quiz question delivered outside of loading");
            return false;
        }
        self.phase = match result {
            Ok(question) => RoundPhase::Ready {
                question,
                selection: None,
            },
            Err(e) => {
                log::warn!("Quiz question fetch failed: {}", e);
                RoundPhase::Failed(e)
            }
        };
        true
    }

    /// Single-select; replaces any earlier pick until the answer is checked.
    pub fn select(&mut self, option_id: u32) -> bool {
        match &mut self.phase {
            RoundPhase::Ready {
                question,
                selection,
            } if question.option(option_id).is_some() => {
                *selection = Some(option_id);
                true
            }
            _ => false,
        }
    }

    /// Reveals the answer and updates the streak. Returns whether the pick
    /// was correct, or `None` when there is nothing to check.
    pub fn check(&mut self) -> Option<bool> {
        let RoundPhase::Ready {
            question,
            selection: Some(selection),
        } = &self.phase
        else {
            return None;
        };
        let selection = *selection;
        let correct = question.is_correct(selection);
        self.streak = if correct { self.streak + 1 } else { 0 };

        let phase = std::mem::replace(&mut self.phase, RoundPhase::Loading);
        if let RoundPhase::Ready { question, .. } = phase {
            self.phase = RoundPhase::Revealed {
                question,
                selection,
                correct,
            };
        }
        Some(correct)
    }

    /// Moves on from a revealed question. Returns the fetch to issue.
    pub fn next(&mut self) -> Option<ContentRequest> {
        if !self.is_revealed() {
            return None;
        }
        self.phase = RoundPhase::Loading;
        Some(self.fetch_request())
    }

    pub fn retry(&mut self) -> Option<ContentRequest> {
        if !matches!(self.phase, RoundPhase::Failed(_)) {
            return None;
        }
        self.phase = RoundPhase::Loading;
        Some(self.fetch_request())
    }

    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
    }

    /// Enters `Loading` and awaits the provider directly.
    pub async fn load_with(&mut self, provider: &dyn ContentProvider) {
        self.phase = RoundPhase::Loading;
        let result = provider
            .fetch_quiz_question(self.exam.name, &self.domain.title)
            .await;
        self.complete_fetch(result);
    }
}
