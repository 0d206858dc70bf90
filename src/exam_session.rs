use crate::ai::ContentProvider;
use crate::ai_worker::ContentRequest;
use crate::error::ProviderError;
use crate::models::{Exam, LanguageMode, QuizQuestion};
use std::collections::BTreeMap;

pub const MOCK_QUESTION_COUNT: usize = 10;
pub const SECONDS_PER_QUESTION: u32 = 2 * 60;
/// Roughly the 720/1000 AWS scaled passing score.
pub const PASSING_PERCENTAGE: u32 = 72;
/// Below this the timer is drawn as a warning.
pub const LOW_TIME_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next question was cached and is now current.
    Moved,
    /// The next question is being fetched; the index moves once it lands.
    Pending,
    /// Not allowed: last question, finished session, or an advance already pending.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamOutcome {
    pub correct: usize,
    pub fetched: usize,
    pub score: u32,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewItem<'a> {
    pub index: usize,
    pub question: &'a QuizQuestion,
    pub chosen: Option<u32>,
    pub is_correct: bool,
}

/// One timed mock-exam attempt.
///
/// Questions are fetched lazily and strictly one at a time: the question for
/// index `n` is only requested after the one for `n - 1` has settled, so the
/// cache order always matches navigation order. The session is bound to a
/// single exam for its whole lifetime.
#[derive(Debug, Clone)]
pub struct ExamSession {
    exam: Exam,
    target: usize,
    questions: Vec<QuizQuestion>,
    answers: BTreeMap<usize, u32>,
    current_index: usize,
    remaining_seconds: u32,
    finished: bool,
    fetch_in_flight: bool,
    pending_advance: bool,
    last_error: Option<ProviderError>,
    pub language: LanguageMode,
}

impl ExamSession {
    pub fn new(exam: Exam) -> Self {
        Self::with_target(exam, MOCK_QUESTION_COUNT)
    }

    pub fn with_target(exam: Exam, target: usize) -> Self {
        let target = target.max(1);
        Self {
            exam,
            target,
            questions: Vec::with_capacity(target),
            answers: BTreeMap::new(),
            current_index: 0,
            remaining_seconds: target as u32 * SECONDS_PER_QUESTION,
            finished: false,
            fetch_in_flight: false,
            pending_advance: false,
            last_error: None,
            language: LanguageMode::default(),
        }
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn answer_for(&self, index: usize) -> Option<u32> {
        self.answers.get(&index).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn is_advance_pending(&self) -> bool {
        self.pending_advance
    }

    pub fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    pub fn is_low_on_time(&self) -> bool {
        !self.finished && self.remaining_seconds < LOW_TIME_SECONDS
    }

    /// Fraction of the exam reached, for the progress bar.
    pub fn progress(&self) -> f64 {
        ((self.current_index + 1) as f64 / self.target as f64).min(1.0)
    }

    /// Hands out the next fetch if one is needed and none is outstanding.
    /// A question is needed when the current index has none yet or an
    /// advance is waiting on the next one.
    pub fn next_fetch(&mut self) -> Option<ContentRequest> {
        if self.finished || self.fetch_in_flight || self.questions.len() >= self.target {
            return None;
        }
        let wanted = self.current_index + usize::from(self.pending_advance);
        if self.questions.len() > wanted {
            return None;
        }
        self.fetch_in_flight = true;
        let index = self.questions.len();
        log::debug!("Fetching mock question {} for {}", index + 1, self.exam.code);
        Some(ContentRequest::MockQuestion {
            exam_name: self.exam.name.to_string(),
            index,
        })
    }

    /// Settles the outstanding fetch for `index`. Results that do not match
    /// the outstanding fetch are dropped. A question arriving after the
    /// session finished is still cached but never moves the index.
    pub fn complete_fetch(
        &mut self,
        index: usize,
        result: Result<QuizQuestion, ProviderError>,
    ) -> bool {
        if !self.fetch_in_flight || index != self.questions.len() {
            log::debug!("Dropping unexpected mock question for index {}", index);
            return false;
        }
        self.fetch_in_flight = false;

        match result {
            Ok(question) => {
                self.questions.push(question);
                self.last_error = None;
                if self.pending_advance
                    && !self.finished
                    && self.questions.len() > self.current_index + 1
                {
                    self.current_index += 1;
                    self.pending_advance = false;
                }
            }
            Err(e) => {
                log::warn!("Mock question {} failed: {}", index + 1, e);
                self.last_error = Some(e);
                self.pending_advance = false;
            }
        }
        true
    }

    /// Re-issues whichever fetch failed last. The retried question only
    /// becomes current when it is the one right after the current index;
    /// after stepping back the error is just cleared and the next
    /// `advance` fetches it.
    pub fn retry_fetch(&mut self) -> Option<ContentRequest> {
        if self.finished || self.last_error.is_none() {
            return None;
        }
        self.last_error = None;
        if self.questions.len() == self.current_index + 1 && self.current_index + 1 < self.target {
            self.pending_advance = true;
        }
        self.next_fetch()
    }

    /// Records the answer for the current question, replacing any earlier one.
    pub fn answer(&mut self, option_id: u32) -> bool {
        if self.finished {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        if question.option(option_id).is_none() {
            return false;
        }
        self.answers.insert(self.current_index, option_id);
        true
    }

    /// Moves forward one question. When the next question is not cached
    /// yet this only marks the advance as pending; call `next_fetch` and
    /// the index moves when `complete_fetch` delivers it.
    pub fn advance(&mut self) -> Advance {
        if self.finished || self.pending_advance || self.current_index + 1 >= self.target {
            return Advance::Rejected;
        }
        if self.questions.len() > self.current_index + 1 {
            self.current_index += 1;
            return Advance::Moved;
        }
        self.pending_advance = true;
        Advance::Pending
    }

    /// Steps back to an already visited question. Never fetches.
    pub fn retreat(&mut self) -> bool {
        if self.finished || self.pending_advance || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// One second elapsed. Returns true when this tick ended the exam.
    pub fn tick(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            log::info!("Time is up for the {} mock exam", self.exam.code);
            self.finish();
            return true;
        }
        false
    }

    /// Submits the exam. Terminal: nothing but scoring and review afterwards.
    pub fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.pending_advance = false;
            log::info!(
                "Finished {} mock exam with {} of {} questions answered",
                self.exam.code,
                self.answers.len(),
                self.questions.len()
            );
        }
    }

    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answer_for(*i) == Some(q.correct_id))
            .count()
    }

    /// Score over the questions actually fetched, not the nominal target.
    pub fn outcome(&self) -> Option<ExamOutcome> {
        if !self.finished {
            return None;
        }
        let correct = self.correct_count();
        let fetched = self.questions.len();
        let score = if fetched == 0 {
            0
        } else {
            (correct as f64 / fetched as f64 * 100.0).round() as u32
        };
        Some(ExamOutcome {
            correct,
            fetched,
            score,
            passed: score >= PASSING_PERCENTAGE,
        })
    }

    pub fn review(&self) -> Vec<ReviewItem<'_>> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = self.answer_for(index);
                ReviewItem {
                    index,
                    question,
                    chosen,
                    is_correct: chosen == Some(question.correct_id),
                }
            })
            .collect()
    }

    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
    }

    /// Drains every fetch the session currently needs from `provider`.
    pub async fn fetch_with(&mut self, provider: &dyn ContentProvider) -> Result<(), ProviderError> {
        while let Some(request) = self.next_fetch() {
            let ContentRequest::MockQuestion { exam_name, index } = request else {
                break;
            };
            let result = provider.fetch_mock_question(&exam_name).await;
            let failure = result.as_ref().err().cloned();
            self.complete_fetch(index, result);
            if let Some(e) = failure {
                return Err(e);
            }
        }
        Ok(())
    }

    /// `advance`, suspending on the provider when the next question is not cached.
    pub async fn advance_with(
        &mut self,
        provider: &dyn ContentProvider,
    ) -> Result<Advance, ProviderError> {
        match self.advance() {
            Advance::Pending => {
                let before = self.current_index;
                self.fetch_with(provider).await?;
                if self.current_index > before {
                    Ok(Advance::Moved)
                } else {
                    Ok(Advance::Pending)
                }
            }
            other => Ok(other),
        }
    }
}

/// `m:ss` with zero-padded seconds.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AWS_EXAMS;
    use crate::test_support::{sample_question, MockProvider};

    fn session_with(correct_ids: &[u32]) -> ExamSession {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        for (i, correct) in correct_ids.iter().enumerate() {
            session.pending_advance = i > 0;
            let request = session.next_fetch().unwrap();
            let ContentRequest::MockQuestion { index, .. } = request else {
                panic!("unexpected request {:?}", request);
            };
            assert!(session.complete_fetch(index, Ok(sample_question(&i.to_string(), *correct, 4))));
        }
        session.current_index = 0;
        session.pending_advance = false;
        session
    }

    fn go_to(session: &mut ExamSession, index: usize) {
        while session.current_index() > index {
            assert!(session.retreat());
        }
        while session.current_index() < index {
            assert_eq!(session.advance(), Advance::Moved);
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let session = ExamSession::new(AWS_EXAMS[1]);
        assert_eq!(session.target(), 10);
        assert_eq!(session.remaining_seconds(), 1200);
        assert_eq!(session.current_index(), 0);
        assert!(session.questions().is_empty());
        assert!(!session.is_finished());
    }

    #[test]
    fn test_first_fetch_is_issued_once() {
        let mut session = ExamSession::new(AWS_EXAMS[1]);
        assert_eq!(
            session.next_fetch(),
            Some(ContentRequest::MockQuestion {
                exam_name: "Solutions Architect - Associate".to_string(),
                index: 0,
            })
        );
        assert!(session.is_fetching());
        assert_eq!(session.next_fetch(), None, "one fetch in flight at a time");

        session.complete_fetch(0, Ok(sample_question("a", 0, 4)));
        assert_eq!(session.next_fetch(), None, "nothing needed until advancing");
    }

    #[test]
    fn test_score_counts_matching_answers() {
        let mut session = session_with(&[1, 0, 3, 2]);
        go_to(&mut session, 0);
        session.answer(1);
        go_to(&mut session, 2);
        session.answer(3);
        session.finish();

        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.correct, 2);
        assert_eq!(outcome.fetched, 4);
        assert_eq!(outcome.score, 50);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_score_uses_fetched_count_not_target() {
        let mut session = session_with(&[0, 0, 0]);
        go_to(&mut session, 1);
        session.answer(0);
        session.finish();

        let outcome = session.outcome().unwrap();
        assert_eq!(session.target(), 10);
        assert_eq!(outcome.fetched, 3);
        assert_eq!(outcome.score, 33);
    }

    #[test]
    fn test_pass_threshold() {
        let mut session = session_with(&[0; 4]);
        for i in 0..3 {
            go_to(&mut session, i);
            session.answer(0);
        }
        session.finish();
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.score, 75);
        assert!(outcome.passed);
    }

    #[test]
    fn test_outcome_only_after_finish() {
        let mut session = session_with(&[0]);
        assert!(session.outcome().is_none());
        session.finish();
        assert!(session.outcome().is_some());
    }

    #[test]
    fn test_finish_with_nothing_fetched_scores_zero() {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        session.finish();
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.score, 0);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_countdown_expires_after_1200_ticks() {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        assert_eq!(session.remaining_seconds(), 1200);
        for _ in 0..1199 {
            assert!(!session.tick());
        }
        assert!(!session.is_finished());
        assert!(session.tick());
        assert!(session.is_finished());
        assert_eq!(session.remaining_seconds(), 0);

        assert!(!session.tick());
        assert_eq!(session.remaining_seconds(), 0);
    }

    #[test]
    fn test_manual_finish_stops_countdown() {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        session.tick();
        session.finish();
        let remaining = session.remaining_seconds();
        session.tick();
        assert_eq!(session.remaining_seconds(), remaining);
    }

    #[test]
    fn test_advance_waits_for_missing_question() {
        let mut session = session_with(&[0]);
        assert_eq!(session.advance(), Advance::Pending);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.advance(), Advance::Rejected, "already pending");

        let request = session.next_fetch().unwrap();
        assert_eq!(
            request,
            ContentRequest::MockQuestion {
                exam_name: "Cloud Practitioner".to_string(),
                index: 1,
            }
        );
        assert_eq!(session.current_index(), 0);

        session.complete_fetch(1, Ok(sample_question("b", 2, 4)));
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_advance_pending());
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn test_advance_over_cached_question_is_immediate() {
        let mut session = session_with(&[0, 1]);
        go_to(&mut session, 0);
        assert_eq!(session.advance(), Advance::Moved);
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_fetching());
    }

    #[test]
    fn test_advance_rejected_on_last_question() {
        let mut session = session_with(&[0, 0]);
        let mut small = ExamSession::with_target(AWS_EXAMS[0], 2);
        small.next_fetch();
        small.complete_fetch(0, Ok(sample_question("a", 0, 4)));
        assert_eq!(small.advance(), Advance::Pending);
        small.next_fetch();
        small.complete_fetch(1, Ok(sample_question("b", 0, 4)));
        assert_eq!(small.current_index(), 1);
        assert_eq!(small.advance(), Advance::Rejected);
        assert_eq!(small.next_fetch(), None, "never fetches past the target");

        session.finish();
        assert_eq!(session.advance(), Advance::Rejected);
    }

    #[test]
    fn test_retreat_is_local() {
        let mut session = session_with(&[0, 0]);
        assert!(!session.retreat(), "already at the first question");
        go_to(&mut session, 1);
        assert!(session.retreat());
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_fetching());
    }

    #[test]
    fn test_answer_overwrites_and_freezes_after_finish() {
        let mut session = session_with(&[2]);
        assert!(session.answer(1));
        assert!(session.answer(2));
        assert_eq!(session.answer_for(0), Some(2));
        assert!(!session.answer(7), "unknown option");

        session.finish();
        assert!(!session.answer(0));
        assert_eq!(session.answer_for(0), Some(2));
        assert!(!session.retreat());
    }

    #[test]
    fn test_answer_without_question_is_ignored() {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        assert!(!session.answer(0));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_question_arriving_after_finish_is_cached_but_not_shown() {
        let mut session = session_with(&[0]);
        session.advance();
        session.next_fetch().unwrap();
        session.finish();

        assert!(session.complete_fetch(1, Ok(sample_question("late", 0, 4))));
        assert_eq!(session.questions().len(), 2);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.next_fetch(), None);
    }

    #[test]
    fn test_failed_fetch_keeps_bookkeeping_and_retries() {
        let mut session = session_with(&[1]);
        session.answer(1);
        session.tick();
        assert_eq!(session.advance(), Advance::Pending);
        session.next_fetch().unwrap();
        session.complete_fetch(1, Err(ProviderError::EmptyResponse));

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answer_for(0), Some(1));
        assert_eq!(session.remaining_seconds(), 1199);
        assert!(!session.is_advance_pending());
        assert_eq!(session.last_error(), Some(&ProviderError::EmptyResponse));

        let retry = session.retry_fetch().unwrap();
        assert!(matches!(retry, ContentRequest::MockQuestion { index: 1, .. }));
        session.complete_fetch(1, Ok(sample_question("b", 0, 4)));
        assert_eq!(session.current_index(), 1);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_retry_after_stepping_back_keeps_navigation_working() {
        let mut session = session_with(&[1, 0]);
        assert_eq!(session.advance(), Advance::Moved);
        assert_eq!(session.advance(), Advance::Pending);
        session.next_fetch().unwrap();
        session.complete_fetch(2, Err(ProviderError::EmptyResponse));

        assert!(session.retreat());
        assert_eq!(session.current_index(), 0);

        assert!(session.retry_fetch().is_none());
        assert!(session.last_error().is_none());
        assert!(!session.is_advance_pending());
        assert!(!session.is_fetching());

        assert_eq!(session.advance(), Advance::Moved);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.advance(), Advance::Pending);
        let request = session.next_fetch().unwrap();
        assert!(matches!(request, ContentRequest::MockQuestion { index: 2, .. }));
        session.complete_fetch(2, Ok(sample_question("c", 3, 4)));
        assert_eq!(session.current_index(), 2);
        assert!(session.retreat());
    }

    #[test]
    fn test_initial_fetch_failure_retries_first_question() {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        session.next_fetch();
        session.complete_fetch(0, Err(ProviderError::Request("timeout".to_string())));
        assert!(session.current_question().is_none());

        let retry = session.retry_fetch().unwrap();
        assert!(matches!(retry, ContentRequest::MockQuestion { index: 0, .. }));
        assert!(!session.is_advance_pending());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut session = ExamSession::new(AWS_EXAMS[0]);
        assert!(!session.complete_fetch(0, Ok(sample_question("x", 0, 4))));
        session.next_fetch();
        assert!(!session.complete_fetch(5, Ok(sample_question("x", 0, 4))));
        assert!(session.questions().is_empty());
        assert!(session.is_fetching());
    }

    #[test]
    fn test_review_marks_each_question() {
        let mut session = session_with(&[0, 1]);
        go_to(&mut session, 0);
        session.answer(0);
        go_to(&mut session, 1);
        session.answer(3);
        session.finish();

        let review = session.review();
        assert_eq!(review.len(), 2);
        assert!(review[0].is_correct);
        assert_eq!(review[1].chosen, Some(3));
        assert!(!review[1].is_correct);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1200), "20:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_low_time_warning() {
        let mut session = ExamSession::with_target(AWS_EXAMS[0], 1);
        assert!(!session.is_low_on_time());
        for _ in 0..61 {
            session.tick();
        }
        assert_eq!(session.remaining_seconds(), 59);
        assert!(session.is_low_on_time());
    }

    #[tokio::test]
    async fn test_advance_with_awaits_provider() {
        let provider = MockProvider::new();
        provider.push_mock(Ok(sample_question("first", 0, 4)));
        provider.push_mock(Ok(sample_question("second", 1, 4)));
        let mut session = ExamSession::new(AWS_EXAMS[3]);

        session.fetch_with(&provider).await.unwrap();
        assert_eq!(session.current_question().unwrap().id, "first");

        assert_eq!(session.advance_with(&provider).await, Ok(Advance::Moved));
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_question().unwrap().id, "second");

        assert!(session.retreat());
        assert_eq!(session.advance_with(&provider).await, Ok(Advance::Moved));
        assert_eq!(provider.calls().len(), 2, "cached questions are not refetched");
    }

    #[tokio::test]
    async fn test_advance_with_reports_provider_failure() {
        let provider = MockProvider::new();
        provider.push_mock(Ok(sample_question("first", 0, 4)));
        provider.push_mock(Err(ProviderError::EmptyResponse));
        let mut session = ExamSession::new(AWS_EXAMS[3]);
        session.fetch_with(&provider).await.unwrap();

        assert_eq!(
            session.advance_with(&provider).await,
            Err(ProviderError::EmptyResponse)
        );
        assert_eq!(session.current_index(), 0);
    }
}
