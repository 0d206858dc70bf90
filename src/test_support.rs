//! Scripted content provider and fixtures shared by unit tests.

use crate::ai::ContentProvider;
use crate::error::ProviderError;
use crate::models::{Domain, MultilingualText, QuizOption, QuizQuestion, StudyModule};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

pub fn text(en: &str) -> MultilingualText {
    MultilingualText::new(en, en, en, en)
}

/// A question whose options have ids `0..option_count`.
pub fn sample_question(id: &str, correct_id: u32, option_count: u32) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        context: Some(text("A company runs a web tier on EC2.")),
        question: text(&format!("Question {}", id)),
        options: (0..option_count)
            .map(|i| QuizOption {
                id: i,
                text: text(&format!("Option {}", i)),
            })
            .collect(),
        correct_id,
        explanation: text("Because."),
    }
}

pub fn sample_domain(title: &str) -> Domain {
    Domain {
        id: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        display_title: text(title),
        percentage: 25.0,
        description: text(&format!("About {}", title)),
    }
}

pub fn sample_module(id: &str) -> StudyModule {
    StudyModule {
        id: id.to_string(),
        title: text("Module"),
        description: text("Description"),
        key_points: vec![text("Point one"), text("Point two")],
    }
}

/// Mock provider - pops scripted results per operation and falls back to
/// generated fixtures once a queue is empty.
#[derive(Default)]
pub struct MockProvider {
    syllabus: Mutex<VecDeque<Result<Vec<Domain>, ProviderError>>>,
    modules: Mutex<VecDeque<Result<StudyModule, ProviderError>>>,
    quiz: Mutex<VecDeque<Result<QuizQuestion, ProviderError>>>,
    mock: Mutex<VecDeque<Result<QuizQuestion, ProviderError>>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    generated: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated network latency applied to every call.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn push_syllabus(&self, result: Result<Vec<Domain>, ProviderError>) {
        self.syllabus.lock().unwrap().push_back(result);
    }

    pub fn push_module(&self, result: Result<StudyModule, ProviderError>) {
        self.modules.lock().unwrap().push_back(result);
    }

    pub fn push_quiz(&self, result: Result<QuizQuestion, ProviderError>) {
        self.quiz.lock().unwrap().push_back(result);
    }

    pub fn push_mock(&self, result: Result<QuizQuestion, ProviderError>) {
        self.mock.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn generated_question(&self) -> QuizQuestion {
        let n = self.generated.fetch_add(1, Ordering::SeqCst);
        sample_question(&format!("generated-{}", n), 0, 4)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    async fn fetch_syllabus(&self, exam_name: &str) -> Result<Vec<Domain>, ProviderError> {
        self.record(format!("syllabus:{}", exam_name));
        self.pause().await;
        let scripted = self.syllabus.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(vec![
                sample_domain("Design Secure Architectures"),
                sample_domain("Design Resilient Architectures"),
            ])
        })
    }

    async fn fetch_study_module(
        &self,
        exam_name: &str,
        domain_title: &str,
    ) -> Result<StudyModule, ProviderError> {
        self.record(format!("study:{}:{}", exam_name, domain_title));
        self.pause().await;
        let scripted = self.modules.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(sample_module("generated")))
    }

    async fn fetch_quiz_question(
        &self,
        exam_name: &str,
        domain_title: &str,
    ) -> Result<QuizQuestion, ProviderError> {
        self.record(format!("quiz:{}:{}", exam_name, domain_title));
        self.pause().await;
        let scripted = self.quiz.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.generated_question()))
    }

    async fn fetch_mock_question(&self, exam_name: &str) -> Result<QuizQuestion, ProviderError> {
        self.record(format!("mock:{}", exam_name));
        self.pause().await;
        let scripted = self.mock.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.generated_question()))
    }
}
