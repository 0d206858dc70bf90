use crate::ai::ContentProvider;
use crate::error::ProviderError;
use crate::models::{Domain, QuizQuestion, StudyModule};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Identifies the view instance that issued a request. Responses carrying a
/// ticket other than the active one belong to a torn-down view.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    Syllabus {
        exam_name: String,
    },
    StudyModule {
        exam_name: String,
        domain_title: String,
    },
    QuizQuestion {
        exam_name: String,
        domain_title: String,
    },
    MockQuestion {
        exam_name: String,
        index: usize,
    },
}

#[derive(Debug)]
pub enum ContentResponse {
    Syllabus(Result<Vec<Domain>, ProviderError>),
    StudyModule(Result<StudyModule, ProviderError>),
    QuizQuestion(Result<QuizQuestion, ProviderError>),
    MockQuestion {
        index: usize,
        result: Result<QuizQuestion, ProviderError>,
    },
}

#[derive(Debug)]
pub struct Delivery {
    pub ticket: Ticket,
    pub response: ContentResponse,
}

pub async fn serve(provider: &dyn ContentProvider, request: ContentRequest) -> ContentResponse {
    match request {
        ContentRequest::Syllabus { exam_name } => {
            ContentResponse::Syllabus(provider.fetch_syllabus(&exam_name).await)
        }
        ContentRequest::StudyModule {
            exam_name,
            domain_title,
        } => ContentResponse::StudyModule(
            provider
                .fetch_study_module(&exam_name, &domain_title)
                .await,
        ),
        ContentRequest::QuizQuestion {
            exam_name,
            domain_title,
        } => ContentResponse::QuizQuestion(
            provider
                .fetch_quiz_question(&exam_name, &domain_title)
                .await,
        ),
        ContentRequest::MockQuestion { exam_name, index } => ContentResponse::MockQuestion {
            index,
            result: provider.fetch_mock_question(&exam_name).await,
        },
    }
}

/// Runs provider calls off the UI loop and posts results back over a channel.
#[derive(Clone)]
pub struct FetchWorker {
    provider: Arc<dyn ContentProvider>,
    tx: UnboundedSender<Delivery>,
}

impl FetchWorker {
    pub fn new(provider: Arc<dyn ContentProvider>, tx: UnboundedSender<Delivery>) -> Self {
        Self { provider, tx }
    }

    pub fn dispatch(&self, ticket: Ticket, request: ContentRequest) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        log::debug!("Dispatching {:?} for ticket {}", request, ticket);
        tokio::spawn(async move {
            let response = serve(provider.as_ref(), request).await;
            if tx.send(Delivery { ticket, response }).is_err() {
                log::debug!("Receiver closed, dropping response for ticket {}", ticket);
            }
        })
    }
}
