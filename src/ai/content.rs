use crate::ai::client::{ModelConfig, OpenRouterClient};
use crate::config::Config;
use crate::error::{ConfigError, ProviderError};
use crate::models::{Domain, QuizQuestion, StudyModule};
use async_trait::async_trait;
use rand::Rng;
use serde::de::DeserializeOwned;

/// Source of generated study content. Every call either yields a fully
/// validated value or fails; partial content never crosses this boundary.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_syllabus(&self, exam_name: &str) -> Result<Vec<Domain>, ProviderError>;

    async fn fetch_study_module(
        &self,
        exam_name: &str,
        domain_title: &str,
    ) -> Result<StudyModule, ProviderError>;

    async fn fetch_quiz_question(
        &self,
        exam_name: &str,
        domain_title: &str,
    ) -> Result<QuizQuestion, ProviderError>;

    /// The provider picks the domain itself and does not report it.
    async fn fetch_mock_question(&self, exam_name: &str) -> Result<QuizQuestion, ProviderError>;
}

const TEXT_SHAPE: &str =
    r#"{"en": "English", "zh": "Simplified Chinese", "jp": "Japanese", "jp_ruby": "Japanese with <ruby>漢字<rt>かんじ</rt></ruby> readings"}"#;

fn question_shape() -> String {
    format!(
        r#"{{
    "id": "string",
    "context": {text} or null,
    "question": {text},
    "options": [{{"id": 0, "text": {text}}}, {{"id": 1, "text": {text}}}, {{"id": 2, "text": {text}}}, {{"id": 3, "text": {text}}}],
    "correctId": integer matching one option id,
    "explanation": {text}
}}"#,
        text = TEXT_SHAPE
    )
}

pub fn syllabus_prompt(exam_name: &str) -> String {
    format!(
        r#"Create a study syllabus for the AWS Exam: "{exam_name}".
Return a list of 4-6 major domains (knowledge areas) covered in this exam.
Assign a rough percentage weight (0-100) to each.
Provide titles and descriptions in English, Chinese (Simplified), and Japanese.
For Japanese, provide a standard version and a version with HTML <ruby> tags for Kanji readings.

Respond ONLY with a JSON array of this exact structure:
[
  {{
    "id": "string",
    "title": "English title",
    "displayTitle": {text},
    "percentage": number,
    "description": {text}
  }}
]"#,
        text = TEXT_SHAPE
    )
}

pub fn study_module_prompt(exam_name: &str, domain_title: &str) -> String {
    format!(
        r#"Create a concise study guide module for the AWS Exam: "{exam_name}", specifically for the Domain: "{domain_title}".
Provide a general description and a list of 5-7 key concepts/technologies to master.
Ensure all text is provided in English, Chinese, and Japanese (Standard + HTML Ruby tags).

Respond ONLY with this exact JSON structure:
{{
  "id": "string",
  "title": {text},
  "description": {text},
  "keyPoints": [{text}]
}}"#,
        text = TEXT_SHAPE
    )
}

pub fn quiz_question_prompt(exam_name: &str, domain_title: &str, variation: u32) -> String {
    format!(
        r#"Generate a high-quality, scenario-based multiple choice question for AWS Exam: "{exam_name}", Domain: "{domain_title}".
The question should test practical knowledge, not just definitions.
Provide a 'context' (the scenario), the 'question' (what is asked), 4 options, the correct option ID, and a detailed explanation.
All text fields must be in English, Chinese, and Japanese (Standard + HTML Ruby tags).
Ensure the Japanese Ruby tags are valid HTML (e.g., <ruby>漢字<rt>かんじ</rt></ruby>).
Variation seed: {variation}

Respond ONLY with this exact JSON structure:
{shape}"#,
        shape = question_shape()
    )
}

pub fn mock_question_prompt(exam_name: &str, variation: u32) -> String {
    format!(
        r#"Generate a challenging practice exam question for the AWS Exam: "{exam_name}".
Randomly select one of the major exam domains or topic areas (do not output the domain name, just the question).
The question should be scenario-based.
Provide: 'context', 'question', 4 options, correctId, and explanation.
All text fields must be in English, Chinese, and Japanese (Standard + HTML Ruby tags).
Variation seed: {variation}

Respond ONLY with this exact JSON structure:
{shape}"#,
        shape = question_shape()
    )
}

/// Strips markdown fences and any prose around the outermost JSON value.
pub fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    let start = cleaned.find(['{', '[']);
    let end = cleaned.rfind(['}', ']']);
    if let (Some(start), Some(end)) = (start, end)
        && start <= end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

fn parse_json<T: DeserializeOwned>(what: &str, response: &str) -> Result<T, ProviderError> {
    let cleaned = clean_json_response(response);
    serde_json::from_str(&cleaned).map_err(|e| {
        log::warn!("Failed to parse {}: {}\nRaw: {}", what, e, response);
        ProviderError::Malformed(format!("{}: {}", what, e))
    })
}

pub fn parse_syllabus(response: &str) -> Result<Vec<Domain>, ProviderError> {
    let domains: Vec<Domain> = parse_json("syllabus", response)?;
    if domains.is_empty() {
        return Err(ProviderError::Malformed("syllabus has no domains".to_string()));
    }
    if let Some(domain) = domains
        .iter()
        .find(|d| !(0.0..=100.0).contains(&d.percentage))
    {
        return Err(ProviderError::Malformed(format!(
            "domain {} has weight {} outside 0-100",
            domain.id, domain.percentage
        )));
    }
    if let Some(domain) = domains.iter().find(|d| d.title.trim().is_empty()) {
        return Err(ProviderError::Malformed(format!(
            "domain {} has an empty title",
            domain.id
        )));
    }
    Ok(domains)
}

pub fn parse_study_module(response: &str) -> Result<StudyModule, ProviderError> {
    parse_json("study module", response)
}

pub fn parse_quiz_question(response: &str) -> Result<QuizQuestion, ProviderError> {
    let question: QuizQuestion = parse_json("quiz question", response)?;
    question.validate().map_err(ProviderError::Malformed)?;
    Ok(question)
}

/// `ContentProvider` backed by an OpenRouter chat model.
#[derive(Debug)]
pub struct OpenRouterProvider {
    client: OpenRouterClient,
    model: ModelConfig,
}

impl OpenRouterProvider {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?;
        let client = OpenRouterClient::new(api_key).map_err(ConfigError::Client)?;
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    async fn ask(&self, what: &str, prompt: String) -> Result<String, ProviderError> {
        log::debug!("Requesting {} from {}", what, self.model.model);
        let response = self.client.complete(&prompt, &self.model).await;
        match &response {
            Ok(text) => log::debug!("Received {} ({} bytes)", what, text.len()),
            Err(e) => log::warn!("Request for {} failed: {}", what, e),
        }
        response
    }
}

fn variation_seed() -> u32 {
    rand::thread_rng().gen_range(1000..10000)
}

#[async_trait]
impl ContentProvider for OpenRouterProvider {
    async fn fetch_syllabus(&self, exam_name: &str) -> Result<Vec<Domain>, ProviderError> {
        let raw = self.ask("syllabus", syllabus_prompt(exam_name)).await?;
        parse_syllabus(&raw)
    }

    async fn fetch_study_module(
        &self,
        exam_name: &str,
        domain_title: &str,
    ) -> Result<StudyModule, ProviderError> {
        let raw = self
            .ask("study module", study_module_prompt(exam_name, domain_title))
            .await?;
        parse_study_module(&raw)
    }

    async fn fetch_quiz_question(
        &self,
        exam_name: &str,
        domain_title: &str,
    ) -> Result<QuizQuestion, ProviderError> {
        let prompt = quiz_question_prompt(exam_name, domain_title, variation_seed());
        let raw = self.ask("quiz question", prompt).await?;
        parse_quiz_question(&raw)
    }

    async fn fetch_mock_question(&self, exam_name: &str) -> Result<QuizQuestion, ProviderError> {
        let prompt = mock_question_prompt(exam_name, variation_seed());
        let raw = self.ask("mock question", prompt).await?;
        parse_quiz_question(&raw)
    }
}
