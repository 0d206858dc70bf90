use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamLevel {
    Foundational,
    Associate,
    Professional,
    Specialty,
}

impl ExamLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExamLevel::Foundational => "Foundational",
            ExamLevel::Associate => "Associate",
            ExamLevel::Professional => "Professional",
            ExamLevel::Specialty => "Specialty",
        }
    }
}

/// A certification exam from the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exam {
    pub code: &'static str,
    pub name: &'static str,
    pub level: ExamLevel,
    pub description: &'static str,
    pub color: &'static str,
}

/// Four parallel renderings of the same text. `jp_ruby` carries inline
/// `<ruby>` markup and is never interpreted outside the text renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilingualText {
    pub en: String,
    pub zh: String,
    pub jp: String,
    pub jp_ruby: String,
}

impl MultilingualText {
    pub fn new(en: &str, zh: &str, jp: &str, jp_ruby: &str) -> Self {
        Self {
            en: en.to_string(),
            zh: zh.to_string(),
            jp: jp.to_string(),
            jp_ruby: jp_ruby.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    /// English title, also the query key sent back to the provider.
    pub title: String,
    pub display_title: MultilingualText,
    pub percentage: f64,
    pub description: MultilingualText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: u32,
    pub text: MultilingualText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    #[serde(default)]
    pub context: Option<MultilingualText>,
    pub question: MultilingualText,
    pub options: Vec<QuizOption>,
    pub correct_id: u32,
    pub explanation: MultilingualText,
}

impl QuizQuestion {
    pub fn option(&self, id: u32) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.option(self.correct_id)
    }

    pub fn is_correct(&self, option_id: u32) -> bool {
        option_id == self.correct_id
    }

    /// Option ids must be unique and the correct id must name exactly one of them.
    pub fn validate(&self) -> Result<(), String> {
        if self.options.is_empty() {
            return Err(format!("question {} has no options", self.id));
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id) {
                return Err(format!(
                    "question {} repeats option id {}",
                    self.id, option.id
                ));
            }
        }
        if !seen.contains(&self.correct_id) {
            return Err(format!(
                "question {} has correctId {} which matches no option",
                self.id, self.correct_id
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyModule {
    pub id: String,
    pub title: MultilingualText,
    pub description: MultilingualText,
    pub key_points: Vec<MultilingualText>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguageMode {
    #[default]
    All,
    En,
    Zh,
    Jp,
    JpRuby,
}

impl LanguageMode {
    /// Toggle order used by every content screen.
    pub fn next(self) -> Self {
        match self {
            LanguageMode::All => LanguageMode::En,
            LanguageMode::En => LanguageMode::Zh,
            LanguageMode::Zh => LanguageMode::JpRuby,
            LanguageMode::Jp | LanguageMode::JpRuby => LanguageMode::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LanguageMode::All => "Mix",
            LanguageMode::En => "EN",
            LanguageMode::Zh => "中",
            LanguageMode::Jp => "日",
            LanguageMode::JpRuby => "日(Ruby)",
        }
    }
}

/// Display letter for an option id: 0 -> 'A', 1 -> 'B', ...
pub fn answer_letter(option_id: u32) -> char {
    char::from_u32('A' as u32 + option_id).unwrap_or('?')
}
