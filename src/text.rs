use crate::models::{LanguageMode, MultilingualText};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref RP_TAG: Regex = Regex::new(r"(?s)<rp>.*?</rp>").unwrap();
    static ref RT_TAG: Regex = Regex::new(r"(?s)<rt>(.*?)</rt>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Turns `<ruby>漢字<rt>かんじ</rt></ruby>` into `漢字(かんじ)` for the terminal.
/// Any other markup is dropped.
pub fn flatten_ruby(markup: &str) -> String {
    let without_fallback = RP_TAG.replace_all(markup, "");
    let annotated = RT_TAG.replace_all(&without_fallback, "($1)");
    let plain = ANY_TAG.replace_all(&annotated, "");
    plain
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// One line of text per language shown in `mode`.
pub fn localized_lines(text: &MultilingualText, mode: LanguageMode, base: Style) -> Vec<Line<'static>> {
    match mode {
        LanguageMode::En => vec![Line::from(Span::styled(text.en.clone(), base))],
        LanguageMode::Zh => vec![Line::from(Span::styled(text.zh.clone(), base))],
        LanguageMode::Jp => vec![Line::from(Span::styled(text.jp.clone(), base))],
        LanguageMode::JpRuby => vec![Line::from(Span::styled(flatten_ruby(&text.jp_ruby), base))],
        LanguageMode::All => {
            let secondary = base.fg(Color::Gray).remove_modifier(Modifier::BOLD);
            vec![
                Line::from(Span::styled(text.en.clone(), base)),
                Line::from(Span::styled(text.zh.clone(), secondary)),
                Line::from(Span::styled(flatten_ruby(&text.jp_ruby), secondary)),
            ]
        }
    }
}

/// Single-line rendering for list rows.
pub fn localized_inline(text: &MultilingualText, mode: LanguageMode) -> String {
    match mode {
        LanguageMode::En => text.en.clone(),
        LanguageMode::Zh => text.zh.clone(),
        LanguageMode::Jp => text.jp.clone(),
        LanguageMode::JpRuby => flatten_ruby(&text.jp_ruby),
        LanguageMode::All => [text.en.as_str(), text.zh.as_str(), text.jp.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" / "),
    }
}
