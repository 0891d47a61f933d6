//! Text cleanup and sentence splitting.

use crate::envelope::Payload;
use crate::error::RoutineError;
use crate::routine::RoutineContext;

use super::patterns::{HYPHEN_BREAK, LAYOUT_WHITESPACE, MONTH, SPACE_BEFORE_PUNCTUATION, WHITESPACE_RUN};

/// Normalize OCR/PDF text: rejoin hyphenated line breaks, flatten layout
/// whitespace, drop spaces before punctuation.
pub fn clean_text(text: &str) -> String {
    let text = HYPHEN_BREAK.replace_all(text, "$1$2");
    let text = LAYOUT_WHITESPACE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// Split register text into sentences.
///
/// A sentence ends at a period followed by a space and an uppercase letter,
/// unless the period closes a known abbreviation or a day number followed by
/// a month name ("am 1. Januar 1990").
pub fn split_sentences(text: &str, abbreviations: &[String]) -> Vec<String> {
    let mut pieces: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '.' {
            continue;
        }
        let mut rest = text[i + 1..].chars();
        if rest.next() == Some(' ') && rest.next().is_some_and(char::is_uppercase) {
            pieces.push(&text[start..=i]);
            start = i + 2;
            chars.next();
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    let mut sentences: Vec<String> = Vec::new();
    let mut pending = String::new();

    for (n, piece) in pieces.iter().enumerate() {
        if !pending.is_empty() {
            pending.push(' ');
        }
        pending.push_str(piece);

        let continues = pieces
            .get(n + 1)
            .is_some_and(|next| ends_with_abbreviation(piece, abbreviations) || ends_with_day(piece, next));
        if continues {
            continue;
        }

        let sentence = pending.trim().trim_end_matches('.').trim_end().to_string();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        pending.clear();
    }

    sentences
}

fn last_word(piece: &str) -> &str {
    let piece = piece.trim_end().trim_end_matches('.');
    piece.rsplit(char::is_whitespace).next().unwrap_or(piece)
}

fn ends_with_abbreviation(piece: &str, abbreviations: &[String]) -> bool {
    let word = last_word(piece);
    abbreviations.iter().any(|a| a.eq_ignore_ascii_case(word))
}

fn ends_with_day(piece: &str, next: &str) -> bool {
    last_word(piece).chars().last().is_some_and(|c| c.is_ascii_digit()) && MONTH.is_match(next.trim_start())
}

/// Sentences given with the call, or the split of its cleaned text.
pub fn sentences_of(ctx: &RoutineContext) -> Result<Vec<String>, RoutineError> {
    if !ctx.args().sentences.is_empty() {
        return Ok(ctx.args().sentences.clone());
    }
    Ok(split_sentences(&clean_text(ctx.text()?), &ctx.config().text.abbreviations))
}

pub fn clean_text_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    Ok(Payload::Text(clean_text(ctx.text()?)))
}

pub fn abbreviations_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    Ok(Payload::List(ctx.config().text.abbreviations.clone()))
}

pub fn sentences_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = clean_text(ctx.text()?);
    Ok(Payload::List(split_sentences(&text, &ctx.config().text.abbreviations)))
}
