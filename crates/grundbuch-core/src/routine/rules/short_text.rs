//! Holder, rank note, registration date and the composed short texts.

use chrono::NaiveDate;

use crate::envelope::Payload;
use crate::error::RoutineError;
use crate::pattern::Pattern;
use crate::routine::RoutineContext;

use super::FieldExtractor;
use super::amount::AmountExtractor;
use super::classify::{classify_debt, classify_right};
use super::text::{clean_text, sentences_of};

/// Registration date extractor over the `registeredOn`/`transferredOn`
/// layout: day, month, year.
pub struct DateExtractor<'a> {
    pattern: &'a Pattern,
}

impl<'a> DateExtractor<'a> {
    pub fn new(pattern: &'a Pattern) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for DateExtractor<'_> {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let day: u32 = caps.get(1)?.as_str().parse().ok()?;
                let month: u32 = caps.get(2)?.as_str().parse().ok()?;
                let year: i32 = caps.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            })
            .collect()
    }
}

/// Holder named in the text, trimmed; `None` when there is none.
pub fn right_holder(ctx: &RoutineContext, text: &str) -> Result<Option<String>, RoutineError> {
    Ok(ctx
        .pattern("holder")?
        .captures(text)
        .into_iter()
        .next()
        .map(|holder| holder.trim().trim_end_matches([',', '.']).trim().to_string())
        .filter(|holder| !holder.is_empty()))
}

/// First sentence carrying a rank statement.
pub fn rank_note(ctx: &RoutineContext, sentences: &[String]) -> Result<Option<String>, RoutineError> {
    let rank = ctx.pattern("rank")?;
    Ok(sentences.iter().find(|s| rank.regex().is_match(s)).cloned())
}

/// Registration date; the last "eingetragen am" wins, "hierher übertragen
/// am" is the fallback.
pub fn registration_date(ctx: &RoutineContext, sentences: &[String]) -> Result<Option<NaiveDate>, RoutineError> {
    for name in ["registeredOn", "transferredOn"] {
        let extractor = DateExtractor::new(ctx.pattern(name)?);
        let last = sentences.iter().flat_map(|s| extractor.extract_all(s)).last();
        if last.is_some() {
            return Ok(last);
        }
    }
    Ok(None)
}

fn is_registration_sentence(ctx: &RoutineContext, sentence: &str) -> Result<bool, RoutineError> {
    Ok(ctx.pattern("registeredOn")?.regex().is_match(sentence)
        || ctx.pattern("transferredOn")?.regex().is_match(sentence))
}

pub fn right_holder_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = clean_text(ctx.text()?);
    Ok(Payload::Text(right_holder(ctx, &text)?.unwrap_or_default()))
}

pub fn rank_note_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let sentences = sentences_of(ctx)?;
    Ok(Payload::Text(rank_note(ctx, &sentences)?.unwrap_or_default()))
}

pub fn registration_date_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let sentences = sentences_of(ctx)?;
    let date = registration_date(ctx, &sentences)?;
    Ok(Payload::Text(
        date.map(|d| d.format("%d.%m.%Y").to_string()).unwrap_or_default(),
    ))
}

/// Short text of a section II right: the first sentence that is neither a
/// registration nor a rank statement, completed by holder and rank note.
pub fn short_text_rights_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = clean_text(ctx.text()?);
    let sentences = sentences_of(ctx)?;
    let classification = classify_right(ctx, &text)?;

    let holder = match ctx.args().holder.clone() {
        Some(holder) => Some(holder),
        None => right_holder(ctx, &text)?,
    };
    let rank = match ctx.args().rank_note.clone() {
        Some(rank) => Some(rank),
        None => rank_note(ctx, &sentences)?,
    };
    let rank_pattern = ctx.pattern("rank")?;

    let mut main = None;
    for sentence in &sentences {
        if is_registration_sentence(ctx, sentence)? || rank_pattern.regex().is_match(sentence) {
            continue;
        }
        main = Some(sentence.clone());
        break;
    }
    let mut short = main.unwrap_or_else(|| classification.label().to_string());

    if let Some(holder) = holder.filter(|h| !h.trim().is_empty()) {
        if classification.requires_holder() && !short.contains(holder.trim()) {
            short = format!("{} für {}", short, holder.trim());
        }
    }
    if let Some(rank) = rank.filter(|r| !r.trim().is_empty()) {
        short = format!("{}; {}", short, rank.trim());
    }

    Ok(Payload::Text(short.trim().to_string()))
}

/// Short text of a section III charge: "<type> über <amount> für <holder>".
pub fn short_text_debts_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = clean_text(ctx.text()?);

    let debt = match ctx.args().debt_type {
        Some(debt) => debt,
        None => classify_debt(ctx, &text)?,
    };
    let amount = match ctx.args().amount {
        Some(amount) => Some(amount),
        None => AmountExtractor::new(ctx.pattern("amount")?, ctx.config().extraction.default_currency)
            .extract(&text),
    };
    let holder = match ctx.args().holder.clone() {
        Some(holder) => Some(holder),
        None => right_holder(ctx, &text)?,
    };

    let mut parts: Vec<String> = Vec::new();
    if !debt.label().is_empty() {
        parts.push(debt.label().to_string());
    }
    if let Some(amount) = amount {
        parts.push(format!("über {}", amount));
    }
    if let Some(holder) = holder.filter(|h| !h.trim().is_empty()) {
        parts.push(format!("für {}", holder.trim()));
    }

    Ok(Payload::Text(parts.join(" ")))
}
