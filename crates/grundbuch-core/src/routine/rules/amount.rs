//! Amount extraction for section III entries.

use crate::envelope::Payload;
use crate::error::RoutineError;
use crate::models::Amount;
use crate::pattern::Pattern;
use crate::routine::RoutineContext;
use crate::vocabulary::Currency;

use super::FieldExtractor;

/// Amount field extractor.
///
/// Expects the `amount` pattern layout: integer part, optional fraction,
/// optional currency symbol. A bare number without fraction or currency is
/// not an amount.
pub struct AmountExtractor<'a> {
    pattern: &'a Pattern,
    default_currency: Currency,
}

impl<'a> AmountExtractor<'a> {
    pub fn new(pattern: &'a Pattern, default_currency: Currency) -> Self {
        Self {
            pattern,
            default_currency,
        }
    }
}

impl FieldExtractor for AmountExtractor<'_> {
    type Output = Amount;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in self.pattern.regex().captures_iter(text) {
            let (Some(integer), fraction, symbol) = (caps.get(1), caps.get(2), caps.get(3)) else {
                continue;
            };
            if fraction.is_none() && symbol.is_none() {
                continue;
            }

            let currency = symbol
                .and_then(|m| Currency::from_symbol(m.as_str()))
                .unwrap_or(self.default_currency);
            let fraction = fraction.map_or("", |m| m.as_str());

            if let Some(amount) = Amount::from_german(integer.as_str(), fraction, currency) {
                results.push(amount);
            }
        }

        results
    }
}

/// First amount found in `text`.
pub fn amount_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    let text = ctx.text()?;
    let extractor = AmountExtractor::new(
        ctx.pattern("amount")?,
        ctx.config().extraction.default_currency,
    );

    extractor
        .extract(text)
        .map(Payload::Amount)
        .ok_or_else(|| RoutineError::NotFound(format!("no amount in {:?}", text)))
}
