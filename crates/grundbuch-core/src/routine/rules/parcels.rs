//! Column-1 parsing: which inventory entries a charge rests on.

use std::collections::BTreeMap;

use tracing::debug;

use crate::envelope::Payload;
use crate::error::RoutineError;
use crate::models::{EncumbranceCollection, EncumbranceEntry, LandParcelReference};
use crate::pattern::Pattern;
use crate::routine::RoutineContext;

use super::FieldExtractor;
use super::patterns::TOKEN_SEPARATOR;

/// Upper bound for the length of a serial range like `4-6`.
const MAX_RANGE: u32 = 500;

/// Land parcel reference extractor.
///
/// Expects the `parcel` pattern layout: cadastral area (optional), district,
/// parcel, partial area in square metres (optional).
pub struct ParcelExtractor<'a> {
    pattern: &'a Pattern,
}

impl<'a> ParcelExtractor<'a> {
    pub fn new(pattern: &'a Pattern) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for ParcelExtractor<'_> {
    type Output = LandParcelReference;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let mut parcel = LandParcelReference::new(caps.get(2)?.as_str(), caps.get(3)?.as_str());
                if let Some(name) = caps.get(1) {
                    parcel = parcel.with_cadastral_area(name.as_str().trim());
                }
                if let Some(sqm) = caps.get(4).and_then(|m| m.as_str().parse().ok()) {
                    parcel = parcel.with_partial_area(sqm);
                }
                Some(parcel)
            })
            .collect()
    }
}

/// Serial numbers named by one column-1 token ("4-6" -> 4, 5, 6).
fn serials_of(token: &str, range: &Pattern, serial: &Pattern) -> Result<Vec<u32>, String> {
    if let [from, to] = range.captures(token).as_slice() {
        let (Ok(from), Ok(to)) = (from.parse::<u32>(), to.parse::<u32>()) else {
            return Err(format!("unreadable range `{}`", token));
        };
        if from > to || to - from > MAX_RANGE {
            return Err(format!("implausible range `{}`", token));
        }
        return Ok((from..=to).collect());
    }

    serial
        .find_all(token)
        .iter()
        .map(|found| {
            found
                .text()
                .parse::<u32>()
                .map_err(|_| format!("unreadable serial number in `{}`", token))
        })
        .collect()
}

/// Build the encumbrance collection for a column-1 `entry`.
///
/// Parcel references are read from `text`. A reference under a
/// `lfd. Nr. N` heading belongs to serial N; references before any heading
/// belong to the single partially encumbered serial, if there is exactly one.
pub fn encumbrances(ctx: &RoutineContext) -> Result<EncumbranceCollection, RoutineError> {
    let entry = ctx.entry()?;
    let partial = ctx.pattern("partial")?;
    let range = ctx.pattern("serialRange")?;
    let serial = ctx.pattern("serial")?;

    let mut collection = EncumbranceCollection::new();
    let mut assignments: BTreeMap<u32, Vec<LandParcelReference>> = BTreeMap::new();
    let mut partial_serials: Vec<u32> = Vec::new();

    for token in TOKEN_SEPARATOR.split(entry).map(str::trim).filter(|t| !t.is_empty()) {
        let serials = match serials_of(token, range, serial) {
            Ok(serials) if !serials.is_empty() => serials,
            Ok(_) => {
                collection.warn(format!("no serial number in `{}`", token));
                continue;
            }
            Err(message) => {
                collection.warn(message);
                continue;
            }
        };
        let is_partial = partial.regex().is_match(token);

        for number in serials {
            if ctx.config().extraction.warn_on_duplicate_serials
                && collection.iter().any(|e| e.serial_number() == number)
            {
                collection.warn(format!("lfd. Nr. {} listed more than once", number));
            }
            collection.append(EncumbranceEntry::new(number));
            if is_partial {
                partial_serials.push(number);
                assignments.entry(number).or_default();
            }
        }
    }

    if let Some(text) = ctx.args().text.as_deref() {
        assign_parcels(ctx, text, &partial_serials, &mut assignments, &mut collection)?;
    }

    for (number, parcels) in assignments {
        if parcels.is_empty() {
            collection.warn(format!(
                "lfd. Nr. {} is partially encumbered but names no parcel",
                number
            ));
        }
        match collection.entry_mut(number) {
            Some(entry) => entry.append_partial_parcels(parcels),
            None => collection.warn(format!(
                "parcels refer to lfd. Nr. {} which column 1 does not list",
                number
            )),
        }
    }

    debug!(entries = collection.len(), warnings = collection.warnings().len(), "parsed column 1");
    Ok(collection)
}

fn assign_parcels(
    ctx: &RoutineContext,
    text: &str,
    partial_serials: &[u32],
    assignments: &mut BTreeMap<u32, Vec<LandParcelReference>>,
    collection: &mut EncumbranceCollection,
) -> Result<(), RoutineError> {
    let extractor = ParcelExtractor::new(ctx.pattern("parcel")?);
    let headings: Vec<(usize, usize, Option<u32>)> = ctx
        .pattern("serialHeading")?
        .regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1).and_then(|m| m.as_str().parse().ok());
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    let unheaded_end = headings.first().map_or(text.len(), |(start, _, _)| *start);
    let unheaded = extractor.extract_all(&text[..unheaded_end]);
    if !unheaded.is_empty() {
        match partial_serials {
            [only] => assignments.entry(*only).or_default().extend(unheaded),
            [] => collection.warn("parcel references found but no serial is marked as partial"),
            _ => collection.warn(format!(
                "parcel references without lfd. Nr. are ambiguous between {} partial serials",
                partial_serials.len()
            )),
        }
    }

    for (n, (_, end, number)) in headings.iter().enumerate() {
        let section_end = headings.get(n + 1).map_or(text.len(), |(start, _, _)| *start);
        let parcels = extractor.extract_all(&text[*end..section_end]);
        match number {
            Some(number) if !parcels.is_empty() => {
                assignments.entry(*number).or_default().extend(parcels)
            }
            Some(_) => {}
            None => collection.warn("unreadable lfd. Nr. heading"),
        }
    }

    Ok(())
}

pub fn parcels_routine(ctx: &RoutineContext) -> Result<Payload, RoutineError> {
    Ok(Payload::EncumbranceCollection(encumbrances(ctx)?))
}
