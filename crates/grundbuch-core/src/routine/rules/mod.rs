//! Built-in routines for land-register entries.

pub mod amount;
pub mod classify;
pub mod parcels;
pub mod patterns;
pub mod short_text;
pub mod text;

pub use amount::AmountExtractor;
pub use parcels::ParcelExtractor;
pub use patterns::{DEFAULT_PATTERNS, default_patterns};
pub use short_text::DateExtractor;
pub use text::{clean_text, split_sentences};

use super::RoutineRegistry;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Register every built-in routine under its selector.
pub fn register_builtins(registry: &mut RoutineRegistry) {
    registry.register_fn("cleanText", text::clean_text_routine);
    registry.register_fn("abbreviations", text::abbreviations_routine);
    registry.register_fn("sentences", text::sentences_routine);
    registry.register_fn("parcels", parcels::parcels_routine);
    registry.register_fn("rightType", classify::right_type_routine);
    registry.register_fn("debtType", classify::debt_type_routine);
    registry.register_fn("amount", amount::amount_routine);
    registry.register_fn("rightHolder", short_text::right_holder_routine);
    registry.register_fn("rankNote", short_text::rank_note_routine);
    registry.register_fn("registrationDate", short_text::registration_date_routine);
    registry.register_fn("shortTextRights", short_text::short_text_rights_routine);
    registry.register_fn("shortTextDebts", short_text::short_text_debts_routine);
    registry.register_fn("testRegex", regex_test::test_regex_routine);
}
