//! Core library for German land-register (Grundbuch) text extraction.
//!
//! This crate provides:
//! - Closed vocabularies for rights, charges and currencies
//! - Named regex patterns with per-call overrides
//! - Encumbrance, parcel and amount models
//! - Built-in extraction routines behind a selector registry
//! - The one-line result envelope returned to the host

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod models;
pub mod pattern;
pub mod routine;
pub mod vocabulary;

pub use dispatch::{invoke, render_trace};
pub use envelope::{Envelope, ErrorBody, Payload, ValueHint};
pub use error::{EnvelopeError, PatternError, Result, RoutineError, ScriptError, VocabularyError};
pub use models::{
    Amount, EncumbranceCollection, EncumbranceEntry, LandParcelReference, ScriptConfig,
};
pub use pattern::{Found, Pattern, Patterns};
pub use routine::{Routine, RoutineArgs, RoutineContext, RoutineRegistry, json_routine};
pub use vocabulary::{Currency, DebtType, RightType, RightsClassification};
