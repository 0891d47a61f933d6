//! Data models shared by routines and the envelope.

pub mod amount;
pub mod config;
pub mod encumbrance;

pub use amount::Amount;
pub use config::{ExtractionConfig, ScriptConfig, TextConfig};
pub use encumbrance::{EncumbranceCollection, EncumbranceEntry, LandParcelReference};
