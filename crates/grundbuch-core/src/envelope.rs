//! Result envelope returned to the host, one line per invocation.
//!
//! ```text
//! ok:  {"result":"ok","data":{"type":<payloadKind>,"data":<payload>}}
//! err: {"result":"err","data":{"text":<errorText>}}
//! ```
//!
//! Error text is a rendered trace with `"` turned into `'` and every line
//! break turned into [`LINE_BREAK_MARKER`], then base64 over its UTF-8 bytes.
//! The dispatch failure `invalid function` is sent as plain text.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EnvelopeError;
use crate::models::{Amount, EncumbranceCollection};
use crate::vocabulary::{DebtType, RightsClassification};

/// Glyph standing in for line breaks inside encoded error text.
pub const LINE_BREAK_MARKER: char = '⣿';

/// Error text for a selector that names no routine.
pub const INVALID_FUNCTION: &str = "invalid function";

/// Typed result of a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Payload {
    Text(String),
    List(Vec<String>),
    EncumbranceCollection(EncumbranceCollection),
    Amount(Amount),
    RightsClassification(RightsClassification),
    DebtClassification(DebtType),
    /// A JSON result of no known shape. Always carries an empty string.
    Unknown(String),
}

/// How to read a raw JSON result that may be a classification token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueHint {
    #[default]
    None,
    Rights,
    Debt,
}

impl Payload {
    pub fn unknown() -> Self {
        Payload::Unknown(String::new())
    }

    /// Payload kind as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::List(_) => "list",
            Payload::EncumbranceCollection(_) => "encumbranceCollection",
            Payload::Amount(_) => "amount",
            Payload::RightsClassification(_) => "rightsClassification",
            Payload::DebtClassification(_) => "debtClassification",
            Payload::Unknown(_) => "unknown",
        }
    }

    /// Type a raw JSON result by its shape.
    ///
    /// Checked in order: classification (when hinted), text, list of text,
    /// encumbrance collection, amount. Anything else is `unknown` with an
    /// empty payload, which is not an error.
    pub fn from_value(value: Value, hint: ValueHint) -> Self {
        match hint {
            ValueHint::Rights => {
                if let Ok(rights) = serde_json::from_value::<RightsClassification>(value.clone()) {
                    return Payload::RightsClassification(rights);
                }
            }
            ValueHint::Debt => {
                if let Ok(debt) = serde_json::from_value::<DebtType>(value.clone()) {
                    return Payload::DebtClassification(debt);
                }
            }
            ValueHint::None => {}
        }

        match value {
            Value::String(s) => Payload::Text(s),
            Value::Array(items) if items.iter().all(Value::is_string) => Payload::List(
                items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Object(map) => {
                let is_collection = map.contains_key("entries");
                let value = Value::Object(map);
                if is_collection {
                    serde_json::from_value(value)
                        .map_or_else(|_| Payload::unknown(), Payload::EncumbranceCollection)
                } else {
                    serde_json::from_value(value).map_or_else(|_| Payload::unknown(), Payload::Amount)
                }
            }
            _ => Payload::unknown(),
        }
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<Vec<String>> for Payload {
    fn from(items: Vec<String>) -> Self {
        Payload::List(items)
    }
}

impl From<EncumbranceCollection> for Payload {
    fn from(collection: EncumbranceCollection) -> Self {
        Payload::EncumbranceCollection(collection)
    }
}

impl From<Amount> for Payload {
    fn from(amount: Amount) -> Self {
        Payload::Amount(amount)
    }
}

impl From<RightsClassification> for Payload {
    fn from(rights: RightsClassification) -> Self {
        Payload::RightsClassification(rights)
    }
}

impl From<DebtType> for Payload {
    fn from(debt: DebtType) -> Self {
        Payload::DebtClassification(debt)
    }
}

/// Body of an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub text: String,
}

impl ErrorBody {
    /// Readable message: decoded trace, or the raw text when it is not encoded.
    pub fn message(&self) -> String {
        decode_error_text(&self.text).unwrap_or_else(|_| self.text.clone())
    }
}

/// The single value printed per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", content = "data", rename_all = "lowercase")]
pub enum Envelope {
    Ok(Payload),
    Err(ErrorBody),
}

impl Envelope {
    pub fn ok(payload: impl Into<Payload>) -> Self {
        Envelope::Ok(payload.into())
    }

    /// Error envelope for an unrecognized selector.
    pub fn invalid_function() -> Self {
        Envelope::Err(ErrorBody {
            text: INVALID_FUNCTION.to_string(),
        })
    }

    /// Error envelope carrying an encoded trace.
    pub fn failure(trace: &str) -> Self {
        Envelope::Err(ErrorBody {
            text: encode_error_text(trace),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Ok(_))
    }

    /// Serialize to exactly one line.
    ///
    /// Never yields a partial envelope: if the payload cannot be serialized
    /// the line is an error envelope describing that failure.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            let text = encode_error_text(&format!("failed to serialize result: {e}"));
            format!(r#"{{"result":"err","data":{{"text":"{text}"}}}}"#)
        })
    }

    /// Parse a line printed by [`Envelope::to_line`].
    pub fn from_line(line: &str) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_str(line.trim_end())?)
    }

    /// Payload on success, readable message on failure.
    pub fn into_result(self) -> Result<Payload, String> {
        match self {
            Envelope::Ok(payload) => Ok(payload),
            Envelope::Err(body) => Err(body.message()),
        }
    }
}

/// Encode a trace for the error envelope.
pub fn encode_error_text(trace: &str) -> String {
    let marker = LINE_BREAK_MARKER.to_string();
    let flattened = trace
        .replace('"', "'")
        .replace("\r\n", &marker)
        .replace('\n', &marker);
    STANDARD.encode(flattened.as_bytes())
}

/// Reverse [`encode_error_text`]. Double quotes come back as apostrophes.
pub fn decode_error_text(text: &str) -> Result<String, EnvelopeError> {
    let bytes = STANDARD.decode(text)?;
    let flattened = String::from_utf8(bytes)?;
    Ok(flattened.replace(LINE_BREAK_MARKER, "\n"))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: decoding restores the trace with quotes as apostrophes
        #[test]
        fn test_error_text_round_trip(trace in any::<String>()) {
            prop_assume!(!trace.contains(LINE_BREAK_MARKER));

            let encoded = encode_error_text(&trace);
            prop_assert!(!encoded.contains('\n') && !encoded.contains('"'));

            let expected = trace.replace('"', "'").replace("\r\n", "\n");
            prop_assert_eq!(decode_error_text(&encoded).unwrap(), expected);
        }

        /// Property: every failure envelope parses back to the same message
        #[test]
        fn test_failure_line_round_trip(trace in "[a-zA-Z0-9 `:\"\n]{0,40}") {
            let line = Envelope::failure(&trace).to_line();
            prop_assert!(!line.contains('\n'));

            let message = Envelope::from_line(&line).unwrap().into_result().unwrap_err();
            prop_assert_eq!(message, trace.replace('"', "'"));
        }
    }
}
