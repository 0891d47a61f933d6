//! Selector dispatch: one call in, one envelope out.

use std::any::Any;
use std::error::Error;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::envelope::Envelope;
use crate::error::ScriptError;
use crate::routine::{RoutineArgs, RoutineRegistry};

/// Run the routine registered under `selector` with the JSON argument object
/// `raw_args`.
///
/// An unknown selector yields the `invalid function` envelope and the
/// arguments are never parsed. Every other failure, panics included, is
/// reported as an error envelope carrying the encoded trace.
pub fn invoke(registry: &RoutineRegistry, selector: &str, raw_args: &str) -> Envelope {
    let Some(routine) = registry.get(selector) else {
        debug!(selector, "no routine registered");
        return Envelope::invalid_function();
    };

    debug!(selector, "dispatching");
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<_, ScriptError> {
        let args: RoutineArgs = serde_json::from_str(raw_args)?;
        let ctx = registry.context(args)?;
        Ok(routine.run(&ctx)?)
    }));

    match outcome {
        Ok(Ok(payload)) => {
            debug!(selector, kind = payload.kind(), "routine succeeded");
            Envelope::Ok(payload)
        }
        Ok(Err(err)) => {
            warn!(selector, error = %err, "routine failed");
            Envelope::failure(&render_trace(selector, &err))
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            warn!(selector, %message, "routine panicked");
            Envelope::failure(&format!("routine `{}` panicked: {}", selector, message))
        }
    }
}

/// Render an error and its source chain, one cause per line.
///
/// A cause whose message its parent already ends with is not repeated.
pub fn render_trace(selector: &str, err: &dyn Error) -> String {
    let mut trace = format!("routine `{}` failed: {}", selector, err);
    let mut previous = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !previous.ends_with(&message) {
            let _ = write!(trace, "\n  caused by: {}", message);
        }
        previous = message;
        source = cause.source();
    }
    trace
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Payload;
    use crate::error::RoutineError;
    use crate::models::ScriptConfig;
    use crate::routine::RoutineContext;
    use pretty_assertions::assert_eq;

    fn registry() -> RoutineRegistry {
        RoutineRegistry::with_builtins(ScriptConfig::default())
    }

    #[test]
    fn test_unknown_selector_skips_argument_parsing() {
        let envelope = invoke(&registry(), "doesNotExist", "not json at all");
        assert_eq!(envelope, Envelope::invalid_function());
    }

    #[test]
    fn test_ok_envelope() {
        let envelope = invoke(&registry(), "cleanText", r#"{"text":"Flur  6 , Flst. 3"}"#);
        assert_eq!(envelope, Envelope::ok("Flur 6, Flst. 3"));
    }

    #[test]
    fn test_malformed_arguments() {
        let envelope = invoke(&registry(), "cleanText", "{text:");
        let message = envelope.into_result().unwrap_err();
        assert!(message.starts_with("routine `cleanText` failed: invalid argument object"));
    }

    #[test]
    fn test_bad_pattern_reports_its_name() {
        let envelope = invoke(&registry(), "amount", r#"{"text":"5 DM","re":{"amount":"("}}"#);
        let message = envelope.into_result().unwrap_err();
        assert!(message.contains("failed to compile pattern `amount`"));
        assert!(message.contains("\n  caused by: "));
    }

    #[test]
    fn test_routine_error_trace() {
        let envelope = invoke(&registry(), "amount", "{}");
        assert_eq!(
            envelope.into_result().unwrap_err(),
            "routine `amount` failed: routine error: missing required argument: text"
        );
    }

    #[test]
    fn test_panic_becomes_error_envelope() {
        let mut registry = registry();
        registry.register_fn("boom", |_: &RoutineContext| -> Result<Payload, RoutineError> {
            panic!("kaputt")
        });

        let envelope = invoke(&registry, "boom", "{}");
        assert_eq!(envelope.into_result().unwrap_err(), "routine `boom` panicked: kaputt");
    }

    #[test]
    fn test_render_trace_walks_sources() {
        let err = ScriptError::Pattern(crate::error::PatternError {
            name: "x".into(),
            source: regex::Regex::new("(").unwrap_err(),
        });
        let trace = render_trace("testRegex", &err);
        let lines: Vec<&str> = trace.lines().collect();
        assert_eq!(lines[0], "routine `testRegex` failed: pattern error: failed to compile pattern `x`");
        assert!(lines[1].starts_with("  caused by: regex parse error"));
    }
}
