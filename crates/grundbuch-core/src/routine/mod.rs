//! Routine contract: arguments, context and the trait every routine implements.

pub mod registry;
pub mod rules;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{Payload, ValueHint};
use crate::error::RoutineError;
use crate::models::{Amount, ScriptConfig};
use crate::pattern::{Pattern, Patterns};
use crate::vocabulary::DebtType;

pub use registry::RoutineRegistry;

/// Named arguments of one invocation.
///
/// Every field is optional on the wire; routines ask for what they need and
/// report [`RoutineError::MissingArgument`] otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutineArgs {
    /// Column-1 text or the entry identifier the text belongs to.
    #[serde(alias = "recht")]
    pub entry: Option<String>,
    pub text: Option<String>,
    #[serde(alias = "saetze")]
    pub sentences: Vec<String>,
    /// Named patterns overriding the configured ones for this call.
    pub re: BTreeMap<String, String>,
    #[serde(alias = "rechtsinhaber")]
    pub holder: Option<String>,
    #[serde(alias = "rangvermerk")]
    pub rank_note: Option<String>,
    #[serde(alias = "betrag")]
    pub amount: Option<Amount>,
    #[serde(alias = "schuldenart")]
    pub debt_type: Option<DebtType>,
    pub regex_id: Option<String>,
}

/// Everything a routine can see during one invocation.
#[derive(Debug, Clone)]
pub struct RoutineContext {
    args: RoutineArgs,
    patterns: Patterns,
    config: Arc<ScriptConfig>,
}

impl RoutineContext {
    pub fn new(args: RoutineArgs, patterns: Patterns, config: Arc<ScriptConfig>) -> Self {
        Self {
            args,
            patterns,
            config,
        }
    }

    pub fn args(&self) -> &RoutineArgs {
        &self.args
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    pub fn pattern(&self, name: &str) -> Result<&Pattern, RoutineError> {
        self.patterns
            .get(name)
            .ok_or_else(|| RoutineError::UnknownPattern(name.to_string()))
    }

    pub fn text(&self) -> Result<&str, RoutineError> {
        self.args
            .text
            .as_deref()
            .ok_or(RoutineError::MissingArgument("text"))
    }

    pub fn entry(&self) -> Result<&str, RoutineError> {
        self.args
            .entry
            .as_deref()
            .ok_or(RoutineError::MissingArgument("entry"))
    }
}

/// A routine callable through the dispatcher.
pub trait Routine: Send + Sync {
    fn run(&self, ctx: &RoutineContext) -> Result<Payload, RoutineError>;
}

impl<F> Routine for F
where
    F: Fn(&RoutineContext) -> Result<Payload, RoutineError> + Send + Sync,
{
    fn run(&self, ctx: &RoutineContext) -> Result<Payload, RoutineError> {
        self(ctx)
    }
}

/// Adapts a routine producing raw JSON; the payload kind is read from the
/// value's shape (see [`Payload::from_value`]).
pub struct JsonRoutine<F> {
    hint: ValueHint,
    func: F,
}

impl<F> Routine for JsonRoutine<F>
where
    F: Fn(&RoutineContext) -> Result<Value, RoutineError> + Send + Sync,
{
    fn run(&self, ctx: &RoutineContext) -> Result<Payload, RoutineError> {
        Ok(Payload::from_value((self.func)(ctx)?, self.hint))
    }
}

pub fn json_routine<F>(hint: ValueHint, func: F) -> JsonRoutine<F>
where
    F: Fn(&RoutineContext) -> Result<Value, RoutineError> + Send + Sync,
{
    JsonRoutine { hint, func }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::RightType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context(args: RoutineArgs) -> RoutineContext {
        RoutineContext::new(args, Patterns::new(), Arc::new(ScriptConfig::default()))
    }

    #[test]
    fn test_args_accept_german_aliases() {
        let args: RoutineArgs = serde_json::from_value(json!({
            "recht": "II/3",
            "text": "Wohnrecht",
            "saetze": ["Wohnrecht"],
            "rechtsinhaber": "Anna Schmidt",
            "schuldenart": "Grundschuld",
        }))
        .unwrap();

        assert_eq!(args.entry.as_deref(), Some("II/3"));
        assert_eq!(args.sentences, vec!["Wohnrecht".to_string()]);
        assert_eq!(args.holder.as_deref(), Some("Anna Schmidt"));
        assert_eq!(args.debt_type, Some(DebtType::Grundschuld));
        assert!(args.re.is_empty());
    }

    #[test]
    fn test_args_reject_unknown_vocabulary() {
        let parsed = serde_json::from_value::<RoutineArgs>(json!({"debtType": "Seilbahn"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_text_is_reported() {
        let ctx = context(RoutineArgs::default());
        assert!(matches!(ctx.text(), Err(RoutineError::MissingArgument("text"))));
        assert!(matches!(ctx.pattern("holder"), Err(RoutineError::UnknownPattern(_))));
    }

    #[test]
    fn test_closure_is_a_routine() {
        let routine = |ctx: &RoutineContext| -> Result<Payload, RoutineError> {
            Ok(Payload::from(ctx.text()?.to_uppercase()))
        };
        let ctx = context(RoutineArgs {
            text: Some("abc".into()),
            ..Default::default()
        });
        assert_eq!(routine.run(&ctx).unwrap(), Payload::Text("ABC".into()));
    }

    #[test]
    fn test_json_routine_reads_shape() {
        let ctx = context(RoutineArgs::default());

        let rights = json_routine(ValueHint::Rights, |_: &RoutineContext| Ok(json!("Reallast")));
        assert_eq!(
            rights.run(&ctx).unwrap(),
            Payload::RightsClassification(RightType::Reallast.into())
        );

        let odd = json_routine(ValueHint::None, |_: &RoutineContext| Ok(json!(null)));
        assert_eq!(odd.run(&ctx).unwrap(), Payload::unknown());
    }
}
