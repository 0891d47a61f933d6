//! Selector -> routine registry.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::envelope::Payload;
use crate::error::{PatternError, RoutineError};
use crate::models::ScriptConfig;
use crate::pattern::Patterns;

use super::rules;
use super::{Routine, RoutineArgs, RoutineContext};

/// Registry of routines and the default patterns they run with.
pub struct RoutineRegistry {
    routines: HashMap<String, Box<dyn Routine>>,
    default_patterns: BTreeMap<String, String>,
    config: Arc<ScriptConfig>,
}

impl RoutineRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self {
            routines: HashMap::new(),
            default_patterns: BTreeMap::new(),
            config: Arc::new(ScriptConfig::default()),
        }
    }

    /// Registry holding every built-in routine.
    ///
    /// Built-in patterns are layered under `config.regex`, so a configured
    /// pattern of the same name replaces the built-in one.
    pub fn with_builtins(config: ScriptConfig) -> Self {
        let mut default_patterns = rules::default_patterns();
        default_patterns.extend(config.regex.clone());

        let mut registry = Self {
            routines: HashMap::new(),
            default_patterns,
            config: Arc::new(config),
        };
        rules::register_builtins(&mut registry);
        registry
    }

    /// Register a routine, replacing any routine with the same selector.
    pub fn register(&mut self, selector: impl Into<String>, routine: Box<dyn Routine>) {
        self.routines.insert(selector.into(), routine);
    }

    /// Register a plain function or closure.
    pub fn register_fn<F>(&mut self, selector: impl Into<String>, func: F)
    where
        F: Fn(&RoutineContext) -> Result<Payload, RoutineError> + Send + Sync + 'static,
    {
        self.register(selector, Box::new(func));
    }

    pub fn get(&self, selector: &str) -> Option<&dyn Routine> {
        self.routines.get(selector).map(|r| r.as_ref())
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.routines.contains_key(selector)
    }

    /// Registered selectors, sorted.
    pub fn selectors(&self) -> Vec<String> {
        let mut selectors: Vec<String> = self.routines.keys().cloned().collect();
        selectors.sort();
        selectors
    }

    pub fn default_patterns(&self) -> &BTreeMap<String, String> {
        &self.default_patterns
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Build the context for one invocation, compiling the default patterns
    /// merged with the per-call `re` map.
    pub fn context(&self, args: RoutineArgs) -> Result<RoutineContext, PatternError> {
        let patterns = Patterns::compile(&self.default_patterns, &args.re)?;
        Ok(RoutineContext::new(args, patterns, Arc::clone(&self.config)))
    }
}

impl Default for RoutineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
