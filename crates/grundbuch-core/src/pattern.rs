//! Regex extraction contract shared by every routine.
//!
//! A [`Pattern`] is compiled once and then queried with total operations:
//! no match yields an empty or absent result, never an error.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// One non-overlapping occurrence of a pattern.
///
/// Patterns without groups yield the whole match, patterns with a single
/// group yield that group, patterns with several groups yield all of them.
/// Groups that did not participate are reported as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Found {
    Whole(String),
    Groups(Vec<String>),
}

impl Found {
    /// The occurrence as one string; tuples are joined by a single space.
    pub fn text(&self) -> String {
        match self {
            Found::Whole(s) => s.clone(),
            Found::Groups(groups) => groups.join(" "),
        }
    }
}

/// A compiled extraction pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern. Malformed patterns are reported here, never later.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Self::named(source, source)
    }

    /// Compile a pattern and report failures under `name`.
    pub fn named(name: &str, source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(source).map_err(|source| PatternError {
            name: name.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of capture groups, not counting the implicit whole match.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// True iff the pattern matches at the very start of `text`.
    ///
    /// The match does not have to cover the whole text.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.find(text).is_some_and(|m| m.start() == 0)
    }

    /// Every non-overlapping occurrence, in order.
    pub fn find_all(&self, text: &str) -> Vec<Found> {
        let groups = self.group_count();
        self.regex
            .captures_iter(text)
            .map(|caps| match groups {
                0 => Found::Whole(caps[0].to_string()),
                1 => Found::Whole(caps.get(1).map_or("", |m| m.as_str()).to_string()),
                _ => Found::Groups(
                    (1..=groups)
                        .map(|i| caps.get(i).map_or("", |m| m.as_str()).to_string())
                        .collect(),
                ),
            })
            .collect()
    }

    /// Result at position `index`.
    ///
    /// A single occurrence of a multi-group pattern is indexed by group, so
    /// `(\d+)-(\d+)` on `"6-275"` yields `"6"` for index 0 and `"275"` for
    /// index 1. Otherwise `index` picks the occurrence; a multi-group
    /// occurrence then yields its whole matched text. Out of range is `None`.
    pub fn find_at(&self, text: &str, index: usize) -> Option<String> {
        let found = self.find_all(text);

        if let [Found::Groups(groups)] = found.as_slice() {
            return groups.get(index).cloned();
        }

        match found.get(index)? {
            Found::Whole(s) => Some(s.clone()),
            Found::Groups(_) => self
                .regex
                .find_iter(text)
                .nth(index)
                .map(|m| m.as_str().to_string()),
        }
    }

    /// Capture groups of the first occurrence (the whole match when the
    /// pattern has no groups). Empty when nothing matches.
    pub fn captures(&self, text: &str) -> Vec<String> {
        let Some(caps) = self.regex.captures(text) else {
            return Vec::new();
        };
        if self.group_count() == 0 {
            return vec![caps[0].to_string()];
        }
        caps.iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()).to_string())
            .collect()
    }

    /// Substitute every occurrence, but only when [`Pattern::matches`] holds.
    ///
    /// `replacement` uses `$1` / `${name}` group references.
    pub fn replace_if_matches(&self, text: &str, replacement: &str) -> String {
        if !self.matches(text) {
            return text.to_string();
        }
        self.regex.replace_all(text, replacement).into_owned()
    }
}

/// A named set of compiled patterns for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Patterns {
    compiled: BTreeMap<String, Pattern>,
}

impl Patterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `defaults` with `overrides` layered on top.
    pub fn compile(
        defaults: &BTreeMap<String, String>,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, PatternError> {
        let mut merged = defaults.clone();
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut compiled = BTreeMap::new();
        for (name, source) in &merged {
            compiled.insert(name.clone(), Pattern::named(name, source)?);
        }
        Ok(Self { compiled })
    }

    pub fn insert(&mut self, name: impl Into<String>, pattern: Pattern) {
        self.compiled.insert(name.into(), pattern);
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.compiled.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.compiled.contains_key(name)
    }

    /// Patterns whose name starts with `prefix`, with the prefix stripped.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a Pattern)> + 'a {
        self.compiled
            .range(prefix.to_string()..)
            .take_while(move |(name, _)| name.starts_with(prefix))
            .map(move |(name, pattern)| (&name[prefix.len()..], pattern))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
