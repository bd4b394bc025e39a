//! Loading rule files and finding the rules that apply to an auction.

use crate::error::{ConfigError, RuleError};
use crate::rule::Rule;
use crate::schema::{RuleRecord, RuleSetDocument};
use bridge_core::Call;
use std::collections::HashMap;
use std::path::Path;

/// Rules grouped by the active sequence they apply after. Within a group,
/// rules keep the order they had in the rule file.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: Option<String>,
    by_context: HashMap<Vec<Call>, Vec<Rule>>,
    len: usize,
    rejected: usize,
}

impl RuleSet {
    fn insert(&mut self, rule: Rule) {
        self.by_context
            .entry(rule.context.clone())
            .or_default()
            .push(rule);
        self.len += 1;
    }

    fn reject(&mut self, index: usize, err: &RuleError) {
        log::warn!("skipping rule #{index}: {err}");
        self.rejected += 1;
    }

    fn from_document(doc: RuleSetDocument) -> Result<Self, ConfigError> {
        let mut set = Self {
            name: doc.name().map(str::to_string),
            ..Self::default()
        };
        for (index, value) in doc.into_records().into_iter().enumerate() {
            let rule = serde_json::from_value::<RuleRecord>(value)
                .map_err(|e| RuleError::Schema(e.to_string()))
                .and_then(|record| Rule::from_record(&record));
            match rule {
                Ok(rule) => set.insert(rule),
                Err(err) => set.reject(index, &err),
            }
        }
        if set.is_empty() {
            return Err(ConfigError::NoRules {
                rejected: set.rejected,
            });
        }
        log::debug!(
            "loaded {} rules in {} contexts ({} skipped)",
            set.len,
            set.by_context.len(),
            set.rejected
        );
        Ok(set)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::from_document(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Reads a rule file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !matches!(ext.as_str(), "yaml" | "yml" | "json") {
            return Err(ConfigError::UnsupportedFormat(ext));
        }
        let text = std::fs::read_to_string(path)?;
        if ext == "json" {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Keeps the rules shared by every system plus those tagged with
    /// `system`, so one file can hold several systems.
    pub fn for_system(self, system: &str) -> Result<Self, ConfigError> {
        let Self {
            name,
            by_context,
            rejected,
            ..
        } = self;
        let mut set = Self {
            name,
            rejected,
            ..Self::default()
        };
        let mut dropped = 0;
        for rule in by_context.into_values().flatten() {
            if rule.applies_to(system) {
                set.insert(rule);
            } else {
                dropped += 1;
            }
        }
        log::debug!("system {system}: kept {} rules, dropped {dropped}", set.len);
        if set.is_empty() {
            return Err(ConfigError::NoRules { rejected });
        }
        Ok(set)
    }

    /// The rule set bundled with this crate.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_yaml_str(include_str!("rules/standard.yaml"))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of records dropped as malformed while loading.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn rules_for(&self, context: &[Call]) -> &[Rule] {
        self.by_context
            .get(context)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rules that apply after the given active sequence.
    ///
    /// An exact match on the whole sequence wins. Otherwise rules keyed on
    /// the last bid alone are used, and if there are none the result is
    /// empty.
    pub fn candidates(&self, active: &[Call]) -> &[Rule] {
        let exact = self.rules_for(active);
        if !exact.is_empty() || active.is_empty() {
            return exact;
        }
        match active.last() {
            Some(last) => self.rules_for(std::slice::from_ref(last)),
            None => &[],
        }
    }
}
