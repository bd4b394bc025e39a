use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// A rule file is a bare list of rule records, a named set, or a map from
/// auction keys (`Dealer`, `1NT`, `2C - 2D - 2H`) to the records that apply
/// there.
///
/// Records stay untyped here so that one badly typed record can be rejected
/// on its own instead of failing the whole document.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RuleSetDocument {
    Bare(Vec<serde_json::Value>),
    Named {
        #[serde(default)]
        name: Option<String>,
        rules: Vec<serde_json::Value>,
    },
    Keyed(BTreeMap<String, Vec<serde_json::Value>>),
}

impl RuleSetDocument {
    pub fn name(&self) -> Option<&str> {
        match self {
            RuleSetDocument::Named { name, .. } => name.as_deref(),
            RuleSetDocument::Bare(_) | RuleSetDocument::Keyed(_) => None,
        }
    }

    pub fn into_records(self) -> Vec<serde_json::Value> {
        match self {
            RuleSetDocument::Named { rules, .. } => rules,
            RuleSetDocument::Bare(rules) => rules,
            RuleSetDocument::Keyed(sections) => sections
                .into_iter()
                .flat_map(|(key, records)| {
                    let context = key_context(&key);
                    records.into_iter().map(move |mut record| {
                        if let Some(fields) = record.as_object_mut() {
                            fields
                                .entry("auction")
                                .or_insert_with(|| serde_json::Value::from(context.clone()));
                        }
                        record
                    })
                })
                .collect(),
        }
    }
}

/// `Dealer` is the opening context; other keys list bids joined by `-`.
fn key_context(key: &str) -> Vec<String> {
    if key.trim().eq_ignore_ascii_case("dealer") {
        return Vec::new();
    }
    key.split('-')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// One rule as written in a rule file, before validation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct RuleRecord {
    #[serde(default)]
    pub bid: Option<String>,
    #[serde(default, alias = "auction_context")]
    pub auction: Option<Vec<String>>,
    #[serde(default)]
    pub constraints: ConstraintRecord,
    #[serde(default, alias = "convention_tag")]
    pub convention: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Bidding system the rule belongs to; absent or `ALL` means every
    /// system.
    #[serde(default)]
    pub system: Option<String>,
}

impl RuleRecord {
    /// Prior non-pass bids this rule applies after; empty for the dealer.
    pub fn context(&self) -> &[String] {
        self.auction.as_deref().unwrap_or(&[])
    }

    /// Teaching text, wherever the file put it.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .or(self.constraints.explanation.as_deref())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ConstraintRecord {
    #[serde(default)]
    pub min_hcp: Option<u8>,
    #[serde(default)]
    pub max_hcp: Option<u8>,
    #[serde(default, alias = "min_dummy_points")]
    pub min_support_points: Option<u8>,
    #[serde(default, alias = "max_dummy_points")]
    pub max_support_points: Option<u8>,
    #[serde(default, alias = "shape_requirements")]
    pub shape: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}
