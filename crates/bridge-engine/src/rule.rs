use crate::constraint::Constraint;
use crate::error::RuleError;
use crate::schema::RuleRecord;
use crate::shape::ShapeExpr;
use bridge_core::Call;

/// A validated rule: "after `context`, bid `bid` with a hand matching
/// `constraints`".
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub bid: Call,
    /// Prior non-pass calls, oldest first. Empty means an opening bid.
    /// Passes written in a rule file are dropped on load.
    pub context: Vec<Call>,
    pub constraints: Constraint,
    pub convention: Option<String>,
    pub explanation: Option<String>,
    /// `None` when the rule belongs to every system.
    pub system: Option<String>,
}

impl Rule {
    pub fn from_record(record: &RuleRecord) -> Result<Self, RuleError> {
        let token = record.bid.as_deref().ok_or(RuleError::MissingBid)?;
        let bid = token.parse().map_err(RuleError::InvalidBid)?;
        let context = record
            .context()
            .iter()
            .map(|t| t.parse::<Call>())
            .filter(|c| !matches!(c, Ok(Call::Pass)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(RuleError::InvalidContext)?;
        let constraints = Self::compile_constraints(record)?;
        Ok(Self {
            bid,
            context,
            constraints,
            convention: record.convention.clone().filter(|c| !c.trim().is_empty()),
            explanation: record.explanation().map(str::to_string),
            system: record
                .system
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
                .map(str::to_string),
        })
    }

    fn compile_constraints(record: &RuleRecord) -> Result<Constraint, RuleError> {
        let raw = &record.constraints;
        let defaults = Constraint::default();
        let min_hcp = raw.min_hcp.unwrap_or(defaults.min_hcp);
        let max_hcp = raw.max_hcp.unwrap_or(defaults.max_hcp);
        if min_hcp > max_hcp {
            return Err(RuleError::InvertedRange {
                name: "hcp",
                min: min_hcp,
                max: max_hcp,
            });
        }
        if let (Some(min), Some(max)) = (raw.min_support_points, raw.max_support_points) {
            if min > max {
                return Err(RuleError::InvertedRange {
                    name: "support points",
                    min,
                    max,
                });
            }
        }
        let shape = raw.shape.as_deref().map(ShapeExpr::parse).unwrap_or_default();
        for clause in shape.unrecognized() {
            log::debug!(
                "rule {}: shape clause '{}' is not understood and always passes",
                record.bid.as_deref().unwrap_or("?"),
                clause
            );
        }
        Ok(Constraint {
            min_hcp,
            max_hcp,
            min_support_points: raw.min_support_points,
            max_support_points: raw.max_support_points,
            shape,
        })
    }

    /// True for rules with no convention tag.
    pub fn is_natural(&self) -> bool {
        self.convention.is_none()
    }

    /// True when the rule is shared by all systems or tagged with `system`.
    pub fn applies_to(&self, system: &str) -> bool {
        self.system
            .as_deref()
            .map_or(true, |own| own.eq_ignore_ascii_case(system.trim()))
    }

    pub fn has_convention(&self, name: &str) -> bool {
        self.convention
            .as_deref()
            .is_some_and(|tag| tag.to_ascii_lowercase().contains(&name.to_ascii_lowercase()))
    }
}
