//! Numeric and shape constraints on a single rule, and the matcher that
//! checks a hand against them.

use crate::hand_model::HandModel;
use crate::shape::ShapeExpr;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub min_hcp: u8,
    pub max_hcp: u8,
    pub min_support_points: Option<u8>,
    pub max_support_points: Option<u8>,
    pub shape: ShapeExpr,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            min_hcp: 0,
            max_hcp: 40,
            min_support_points: None,
            max_support_points: None,
            shape: ShapeExpr::default(),
        }
    }
}

/// A hand that falls one point short but carries enough quality to count
/// as the rule's minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Upgrade {
    pub from_hcp: u8,
    pub to_hcp: u8,
    pub quality: f64,
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hand upgraded from {} to {} due to quality ({:.2}).",
            self.from_hcp, self.to_hcp, self.quality
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome {
    Rejected,
    Matched { upgrade: Option<Upgrade> },
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

impl Constraint {
    pub fn check(&self, hand: &HandModel) -> MatchOutcome {
        let mut upgrade = None;
        if hand.hcp < self.min_hcp {
            let one_short = hand.hcp + 1 == self.min_hcp;
            if !one_short || hand.quality_points < f64::from(self.min_hcp) {
                return MatchOutcome::Rejected;
            }
            upgrade = Some(Upgrade {
                from_hcp: hand.hcp,
                to_hcp: self.min_hcp,
                quality: hand.quality_points,
            });
        }
        if hand.hcp > self.max_hcp {
            return MatchOutcome::Rejected;
        }
        if self.min_support_points.is_some_and(|min| hand.support_points < min)
            || self.max_support_points.is_some_and(|max| hand.support_points > max)
        {
            return MatchOutcome::Rejected;
        }
        if !self.shape.is_satisfied(hand) {
            return MatchOutcome::Rejected;
        }
        MatchOutcome::Matched { upgrade }
    }
}
