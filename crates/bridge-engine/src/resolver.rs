//! Choosing one bid when several rules match.
//!
//! The resolver walks an ordered ladder of [`PrecedenceStep`]s. The first
//! step that picks a rule wins; if none does, the first matched rule in
//! rule-set order is used.

use crate::hand_model::HandModel;
use crate::rule::Rule;
use bridge_core::{Strain, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecedenceStep {
    /// A rule tagged with one of the reserved conventions.
    ConventionOverride,
    /// The cheapest bid in a suit partner has shown.
    SupportRaise,
    /// A natural spade bid, then a natural heart bid.
    NaturalMajor,
    /// A natural notrump bid.
    NoTrump,
    /// Both minors match: pick one by length.
    MinorTieBreak,
}

pub const STANDARD_LADDER: [PrecedenceStep; 5] = [
    PrecedenceStep::ConventionOverride,
    PrecedenceStep::SupportRaise,
    PrecedenceStep::NaturalMajor,
    PrecedenceStep::NoTrump,
    PrecedenceStep::MinorTieBreak,
];

/// Conventions that win whenever one of their rules matches.
pub const DEFAULT_RESERVED_CONVENTIONS: [&str; 1] = ["Second Negative"];

/// What the resolver needs to know about the decision being made.
pub struct ResolveInput<'a> {
    pub hand: &'a HandModel,
    /// Strains partner has shown with natural bids.
    pub fits: &'a [Strain],
    /// Matched rules in rule-set order.
    pub matched: &'a [&'a Rule],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityResolver {
    ladder: Vec<PrecedenceStep>,
    reserved: Vec<String>,
}

impl Default for PriorityResolver {
    fn default() -> Self {
        Self::new(
            STANDARD_LADDER.to_vec(),
            DEFAULT_RESERVED_CONVENTIONS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl PriorityResolver {
    pub fn new(ladder: Vec<PrecedenceStep>, reserved: Vec<String>) -> Self {
        Self { ladder, reserved }
    }

    pub fn with_reserved_conventions(mut self, reserved: Vec<String>) -> Self {
        self.reserved = reserved;
        self
    }

    /// Index into `input.matched` of the winning rule, or `None` when
    /// nothing matched.
    pub fn resolve(&self, input: &ResolveInput<'_>) -> Option<usize> {
        if input.matched.is_empty() {
            return None;
        }
        let picked = self
            .ladder
            .iter()
            .find_map(|&step| self.apply(step, input).map(|i| (step, i)));
        match picked {
            Some((step, index)) => {
                log::trace!("{:?} picked {}", step, input.matched[index].bid);
                Some(index)
            }
            None => Some(0),
        }
    }

    fn apply(&self, step: PrecedenceStep, input: &ResolveInput<'_>) -> Option<usize> {
        let matched = input.matched;
        match step {
            PrecedenceStep::ConventionOverride => matched
                .iter()
                .position(|r| self.reserved.iter().any(|tag| r.has_convention(tag))),
            PrecedenceStep::SupportRaise => matched
                .iter()
                .enumerate()
                .filter(|(_, r)| {
                    r.bid
                        .suit()
                        .is_some_and(|s| input.fits.contains(&Strain::from_suit(s)))
                })
                .min_by_key(|(_, r)| r.bid.rank())
                .map(|(i, _)| i),
            PrecedenceStep::NaturalMajor => natural_in(matched, Strain::Spades)
                .or_else(|| natural_in(matched, Strain::Hearts)),
            PrecedenceStep::NoTrump => natural_in(matched, Strain::NoTrump),
            PrecedenceStep::MinorTieBreak => {
                let clubs = natural_in(matched, Strain::Clubs)?;
                let diamonds = natural_in(matched, Strain::Diamonds)?;
                match better_minor(input.hand)? {
                    Suit::Diamonds => Some(diamonds),
                    _ => Some(clubs),
                }
            }
        }
    }
}

fn natural_in(matched: &[&Rule], strain: Strain) -> Option<usize> {
    matched
        .iter()
        .position(|r| r.is_natural() && r.bid.strain() == Some(strain))
}

/// Longer minor first; with equal length, diamonds at 4+ and clubs at 3.
fn better_minor(hand: &HandModel) -> Option<Suit> {
    let d = hand.length(Suit::Diamonds);
    let c = hand.length(Suit::Clubs);
    if d != c {
        return Some(if d > c { Suit::Diamonds } else { Suit::Clubs });
    }
    match d {
        3 => Some(Suit::Clubs),
        d if d >= 4 => Some(Suit::Diamonds),
        _ => None,
    }
}
