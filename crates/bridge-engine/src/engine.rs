use crate::constraint::MatchOutcome;
use crate::error::ConfigError;
use crate::hand_model::HandModel;
use crate::resolver::{PriorityResolver, ResolveInput};
use crate::rule::Rule;
use crate::rule_set::RuleSet;
use bridge_core::{Auction, Call, Hand, ParseCallError, Position, Strain};
use serde::Serialize;
use std::path::Path;

/// The engine's answer for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidDecision {
    pub bid: Call,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Set when the hand was upgraded by a point to reach the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convention: Option<String>,
}

impl BidDecision {
    /// The default when no rule fits.
    pub fn no_rule() -> Self {
        Self {
            bid: Call::Pass,
            explanation: Some("No suitable bid found.".to_string()),
            alert: None,
            convention: None,
        }
    }
}

/// How one candidate rule fared against a hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    pub rule: &'a Rule,
    pub legal: bool,
    pub outcome: MatchOutcome,
}

impl Evaluation<'_> {
    pub fn is_match(&self) -> bool {
        self.legal && self.outcome.is_match()
    }
}

/// Picks a bid for a hand from a fixed rule set.
///
/// The engine holds no per-call state, so one instance can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: RuleSet,
    resolver: PriorityResolver,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            resolver: PriorityResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: PriorityResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn standard() -> Result<Self, ConfigError> {
        Ok(Self::new(RuleSet::standard()?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(RuleSet::load(path)?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Checks every candidate rule for the auction against the hand.
    pub fn evaluate(&self, hand: &HandModel, auction: &Auction) -> Vec<Evaluation<'_>> {
        let active = auction.active_sequence();
        self.rules
            .candidates(&active)
            .iter()
            .map(|rule| Evaluation {
                rule,
                legal: auction.is_legal(rule.bid),
                outcome: rule.constraints.check(hand),
            })
            .collect()
    }

    pub fn decide(&self, hand: &Hand, auction: &Auction) -> BidDecision {
        let model = HandModel::from_hand(hand);
        let evaluations = self.evaluate(&model, auction);
        let matched: Vec<&Evaluation> = evaluations.iter().filter(|e| e.is_match()).collect();
        let rules: Vec<&Rule> = matched.iter().map(|e| e.rule).collect();

        let fits = self.known_fits(auction);
        let input = ResolveInput {
            hand: &model,
            fits: &fits,
            matched: &rules,
        };
        let Some(index) = self.resolver.resolve(&input) else {
            return BidDecision::no_rule();
        };

        let winner = matched[index];
        let alert = match winner.outcome {
            MatchOutcome::Matched {
                upgrade: Some(upgrade),
            } => Some(upgrade.to_string()),
            _ => None,
        };
        BidDecision {
            bid: winner.rule.bid,
            explanation: winner.rule.explanation.clone(),
            alert,
            convention: winner.rule.convention.clone(),
        }
    }

    /// Strains partner has bid naturally. A partner bid is artificial when
    /// every rule that could have produced it at that point carries a
    /// convention tag; bids no rule explains are taken as natural.
    pub fn known_fits(&self, auction: &Auction) -> Vec<Strain> {
        let mut fits = Vec::new();
        for (index, call) in auction.partner_bids() {
            let Some(strain) = call.strain() else {
                continue;
            };
            if fits.contains(&strain) || self.is_artificial(&auction.calls[..index], call) {
                continue;
            }
            fits.push(strain);
        }
        fits
    }

    fn is_artificial(&self, before: &[Call], call: Call) -> bool {
        let active: Vec<Call> = before.iter().copied().filter(|c| !c.is_pass()).collect();
        let mut sources = self
            .rules
            .candidates(&active)
            .iter()
            .filter(|r| r.bid == call)
            .peekable();
        sources.peek().is_some() && sources.all(|r| !r.is_natural())
    }

    /// Like [`Engine::decide`], for a history of call tokens with North as
    /// dealer. Passes in the history place each call at its seat.
    pub fn decide_tokens<S: AsRef<str>>(
        &self,
        hand: &Hand,
        history: &[S],
    ) -> Result<BidDecision, ParseCallError> {
        let auction = Auction::from_tokens(Position::North, history)?;
        Ok(self.decide(hand, &auction))
    }
}
