//! Rule-driven bidding advice and deal synthesis.
//!
//! An [`Engine`] picks one call for a hand from a [`RuleSet`]; a
//! [`Synthesizer`] uses the engine to find random deals whose bidding
//! follows a target auction.

pub mod constraint;
pub mod engine;
pub mod error;
pub mod hand_model;
pub mod resolver;
pub mod rule;
pub mod rule_set;
pub mod schema;
pub mod shape;
pub mod synth;

pub use constraint::{Constraint, MatchOutcome, Upgrade};
pub use engine::{BidDecision, Engine, Evaluation};
pub use error::{ConfigError, RuleError};
pub use hand_model::HandModel;
pub use resolver::{PrecedenceStep, PriorityResolver};
pub use rule::Rule;
pub use rule_set::RuleSet;
pub use shape::{ShapeClause, ShapeExpr};
pub use synth::{SynthesisBatch, SynthesisConfig, SynthesisOutcome, SynthesizedDeal, Synthesizer};

