//! Rejection sampling for deals whose bidding follows a target auction.
//!
//! Each attempt deals a fresh deck, lets the engine bid every seat from
//! North, and keeps the deal only if the non-pass calls start with the
//! target. Attempts stop at the attempt cap or the timeout, whichever
//! comes first.

use crate::engine::{BidDecision, Engine};
use bridge_core::io::pbn::{self, PbnRecord};
use bridge_core::{Auction, Call, Deal, Position};
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: u64 = 5000;
const LOGGED_REJECTIONS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    pub max_attempts: u64,
    pub timeout: Duration,
    /// Seats that always pass instead of asking the engine.
    pub forced_pass: Vec<Position>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50_000,
            timeout: Duration::from_secs(5),
            forced_pass: Vec::new(),
        }
    }
}

/// One call of a replayed auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatDecision {
    pub seat: Position,
    pub decision: BidDecision,
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDeal {
    pub deal: Deal,
    pub auction: Auction,
    pub decisions: Vec<SeatDecision>,
    /// Attempt number that produced this deal.
    pub attempt: u64,
}

impl SynthesizedDeal {
    /// Explanations of the bids the engine chose, as `"1H: ... | 2H: ..."`.
    /// Passes and forced calls are left out.
    pub fn note(&self) -> String {
        self.decisions
            .iter()
            .filter(|d| !d.forced && !d.decision.bid.is_pass())
            .map(|d| match &d.decision.explanation {
                Some(text) => format!("{}: {}", d.decision.bid, text),
                None => d.decision.bid.render(),
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn to_pbn(&self, event: &str) -> String {
        let note = self.note();
        pbn::export_deal(
            &self.deal,
            &PbnRecord {
                event,
                site: "Deal synthesizer",
                note: Some(note.as_str()).filter(|n| !n.is_empty()),
                auction: Some(&self.auction),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Success(SynthesizedDeal),
    Exhausted { attempts: u64 },
    TimedOut { attempts: u64, elapsed: Duration },
}

impl SynthesisOutcome {
    pub fn deal(&self) -> Option<&SynthesizedDeal> {
        match self {
            SynthesisOutcome::Success(deal) => Some(deal),
            _ => None,
        }
    }
}

/// Which bound ended a batch early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Exhausted,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisBatch {
    pub deals: Vec<SynthesizedDeal>,
    pub attempts: u64,
    pub elapsed: Duration,
    /// `None` when the requested number of deals was found.
    pub stopped: Option<StopReason>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    Diverged {
        step: usize,
        seat: Position,
        wanted: Call,
        got: Call,
        /// Calls made before the replay stopped.
        calls: usize,
    },
    EndedEarly {
        reached: usize,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Diverged {
                step,
                seat,
                wanted,
                got,
                ..
            } => write!(f, "step {} ({}) wanted {}, got {}", step + 1, seat, wanted, got),
            Rejection::EndedEarly { reached } => {
                write!(f, "auction ended after {} bids", reached)
            }
        }
    }
}

pub struct Synthesizer<'a> {
    engine: &'a Engine,
    config: SynthesisConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(engine: &'a Engine, config: SynthesisConfig) -> Self {
        Self { engine, config }
    }

    pub fn synthesize(&self, target: &[Call]) -> SynthesisOutcome {
        self.synthesize_with_rng(target, &mut rand::thread_rng())
    }

    pub fn synthesize_with_rng<R: Rng>(&self, target: &[Call], rng: &mut R) -> SynthesisOutcome {
        let mut batch = self.run(target, 1, rng);
        match batch.stopped {
            None => match batch.deals.pop() {
                Some(deal) => SynthesisOutcome::Success(deal),
                None => SynthesisOutcome::Exhausted {
                    attempts: batch.attempts,
                },
            },
            Some(StopReason::Exhausted) => SynthesisOutcome::Exhausted {
                attempts: batch.attempts,
            },
            Some(StopReason::TimedOut) => SynthesisOutcome::TimedOut {
                attempts: batch.attempts,
                elapsed: batch.elapsed,
            },
        }
    }

    /// Collects up to `count` matching deals under one shared attempt and
    /// time budget.
    pub fn synthesize_many(&self, target: &[Call], count: usize) -> SynthesisBatch {
        self.synthesize_many_with_rng(target, count, &mut rand::thread_rng())
    }

    pub fn synthesize_many_with_rng<R: Rng>(
        &self,
        target: &[Call],
        count: usize,
        rng: &mut R,
    ) -> SynthesisBatch {
        self.run(target, count, rng)
    }

    fn run<R: Rng>(&self, target: &[Call], count: usize, rng: &mut R) -> SynthesisBatch {
        let target: Vec<Call> = target.iter().copied().filter(|c| !c.is_pass()).collect();
        let rendered: Vec<String> = target.iter().map(|c| c.render()).collect();
        log::debug!("targeting [{}]", rendered.join(" "));

        let start = Instant::now();
        let mut deals = Vec::new();
        let mut attempts = 0;
        let stopped = loop {
            if deals.len() >= count {
                break None;
            }
            if attempts >= self.config.max_attempts {
                break Some(StopReason::Exhausted);
            }
            if start.elapsed() >= self.config.timeout {
                break Some(StopReason::TimedOut);
            }
            attempts += 1;

            let deal = Deal::random(rng);
            match self.replay(&deal, &target) {
                Ok((auction, decisions)) => {
                    log::debug!("match found in {} attempts", attempts);
                    deals.push(SynthesizedDeal {
                        deal,
                        auction,
                        decisions,
                        attempt: attempts,
                    });
                }
                Err(rejection) if attempts <= LOGGED_REJECTIONS => {
                    log::debug!("attempt {} rejected: {}", attempts, rejection);
                }
                Err(_) => {}
            }
            if attempts % PROGRESS_INTERVAL == 0 {
                log::debug!(
                    "{} attempts, {} found, {:?} elapsed",
                    attempts,
                    deals.len(),
                    start.elapsed()
                );
            }
        };
        let elapsed = start.elapsed();
        match stopped {
            Some(StopReason::Exhausted) => {
                log::debug!("gave up after {} attempts", attempts)
            }
            Some(StopReason::TimedOut) => {
                log::debug!("timed out after {} attempts ({:?})", attempts, elapsed)
            }
            None => {}
        }
        SynthesisBatch {
            deals,
            attempts,
            elapsed,
            stopped,
        }
    }

    /// Bids the deal out from North. Stops as soon as the non-pass calls
    /// leave the target.
    fn replay(&self, deal: &Deal, target: &[Call]) -> Result<(Auction, Vec<SeatDecision>), Rejection> {
        let mut auction = Auction::new(Position::North);
        let mut decisions = Vec::new();
        let mut bids = 0;

        while !auction.is_finished() {
            let seat = auction.current_player();
            let forced = self.config.forced_pass.contains(&seat);
            let decision = if forced {
                BidDecision {
                    bid: Call::Pass,
                    explanation: Some("Forced pass".to_string()),
                    alert: None,
                    convention: None,
                }
            } else {
                self.engine.decide(deal.hand(seat), &auction)
            };
            let call = decision.bid;
            auction.add_call(call);
            decisions.push(SeatDecision {
                seat,
                decision,
                forced,
            });

            if call.is_pass() {
                continue;
            }
            if let Some(&wanted) = target.get(bids) {
                if wanted != call {
                    return Err(Rejection::Diverged {
                        step: bids,
                        seat,
                        wanted,
                        got: call,
                        calls: auction.calls.len(),
                    });
                }
            }
            bids += 1;
        }

        if bids < target.len() {
            return Err(Rejection::EndedEarly { reached: bids });
        }
        Ok((auction, decisions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_set::RuleSet;
    use bridge_core::Strain;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Every seat with 12+ opens 1C; everyone else passes.
    const ONE_CLUB: &str = "
- bid: 1C
  constraints: { min_hcp: 12 }
  explanation: Opening values
";

    fn engine() -> Engine {
        Engine::new(RuleSet::from_yaml_str(ONE_CLUB).unwrap())
    }

    fn config(max_attempts: u64) -> SynthesisConfig {
        SynthesisConfig {
            max_attempts,
            timeout: Duration::from_secs(30),
            forced_pass: Vec::new(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = SynthesisConfig::default();
        assert_eq!(config.max_attempts, 50_000);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.forced_pass.is_empty());
    }

    #[test]
    fn test_success_matches_target() {
        let engine = engine();
        let synth = Synthesizer::new(&engine, config(1000));
        let mut rng = StdRng::seed_from_u64(7);
        let target = [Call::bid(1, Strain::Clubs)];
        let outcome = synth.synthesize_with_rng(&target, &mut rng);
        let found = outcome.deal().expect("1C should be easy to find");
        assert_eq!(found.auction.active_sequence(), target.to_vec());
        assert!(found.auction.is_finished());
        assert_eq!(found.decisions.len(), found.auction.calls.len());
        assert!(found.deal.is_complete());
        // The opener really has the values.
        let opener = found
            .decisions
            .iter()
            .find(|d| d.decision.bid.is_bid())
            .map(|d| d.seat)
            .unwrap();
        assert!(found.deal.hand(opener).hcp() >= 12);
    }

    #[test]
    fn test_early_abort_rejects_divergence() {
        let engine = engine();
        let synth = Synthesizer::new(&engine, config(1));
        let deal = (0..)
            .map(|seed| Deal::random(&mut StdRng::seed_from_u64(seed)))
            .find(|d| d.hand(Position::North).hcp() >= 12)
            .unwrap();
        // North opens 1C, which already leaves a 7NT target.
        let result = synth.replay(&deal, &[Call::bid(7, Strain::NoTrump)]);
        assert_eq!(
            result,
            Err(Rejection::Diverged {
                step: 0,
                seat: Position::North,
                wanted: Call::bid(7, Strain::NoTrump),
                got: Call::bid(1, Strain::Clubs),
                calls: 1,
            })
        );
    }

    #[test]
    fn test_short_auction_ends_early() {
        let engine = engine();
        let synth = Synthesizer::new(&engine, config(1));
        let deal = (0..)
            .map(|seed| Deal::random(&mut StdRng::seed_from_u64(seed)))
            .find(|d| Position::ALL.iter().all(|&p| d.hand(p).hcp() < 12))
            .unwrap();
        let result = synth.replay(&deal, &[Call::bid(1, Strain::Clubs)]);
        assert_eq!(result, Err(Rejection::EndedEarly { reached: 0 }));
    }

    #[test]
    fn test_impossible_target_exhausts() {
        let engine = engine();
        let synth = Synthesizer::new(&engine, config(50));
        let mut rng = StdRng::seed_from_u64(3);
        let target = [Call::bid(1, Strain::Spades)];
        assert_eq!(
            synth.synthesize_with_rng(&target, &mut rng),
            SynthesisOutcome::Exhausted { attempts: 50 }
        );
    }

    #[test]
    fn test_zero_timeout() {
        let engine = engine();
        let synth = Synthesizer::new(
            &engine,
            SynthesisConfig {
                timeout: Duration::ZERO,
                ..SynthesisConfig::default()
            },
        );
        let outcome = synth.synthesize(&[Call::bid(1, Strain::Clubs)]);
        assert!(matches!(outcome, SynthesisOutcome::TimedOut { attempts: 0, .. }));
    }

    #[test]
    fn test_timeout_stops_a_running_search() {
        let engine = engine();
        let synth = Synthesizer::new(
            &engine,
            SynthesisConfig {
                max_attempts: u64::MAX,
                timeout: Duration::from_millis(20),
                forced_pass: Vec::new(),
            },
        );
        let mut rng = StdRng::seed_from_u64(13);
        // Nobody ever opens 1S with these rules.
        let outcome = synth.synthesize_with_rng(&[Call::bid(1, Strain::Spades)], &mut rng);
        match outcome {
            SynthesisOutcome::TimedOut { attempts, elapsed } => {
                assert!(attempts > 0);
                assert!(elapsed >= Duration::from_millis(20));
            }
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_forced_pass_seats() {
        let engine = engine();
        let synth = Synthesizer::new(
            &engine,
            SynthesisConfig {
                forced_pass: vec![Position::East, Position::West],
                ..config(5000)
            },
        );
        let mut rng = StdRng::seed_from_u64(11);
        let outcome = synth.synthesize_with_rng(&[Call::bid(1, Strain::Clubs)], &mut rng);
        let found = outcome.deal().unwrap();
        for seat in &found.decisions {
            if matches!(seat.seat, Position::East | Position::West) {
                assert!(seat.forced);
                assert_eq!(seat.decision.bid, Call::Pass);
            }
        }
    }

    #[test]
    fn test_synthesize_many() {
        let engine = engine();
        let synth = Synthesizer::new(&engine, config(5000));
        let mut rng = StdRng::seed_from_u64(5);
        let batch = synth.synthesize_many_with_rng(&[Call::bid(1, Strain::Clubs)], 3, &mut rng);
        assert_eq!(batch.deals.len(), 3);
        assert_eq!(batch.stopped, None);
        assert!(batch.deals.windows(2).all(|w| w[0].attempt < w[1].attempt));
    }

    #[test]
    fn test_to_pbn() {
        let engine = engine();
        let synth = Synthesizer::new(&engine, config(1000));
        let mut rng = StdRng::seed_from_u64(9);
        let outcome = synth.synthesize_with_rng(&[Call::bid(1, Strain::Clubs)], &mut rng);
        let found = outcome.deal().unwrap();
        assert_eq!(found.note(), "1C: Opening values");
        let pbn = found.to_pbn("Lesson");
        assert!(pbn.contains("[Event \"Lesson\"]"));
        assert!(pbn.contains("[Deal \"N:"));
        assert!(pbn.contains("[Note \"1C: Opening values\"]"));
        assert!(pbn.contains("1C"));
    }
}
