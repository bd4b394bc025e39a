use bridge_core::{Call, Position, Strain};
use bridge_engine::{Engine, SynthesisConfig, SynthesisOutcome, Synthesizer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn calls(tokens: &[&str]) -> Vec<Call> {
    tokens.iter().map(|t| t.parse().unwrap()).collect()
}

fn opponents_pass(max_attempts: u64) -> SynthesisConfig {
    SynthesisConfig {
        max_attempts,
        timeout: Duration::from_secs(60),
        forced_pass: vec![Position::East, Position::West],
    }
}

#[test]
fn test_one_heart_raised_to_two() {
    let engine = Engine::standard().unwrap();
    let synth = Synthesizer::new(&engine, opponents_pass(200_000));
    let mut rng = StdRng::seed_from_u64(42);
    let target = calls(&["1H", "2H"]);

    let outcome = synth.synthesize_with_rng(&target, &mut rng);
    let found = match outcome {
        SynthesisOutcome::Success(found) => found,
        other => panic!("expected a deal, got {:?}", other),
    };

    assert_eq!(found.auction.active_sequence()[..2], target[..]);
    assert!(found.auction.is_finished());
    assert_eq!(found.deal.total_hcp(), 40);
    assert!(found.deal.is_complete());

    // The raise comes from the opener's partner, on the opener's own side.
    // North deals; with East forced to pass, a North hand without an
    // opening passes and South opens 1H in third seat instead.
    let bidders: Vec<Position> = found
        .auction
        .iter()
        .filter(|(_, call)| call.is_bid())
        .map(|(pos, _)| pos)
        .collect();
    assert!(matches!(bidders[0], Position::North | Position::South));
    assert_eq!(bidders[1], bidders[0].partner());
    if bidders[0] == Position::South {
        assert_eq!(found.auction.calls[..2], [Call::Pass, Call::Pass]);
        assert!(found.deal.hand(Position::North).hcp() < 12);
    }
    assert!(found.note().starts_with("1H: "));
    assert!(found.note().contains(" | 2H: "));

    let opener = found.deal.hand(bidders[0]);
    assert!(opener.length(bridge_core::Suit::Hearts) >= 5);
    let responder = found.deal.hand(bidders[1]);
    assert!(responder.length(bridge_core::Suit::Hearts) >= 3);

    for seat in &found.decisions {
        if matches!(seat.seat, Position::East | Position::West) {
            assert_eq!(seat.decision.bid, Call::Pass);
        }
    }
}

#[test]
fn test_unreachable_target_exhausts() {
    let engine = Engine::standard().unwrap();
    let synth = Synthesizer::new(&engine, opponents_pass(500));
    let mut rng = StdRng::seed_from_u64(1);
    // No rule ever answers 1H with 7C.
    let outcome = synth.synthesize_with_rng(&calls(&["1H", "7C"]), &mut rng);
    assert_eq!(outcome, SynthesisOutcome::Exhausted { attempts: 500 });
}

#[test]
fn test_zero_attempts() {
    let engine = Engine::standard().unwrap();
    let synth = Synthesizer::new(&engine, opponents_pass(0));
    let outcome = synth.synthesize(&calls(&["1H"]));
    assert_eq!(outcome, SynthesisOutcome::Exhausted { attempts: 0 });
}

#[test]
fn test_zero_timeout() {
    let engine = Engine::standard().unwrap();
    let config = SynthesisConfig {
        timeout: Duration::ZERO,
        ..SynthesisConfig::default()
    };
    let synth = Synthesizer::new(&engine, config);
    match synth.synthesize(&calls(&["1H"])) {
        SynthesisOutcome::TimedOut { attempts, .. } => assert_eq!(attempts, 0),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

#[test]
fn test_seeded_runs_repeat() {
    let engine = Engine::standard().unwrap();
    let synth = Synthesizer::new(&engine, opponents_pass(20_000));
    let target = calls(&["1NT"]);
    let first = synth.synthesize_with_rng(&target, &mut StdRng::seed_from_u64(99));
    let second = synth.synthesize_with_rng(&target, &mut StdRng::seed_from_u64(99));
    assert!(first.deal().is_some());
    assert_eq!(first, second);
}

#[test]
fn test_batch_shares_budget() {
    let engine = Engine::standard().unwrap();
    let synth = Synthesizer::new(&engine, opponents_pass(20_000));
    let mut rng = StdRng::seed_from_u64(8);
    let batch = synth.synthesize_many_with_rng(&calls(&["1S"]), 3, &mut rng);
    assert_eq!(batch.deals.len(), 3);
    assert!(batch.attempts <= 20_000);
    for found in &batch.deals {
        assert_eq!(found.auction.active_sequence()[0], Call::bid(1, Strain::Spades));
    }
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = Arc::new(Engine::standard().unwrap());
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let synth = Synthesizer::new(&engine, opponents_pass(20_000));
                let mut rng = StdRng::seed_from_u64(seed);
                synth.synthesize_with_rng(&calls(&["1NT"]), &mut rng)
            })
        })
        .collect();
    for handle in handles {
        let outcome = handle.join().unwrap();
        assert!(outcome.deal().is_some());
    }
}
