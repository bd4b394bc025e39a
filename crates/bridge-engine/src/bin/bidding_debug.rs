use bridge_core::io::hand_parser::parse_hand;
use bridge_core::{Auction, Call, Deal, Hand, Position, Suit};
use bridge_engine::{
    Engine, HandModel, MatchOutcome, RuleSet, SynthesisConfig, SynthesisOutcome, Synthesizer,
};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rule file (YAML or JSON). Defaults to the bundled standard rules.
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    /// Keep only rules tagged with this system (plus untagged and ALL rules)
    #[arg(long, global = true)]
    system: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the engine's bid for a hand
    Advise {
        /// Hand as S.H.D.C, e.g. AKJ42.K32.432.Q2
        hand: String,

        /// Calls so far, North dealing, e.g. 1NT Pass
        calls: Vec<String>,

        /// Print every candidate rule and why it matched or failed
        #[arg(short, long)]
        trace: bool,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find random deals whose bidding starts with the given bids
    Synthesize {
        /// Target bids, e.g. 1H 2H
        target: Vec<String>,

        /// Seats that always pass, e.g. E,W
        #[arg(long, value_delimiter = ',', value_parser = parse_seat)]
        forced_pass: Vec<Position>,

        #[arg(long, default_value_t = 50_000)]
        max_attempts: u64,

        #[arg(long, default_value_t = 5_000)]
        timeout_ms: u64,

        /// Number of deals to collect
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Print accepted deals as PBN records
        #[arg(long)]
        pbn: bool,
    },
}

fn parse_seat(s: &str) -> Result<Position, String> {
    let mut chars = s.trim().chars();
    match (chars.next().and_then(Position::from_char), chars.next()) {
        (Some(pos), None) => Ok(pos),
        _ => Err(format!("expected one of N, E, S, W, got '{}'", s)),
    }
}

fn parse_calls(tokens: &[String]) -> Option<Vec<Call>> {
    let mut calls = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse() {
            Ok(call) => calls.push(call),
            Err(e) => {
                eprintln!("Error: {}", e);
                return None;
            }
        }
    }
    Some(calls)
}

fn hand_line(hand: &Hand) -> String {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
        .iter()
        .map(|&suit| {
            let cards = hand.holding(suit);
            format!("{}: {}", suit.to_char(), if cards.is_empty() { "-" } else { &cards })
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_deal(deal: &Deal) {
    for (pos, hand) in deal.hands() {
        println!("{:<6} {:<40} {:>2} HCP", pos.name(), hand_line(hand), hand.hcp());
    }
}

fn advise(engine: &Engine, hand: String, calls: Vec<String>, trace: bool, json: bool) {
    let hand = parse_hand(&hand);
    if hand.cards().len() != 13 {
        eprintln!("Warning: hand has {} cards", hand.cards().len());
    }
    let Some(calls) = parse_calls(&calls) else {
        return;
    };
    let mut auction = Auction::new(Position::North);
    for call in calls {
        auction.add_call(call);
    }

    if trace {
        let model = HandModel::from_hand(&hand);
        println!(
            "Hand: {}  ({} HCP, quality {:.2}, support {})",
            hand_line(&hand),
            model.hcp,
            model.quality_points,
            model.support_points
        );
        println!("{:<8} | {:<5} | {:<20} | Explanation", "Status", "Call", "Convention");
        println!("{:-<8}-+-{:-<5}-+-{:-<20}-+------------", "", "", "");
        for eval in engine.evaluate(&model, &auction) {
            let status = match (eval.legal, eval.outcome) {
                (false, _) => "ILLEGAL",
                (true, MatchOutcome::Rejected) => "FAILED",
                (true, MatchOutcome::Matched { upgrade: Some(_) }) => "UPGRADED",
                (true, MatchOutcome::Matched { upgrade: None }) => "MATCHED",
            };
            println!(
                "{:<8} | {:<5} | {:<20} | {}",
                status,
                eval.rule.bid.render(),
                eval.rule.convention.as_deref().unwrap_or("-"),
                eval.rule.explanation.as_deref().unwrap_or("")
            );
        }
        println!();
    }

    let decision = engine.decide(&hand, &auction);
    if json {
        match serde_json::to_string_pretty(&decision) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }
    println!("Bid: {}", decision.bid);
    if let Some(explanation) = &decision.explanation {
        println!("Why: {}", explanation);
    }
    if let Some(alert) = &decision.alert {
        println!("Alert: {}", alert);
    }
}

struct SynthesizeArgs {
    target: Vec<String>,
    forced_pass: Vec<Position>,
    max_attempts: u64,
    timeout_ms: u64,
    count: usize,
    seed: Option<u64>,
    pbn: bool,
}

fn synthesize(engine: &Engine, args: SynthesizeArgs) {
    let Some(target) = parse_calls(&args.target) else {
        return;
    };
    let config = SynthesisConfig {
        max_attempts: args.max_attempts,
        timeout: Duration::from_millis(args.timeout_ms),
        forced_pass: args.forced_pass,
    };
    let synth = Synthesizer::new(engine, config);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let batch = if args.count == 1 {
        match synth.synthesize_with_rng(&target, &mut rng) {
            SynthesisOutcome::Success(found) => vec![found],
            SynthesisOutcome::Exhausted { attempts } => {
                println!("No match in {} attempts.", attempts);
                return;
            }
            SynthesisOutcome::TimedOut { attempts, elapsed } => {
                println!("Timed out after {} attempts ({:?}).", attempts, elapsed);
                return;
            }
        }
    } else {
        let batch = synth.synthesize_many_with_rng(&target, args.count, &mut rng);
        println!(
            "Found {} of {} deals in {} attempts ({:?}).",
            batch.deals.len(),
            args.count,
            batch.attempts,
            batch.elapsed
        );
        batch.deals
    };

    for (i, found) in batch.iter().enumerate() {
        if args.pbn {
            println!("{}", found.to_pbn(&format!("Deal {}", i + 1)));
            continue;
        }
        println!("Deal {} (attempt {}):", i + 1, found.attempt);
        print_deal(&found.deal);
        println!();
        for seat in &found.decisions {
            println!(
                "  {} {:<5} {}",
                seat.seat.to_char(),
                seat.decision.bid.render(),
                seat.decision.explanation.as_deref().unwrap_or("")
            );
        }
        println!();
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let engine = match (&args.rules, &args.system) {
        (Some(path), None) => Engine::from_path(path),
        (None, None) => Engine::standard(),
        (path, Some(system)) => path
            .as_ref()
            .map_or_else(RuleSet::standard, |p| RuleSet::load(p))
            .and_then(|rules| rules.for_system(system))
            .map(Engine::new),
    };
    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Advise {
            hand,
            calls,
            trace,
            json,
        } => advise(&engine, hand, calls, trace, json),
        Command::Synthesize {
            target,
            forced_pass,
            max_attempts,
            timeout_ms,
            count,
            seed,
            pbn,
        } => synthesize(
            &engine,
            SynthesizeArgs {
                target,
                forced_pass,
                max_attempts,
                timeout_ms,
                count,
                seed,
                pbn,
            },
        ),
    }
}
