use crate::call::{Call, ParseCallError};
use crate::deal::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Position,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    /// Parses a history of call tokens such as `["1NT", "Pass", "2C"]`.
    pub fn from_tokens<S: AsRef<str>>(dealer: Position, tokens: &[S]) -> Result<Self, ParseCallError> {
        let calls = tokens
            .iter()
            .map(|t| t.as_ref().parse())
            .collect::<Result<Vec<Call>, _>>()?;
        Ok(Self { dealer, calls })
    }

    /// Build an auction from space-separated calls like "1H Pass 2H".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bidding(dealer: Position, calls: &str) -> Self {
        let mut auction = Self::new(dealer);
        for token in calls.split_whitespace() {
            auction.add_call(token.parse().expect("invalid call"));
        }
        auction
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Call)> {
        let mut p = self.dealer;
        self.calls.iter().map(move |call| {
            let pos = p;
            p = p.next();
            (pos, call)
        })
    }

    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    pub fn current_player(&self) -> Position {
        let mut p = self.dealer;
        for _ in 0..self.calls.len() {
            p = p.next();
        }
        p
    }

    /// The auction with every pass removed. Rule contexts are keyed on this.
    pub fn active_sequence(&self) -> Vec<Call> {
        self.calls.iter().filter(|c| !c.is_pass()).copied().collect()
    }

    /// Bids made by the partner of the player to act, with their index in
    /// `calls`.
    pub fn partner_bids(&self) -> Vec<(usize, Call)> {
        let partner = self.current_player().partner();
        self.iter()
            .enumerate()
            .filter(|(_, (pos, call))| *pos == partner && call.is_bid())
            .map(|(i, (_, call))| (i, *call))
            .collect()
    }

    /// Three passes after a bid, or four passes with no bid at all.
    pub fn is_finished(&self) -> bool {
        Self::is_finished_at(&self.calls, self.calls.len())
    }

    /// Would `call` be legal as the next call?
    pub fn is_legal(&self, call: Call) -> bool {
        if self.is_finished() {
            return false;
        }
        let mut test = self.calls.clone();
        test.push(call);
        Self::validate_calls(&test)
    }

    fn validate_calls(calls: &[Call]) -> bool {
        let mut last_rank: Option<u8> = None;
        let mut last_bid_index = None;
        let mut last_double_index = None;
        let mut is_redoubled = false;

        for (i, call) in calls.iter().enumerate() {
            if i > 0 && Self::is_finished_at(calls, i) {
                return false;
            }

            match call {
                Call::Pass => {}
                Call::Bid { .. } => {
                    let Some(rank) = call.rank() else {
                        return false;
                    };
                    if last_rank.is_some_and(|last| rank <= last) {
                        return false;
                    }
                    last_rank = Some(rank);
                    last_bid_index = Some(i);
                    last_double_index = None;
                    is_redoubled = false;
                }
                Call::Double => {
                    let Some(bi) = last_bid_index else {
                        return false;
                    };
                    if last_double_index.is_some() || is_redoubled {
                        return false;
                    }
                    // Only the opponents of the bidder may double.
                    if (i - bi) % 2 == 0 {
                        return false;
                    }
                    last_double_index = Some(i);
                }
                Call::Redouble => {
                    let Some(di) = last_double_index else {
                        return false;
                    };
                    if is_redoubled || (i - di) % 2 == 0 {
                        return false;
                    }
                    is_redoubled = true;
                    last_double_index = None;
                }
            }
        }
        true
    }

    fn is_finished_at(calls: &[Call], len: usize) -> bool {
        if len < 4 {
            return false;
        }
        let prefix = &calls[..len];
        if prefix.iter().all(|c| c.is_pass()) {
            return true;
        }
        prefix[len - 3..].iter().all(|c| c.is_pass())
    }
}
