use crate::card::Card;
use crate::hand::Hand;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    #[default]
    North,
    East,
    South,
    West,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn next(self) -> Self {
        match self {
            Position::North => Position::East,
            Position::East => Position::South,
            Position::South => Position::West,
            Position::West => Position::North,
        }
    }

    pub fn partner(self) -> Self {
        match self {
            Position::North => Position::South,
            Position::South => Position::North,
            Position::East => Position::West,
            Position::West => Position::East,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Position::North => 0,
            Position::East => 1,
            Position::South => 2,
            Position::West => 3,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Position::North => "North",
            Position::East => "East",
            Position::South => "South",
            Position::West => "West",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Four hands indexed by `Position::idx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    hands: [Hand; 4],
}

impl Deal {
    pub fn new(hands: [Hand; 4]) -> Self {
        Self { hands }
    }

    /// Shuffles a fresh deck and gives thirteen cards to each seat, North first.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut deck = Card::deck();
        deck.shuffle(rng);

        let mut chunks = deck.chunks(13).map(|chunk| Hand::new(chunk.to_vec()));
        let mut next = || chunks.next().unwrap_or_default();
        Self {
            hands: [next(), next(), next(), next()],
        }
    }

    pub fn hand(&self, pos: Position) -> &Hand {
        &self.hands[pos.idx()]
    }

    pub fn hands(&self) -> impl Iterator<Item = (Position, &Hand)> {
        Position::ALL.into_iter().zip(self.hands.iter())
    }

    pub fn total_hcp(&self) -> u8 {
        self.hands.iter().map(Hand::hcp).sum()
    }

    /// True when the four hands hold every card of the deck exactly once.
    pub fn is_complete(&self) -> bool {
        let mut seen = HashSet::with_capacity(52);
        for hand in &self.hands {
            if hand.cards().len() != 13 {
                return false;
            }
            for card in hand.cards() {
                if !seen.insert(*card) {
                    return false;
                }
            }
        }
        seen.len() == 52
    }
}
