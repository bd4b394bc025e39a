use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};

/// Sorted length patterns accepted as balanced: 4-3-3-3, 4-4-3-2, 5-3-3-2.
const BALANCED_PATTERNS: [[u8; 4]; 3] = [[3, 3, 3, 4], [2, 3, 4, 4], [2, 3, 3, 5]];

/// A hand of cards. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Builds a hand from one rank string per suit, spades first.
    ///
    /// Parsing is lenient: case and whitespace are ignored and any character
    /// that is not a rank is dropped, so "10" reads as a ten and "ak j" as
    /// ace, king, jack.
    pub fn from_suits(spades: &str, hearts: &str, diamonds: &str, clubs: &str) -> Self {
        let mut cards = Vec::with_capacity(13);
        for (suit, holding) in [
            (Suit::Spades, spades),
            (Suit::Hearts, hearts),
            (Suit::Diamonds, diamonds),
            (Suit::Clubs, clubs),
        ] {
            cards.extend(
                holding
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .filter_map(Rank::from_char)
                    .map(|rank| Card::new(suit, rank)),
            );
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.rank.hcp()).sum()
    }

    pub fn quality_points(&self) -> f64 {
        self.cards.iter().map(|c| c.rank.quality_points()).sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    /// Suit lengths in S, H, D, C order.
    pub fn distribution(&self) -> [u8; 4] {
        [
            self.length(Suit::Spades),
            self.length(Suit::Hearts),
            self.length(Suit::Diamonds),
            self.length(Suit::Clubs),
        ]
    }

    /// Ranks held in one suit, highest first, e.g. "AKJ42".
    pub fn holding(&self, suit: Suit) -> String {
        let mut ranks: Vec<Rank> = self
            .cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank)
            .collect();
        ranks.sort_by(|a, b| b.cmp(a));
        ranks.into_iter().map(Rank::to_char).collect()
    }

    /// HCP plus shortness: 5 per void, 3 per singleton, 1 per doubleton.
    pub fn support_points(&self) -> u8 {
        let shortness: u8 = Suit::ALL
            .iter()
            .map(|&s| match self.length(s) {
                0 => 5,
                1 => 3,
                2 => 1,
                _ => 0,
            })
            .sum();
        self.hcp() + shortness
    }

    /// Returns true if the hand is 4-3-3-3, 4-4-3-2 or 5-3-3-2.
    pub fn is_balanced(&self) -> bool {
        let mut sorted = self.distribution();
        sorted.sort_unstable();
        BALANCED_PATTERNS.contains(&sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hcp_calculation() {
        let hand = Hand::new(vec![
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Hearts, Rank::King),
            Card::new(Suit::Diamonds, Rank::Queen),
            Card::new(Suit::Clubs, Rank::Jack),
            Card::new(Suit::Spades, Rank::Two),
        ]);
        assert_eq!(hand.hcp(), 10);
    }

    #[test]
    fn test_from_suits() {
        let hand = Hand::from_suits("AKJ42", "K32", "432", "Q2");
        assert_eq!(hand.cards().len(), 13);
        assert_eq!(hand.hcp(), 13);
        assert_eq!(hand.distribution(), [5, 3, 3, 2]);
        assert_eq!(hand.holding(Suit::Spades), "AKJ42");
    }

    #[test]
    fn test_from_suits_is_lenient() {
        // Case, whitespace and stray characters are tolerated, not rejected.
        let hand = Hand::from_suits(" ak j42", "k 3 2", "4x32", "q2!");
        assert_eq!(hand.cards().len(), 13);
        assert_eq!(hand.hcp(), 13);

        // "10" keeps the ten and drops the one.
        let hand = Hand::from_suits("A1043", "", "", "");
        assert_eq!(hand.length(Suit::Spades), 4);
        assert_eq!(hand.holding(Suit::Spades), "AT43");
    }

    #[test]
    fn test_malformed_tokens_shrink_the_hand() {
        let hand = Hand::from_suits("AKZ", "", "", "");
        assert_eq!(hand.cards().len(), 2);
    }

    #[test]
    fn test_quality_points() {
        let hand = Hand::from_suits("AKQJT", "", "", "");
        assert_eq!(hand.quality_points(), 10.0);
        let hand = Hand::from_suits("KJ2", "QT3", "", "");
        assert_eq!(hand.quality_points(), 5.5);
    }

    #[test]
    fn test_support_points() {
        // 5-4-4-0 with 10 HCP: void is worth 5.
        let hand = Hand::from_suits("AK432", "Q432", "J432", "");
        assert_eq!(hand.hcp(), 10);
        assert_eq!(hand.support_points(), 15);

        // 4-3-3-3 has no shortness.
        let hand = Hand::from_suits("A432", "K32", "Q32", "J32");
        assert_eq!(hand.support_points(), hand.hcp());
    }

    #[test]
    fn test_balanced_shapes() {
        // 4-3-3-3
        assert!(Hand::from_suits("AKQJ", "AKQ", "AKQ", "AKQ").is_balanced());
        // 4-4-3-2
        assert!(Hand::from_suits("AKQJ", "AKQJ", "AKQ", "AK").is_balanced());
        // 5-3-3-2
        assert!(Hand::from_suits("AKQJT", "AKQ", "AKQ", "AK").is_balanced());
    }

    #[test]
    fn test_unbalanced_shapes() {
        // 5-4-2-2: two doubletons
        assert!(!Hand::from_suits("AKQJT", "AKQJ", "AK", "AK").is_balanced());
        // 6-3-2-2: two doubletons
        assert!(!Hand::from_suits("AKQJT9", "AKQ", "AK", "AK").is_balanced());
        // 5-4-3-1: singleton
        assert!(!Hand::from_suits("AKQJT", "AKQJ", "AKQ", "A").is_balanced());
        // 4-4-4-1: singleton
        assert!(!Hand::from_suits("AKQJ", "AKQJ", "AKQJ", "A").is_balanced());
        // 5-4-4-0: void
        assert!(!Hand::from_suits("AKQJT", "AKQJ", "AKQJ", "").is_balanced());
    }
}
