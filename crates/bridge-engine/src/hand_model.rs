//! Hand evaluation used by the constraint matcher

use bridge_core::{Hand, Suit};

/// Everything the rules look at, computed once per hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandModel {
    /// High Card Points (A=4, K=3, Q=2, J=1)
    pub hcp: u8,
    /// A=4.5, K=3, Q=1.5, J=0.75, T=0.25. Only used for upgrades.
    pub quality_points: f64,
    /// HCP plus 5/3/1 for each void/singleton/doubleton
    pub support_points: u8,
    /// Suit lengths indexed by `Suit::idx`
    pub lengths: [u8; 4],
    pub balanced: bool,
}

impl HandModel {
    pub fn from_hand(hand: &Hand) -> Self {
        let mut lengths = [0; 4];
        for suit in Suit::ALL {
            lengths[suit.idx()] = hand.length(suit);
        }
        Self {
            hcp: hand.hcp(),
            quality_points: hand.quality_points(),
            support_points: hand.support_points(),
            lengths,
            balanced: hand.is_balanced(),
        }
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.lengths[suit.idx()]
    }
}
