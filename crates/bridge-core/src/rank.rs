use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank characters, lowest first, indexed by `Rank as usize - 2`.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    pub fn to_char(self) -> char {
        RANK_CHARS[self as usize - 2]
    }

    /// Case-insensitive. `0` is read as a ten so that "10" keeps its ten
    /// once the `1` has been dropped.
    pub fn from_char(c: char) -> Option<Self> {
        let c = match c.to_ascii_uppercase() {
            '0' => 'T',
            other => other,
        };
        RANK_CHARS
            .iter()
            .position(|&r| r == c)
            .map(|i| Rank::ALL[i])
    }

    /// A=4, K=3, Q=2, J=1.
    pub fn hcp(self) -> u8 {
        match self {
            Rank::Ace => 4,
            Rank::King => 3,
            Rank::Queen => 2,
            Rank::Jack => 1,
            _ => 0,
        }
    }

    /// Finer honor weighting, only used to justify one-point upgrades.
    pub fn quality_points(self) -> f64 {
        match self {
            Rank::Ace => 4.5,
            Rank::King => 3.0,
            Rank::Queen => 1.5,
            Rank::Jack => 0.75,
            Rank::Ten => 0.25,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_parsing() {
        assert_eq!(Rank::from_char('A'), Some(Rank::Ace));
        assert_eq!(Rank::from_char('k'), Some(Rank::King));
        assert_eq!(Rank::from_char('t'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('0'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('2'), Some(Rank::Two));
        assert_eq!(Rank::from_char('1'), None);
        assert_eq!(Rank::from_char('Z'), None);
    }

    #[test]
    fn test_chars_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_char(rank.to_char()), Some(rank));
        }
        assert_eq!(Rank::Ten.to_string(), "T");
    }

    #[test]
    fn test_point_scales() {
        let hcp: u8 = Rank::ALL.iter().map(|r| r.hcp()).sum();
        assert_eq!(hcp, 10);
        let quality: f64 = Rank::ALL.iter().map(|r| r.quality_points()).sum();
        assert_eq!(quality, 10.0);
    }
}
