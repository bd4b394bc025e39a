use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A call in the auction. Serialized as its token ("Pass", "1S", "2NT", "X").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// Returns the suit of this call, if it's a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(|s| s.to_suit())
    }

    /// Position of a bid on the bidding ladder: 1C = 0, 1D = 1, ... 7NT = 34.
    ///
    /// This is the single ordering used both for auction sufficiency and for
    /// "lowest bid" tie-breaks. Non-bids and levels outside 1..=7 have no
    /// rank.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Call::Bid { level, strain } if (1..=7).contains(level) => {
                Some((level - 1) * 5 + strain.idx() as u8)
            }
            _ => None,
        }
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "Pass".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.token()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCallError {
    pub token: String,
}

impl fmt::Display for ParseCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid call token '{}'", self.token)
    }
}

impl std::error::Error for ParseCallError {}

impl FromStr for Call {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCallError {
            token: s.to_string(),
        };
        let s = s.trim().to_ascii_uppercase();
        match s.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = s.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .map(|d| d as u8)
            .filter(|l| (1..=7).contains(l))
            .ok_or_else(err)?;
        let strain = Strain::from_token(chars.as_str()).ok_or_else(err)?;
        Ok(Call::Bid { level, strain })
    }
}

impl From<Call> for String {
    fn from(call: Call) -> Self {
        call.render()
    }
}

impl TryFrom<String> for Call {
    type Error = ParseCallError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("Pass".parse(), Ok(Call::Pass));
        assert_eq!("p".parse(), Ok(Call::Pass));
        assert_eq!("X".parse(), Ok(Call::Double));
        assert_eq!("xx".parse(), Ok(Call::Redouble));
        assert_eq!("1S".parse(), Ok(Call::bid(1, Strain::Spades)));
        assert_eq!("2NT".parse(), Ok(Call::bid(2, Strain::NoTrump)));
        assert_eq!("2n".parse(), Ok(Call::bid(2, Strain::NoTrump)));
        assert_eq!(" 3c ".parse(), Ok(Call::bid(3, Strain::Clubs)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("8S".parse::<Call>().is_err());
        assert!("0H".parse::<Call>().is_err());
        assert!("1".parse::<Call>().is_err());
        assert!("1NX".parse::<Call>().is_err());
        let err = "Hello".parse::<Call>().unwrap_err();
        assert_eq!(err.token, "Hello");
    }

    #[test]
    fn test_render() {
        assert_eq!(Call::Pass.render(), "Pass");
        assert_eq!(Call::bid(1, Strain::NoTrump).render(), "1NT");
        assert_eq!(Call::bid(4, Strain::Hearts).to_string(), "4H");
    }

    #[test]
    fn test_rank_orders_the_ladder() {
        let one_club = Call::bid(1, Strain::Clubs);
        let one_nt = Call::bid(1, Strain::NoTrump);
        let two_club = Call::bid(2, Strain::Clubs);
        let seven_nt = Call::bid(7, Strain::NoTrump);
        assert_eq!(one_club.rank(), Some(0));
        assert_eq!(one_nt.rank(), Some(4));
        assert_eq!(two_club.rank(), Some(5));
        assert_eq!(seven_nt.rank(), Some(34));
        assert_eq!(Call::Pass.rank(), None);
        assert_eq!(Call::bid(0, Strain::Clubs).rank(), None);
        assert_eq!(Call::bid(8, Strain::Spades).rank(), None);
    }

    #[test]
    fn test_serde_uses_tokens() {
        let yaml = serde_yaml::to_string(&Call::bid(2, Strain::NoTrump)).unwrap();
        assert_eq!(yaml.trim(), "2NT");
        let call: Call = serde_yaml::from_str("1H").unwrap();
        assert_eq!(call, Call::bid(1, Strain::Hearts));
        assert!(serde_yaml::from_str::<Call>("9Z").is_err());
    }
}
