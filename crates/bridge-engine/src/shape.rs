//! Shape expressions such as `"Balanced, No 5-card Major"` or
//! `"4+ Spades, <3 Hearts"`.
//!
//! Expressions are compiled once, when a rule is loaded, into a list of
//! clauses that are ANDed together. Clauses this parser does not know are
//! kept as [`ShapeClause::Unrecognized`] and always pass.

use crate::hand_model::HandModel;
use bridge_core::Suit;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const SUIT: &str = r"(spades?|hearts?|diamonds?|clubs?|[shdc])";

static MIN_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^(\d+)\s*\+\s*{SUIT}$")).expect("valid shape pattern"));
static BELOW_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^<\s*(\d+)\s*{SUIT}$")).expect("valid shape pattern"));
static MAX_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^max\s+(\d+)\s*{SUIT}$")).expect("valid shape pattern"));
static NO_SUIT_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^no\s+(\d+)\s*\+\s*{SUIT}$")).expect("valid shape pattern"));
static NO_GROUP_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^no\s+(\d+)\s*-?\s*card\s+(major|minor)$").expect("valid shape pattern"));
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*(?:[,;&]|\band\b)\s*").expect("valid shape pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitGroup {
    Majors,
    Minors,
}

impl SuitGroup {
    pub fn contains(self, suit: Suit) -> bool {
        match self {
            SuitGroup::Majors => suit.is_major(),
            SuitGroup::Minors => suit.is_minor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeClause {
    /// `"5+ Hearts"`: at least `count` cards.
    MinLength { suit: Suit, count: u8 },
    /// `"<3 Spades"` or `"No 4+ Spades"`: fewer than `count` cards.
    BelowLength { suit: Suit, count: u8 },
    /// `"Max 1 Club"`: at most `count` cards.
    MaxLength { suit: Suit, count: u8 },
    Balanced,
    /// `"No 5-card Major"`: no suit of the group with `count` or more cards.
    NoSuitOf { group: SuitGroup, count: u8 },
    Unrecognized(String),
}

impl ShapeClause {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("balanced") {
            return ShapeClause::Balanced;
        }
        if let Some((count, suit)) = count_and_suit(&NO_SUIT_LENGTH, text) {
            return ShapeClause::BelowLength { suit, count };
        }
        if let Some(caps) = NO_GROUP_LENGTH.captures(text) {
            if let Ok(count) = caps[1].parse() {
                let group = if caps[2].eq_ignore_ascii_case("major") {
                    SuitGroup::Majors
                } else {
                    SuitGroup::Minors
                };
                return ShapeClause::NoSuitOf { group, count };
            }
        }
        if let Some((count, suit)) = count_and_suit(&BELOW_LENGTH, text) {
            return ShapeClause::BelowLength { suit, count };
        }
        if let Some((count, suit)) = count_and_suit(&MAX_LENGTH, text) {
            return ShapeClause::MaxLength { suit, count };
        }
        if let Some((count, suit)) = count_and_suit(&MIN_LENGTH, text) {
            return ShapeClause::MinLength { suit, count };
        }
        ShapeClause::Unrecognized(text.to_string())
    }

    pub fn is_satisfied(&self, hand: &HandModel) -> bool {
        match self {
            ShapeClause::MinLength { suit, count } => hand.length(*suit) >= *count,
            ShapeClause::BelowLength { suit, count } => hand.length(*suit) < *count,
            ShapeClause::MaxLength { suit, count } => hand.length(*suit) <= *count,
            ShapeClause::Balanced => hand.balanced,
            ShapeClause::NoSuitOf { group, count } => {
                Suit::ALL
                    .iter()
                    .filter(|&&s| group.contains(s))
                    .all(|&s| hand.length(s) < *count)
            }
            ShapeClause::Unrecognized(_) => true,
        }
    }
}

fn count_and_suit(re: &Regex, text: &str) -> Option<(u8, Suit)> {
    let caps = re.captures(text)?;
    let count = caps[1].parse().ok()?;
    let suit = Suit::from_name(&caps[2])?;
    Some((count, suit))
}

/// A compiled shape expression. The empty expression accepts every hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeExpr {
    pub clauses: Vec<ShapeClause>,
}

impl ShapeExpr {
    pub fn parse(text: &str) -> Self {
        let clauses = SEPARATOR
            .split(text)
            .map(str::trim)
            .filter(|part| !part.is_empty() && !part.eq_ignore_ascii_case("any"))
            .map(ShapeClause::parse)
            .collect();
        Self { clauses }
    }

    pub fn is_satisfied(&self, hand: &HandModel) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(hand))
    }

    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().filter_map(|c| match c {
            ShapeClause::Unrecognized(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for ShapeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeClause::MinLength { suit, count } => write!(f, "{}+ {}", count, suit.name()),
            ShapeClause::BelowLength { suit, count } => write!(f, "<{} {}", count, suit.name()),
            ShapeClause::MaxLength { suit, count } => write!(f, "Max {} {}", count, suit.name()),
            ShapeClause::Balanced => write!(f, "Balanced"),
            ShapeClause::NoSuitOf { group, count } => match group {
                SuitGroup::Majors => write!(f, "No {}-card Major", count),
                SuitGroup::Minors => write!(f, "No {}-card Minor", count),
            },
            ShapeClause::Unrecognized(text) => write!(f, "{}", text),
        }
    }
}
