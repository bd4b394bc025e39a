use crate::hand::Hand;

/// Parses a hand string in the format "Spades.Hearts.Diamonds.Clubs".
///
/// This is the dotted form used by the test vectors and the debug binary,
/// e.g. "AKJ42.K32.432.Q2". Parsing inherits the leniency of
/// [`Hand::from_suits`]: unknown characters are dropped and missing trailing
/// suits are treated as voids. Use `crate::io::pbn::import_hand` when the
/// input must be rejected on any malformed card.
pub fn parse_hand(s: &str) -> Hand {
    let mut suits = s.split('.');
    let mut next = || suits.next().unwrap_or("");
    let spades = next();
    let hearts = next();
    let diamonds = next();
    let clubs = next();
    Hand::from_suits(spades, hearts, diamonds, clubs)
}
