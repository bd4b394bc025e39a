use crate::auction::Auction;
use crate::card::Card;
use crate::deal::{Deal, Position};
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

const SUIT_SEQUENCE: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

/// Tags written alongside a deal on export.
#[derive(Debug, Clone, Default)]
pub struct PbnRecord<'a> {
    pub event: &'a str,
    pub site: &'a str,
    pub note: Option<&'a str>,
    pub auction: Option<&'a Auction>,
}

/// Writes one PBN game record. The deal is always listed from North.
pub fn export_deal(deal: &Deal, record: &PbnRecord<'_>) -> String {
    let mut s = String::new();
    s.push_str(&format!("[Event \"{}\"]\n", record.event));
    s.push_str(&format!("[Site \"{}\"]\n", record.site));
    let dealer = record.auction.map(|a| a.dealer).unwrap_or_default();
    s.push_str(&format!("[Dealer \"{}\"]\n", dealer.to_char()));
    s.push_str(&format!("[Deal \"{}\"]\n", export_deal_tag(deal)));
    if let Some(note) = record.note {
        s.push_str(&format!("[Note \"{}\"]\n", note));
    }
    if let Some(auction) = record.auction {
        s.push_str(&format!("[Auction \"{}\"]\n", auction.dealer.to_char()));
        let calls: Vec<String> = auction.calls.iter().map(|c| c.render()).collect();
        s.push_str(&calls.join(" "));
        s.push('\n');
    }
    s
}

/// The value of a `[Deal]` tag: "N:<north> <east> <south> <west>".
pub fn export_deal_tag(deal: &Deal) -> String {
    let hands: Vec<String> = Position::ALL
        .iter()
        .map(|&pos| export_hand(deal.hand(pos)))
        .collect();
    format!("N:{}", hands.join(" "))
}

pub fn export_hand(hand: &Hand) -> String {
    SUIT_SEQUENCE
        .iter()
        .map(|&suit| hand.holding(suit))
        .collect::<Vec<_>>()
        .join(".")
}

/// Reads the `[Deal]` tag of a PBN record. Returns `None` unless all four
/// hands are present and well formed.
pub fn import_deal(pbn: &str) -> Option<Deal> {
    let line = pbn.lines().find(|l| l.starts_with("[Deal \""))?;
    let value = line.strip_prefix("[Deal \"")?.strip_suffix("\"]")?;
    let (first, hands_str) = value.split_once(':')?;
    let mut pos = Position::from_char(first.chars().next()?)?;

    let mut hands: [Hand; 4] = Default::default();
    let parts: Vec<&str> = hands_str.split_whitespace().collect();
    if parts.len() != 4 {
        return None;
    }
    for part in parts {
        hands[pos.idx()] = import_hand(part)?;
        pos = pos.next();
    }
    Some(Deal::new(hands))
}

/// Strict counterpart of `hand_parser::parse_hand`: any unknown rank fails.
pub fn import_hand(hand_str: &str) -> Option<Hand> {
    let suits: Vec<&str> = hand_str.split('.').collect();
    if suits.len() != 4 {
        return None;
    }

    let mut cards = Vec::new();
    for (suit, suit_str) in SUIT_SEQUENCE.iter().zip(suits) {
        for c in suit_str.chars() {
            cards.push(Card::new(*suit, Rank::from_char(c)?));
        }
    }
    Some(Hand::new(cards))
}
