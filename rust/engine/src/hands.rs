//! Static hand catalog: names, families and the base heat/mult each hand
//! contributes to the score formula.

use serde::{Deserialize, Serialize};

/// Identifier of a classified hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HandId {
    #[serde(rename = "std_highcard")]
    HighCard,
    #[serde(rename = "std_pair")]
    Pair,
    #[serde(rename = "std_2pair")]
    TwoPair,
    #[serde(rename = "std_3kind")]
    ThreeOfAKind,
    #[serde(rename = "std_straight")]
    Straight,
    #[serde(rename = "std_fullhouse")]
    FullHouse,
    #[serde(rename = "std_4kind")]
    FourOfAKind,
    #[serde(rename = "std_high_straight")]
    HighStraight,
    #[serde(rename = "std_5kind")]
    FiveOfAKind,
    #[serde(rename = "std_flush")]
    Flush,
    #[serde(rename = "std_straight_flush")]
    StraightFlush,
    #[serde(rename = "std_royal_flush")]
    RoyalFlush,
    #[serde(rename = "royal_2pair")]
    RoyalTwoPair,
    #[serde(rename = "royal_3kind")]
    RoyalThreeOfAKind,
    #[serde(rename = "royal_fullhouse")]
    RoyalFullHouse,
    #[serde(rename = "royal_4kind")]
    RoyalFourOfAKind,
    #[serde(rename = "royal_5kind")]
    RoyalFiveOfAKind,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandFamily {
    Standard,
    Suit,
    Royal,
}

/// Read-only catalog entry for a hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandDef {
    pub id: HandId,
    pub name: &'static str,
    pub family: HandFamily,
    pub base_heat: u32,
    pub base_mult: f64,
    /// Display ordering, higher is stronger
    pub priority: u8,
    pub short_desc: &'static str,
}

const fn def(
    id: HandId,
    name: &'static str,
    family: HandFamily,
    base_heat: u32,
    base_mult: f64,
    priority: u8,
    short_desc: &'static str,
) -> HandDef {
    HandDef {
        id,
        name,
        family,
        base_heat,
        base_mult,
        priority,
        short_desc,
    }
}

static HIGH_CARD: HandDef = def(HandId::HighCard, "High Card", HandFamily::Standard, 5, 1.0, 1, "No pairs or better.");
static PAIR: HandDef = def(HandId::Pair, "Pair", HandFamily::Standard, 10, 2.0, 2, "Exactly one pair.");
static TWO_PAIR: HandDef = def(HandId::TwoPair, "Two Pair", HandFamily::Standard, 20, 2.0, 3, "Two different pairs.");
static THREE_OF_A_KIND: HandDef = def(
    HandId::ThreeOfAKind,
    "Three of a Kind",
    HandFamily::Standard,
    30,
    3.0,
    4,
    "Three dice show the same value.",
);
static STRAIGHT: HandDef = def(HandId::Straight, "Straight", HandFamily::Standard, 35, 4.0, 5, "Five consecutive values.");
static FLUSH: HandDef = def(HandId::Flush, "Flush", HandFamily::Suit, 40, 4.0, 6, "All dice share the same suit.");
static FULL_HOUSE: HandDef = def(
    HandId::FullHouse,
    "Full House",
    HandFamily::Standard,
    45,
    4.5,
    7,
    "Three of a kind plus a pair.",
);
static FOUR_OF_A_KIND: HandDef = def(
    HandId::FourOfAKind,
    "Four of a Kind",
    HandFamily::Standard,
    60,
    7.0,
    8,
    "Four dice show the same value.",
);
static HIGH_STRAIGHT: HandDef = def(
    HandId::HighStraight,
    "High Straight",
    HandFamily::Standard,
    90,
    6.5,
    9,
    "10-J-Q-K-A, with the ace played high.",
);
static FIVE_OF_A_KIND: HandDef = def(
    HandId::FiveOfAKind,
    "Five of a Kind",
    HandFamily::Standard,
    120,
    12.0,
    10,
    "All five dice match.",
);
static STRAIGHT_FLUSH: HandDef = def(
    HandId::StraightFlush,
    "Straight Flush",
    HandFamily::Suit,
    100,
    8.0,
    11,
    "Straight and all dice share a suit.",
);
static ROYAL_FLUSH: HandDef = def(
    HandId::RoyalFlush,
    "Royal Flush",
    HandFamily::Suit,
    140,
    12.0,
    12,
    "9-10-J-Q-K all in one suit.",
);
static ROYAL_TWO_PAIR: HandDef = def(
    HandId::RoyalTwoPair,
    "Royal Two Pair",
    HandFamily::Royal,
    50,
    5.0,
    13,
    "Two different pairs of Royals.",
);
static ROYAL_THREE_OF_A_KIND: HandDef = def(
    HandId::RoyalThreeOfAKind,
    "Royal Three of a Kind",
    HandFamily::Royal,
    75,
    6.0,
    14,
    "Three Royals of the same rank.",
);
static ROYAL_FULL_HOUSE: HandDef = def(
    HandId::RoyalFullHouse,
    "Royal Full House",
    HandFamily::Royal,
    105,
    8.0,
    15,
    "Three Royals of one rank plus a pair of another.",
);
static ROYAL_FOUR_OF_A_KIND: HandDef = def(
    HandId::RoyalFourOfAKind,
    "Royal Four of a Kind",
    HandFamily::Royal,
    150,
    14.0,
    16,
    "Four Royals of the same rank.",
);
static ROYAL_FIVE_OF_A_KIND: HandDef = def(
    HandId::RoyalFiveOfAKind,
    "Royal Five of a Kind",
    HandFamily::Royal,
    200,
    16.0,
    17,
    "Five Royals of the same rank.",
);

impl HandId {
    pub const ALL: [HandId; 17] = [
        HandId::HighCard,
        HandId::Pair,
        HandId::TwoPair,
        HandId::ThreeOfAKind,
        HandId::Straight,
        HandId::Flush,
        HandId::FullHouse,
        HandId::FourOfAKind,
        HandId::HighStraight,
        HandId::FiveOfAKind,
        HandId::StraightFlush,
        HandId::RoyalFlush,
        HandId::RoyalTwoPair,
        HandId::RoyalThreeOfAKind,
        HandId::RoyalFullHouse,
        HandId::RoyalFourOfAKind,
        HandId::RoyalFiveOfAKind,
    ];

    pub fn def(self) -> &'static HandDef {
        match self {
            HandId::HighCard => &HIGH_CARD,
            HandId::Pair => &PAIR,
            HandId::TwoPair => &TWO_PAIR,
            HandId::ThreeOfAKind => &THREE_OF_A_KIND,
            HandId::Straight => &STRAIGHT,
            HandId::Flush => &FLUSH,
            HandId::FullHouse => &FULL_HOUSE,
            HandId::FourOfAKind => &FOUR_OF_A_KIND,
            HandId::HighStraight => &HIGH_STRAIGHT,
            HandId::FiveOfAKind => &FIVE_OF_A_KIND,
            HandId::StraightFlush => &STRAIGHT_FLUSH,
            HandId::RoyalFlush => &ROYAL_FLUSH,
            HandId::RoyalTwoPair => &ROYAL_TWO_PAIR,
            HandId::RoyalThreeOfAKind => &ROYAL_THREE_OF_A_KIND,
            HandId::RoyalFullHouse => &ROYAL_FULL_HOUSE,
            HandId::RoyalFourOfAKind => &ROYAL_FOUR_OF_A_KIND,
            HandId::RoyalFiveOfAKind => &ROYAL_FIVE_OF_A_KIND,
        }
    }

    /// Stable string id used in saves and hand history.
    pub fn as_str(self) -> &'static str {
        match self {
            HandId::HighCard => "std_highcard",
            HandId::Pair => "std_pair",
            HandId::TwoPair => "std_2pair",
            HandId::ThreeOfAKind => "std_3kind",
            HandId::Straight => "std_straight",
            HandId::FullHouse => "std_fullhouse",
            HandId::FourOfAKind => "std_4kind",
            HandId::HighStraight => "std_high_straight",
            HandId::FiveOfAKind => "std_5kind",
            HandId::Flush => "std_flush",
            HandId::StraightFlush => "std_straight_flush",
            HandId::RoyalFlush => "std_royal_flush",
            HandId::RoyalTwoPair => "royal_2pair",
            HandId::RoyalThreeOfAKind => "royal_3kind",
            HandId::RoyalFullHouse => "royal_fullhouse",
            HandId::RoyalFourOfAKind => "royal_4kind",
            HandId::RoyalFiveOfAKind => "royal_5kind",
        }
    }
}
