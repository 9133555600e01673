use std::collections::{BTreeMap, BTreeSet};

use crate::dice::Face;
use crate::hands::{HandDef, HandId};
use crate::rules::RuleContext;

/// Number of dice in a scored hand.
pub const HAND_SIZE: usize = 5;

const ROYAL_FLUSH_VALUES: [u8; 5] = [9, 10, 11, 12, 13];
const ACE_HIGH_VALUES: [u8; 5] = [1, 10, 11, 12, 13];

/// Full breakdown of one scored hand.
///
/// `total_heat = round_half_even((sum_term + base_heat_bonus) * base_mult)`
#[derive(Debug, Clone, PartialEq)]
pub struct HandResult {
    pub hand_id: HandId,
    pub hand_def: &'static HandDef,
    /// Faces as they were showing when the hand was scored
    pub faces: Vec<Face>,
    pub pattern_values: Vec<u8>,
    pub sum_values: Vec<u8>,
    pub sum_term: u32,
    pub base_heat_bonus: u32,
    pub heat_before_mult: u32,
    pub base_mult: f64,
    pub total_heat: u32,
}

/// Classifies and scores exactly five faces under `ctx`.
///
/// If every face is royal-eligible the royal family is used; otherwise the
/// standard precedence applies: royal flush, straight flush, five, four,
/// full house, flush, high straight / straight, three, two pair, pair,
/// high card.
///
/// # Panics
///
/// Panics if `faces` does not hold exactly five faces.
pub fn classify(faces: &[Face], ctx: &RuleContext) -> HandResult {
    assert_eq!(faces.len(), HAND_SIZE, "a hand is exactly five faces");

    let pattern_values: Vec<u8> = faces.iter().map(|f| f.pattern_value(ctx)).collect();
    let sum_values: Vec<u8> = faces.iter().map(|f| f.sum_value(ctx)).collect();

    let hand_id = if faces.iter().all(|f| f.is_royal_for_hand(ctx)) {
        classify_royal_family(&pattern_values)
    } else {
        classify_standard(faces, &pattern_values)
    };

    let hand_def = hand_id.def();
    let sum_term: u32 = sum_values.iter().map(|&v| u32::from(v)).sum();
    let heat_before_mult = sum_term + hand_def.base_heat;
    let total_heat = round_half_even(f64::from(heat_before_mult) * hand_def.base_mult);

    HandResult {
        hand_id,
        hand_def,
        faces: faces.to_vec(),
        pattern_values,
        sum_values,
        sum_term,
        base_heat_bonus: hand_def.base_heat,
        heat_before_mult,
        base_mult: hand_def.base_mult,
        total_heat,
    }
}

/// Rounds to the nearest integer, ties to even (94.5 -> 94, 95.5 -> 96).
pub fn round_half_even(x: f64) -> u32 {
    x.round_ties_even().max(0.0) as u32
}

fn classify_royal_family(values: &[u8]) -> HandId {
    match frequencies(values).as_slice() {
        [5] => HandId::RoyalFiveOfAKind,
        [4, 1] => HandId::RoyalFourOfAKind,
        [3, 2] => HandId::RoyalFullHouse,
        [3, 1, 1] => HandId::RoyalThreeOfAKind,
        [2, 2, 1] => HandId::RoyalTwoPair,
        // Unreachable with J/Q/K values, kept as a valid fallback
        _ => HandId::HighCard,
    }
}

fn classify_standard(faces: &[Face], values: &[u8]) -> HandId {
    let freqs = frequencies(values);
    let flush = is_flush(faces);
    let straight = detect_straight(values);

    if flush && straight.is_some() && distinct(values) == BTreeSet::from(ROYAL_FLUSH_VALUES) {
        return HandId::RoyalFlush;
    }
    if flush && straight.is_some() {
        return HandId::StraightFlush;
    }

    match freqs.as_slice() {
        [5] => return HandId::FiveOfAKind,
        [4, 1] => return HandId::FourOfAKind,
        [3, 2] => return HandId::FullHouse,
        _ => {}
    }

    if flush {
        return HandId::Flush;
    }

    match straight {
        Some(Straight::AceHigh) => return HandId::HighStraight,
        Some(Straight::Run) => return HandId::Straight,
        None => {}
    }

    match freqs.as_slice() {
        [3, 1, 1] => HandId::ThreeOfAKind,
        [2, 2, 1] => HandId::TwoPair,
        [2, 1, 1, 1] => HandId::Pair,
        _ => HandId::HighCard,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Straight {
    Run,
    AceHigh,
}

/// Five distinct values forming a run, or the ace-high set {1,10,11,12,13}.
fn detect_straight(values: &[u8]) -> Option<Straight> {
    let uniq = distinct(values);
    if uniq.len() != HAND_SIZE {
        return None;
    }
    if uniq == BTreeSet::from(ACE_HIGH_VALUES) {
        return Some(Straight::AceHigh);
    }
    let lo = *uniq.first()?;
    let hi = *uniq.last()?;
    (hi - lo == 4).then_some(Straight::Run)
}

/// Every face carries a suit and all suits match.
fn is_flush(faces: &[Face]) -> bool {
    let Some(first) = faces.first().and_then(|f| f.suit) else {
        return false;
    };
    faces.iter().all(|f| f.suit == Some(first))
}

fn distinct(values: &[u8]) -> BTreeSet<u8> {
    values.iter().copied().collect()
}

/// Value multiplicities, largest first.
fn frequencies(values: &[u8]) -> Vec<u8> {
    let mut counts: BTreeMap<u8, u8> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut freqs: Vec<u8> = counts.into_values().collect();
    freqs.sort_unstable_by(|a, b| b.cmp(a));
    freqs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_are_sorted_descending() {
        assert_eq!(frequencies(&[3, 1, 3, 2, 1]), vec![2, 2, 1]);
        assert_eq!(frequencies(&[6, 6, 6, 6, 6]), vec![5]);
        assert_eq!(frequencies(&[1, 2, 3, 4, 5]), vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn straight_detection() {
        assert_eq!(detect_straight(&[2, 3, 4, 5, 6]), Some(Straight::Run));
        assert_eq!(detect_straight(&[5, 1, 3, 2, 4]), Some(Straight::Run));
        assert_eq!(detect_straight(&[13, 1, 12, 10, 11]), Some(Straight::AceHigh));
        assert_eq!(detect_straight(&[1, 2, 3, 4, 6]), None);
        assert_eq!(detect_straight(&[2, 2, 3, 4, 5]), None);
        // the wrap set only counts as a whole
        assert_eq!(detect_straight(&[1, 11, 12, 13, 2]), None);
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(round_half_even(94.5), 94);
        assert_eq!(round_half_even(95.5), 96);
        assert_eq!(round_half_even(10.4), 10);
        assert_eq!(round_half_even(10.6), 11);
    }

    #[test]
    #[should_panic(expected = "exactly five faces")]
    fn four_faces_is_a_programming_error() {
        let faces = vec![Face::new(1, None); 4];
        classify(&faces, &RuleContext::default());
    }
}
