use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rng::RunRng;
use crate::rules::RuleContext;

/// One of the four suits a face may carry.
/// Faces without a suit can never take part in a flush.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    /// Spade (♠)
    Spade,
    /// Heart (♥)
    Heart,
    /// Diamond (♦)
    Diamond,
    /// Club (♣)
    Club,
}

/// Markers authored onto a face. Under the Comped Ruin boss rule any
/// tagged face loses its tags and scores nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FaceTag {
    Glass,
    Hot,
    Juiced,
    Tab,
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club]
}

/// A single side of a die.
///
/// Faces are authored once and never mutated; the active [`RuleContext`]
/// decides how the same face is read for shape detection, for the additive
/// score term and for royal eligibility.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Printed value (A = 1, J = 11, Q = 12, K = 13)
    pub base_value: u8,
    /// Suit, if the face carries one
    #[serde(default)]
    pub suit: Option<Suit>,
    /// Counts as a J/Q/K for royal-family classification
    #[serde(default)]
    pub is_royal: bool,
    /// Counts as royal regardless of value
    #[serde(default)]
    pub is_wild: bool,
    #[serde(default)]
    pub tags: BTreeSet<FaceTag>,
    /// Dead faces still show a value but add nothing to the sum
    #[serde(default)]
    pub dead: bool,
}

impl Face {
    pub fn new(base_value: u8, suit: Option<Suit>) -> Self {
        Self {
            base_value,
            suit,
            is_royal: false,
            is_wild: false,
            tags: BTreeSet::new(),
            dead: false,
        }
    }

    pub fn royal(mut self) -> Self {
        self.is_royal = true;
        self
    }

    pub fn wild(mut self) -> Self {
        self.is_wild = true;
        self
    }

    pub fn dead(mut self) -> Self {
        self.dead = true;
        self
    }

    pub fn with_tag(mut self, tag: FaceTag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Value used for hand shape detection.
    ///
    /// The Short Deck cap (4) applies before the Low Ceiling cap (10).
    pub fn pattern_value(&self, ctx: &RuleContext) -> u8 {
        let mut v = self.base_value;
        if ctx.short_deck && v > 4 {
            v = 4;
        }
        if ctx.low_ceiling && v > 10 {
            v = 10;
        }
        v
    }

    /// Value used in the additive score term.
    pub fn sum_value(&self, ctx: &RuleContext) -> u8 {
        if self.is_suppressed(ctx) {
            return 0;
        }
        self.pattern_value(ctx)
    }

    /// Tags that are live for the current pot.
    pub fn effective_tags(&self, ctx: &RuleContext) -> BTreeSet<FaceTag> {
        if self.is_suppressed(ctx) {
            return BTreeSet::new();
        }
        self.tags.clone()
    }

    /// Whether the face counts as a royal (J/Q/K/wild) for classification.
    pub fn is_royal_for_hand(&self, ctx: &RuleContext) -> bool {
        if ctx.low_ceiling || self.is_suppressed(ctx) {
            return false;
        }
        self.is_royal || self.is_wild
    }

    fn is_suppressed(&self, ctx: &RuleContext) -> bool {
        self.dead || (ctx.comped_ruin && !self.tags.is_empty())
    }
}

/// An ordered set of faces. Rolling picks one side uniformly.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Die {
    faces: Vec<Face>,
}

impl Die {
    /// # Panics
    ///
    /// Panics if `faces` is empty; a die needs at least one side.
    pub fn new(faces: Vec<Face>) -> Self {
        assert!(!faces.is_empty(), "a die needs at least one face");
        Self { faces }
    }

    pub fn sides(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn roll_index(&self, rng: &mut RunRng) -> usize {
        rng.index(self.sides())
    }
}

/// Runtime cell for one die slot: which side is showing and whether the
/// player is holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct DieState {
    die: Arc<Die>,
    current_index: usize,
    locked: bool,
}

impl DieState {
    /// Puts a die into play showing a freshly rolled side.
    pub fn from_die(die: Arc<Die>, rng: &mut RunRng) -> Self {
        let current_index = die.roll_index(rng);
        Self {
            die,
            current_index,
            locked: false,
        }
    }

    /// Rebuilds a cell from persisted parts. Returns `None` when the index
    /// does not name a side of `die`.
    pub fn restore(die: Arc<Die>, current_index: usize, locked: bool) -> Option<Self> {
        if current_index >= die.sides() {
            return None;
        }
        Some(Self {
            die,
            current_index,
            locked,
        })
    }

    /// Rolls the die unless it is held.
    pub fn roll(&mut self, rng: &mut RunRng) {
        if self.locked {
            return;
        }
        self.current_index = self.die.roll_index(rng);
    }

    pub fn die(&self) -> &Arc<Die> {
        &self.die
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_face(&self) -> &Face {
        &self.die.faces[self.current_index]
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// A plain six-sided die valued 1..=6 with suits cycling
/// spade, heart, diamond, club.
pub fn make_plain_d6() -> Die {
    let suits = all_suits();
    let faces = (1..=6u8)
        .enumerate()
        .map(|(i, v)| Face::new(v, Some(suits[i % suits.len()])))
        .collect();
    Die::new(faces)
}

/// A six-sided die whose every side is `face`.
pub fn make_loaded_die(face: Face) -> Die {
    Die::new(vec![face; 6])
}
