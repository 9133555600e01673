use serde::{Deserialize, Serialize};

use crate::hands::HandId;
use crate::rng::RunRng;

/// Angles offered per floor.
pub const ANGLES_PER_SHOP: usize = 2;
/// Edges offered per floor.
pub const EDGES_PER_SHOP: usize = 1;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

/// Run-wide modifier bought from the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: u32,
    pub rarity: Rarity,
}

/// Upgrade attached to one hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: u32,
    pub hand_id: HandId,
    pub rarity: Rarity,
}

/// Angle id that grants one extra reroll per hand, per copy owned.
pub const ROOKIE: &str = "rookie";

pub const ANGLES: &[AngleDef] = &[
    AngleDef {
        id: ROOKIE,
        name: "Rookie",
        description: "Gain +1 reroll each pot.",
        base_cost: 20,
        rarity: Rarity::Common,
    },
    AngleDef {
        id: "snake_eyes",
        name: "Snake Eyes",
        description: "Each 1 in your scoring hand grants +11 Additive Heat.",
        base_cost: 25,
        rarity: Rarity::Common,
    },
    AngleDef {
        id: "high_roller",
        name: "High Roller",
        description: "Each value above 7 in your scoring hand grants +7 Additive Heat.",
        base_cost: 35,
        rarity: Rarity::Uncommon,
    },
    AngleDef {
        id: "glass_knuckles",
        name: "Glass Knuckles",
        description: "Glass faces gain +2.4 Base Mult and have a 1-in-3 chance of shattering.",
        base_cost: 60,
        rarity: Rarity::Rare,
    },
    AngleDef {
        id: "the_shill",
        name: "The Shill",
        description: "Scoring a Pair grants +5 Chips.",
        base_cost: 50,
        rarity: Rarity::Common,
    },
    AngleDef {
        id: "the_shark",
        name: "The Shark",
        description: "At the start of each Pot gain +0.1 Additive Mult for every 50 chips, up to +0.5.",
        base_cost: 100,
        rarity: Rarity::Rare,
    },
];

pub const EDGES: &[EdgeDef] = &[
    EdgeDef {
        id: "muck",
        name: "The Muck",
        description: "High Card now grants +10 Heat and +0.5 Mult.",
        base_cost: 20,
        hand_id: HandId::HighCard,
        rarity: Rarity::Common,
    },
    EdgeDef {
        id: "rookies_tell",
        name: "Rookie's Tell",
        description: "Pair now grants +5 Heat and +0.5 Mult.",
        base_cost: 25,
        hand_id: HandId::Pair,
        rarity: Rarity::Common,
    },
    EdgeDef {
        id: "double_down",
        name: "Double Down",
        description: "Two Pair now grants +5 Heat and +0.5 Mult.",
        base_cost: 30,
        hand_id: HandId::TwoPair,
        rarity: Rarity::Common,
    },
    EdgeDef {
        id: "threes",
        name: "Triplets",
        description: "Three of a Kind now grants +5 Heat and +0.5 Mult.",
        base_cost: 35,
        hand_id: HandId::ThreeOfAKind,
        rarity: Rarity::Uncommon,
    },
    EdgeDef {
        id: "barons_buff",
        name: "Royal Triplets",
        description: "Royal Three of a Kind now grants +10 Heat and +0.5 Mult.",
        base_cost: 85,
        hand_id: HandId::RoyalThreeOfAKind,
        rarity: Rarity::Rare,
    },
    EdgeDef {
        id: "running_numbers",
        name: "Running the Numbers",
        description: "Straight now grants +10 Heat and +0.5 Mult.",
        base_cost: 50,
        hand_id: HandId::Straight,
        rarity: Rarity::Uncommon,
    },
    EdgeDef {
        id: "full_boat",
        name: "Full Boat",
        description: "Full House now grants +10 Heat and +0.5 Mult.",
        base_cost: 50,
        hand_id: HandId::FullHouse,
        rarity: Rarity::Uncommon,
    },
    EdgeDef {
        id: "four_horsemen",
        name: "Four Horsemen",
        description: "Four of a Kind now grants +10 Heat and +0.5 Mult.",
        base_cost: 60,
        hand_id: HandId::FourOfAKind,
        rarity: Rarity::Rare,
    },
    EdgeDef {
        id: "quints",
        name: "Quints",
        description: "Five of a Kind now grants +15 Heat and +1.0 Mult.",
        base_cost: 75,
        hand_id: HandId::FiveOfAKind,
        rarity: Rarity::Rare,
    },
    EdgeDef {
        id: "whales_gambit",
        name: "Whale's Gambit",
        description: "Royal Five of a Kind now grants +15 Heat and +1.0 Mult.",
        base_cost: 80,
        hand_id: HandId::RoyalFiveOfAKind,
        rarity: Rarity::Rare,
    },
];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Angle,
    Edge,
}

/// One offer on a floor's shelf. Only a purchase changes it, and only by
/// flipping `purchased`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub kind: ItemKind,
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    #[serde(default)]
    pub purchased: bool,
}

impl ShopItem {
    pub fn is_angle(&self) -> bool {
        self.kind == ItemKind::Angle
    }

    pub fn is_edge(&self) -> bool {
        self.kind == ItemKind::Edge
    }
}

impl From<&AngleDef> for ShopItem {
    fn from(a: &AngleDef) -> Self {
        Self {
            kind: ItemKind::Angle,
            id: a.id.to_string(),
            name: a.name.to_string(),
            description: a.description.to_string(),
            cost: a.base_cost,
            purchased: false,
        }
    }
}

impl From<&EdgeDef> for ShopItem {
    fn from(e: &EdgeDef) -> Self {
        Self {
            kind: ItemKind::Edge,
            id: e.id.to_string(),
            name: e.name.to_string(),
            description: e.description.to_string(),
            cost: e.base_cost,
            purchased: false,
        }
    }
}

/// A floor's inventory. Replaced wholesale when the floor changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    pub floor: u32,
    pub items: Vec<ShopItem>,
}

/// Rolls a fresh inventory: distinct angles first, then edges.
pub fn roll_shop_for_floor(floor: u32, rng: &mut RunRng) -> ShopState {
    let mut angles: Vec<&AngleDef> = ANGLES.iter().collect();
    let mut edges: Vec<&EdgeDef> = EDGES.iter().collect();
    rng.shuffle(&mut angles);
    rng.shuffle(&mut edges);

    let items = angles
        .into_iter()
        .take(ANGLES_PER_SHOP)
        .map(ShopItem::from)
        .chain(edges.into_iter().take(EDGES_PER_SHOP).map(ShopItem::from))
        .collect();

    ShopState { floor, items }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_has_two_angles_then_one_edge() {
        let mut rng = RunRng::new_with_seed(5);
        let shop = roll_shop_for_floor(1, &mut rng);
        assert_eq!(shop.floor, 1);
        assert_eq!(shop.items.len(), ANGLES_PER_SHOP + EDGES_PER_SHOP);
        assert!(shop.items[0].is_angle());
        assert!(shop.items[1].is_angle());
        assert!(shop.items[2].is_edge());
        assert_ne!(shop.items[0].id, shop.items[1].id);
        assert!(shop.items.iter().all(|i| !i.purchased));
    }

    #[test]
    fn shop_roll_is_deterministic() {
        let a = roll_shop_for_floor(2, &mut RunRng::new_with_seed(99));
        let b = roll_shop_for_floor(2, &mut RunRng::new_with_seed(99));
        assert_eq!(a, b);
    }

    #[test]
    fn item_kind_serializes_lowercase() {
        let item = ShopItem::from(&EDGES[0]);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"edge\""));
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = ANGLES.iter().map(|a| a.id).chain(EDGES.iter().map(|e| e.id)).collect();
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }
}
