use std::collections::HashSet;

use whale_engine::engine::{GameEngine, RunConfig};
use whale_engine::errors::GameError;
use whale_engine::rng::RunRng;
use whale_engine::save;
use whale_engine::shop::{roll_shop_for_floor, ItemKind, ShopItem, ShopState, ANGLES, EDGES};

fn item(kind: ItemKind, id: &str, cost: u32) -> ShopItem {
    ShopItem {
        kind,
        id: id.to_string(),
        name: id.to_uppercase(),
        description: String::new(),
        cost,
        purchased: false,
    }
}

/// Engine with a known shelf and purse.
fn engine_with_shop(chips: u32, max_angles: u32, owned_angles: &[&str]) -> GameEngine {
    let engine = GameEngine::new(31, RunConfig::default()).unwrap();
    let mut file = save::encode(&engine);
    file.chips = chips;
    file.max_angles = max_angles;
    file.owned_angles = owned_angles.iter().map(|s| s.to_string()).collect();
    file.shop = Some(ShopState {
        floor: 1,
        items: vec![
            item(ItemKind::Angle, "rookie", 20),
            item(ItemKind::Angle, "the_shill", 50),
            item(ItemKind::Edge, "muck", 20),
        ],
    });
    save::decode(file, RunConfig::default()).unwrap()
}

#[test]
fn rolled_shops_hold_catalog_items() {
    let mut rng = RunRng::new_with_seed(9);
    for floor in 1..=20 {
        let shop = roll_shop_for_floor(floor, &mut rng);
        assert_eq!(shop.floor, floor);
        assert_eq!(shop.items.len(), 3);
        assert!(shop.items[..2].iter().all(ShopItem::is_angle));
        assert!(shop.items[2].is_edge());
        assert_ne!(shop.items[0].id, shop.items[1].id);
        assert!(shop.items.iter().all(|i| !i.purchased));
        for i in &shop.items[..2] {
            let def = ANGLES.iter().find(|a| a.id == i.id).expect("known angle");
            assert_eq!(i.cost, def.base_cost);
        }
        assert!(EDGES.iter().any(|e| e.id == shop.items[2].id));
    }
}

#[test]
fn shops_vary_across_floors() {
    let mut rng = RunRng::new_with_seed(4);
    let seen: HashSet<Vec<String>> = (1..=10)
        .map(|f| {
            roll_shop_for_floor(f, &mut rng)
                .items
                .into_iter()
                .map(|i| i.id)
                .collect()
        })
        .collect();
    assert!(seen.len() > 1);
}

#[test]
fn buying_moves_chips_and_ownership() {
    let mut engine = engine_with_shop(100, 5, &[]);
    let p = engine.buy_shop_item(1).expect("buy shill");
    assert_eq!(p.kind, ItemKind::Angle);
    assert_eq!(p.id, "the_shill");
    assert_eq!(p.cost, 50);
    assert_eq!(p.to_string(), "Bought THE_SHILL for 50 chips.");

    let p = engine.buy_shop_item(2).expect("buy edge");
    assert_eq!(p.kind, ItemKind::Edge);

    let s = engine.state();
    assert_eq!(s.chips, 30);
    assert_eq!(s.owned_angles, vec!["the_shill".to_string()]);
    assert_eq!(s.owned_edges, vec!["muck".to_string()]);
    let items = engine.shop_items();
    assert!(!items[0].purchased);
    assert!(items[1].purchased);
    assert!(items[2].purchased);
}

#[test]
fn insufficient_chips_changes_nothing() {
    let mut engine = engine_with_shop(49, 5, &[]);
    let before = engine.state().clone();
    assert_eq!(engine.buy_shop_item(1), Err(GameError::InsufficientChips));
    assert_eq!(engine.state(), &before);
}

#[test]
fn exact_chips_are_enough() {
    let mut engine = engine_with_shop(20, 5, &[]);
    assert!(engine.buy_shop_item(0).is_ok());
    assert_eq!(engine.state().chips, 0);
}

#[test]
fn second_purchase_of_the_same_item_is_rejected() {
    let mut engine = engine_with_shop(100, 5, &[]);
    engine.buy_shop_item(0).unwrap();
    assert_eq!(engine.buy_shop_item(0), Err(GameError::AlreadyPurchased));
    assert_eq!(engine.state().chips, 80);
    assert_eq!(engine.state().owned_angles.len(), 1);
}

#[test]
fn out_of_range_position_is_rejected() {
    let mut engine = engine_with_shop(100, 5, &[]);
    assert_eq!(engine.buy_shop_item(3), Err(GameError::NoItemAtPosition));
    assert_eq!(engine.state().chips, 100);
}

#[test]
fn no_shop_is_reported() {
    let engine = GameEngine::new(31, RunConfig::default()).unwrap();
    let mut file = save::encode(&engine);
    file.shop = None;
    let mut engine = save::decode(file, RunConfig::default()).unwrap();
    assert!(engine.shop_items().is_empty());
    assert_eq!(engine.buy_shop_item(0), Err(GameError::NoShop));
}

#[test]
fn full_angle_slots_block_angles_but_not_edges() {
    let mut engine = engine_with_shop(200, 1, &["high_roller"]);
    assert_eq!(engine.buy_shop_item(0), Err(GameError::AngleSlotsFull));
    assert!(!engine.shop_items()[0].purchased);
    assert_eq!(engine.state().chips, 200);

    assert!(engine.buy_shop_item(2).is_ok());
    assert_eq!(engine.state().chips, 180);
}

#[test]
fn owned_angle_ids_may_repeat() {
    let mut engine = engine_with_shop(100, 5, &["rookie"]);
    engine.buy_shop_item(0).unwrap();
    assert_eq!(
        engine.state().owned_angles,
        vec!["rookie".to_string(), "rookie".to_string()]
    );
}

#[test]
fn bought_rookie_applies_from_the_next_pot() {
    let mut engine = engine_with_shop(100, 5, &[]);
    engine.buy_shop_item(0).unwrap();
    assert_eq!(engine.state().pot_state.base_rerolls(), 2);
    engine.start_pot();
    assert_eq!(engine.state().pot_state.rerolls_left(), 3);
}
