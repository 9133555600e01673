use std::sync::Arc;

use whale_engine::dice::{make_plain_d6, DieState};
use whale_engine::pot::{PotState, PotStatus};
use whale_engine::rng::RunRng;
use whale_engine::rules::RuleContext;

fn fresh_pot(rng: &mut RunRng, hands: u32, rerolls: u32, target: u32) -> PotState {
    let dice = (0..5)
        .map(|_| DieState::from_die(Arc::new(make_plain_d6()), rng))
        .collect();
    let mut pot = PotState::new(dice, RuleContext::default(), hands, rerolls, target);
    pot.start_first_hand(rng);
    pot
}

fn indices(pot: &PotState) -> Vec<usize> {
    pot.dice_states().iter().map(|d| d.current_index()).collect()
}

#[test]
fn first_hand_starts_clean() {
    let mut rng = RunRng::new_with_seed(3);
    let pot = fresh_pot(&mut rng, 4, 2, 500);
    assert_eq!(pot.current_hand_index(), 0);
    assert_eq!(pot.current_hand_number(), 1);
    assert_eq!(pot.rerolls_left(), 2);
    assert_eq!(pot.pot_heat(), 0);
    assert_eq!(pot.hands_remaining(), 4);
    assert_eq!(pot.status(), PotStatus::InProgress);
    assert!(pot.dice_states().iter().all(|d| !d.is_locked()));
}

#[test]
fn reroll_without_budget_changes_nothing() {
    let mut rng = RunRng::new_with_seed(11);
    let mut pot = fresh_pot(&mut rng, 4, 0, 500);
    let before = indices(&pot);
    let rng_before = rng.state();

    assert!(!pot.reroll_unlocked(&mut rng));
    assert_eq!(indices(&pot), before);
    assert_eq!(rng.state(), rng_before, "no randomness may be consumed");
}

#[test]
fn reroll_spends_budget_and_respects_holds() {
    let mut rng = RunRng::new_with_seed(21);
    let mut pot = fresh_pot(&mut rng, 4, 3, 500);
    pot.toggle_lock(0);
    pot.toggle_lock(4);
    let held = (
        pot.dice_states()[0].current_index(),
        pot.dice_states()[4].current_index(),
    );

    for left in (0..3).rev() {
        assert!(pot.reroll_unlocked(&mut rng));
        assert_eq!(pot.rerolls_left(), left);
        assert_eq!(pot.dice_states()[0].current_index(), held.0);
        assert_eq!(pot.dice_states()[4].current_index(), held.1);
    }
    assert!(!pot.reroll_unlocked(&mut rng));
}

#[test]
fn start_hand_releases_holds_and_refills_rerolls() {
    let mut rng = RunRng::new_with_seed(5);
    let mut pot = fresh_pot(&mut rng, 4, 2, 500);
    for i in 0..5 {
        assert_eq!(pot.toggle_lock(i), Some(true));
    }
    pot.reroll_unlocked(&mut rng);
    pot.reroll_unlocked(&mut rng);
    assert_eq!(pot.rerolls_left(), 0);

    pot.start_hand(&mut rng);
    assert_eq!(pot.rerolls_left(), 2);
    assert!(pot.dice_states().iter().all(|d| !d.is_locked()));
}

#[test]
fn submit_accumulates_heat_and_counts_hands() {
    let mut rng = RunRng::new_with_seed(8);
    let mut pot = fresh_pot(&mut rng, 3, 1, 1_000_000);
    let mut expected = 0;
    for n in 1..=3 {
        let faces = pot.current_faces();
        let r = pot.submit_hand();
        assert_eq!(r.faces, faces);
        expected += r.total_heat;
        assert_eq!(pot.pot_heat(), expected);
        assert_eq!(pot.current_hand_index(), n);
        if n < 3 {
            pot.start_hand(&mut rng);
        }
    }
    assert!(pot.is_pot_complete());
    assert!(!pot.is_pot_cleared());
    assert_eq!(pot.status(), PotStatus::Failed);
    assert_eq!(pot.current_hand_number(), 3);
}

#[test]
fn single_hand_can_clear_and_complete_at_once() {
    let mut rng = RunRng::new_with_seed(8);
    let mut pot = fresh_pot(&mut rng, 1, 0, 1);
    pot.submit_hand();
    assert!(pot.is_pot_complete());
    assert!(pot.is_pot_cleared());
    assert_eq!(pot.status(), PotStatus::Cleared);
}

#[test]
fn toggle_lock_rejects_bad_index() {
    let mut rng = RunRng::new_with_seed(2);
    let mut pot = fresh_pot(&mut rng, 4, 2, 500);
    assert_eq!(pot.toggle_lock(7), None);
    assert!(pot.dice_states().iter().all(|d| !d.is_locked()));
}
