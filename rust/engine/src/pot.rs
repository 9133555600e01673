use tracing::debug;

use crate::dice::{DieState, Face};
use crate::rng::RunRng;
use crate::rules::RuleContext;
use crate::scoring::{classify, HandResult};

/// Where a pot stands, derived from the hand counter and accumulated heat.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PotStatus {
    InProgress,
    /// Heat reached the target; takes precedence over an exhausted budget
    Cleared,
    /// Every hand was played without reaching the target
    Failed,
}

/// One pot: a fixed hand budget, a reroll budget per hand and a heat target.
///
/// This type only counts. Deciding whether the pot is over and starting the
/// next hand is left to the caller.
///
/// Invariants: `current_hand_index <= hands_per_pot`,
/// `rerolls_left <= base_rerolls`, and `pot_heat` never decreases within a pot.
#[derive(Debug, Clone, PartialEq)]
pub struct PotState {
    pub(crate) dice_states: Vec<DieState>,
    pub(crate) rule_ctx: RuleContext,
    pub(crate) hands_per_pot: u32,
    pub(crate) base_rerolls: u32,
    pub(crate) pot_target: u32,
    pub(crate) current_hand_index: u32,
    pub(crate) rerolls_left: u32,
    pub(crate) pot_heat: u32,
}

impl PotState {
    pub fn new(
        dice_states: Vec<DieState>,
        rule_ctx: RuleContext,
        hands_per_pot: u32,
        base_rerolls: u32,
        pot_target: u32,
    ) -> Self {
        Self {
            dice_states,
            rule_ctx,
            hands_per_pot,
            base_rerolls,
            pot_target,
            current_hand_index: 0,
            rerolls_left: 0,
            pot_heat: 0,
        }
    }

    /// Re-arms the pot with new budgets and rules, keeping the dice.
    pub(crate) fn configure(
        &mut self,
        rule_ctx: RuleContext,
        hands_per_pot: u32,
        base_rerolls: u32,
        pot_target: u32,
    ) {
        self.rule_ctx = rule_ctx;
        self.hands_per_pot = hands_per_pot;
        self.base_rerolls = base_rerolls;
        self.pot_target = pot_target;
    }

    /// Clears heat and the hand counter, then starts hand one.
    pub fn start_first_hand(&mut self, rng: &mut RunRng) {
        self.current_hand_index = 0;
        self.pot_heat = 0;
        self.start_hand(rng);
    }

    /// Refills rerolls, releases every hold and rolls all dice.
    pub fn start_hand(&mut self, rng: &mut RunRng) {
        self.rerolls_left = self.base_rerolls;
        for ds in &mut self.dice_states {
            ds.set_locked(false);
            ds.roll(rng);
        }
    }

    /// Rerolls every unheld die. Returns `false`, touching nothing, when no
    /// rerolls remain.
    pub fn reroll_unlocked(&mut self, rng: &mut RunRng) -> bool {
        if self.rerolls_left == 0 {
            return false;
        }
        for ds in &mut self.dice_states {
            ds.roll(rng);
        }
        self.rerolls_left -= 1;
        debug!(rerolls_left = self.rerolls_left, "rerolled unlocked dice");
        true
    }

    /// Scores the showing faces, banks the heat and advances the hand counter.
    pub fn submit_hand(&mut self) -> HandResult {
        let faces = self.current_faces();
        let result = classify(&faces, &self.rule_ctx);
        self.pot_heat = self.pot_heat.saturating_add(result.total_heat);
        self.current_hand_index += 1;
        result
    }

    /// Flips the hold on one die and returns the new state, or `None` for an
    /// index that names no die.
    pub fn toggle_lock(&mut self, die_index: usize) -> Option<bool> {
        let ds = self.dice_states.get_mut(die_index)?;
        let locked = !ds.is_locked();
        ds.set_locked(locked);
        Some(locked)
    }

    pub fn current_faces(&self) -> Vec<Face> {
        self.dice_states
            .iter()
            .map(|ds| ds.current_face().clone())
            .collect()
    }

    pub fn dice_states(&self) -> &[DieState] {
        &self.dice_states
    }

    pub fn rule_ctx(&self) -> &RuleContext {
        &self.rule_ctx
    }

    pub fn hands_per_pot(&self) -> u32 {
        self.hands_per_pot
    }

    pub fn base_rerolls(&self) -> u32 {
        self.base_rerolls
    }

    pub fn pot_target(&self) -> u32 {
        self.pot_target
    }

    pub fn current_hand_index(&self) -> u32 {
        self.current_hand_index
    }

    pub fn rerolls_left(&self) -> u32 {
        self.rerolls_left
    }

    pub fn pot_heat(&self) -> u32 {
        self.pot_heat
    }

    pub fn hands_remaining(&self) -> u32 {
        self.hands_per_pot.saturating_sub(self.current_hand_index)
    }

    /// 1-based number of the hand being played, clamped once the budget is spent.
    pub fn current_hand_number(&self) -> u32 {
        if self.current_hand_index >= self.hands_per_pot {
            self.hands_per_pot
        } else {
            self.current_hand_index + 1
        }
    }

    pub fn is_pot_complete(&self) -> bool {
        self.current_hand_index >= self.hands_per_pot
    }

    pub fn is_pot_cleared(&self) -> bool {
        self.pot_heat >= self.pot_target
    }

    pub fn status(&self) -> PotStatus {
        if self.is_pot_cleared() {
            PotStatus::Cleared
        } else if self.is_pot_complete() {
            PotStatus::Failed
        } else {
            PotStatus::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::make_plain_d6;
    use std::sync::Arc;

    fn pot(rng: &mut RunRng) -> PotState {
        let dice = (0..5)
            .map(|_| DieState::from_die(Arc::new(make_plain_d6()), rng))
            .collect();
        PotState::new(dice, RuleContext::default(), 3, 2, 10_000)
    }

    #[test]
    fn hand_number_is_one_based_and_clamped() {
        let mut rng = RunRng::new_with_seed(1);
        let mut p = pot(&mut rng);
        p.start_first_hand(&mut rng);
        assert_eq!(p.current_hand_number(), 1);
        p.submit_hand();
        p.submit_hand();
        p.submit_hand();
        assert_eq!(p.current_hand_index(), 3);
        assert_eq!(p.current_hand_number(), 3);
        assert_eq!(p.hands_remaining(), 0);
    }

    #[test]
    fn cleared_wins_over_complete() {
        let mut rng = RunRng::new_with_seed(1);
        let mut p = pot(&mut rng);
        p.start_first_hand(&mut rng);
        p.current_hand_index = 3;
        p.pot_heat = 10_000;
        assert_eq!(p.status(), PotStatus::Cleared);
        p.pot_heat = 9_999;
        assert_eq!(p.status(), PotStatus::Failed);
        p.current_hand_index = 2;
        assert_eq!(p.status(), PotStatus::InProgress);
    }

    #[test]
    fn toggle_lock_out_of_range() {
        let mut rng = RunRng::new_with_seed(1);
        let mut p = pot(&mut rng);
        assert_eq!(p.toggle_lock(5), None);
        assert_eq!(p.toggle_lock(0), Some(true));
        assert_eq!(p.toggle_lock(0), Some(false));
    }
}
