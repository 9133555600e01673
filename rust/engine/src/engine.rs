use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dice::{make_plain_d6, Die, DieState};
use crate::errors::{ConfigError, GameError};
use crate::pot::{PotState, PotStatus};
use crate::rng::RunRng;
use crate::rules::{BossRule, RuleContext};
use crate::scoring::{round_half_even, HandResult, HAND_SIZE};
use crate::shop::{roll_shop_for_floor, ItemKind, ShopItem, ShopState, ROOKIE};

/// Small, big and boss pot make up one floor.
pub const POTS_PER_FLOOR: u32 = 3;

/// Upper bound on `hands_per_pot`, in configs and in saves.
pub const MAX_HANDS_PER_POT: u32 = 100;

/// Upper bound on `rerolls_per_hand`; angle bonuses come on top.
pub const MAX_REROLLS_PER_HAND: u32 = 100;

/// Tunable run constants. Balancing values, not contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub hands_per_pot: u32,
    pub rerolls_per_hand: u32,
    pub base_pot_target: u32,
    /// Target multiplier applied once per floor climbed
    pub pot_growth_factor: f64,
    pub small_pot_mult: f64,
    pub big_pot_mult: f64,
    pub boss_pot_mult: f64,
    /// Share of the pot target paid out on a clear
    pub base_chip_fraction: f64,
    pub unused_hand_chips: u32,
    pub unused_reroll_chips: u32,
    pub interest_per_100: u32,
    pub max_interest_per_pot: u32,
    pub max_angles: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            hands_per_pot: 4,
            rerolls_per_hand: 2,
            base_pot_target: 300,
            pot_growth_factor: 1.6,
            small_pot_mult: 0.9,
            big_pot_mult: 1.1,
            boss_pot_mult: 1.4,
            base_chip_fraction: 0.025,
            unused_hand_chips: 2,
            unused_reroll_chips: 2,
            interest_per_100: 5,
            max_interest_per_pot: 25,
            max_angles: 5,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HANDS_PER_POT).contains(&self.hands_per_pot) {
            return Err(ConfigError::Invalid(format!(
                "hands_per_pot must be between 1 and {}",
                MAX_HANDS_PER_POT
            )));
        }
        if self.rerolls_per_hand > MAX_REROLLS_PER_HAND {
            return Err(ConfigError::Invalid(format!(
                "rerolls_per_hand must be <= {}",
                MAX_REROLLS_PER_HAND
            )));
        }
        if self.base_pot_target == 0 {
            return Err(ConfigError::Invalid("base_pot_target must be > 0".into()));
        }
        let mults = [
            ("pot_growth_factor", self.pot_growth_factor),
            ("small_pot_mult", self.small_pot_mult),
            ("big_pot_mult", self.big_pot_mult),
            ("boss_pot_mult", self.boss_pot_mult),
        ];
        for (name, v) in mults {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be a positive number", name)));
            }
        }
        if !self.base_chip_fraction.is_finite() || self.base_chip_fraction < 0.0 {
            return Err(ConfigError::Invalid(
                "base_chip_fraction must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

/// Everything a run persists. Owned by [`GameEngine`]; front-ends read it
/// through [`GameEngine::state`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub seed: u64,
    pub floor: u32,
    /// 1-based position inside the floor; the last one is the boss pot
    pub pot_in_floor: u32,
    pub global_pot_number: u32,
    pub chips: u32,
    pub max_angles: u32,
    /// Multiset of owned angle ids; duplicates stack
    pub owned_angles: Vec<String>,
    pub owned_edges: Vec<String>,
    pub boss_rule: Option<BossRule>,
    pub pot_state: PotState,
    pub shop_state: Option<ShopState>,
}

/// What a submission did. The only way a caller learns the pot's fate.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub result: HandResult,
    pub pot_cleared: bool,
    pub pot_failed: bool,
    pub chips_gained: u32,
}

/// A completed shop purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub kind: ItemKind,
    pub id: String,
    pub name: String,
    pub cost: u32,
}

impl fmt::Display for Purchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bought {} for {} chips.", self.name, self.cost)
    }
}

/// Drives a run: floors of three pots, heat targets, chip payouts and the
/// floor shop. Owns the run's single random stream.
///
/// # Examples
///
/// ```
/// use whale_engine::engine::{GameEngine, RunConfig};
///
/// let mut engine = GameEngine::new(42, RunConfig::default()).unwrap();
/// engine.toggle_lock(0).unwrap();
/// engine.roll();
///
/// let outcome = engine.submit_hand().unwrap();
/// assert!(outcome.result.total_heat > 0);
/// assert_eq!(engine.state().pot_state.pot_heat(), outcome.result.total_heat);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    rng: RunRng,
    config: RunConfig,
    last_outcome: Option<SubmitOutcome>,
}

impl GameEngine {
    /// Starts a new run with five plain d6 and begins the first pot.
    pub fn new(seed: u64, config: RunConfig) -> Result<Self, ConfigError> {
        let dice = (0..HAND_SIZE).map(|_| make_plain_d6()).collect();
        Self::with_dice(seed, config, dice)
    }

    /// Starts a new run with caller-supplied dice.
    pub fn with_dice(seed: u64, config: RunConfig, dice: Vec<Die>) -> Result<Self, ConfigError> {
        config.validate()?;
        if dice.len() != HAND_SIZE {
            return Err(ConfigError::Invalid(format!(
                "a run needs exactly {} dice, got {}",
                HAND_SIZE,
                dice.len()
            )));
        }

        let mut rng = RunRng::new_with_seed(seed);
        let dice_states = dice
            .into_iter()
            .map(|d| DieState::from_die(Arc::new(d), &mut rng))
            .collect();
        let pot_state = PotState::new(
            dice_states,
            RuleContext::default(),
            config.hands_per_pot,
            config.rerolls_per_hand,
            0,
        );
        let shop_state = roll_shop_for_floor(1, &mut rng);

        let state = GameState {
            seed,
            floor: 1,
            pot_in_floor: 1,
            global_pot_number: 1,
            chips: 0,
            max_angles: config.max_angles,
            owned_angles: Vec::new(),
            owned_edges: Vec::new(),
            boss_rule: None,
            pot_state,
            shop_state: Some(shop_state),
        };

        let mut engine = Self {
            state,
            rng,
            config,
            last_outcome: None,
        };
        engine.start_pot();
        Ok(engine)
    }

    pub(crate) fn from_parts(state: GameState, rng: RunRng, config: RunConfig) -> Self {
        Self {
            state,
            rng,
            config,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn rng(&self) -> &RunRng {
        &self.rng
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_boss_pot(&self) -> bool {
        self.state.pot_in_floor == POTS_PER_FLOOR
    }

    pub fn pot_status(&self) -> PotStatus {
        self.state.pot_state.status()
    }

    /// Starts the current pot from hand one.
    ///
    /// Draws a boss rule for the boss pot, sets the heat target and reroll
    /// budget, and rolls the first hand. Calling it again restarts the pot.
    pub fn start_pot(&mut self) {
        self.state.boss_rule = self.roll_boss_rule();
        let rule_ctx = self
            .state
            .boss_rule
            .map(BossRule::rule_context)
            .unwrap_or_default();
        let target = self.compute_pot_target();
        let rerolls = self
            .config
            .rerolls_per_hand
            .saturating_add(self.bonus_rerolls_from_angles());

        let ps = &mut self.state.pot_state;
        ps.configure(rule_ctx, self.config.hands_per_pot, rerolls, target);
        ps.start_first_hand(&mut self.rng);
        self.last_outcome = None;

        info!(
            floor = self.state.floor,
            pot = self.state.pot_in_floor,
            global_pot = self.state.global_pot_number,
            target,
            rerolls,
            boss_rule = self.state.boss_rule.map(BossRule::name),
            "pot started"
        );
    }

    /// Flips the hold on one die and returns the new hold state.
    pub fn toggle_lock(&mut self, die_index: usize) -> Result<bool, GameError> {
        self.state
            .pot_state
            .toggle_lock(die_index)
            .ok_or(GameError::InvalidDieIndex { index: die_index })
    }

    /// Rerolls unheld dice. `false` means nothing changed: no rerolls are
    /// left or the pot is already over.
    pub fn roll(&mut self) -> bool {
        if self.pot_status() != PotStatus::InProgress {
            return false;
        }
        self.state.pot_state.reroll_unlocked(&mut self.rng)
    }

    /// Scores the showing dice and settles the pot.
    ///
    /// A cleared pot pays chips; an exhausted hand budget fails the pot;
    /// otherwise the next hand is rolled automatically.
    pub fn submit_hand(&mut self) -> Result<SubmitOutcome, GameError> {
        if self.pot_status() != PotStatus::InProgress {
            return Err(GameError::PotOver);
        }

        let result = self.state.pot_state.submit_hand();
        debug!(
            hand = result.hand_id.as_str(),
            total_heat = result.total_heat,
            pot_heat = self.state.pot_state.pot_heat(),
            "hand submitted"
        );

        let mut chips_gained = 0;
        let status = self.pot_status();
        match status {
            PotStatus::Cleared => {
                chips_gained = self.award_chips_for_pot();
                info!(
                    pot_heat = self.state.pot_state.pot_heat(),
                    target = self.state.pot_state.pot_target(),
                    chips_gained,
                    chips = self.state.chips,
                    "pot cleared"
                );
            }
            PotStatus::Failed => {
                info!(
                    pot_heat = self.state.pot_state.pot_heat(),
                    target = self.state.pot_state.pot_target(),
                    "pot failed"
                );
            }
            PotStatus::InProgress => self.state.pot_state.start_hand(&mut self.rng),
        }

        let outcome = SubmitOutcome {
            result,
            pot_cleared: status == PotStatus::Cleared,
            pot_failed: status == PotStatus::Failed,
            chips_gained,
        };
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Moves past a cleared pot; leaving the boss pot climbs a floor and
    /// restocks the shop.
    pub fn advance_to_next_pot(&mut self) -> Result<(), GameError> {
        if self.pot_status() != PotStatus::Cleared {
            return Err(GameError::PotNotCleared);
        }

        self.state.global_pot_number = self.state.global_pot_number.saturating_add(1);
        self.state.pot_in_floor += 1;

        if self.state.pot_in_floor > POTS_PER_FLOOR {
            self.state.pot_in_floor = 1;
            self.state.floor = self.state.floor.saturating_add(1);
            self.state.shop_state = Some(roll_shop_for_floor(self.state.floor, &mut self.rng));
            info!(floor = self.state.floor, "advanced to next floor");
        }

        self.start_pot();
        Ok(())
    }

    /// The current floor's offers, empty when no shop is stocked.
    pub fn shop_items(&self) -> &[ShopItem] {
        self.state
            .shop_state
            .as_ref()
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn buy_shop_item(&mut self, index: usize) -> Result<Purchase, GameError> {
        let purchase = self.try_buy(index);
        match &purchase {
            Ok(p) => info!(item = %p.id, cost = p.cost, chips = self.state.chips, "item purchased"),
            Err(e) => warn!(index, reason = %e, "purchase rejected"),
        }
        purchase
    }

    fn try_buy(&mut self, index: usize) -> Result<Purchase, GameError> {
        let angles_owned = self.state.owned_angles.len();
        let chips = self.state.chips;
        let max_angles = self.state.max_angles;

        let shop = self.state.shop_state.as_mut().ok_or(GameError::NoShop)?;
        let item = shop.items.get_mut(index).ok_or(GameError::NoItemAtPosition)?;
        if item.purchased {
            return Err(GameError::AlreadyPurchased);
        }
        if chips < item.cost {
            return Err(GameError::InsufficientChips);
        }
        if item.is_angle() && angles_owned >= max_angles as usize {
            return Err(GameError::AngleSlotsFull);
        }

        item.purchased = true;
        let purchase = Purchase {
            kind: item.kind,
            id: item.id.clone(),
            name: item.name.clone(),
            cost: item.cost,
        };

        self.state.chips -= purchase.cost;
        match purchase.kind {
            ItemKind::Angle => self.state.owned_angles.push(purchase.id.clone()),
            ItemKind::Edge => self.state.owned_edges.push(purchase.id.clone()),
        }
        Ok(purchase)
    }

    /// `round_half_even(base * growth^(floor-1) * pot_mult)`, at least 1.
    fn compute_pot_target(&self) -> u32 {
        let floors_climbed = i32::try_from(self.state.floor.saturating_sub(1)).unwrap_or(i32::MAX);
        let base_for_floor =
            f64::from(self.config.base_pot_target) * self.config.pot_growth_factor.powi(floors_climbed);
        let pot_mult = match self.state.pot_in_floor {
            1 => self.config.small_pot_mult,
            2 => self.config.big_pot_mult,
            _ => self.config.boss_pot_mult,
        };
        round_half_even(base_for_floor * pot_mult).max(1)
    }

    fn roll_boss_rule(&mut self) -> Option<BossRule> {
        if !self.is_boss_pot() {
            return None;
        }
        let i = self.rng.index(BossRule::ALL.len());
        Some(BossRule::ALL[i])
    }

    fn bonus_rerolls_from_angles(&self) -> u32 {
        self.state
            .owned_angles
            .iter()
            .filter(|id| id.as_str() == ROOKIE)
            .count() as u32
    }

    /// Pays out for a cleared pot and returns the amount. Saturates at
    /// `u32::MAX` instead of overflowing.
    fn award_chips_for_pot(&mut self) -> u32 {
        let ps = &self.state.pot_state;
        let cfg = &self.config;

        // float-to-int casts saturate
        let base = (f64::from(ps.pot_target()) * cfg.base_chip_fraction).floor() as u32;
        let hands_bonus = cfg.unused_hand_chips.saturating_mul(ps.hands_remaining());
        let reroll_bonus = cfg.unused_reroll_chips.saturating_mul(ps.rerolls_left());
        let interest = cfg
            .max_interest_per_pot
            .min((self.state.chips / 100).saturating_mul(cfg.interest_per_100));

        let gained = base
            .saturating_add(hands_bonus)
            .saturating_add(reroll_bonus)
            .saturating_add(interest);
        self.state.chips = self.state.chips.saturating_add(gained);
        gained
    }
}
