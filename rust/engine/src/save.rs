//! Persisted run schema and the encode/decode pair that maps it onto a live
//! [`GameEngine`].
//!
//! Decoding is strict: a missing field, a type mismatch or a value that
//! breaks an engine invariant yields [`SaveError::Corrupt`] and no engine.
//! The RNG cursor is carried through untouched so a resumed run rolls
//! exactly what the uninterrupted run would have.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{Die, DieState};
use crate::engine::{
    GameEngine, GameState, RunConfig, MAX_HANDS_PER_POT, MAX_REROLLS_PER_HAND, POTS_PER_FLOOR,
};
use crate::errors::SaveError;
use crate::pot::PotState;
use crate::rng::{RngState, RunRng};
use crate::rules::{BossRule, RuleContext};
use crate::scoring::HAND_SIZE;
use crate::shop::ShopState;

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub seed: u64,
    pub floor: u32,
    pub pot_in_floor: u32,
    pub global_pot_number: u32,
    pub chips: u32,
    pub max_angles: u32,
    pub owned_angles: Vec<String>,
    pub owned_edges: Vec<String>,
    pub boss_rule: Option<BossRuleRecord>,
    pub shop: Option<ShopState>,
    pub pot_state: PotRecord,
    pub rng_state: RngState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossRuleRecord {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotRecord {
    pub dice_states: Vec<DieStateRecord>,
    pub hands_per_pot: u32,
    pub base_rerolls: u32,
    pub pot_target: u32,
    pub current_hand_index: u32,
    pub rerolls_left: u32,
    pub pot_heat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieStateRecord {
    pub die: Die,
    pub current_index: usize,
    pub locked: bool,
}

pub fn encode(engine: &GameEngine) -> SaveFile {
    let s = engine.state();
    SaveFile {
        version: SAVE_VERSION,
        seed: s.seed,
        floor: s.floor,
        pot_in_floor: s.pot_in_floor,
        global_pot_number: s.global_pot_number,
        chips: s.chips,
        max_angles: s.max_angles,
        owned_angles: s.owned_angles.clone(),
        owned_edges: s.owned_edges.clone(),
        boss_rule: s.boss_rule.map(|r| BossRuleRecord {
            name: r.name().to_string(),
            description: r.description().to_string(),
        }),
        shop: s.shop_state.clone(),
        pot_state: encode_pot(&s.pot_state),
        rng_state: engine.rng().state(),
    }
}

fn encode_pot(ps: &PotState) -> PotRecord {
    PotRecord {
        dice_states: ps
            .dice_states()
            .iter()
            .map(|ds| DieStateRecord {
                die: Die::clone(ds.die()),
                current_index: ds.current_index(),
                locked: ds.is_locked(),
            })
            .collect(),
        hands_per_pot: ps.hands_per_pot(),
        base_rerolls: ps.base_rerolls(),
        pot_target: ps.pot_target(),
        current_hand_index: ps.current_hand_index(),
        rerolls_left: ps.rerolls_left(),
        pot_heat: ps.pot_heat(),
    }
}

/// Rebuilds an engine. Future pots use `config`; the pot in progress keeps
/// its persisted budgets and target.
pub fn decode(save: SaveFile, config: RunConfig) -> Result<GameEngine, SaveError> {
    if save.version != SAVE_VERSION {
        return corrupt(format!("unsupported save version {}", save.version));
    }
    config
        .validate()
        .map_err(|e| SaveError::Corrupt(e.to_string()))?;
    if save.floor == 0 {
        return corrupt("floor must be >= 1".into());
    }
    if !(1..=POTS_PER_FLOOR).contains(&save.pot_in_floor) {
        return corrupt(format!("pot_in_floor {} out of range", save.pot_in_floor));
    }

    let boss_rule = match save.boss_rule {
        Some(rec) => Some(
            BossRule::from_name(&rec.name)
                .ok_or_else(|| SaveError::Corrupt(format!("unknown boss rule '{}'", rec.name)))?,
        ),
        None => None,
    };
    if boss_rule.is_some() != (save.pot_in_floor == POTS_PER_FLOOR) {
        return corrupt("boss rule present on a non-boss pot or missing on a boss pot".into());
    }
    let rule_ctx = boss_rule.map(BossRule::rule_context).unwrap_or_default();

    if let Some(shop) = &save.shop {
        if shop.floor != save.floor {
            return corrupt(format!(
                "shop stocked for floor {} on floor {}",
                shop.floor, save.floor
            ));
        }
    }

    // each owned angle may add a reroll on top of the configured budget
    let angle_count = u32::try_from(save.owned_angles.len()).unwrap_or(u32::MAX);
    let reroll_cap = MAX_REROLLS_PER_HAND.saturating_add(angle_count);
    let pot_state = decode_pot(save.pot_state, rule_ctx, reroll_cap)?;

    let state = GameState {
        seed: save.seed,
        floor: save.floor,
        pot_in_floor: save.pot_in_floor,
        global_pot_number: save.global_pot_number,
        chips: save.chips,
        max_angles: save.max_angles,
        owned_angles: save.owned_angles,
        owned_edges: save.owned_edges,
        boss_rule,
        pot_state,
        shop_state: save.shop,
    };
    let rng = RunRng::from_state(&save.rng_state);
    Ok(GameEngine::from_parts(state, rng, config))
}

fn decode_pot(
    rec: PotRecord,
    rule_ctx: RuleContext,
    reroll_cap: u32,
) -> Result<PotState, SaveError> {
    if rec.dice_states.len() != HAND_SIZE {
        return corrupt(format!(
            "expected {} dice, found {}",
            HAND_SIZE,
            rec.dice_states.len()
        ));
    }
    if !(1..=MAX_HANDS_PER_POT).contains(&rec.hands_per_pot) {
        return corrupt(format!("hands_per_pot {} out of range", rec.hands_per_pot));
    }
    if rec.base_rerolls > reroll_cap {
        return corrupt(format!("base_rerolls {} out of range", rec.base_rerolls));
    }
    if rec.current_hand_index > rec.hands_per_pot {
        return corrupt("current_hand_index exceeds hands_per_pot".into());
    }
    if rec.rerolls_left > rec.base_rerolls {
        return corrupt("rerolls_left exceeds base_rerolls".into());
    }

    let mut dice_states = Vec::with_capacity(HAND_SIZE);
    for (i, ds) in rec.dice_states.into_iter().enumerate() {
        if ds.die.sides() == 0 {
            return corrupt(format!("die {} has no faces", i));
        }
        let restored = DieState::restore(Arc::new(ds.die), ds.current_index, ds.locked)
            .ok_or_else(|| SaveError::Corrupt(format!("die {} shows a face it does not have", i)))?;
        dice_states.push(restored);
    }

    let mut ps = PotState::new(
        dice_states,
        rule_ctx,
        rec.hands_per_pot,
        rec.base_rerolls,
        rec.pot_target,
    );
    ps.current_hand_index = rec.current_hand_index;
    ps.rerolls_left = rec.rerolls_left;
    ps.pot_heat = rec.pot_heat;
    Ok(ps)
}

fn corrupt<T>(msg: String) -> Result<T, SaveError> {
    Err(SaveError::Corrupt(msg))
}

pub fn to_json(engine: &GameEngine) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&encode(engine))?)
}

pub fn from_json(s: &str, config: RunConfig) -> Result<GameEngine, SaveError> {
    let save: SaveFile = serde_json::from_str(s)?;
    decode(save, config)
}

/// Writes the run to `path` through a sibling temp file and a rename.
pub fn save_run<P: AsRef<Path>>(path: P, engine: &GameEngine) -> Result<(), SaveError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, to_json(engine)?)?;
    fs::rename(&temp_path, path)?;
    debug!(path = %path.display(), "run saved");
    Ok(())
}

/// Loads a run, or `Ok(None)` when there is no save at `path`.
pub fn load_run<P: AsRef<Path>>(path: P, config: RunConfig) -> Result<Option<GameEngine>, SaveError> {
    if !path.as_ref().exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(path)?;
    from_json(&s, config).map(Some)
}

pub fn has_save<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

pub fn clear_save<P: AsRef<Path>>(path: P) -> Result<(), SaveError> {
    if path.as_ref().exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
