//! # whale-engine: Dice Run Engine Core
//!
//! A deterministic dice-hand scoring engine. Five dice are rolled, held and
//! rerolled, then scored as poker-style hands; heat accumulates toward a pot
//! target, three pots make a floor, and cleared pots pay chips that buy run
//! modifiers in the floor shop.
//!
//! ## Core Modules
//!
//! - [`dice`] - Face, Die and DieState, plus the rule-aware value reads
//! - [`rules`] - RuleContext flags and the boss rule catalog
//! - [`hands`] - Hand catalog (ids, families, base heat and mult)
//! - [`scoring`] - The five-dice hand classifier and score formula
//! - [`pot`] - The hand loop of a single pot
//! - [`engine`] - Floor and pot progression, chip payouts, shop purchases
//! - [`shop`] - Angle and edge catalogs, per-floor shop rolling
//! - [`rng`] - The run's single serializable random stream
//! - [`save`] - Persisted run schema, encode/decode, save file helpers
//! - [`logger`] - JSONL hand history
//! - [`errors`] - Error types for player actions, saves and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use whale_engine::dice::{Face, Suit};
//! use whale_engine::hands::HandId;
//! use whale_engine::rules::RuleContext;
//! use whale_engine::scoring::classify;
//!
//! let faces = vec![Face::new(6, Some(Suit::Heart)); 5];
//! let result = classify(&faces, &RuleContext::default());
//!
//! assert_eq!(result.hand_id, HandId::FiveOfAKind);
//! // (5 * 6 + 120) * 12.0
//! assert_eq!(result.total_heat, 1800);
//! ```
//!
//! ## Deterministic Runs
//!
//! All randomness flows through one seeded stream whose cursor is saved
//! with the run:
//!
//! ```rust
//! use whale_engine::engine::{GameEngine, RunConfig};
//! use whale_engine::save;
//!
//! let mut a = GameEngine::new(7, RunConfig::default()).unwrap();
//! let json = save::to_json(&a).unwrap();
//! let mut b = save::from_json(&json, RunConfig::default()).unwrap();
//!
//! a.roll();
//! b.roll();
//! assert_eq!(a.state().pot_state.current_faces(), b.state().pot_state.current_faces());
//! ```

pub mod dice;
pub mod engine;
pub mod errors;
pub mod hands;
pub mod logger;
pub mod pot;
pub mod rng;
pub mod rules;
pub mod save;
pub mod scoring;
pub mod shop;
