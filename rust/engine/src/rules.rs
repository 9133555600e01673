use serde::{Deserialize, Serialize};

/// Pot-wide modifier flags that change how faces are read.
///
/// Selected once when a pot begins and held fixed for its duration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RuleContext {
    /// Values above 4 count as 4
    pub short_deck: bool,
    /// Values above 10 count as 10 and nothing counts as royal
    pub low_ceiling: bool,
    /// Tagged faces lose their tags and sum to zero
    pub comped_ruin: bool,
}

/// House rule drawn for the boss pot of each floor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BossRule {
    ShortDeck,
    LowCeiling,
    CompedRuin,
}

impl BossRule {
    pub const ALL: [BossRule; 3] = [BossRule::ShortDeck, BossRule::LowCeiling, BossRule::CompedRuin];

    pub fn name(self) -> &'static str {
        match self {
            BossRule::ShortDeck => "Short Deck",
            BossRule::LowCeiling => "Low Ceiling",
            BossRule::CompedRuin => "Comped Ruin",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BossRule::ShortDeck => "Values above 4 count as 4.",
            BossRule::LowCeiling => "Values above 10 count as 10.",
            BossRule::CompedRuin => "Tagged faces score nothing and lose their tags.",
        }
    }

    /// The single flag this rule switches on.
    pub fn rule_context(self) -> RuleContext {
        let mut ctx = RuleContext::default();
        match self {
            BossRule::ShortDeck => ctx.short_deck = true,
            BossRule::LowCeiling => ctx.low_ceiling = true,
            BossRule::CompedRuin => ctx.comped_ruin = true,
        }
        ctx
    }

    pub fn from_name(name: &str) -> Option<BossRule> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}
