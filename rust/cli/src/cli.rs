//! Command-line argument definitions.
//!
//! Parsed with clap's derive API; [`crate::run`] dispatches on [`Commands`].

use clap::{Parser, Subcommand, ValueEnum};
use whale_engine::rules::BossRule;

#[derive(Parser, Debug)]
#[command(name = "whale", version, about = "Dice run engine command-line front-end")]
pub struct WhaleCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a run in the terminal
    Play {
        /// Seed for the run (default: config, then random)
        #[arg(long)]
        seed: Option<u64>,
        /// Continue the saved run instead of starting a new one
        #[arg(long)]
        resume: bool,
    },
    /// Score five faces, e.g. `whale score 6S 6H 6D 6C 6S`
    Score {
        /// Face tokens: VALUE[SUIT][:flag,...]
        #[arg(required = true, num_args = 5)]
        faces: Vec<String>,
        /// Apply a boss rule while scoring
        #[arg(long, value_enum)]
        rule: Option<RuleArg>,
    },
    /// Print a sample of the run RNG stream
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Boss rules selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    ShortDeck,
    LowCeiling,
    CompedRuin,
}

impl RuleArg {
    pub fn boss_rule(self) -> BossRule {
        match self {
            RuleArg::ShortDeck => BossRule::ShortDeck,
            RuleArg::LowCeiling => BossRule::LowCeiling,
            RuleArg::CompedRuin => BossRule::CompedRuin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_flags_parse() {
        let cli = WhaleCli::try_parse_from(["whale", "play", "--seed", "9", "--resume"]).unwrap();
        match cli.cmd {
            Commands::Play { seed, resume } => {
                assert_eq!(seed, Some(9));
                assert!(resume);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn score_requires_five_faces() {
        assert!(WhaleCli::try_parse_from(["whale", "score", "1", "2", "3", "4"]).is_err());
        let cli =
            WhaleCli::try_parse_from(["whale", "score", "1", "2", "3", "4", "5", "--rule", "short-deck"])
                .unwrap();
        match cli.cmd {
            Commands::Score { faces, rule } => {
                assert_eq!(faces.len(), 5);
                assert_eq!(rule, Some(RuleArg::ShortDeck));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rule_args_map_to_boss_rules() {
        assert_eq!(RuleArg::LowCeiling.boss_rule(), BossRule::LowCeiling);
        assert_eq!(RuleArg::CompedRuin.boss_rule(), BossRule::CompedRuin);
    }
}
