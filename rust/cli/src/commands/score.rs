//! `score`: classify five faces from the command line without starting a run.

use std::io::Write;

use whale_engine::dice::Face;
use whale_engine::rules::RuleContext;
use whale_engine::scoring::{HAND_SIZE, classify};

use crate::cli::RuleArg;
use crate::error::CliError;
use crate::formatters::{format_faces, format_result};
use crate::validation::parse_face;

/// Parses the face tokens, scores them under the optional boss rule and
/// prints the hand name and heat equation.
pub fn handle_score_command(
    tokens: &[String],
    rule: Option<RuleArg>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if tokens.len() != HAND_SIZE {
        return Err(CliError::InvalidInput(format!(
            "expected {} faces, got {}",
            HAND_SIZE,
            tokens.len()
        )));
    }

    let faces = tokens
        .iter()
        .map(|t| parse_face(t))
        .collect::<Result<Vec<Face>, String>>()
        .map_err(CliError::InvalidInput)?;

    let ctx = rule
        .map(|r| r.boss_rule().rule_context())
        .unwrap_or_else(RuleContext::default);

    let result = classify(&faces, &ctx);
    writeln!(out, "Faces: {}", format_faces(&faces))?;
    if let Some(r) = rule {
        let boss = r.boss_rule();
        writeln!(out, "Rule: {} - {}", boss.name(), boss.description())?;
    }
    writeln!(out, "{}", format_result(&result))?;
    Ok(())
}
