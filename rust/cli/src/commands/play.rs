//! # Play Command
//!
//! Terminal front-end for a run. Reads one command per line, forwards it to
//! the engine and prints the resulting dice, pot status and messages.
//!
//! - `l N` / `lock N`: hold or release die N
//! - `r` / `roll`: reroll unheld dice
//! - `s` / `submit`: score the hand
//! - `shop`, `buy N`: browse and buy from the floor shop
//! - `next`: move on after a cleared pot
//! - `save`: save the run and leave
//! - `q` / `quit`: leave without saving
//!
//! EOF on the input ends the session like `quit`.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::info;
use whale_engine::engine::{GameEngine, SubmitOutcome};
use whale_engine::errors::GameError;
use whale_engine::logger::HandLogger;
use whale_engine::pot::PotStatus;
use whale_engine::save;

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_dice, format_result, format_shop, format_status};
use crate::io_utils::{ensure_parent_dir, read_stdin_line};
use crate::ui;
use crate::validation::{ParseResult, PlayCommand, parse_play_command};

const PROMPT: &str = "Command (l N, r, s, shop, buy N, next, save, help, q): ";

const HELP: &str = "\
Commands:
  l N | lock N   hold or release die N
  r | roll       reroll every die that is not held
  s | submit     score the showing dice
  shop           list the floor shop
  buy N          buy shop item N
  next           move to the next pot after clearing this one
  save           save the run and leave
  q | quit       leave without saving";

/// Whether the loop keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Handle the play command: an interactive run.
///
/// # Arguments
///
/// * `seed` - Run seed; falls back to the configured seed, then a random one
/// * `resume` - Continue the run stored at the configured save path
/// * `out` - Output stream for the game display
/// * `err` - Error stream for rejections and warnings
/// * `stdin` - Input stream for commands
///
/// # Returns
///
/// * `Ok(())` when the session ends (quit, save, EOF or a busted run)
/// * `Err(CliError)` for bad configuration, a missing or corrupt save, or I/O failures
pub fn handle_play_command(
    seed: Option<u64>,
    resume: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;

    let mut engine = if resume {
        if seed.is_some() {
            ui::display_warning(err, "--seed is ignored when resuming a saved run.")?;
        }
        match save::load_run(&cfg.save_path, cfg.run.clone())? {
            Some(engine) => {
                writeln!(out, "Resumed run from {}", cfg.save_path)?;
                engine
            }
            None => {
                return Err(CliError::InvalidInput(format!(
                    "No saved run at {}",
                    cfg.save_path
                )));
            }
        }
    } else {
        let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
        GameEngine::new(seed, cfg.run.clone())?
    };

    let mut logger = match &cfg.history_path {
        Some(path) => {
            ensure_parent_dir(Path::new(path)).map_err(CliError::Config)?;
            Some(HandLogger::append(path)?)
        }
        None => None,
    };

    info!(seed = engine.state().seed, resume, "play session started");
    writeln!(out, "play: seed={}", engine.state().seed)?;
    show_table(&engine, out)?;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        if line.is_empty() {
            continue;
        }

        let flow = match parse_play_command(&line) {
            ParseResult::Command(cmd) => {
                execute(cmd, &mut engine, logger.as_mut(), &cfg.save_path, out, err)?
            }
            ParseResult::Quit => Flow::Stop,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                Flow::Continue
            }
        };
        if flow == Flow::Stop {
            break;
        }
    }

    let s = engine.state();
    writeln!(
        out,
        "Run ended: floor {}, pot {}, {} chips.",
        s.floor, s.global_pot_number, s.chips
    )?;
    Ok(())
}

fn execute(
    cmd: PlayCommand,
    engine: &mut GameEngine,
    logger: Option<&mut HandLogger>,
    save_path: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Flow, CliError> {
    match cmd {
        PlayCommand::Lock(i) => match engine.toggle_lock(i) {
            Ok(_) => {
                write!(out, "{}", format_dice(engine.state().pot_state.dice_states()))?;
            }
            // positions are shown 1-based
            Err(GameError::InvalidDieIndex { .. }) => {
                ui::write_error(err, &format!("No die at position {}.", i + 1))?
            }
            Err(e) => ui::write_error(err, &e.to_string())?,
        },
        PlayCommand::Roll => {
            if engine.pot_status() != PotStatus::InProgress {
                ui::write_error(err, "The pot is over.")?;
            } else if engine.roll() {
                show_table(engine, out)?;
            } else {
                ui::write_error(err, "No rerolls left this hand.")?;
            }
        }
        PlayCommand::Submit => match engine.submit_hand() {
            Ok(outcome) => {
                if let Some(logger) = logger {
                    logger.record(engine, &outcome)?;
                }
                return report_submission(engine, &outcome, out);
            }
            Err(e) => ui::write_error(err, &e.to_string())?,
        },
        PlayCommand::Shop => {
            let s = engine.state();
            let floor = s.shop_state.as_ref().map_or(s.floor, |shop| shop.floor);
            writeln!(out, "Shop (floor {}) - you have {} chips", floor, s.chips)?;
            writeln!(out, "{}", format_shop(engine.shop_items()))?;
        }
        PlayCommand::Buy(i) => match engine.buy_shop_item(i) {
            Ok(purchase) => ui::write_message(out, &purchase.to_string())?,
            Err(e) => ui::write_error(err, &e.to_string())?,
        },
        PlayCommand::Next => match engine.advance_to_next_pot() {
            Ok(()) => show_table(engine, out)?,
            Err(e) => ui::write_error(err, &e.to_string())?,
        },
        PlayCommand::Save => {
            save::save_run(save_path, engine)?;
            writeln!(out, "Run saved to {}. Continue with `whale play --resume`.", save_path)?;
            return Ok(Flow::Stop);
        }
        PlayCommand::Help => writeln!(out, "{}", HELP)?,
    }
    Ok(Flow::Continue)
}

fn report_submission(
    engine: &GameEngine,
    outcome: &SubmitOutcome,
    out: &mut dyn Write,
) -> Result<Flow, CliError> {
    writeln!(out, "{}", format_result(&outcome.result))?;
    let ps = &engine.state().pot_state;
    if outcome.pot_cleared {
        writeln!(
            out,
            "Pot cleared! {}/{} Heat. +{} chips ({} total).",
            ps.pot_heat(),
            ps.pot_target(),
            outcome.chips_gained,
            engine.state().chips
        )?;
        writeln!(out, "Type 'shop' to browse or 'next' for the next pot.")?;
        Ok(Flow::Continue)
    } else if outcome.pot_failed {
        writeln!(
            out,
            "Busted! {}/{} Heat with no hands left.",
            ps.pot_heat(),
            ps.pot_target()
        )?;
        Ok(Flow::Stop)
    } else {
        show_table(engine, out)?;
        Ok(Flow::Continue)
    }
}

fn show_table(engine: &GameEngine, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", format_status(engine))?;
    write!(out, "{}", format_dice(engine.state().pot_state.dice_states()))?;
    Ok(())
}
