//! Command handlers, one module per subcommand.
//!
//! Each module exposes `handle_COMMAND_command(...) -> Result<(), CliError>`
//! taking its output streams as `&mut dyn Write` so tests can capture them.

pub mod cfg;
pub mod play;
pub mod rng;
pub mod score;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use score::handle_score_command;
