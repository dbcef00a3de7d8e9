// Sat Jan 17 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, BitsArgs, Command, FindArgs, ModuleArgs, PeekArgs, ScalarType};
pub use handler::CommandHandler;

use crate::config::Config;
use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(level) = args.log_level {
        config = config.with_log_level(level);
    }
    config.validate()?;

    if args.no_color || !config.color {
        colored::control::set_override(false);
    }

    let handler = CommandHandler::new(config);
    handler.setup_logging();
    handler.execute(args.command)
}
