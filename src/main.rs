//! # Command Line Interface
//!
//! The argument definitions are in `cli.rs`.
//! Subcommands are run by the `commands` module.

use env_logger;
use log::error;
use picturedsk::commands;
use picturedsk::commands::CommandError;

mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let main_cmd = cli::build_cli();
    let matches = main_cmd.clone().get_matches();

    // Create a picture disk
    if let Some(cmd) = matches.subcommand_matches("mkpic") {
        return commands::mkpic::mkpic(cmd);
    }

    // Shell completions
    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(main_cmd,cmd);
    }

    error!("No subcommand was found, try `picturedsk --help`");
    return Err(Box::new(CommandError::InvalidCommand));
}
