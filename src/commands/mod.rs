//! # CLI Subcommands
//! 
//! Contains modules that run the subcommands.

pub mod mkpic;
pub mod completions;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("Input source is not supported")]
    UnsupportedFormat,
    #[error("File not found")]
    FileNotFound,
    #[error("File already exists")]
    FileExists
}
