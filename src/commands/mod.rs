//! Command handlers
//!
//! Entry points behind the `smooth-scroll` binary's subcommands.

pub mod run;
pub mod settings;
