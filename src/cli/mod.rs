//! Command line front end.
//!
//! `args` holds the clap flags, `errors` the failures that only the command
//! line can produce, and `runner` wires them to surface detection and
//! profile rendering from `pinnacle::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
