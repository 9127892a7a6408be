//! `chsrate` command-line front end
//!
//! Reads society records as JSON, renders reports and certificates with
//! `society-pdf` and prints compliance and portfolio views as JSON.

pub mod cli;
pub mod run;

pub use cli::{Cli, Command, OutputArgs};
pub use run::run;
