//! # CLI Layer
//!
//! One possible client of the inspector library. This is the only place that
//! parses arguments, writes to the terminal, reads stdin or picks exit codes.
//!
//! - `setup`: clap definitions
//! - `commands`: context setup, logging and per-command handlers
//! - `render`: tables, details, forms and messages as text
//! - `browse`: the line-oriented interactive session

mod browse;
mod commands;
mod render;
mod setup;

pub use commands::run;
