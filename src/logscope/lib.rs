//! # Logscope Architecture
//!
//! Logscope inspects logs recorded from interactive instrument-control
//! sessions: one JSON record per executed command. It is a library with a CLI
//! client, not the other way around; everything from `api.rs` inward is plain
//! Rust in, plain Rust out.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, runs the browse loop   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: store, view state, form, settings      │
//! │  - Every change returns freshly computed rows               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - view, detail and options pipelines                       │
//! │  - Built from the engines: query, sort, highlight, form     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - EntrySource trait                                        │
//! │  - JsonlFile (production), InMemorySource (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! Records are normalized once at load. From there every refresh is a pure
//! pipeline over borrowed entries:
//!
//! ```text
//! store -> visible (query, issues-only, time window) -> sort -> rows (styled)
//! ```
//!
//! No stage mutates the store, so any state change is handled by recomputing
//! the rows from scratch.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade
//! - [`commands`]: View, detail and options pipelines; `CmdResult`
//! - [`store`]: Log sources, parsing and load-time normalization
//! - [`model`]: `LogEntry` and its loosely typed values
//! - [`query`]: Text and issue filters
//! - [`window`]: Time-window restriction
//! - [`sort`]: Columns and the header-click sort state
//! - [`highlight`]: Row styles
//! - [`row`]: Display rows and detail views
//! - [`form`]: The declarative options form engine
//! - [`config`]: Configuration file
//! - [`error`]: Error types
//! - `cli`: Argument parsing, rendering and the browse loop for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod highlight;
pub mod model;
pub mod query;
pub mod row;
pub mod sort;
pub mod store;
pub mod window;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
