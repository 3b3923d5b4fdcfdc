//! Command line harness over the secure session crypto crate.

pub mod actions;
pub mod commands;
pub mod config;
pub mod error;

pub use commands::ssession_main;
