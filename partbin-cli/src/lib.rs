//! Command-line front end for the partbin inventory.
//!
//! The binary in `main.rs` only parses arguments and sets up logging; the
//! modules here are public so the pieces can be tested on their own.

pub mod cli;
pub mod commands;
pub mod display;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod messages;
