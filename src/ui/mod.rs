//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All status, debug and warning output goes through this module so that
//! `--quiet` and `--debug` are honored consistently.

pub mod output;
