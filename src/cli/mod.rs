//! Command-line interface: argument definitions and per-command front-ends.
//!
//! Every input has a flag; inputs omitted on the command line are prompted
//! for on stdin, so the tools work both scripted and double-clicked.

mod args;

pub mod convert;
pub mod pack;
pub mod prompt;
pub mod recolor;

pub use args::{Cli, Commands};
