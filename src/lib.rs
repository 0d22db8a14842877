//! Ccsh - a small interactive shell
//!
//! The shell reads one line at a time, expands aliases and glob patterns,
//! handles a fixed set of builtins and hands everything else to the process
//! launcher, optionally tracking the spawned process as a background job.

#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces
)]

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod alias;
mod builtins;
mod editor;
pub mod errors;
pub mod execute_command;
pub mod expansion;
pub mod jobs;
pub mod parse;
mod shell;
mod util;

pub use crate::shell::{Shell, ShellConfig};
pub use crate::util::CcshExitStatusExt;
