//! Ccsh builtins
//!
//! This module includes the implementations of common shell builtin commands.
//! Where possible the commands conform to their standard Bash counterparts.

use std::io::Write;

use crate::errors::{ErrorKind, Result};
use crate::shell::Shell;

use self::alias::{Alias, Unalias};
use self::dirs::{Cd, Pwd};
use self::exit::Exit;
use self::grep::Grep;
use self::help::Help;
use self::jobs::{Fg, Jobs};
use self::path::{Path, Which};
use self::source::Source;

mod alias;
mod dirs;
mod exit;
mod grep;
mod help;
mod jobs;
mod path;
mod source;

pub const ALIAS_NAME: &str = "alias";
pub const CD_NAME: &str = "cd";
pub const EXIT_NAME: &str = "exit";
pub const FG_NAME: &str = "fg";
pub const GREP_NAME: &str = "grep";
pub const HELP_NAME: &str = "help";
pub const JOBS_NAME: &str = "jobs";
pub const PATH_NAME: &str = "path";
pub const PWD_NAME: &str = "pwd";
pub const SOURCE_NAME: &str = "source";
pub const UNALIAS_NAME: &str = "unalias";
pub const WHICH_NAME: &str = "which";

pub(crate) mod prelude {
    pub use std::io::Write;

    pub use failure::ResultExt;

    pub use super::BuiltinCommand;
    pub use crate::errors::{Error, ErrorKind, Result};
    pub use crate::shell::Shell;
}

/// Represents a ccsh builtin command such as cd or help.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// The help string to display to the user.
    const HELP: &'static str;
    /// The usage string to display to the user.
    fn usage() -> String {
        Self::HELP.lines().nth(0).unwrap().to_owned()
    }
    /// Runs the command with the given arguments in the `shell` environment.
    fn run(shell: &mut Shell, args: Vec<String>, stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin<T: AsRef<str>>(argv: &[T]) -> bool {
    [
        Alias::NAME,
        Cd::NAME,
        Exit::NAME,
        Fg::NAME,
        Grep::NAME,
        Help::NAME,
        Jobs::NAME,
        Path::NAME,
        Pwd::NAME,
        Source::NAME,
        Unalias::NAME,
        Which::NAME,
    ]
    .contains(&(program(argv).as_str()))
}

/// precondition: command is a builtin.
/// Returns (`exit_status_code`, `builtin_result`)
pub fn run<T: AsRef<str>>(
    shell: &mut Shell,
    argv: &[T],
    stdout: &mut dyn Write,
) -> (i32, Result<()>) {
    assert!(is_builtin(argv));
    let result = match &*program(argv) {
        ALIAS_NAME => Alias::run(shell, args(argv), stdout),
        CD_NAME => Cd::run(shell, args(argv), stdout),
        EXIT_NAME => Exit::run(shell, args(argv), stdout),
        FG_NAME => Fg::run(shell, args(argv), stdout),
        GREP_NAME => Grep::run(shell, args(argv), stdout),
        HELP_NAME => Help::run(shell, args(argv), stdout),
        JOBS_NAME => Jobs::run(shell, args(argv), stdout),
        PATH_NAME => Path::run(shell, args(argv), stdout),
        PWD_NAME => Pwd::run(shell, args(argv), stdout),
        SOURCE_NAME => Source::run(shell, args(argv), stdout),
        UNALIAS_NAME => Unalias::run(shell, args(argv), stdout),
        WHICH_NAME => Which::run(shell, args(argv), stdout),
        _ => unreachable!(),
    };

    let exit_status = get_builtin_exit_status(&result);
    (exit_status, result)
}

fn get_builtin_exit_status(result: &Result<()>) -> i32 {
    if let Err(ref e) = *result {
        match *e.kind() {
            ErrorKind::BuiltinCommand { code, .. } => code,
            _ => 1,
        }
    } else {
        0
    }
}

fn program<T: AsRef<str>>(argv: &[T]) -> String {
    argv[0].as_ref().to_string()
}

fn args<T: AsRef<str>>(argv: &[T]) -> Vec<String> {
    argv[1..].iter().map(|s| s.as_ref().to_string()).collect()
}
