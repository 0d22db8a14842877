//! Process launcher.
//!
//! Turns a finalized, glob-expanded invocation into a child process with its
//! standard input and output remapped per the redirection directives. Stderr
//! is never redirected; it always passes through to the shell's own stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};

use failure::Fail;
use nix::sys::signal::{self, SigHandler, Signal};

use crate::errors::{Error, ErrorKind, Result};
use crate::parse::Invocation;

/// Spawns the external program named by `invocation.argv[0]`, searching
/// `$PATH` for unqualified names.
///
/// Redirection files are opened in the parent before the process is created:
/// an open failure is reported and nothing spawns, the parent-side equivalent
/// of the classic open-in-the-child-then-exit-nonzero sequence. The child
/// resets `SIGINT` to its default disposition before the program image is
/// replaced, so a foreground child is interruptible independently of the
/// shell's own handling.
///
/// The caller decides what to do with the returned `Child`: wait on it for a
/// foreground invocation, or register its pid as a background job.
pub fn spawn_process(invocation: &Invocation) -> Result<Child> {
    assert!(!invocation.argv.is_empty());

    let program = &invocation.argv[0];
    let mut command = Command::new(program);
    command.args(&invocation.argv[1..]);

    if let Some(ref infile) = invocation.infile {
        let file = File::open(infile).map_err(|e| io_error(e))?;
        command.stdin(Stdio::from(file));
    }

    if let Some(ref outfile) = invocation.outfile {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        if invocation.append {
            options.append(true);
        } else {
            options.truncate(true);
        }
        let file = options.open(outfile).map_err(|e| io_error(e))?;
        command.stdout(Stdio::from(file));
    }

    // allowed: resetting signal dispositions between fork and exec
    unsafe {
        command.pre_exec(reset_interrupt_disposition);
    }

    let child = command.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::command_not_found(program)
        } else {
            io_error(e)
        }
    })?;
    debug!("spawned {} as pid {}", program, child.id());

    Ok(child)
}

fn reset_interrupt_disposition() -> io::Result<()> {
    unsafe { signal::signal(Signal::SIGINT, SigHandler::SigDfl) }
        .map(|_| ())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn io_error(e: io::Error) -> Error {
    e.context(ErrorKind::Io).into()
}
