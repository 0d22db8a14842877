//! Error module. See the [failure](https://crates.io/crates/failure) crate for details.

use std::fmt;
use std::result;

use failure::{Backtrace, Context, Fail};

/// Convenient wrapper around `std::result::Result`.
pub type Result<T> = result::Result<T, Error>;

/// The error type for ccsh operations.
#[derive(Debug)]
pub struct Error {
    ctx: Context<ErrorKind>,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        self.ctx.get_context()
    }

    pub(crate) fn builtin_command<T: AsRef<str>>(message: T, code: i32) -> Error {
        Error::from(ErrorKind::BuiltinCommand {
            message: message.as_ref().to_string(),
            code,
        })
    }

    pub(crate) fn command_not_found<T: AsRef<str>>(command: T) -> Error {
        Error::from(ErrorKind::CommandNotFound(command.as_ref().to_string()))
    }

    pub(crate) fn no_such_job<T: AsRef<str>>(job: T) -> Error {
        Error::from(ErrorKind::NoSuchJob(job.as_ref().to_string()))
    }

    pub(crate) fn no_such_alias<T: AsRef<str>>(name: T) -> Error {
        Error::from(ErrorKind::NoSuchAlias(name.as_ref().to_string()))
    }

    pub(crate) fn capacity_exceeded<T: AsRef<str>>(what: T, limit: usize) -> Error {
        Error::from(ErrorKind::CapacityExceeded {
            what: what.as_ref().to_string(),
            limit,
        })
    }

    /// Formats the error followed by its underlying causes, so OS-call
    /// failures surface the system error text to the user.
    pub fn display_chain(&self) -> String {
        use std::fmt::Write;

        let mut buffer = self.to_string();
        for cause in <dyn Fail>::iter_causes(self) {
            let _ = write!(buffer, ": {}", cause);
        }
        buffer
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.ctx.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.ctx.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ctx.fmt(f)
    }
}

/// The specific kind of an `Error`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A builtin rejected its arguments or failed; carries its exit code.
    BuiltinCommand { message: String, code: i32 },
    /// The program was not found on the search path.
    CommandNotFound(String),
    /// A job index that does not name a tracked background job.
    NoSuchJob(String),
    /// An alias name that is not in the alias table.
    NoSuchAlias(String),
    /// A fixed table (aliases, jobs, argument tokens) is full.
    CapacityExceeded { what: String, limit: usize },
    /// The user interrupted the line editor.
    Interrupted,
    /// An underlying I/O operation failed.
    Io,
    /// An underlying system call failed.
    Nix,
    /// The line editor failed.
    Readline,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::BuiltinCommand { ref message, .. } => write!(f, "{}", message),
            ErrorKind::CommandNotFound(ref line) => write!(f, "{}: command not found", line),
            ErrorKind::NoSuchJob(ref job) => write!(f, "{}: no such job", job),
            ErrorKind::NoSuchAlias(ref name) => write!(f, "{}: not found", name),
            ErrorKind::CapacityExceeded { ref what, limit } => {
                write!(f, "{} limit reached ({})", what, limit)
            }
            ErrorKind::Interrupted => write!(f, "interrupted"),
            ErrorKind::Io => write!(f, "I/O error occurred"),
            ErrorKind::Nix => write!(f, "Nix error occurred"),
            ErrorKind::Readline => write!(f, "Readline error occurred"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::from(Context::new(kind))
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(ctx: Context<ErrorKind>) -> Error {
        Error { ctx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_chain_includes_underlying_causes() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err.context(ErrorKind::Io));
        assert_eq!(err.display_chain(), "I/O error occurred: denied");
    }

    #[test]
    fn display_chain_without_a_cause_is_the_kind_alone() {
        let err = Error::from(ErrorKind::Interrupted);
        assert_eq!(err.display_chain(), "interrupted");
    }
}
