use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Ccsh utility extensions for `ExitStatus`.
pub trait CcshExitStatusExt {
    /// Create an `ExitStatus` to indicate *successful* program execution.
    fn from_success() -> Self;

    /// Create an `ExitStatus` to indicate *unsuccessful* program execution.
    fn from_failure() -> Self;

    /// Create an `ExitStatus` from a status code.
    fn from_status(code: i32) -> Self;
}

impl CcshExitStatusExt for ExitStatus {
    fn from_success() -> Self {
        ExitStatus::from_status(0)
    }

    fn from_failure() -> Self {
        ExitStatus::from_status(1)
    }

    fn from_status(code: i32) -> Self {
        ExitStatus::from_raw(code << 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_round_trip() {
        assert!(ExitStatus::from_success().success());
        assert!(!ExitStatus::from_failure().success());
        assert_eq!(ExitStatus::from_status(85).code(), Some(85));
    }
}
