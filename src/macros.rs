/// Logs the error of a `Result` without consuming it, for call sites where
/// failure is noted but the session continues.
macro_rules! log_if_err {
    ($result:expr, $($arg:tt)*) => {
        if let Err(ref e) = $result {
            error!("{}: {}", format_args!($($arg)*), e);
        }
    };
}
