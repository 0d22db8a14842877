use std::process::ExitStatus;

use crate::builtins::prelude::*;
use crate::util::CcshExitStatusExt;

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = super::EXIT_NAME;

    const HELP: &'static str = "\
exit: exit [n]
    Exit the shell with a status of N. If N is omitted, the exit status
    is 0.";

    fn run(shell: &mut Shell, args: Vec<String>, _stdout: &mut dyn Write) -> Result<()> {
        let status_code = args
            .get(0)
            .map(|arg| {
                arg.parse::<i32>().unwrap_or_else(|_| {
                    eprintln!("ccsh: exit: {}: numeric argument required", arg);
                    2
                })
            })
            .unwrap_or(0);
        shell.exit(Some(ExitStatus::from_status(status_code)));
    }
}
