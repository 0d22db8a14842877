use crate::builtins::prelude::*;

pub struct Jobs;

impl BuiltinCommand for Jobs {
    const NAME: &'static str = super::JOBS_NAME;

    const HELP: &'static str = "\
jobs: jobs
    List the tracked background jobs, one per line, as
    [index] pid command. Indices are positional and shift when a job
    is removed.";

    fn run(shell: &mut Shell, _args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        if shell.jobs().is_empty() {
            writeln!(stdout, "No background jobs.").context(ErrorKind::Io)?;
            return Ok(());
        }

        for (index, job) in shell.jobs().iter() {
            writeln!(stdout, "[{}] {}", index, job).context(ErrorKind::Io)?;
        }
        Ok(())
    }
}

pub struct Fg;

impl BuiltinCommand for Fg {
    const NAME: &'static str = super::FG_NAME;

    const HELP: &'static str = "\
fg: fg <index>
    Wait for the background job at INDEX to finish, then stop tracking
    it.";

    fn run(shell: &mut Shell, args: Vec<String>, _stdout: &mut dyn Write) -> Result<()> {
        let arg = args
            .first()
            .ok_or_else(|| Error::builtin_command("fg: usage: fg <index>", 2))?;
        let index = arg.parse::<usize>().map_err(|_| {
            Error::builtin_command(format!("fg: {}: invalid job index", arg), 1)
        })?;

        shell.jobs_mut().bring_to_foreground(index)?;
        Ok(())
    }
}
