use crate::builtins::prelude::*;
use crate::builtins::{
    self,
    alias::{Alias, Unalias},
    dirs::{Cd, Pwd},
    exit::Exit,
    grep::Grep,
    jobs::{Fg, Jobs},
    path::{Path, Which},
    source::Source,
};

pub struct Help;

impl BuiltinCommand for Help {
    const NAME: &'static str = super::HELP_NAME;

    const HELP: &'static str = "\
help: help [command ...]
    Display helpful information about builtin commands. If COMMAND is
    specified, gives detailed help on all commands matching COMMAND,
    otherwise a list of the builtins is printed.";

    fn run(_shell: &mut Shell, args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        if args.is_empty() {
            print_all_usage_strings(stdout)?;
            return Ok(());
        }

        let mut all_invalid = true;
        for arg in &args {
            if let Some(help) = help_for(arg) {
                writeln!(stdout, "{}", help).context(ErrorKind::Io)?;
                all_invalid = false;
            }
        }

        if all_invalid {
            let command = args.last().unwrap();
            return Err(Error::builtin_command(
                format!("help: no help topics match {}", command),
                1,
            ));
        }
        Ok(())
    }
}

fn help_for(command: &str) -> Option<&'static str> {
    match command {
        builtins::ALIAS_NAME => Some(Alias::HELP),
        builtins::CD_NAME => Some(Cd::HELP),
        builtins::EXIT_NAME => Some(Exit::HELP),
        builtins::FG_NAME => Some(Fg::HELP),
        builtins::GREP_NAME => Some(Grep::HELP),
        builtins::HELP_NAME => Some(Help::HELP),
        builtins::JOBS_NAME => Some(Jobs::HELP),
        builtins::PATH_NAME => Some(Path::HELP),
        builtins::PWD_NAME => Some(Pwd::HELP),
        builtins::SOURCE_NAME => Some(Source::HELP),
        builtins::UNALIAS_NAME => Some(Unalias::HELP),
        builtins::WHICH_NAME => Some(Which::HELP),
        _ => None,
    }
}

fn print_all_usage_strings(stdout: &mut dyn Write) -> Result<()> {
    let usages = [
        Alias::usage(),
        Cd::usage(),
        Exit::usage(),
        Fg::usage(),
        Grep::usage(),
        Help::usage(),
        Jobs::usage(),
        Path::usage(),
        Pwd::usage(),
        Source::usage(),
        Unalias::usage(),
        Which::usage(),
    ];
    for usage in &usages {
        writeln!(stdout, "{}", usage).context(ErrorKind::Io)?;
    }
    Ok(())
}
