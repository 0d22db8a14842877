use std::env;
use std::path::PathBuf;

use crate::builtins::prelude::*;

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = super::CD_NAME;

    const HELP: &'static str = "\
cd: cd [dir]
    Change the current directory to DIR. The variable $HOME is the
    default DIR.";

    fn run(_shell: &mut Shell, args: Vec<String>, _stdout: &mut dyn Write) -> Result<()> {
        let dir = match args.first() {
            Some(dir) => PathBuf::from(dir),
            None => ::dirs::home_dir()
                .ok_or_else(|| Error::builtin_command("cd: HOME not set", 1))?,
        };

        env::set_current_dir(&dir).context(ErrorKind::Io)?;
        Ok(())
    }
}

pub struct Pwd;

impl BuiltinCommand for Pwd {
    const NAME: &'static str = super::PWD_NAME;

    const HELP: &'static str = "\
pwd: pwd
    Print the name of the current working directory.";

    fn run(_shell: &mut Shell, _args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        let cwd = env::current_dir().context(ErrorKind::Io)?;
        writeln!(stdout, "{}", cwd.display()).context(ErrorKind::Io)?;
        Ok(())
    }
}
