use crate::builtins::prelude::*;

pub struct Source;

impl BuiltinCommand for Source {
    const NAME: &'static str = super::SOURCE_NAME;

    const HELP: &'static str = "\
source: source <file>
    Execute the lines of FILE as commands in the current shell.";

    fn run(shell: &mut Shell, args: Vec<String>, _stdout: &mut dyn Write) -> Result<()> {
        let file = args
            .first()
            .ok_or_else(|| Error::builtin_command("source: usage: source <file>", 2))?;
        shell.execute_commands_from_file(file)
    }
}
