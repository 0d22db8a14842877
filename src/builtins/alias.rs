use crate::builtins::prelude::*;

pub struct Alias;

impl BuiltinCommand for Alias {
    const NAME: &'static str = super::ALIAS_NAME;

    const HELP: &'static str = "\
alias: alias [name='value']
    With no arguments, list the defined aliases. Otherwise define NAME
    as VALUE, overwriting an existing definition. Only the leading token
    of a command line is subject to alias expansion, and alias values
    are not expanded again.";

    fn run(shell: &mut Shell, args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        if args.is_empty() {
            for (name, value) in shell.aliases().iter() {
                writeln!(stdout, "alias {}='{}'", name, value).context(ErrorKind::Io)?;
            }
            return Ok(());
        }

        // the tokenizer split the definition on whitespace; glue it back
        // together so quoted values containing spaces survive
        let definition = args.join(" ");
        match parse_definition(&definition) {
            Some((name, value)) => shell.aliases_mut().set(name, value),
            None => Err(Error::builtin_command("alias: usage: alias name='value'", 2)),
        }
    }
}

pub struct Unalias;

impl BuiltinCommand for Unalias {
    const NAME: &'static str = super::UNALIAS_NAME;

    const HELP: &'static str = "\
unalias: unalias <name>
    Remove NAME from the alias table.";

    fn run(shell: &mut Shell, args: Vec<String>, _stdout: &mut dyn Write) -> Result<()> {
        let name = args
            .first()
            .ok_or_else(|| Error::builtin_command("unalias: usage: unalias <name>", 2))?;
        shell.aliases_mut().remove(name)
    }
}

/// Splits `name=value` at the first `=`, stripping a matching pair of
/// surrounding quotes from the value. The name must be non-empty.
fn parse_definition(definition: &str) -> Option<(&str, &str)> {
    let eq = definition.find('=')?;
    if eq == 0 {
        return None;
    }

    Some((&definition[..eq], unquote(&definition[eq + 1..])))
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if value.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[value.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
