use std::fs::File;
use std::io::{self, BufRead, BufReader};

use regex::{Regex, RegexBuilder};

use crate::builtins::prelude::*;

pub struct Grep;

#[derive(Clone, Copy, Debug, Default)]
struct GrepOptions {
    ignore_case: bool,
    line_numbers: bool,
    invert: bool,
    count: bool,
}

impl BuiltinCommand for Grep {
    const NAME: &'static str = super::GREP_NAME;

    const HELP: &'static str = "\
grep: grep [-i|-n|-v|-c] <pattern> [file...]
    Print lines matching PATTERN in each FILE, or from standard input
    when no files are given. -i ignores case, -n prefixes line numbers,
    -v selects non-matching lines, -c prints only a match count.";

    fn run(_shell: &mut Shell, args: Vec<String>, stdout: &mut dyn Write) -> Result<()> {
        let (options, rest) = parse_options(&args)?;
        let (pattern, files) = rest
            .split_first()
            .ok_or_else(|| Error::builtin_command(format!("grep: usage: {}", Self::usage()), 2))?;

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(options.ignore_case)
            .build()
            .map_err(|e| Error::builtin_command(format!("grep: {}", e), 2))?;

        if files.is_empty() {
            let stdin = io::stdin();
            return grep_reader(&regex, options, None, stdin.lock(), stdout);
        }

        let multiple = files.len() > 1;
        for file in files {
            let reader = File::open(file)
                .map(BufReader::new)
                .map_err(|e| Error::builtin_command(format!("grep: {}: {}", file, e), 2))?;
            let label = if multiple { Some(file.as_str()) } else { None };
            grep_reader(&regex, options, label, reader, stdout)?;
        }
        Ok(())
    }
}

fn parse_options(args: &[String]) -> Result<(GrepOptions, &[String])> {
    let mut options = GrepOptions::default();
    let mut index = 0;
    while index < args.len() && args[index].starts_with('-') && args[index].len() > 1 {
        for flag in args[index][1..].chars() {
            match flag {
                'i' => options.ignore_case = true,
                'n' => options.line_numbers = true,
                'v' => options.invert = true,
                'c' => options.count = true,
                _ => {
                    return Err(Error::builtin_command(
                        format!("grep: invalid option -- '{}'", flag),
                        2,
                    ));
                }
            }
        }
        index += 1;
    }

    Ok((options, &args[index..]))
}

fn grep_reader<R: BufRead>(
    regex: &Regex,
    options: GrepOptions,
    label: Option<&str>,
    reader: R,
    stdout: &mut dyn Write,
) -> Result<()> {
    let mut match_count = 0u64;
    for (number, line) in reader.lines().enumerate() {
        let line = line.context(ErrorKind::Io)?;
        if regex.is_match(&line) != options.invert {
            match_count += 1;
            if !options.count {
                if let Some(label) = label {
                    write!(stdout, "{}:", label).context(ErrorKind::Io)?;
                }
                if options.line_numbers {
                    write!(stdout, "{}:", number + 1).context(ErrorKind::Io)?;
                }
                writeln!(stdout, "{}", line).context(ErrorKind::Io)?;
            }
        }
    }

    if options.count {
        if let Some(label) = label {
            write!(stdout, "{}:", label).context(ErrorKind::Io)?;
        }
        writeln!(stdout, "{}", match_count).context(ErrorKind::Io)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HAYSTACK: &str = "needle\nhay\nNeedle in hay\n";

    fn run_grep(args: &[&str], input: &str) -> String {
        let args: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();
        let (options, rest) = parse_options(&args).unwrap();
        let (pattern, _) = rest.split_first().unwrap();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(options.ignore_case)
            .build()
            .unwrap();

        let mut output = Vec::new();
        grep_reader(&regex, options, None, Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn matching_lines() {
        assert_eq!(run_grep(&["needle"], HAYSTACK), "needle\n");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(run_grep(&["-i", "needle"], HAYSTACK), "needle\nNeedle in hay\n");
    }

    #[test]
    fn line_numbers() {
        assert_eq!(run_grep(&["-n", "hay"], HAYSTACK), "2:hay\n3:Needle in hay\n");
    }

    #[test]
    fn inverted() {
        assert_eq!(run_grep(&["-v", "hay"], HAYSTACK), "needle\n");
    }

    #[test]
    fn count_only() {
        assert_eq!(run_grep(&["-c", "hay"], HAYSTACK), "2\n");
        assert_eq!(run_grep(&["-ic", "needle"], HAYSTACK), "2\n");
    }

    #[test]
    fn invalid_option() {
        let args = vec!["-z".to_string(), "pattern".to_string()];
        assert!(parse_options(&args).is_err());
    }

    #[test]
    fn options_stop_at_the_pattern() {
        let args = vec!["-i".to_string(), "-foo".to_string()];
        // "-foo" contains only invalid flags, so it must be an error, not a pattern
        assert!(parse_options(&args).is_err());
        let args = vec!["pattern".to_string(), "-i".to_string()];
        let (options, rest) = parse_options(&args).unwrap();
        assert!(!options.ignore_case);
        assert_eq!(rest.len(), 2);
    }
}
