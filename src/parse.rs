//! Ccsh Parser
//!
//! Splits a raw command line into argument tokens and pulls out the
//! redirection and background directives. The grammar is deliberately tiny:
//! tokens are separated by runs of whitespace, `<`, `>` and `>>` each consume
//! the following token as a filename operand, and `&` marks the invocation
//! for background execution. Directive tokens never show up in `argv`.

/// Represents all information associated with a single parsed command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Invocation {
    /// The argument tokens; the program name is first.
    pub argv: Vec<String>,
    /// The file to read stdin from, if one is specified.
    pub infile: Option<String>,
    /// The file to write stdout to, if one is specified.
    pub outfile: Option<String>,
    /// Open `outfile` for appending instead of truncating.
    pub append: bool,
    /// Run the command in the background.
    pub background: bool,
}

impl Invocation {
    /// Parses a command line into an `Invocation`.
    ///
    /// Returns `None` for a blank line. A redirection directive with no
    /// following token leaves its file unset; this is tolerated malformed
    /// input, not an error. If a directive is repeated, the last occurrence
    /// wins, matching left-to-right token consumption.
    ///
    /// # Examples
    ///
    /// ```
    /// use ccsh::parse::Invocation;
    ///
    /// let inv = Invocation::parse("sort < in.txt > out.txt &").unwrap();
    /// assert_eq!(inv.argv, vec!["sort"]);
    /// assert_eq!(inv.infile.as_deref(), Some("in.txt"));
    /// assert_eq!(inv.outfile.as_deref(), Some("out.txt"));
    /// assert!(!inv.append);
    /// assert!(inv.background);
    /// ```
    pub fn parse(input: &str) -> Option<Invocation> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut invocation = Invocation::default();
        let mut tokens = trimmed.split_whitespace();
        while let Some(token) = tokens.next() {
            match token {
                "<" => {
                    invocation.infile = tokens.next().map(String::from);
                }
                ">" => {
                    invocation.outfile = tokens.next().map(String::from);
                    invocation.append = false;
                }
                ">>" => {
                    invocation.outfile = tokens.next().map(String::from);
                    invocation.append = true;
                }
                "&" => {
                    invocation.background = true;
                }
                arg => {
                    invocation.argv.push(arg.to_string());
                }
            }
        }

        Some(invocation)
    }

    /// The program name, i.e. the first argument token.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}
