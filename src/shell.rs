//! Ccsh - Shell Module
//!
//! The Shell drives the per-line cycle: sweep background jobs, expand the
//! leading alias, parse the line, dispatch to a builtin or hand the
//! glob-expanded argument vector to the process launcher. All persistent
//! session state (aliases, jobs, history) lives here and survives across
//! iterations.

use std::env;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{self, ExitStatus};

use failure::ResultExt;
use nix::unistd::Pid;

use crate::alias::AliasTable;
use crate::builtins;
use crate::editor::Editor;
use crate::errors::{ErrorKind, Result};
use crate::execute_command::spawn_process;
use crate::expansion::expand_globs;
use crate::jobs::JobTable;
use crate::parse::Invocation;
use crate::util::CcshExitStatusExt;

const HISTORY_FILE_NAME: &str = ".ccsh_history";
const STARTUP_FILE_NAME: &str = ".ccshrc";
const DEFAULT_PROMPT: &str = "ccsh> ";
const PROMPT_OVERRIDE_VAR: &str = "CCSH_PROMPT";
const COMMAND_NOT_FOUND_EXIT_STATUS: i32 = 127;

/// Ccsh Shell
pub struct Shell {
    /// Responsible for readline and history.
    editor: Editor,
    history_file: Option<PathBuf>,
    aliases: AliasTable,
    jobs: JobTable,
    /// Exit status of last command executed.
    last_exit_status: ExitStatus,
    config: ShellConfig,
}

impl Shell {
    /// Constructs a new Shell to manage aliases, background jobs and command
    /// history. An interactive shell also executes the startup file once.
    pub fn new(config: ShellConfig) -> Result<Shell> {
        let mut shell = Shell {
            editor: Editor::with_capacity(config.command_history_capacity),
            history_file: None,
            aliases: AliasTable::new(),
            jobs: JobTable::new(),
            last_exit_status: ExitStatus::from_success(),
            config,
        };

        if config.enable_command_history {
            shell.load_history()?;
        }

        if config.enable_startup_file {
            shell.execute_startup_file();
        }

        info!("ccsh started up");
        Ok(shell)
    }

    pub(crate) fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub(crate) fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    pub(crate) fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut JobTable {
        &mut self.jobs
    }

    fn load_history(&mut self) -> Result<()> {
        self.history_file = dirs::home_dir().map(|p| p.join(HISTORY_FILE_NAME));
        if let Some(ref history_file) = self.history_file {
            self.editor.load_history(history_file)?;
        } else {
            warn!("unable to get home directory");
        }

        Ok(())
    }

    /// Runs the lines of `~/.ccshrc`, if it exists. Alias definitions land in
    /// the alias table through the `alias` builtin; other lines execute as
    /// ordinary commands.
    fn execute_startup_file(&mut self) {
        let startup_file = match dirs::home_dir() {
            Some(home) => home.join(STARTUP_FILE_NAME),
            None => return,
        };
        if !startup_file.exists() {
            return;
        }

        let temp_result = self.execute_commands_from_file(&startup_file);
        log_if_err!(temp_result, "startup file");
    }

    /// Prompt to output to the user; overridable through `$CCSH_PROMPT`.
    /// Returns `None` when end of input is reached.
    fn prompt(&mut self) -> Result<Option<String>> {
        let prompt = env::var(PROMPT_OVERRIDE_VAR).unwrap_or_else(|_| DEFAULT_PROMPT.to_string());
        self.editor.readline(&prompt)
    }

    /// Runs one command line through the full dispatch cycle.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        // skip if empty
        if input.is_empty() {
            return Ok(());
        }

        if self.config.enable_command_history {
            self.editor.add_history_entry(input);
        }

        if self.config.enable_job_control {
            self.notify_finished_jobs();
        }

        let expanded = self.aliases.expand_line(input);
        let invocation = match Invocation::parse(&expanded) {
            Some(invocation) => invocation,
            None => return Ok(()),
        };
        if invocation.argv.is_empty() {
            return Ok(());
        }

        if builtins::is_builtin(&invocation.argv) {
            let (exit_status, result) =
                builtins::run(self, &invocation.argv, &mut io::stdout());
            self.last_exit_status = ExitStatus::from_status(exit_status);
            if let Err(e) = result {
                eprintln!("ccsh: {}", e.display_chain());
            }
            return Ok(());
        }

        self.execute_external(input, invocation)
    }

    /// Runs a ccsh script from a file, line by line. A line that fails is
    /// reported and dropped; the rest of the file still runs.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut f = File::open(path).context(ErrorKind::Io)?;
        let mut buffer = String::new();
        f.read_to_string(&mut buffer).context(ErrorKind::Io)?;

        for line in buffer.split('\n') {
            let temp_result = self.execute_command_string(line);
            if let Err(ref e) = temp_result {
                eprintln!("ccsh: {}", e.display_chain());
            }
            log_if_err!(temp_result, "execute_commands_from_file");
        }

        Ok(())
    }

    /// Runs commands from stdin until EOF is received.
    pub fn execute_from_stdin(&mut self) {
        loop {
            let input = match self.prompt() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(ref e) if *e.kind() == ErrorKind::Interrupted => {
                    println!("Use 'exit' to quit.");
                    continue;
                }
                e => {
                    log_if_err!(e, "prompt");
                    continue;
                }
            };

            let temp_result = self.execute_command_string(&input);
            if let Err(ref e) = temp_result {
                eprintln!("ccsh: {}", e.display_chain());
            }
            log_if_err!(temp_result, "execute_command_string");
        }
    }

    /// Glob-expands the argument vector and hands it to the process launcher.
    /// `raw` is the pre-alias-expansion line, kept for job display.
    fn execute_external(&mut self, raw: &str, mut invocation: Invocation) -> Result<()> {
        invocation.argv = expand_globs(&invocation.argv)?;

        let mut child = match spawn_process(&invocation) {
            Ok(child) => child,
            Err(e) => {
                if let ErrorKind::CommandNotFound(ref command) = *e.kind() {
                    eprintln!("ccsh: {}: command not found", command);
                    self.last_exit_status =
                        ExitStatus::from_status(COMMAND_NOT_FOUND_EXIT_STATUS);
                    return Ok(());
                }

                return Err(e);
            }
        };

        if invocation.background {
            let pid = Pid::from_raw(child.id() as i32);
            match self.jobs.register(pid, raw) {
                Ok(index) => println!("[{}] {}", index, pid),
                // the process keeps running untracked
                Err(e) => eprintln!("ccsh: {}", e),
            }
        } else {
            self.last_exit_status = child.wait().context(ErrorKind::Io)?;
        }

        Ok(())
    }

    fn notify_finished_jobs(&mut self) {
        for job in self.jobs.sweep() {
            println!("[done] {}", job.command());
        }
    }

    /// Exit the shell.
    ///
    /// Exits with a status of `n` if given; otherwise with the status of the
    /// last command executed. Saves command history first.
    pub fn exit(&mut self, n: Option<ExitStatus>) -> ! {
        if self.config.display_messages {
            println!("exit");
        }

        let code = match n {
            Some(n) => n.code().unwrap_or(1),
            None => self.last_exit_status.code().unwrap_or(0),
        };
        let code_like_u8 = if code < 0 {
            (256 + code) % 256
        } else {
            code % 256
        };

        if self.config.enable_command_history {
            if let Some(ref history_file) = self.history_file {
                if let Err(e) = self.editor.save_history(history_file) {
                    error!(
                        "error: failed to save history to file during shutdown: {}",
                        e
                    );
                }
            }
        }

        info!("ccsh has shut down");
        process::exit(code_like_u8);
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}\n{:?}\n{:?}", self.jobs, self.aliases, self.editor)
    }
}

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Determines if new command entries will be added to the shell's command history.
    enable_command_history: bool,

    /// Number of entries to store in the shell's command history
    command_history_capacity: usize,

    /// Determines if background jobs are swept and reported between lines.
    enable_job_control: bool,

    /// Determines if the startup file (`~/.ccshrc`) is executed.
    enable_startup_file: bool,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,
}

impl ShellConfig {
    /// Creates an interactive shell, e.g. command history, job control
    ///
    /// # Complete List
    /// - Command History is enabled
    /// - Job Control is enabled
    /// - Some additional messages are displayed
    pub fn interactive(command_history_capacity: usize) -> ShellConfig {
        ShellConfig {
            enable_command_history: true,
            command_history_capacity,
            enable_job_control: true,
            enable_startup_file: true,
            display_messages: true,
        }
    }

    /// Creates a noninteractive shell, e.g. no command history, no job control
    ///
    /// # Complete List
    /// - Command History is disabled. Commands are not saved.
    /// - Background job notifications are not printed between lines.
    /// - Fewer messages are displayed
    pub fn noninteractive() -> ShellConfig {
        Default::default()
    }
}

impl Default for ShellConfig {
    fn default() -> ShellConfig {
        ShellConfig {
            enable_command_history: false,
            command_history_capacity: 0,
            enable_job_control: false,
            enable_startup_file: false,
            display_messages: false,
        }
    }
}
