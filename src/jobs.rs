//! Background job bookkeeping.
//!
//! The shell tracks each background process by pid together with the raw
//! command line that started it. Jobs are reaped by a non-blocking sweep the
//! dispatcher runs once per input line, so "done" notifications always appear
//! immediately before the next prompt. Job indices are positional and shift
//! after any removal; callers must not hold on to them.

use std::fmt;

use failure::ResultExt;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::errors::{Error, ErrorKind, Result};

const DEFAULT_JOB_CAPACITY: usize = 64;

/// A background process the shell is responsible for.
#[derive(Clone, Debug)]
pub struct Job {
    pid: Pid,
    command: String,
}

impl Job {
    /// The process identifier.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// The original command line, before alias expansion.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.pid, self.command)
    }
}

/// The set of currently tracked background jobs.
#[derive(Debug)]
pub struct JobTable {
    jobs: Vec<Job>,
    capacity: usize,
}

impl JobTable {
    /// Creates an empty table with the default capacity.
    pub fn new() -> JobTable {
        JobTable::with_capacity(DEFAULT_JOB_CAPACITY)
    }

    /// Creates an empty table tracking at most `capacity` jobs.
    pub fn with_capacity(capacity: usize) -> JobTable {
        JobTable {
            jobs: Vec::new(),
            capacity,
        }
    }

    /// Starts tracking `pid`, returning its positional index.
    ///
    /// A full table is a reported error: the process keeps running, it just
    /// is not tracked and will never produce a "done" notification.
    pub fn register<T: AsRef<str>>(&mut self, pid: Pid, command: T) -> Result<usize> {
        if self.jobs.len() >= self.capacity {
            return Err(Error::capacity_exceeded("job", self.capacity));
        }

        self.jobs.push(Job {
            pid,
            command: command.as_ref().to_string(),
        });
        Ok(self.jobs.len() - 1)
    }

    /// Issues a non-blocking wait for every tracked job, removing and
    /// returning the ones that have terminated.
    pub fn sweep(&mut self) -> Vec<Job> {
        let mut finished = Vec::new();
        self.jobs.retain(|job| {
            match waitpid(job.pid, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) => true,
                Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => {
                    finished.push(job.clone());
                    false
                }
                Ok(status) => {
                    debug!("job {} reported {:?}, keeping", job.pid, status);
                    true
                }
                Err(e) => {
                    debug!("waitpid({}) failed: {}", job.pid, e);
                    true
                }
            }
        });

        finished
    }

    /// Performs a blocking wait on the job at `index` and removes it.
    ///
    /// An index outside the current table bounds is a reported error and
    /// leaves the table untouched.
    pub fn bring_to_foreground(&mut self, index: usize) -> Result<Job> {
        if index >= self.jobs.len() {
            return Err(Error::no_such_job(index.to_string()));
        }

        waitpid(self.jobs[index].pid, None).context(ErrorKind::Nix)?;
        Ok(self.jobs.remove(index))
    }

    /// Iterates over `(index, job)` pairs in current table order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Job)> {
        self.jobs.iter().enumerate()
    }

    /// Returns `true` if no jobs are tracked.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for JobTable {
    fn default() -> JobTable {
        JobTable::new()
    }
}
