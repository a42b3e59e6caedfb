/*!
 * Process execution for external collaborators.
 *
 * The tagger, the media probe and the file manager reveal all run external
 * programs. They do so through the [`ProcessRunner`] trait so the whole run
 * can be exercised without touching any of those programs:
 * - `system`: runs programs with `std::process::Command`
 * - `mock`: records invocations and replays scripted outputs
 */

use std::ffi::OsString;
use std::fmt::{self, Debug};
use std::io;
use std::path::PathBuf;

/// A program and its arguments, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute
    pub program: PathBuf,

    /// Arguments, passed verbatim without shell interpretation
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arguments as lossy strings, for display and assertions
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    /// Shell-like rendering with every argument double quoted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Quote a word for display; flags are shown bare.
pub fn shell_quote(word: &str) -> String {
    if word.starts_with('-') && !word.contains(char::is_whitespace) {
        word.to_string()
    } else {
        format!("\"{}\"", word.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,

    pub stdout: String,

    pub stderr: String,
}

impl ProcessOutput {
    // @creates: Successful output with the given stdout
    pub fn success<S: Into<String>>(stdout: S) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    // @creates: Failed output with the given exit code and stderr
    pub fn failure<S: Into<String>>(code: i32, stderr: S) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external programs synchronously
pub trait ProcessRunner: Debug {
    /// Run `invocation` to completion and capture its output.
    ///
    /// An `Err` means the program could not be started at all; a program that
    /// ran and failed is reported through [`ProcessOutput::code`].
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).run(invocation)
    }
}

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;
