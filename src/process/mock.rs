/*!
 * Mock process runner for testing.
 *
 * `MockRunner` never starts a process. It records every invocation and answers
 * with the first scripted reply whose program name matches, or with an empty
 * successful output when nothing matches:
 * - `MockRunner::working()` - every program succeeds silently
 * - `MockRunner::failing(code)` - every program exits with `code`
 * - `MockRunner::missing()` - every program fails to start
 */

use std::io;
use std::sync::Mutex;

use crate::process::{Invocation, ProcessOutput, ProcessRunner};

/// Scripted reply for a program
#[derive(Debug, Clone)]
pub enum MockReply {
    /// The program ran and produced this output
    Output(ProcessOutput),
    /// The program could not be started
    NotFound,
}

/// Behavior when no scripted reply matches
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Succeed with empty output
    Working,
    /// Exit with the given code
    Failing { code: i32 },
    /// Fail to start
    Missing,
}

/// Recording process runner
#[derive(Debug)]
pub struct MockRunner {
    behavior: MockBehavior,
    replies: Vec<(String, Vec<MockReply>)>,
    calls: Mutex<Vec<Invocation>>,
    cursor: Mutex<Vec<usize>>,
}

impl MockRunner {
    /// Create a new mock runner with the specified fallback behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            replies: Vec::new(),
            calls: Mutex::new(Vec::new()),
            cursor: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock where every program succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock where every program exits with `code`
    pub fn failing(code: i32) -> Self {
        Self::new(MockBehavior::Failing { code })
    }

    /// Create a mock where no program can be started
    pub fn missing() -> Self {
        Self::new(MockBehavior::Missing)
    }

    /// Queue a reply for programs whose file name is `program`.
    ///
    /// Replies for the same program are consumed in order; the last one is
    /// repeated once the queue is exhausted.
    pub fn reply(mut self, program: &str, reply: MockReply) -> Self {
        match self.replies.iter_mut().find(|(name, _)| name == program) {
            Some((_, queue)) => queue.push(reply),
            None => {
                self.replies.push((program.to_string(), vec![reply]));
                self.cursor.get_mut().expect("cursor lock").push(0);
            }
        }
        self
    }

    /// Queue a successful output for `program`
    pub fn stdout(self, program: &str, stdout: &str) -> Self {
        self.reply(program, MockReply::Output(ProcessOutput::success(stdout)))
    }

    /// Every invocation seen so far
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Invocations of programs whose file name is `program`
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|call| program_name(call) == program)
            .collect()
    }

    fn fallback(&self) -> io::Result<ProcessOutput> {
        match self.behavior {
            MockBehavior::Working => Ok(ProcessOutput::success("")),
            MockBehavior::Failing { code } => Ok(ProcessOutput::failure(code, "mock failure")),
            MockBehavior::Missing => Err(not_found()),
        }
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.calls.lock().expect("calls lock").push(invocation.clone());

        let name = program_name(invocation);
        let Some(index) = self.replies.iter().position(|(program, _)| *program == name) else {
            return self.fallback();
        };

        let queue = &self.replies[index].1;
        let mut cursor = self.cursor.lock().expect("cursor lock");
        let reply = &queue[cursor[index].min(queue.len() - 1)];
        cursor[index] += 1;

        match reply {
            MockReply::Output(output) => Ok(output.clone()),
            MockReply::NotFound => Err(not_found()),
        }
    }
}

fn program_name(invocation: &Invocation) -> String {
    invocation
        .program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "mock: program not found")
}
