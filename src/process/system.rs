use log::trace;
use std::io;
use std::process::Command;

use crate::process::{Invocation, ProcessOutput, ProcessRunner};

/// Runs programs on the host with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        trace!("Running {}", invocation);

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
