use std::{
    ffi::OsString,
    io,
    process::{Command, Stdio},
};

/// Captured result of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
    /// Raw bytes; paths on stdout need not be UTF-8.
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Every child the tool launches goes through this, so search and open
/// can be exercised without spawning real processes.
pub trait CommandRunner {
    /// Run to completion with stdout and stderr captured.
    fn output(&self, program: &str, args: &[OsString]) -> io::Result<Captured>;

    /// Run attached to the terminal, blocking until it exits.
    /// Returns the exit code, `None` when killed by a signal.
    fn status(&self, program: &str, args: &[OsString]) -> io::Result<Option<i32>>;
}

fn joined(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, program: &str, args: &[OsString]) -> io::Result<Captured> {
        log::debug!("running {program} {}", joined(args));
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(Captured {
            code: out.status.code(),
            stdout: out.stdout,
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    fn status(&self, program: &str, args: &[OsString]) -> io::Result<Option<i32>> {
        log::debug!("launching {program} {}", joined(args));
        let status = Command::new(program).args(args).status()?;
        Ok(status.code())
    }
}
