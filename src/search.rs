use std::{ffi::OsString, io, path::PathBuf};

use thiserror::Error;

use crate::model::SearchRequest;
use crate::runner::CommandRunner;

/// Finder binaries tried in order when none is configured.
/// Debian and Ubuntu ship fd as `fdfind`.
pub const DEFAULT_FINDERS: &[&str] = &["fdfind", "fd"];

pub const INSTALL_HINT: &str = "apt install fd-find";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("file finder not found (tried: {})", .tried.join(", "))]
    ToolMissing { tried: Vec<String> },

    #[error("{finder} exited with {}: {stderr}", describe_code(.code))]
    Failed {
        finder: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to run {finder}")]
    Spawn {
        finder: String,
        #[source]
        source: io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}

/// Runs the external finder for a request.
pub struct Searcher<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    finders: Vec<String>,
}

impl<'a, R: CommandRunner + ?Sized> Searcher<'a, R> {
    /// `finder` pins a single binary; otherwise [`DEFAULT_FINDERS`] are tried.
    pub fn new(runner: &'a R, finder: Option<&str>) -> Self {
        let finders = match finder {
            Some(f) => vec![f.to_string()],
            None => DEFAULT_FINDERS.iter().map(|f| f.to_string()).collect(),
        };
        Self { runner, finders }
    }

    pub fn search(&self, request: &SearchRequest) -> Result<Vec<PathBuf>, SearchError> {
        let args = finder_args(request);
        for finder in &self.finders {
            let out = match self.runner.output(finder, &args) {
                Ok(out) => out,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("{finder} not found, trying next");
                    continue;
                }
                Err(source) => {
                    return Err(SearchError::Spawn {
                        finder: finder.clone(),
                        source,
                    });
                }
            };

            let files = parse_lines(&out.stdout);
            if !out.success() {
                if files.is_empty() {
                    return Err(SearchError::Failed {
                        finder: finder.clone(),
                        code: out.code,
                        stderr: out.stderr.trim().to_string(),
                    });
                }
                log::warn!(
                    "{finder} exited with {} but returned {} result(s): {}",
                    describe_code(&out.code),
                    files.len(),
                    out.stderr.trim()
                );
            }
            log::debug!("{finder} returned {} result(s)", files.len());
            return Ok(files);
        }
        Err(SearchError::ToolMissing {
            tried: self.finders.clone(),
        })
    }
}

/// Regular files only; ignore rules honored unless `include_ignored`.
/// `--` keeps a pattern like `-H` from being read as a flag.
pub fn finder_args(request: &SearchRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--type".into(), "f".into()];
    if request.include_ignored {
        args.push("-I".into());
    }
    args.push("--".into());
    args.push(request.pattern.clone().into());
    args.push(request.location.clone().into_os_string());
    args
}

fn parse_lines(stdout: &[u8]) -> Vec<PathBuf> {
    stdout
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(path_from_bytes)
        .collect()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
