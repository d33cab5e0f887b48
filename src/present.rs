use std::{
    io::Write,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{Result, anyhow};

use crate::edit::open_in_editor;
use crate::model::{Grouped, Outcome};
use crate::runner::CommandRunner;
use crate::style::Style;
use crate::ui::Chooser;

/// Time given to read the "Opening:" notice before the editor takes over.
pub const OPEN_PAUSE: Duration = Duration::from_millis(500);

pub const PROMPT: &str = "Which file? ";

pub struct Presenter<'a, W: Write, R: CommandRunner + ?Sized, C: Chooser + ?Sized> {
    pub out: W,
    pub runner: &'a R,
    pub chooser: &'a C,
    pub editor: String,
    pub style: Style,
    pub pause: Duration,
}

impl<'a, W: Write, R: CommandRunner + ?Sized, C: Chooser + ?Sized> Presenter<'a, W, R, C> {
    pub fn present(&mut self, pattern: &str, files: &[PathBuf], list_only: bool) -> Result<Outcome> {
        if list_only {
            return self.list(pattern, files);
        }
        match files {
            [] => self.no_matches(pattern),
            [only] => {
                self.open(only)?;
                Ok(Outcome::Opened(only.clone()))
            }
            many => self.select(many),
        }
    }

    fn list(&mut self, pattern: &str, files: &[PathBuf]) -> Result<Outcome> {
        if files.is_empty() {
            return self.no_matches(pattern);
        }
        for file in files {
            write_path(&mut self.out, file)?;
            self.out.write_all(b"\n")?;
        }
        Ok(Outcome::Listed(files.len()))
    }

    fn no_matches(&mut self, pattern: &str) -> Result<Outcome> {
        writeln!(self.out, "No files found matching: \"{pattern}\"")?;
        Ok(Outcome::NoMatches)
    }

    fn select(&mut self, files: &[PathBuf]) -> Result<Outcome> {
        let Some(grouped) = Grouped::from_paths(files) else {
            return Ok(Outcome::NoMatches);
        };
        writeln!(
            self.out,
            "{}{}",
            self.style.ok("Common Path: "),
            self.style.warn(&grouped.prefix.to_string_lossy())
        )?;
        self.out.flush()?;

        let entries: Vec<String> = grouped
            .relative
            .iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect();
        let Some(pos) = self.chooser.choose(PROMPT, &entries)? else {
            log::debug!("selection cancelled");
            return Ok(Outcome::Cancelled);
        };
        let choice = grouped
            .relative
            .get(pos)
            .ok_or_else(|| anyhow!("picked entry {pos} is out of range"))?;

        let full = grouped.resolve(choice);
        self.open(&full)?;
        Ok(Outcome::Opened(full))
    }

    fn open(&mut self, path: &Path) -> Result<()> {
        writeln!(self.out, "Opening: {}", path.display())?;
        self.out.flush()?;
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        log::debug!("opening {} with {}", path.display(), self.editor);
        open_in_editor(self.runner, &self.editor, path)
    }
}

/// Raw path bytes where the platform has them, so names that are not
/// UTF-8 come out exactly as the finder printed them.
#[cfg(unix)]
fn write_path<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    write!(out, "{}", path.display())
}
