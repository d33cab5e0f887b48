use std::{env, ffi::OsString, path::Path};

use anyhow::{Context, Result, bail};

use crate::runner::CommandRunner;

pub const DEFAULT_EDITOR: &str = "vim";

/// `--editor`, then `$EDITOR`, then vim.
pub fn resolve_editor(editor: Option<&str>) -> String {
    let non_blank = |s: &String| !s.trim().is_empty();
    editor
        .map(|s| s.to_string())
        .filter(non_blank)
        .or_else(|| env::var("EDITOR").ok().filter(non_blank))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Blocks until the editor exits. The editor string may carry its own
/// arguments, e.g. `code --wait`.
pub fn open_in_editor<R: CommandRunner + ?Sized>(runner: &R, editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("editor command is empty");
    };
    let mut args: Vec<OsString> = parts.map(OsString::from).collect();
    args.push(path.as_os_str().to_owned());

    let code = runner
        .status(program, &args)
        .with_context(|| format!("failed to spawn editor {program} for {}", path.display()))?;

    if code != Some(0) {
        bail!("editor exited with status {:?}", code);
    }
    Ok(())
}
