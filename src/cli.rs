use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use regex::Regex;

use crate::model::SearchRequest;

#[derive(Parser, Debug)]
#[command(
    name = "fsel",
    version,
    about = "Find files by name and pick one to open in your editor"
)]
pub struct Cli {
    /// Lists all matching files with full paths without opening them
    #[arg(short, long)]
    pub list_only: bool,

    /// Also search files excluded by .gitignore and other ignore files
    #[arg(short, long, visible_alias = "include-gitignore")]
    pub include_ignored: bool,

    /// Editor to open the file with (default: $EDITOR, then vim)
    #[arg(short, long, value_name = "CMD")]
    pub editor: Option<String>,

    /// fd binary to search with (default: fdfind, then fd)
    #[arg(long, value_name = "CMD")]
    pub finder: Option<String>,

    /// Skim color scheme, e.g. "dark", "light", "none", or a custom spec
    #[arg(long = "color", value_name = "SPEC")]
    pub color_spec: Option<String>,

    /// The pattern to search for in file names
    #[arg(value_name = "REGEX", value_parser = parse_pattern)]
    pub pattern: String,

    /// The directory to search within
    #[arg(value_name = "LOCATION", value_parser = parse_location)]
    pub location: PathBuf,
}

impl Cli {
    pub fn request(&self) -> Result<SearchRequest> {
        SearchRequest::new(self.pattern.clone(), &self.location, self.include_ignored)
    }
}

fn parse_pattern(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("pattern must not be empty".to_string());
    }
    Regex::new(s).map_err(|e| format!("invalid regex: {e}"))?;
    Ok(s.to_string())
}

fn parse_location(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if !path.exists() {
        return Err(format!("path '{s}' does not exist"));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("fsel").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().to_str().unwrap();
        let cli = parse(&["main", loc]).unwrap();

        assert!(!cli.list_only);
        assert!(!cli.include_ignored);
        assert_eq!(cli.pattern, "main");
        assert!(cli.editor.is_none());
    }

    #[test]
    fn short_flags() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().to_str().unwrap();
        let cli = parse(&["-l", "-i", "-e", "hx", "main", loc]).unwrap();

        assert!(cli.list_only);
        assert!(cli.include_ignored);
        assert_eq!(cli.editor.as_deref(), Some("hx"));
    }

    #[test]
    fn legacy_flag_name_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().to_str().unwrap();
        let cli = parse(&["--include-gitignore", "main", loc]).unwrap();
        assert!(cli.include_ignored);
    }

    #[test]
    fn rejects_missing_location() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = parse(&["main", missing.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_empty_and_invalid_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().to_str().unwrap();
        assert!(parse(&["", loc]).is_err());
        assert!(parse(&["(unclosed", loc]).is_err());
    }

    #[test]
    fn request_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().to_str().unwrap();
        let request = parse(&["-i", "main", loc]).unwrap().request().unwrap();

        assert_eq!(request.location, std::fs::canonicalize(dir.path()).unwrap());
        assert!(request.include_ignored);
    }
}
