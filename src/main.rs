mod cli;
mod edit;
mod model;
mod present;
mod runner;
mod search;
mod style;
mod ui;

use std::{io, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use present::{OPEN_PAUSE, Presenter};
use runner::SystemRunner;
use search::{INSTALL_HINT, SearchError, Searcher};
use style::Style;
use ui::SkimChooser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let style = Style::detect();

    match run(&cli, style) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(SearchError::ToolMissing { .. }) = err.downcast_ref::<SearchError>() {
                println!("{}", style.fail(&format!("Error: {err}.")));
                println!("{}{}", style.warn("Please install it using: "), style.ok(INSTALL_HINT));
            } else {
                eprintln!("{} {err:#}", style.fail("Error:"));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, style: Style) -> Result<()> {
    let request = cli.request()?;
    let runner = SystemRunner;

    let files = Searcher::new(&runner, cli.finder.as_deref()).search(&request)?;

    let chooser = SkimChooser::new(cli.color_spec.clone());
    let mut presenter = Presenter {
        out: io::stdout(),
        runner: &runner,
        chooser: &chooser,
        editor: edit::resolve_editor(cli.editor.as_deref()),
        style,
        pause: OPEN_PAUSE,
    };
    let outcome = presenter.present(&request.pattern, &files, cli.list_only)?;
    log::debug!("finished: {outcome:?}");
    Ok(())
}
