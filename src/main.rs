// algotracer: step through an execution trace in the terminal

use std::io;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use algotracer::config::Config;
use algotracer::logging::init_logging;
use algotracer::playback::PlaybackController;
use algotracer::session::AnalysisSession;
use algotracer::ui::App;

fn main() -> Result<()> {
    let config = Config::parse();

    init_logging(config.log_file.as_deref(), config.verbose)?;

    let Some(analyzer) = config.build_analyzer() else {
        Config::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "an analyzer is required: pass --trace <JSON> or --analyzer <COMMAND>",
            )
            .exit();
    };

    let source = config.load_source().context("cannot read source file")?;

    info!(
        "starting with {} ({} source lines)",
        analyzer.name(),
        source.lines().count()
    );

    let mut session = AnalysisSession::new(analyzer, PlaybackController::new(config.interval()));
    if let Err(err) = session.submit(&source) {
        // Shown in the UI as well; the user can fix the source and retry
        warn!("initial analysis not started: {}", err);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")?;
    Ok(())
}
