use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use wpm_challenge::{
    app::{App, Control},
    app_dirs::AppDirs,
    challenge::{Difficulty, SentenceTable},
    config::{ConfigStore, FileConfigStore},
    logging,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui::AppView,
};

const TICK_RATE_MS: u64 = 100;

/// timed sentence typing challenge with wpm, accuracy and a running score tracker
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sentence shown as fast and as accurately as you can. You have 60 seconds once the clock starts; results and a per-session score tracker are shown after every game."
)]
pub struct Cli {
    /// difficulty to start with, overriding the saved preference
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// preferences file to read and write
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// file to append logs to
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        logging::init(&path);
    }

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = store.load();
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }

    let table = SentenceTable::load()?;
    let mut app = App::new(table, &config);
    log::info!("starting at {} difficulty", app.difficulty);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let outcome = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = store.save(&app.settings()) {
        log::warn!("could not save preferences to {}: {e}", store.path().display());
    }
    log::info!(
        "exiting after {} games",
        app.session.stats().games_played()
    );

    outcome
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);

    loop {
        terminal.draw(|f| ui(app, f))?;

        let now = Instant::now();
        match runner.step() {
            AppEvent::Tick => app.on_tick(now),
            AppEvent::Resize(width, height) => app.set_viewport(width, height),
            AppEvent::Paste(text) => app.handle_paste(&text, now),
            AppEvent::Key(key) => {
                if app.handle_key(key, now) == Control::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(AppView::new(app, Instant::now()), f.area());
}
