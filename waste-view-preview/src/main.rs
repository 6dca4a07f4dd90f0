//! Terminal host that previews the Auckland waste collection card against a state snapshot.

mod app;
mod input;
mod source;
mod ui;

use std::{
    env,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration as StdDuration,
};

use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use waste_view_core::{CARD_TYPE, CardRegistry, register};

use crate::app::App;
use crate::input::Action;

const USAGE: &str = "usage: waste-view-preview <card-config.yaml> <snapshot.yaml> [--markup]";
const LOG_FILE_ENV: &str = "WASTE_VIEW_LOG";

struct Args {
    config: PathBuf,
    snapshot: PathBuf,
    markup_only: bool,
}

fn main() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    init_logging()?;

    // Card registration + setup, as the dashboard host would do it
    let mut registry = CardRegistry::new();
    register(&mut registry)?;
    let card = registry.create(CARD_TYPE)?;

    let mut app = App::new(card, args.config, args.snapshot);
    app.load_config()?;
    app.reload_snapshot()?;

    if args.markup_only {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", app.markup())?;
        return Ok(());
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let outcome = match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => continue,
                Action::ReloadSnapshot => app.reload_snapshot(),
                Action::ReloadConfig => app.load_config().and_then(|()| app.push()),
            };

            app.error_message = outcome.err().map(|err| {
                warn!("{err:#}");
                format!("{err:#}")
            });
        }
    }

    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut markup_only = false;
    let mut paths = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--markup" => markup_only = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => paths.push(PathBuf::from(&arg)),
        }
    }

    let Ok([config, snapshot]) = <[PathBuf; 2]>::try_from(paths) else {
        bail!(USAGE);
    };

    Ok(Args {
        config,
        snapshot,
        markup_only,
    })
}

// Logs go to a file so they never fight the terminal UI for the screen.
fn init_logging() -> Result<()> {
    let Some(log_file) = env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let path = Path::new(&log_file);
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Result<Args> {
        parse_args(items.iter().map(|item| (*item).to_owned()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["card.yaml", "--markup", "states.json"]).unwrap();
        assert_eq!(parsed.config, PathBuf::from("card.yaml"));
        assert_eq!(parsed.snapshot, PathBuf::from("states.json"));
        assert!(parsed.markup_only);

        assert!(args(&["card.yaml"]).is_err());
        assert!(args(&["card.yaml", "states.json", "--verbose"]).is_err());
    }
}
