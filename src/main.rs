mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use duoroom::app::App;
use duoroom::build_info;
use duoroom::config::Config;
use duoroom::feedback::TerminalBell;
use duoroom::logging;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Input poll timeout; also the redraw cadence
const POLL_INTERVAL_MS: u64 = 50;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Duo Room - chess, rock-paper-scissors and radio in your terminal\n");
                println!("Usage: duoroom [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Settings are read from ~/.duoroom/config.json.");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'duoroom --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load();
    match logging::init(&config.log_level) {
        Ok(path) => info!(log = %path.display(), "{}", build_info::version_line()),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    let mut app = App::new(&config);
    let mut feedback = TerminalBell::stdout(config.sound);
    let mut rng = rand::thread_rng();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut feedback, &mut rng);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        warn!(error = %e, "terminal loop failed");
    }
    remember_theme(config, &app);
    info!("session ended");
    result
}

/// Keep the theme picked in the lobby for the next session.
fn remember_theme(mut config: Config, app: &App) {
    if config.theme == app.room.theme {
        return;
    }
    config.theme = app.room.theme;
    if let Err(e) = config.save() {
        warn!(error = %e, "could not save settings");
    }
}

fn run<R: rand::Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    feedback: &mut TerminalBell<io::Stdout>,
    rng: &mut R,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                let screen = app.room.current_kind();
                if let Some(input) = input::map_key(key, screen, app.is_composing()) {
                    app.handle(input, feedback);
                }
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick, rng, feedback);
        last_tick = now;
    }
    Ok(())
}
