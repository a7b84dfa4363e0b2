//! # TimePilot CLI Entry Point
//!
//! Terminal study planner: fill in a profile, let the model build a weekly
//! schedule, then review it as summary cards, a stress chart and a timeline.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive planner (key from GEMINI_API_KEY or API_KEY)
//! timepilot
//!
//! # Start with the sample profile filled in
//! timepilot --demo
//!
//! # Pin the current-date annotation sent to the model
//! timepilot --today 2024-06-17
//!
//! # Print the response schema and the demo prompt, then exit
//! timepilot --debug
//! ```
//!
//! ## Architecture
//!
//! 1. **Form**: the profile is edited locally and validated on submit
//! 2. **Planner**: prompt + schema go to the model in a spawned task
//! 3. **Dashboard**: the parsed result is rendered as received
//! 4. **Feedback**: free text revises the current schedule in place
//!
//! Key bindings are listed in [`timepilot::ui::input`].

use timepilot::planner::{build_analysis_request, response_schema, GeminiClient, Planner, RequestSlot};
use timepilot::ui::config::Config;
use timepilot::ui::form::ProfileForm;
use timepilot::ui::{self, App, KeyOutcome, ThemeState};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// TimePilot - an AI study planner for the terminal
#[derive(Parser, Debug)]
#[command(name = "timepilot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan your study week with an AI schedule optimizer", long_about = None)]
struct Args {
    /// Model name (overrides the config file)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Base URL of the generative language API (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Date sent to the model as "today" instead of the local clock
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_today)]
    today: Option<String>,

    /// Prefill the form with a sample profile
    #[arg(long)]
    demo: bool,

    /// Print the response schema and the demo prompt, then exit
    #[arg(long)]
    debug: bool,

    /// Log at DEBUG level
    #[arg(short, long)]
    verbose: bool,

    /// Path to an alternative config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_today(value: &str) -> std::result::Result<String, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Log to a file under the data directory; the terminal belongs to the TUI.
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = directories::ProjectDirs::from("", "", "timepilot")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join("timepilot"))
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let log_file =
        fs::File::create(log_dir.join("timepilot.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

fn build_planner(config: &Config) -> Planner {
    let api_key = config.api_key();
    if api_key.is_none() {
        info!(env = %config.api_key_env, "no API key in environment; requests will fail");
    }
    let client = GeminiClient::new(api_key)
        .with_base_url(config.base_url.clone())
        .with_model(config.model.clone())
        .with_temperature(config.temperature);
    info!(model = %client.model(), "model client ready");
    Planner::new(Arc::new(client))
}

/// `--debug`: what would be sent for the sample profile, without the network.
fn print_debug(args: &Args) -> Result<()> {
    let schema =
        serde_json::to_string_pretty(&response_schema()).context("Failed to render schema")?;
    println!("=== Response Schema ===");
    println!("{}", schema);

    let profile = ProfileForm::demo()
        .to_profile(args.today.clone())
        .context("Failed to build the demo profile")?;
    let now = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let request =
        build_analysis_request(&profile, &now).context("Failed to build the analysis prompt")?;
    println!("\n=== Analysis Prompt (demo profile) ===");
    println!("{}", request.prompt);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    if args.debug {
        return print_debug(&args);
    }

    setup_logging(args.verbose)?;
    let config = load_config(&args)?;
    let planner = build_planner(&config);

    let form = if args.demo {
        ProfileForm::demo()
    } else {
        ProfileForm::new()
    };
    let mut app = App::new(ThemeState::new(config.theme_mode, config.accent))
        .with_form(form)
        .with_current_date(args.today.clone());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &planner, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    info!("exiting");
    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    planner: &Planner,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut slot = RequestSlot::new();

    loop {
        if let Some(completion) = slot.poll() {
            app.apply(completion);
        }

        let theme = app.theme.resolve();
        terminal
            .draw(|f| ui::render(f, app, &theme))
            .context("Failed to draw terminal UI")?;
        app.advance_tick();

        // Faster polling keeps the spinner moving while a request runs
        let poll_timeout = if app.is_busy() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(200)
        };

        let event = match event_reader.read_event(poll_timeout)? {
            Some(e) => e,
            None => continue,
        };

        if let Event::Key(key) = event {
            match ui::handle_key(app, key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Dispatch(request) => {
                    debug!(kind = ?request.kind(), "dispatching model request");
                    slot.start(request.kind(), request.run(planner.clone()));
                }
                KeyOutcome::Cancel => slot.cancel(),
            }
        }

        if app.should_quit {
            slot.cancel();
            return Ok(());
        }
    }
}
