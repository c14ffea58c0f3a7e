// ABOUTME: Main entry point for Chain-in-a-Box TUI application

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    Terminal,
};
use std::{
    io,
    process::ExitCode,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::info;

use chain_box::api::{NodeApi, NodeClient};
use chain_box::app::{App, EventHandler, NotificationCenter};
use chain_box::components::LayoutComponent;
use chain_box::{cli, config};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let (config, command) = config::load()?;
    setup_logging()?;

    let client = NodeClient::new(&config.node_url, config.timeout)?;
    let api: Arc<dyn NodeApi> = Arc::new(client);
    info!("Using node at {}", config.node_url);

    if let Some(command) = command {
        return Ok(cli::run_command(api, &command).await);
    }

    setup_panic_handler();

    let notifications = NotificationCenter::with_limits(
        config.notification_capacity,
        config.notification_lifetime,
    );
    let mut app = App::new(api, notifications, config.node_url);
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout)?;

    Ok(ExitCode::SUCCESS)
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    // Check if we're in a proper terminal
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, layout);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    layout: &mut LayoutComponent,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        // Polling blocks this worker thread only; requests and expiry timers run on the runtime's other workers
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                    // Dispatch right away instead of waiting for the next tick
                    app.tick();
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() -> Result<()> {
    use tracing_subscriber::prelude::*;
    use std::fs::OpenOptions;

    let log_dir = config::app_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // Create log file with timestamp
    let log_file = log_dir.join(format!("chain-box-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false) // No ANSI colors in log file
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chain_box=info".into())
        )
        .init();

    Ok(())
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        let _ = disable_raw_mode();
        let _ = execute!(
            std::io::stderr(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
