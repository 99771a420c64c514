//! taskdeck - a terminal client for company project and task management.

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use taskdeck::api::{ApiClient, KeyringTokenStore, TokenStore};
use taskdeck::app::App;
use taskdeck::config::{Config, Settings};
use taskdeck::error::AppError;
use taskdeck::events::EventHandler;
use taskdeck::logging;
use taskdeck::session::Session;
use taskdeck::tasks::create_task_channel;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Terminal client for company project and task management.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration profile to use.
    #[arg(short, long)]
    profile: Option<String>,

    /// Override the profile's API URL.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether a session is stored and who it belongs to.
    Status,
    /// Sign out and forget the stored tokens.
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let (config, startup_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => {
            warn!("Failed to load config, using default: {}", e);
            (Config::default(), Some(AppError::from(e)))
        }
    };

    let mut profile = config.resolve_profile(cli.profile.as_deref())?.clone();
    if let Some(api_url) = cli.api_url {
        profile.api_url = api_url;
    }
    profile.validate()?;
    info!(profile = %profile.name, api_url = %profile.api_url, "Using profile");

    let tokens: Arc<dyn TokenStore> = Arc::new(KeyringTokenStore::new(profile.name.clone()));
    let client = ApiClient::from_profile(&profile, &config.settings, tokens)?;
    let session = Session::new(client);

    let result = match cli.command {
        Some(Command::Status) => status(session, &profile.name).await,
        Some(Command::Logout) => logout(session).await,
        None => run_tui(session, &profile.name, &config.settings, startup_error).await,
    };

    if let Err(e) = &result {
        error!("Exiting with error: {:#}", e);
    }
    logging::shutdown();
    result
}

async fn status(mut session: Session, profile: &str) -> anyhow::Result<()> {
    if !session.is_authenticated() {
        println!("Not signed in (profile '{}').", profile);
        return Ok(());
    }
    match session.current_user().await {
        Ok(user) => println!(
            "Signed in as {} ({}, {}) on profile '{}'.",
            user.username,
            user.display_name(),
            user.role.label(),
            profile
        ),
        Err(e) => println!(
            "A token is stored for profile '{}' but could not be verified: {}",
            profile,
            e.display_message("unknown error")
        ),
    }
    Ok(())
}

async fn logout(mut session: Session) -> anyhow::Result<()> {
    session.logout().await.context("failed to clear stored tokens")?;
    println!("Signed out.");
    Ok(())
}

async fn run_tui(
    session: Session,
    profile: &str,
    settings: &Settings,
    startup_error: Option<AppError>,
) -> anyhow::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run_loop(&mut terminal, session, profile, settings, startup_error).await;
    restore_terminal().context("failed to restore terminal")?;
    terminal.show_cursor()?;
    result
}

async fn run_loop(
    terminal: &mut Tui,
    session: Session,
    profile: &str,
    settings: &Settings,
    startup_error: Option<AppError>,
) -> anyhow::Result<()> {
    let (mut results, spawner) = create_task_channel();
    let events = EventHandler::from_settings(settings);
    let mut app = App::new(session, profile);
    if let Some(e) = startup_error {
        app.show_error(&e);
    }

    while !app.should_quit() {
        for request in app.take_requests() {
            spawner.spawn(app.session().client(), request);
        }

        terminal.draw(|frame| app.view(frame))?;

        // Polling blocks for up to one tick; keep the runtime's other
        // workers free for the spawned requests.
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);

        while let Ok(message) = results.try_recv() {
            app.handle_api_message(message);
        }
    }

    info!("Event loop finished");
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Restore the terminal before the default hook prints the panic.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(e) = restore_terminal() {
            eprintln!("Failed to restore terminal: {}", e);
        }
        original(info);
    }));
}
