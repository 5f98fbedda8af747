use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use hookchat_core::{ChatSession, Config, Sender};

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "hookchat", version)]
#[command(about = "Chat with a webhook-backed AI agent from the terminal")]
struct Cli {
    /// Webhook URL (overrides HOOKCHAT_WEBHOOK_URL and the config file)
    #[arg(long, global = true)]
    url: Option<String>,
    /// User id sent with every message
    #[arg(long, global = true)]
    user_id: Option<String>,
    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply
    Send {
        /// Message text
        message: String,
    },
    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Save the webhook URL to the config file
    SetUrl {
        url: String,
    },
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?.with_env();
    if let Some(url) = &cli.url {
        config.webhook_url = Some(url.clone());
    }
    if let Some(user_id) = &cli.user_id {
        config.user_id = Some(user_id.clone());
    }

    match cli.command {
        None => {
            let _guard = logging::init_file(cli.debug)?;
            run_tui(&config).await
        }
        Some(Commands::Send { message }) => {
            logging::init_stderr(cli.debug);
            send_once(&config, message).await
        }
        Some(Commands::Config { action }) => {
            logging::init_stderr(cli.debug);
            match action {
                ConfigAction::SetUrl { url } => {
                    Config::save_webhook_url(&url)?;
                    println!("Saved webhook URL: {}", url);
                }
                ConfigAction::Show => println!("{}", serde_json::to_string_pretty(&config)?),
            }
            Ok(())
        }
    }
}

async fn run_tui(config: &Config) -> Result<()> {
    let session = ChatSession::from_config(config)?;
    let mut app = App::new(session, config.title());
    tracing::info!(url = %app.session.webhook_url(), "starting chat");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    let tx = events.sender();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event, &tx),
            None => break,
        }
    }

    Ok(())
}

async fn send_once(config: &Config, message: String) -> Result<()> {
    let mut session = ChatSession::from_config(config)?;
    session.draft_mut().set(message);

    let Some(reply) = session.send().await else {
        bail!("Nothing to send: the message is empty");
    };

    if reply.sender == Sender::System {
        eprintln!("{}", reply.text);
        std::process::exit(1);
    }
    println!("{}", reply.text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use hookchat_core::config::SET_URL_COMMAND;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_url_hint_is_a_real_command() {
        let url = "http://localhost:5678/webhook/chat";
        let hint = SET_URL_COMMAND.replace("<URL>", url);

        let cli = Cli::try_parse_from(hint.split_whitespace()).unwrap();
        match cli.command {
            Some(Commands::Config { action: ConfigAction::SetUrl { url: parsed } }) => {
                assert_eq!(parsed, url)
            }
            _ => panic!("expected `config set-url`"),
        }
    }

    #[test]
    fn test_config_requires_an_action() {
        assert!(Cli::try_parse_from(["hookchat", "config", "--url", "http://x"]).is_err());
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["hookchat", "--url", "http://x", "--debug", "send", "hi"])
            .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://x"));
        assert!(cli.debug);
        assert!(matches!(cli.command, Some(Commands::Send { message }) if message == "hi"));
    }
}
