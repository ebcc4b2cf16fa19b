//! Entry point: parse CLI, wire token persistence, dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use yahoo_fantasy::{
    cli::{Commands, YahooCli},
    commands::{
        api::{handle_raw, handle_user},
        auth::handle_auth,
        league::handle_league,
        print_json,
    },
    core::{load_tokens, save_token_payload, token_file_path},
    Config, TokenState, YahooFantasy,
};

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = YahooCli::parse();
    init_logging(app.verbose);

    let config = Config::from_env().context("loading configuration")?;
    let token_file = app.token_file.clone().unwrap_or_else(token_file_path);

    // Environment tokens win over the stored file.
    let stored = load_tokens(&token_file)
        .with_context(|| format!("reading {}", token_file.display()))?
        .unwrap_or_default();
    let tokens = TokenState::new(
        config.tokens.access_token.clone().or(stored.access_token),
        config.tokens.refresh_token.clone().or(stored.refresh_token),
    );

    let persist_to = token_file.clone();
    let yf = YahooFantasy::from_config(&config)
        .tokens(tokens)
        .on_token(move |payload| {
            if let Err(e) = save_token_payload(&persist_to, payload) {
                warn!(path = %persist_to.display(), error = %e, "failed to persist tokens");
            }
        })
        .build()?;

    let output = match app.command {
        Commands::Auth { cmd } => handle_auth(&yf, cmd).await?,
        Commands::League { cmd } => handle_league(&yf, cmd).await?,
        Commands::User { out } => handle_user(&yf, &out).await?,
        Commands::Raw { method, url, body } => {
            handle_raw(&yf, method.into(), &url, body.as_deref()).await?
        }
    };
    print_json(&output)?;

    Ok(())
}
