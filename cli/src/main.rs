//! CLI entrypoint for labdash
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use labdash_application::{
    ApiGateway, CredentialStore, GuardPageUseCase, LoadDashboardUseCase, LoginUseCase,
    RiskDashboardState, RiskDashboardUseCase, RiskStatsPoller, StreamChatUseCase,
};
use labdash_infrastructure::{
    ConfigLoader, FileConfig, FileCredentialStore, HttpGateway, JsonlConversationLogger,
    SessionNavigator, default_storage_path,
};
use labdash_presentation::{
    ChatExit, ChatRepl, Cli, Command, ConsoleFormatter, RiskPager, SESSION_EXPIRED_MESSAGE,
};
use rustyline::DefaultEditor;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file)?;

    info!("Starting labdash");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run `labdash --help` for usage.");
    };

    // === Dependency Injection ===
    let storage_path = config
        .storage
        .resolved_path()
        .or_else(default_storage_path)
        .context("Could not determine a storage location; set storage.path")?;
    debug!("Credential storage: {}", storage_path.display());

    let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(storage_path));

    run_command(command, &config, store).await
}

/// Wire the gateway for `command` and run it.
///
/// Protected pages without a stored credential fail before any request is
/// sent.
async fn run_command(
    command: Command,
    config: &FileConfig,
    store: Arc<dyn CredentialStore>,
) -> Result<()> {
    let navigator = Arc::new(SessionNavigator::new(command.page().path()));

    let guard = GuardPageUseCase::new(store.clone(), navigator.clone());
    if guard.check(command.page()).is_redirect() {
        bail!("Not logged in. Run `labdash login` first.");
    }

    let gateway: Arc<dyn ApiGateway> = Arc::new(HttpGateway::new(
        config.server.base_url.clone(),
        config.server.connect_timeout(),
        store.clone(),
        navigator.clone(),
    )?);

    match command {
        Command::Login { username } => {
            let username = match username {
                Some(name) => name,
                None => DefaultEditor::new()?.readline("Username: ")?,
            };
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .interact()?;

            LoginUseCase::new(gateway, store)
                .execute(username.trim(), &password)
                .await?;
            println!("Logged in as {}", username.trim());
        }

        Command::Logout => {
            LoginUseCase::new(gateway, store).logout()?;
            println!("Logged out");
        }

        Command::Dashboard { json } => {
            let dashboard = LoadDashboardUseCase::new(gateway).execute().await;
            if dashboard.session_expired() || navigator.login_requested() {
                bail!(SESSION_EXPIRED_MESSAGE);
            }

            if json {
                println!("{}", ConsoleFormatter::format_json(&dashboard));
            } else {
                println!("{}", ConsoleFormatter::format_dashboard(&dashboard));
            }
        }

        Command::Risk {
            risk_level,
            limit,
            watch,
            json,
        } => {
            let mut dashboard_config = config.dashboard.to_dashboard_config();
            if let Some(level) = risk_level {
                dashboard_config = dashboard_config.with_risk_level(level);
            }
            if let Some(limit) = limit {
                dashboard_config = dashboard_config.with_risk_limit(limit);
            }

            let use_case = RiskDashboardUseCase::new(gateway.clone());
            let mut state = RiskDashboardState::new(&dashboard_config)?;
            use_case.load_all(&mut state).await;
            if state.session_expired() || navigator.login_requested() {
                bail!(SESSION_EXPIRED_MESSAGE);
            }

            if json {
                println!("{}", ConsoleFormatter::format_risk_json(&state));
                return Ok(());
            }

            let cancel = CancellationToken::new();
            let (poller, mut updates) =
                RiskStatsPoller::new(use_case.clone(), dashboard_config.refresh_interval)
                    .spawn(cancel.clone());

            let exit = if watch {
                println!("{}", ConsoleFormatter::format_risk_dashboard(&state));
                println!(
                    "Refreshing every {}s, Ctrl-C to stop",
                    dashboard_config.refresh_interval.as_secs()
                );
                loop {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => break ChatExit::Quit,
                        stats = updates.recv() => {
                            let Some(stats) = stats else {
                                break ChatExit::Quit;
                            };
                            if stats.session_expired() {
                                break ChatExit::SessionExpired;
                            }
                            println!("{}", ConsoleFormatter::format_risk_stats(&stats));
                        }
                    }
                }
            } else {
                let chat = chat_repl(config, gateway.clone());
                let mut pager = RiskPager::new(use_case, state)
                    .with_chat(chat)
                    .with_updates(updates);
                pager.run().await?
            };

            cancel.cancel();
            let _ = poller.await;

            if exit == ChatExit::SessionExpired {
                bail!(SESSION_EXPIRED_MESSAGE);
            }
        }

        Command::Chat => {
            if chat_repl(config, gateway).run().await? == ChatExit::SessionExpired {
                bail!(SESSION_EXPIRED_MESSAGE);
            }
        }

        Command::Ask { question } => {
            let repl = chat_repl(config, gateway);
            if repl.ask(&question).await == Some(ChatExit::SessionExpired) {
                bail!(SESSION_EXPIRED_MESSAGE);
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// Verbosity maps to the filter level. With `log_file`, output also goes to
/// a daily rolling file in the data directory; the returned guard flushes it.
fn init_logging(verbose: u8, log_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if !log_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let log_dir = dirs::data_dir()
        .map(|d| d.join("labdash").join("logs"))
        .context("Could not determine a log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "labdash.log"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr.and(file_writer))
        .init();

    Ok(Some(guard))
}

fn chat_repl(config: &FileConfig, gateway: Arc<dyn ApiGateway>) -> ChatRepl {
    let mut use_case = StreamChatUseCase::new(gateway);
    if let Some(path) = config.chat.transcript_path()
        && let Some(logger) = JsonlConversationLogger::new(&path)
    {
        info!("Writing chat transcript to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    let mut repl = ChatRepl::new(use_case).with_status(config.chat.show_status);
    if let Some(path) = config.chat.history_path() {
        repl = repl.with_history_path(Some(path));
    }
    repl
}

#[cfg(test)]
mod tests {
    use super::*;
    use labdash_application::InMemoryCredentialStore;
    use wiremock::MockServer;

    #[tokio::test]
    async fn protected_commands_without_login_send_nothing() {
        let server = MockServer::start().await;
        let mut config = FileConfig::default();
        config.server.base_url = server.uri();

        let commands = [
            Command::Dashboard { json: false },
            Command::Risk {
                risk_level: None,
                limit: None,
                watch: false,
                json: true,
            },
            Command::Ask {
                question: "any critical potassium?".to_string(),
            },
        ];
        for command in commands {
            let store = Arc::new(InMemoryCredentialStore::new());
            let err = run_command(command, &config, store).await.unwrap_err();
            assert!(err.to_string().contains("Not logged in"));
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
