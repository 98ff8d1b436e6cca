//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `attention_core` linkage (`ping`).
//! - Inspect the persisted worker state and run one real check cycle against
//!   a remote origin, printing the notification instead of showing it.

use async_trait::async_trait;
use attention_core::db::open_db;
use attention_core::{
    default_log_level, init_logging, Account, HostCapabilities, HttpChangeSource,
    HttpCredentials, NotificationIntent, NotificationPresenter, NotificationWorker, NotifierConfig,
    PresentationError, RoutingError, SqliteStateRepository, StateRepository, WindowClient,
    WindowClients,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "attention_cli", version, about = "Attention notification engine smoke tool")]
struct Cli {
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print core ping and version.
    Ping,
    /// Print the persisted worker state for an origin.
    State {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        origin: String,
    },
    /// Run one check cycle and print the resulting notification.
    ///
    /// Without `--username` the query is sent anonymously, which the remote
    /// usually answers with no attention-set changes.
    Check {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        account: String,
        /// JSON config file; `--origin` is used when absent.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        origin: Option<String>,
        /// Sends basic auth to the `/a/` endpoints; the password is read from
        /// the environment variable named by `--password-env`.
        #[arg(long)]
        username: Option<String>,
        #[arg(long, default_value = "ATTENTION_HTTP_PASSWORD")]
        password_env: String,
    },
}

/// Prints notifications to stdout as JSON lines.
struct StdoutPresenter;

#[async_trait]
impl NotificationPresenter for StdoutPresenter {
    async fn show_notification(
        &self,
        intent: &NotificationIntent,
    ) -> Result<(), PresentationError> {
        let line = serde_json::json!({
            "kind": intent.kind,
            "title": intent.title,
            "body": intent.body,
            "tag": intent.tag,
            "data": intent.data(),
        });
        println!("{line}");
        Ok(())
    }
}

/// No window system: nothing is open and nothing can be opened.
struct HeadlessWindows;

#[async_trait]
impl WindowClients for HeadlessWindows {
    async fn match_all_windows(&self) -> Result<Vec<WindowClient>, RoutingError> {
        Ok(Vec::new())
    }

    async fn open_window(&self, url: &str) -> Result<Option<WindowClient>, RoutingError> {
        Err(RoutingError::Open(format!("headless host cannot open {url}")))
    }

    async fn focus(&self, client: &WindowClient) -> Result<(), RoutingError> {
        Err(RoutingError::Focus(format!(
            "headless host cannot focus {}",
            client.id
        )))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Ping => {
            println!("attention_core ping={}", attention_core::ping());
            println!("attention_core version={}", attention_core::core_version());
            Ok(())
        }
        Command::State { db, origin } => {
            let config = NotifierConfig::for_origin(origin);
            config.validate().map_err(|err| err.to_string())?;
            let repo = open_state(&db, &config)?;
            let state = repo
                .load_state()
                .map_err(|err| err.to_string())?
                .unwrap_or_default();
            let json = serde_json::to_string(&state).map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
        Command::Check {
            db,
            account,
            config,
            origin,
            username,
            password_env,
        } => {
            let config = load_config(config, origin)?;
            let state = Arc::new(open_state(&db, &config)?);
            let changes = Arc::new(change_source(&config, username, &password_env)?);
            let host = HostCapabilities::with_defaults(
                &config,
                state,
                changes,
                Arc::new(StdoutPresenter),
                Arc::new(HeadlessWindows),
            )
            .map_err(|err| err.to_string())?;

            let worker = NotificationWorker::new(&config, host);
            let outcome = worker.engine().run_cycle(&Account::with_id(account)).await;
            info!(
                "event=cli_check module=cli status=ok outcome={}",
                outcome.as_str()
            );
            println!("outcome={}", outcome.as_str());
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>, origin: Option<String>) -> Result<NotifierConfig, String> {
    let mut config = match path {
        Some(path) => NotifierConfig::from_json_file(path).map_err(|err| err.to_string())?,
        None => NotifierConfig::default(),
    };
    if let Some(origin) = origin {
        config.origin = origin;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn change_source(
    config: &NotifierConfig,
    username: Option<String>,
    password_env: &str,
) -> Result<HttpChangeSource, String> {
    let source = match username {
        Some(username) => {
            let password = std::env::var(password_env)
                .map_err(|_| format!("`{password_env}` must hold the HTTP password"))?;
            HttpChangeSource::with_credentials(config, HttpCredentials { username, password })
        }
        None => HttpChangeSource::new(config),
    };
    source.map_err(|err| err.to_string())
}

fn open_state(db: &Path, config: &NotifierConfig) -> Result<SqliteStateRepository, String> {
    let conn = open_db(db).map_err(|err| err.to_string())?;
    Ok(SqliteStateRepository::new(conn, config.origin_key()))
}
