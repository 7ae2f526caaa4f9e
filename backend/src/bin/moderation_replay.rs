//! Replay a scripted sequence of moderation commands and print user snapshots.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use review_backend::ModerationSettings;
use review_backend::domain::ports::{
    AccountCommand, CastVoteRequest, FileReportRequest, FixtureCredentialVerifier,
    ModerationCommand, ModerationQuery, PushNotificationRequest, RegisterRequest,
};
use review_backend::domain::{AccountService, ModerationService, ReportCategory, User};
use review_backend::outbound::persistence::InMemoryUserRepository;
use serde::Deserialize;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `moderation-replay` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "moderation-replay",
    about = "Replay moderation commands against an in-memory user store",
    version
)]
struct CliArgs {
    /// Path to the JSON replay script.
    #[arg(long = "script", value_name = "path")]
    script: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayScript {
    #[serde(default)]
    users: Vec<RegisterRequest>,
    #[serde(default)]
    commands: Vec<ReplayCommand>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ReplayCommand {
    Vote(CastVoteRequest),
    Report(FileReportRequest),
    Notify(PushNotificationRequest),
}

type Moderation = ModerationService<InMemoryUserRepository>;

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ModerationSettings::load_from_iter([OsString::from("moderation-replay")])
        .map_err(|error| io::Error::other(format!("load moderation settings: {error}")))?;
    let script = read_script(&args.script)?;

    let users = Arc::new(InMemoryUserRepository::new());
    let moderation = ModerationService::new(
        Arc::clone(&users),
        settings.engine(),
        Arc::new(DefaultClock),
    )
    .with_max_conflict_retries(settings.max_conflict_retries());

    for line in replay(&users, &moderation, script).await? {
        println!("{line}");
    }
    Ok(())
}

/// Register the script's users, apply its commands, and return one JSON
/// snapshot line per stored user.
async fn replay(
    users: &Arc<InMemoryUserRepository>,
    moderation: &Moderation,
    script: ReplayScript,
) -> io::Result<Vec<String>> {
    let accounts = AccountService::new(Arc::clone(users), Arc::new(FixtureCredentialVerifier));
    let mut ids_by_username = HashMap::new();
    for request in script.users {
        let user = accounts
            .register(request)
            .await
            .map_err(|error| io::Error::other(format!("register user: {error}")))?;
        ids_by_username.insert(user.username().to_string(), user.id().to_string());
    }

    let mut failed = 0_usize;
    for (index, command) in script.commands.into_iter().enumerate() {
        if let Err(error) = apply(moderation, &ids_by_username, command).await {
            failed += 1;
            warn!(command = index, code = ?error.code(), %error, "command rejected");
        }
    }
    info!(failed, users = ids_by_username.len(), "replay finished");

    let mut lines = Vec::new();
    for user in users.all().await {
        lines.push(snapshot(moderation, &user).await?);
    }
    Ok(lines)
}

async fn apply(
    moderation: &Moderation,
    ids_by_username: &HashMap<String, String>,
    command: ReplayCommand,
) -> Result<(), review_backend::domain::DomainError> {
    match command {
        ReplayCommand::Vote(mut request) => {
            // Voters named by username vote under their user id.
            if let Some(id) = ids_by_username.get(&request.voter_id) {
                request.voter_id.clone_from(id);
            }
            moderation.cast_vote(request).await.map(drop)
        }
        ReplayCommand::Report(request) => moderation.file_report(request).await.map(drop),
        ReplayCommand::Notify(request) => moderation.push_notification(request).await.map(drop),
    }
}

async fn snapshot(moderation: &Moderation, user: &User) -> io::Result<String> {
    let username = user.username().as_ref();
    let score = moderation
        .score(username)
        .await
        .map_err(|error| io::Error::other(format!("score {username}: {error}")))?;
    let reports: serde_json::Map<String, serde_json::Value> = ReportCategory::ALL
        .iter()
        .map(|category| {
            (
                category.as_str().to_owned(),
                json!(user.report_status().count_of(*category)),
            )
        })
        .collect();
    let value = json!({
        "username": username,
        "score": score,
        "banned": user.report_status().is_banned(),
        "reports": reports,
        "notifications": user.notifications().len(),
    });
    serde_json::to_string(&value).map_err(io::Error::other)
}

fn read_script(path: &Path) -> io::Result<ReplayScript> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "script path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open script directory '{}': {error}",
            parent.display()
        ))
    })?;
    let mut file = directory.open(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("open script '{}': {error}", path.display()))
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|error| {
        io::Error::other(format!("read script '{}': {error}", path.display()))
    })?;
    parse_script(&contents).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("parse script '{}': {error}", path.display()),
        )
    })
}

fn parse_script(contents: &str) -> serde_json::Result<ReplayScript> {
    serde_json::from_str(contents)
}
