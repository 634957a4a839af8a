use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use induction_core::model::{ProfileDraft, Quiz};
use services::{AppServices, Clock, LookupService, Submission, SubmissionService};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn lookup(&self) -> Arc<LookupService> {
        self.services.lookup()
    }

    fn submission(&self) -> Arc<SubmissionService> {
        self.services.submission()
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

struct Args {
    db_url: Option<String>,
    name: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>] [--name <visitor>]");
    eprintln!();
    eprintln!("Without --db the remote attempt store is used.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  INDUCTION_DB_URL, INDUCTION_STORE_URL, INDUCTION_STORE_KEY, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("INDUCTION_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(normalize_sqlite_url);
        let mut name = "Demo Visitor".to_string();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(normalize_sqlite_url(value));
                }
                "--name" => name = require_value(args, "--name")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, name })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn ensure_parent_dir(db_url: &str) -> std::io::Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    match std::path::Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

async fn open_storage(args: &Args) -> Result<Storage, Box<dyn std::error::Error>> {
    match args.db_url.as_deref() {
        Some(db_url) => {
            ensure_parent_dir(db_url)?;
            tracing::info!(db_url, "using sqlite attempt store");
            Ok(Storage::sqlite(db_url).await?)
        }
        None => Ok(Storage::rest_from_env_or_unconfigured()),
    }
}

/// Record one full-marks attempt so the lookup path has data to find.
async fn seed_demo_attempt(
    services: &AppServices,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ProfileDraft {
        name: name.to_string(),
        company: "Demo Company".into(),
        phone: "0400000000".into(),
        host_name: "Front Desk".into(),
    }
    .validate()?;
    let quiz = Quiz::site_induction();
    let answers = quiz
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| quiz.grade(index, question.correct_answer()))
        .collect::<Result<Vec<_>, _>>()?;
    let score = quiz.score(&answers);
    let attempt = services
        .submission()
        .submit(&Submission {
            profile,
            answers,
            score: score.correct(),
            passed: score.passed(),
        })
        .await?;
    println!("seeded attempt {} for {}", attempt.id(), attempt.name());
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?;

    let clock = Clock::system();
    let storage = open_storage(&parsed).await?;
    let services = AppServices::from_storage(&storage, clock);

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services, clock });
            let context = build_app_context(&app);

            // tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Site Induction")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => seed_demo_attempt(&services, &parsed.name).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "induction app failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
