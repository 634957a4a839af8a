use std::fmt;

use chrono::{DateTime, Duration, Utc};
use induction_core::model::{NewAttempt, Quiz, validate_visitor_name};
use storage::repository::{AttemptRepository, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    name: String,
    company: String,
    host_name: String,
    count: u32,
    spacing_days: i64,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidName { raw: String, reason: String },
    InvalidCount { raw: String },
    InvalidSpacing { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidName { raw, reason } => {
                write!(f, "invalid --name value `{raw}`: {reason}")
            }
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidSpacing { raw } => {
                write!(f, "invalid --spacing-days value: {raw}")
            }
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("INDUCTION_DB_URL").unwrap_or_else(|_| "sqlite:induction.sqlite3".into());
        let mut name = std::env::var("INDUCTION_SEED_NAME").unwrap_or_else(|_| "Jane Doe".into());
        let mut company = "Acme Foods".to_string();
        let mut host_name = "Sam Host".to_string();
        let mut count = std::env::var("INDUCTION_SEED_COUNT")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(3);
        let mut spacing_days: i64 = 75;
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--name" => {
                    name = require_value(&mut args, "--name")?;
                }
                "--company" => {
                    company = require_value(&mut args, "--company")?;
                }
                "--host" => {
                    host_name = require_value(&mut args, "--host")?;
                }
                "--count" => {
                    let value = require_value(&mut args, "--count")?;
                    count = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidCount { raw: value.clone() })?;
                }
                "--spacing-days" => {
                    let value = require_value(&mut args, "--spacing-days")?;
                    spacing_days = value
                        .parse::<i64>()
                        .ok()
                        .filter(|days| *days >= 0)
                        .ok_or_else(|| ArgsError::InvalidSpacing { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let name = validate_visitor_name(&name).map_err(|e| ArgsError::InvalidName {
            raw: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            db_url,
            name,
            company,
            host_name,
            count,
            spacing_days,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:induction.sqlite3)");
    eprintln!("  --name <name>             Visitor name to seed (default: Jane Doe)");
    eprintln!("  --company <name>          Company recorded on each attempt");
    eprintln!("  --host <name>             Host recorded on each attempt");
    eprintln!("  --count <n>               Number of attempts to append (default: 3)");
    eprintln!("  --spacing-days <n>        Days between attempts (default: 75)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  INDUCTION_DB_URL, INDUCTION_SEED_NAME, INDUCTION_SEED_COUNT");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);
    let total = u32::try_from(Quiz::site_induction().len())?;

    // Oldest first; only the newest attempt is a full pass.
    for i in (0..args.count).rev() {
        let passed = i == 0;
        let completed_at =
            now - Duration::days(i64::from(i) * args.spacing_days) - Duration::minutes(30);
        let attempt = NewAttempt {
            name: args.name.clone(),
            company: args.company.clone(),
            phone: Some("0400000000".into()),
            host_name: args.host_name.clone(),
            score: if passed { total } else { total.saturating_sub(2) },
            passed,
            completed_at,
        };
        let stored = storage.attempts.insert_attempt(attempt).await?;
        println!(
            "attempt {} at {} ({})",
            stored.id(),
            stored.completed_at().to_rfc3339(),
            if stored.passed() { "passed" } else { "failed" }
        );
    }

    println!(
        "Seeded {} attempts for {} into {}",
        args.count, args.name, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
