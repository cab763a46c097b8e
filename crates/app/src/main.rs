use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{Domain, INTERVIEW_DOMAINS, InterviewSession};
use services::{
    Advance, AuthService, AuthSession, CoachClient, CoachConfig, InterviewLoopService,
    SessionHistoryService, SignUp,
};
use storage::repository::Storage;

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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  prep register  [--db <sqlite_url>]");
    eprintln!("  prep interview [--db <sqlite_url>] [--api <base_url>]");
    eprintln!("  prep history   [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://prep.sqlite3");
    eprintln!("  --api {}", CoachConfig::DEFAULT_BASE_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL, PREP_API_BASE_URL, PREP_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Register,
    Interview,
    History,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "register" => Some(Self::Register),
            "interview" => Some(Self::Interview),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    api_base: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PREP_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://prep.sqlite3".into(), normalize_sqlite_url);
        let mut api_base = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api" => {
                    api_base = Some(require_value(args, "--api")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, api_base })
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }
    let trimmed = raw.trim().to_string();
    let path = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed.as_str());
    format!("sqlite://{path}")
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn pick<'a>(label: &str, options: impl Iterator<Item = &'a str> + Clone) -> io::Result<String> {
    loop {
        println!("{label}:");
        for (i, option) in options.clone().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        let raw = prompt("choice")?;
        if let Ok(n) = raw.parse::<usize>() {
            if let Some(option) = options.clone().nth(n.wrapping_sub(1)) {
                return Ok(option.to_string());
            }
        }
        println!("please enter a number from the list");
    }
}

async fn sign_in(auth: &AuthService) -> Result<AuthSession, Box<dyn std::error::Error>> {
    let email = prompt("email")?;
    let password = prompt("password")?;
    Ok(auth.sign_in(&email, &password).await?)
}

fn print_report(session: &InterviewSession) {
    let report = session.report();
    println!();
    println!(
        "Report for {} / {} ({})",
        session.domain(),
        session.specialization(),
        session.completed_at().format("%Y-%m-%d %H:%M")
    );
    println!("Overall score: {:.1}/10", report.overall_score());
    println!("{}", report.overall_feedback());
    for score in report.scores() {
        println!("  {} {:>2}/10  {}", score.metric, score.score, score.feedback);
    }
}

async fn run_interview(
    loop_svc: &InterviewLoopService,
    session_ctx: &AuthSession,
    clock: Clock,
) -> Result<(), Box<dyn std::error::Error>> {
    let domain_name = pick("Pick a domain", INTERVIEW_DOMAINS.iter().map(|d| d.name))?;
    let domain = Domain::find(&domain_name).ok_or("domain disappeared from the catalog")?;
    let specialization = pick(
        "Pick a specialization",
        domain.specializations.iter().copied(),
    )?;

    let mut flow = loop_svc.begin(&domain_name, &specialization).await?;

    loop {
        let progress = flow.progress();
        println!();
        println!(
            "Question {} of {} ({:.0}%)",
            progress.position,
            progress.total,
            progress.fraction * 100.0
        );
        println!("{}", flow.current_question());
        if !flow.draft().is_empty() {
            println!("(current answer: {})", flow.draft());
        }
        println!("type your answer, or :back to revisit the previous question");

        let line = prompt(">")?;
        if line == ":back" {
            if !flow.retreat()? {
                println!("already at the first question");
            }
            continue;
        }
        if !line.is_empty() {
            flow.set_draft(line);
        }
        if flow.advance(clock.now())? == Advance::Finished {
            break;
        }
    }

    println!();
    println!("Analyzing your answers...");
    let stored = loop_svc
        .finish(&flow, &domain_name, &specialization, Some(session_ctx))
        .await?;
    print_report(&stored);
    Ok(())
}

async fn run(argv: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = argv;
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Interview,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Interview,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let clock = Clock::default_clock();
    let auth = AuthService::new(clock, Arc::clone(&storage.users));
    let history = SessionHistoryService::new(clock, Arc::clone(&storage.sessions));

    match cmd {
        Command::Register => {
            let name = prompt("name")?;
            let email = prompt("email")?;
            let password = prompt("password")?;
            let session_ctx = auth.sign_up(SignUp {
                name,
                email,
                password,
            })
            .await?;
            println!("welcome, {}", session_ctx.user().name().unwrap_or("friend"));
            Ok(())
        }
        Command::Interview => {
            let session_ctx = sign_in(&auth).await?;
            let coach = Arc::new(match parsed.api_base {
                Some(base_url) => CoachClient::new(CoachConfig { base_url }),
                None => CoachClient::from_env(),
            });
            let loop_svc = InterviewLoopService::new(clock, coach.clone(), coach, history);
            run_interview(&loop_svc, &session_ctx, clock).await
        }
        Command::History => {
            let session_ctx = sign_in(&auth).await?;
            let sessions = history.sessions(Some(&session_ctx)).await?;
            if sessions.is_empty() {
                println!("no sessions yet");
                return Ok(());
            }
            for session in &sessions {
                print_report(session);
            }
            Ok(())
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PREP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(argv).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
