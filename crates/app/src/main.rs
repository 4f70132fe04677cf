use std::fmt;
use std::io::{self, Write as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use services::{
    ApiClient, ApiConfig, AuthGate, AuthService, CatalogService, Clock, GateState, Listing,
    Navigator, QuizWorkflow, SessionController,
};
use storage::repository::CredentialStore;
use storage::sqlite::SqliteStore;
use vocab_core::model::{Topic, TopicId};

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

struct Args {
    base_url: Option<String>,
    db_url: String,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut base_url = None;
        let mut db_url = "sqlite://vocab-client.db".to_string();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    base_url = Some(require_value(&mut args, "--base-url")?);
                }
                "--db" => {
                    db_url = require_value(&mut args, "--db")?;
                }
                other => return Err(ArgsError::UnknownArg(other.to_string())),
            }
        }

        Ok(Self { base_url, db_url })
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("usage: app [--base-url URL] [--db SQLITE_URL]");
    eprintln!("  --base-url   backend base URL (default: $VOCAB_API_BASE_URL)");
    eprintln!("  --db         credential store location (default: sqlite://vocab-client.db)");
}

/// Terminal-side navigation: "redirecting to login" means the main loop
/// falls back to the login screen on its next iteration.
struct TerminalNavigator {
    login_requested: AtomicBool,
}

impl TerminalNavigator {
    fn new() -> Self {
        Self {
            login_requested: AtomicBool::new(false),
        }
    }

    fn take_login_request(&self) -> bool {
        self.login_requested.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl Navigator for TerminalNavigator {
    async fn to_login(&self) {
        println!("\nYour session has expired. Please log in again.");
        self.login_requested.store(true, Ordering::SeqCst);
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

struct Client {
    auth: AuthService,
    gate: AuthGate,
    catalog: CatalogService,
    quiz: QuizWorkflow,
    navigator: Arc<TerminalNavigator>,
    store: Arc<dyn CredentialStore>,
}

impl Client {
    async fn login_screen(&self) -> io::Result<bool> {
        loop {
            println!("\n[1] Log in  [2] Register  [q] Quit");
            match prompt("choice")?.as_str() {
                "1" => {
                    let username = prompt("username")?;
                    let password = prompt("password")?;
                    match self.auth.login(&username, &password).await {
                        Ok(outcome) => {
                            let name = outcome.user.map_or(username, |u| u.username);
                            println!("Welcome back, {name}!");
                            return Ok(true);
                        }
                        Err(err) => println!("Login failed: {err}"),
                    }
                }
                "2" => {
                    let username = prompt("username")?;
                    let email = prompt("email")?;
                    let password = prompt("password")?;
                    let confirm = prompt("confirm password")?;
                    match self.auth.register(&username, &email, &password, &confirm).await {
                        Ok(user) => {
                            println!("Account created. Welcome, {}!", user.username);
                            return Ok(true);
                        }
                        Err(err) => println!("Registration failed: {err}"),
                    }
                }
                "q" => return Ok(false),
                _ => println!("Unrecognized choice."),
            }
        }
    }

    async fn choose_topic(&self) -> io::Result<Option<Topic>> {
        let listing = self.catalog.topics().await;
        let topics: Vec<Topic> = match &listing {
            Listing::Populated(topics) => topics.clone(),
            Listing::Empty => {
                println!("No topics yet.");
                return Ok(None);
            }
            Listing::Unavailable(message) => {
                println!("{message} Showing sample topics; choose [r] to retry.");
                CatalogService::sample_topics()
            }
        };

        for (index, topic) in topics.iter().enumerate() {
            println!(
                "[{}] {} — {} ({} words)",
                index + 1,
                topic.name,
                topic.description,
                topic.word_count
            );
        }
        let choice = prompt("topic (number, or r to retry)")?;
        if choice == "r" {
            return Box::pin(self.choose_topic()).await;
        }
        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| topics.get(i).cloned());
        Ok(selected)
    }

    async fn words_screen(&self, topic: TopicId) -> io::Result<()> {
        match self.catalog.words(topic).await {
            Listing::Populated(words) => {
                for word in words {
                    let phonetic = if word.phonetic.is_empty() {
                        String::new()
                    } else {
                        format!(" /{}/", word.phonetic)
                    };
                    println!("  {}{} — {}", word.word, phonetic, word.meaning);
                }
            }
            Listing::Empty => println!("This topic has no words yet."),
            Listing::Unavailable(message) => println!("{message} Try again later."),
        }
        Ok(())
    }

    async fn quiz_screen(&self, topic: TopicId) -> io::Result<()> {
        let mut session = match self.quiz.start(topic).await {
            Ok(session) => session,
            Err(err) => {
                println!("Could not start the quiz: {err}");
                return Ok(());
            }
        };

        loop {
            while !session.is_complete() {
                let Some(question) = session.current_question() else {
                    break;
                };
                println!(
                    "\nQuestion {}/{}: {}",
                    session.current_index() + 1,
                    session.total(),
                    question.prompt()
                );
                let options: Vec<String> = question.options().to_vec();
                for (index, option) in options.iter().enumerate() {
                    println!("  [{}] {}", index + 1, option);
                }

                let choice = prompt("answer")?;
                let selected = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i).cloned());
                let Some(selected) = selected else {
                    println!("Pick one of the numbered options.");
                    continue;
                };

                match self.quiz.answer_current(&mut session, &selected) {
                    Ok(true) => println!("Correct!"),
                    Ok(false) => println!("Not quite."),
                    Err(err) => println!("{err}"),
                }
                self.quiz.advance(&mut session).await;
            }

            match session.summary() {
                Ok(summary) => println!(
                    "\nDone! Score {}/{} in {}s.",
                    summary.score(),
                    summary.total_questions(),
                    summary.elapsed_secs()
                ),
                Err(err) => println!("\nDone! ({err})"),
            }

            if prompt("retry? [y/N]")? == "y" {
                self.quiz.retry(&mut session);
            } else {
                return Ok(());
            }
        }
    }

    async fn leaderboard_screen(&self, topic: Option<TopicId>) -> io::Result<()> {
        match self.catalog.leaderboard(topic).await {
            Listing::Populated(entries) => {
                for entry in entries {
                    println!(
                        "  #{:<3} {:<20} score {:<6} tests {:<4} avg {:.1}",
                        entry.rank,
                        entry.username,
                        entry.total_score,
                        entry.tests_completed,
                        entry.average_score
                    );
                }
            }
            Listing::Empty => println!("Nobody on the leaderboard yet."),
            Listing::Unavailable(message) => println!("{message} Try again later."),
        }
        Ok(())
    }

    /// One pass through the protected menu. Returns false to quit.
    async fn menu(&self) -> io::Result<bool> {
        // Every protected screen entry re-checks the session.
        match self.gate.resolve().await {
            GateState::Authenticated(user) => {
                println!("\nSigned in as {}.", user.username);
            }
            GateState::Checking | GateState::Unauthenticated => {
                return self.login_screen().await;
            }
        }

        println!("[1] Topics  [2] Words  [3] Quiz  [4] Leaderboard  [5] Log out  [q] Quit");
        match prompt("choice")?.as_str() {
            "1" => {
                let _ = self.choose_topic().await?;
            }
            "2" => {
                if let Some(topic) = self.choose_topic().await? {
                    self.words_screen(topic.id).await?;
                }
            }
            "3" => {
                if let Some(topic) = self.choose_topic().await? {
                    self.quiz_screen(topic.id).await?;
                }
            }
            "4" => {
                let scope = prompt("topic id (blank for overall)")?;
                let topic = scope.parse::<u64>().ok().map(TopicId::new);
                self.leaderboard_screen(topic).await?;
            }
            "5" => {
                if let Err(err) = self.auth.logout().await {
                    println!("Logout failed: {err}");
                } else {
                    println!("Logged out.");
                }
            }
            "q" => return Ok(false),
            _ => println!("Unrecognized choice."),
        }

        // A 401/403 during any of the screens lands back at login.
        if self.navigator.take_login_request() {
            let _ = self.store.clear().await;
        }
        Ok(true)
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let args = Args::parse(raw.into_iter()).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    prepare_sqlite_file(&args.db_url)?;
    let store: Arc<dyn CredentialStore> = Arc::new(SqliteStore::open(&args.db_url).await?);

    let config = match args.base_url {
        Some(base_url) => ApiConfig::with_base_url(base_url),
        None => ApiConfig::from_env(),
    };

    let navigator = Arc::new(TerminalNavigator::new());
    let controller = Arc::new(SessionController::new(store.clone(), navigator.clone()));
    let api = Arc::new(ApiClient::new(&config, store.clone(), controller));

    let clock = Clock::default_clock();
    let client = Client {
        auth: AuthService::new(api.clone(), store.clone()),
        gate: AuthGate::new(api.clone(), store.clone()),
        catalog: CatalogService::new(api.clone()),
        quiz: QuizWorkflow::new(clock, api),
        navigator,
        store,
    };

    println!("Vocabulary trainer — {}", config.base_url);
    while client.menu().await? {}

    Ok(())
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

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
