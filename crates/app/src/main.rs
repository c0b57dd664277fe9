use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use services::{
    ADVANCE_DELAY_MS, Clock, LeaderboardService, PracticeService, PracticeSession,
    ProgressService, SpeechError, SpeechOutput,
};
use spell_core::judge::Judgment;
use spell_core::model::{Difficulty, SessionConfig, SessionScope, WordEntry};
use spell_core::parse_word_list;
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTier { raw: String },
    InvalidLetter { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTier { raw } => write!(f, "invalid --tier value: {raw}"),
            ArgsError::InvalidLetter { raw } => write!(f, "invalid --letter value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- practice [--db <sqlite_url>] [--words <tsv_path>]");
    eprintln!("                               [--tier one|two|three|all|starred] [--letter <c>]");
    eprintln!("  cargo run -p app -- ranks");
    eprintln!("  cargo run -p app -- reset [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:spell.sqlite3");
    eprintln!("  --words words.tsv");
    eprintln!("  --tier all");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SPELL_DB_URL, SPELL_WORDS, SPELL_LEADERBOARD_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Practice,
    Ranks,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "practice" => Some(Self::Practice),
            "ranks" => Some(Self::Ranks),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    words_path: String,
    scope: SessionScope,
    letter: Option<char>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("SPELL_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://spell.sqlite3".into(), normalize_sqlite_url);
        let mut words_path = std::env::var("SPELL_WORDS")
            .ok()
            .unwrap_or_else(|| "words.tsv".into());
        let mut scope = SessionScope::All;
        let mut letter = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--words" => {
                    words_path = require_value(args, "--words")?;
                }
                "--tier" => {
                    let value = require_value(args, "--tier")?;
                    scope = parse_tier(&value)?;
                }
                "--letter" => {
                    let value = require_value(args, "--letter")?;
                    letter = Some(parse_letter(&value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            words_path,
            scope,
            letter,
        })
    }
}

fn parse_tier(value: &str) -> Result<SessionScope, ArgsError> {
    match value {
        "one" => Ok(SessionScope::Tier(Difficulty::OneBee)),
        "two" => Ok(SessionScope::Tier(Difficulty::TwoBee)),
        "three" => Ok(SessionScope::Tier(Difficulty::ThreeBee)),
        "all" => Ok(SessionScope::All),
        "starred" => Ok(SessionScope::Starred),
        _ => Err(ArgsError::InvalidTier { raw: value.into() }),
    }
}

fn parse_letter(value: &str) -> Result<char, ArgsError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(ArgsError::InvalidLetter { raw: value.into() }),
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

/// Terminal stand-in for a synthesizer: spoken lines go to stdout.
struct ConsoleSpeech;

#[async_trait]
impl SpeechOutput for ConsoleSpeech {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        println!("  (voice) {text}");
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}

fn load_words(path: &str) -> Result<Vec<WordEntry>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("could not read word list {path}: {err}"))?;
    Ok(parse_word_list(&text)?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: practice when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Practice,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Practice,
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

    match cmd {
        Command::Ranks => print_ranks().await,
        Command::Practice => {
            // Open + migrate SQLite in the binary glue so core/services stay pure.
            prepare_sqlite_file(&parsed.db_url)?;
            let storage = Storage::sqlite(&parsed.db_url).await?;
            let words = load_words(&parsed.words_path)?;
            let mut config = SessionConfig::new(parsed.scope);
            if let Some(letter) = parsed.letter {
                config = config.with_letter(letter);
            }
            practice(&storage, &words, config).await
        }
        Command::Reset => {
            prepare_sqlite_file(&parsed.db_url)?;
            let storage = Storage::sqlite(&parsed.db_url).await?;
            reset(&storage).await
        }
    }
}

async fn practice(
    storage: &Storage,
    words: &[WordEntry],
    config: SessionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::default();
    let service = PracticeService::new(clock, Arc::clone(&storage.state), Arc::new(ConsoleSpeech));

    if !service.has_consent().await {
        println!("First run: progress and settings are stored in a local SQLite file.");
        println!("Nothing is uploaded unless you configure a leaderboard yourself.");
        service.acknowledge_consent().await;
        println!();
    }

    let mut session = service.start_session(words, config).await;
    if session.is_empty() {
        println!("No words match the chosen filters.");
        return Ok(());
    }

    println!(
        "Spelling practice: {} words in scope, {} already solved.",
        session.words().len(),
        solved_in_scope(&session)
    );
    print_commands();
    announce_word(&service, &session).await?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt(&session)?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            match handle_command(&service, &mut session, command).await? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
            continue;
        }

        session.set_buffer(input)?;
        let outcome = match service.submit_answer(&mut session).await {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("  {err}");
                continue;
            }
        };

        match outcome.verdict {
            Judgment::Correct => {
                if outcome.newly_solved {
                    println!(
                        "  Correct! Streak {}, best {}.",
                        outcome.streak, outcome.best_streak
                    );
                } else {
                    println!(
                        "  Correct again. Streak {}, best {}.",
                        outcome.streak, outcome.best_streak
                    );
                }
                if let Some(token) = outcome.advance {
                    tokio::time::sleep(Duration::from_millis(ADVANCE_DELAY_MS)).await;
                    if service.advance_if_current(&mut session, token) {
                        announce_word(&service, &session).await?;
                    } else {
                        println!();
                        println!(
                            "End of the list: {} of {} words solved, best streak {}.",
                            solved_in_scope(&session),
                            session.words().len(),
                            session.progress().best_streak()
                        );
                        break;
                    }
                }
            }
            Judgment::Wrong => {
                println!("  Not quite.");
                if let Some(word) = session.current_word() {
                    println!("  It means: {}", word.definition());
                }
                println!("  Try :retry, :reveal, or :next.");
            }
        }
    }

    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

async fn handle_command(
    service: &PracticeService,
    session: &mut PracticeSession,
    command: &str,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("hint") => {
            if let Err(err) = service.play_hint(session).await {
                println!("  {err}");
            }
        }
        Some("say") => {
            service.pronounce_current(session).await?;
        }
        Some("def") => {
            service.reveal_definition(session)?;
            if let Some(word) = session.current_word() {
                println!("  It means: {}", word.definition());
            }
        }
        Some("reveal") => match service.reveal_word(session) {
            Ok(()) => {
                if let Some(word) = session.current_word() {
                    println!("  It is spelled \"{}\". Not counted as solved.", word.word());
                }
            }
            Err(err) => println!("  {err}"),
        },
        Some("retry") => {
            if let Err(err) = service.retry(session) {
                println!("  {err}");
            }
        }
        Some("star") => {
            let starred = service.toggle_star(session).await?;
            println!("  {}", if starred { "Starred." } else { "Unstarred." });
        }
        Some("next") => {
            let next = session.current_index() + 1;
            match service.activate(session, next).await {
                Ok(()) => announce_word(service, session).await?,
                Err(_) => println!("  Already at the last word."),
            }
        }
        Some("pick") => match parts.next().and_then(|raw| raw.parse::<usize>().ok()) {
            Some(number) if number >= 1 => match service.activate(session, number - 1).await {
                Ok(()) => announce_word(service, session).await?,
                Err(err) => println!("  {err}"),
            },
            _ => println!("  usage: :pick <number>"),
        },
        Some("theme") => {
            let theme = service.theme().await.toggled();
            service.set_theme(theme).await;
            println!("  Theme is now {}.", theme.as_str());
        }
        Some("quit") => return Ok(Flow::Quit),
        _ => print_commands(),
    }
    Ok(Flow::Continue)
}

fn print_commands() {
    println!("Commands: :hint :say :def :reveal :retry :star :next :pick <n> :theme :quit");
}

async fn announce_word(
    service: &PracticeService,
    session: &PracticeSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(word) = session.current_word() else {
        return Ok(());
    };
    println!();
    println!(
        "Word {} of {} ({})",
        session.current_index() + 1,
        session.words().len(),
        word.difficulty()
    );
    println!("  says     /{}/", word.pronunciation());
    println!("  class    {}", word.part_of_speech());
    println!("  origin   {}", word.origin());
    service.pronounce_current(session).await?;
    Ok(())
}

fn prompt(session: &PracticeSession) -> std::io::Result<()> {
    print!(
        "[{}/{}] spell> ",
        session.current_index() + 1,
        session.words().len()
    );
    std::io::stdout().flush()
}

fn solved_in_scope(session: &PracticeSession) -> usize {
    session
        .words()
        .iter()
        .filter(|word| session.progress().is_solved(&word.id()))
        .count()
}

async fn print_ranks() -> Result<(), Box<dyn std::error::Error>> {
    let service = LeaderboardService::from_env();
    let entries = match service.fetch_top().await {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("leaderboard unavailable: {err}");
            Vec::new()
        }
    };

    println!(
        "{:>3}  {:<20} {:>6} {:>8} {:>7}",
        "#", "player", "score", "time(s)", "streak"
    );
    for (index, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:>6} {:>8} {:>7}",
            index + 1,
            entry.username,
            entry.score,
            entry.time_taken_secs,
            entry.streak
        );
    }
    if entries.is_empty() {
        println!("  (no scores)");
    }
    Ok(())
}

async fn reset(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    print!("Erase solved words, stars, streaks, and consent? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    if answer.trim().eq_ignore_ascii_case("y") {
        let progress = ProgressService::new(Arc::clone(&storage.state));
        progress.reset().await?;
        println!("Progress cleared.");
    } else {
        println!("Left unchanged.");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer, printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
