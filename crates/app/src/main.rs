use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use services::samples::{sample_flashcards, sample_questions};
use services::{AppServices, Clock, ContentConfig};
use tokio::io::BufReader;

mod content_files;
mod render;
mod shell;

use shell::{Shell, StudyContent};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
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
    eprintln!("  study [--questions <file.json>] [--cards <file.json>] [--delay-ms <ms>]");
    eprintln!();
    eprintln!("Without content files the built-in biology sample is used.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_QUESTIONS, STUDY_CARDS, STUDY_GENERATION_DELAY_MS, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    questions: Option<PathBuf>,
    cards: Option<PathBuf>,
    content: ContentConfig,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions = std::env::var_os("STUDY_QUESTIONS").map(PathBuf::from);
        let mut cards = std::env::var_os("STUDY_CARDS").map(PathBuf::from);
        let mut content = ContentConfig::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => questions = Some(require_value(args, "--questions")?.into()),
                "--cards" => cards = Some(require_value(args, "--cards")?.into()),
                "--delay-ms" => {
                    let value = require_value(args, "--delay-ms")?;
                    let ms: u64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                    content.generation_delay = Duration::from_millis(ms);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            questions,
            cards,
            content,
        })
    }
}

fn load_content(args: &Args) -> Result<StudyContent, Box<dyn std::error::Error>> {
    let questions = match &args.questions {
        Some(path) => content_files::load_questions(path)?,
        None => sample_questions()?,
    };
    let flashcards = match &args.cards {
        Some(path) => content_files::load_flashcards(path)?,
        None => sample_flashcards()?,
    };
    log::info!(
        "loaded {} questions and {} flashcards",
        questions.len(),
        flashcards.len()
    );
    Ok(StudyContent {
        questions,
        flashcards,
    })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let content = load_content(&args)?;
    let services = AppServices::in_memory(Clock::system(), &args.content);

    let input = BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(services, content, input, std::io::stdout());
    shell.run().await
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
