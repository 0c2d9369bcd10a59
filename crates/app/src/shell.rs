use std::io::Write;

use services::{AppServices, ContentSubmission, SAMPLE_CONTENT};
use study_core::model::{Flashcard, Question};
use study_core::session::{FlashcardIntent, QuizIntent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::render;

type ShellResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Content the shell starts quizzes and flashcard reviews from.
#[derive(Debug, Clone)]
pub struct StudyContent {
    pub questions: Vec<Question>,
    pub flashcards: Vec<Flashcard>,
}

const MENU_HELP: &str = "\
Commands:
  dashboard   show statistics and recent activity
  history     list past sessions, newest first
  quiz        start the quiz
  cards       review flashcards
  submit      add study content
  help        show this list
  quit        exit";

const QUIZ_HELP: &str =
    "Answer with a letter (a, b, …) or number. Enter/`n` confirms, `r` restarts, `leave` exits.";

/// Entries shown by the `history` command.
const HISTORY_LIMIT: u32 = 20;

const CARDS_HELP: &str = "f flip · n next · p previous · s shuffle · r reset · q done";

/// Line-oriented front-end: reads intents, forwards them to the services, prints state.
pub struct Shell<R, W> {
    services: AppServices,
    content: StudyContent,
    input: Lines<R>,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(services: AppServices, content: StudyContent, input: R, out: W) -> Self {
        Self {
            services,
            content,
            input: input.lines(),
            out,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    async fn prompt(&mut self, prompt: &str) -> ShellResult<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_owned()))
    }

    fn say(&mut self, text: &str) -> ShellResult<()> {
        writeln!(self.out, "{}", text.trim_end())?;
        Ok(())
    }

    /// Main menu loop. Returns on `quit` or end of input.
    pub async fn run(&mut self) -> ShellResult<()> {
        self.say(MENU_HELP)?;
        while let Some(line) = self.prompt("> ").await? {
            match line.to_ascii_lowercase().as_str() {
                "" => {}
                "dashboard" | "d" => self.dashboard().await?,
                "history" => self.history().await?,
                "quiz" => self.quiz().await?,
                "cards" | "c" => self.flashcards().await?,
                "submit" | "s" => self.submit().await?,
                "help" | "h" | "?" => self.say(MENU_HELP)?,
                "quit" | "exit" | "q" => break,
                other => self.say(&format!("unknown command: {other} (try `help`)"))?,
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates I/O and history failures.
    pub async fn dashboard(&mut self) -> ShellResult<()> {
        let dashboard = self.services.dashboard();
        let snapshot = dashboard.snapshot().await?;
        let text = render::dashboard(&snapshot, dashboard.now());
        self.say(&text)
    }

    /// # Errors
    ///
    /// Propagates I/O and history failures.
    pub async fn history(&mut self) -> ShellResult<()> {
        let dashboard = self.services.dashboard();
        let items = dashboard.recent_activity(HISTORY_LIMIT).await?;
        let text = render::history(&items, dashboard.now());
        self.say(&text)
    }

    /// # Errors
    ///
    /// Propagates I/O and history failures. Rejected intents are reported, not returned.
    pub async fn quiz(&mut self) -> ShellResult<()> {
        let study = self.services.study_loop();
        let mut run = match study.start_quiz(self.content.questions.clone()) {
            Ok(run) => run,
            Err(err) => return self.say(&format!("cannot start quiz: {err}")),
        };
        self.say(QUIZ_HELP)?;
        self.say(&render::question(run.session()))?;

        while let Some(line) = self.prompt("quiz> ").await? {
            let command = line.to_ascii_lowercase();
            let intent = match command.as_str() {
                "leave" | "exit" => break,
                "help" | "?" => {
                    self.say(QUIZ_HELP)?;
                    continue;
                }
                "r" | "reset" | "retry" => QuizIntent::Reset,
                "" | "n" | "next" => QuizIntent::Advance,
                other => match parse_option(other) {
                    Some(index) => QuizIntent::Select(index),
                    None => {
                        self.say(&format!("not an option: {other}"))?;
                        continue;
                    }
                },
            };

            match study.apply_quiz(&mut run, intent).await {
                Ok(_) => {}
                Err(err) if err.kind().is_some() => {
                    self.say(&err.to_string())?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            let text = if run.session().is_complete() {
                render::quiz_result(run.session())
            } else {
                render::question(run.session())
            };
            self.say(&text)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates I/O and history failures.
    pub async fn flashcards(&mut self) -> ShellResult<()> {
        let study = self.services.study_loop();
        let mut run = match study.start_flashcards(self.content.flashcards.clone()) {
            Ok(run) => run,
            Err(err) => return self.say(&format!("cannot start review: {err}")),
        };
        self.say(CARDS_HELP)?;
        self.say(&render::flashcard(run.session()))?;

        while let Some(line) = self.prompt("cards> ").await? {
            let intent = match line.to_ascii_lowercase().as_str() {
                "f" | "flip" | "" => FlashcardIntent::Flip,
                "n" | "next" => FlashcardIntent::Next,
                "p" | "prev" | "previous" => FlashcardIntent::Previous,
                "s" | "shuffle" => FlashcardIntent::Shuffle,
                "r" | "reset" => FlashcardIntent::Reset,
                "q" | "done" | "leave" => break,
                other => {
                    self.say(&format!("unknown command: {other}. {CARDS_HELP}"))?;
                    continue;
                }
            };
            study.apply_flashcards(&mut run, intent);
            self.say(&render::flashcard(run.session()))?;
        }

        study.finish_flashcards(&mut run).await?;
        self.say(&format!("Reviewed {} cards.", run.cards_seen()))
    }

    /// Collect a subject and content (terminated by a lone `.`; `sample` uses the
    /// built-in text) and submit it.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures. Validation and generation failures are reported.
    pub async fn submit(&mut self) -> ShellResult<()> {
        let Some(subject) = self.prompt("subject (optional): ").await? else {
            return Ok(());
        };
        self.say("Paste content, then a line with a single `.` (or type `sample`):")?;

        let mut lines = Vec::new();
        while let Some(line) = self.input.next_line().await? {
            if line.trim() == "." {
                break;
            }
            if lines.is_empty() && line.trim().eq_ignore_ascii_case("sample") {
                lines.push(SAMPLE_CONTENT.to_owned());
                break;
            }
            lines.push(line);
        }

        let submission = ContentSubmission::new(lines.join("\n")).with_subject(subject);
        self.say(&format!(
            "{} characters · minimum {} required. Processing…",
            submission.char_count(),
            services::MIN_CONTENT_CHARS
        ))?;

        match self.services.content().submit(submission).await {
            Ok(receipt) => self.say(&render::receipt(&receipt)),
            Err(err) => self.say(&format!("Content rejected: {err}")),
        }
    }
}

/// `a`/`A` → 0, `b` → 1 …; `1` → 0, `2` → 1 …
fn parse_option(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_lowercase() {
            return Some((c as u8 - b'a') as usize);
        }
    }
    match input.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}
