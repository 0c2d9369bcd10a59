//! Session engines: pure, synchronous state machines driven by user intents.

mod flashcards;
mod quiz;

pub use flashcards::{CardFace, DeckError, FlashcardIntent, FlashcardSession};
pub use quiz::{
    AnswerStatus, OptionMark, QuizAdvance, QuizError, QuizEvent, QuizIntent, QuizPhase,
    QuizSession, ScoreBand,
};

/// `part / whole` as a percentage, rounded half up. Zero when `whole` is zero.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    let pct = (part * 100 + whole / 2) / whole;
    u8::try_from(pct).unwrap_or(100)
}
