mod flashcard;
mod ids;
mod question;
mod record;

pub use ids::{FlashcardId, ParseIdError, QuestionId, SessionRecordId};

pub use flashcard::{Difficulty, Flashcard, FlashcardDraft, FlashcardError};
pub use question::{Question, QuestionDraft, QuestionError};
pub use record::{SessionKind, SessionRecord, SessionRecordError};
