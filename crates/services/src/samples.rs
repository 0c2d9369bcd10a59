//! Built-in biology content used when no content files are supplied.

use study_core::model::{
    Difficulty, Flashcard, FlashcardDraft, FlashcardError, FlashcardId, Question, QuestionDraft,
    QuestionError, QuestionId,
};

const SUBJECT: &str = "Biology";

/// # Errors
///
/// Returns `QuestionError` only if the built-in data is malformed.
pub fn sample_questions() -> Result<Vec<Question>, QuestionError> {
    let raw: [(&str, [&str; 4], usize, &str); 3] = [
        (
            "What is the primary purpose of photosynthesis in plants?",
            [
                "To produce oxygen for animals",
                "To convert light energy into chemical energy",
                "To absorb carbon dioxide from the atmosphere",
                "To create chlorophyll in plant cells",
            ],
            1,
            "Photosynthesis primarily converts light energy into chemical energy (glucose), \
             which plants use for growth and metabolism.",
        ),
        (
            "Where does photosynthesis occur in plant cells?",
            [
                "In the nucleus",
                "In the mitochondria",
                "In the chloroplasts",
                "In the cell wall",
            ],
            2,
            "Photosynthesis occurs in the chloroplasts, which contain chlorophyll and other \
             pigments necessary for capturing light energy.",
        ),
        (
            "What are the two main stages of photosynthesis?",
            [
                "Respiration and transpiration",
                "Light-dependent reactions and Calvin cycle",
                "Absorption and emission",
                "Growth and reproduction",
            ],
            1,
            "The two main stages are the light-dependent reactions (which capture energy) and \
             the Calvin cycle (which produces glucose).",
        ),
    ];

    (1_u64..)
        .zip(raw)
        .map(|(id, (question, options, correct_answer, explanation))| {
            QuestionDraft {
                id: QuestionId::new(id),
                question: question.to_owned(),
                options: options.iter().map(|o| (*o).to_owned()).collect(),
                correct_answer,
                explanation: explanation.to_owned(),
                subject: SUBJECT.to_owned(),
            }
            .validate()
        })
        .collect()
}

/// # Errors
///
/// Returns `FlashcardError` only if the built-in data is malformed.
pub fn sample_flashcards() -> Result<Vec<Flashcard>, FlashcardError> {
    let raw: [(&str, &str, Difficulty); 5] = [
        (
            "What is photosynthesis?",
            "Photosynthesis is the process by which plants convert light energy into chemical \
             energy (glucose) using carbon dioxide and water, releasing oxygen as a byproduct.",
            Difficulty::Medium,
        ),
        (
            "Where does photosynthesis occur?",
            "Photosynthesis occurs in the chloroplasts of plant cells, specifically in \
             structures called thylakoids where chlorophyll captures light energy.",
            Difficulty::Easy,
        ),
        (
            "What are the two main stages of photosynthesis?",
            "The two main stages are: 1) Light-dependent reactions (occur in thylakoids) and \
             2) Calvin cycle or light-independent reactions (occur in the stroma).",
            Difficulty::Hard,
        ),
        (
            "What is the chemical equation for photosynthesis?",
            "6CO₂ + 6H₂O + light energy → C₆H₁₂O₆ + 6O₂ (Carbon dioxide + water + light \
             energy → glucose + oxygen)",
            Difficulty::Medium,
        ),
        (
            "What is chlorophyll and what does it do?",
            "Chlorophyll is a green pigment found in chloroplasts that absorbs light energy \
             (primarily red and blue wavelengths) and reflects green light, which is why plants \
             appear green.",
            Difficulty::Easy,
        ),
    ];

    (1_u64..)
        .zip(raw)
        .map(|(id, (front, back, difficulty))| {
            FlashcardDraft {
                id: FlashcardId::new(id),
                front: front.to_owned(),
                back: back.to_owned(),
                subject: SUBJECT.to_owned(),
                difficulty,
            }
            .validate()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_questions_have_expected_answers() {
        let questions = sample_questions().unwrap();
        let correct: Vec<_> = questions.iter().map(Question::correct_answer).collect();
        assert_eq!(correct, vec![1, 2, 1]);
        assert!(questions.iter().all(|q| q.subject() == "Biology"));
    }

    #[test]
    fn sample_flashcards_cover_all_difficulties() {
        let cards = sample_flashcards().unwrap();
        assert_eq!(cards.len(), 5);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(cards.iter().any(|c| c.difficulty() == difficulty));
        }
    }
}
