use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::model::{Flashcard, FlashcardId};
use crate::progress::Progress;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("a flashcard session needs at least one card")]
    Empty,

    #[error("flashcard {0} appears more than once")]
    DuplicateCard(FlashcardId),
}

impl DeckError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardIntent {
    Flip,
    Next,
    Previous,
    Shuffle,
    Reset,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Cyclic review over a deck of flashcards.
///
/// There is no terminal state: navigation wraps in both directions, and every
/// move turns the card back to its front. The canonical order given at
/// construction is kept so `reset` can restore it after any number of shuffles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardSession {
    canonical: Vec<Flashcard>,
    cards: Vec<Flashcard>,
    current: usize,
    flipped: bool,
    shuffled: bool,
}

impl FlashcardSession {
    /// # Errors
    ///
    /// Returns `DeckError::Empty` for an empty deck and `DeckError::DuplicateCard`
    /// when two cards share an id.
    pub fn new(cards: Vec<Flashcard>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id()) {
                return Err(DeckError::DuplicateCard(card.id()));
            }
        }

        Ok(Self {
            cards: cards.clone(),
            canonical: cards,
            current: 0,
            flipped: false,
            shuffled: false,
        })
    }

    /// Cards in their current (possibly shuffled) order.
    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn canonical_order(&self) -> &[Flashcard] {
        &self.canonical
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false: construction rejects empty decks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_card(&self) -> &Flashcard {
        &self.cards[self.current]
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// True between a `shuffle` and the next `reset`.
    #[must_use]
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    #[must_use]
    pub fn visible_face(&self) -> CardFace {
        if self.flipped {
            CardFace::Back
        } else {
            CardFace::Front
        }
    }

    #[must_use]
    pub fn visible_text(&self) -> &str {
        let card = self.current_card();
        match self.visible_face() {
            CardFace::Front => card.front(),
            CardFace::Back => card.back(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.current, self.cards.len())
    }

    /// Toggle between front and back. Returns the new flipped state.
    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    /// Move forward, wrapping from the last card to the first.
    pub fn next(&mut self) -> usize {
        self.flipped = false;
        self.current = (self.current + 1) % self.cards.len();
        self.current
    }

    /// Move backward, wrapping from the first card to the last.
    pub fn previous(&mut self) -> usize {
        let len = self.cards.len();
        self.flipped = false;
        self.current = (self.current + len - 1) % len;
        self.current
    }

    /// Replace the order with a fresh uniform permutation of the canonical deck.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Like [`shuffle`](Self::shuffle), drawing from the given generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order = self.canonical.clone();
        order.shuffle(rng);
        self.cards = order;
        self.current = 0;
        self.flipped = false;
        self.shuffled = true;
        log::debug!("shuffled {} flashcards", self.cards.len());
    }

    /// Restore canonical order and return to the first card's front.
    pub fn reset(&mut self) {
        self.cards.clone_from(&self.canonical);
        self.current = 0;
        self.flipped = false;
        self.shuffled = false;
    }

    pub fn apply(&mut self, intent: FlashcardIntent) {
        match intent {
            FlashcardIntent::Flip => {
                self.flip();
            }
            FlashcardIntent::Next => {
                self.next();
            }
            FlashcardIntent::Previous => {
                self.previous();
            }
            FlashcardIntent::Shuffle => self.shuffle(),
            FlashcardIntent::Reset => self.reset(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn deck(n: u64) -> FlashcardSession {
        let cards = (1..=n)
            .map(|id| {
                Flashcard::new(
                    FlashcardId::new(id),
                    format!("front {id}"),
                    format!("back {id}"),
                    "Biology",
                    Difficulty::Medium,
                )
                .unwrap()
            })
            .collect();
        FlashcardSession::new(cards).unwrap()
    }

    fn ids(cards: &[Flashcard]) -> Vec<u64> {
        cards.iter().map(|c| c.id().value()).collect()
    }

    #[test]
    fn empty_deck_is_rejected() {
        let err = FlashcardSession::new(Vec::new()).unwrap_err();
        assert_eq!(err, DeckError::Empty);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn duplicate_cards_are_rejected() {
        let card = deck(1).current_card().clone();
        let err = FlashcardSession::new(vec![card.clone(), card]).unwrap_err();
        assert_eq!(err, DeckError::DuplicateCard(FlashcardId::new(1)));
    }

    #[test]
    fn flip_toggles_visible_face() {
        let mut session = deck(2);
        assert_eq!(session.visible_text(), "front 1");
        assert!(session.flip());
        assert_eq!(session.visible_face(), CardFace::Back);
        assert_eq!(session.visible_text(), "back 1");
        assert!(!session.flip());
    }

    #[test]
    fn next_wraps_around_after_full_cycle() {
        let mut session = deck(5);
        for _ in 0..5 {
            session.next();
        }
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn previous_wraps_to_last_card() {
        let mut session = deck(5);
        assert_eq!(session.previous(), 4);
        assert_eq!(session.current_card().id(), FlashcardId::new(5));
    }

    #[test]
    fn next_and_previous_are_inverses() {
        let mut session = deck(4);
        session.next();
        let start = session.current_index();
        for k in 0..11 {
            for _ in 0..k {
                session.next();
            }
            for _ in 0..k {
                session.previous();
            }
            assert_eq!(session.current_index(), start);
        }
    }

    #[test]
    fn navigation_turns_card_to_front() {
        let mut session = deck(3);
        session.flip();
        session.next();
        assert!(!session.is_flipped());
        session.flip();
        session.previous();
        assert!(!session.is_flipped());
    }

    #[test]
    fn single_card_deck_stays_put() {
        let mut session = deck(1);
        assert_eq!(session.next(), 0);
        assert_eq!(session.previous(), 0);
    }

    #[test]
    fn shuffle_keeps_cards_and_resets_position() {
        let mut session = deck(5);
        session.next();
        session.flip();
        session.shuffle_with(&mut StdRng::seed_from_u64(7));

        assert_eq!(session.current_index(), 0);
        assert!(!session.is_flipped());
        assert!(session.is_shuffled());
        let mut shuffled = ids(session.cards());
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reset_after_shuffles_restores_canonical_order() {
        let mut session = deck(6);
        let mut rng = StdRng::seed_from_u64(42);
        session.shuffle_with(&mut rng);
        session.shuffle_with(&mut rng);
        session.next();
        session.flip();
        session.reset();

        assert_eq!(ids(session.cards()), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_flipped());
        assert!(!session.is_shuffled());
    }

    #[test]
    fn shuffle_permutes_canonical_not_current_order() {
        let mut a = deck(6);
        let mut b = deck(6);
        a.shuffle_with(&mut StdRng::seed_from_u64(1));
        a.shuffle_with(&mut StdRng::seed_from_u64(9));
        b.shuffle_with(&mut StdRng::seed_from_u64(9));
        assert_eq!(ids(a.cards()), ids(b.cards()));
    }

    #[test]
    fn apply_dispatches_intents() {
        let mut session = deck(3);
        session.apply(FlashcardIntent::Flip);
        assert!(session.is_flipped());
        session.apply(FlashcardIntent::Previous);
        assert_eq!(session.current_index(), 2);
        session.apply(FlashcardIntent::Next);
        assert_eq!(session.current_index(), 0);
        session.apply(FlashcardIntent::Shuffle);
        assert_eq!(session.current_index(), 0);
        session.apply(FlashcardIntent::Reset);
        assert_eq!(ids(session.cards()), vec![1, 2, 3]);
    }
}
