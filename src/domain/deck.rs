use std::{collections::HashMap, fmt, ops::Index};

use tracing::debug;

/// A single term/definition pair filed under a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    /// The prompt shown during a quiz.
    pub term: String,
    /// The expected answer.
    pub definition: String,
    /// Free-text category. Only "CS Concepts" gets its own branch in the
    /// category tree; every other value is filed under "Misc".
    pub category: String,
}

impl Flashcard {
    /// Creates a new flashcard.
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            category: category.into(),
        }
    }
}

/// Position of a card in the [`Deck`].
///
/// Indices are 0-based and never reused, since cards cannot be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardIndex(usize);

impl CardIndex {
    /// Returns the raw 0-based position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for CardIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The append-only card store.
///
/// Cards are kept in creation order alongside a term lookup table. When two
/// cards share a term, the lookup table points at the most recent one.
#[derive(Debug, Default)]
pub struct Deck {
    cards: Vec<Flashcard>,
    index_by_term: HashMap<String, CardIndex>,
}

impl Deck {
    /// Appends a card and returns its index.
    pub fn add_card(&mut self, card: Flashcard) -> CardIndex {
        let index = CardIndex(self.cards.len());
        debug!(%index, term = %card.term, "appending card");
        self.index_by_term.insert(card.term.clone(), index);
        self.cards.push(card);
        index
    }

    /// Finds the most recently added card with exactly this term.
    #[must_use]
    pub fn find_by_term(&self, term: &str) -> Option<CardIndex> {
        self.index_by_term.get(term).copied()
    }

    /// Returns the card at `index`, if any.
    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&Flashcard> {
        self.cards.get(index.0)
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Every index in the deck, in creation order.
    pub fn indices(&self) -> impl Iterator<Item = CardIndex> + use<> {
        (0..self.cards.len()).map(CardIndex)
    }

    /// Iterates over cards together with their indices, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (CardIndex, &Flashcard)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (CardIndex(i), card))
    }
}

impl Index<CardIndex> for Deck {
    type Output = Flashcard;

    /// Indices handed out by the deck are always in bounds.
    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[index.0]
    }
}
