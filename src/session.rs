//! A single study session
//!
//! The [`Session`] owns the deck and every structure derived from it, and
//! keeps them consistent as cards are added.

use tracing::{info, instrument};

use crate::domain::{
    CardIndex, CategoryTree, Deck, Examiner, Flashcard, QuizEngine, QuizError, QuizTally,
    RelationIndex, ReviewTally, category::Render,
};

/// All state for one run of the study tool.
#[derive(Debug)]
pub struct Session {
    deck: Deck,
    tree: CategoryTree,
    relations: RelationIndex,
    quiz: QuizEngine,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a session with an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::with_deck(Deck::default())
    }

    /// Starts a session over an existing deck.
    ///
    /// The category tree and relation index are built from scratch.
    #[must_use]
    pub fn with_deck(deck: Deck) -> Self {
        let tree = CategoryTree::from_deck(&deck);
        let relations = RelationIndex::from_deck(&deck);
        Self {
            deck,
            tree,
            relations,
            quiz: QuizEngine::default(),
        }
    }

    /// Creates a card, files it in the category tree and recomputes the
    /// relation index.
    #[instrument(level = "debug", skip(self, definition))]
    pub fn add_card(&mut self, term: String, definition: String, category: String) -> CardIndex {
        let index = self
            .deck
            .add_card(Flashcard::new(term, definition, category));
        self.tree
            .place_new_card(index, &self.deck[index].category);
        self.relations.rebuild(&self.deck);
        info!(%index, "added flashcard");
        index
    }

    /// Looks up a card by its exact term.
    #[must_use]
    pub fn lookup(&self, term: &str) -> Option<Lookup<'_>> {
        let index = self.deck.find_by_term(term)?;
        Some(Lookup {
            index,
            card: &self.deck[index],
            related: self.related_cards(index),
        })
    }

    /// Cards sharing a category with `index`, in ascending index order.
    #[must_use]
    pub fn related_cards(&self, index: CardIndex) -> Vec<&Flashcard> {
        self.relations
            .related_of(index)
            .into_iter()
            .map(|other| &self.deck[other])
            .collect()
    }

    /// Queues every card for the next quiz.
    pub fn prepare_quiz(&mut self) {
        self.quiz.prepare(&self.deck);
    }

    /// Runs the prepared quiz.
    ///
    /// # Errors
    ///
    /// See [`QuizEngine::run_quiz`].
    pub fn run_quiz(&mut self, examiner: &mut impl Examiner) -> Result<QuizTally, QuizError> {
        self.quiz.run_quiz(&self.deck, &self.relations, examiner)
    }

    /// Re-asks the cards missed in the last quiz.
    ///
    /// # Errors
    ///
    /// See [`QuizEngine::review_missed`].
    pub fn review_missed(
        &mut self,
        examiner: &mut impl Examiner,
    ) -> Result<ReviewTally, QuizError> {
        self.quiz.review_missed(&self.deck, examiner)
    }

    /// Renders the category tree line by line.
    #[must_use]
    pub fn render_tree(&self) -> Render<'_> {
        self.tree.render(&self.deck)
    }

    /// The card store.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The category tree.
    #[must_use]
    pub const fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    /// The relation index.
    #[must_use]
    pub const fn relations(&self) -> &RelationIndex {
        &self.relations
    }

    /// The quiz queue and review stack.
    #[must_use]
    pub const fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }
}

/// A card found by [`Session::lookup`].
#[derive(Debug)]
pub struct Lookup<'a> {
    /// Position of the card in the deck.
    pub index: CardIndex,
    /// The card itself.
    pub card: &'a Flashcard,
    /// Cards sharing its category.
    pub related: Vec<&'a Flashcard>,
}
