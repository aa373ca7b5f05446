//! Domain models for flashcard study.
//!
//! This module contains the card store, the category tree built over it, the
//! relation index between cards sharing a category, and the quiz engine.

/// Flashcards and the append-only card store.
pub mod deck;
pub use deck::{CardIndex, Deck, Flashcard};

/// Two-level category tree.
pub mod category;
pub use category::{CategoryNode, CategoryTree, TreeLine};

mod relations;
pub use relations::RelationIndex;

/// Quiz queue, review stack and answer grading.
pub mod quiz;
pub use quiz::{Examiner, Grade, QuizEngine, QuizError, QuizTally, ReviewTally, Round};

mod config;
pub use config::{ColorChoice, Config, ConfigError};
