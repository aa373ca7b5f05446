//! In-memory flashcard study tool
//!
//! Cards are grouped into a fixed two-level category tree, quizzed in
//! creation order, and missed cards can be reviewed afterwards.

pub mod domain;
pub use domain::{
    CardIndex, CategoryNode, CategoryTree, Config, Deck, Examiner, Flashcard, Grade, QuizEngine,
    QuizError, QuizTally, RelationIndex, ReviewTally, Round,
};

mod session;
pub use session::{Lookup, Session};
