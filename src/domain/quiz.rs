use std::{collections::VecDeque, fmt, io};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{CardIndex, Deck, Flashcard, RelationIndex};

/// Answer that reveals the definition instead of attempting it.
///
/// This is checked before the definition, so a card whose definition is
/// literally "show" can never be answered correctly.
pub const REVEAL: &str = "show";

/// How an answer was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    /// The answer matched the definition, ignoring case.
    Correct,
    /// The user asked to see the definition.
    Revealed,
    /// The answer did not match.
    Incorrect,
}

impl Grade {
    /// Grades a free-text answer against a card's definition.
    ///
    /// Matching is exact after lowercasing both sides.
    #[must_use]
    pub fn assess(answer: &str, definition: &str) -> Self {
        let answer = answer.to_lowercase();
        if answer == REVEAL {
            Self::Revealed
        } else if answer == definition.to_lowercase() {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    /// Whether this grade counts towards the score.
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Which loop is asking the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// The main quiz over the prepared queue.
    Quiz,
    /// A second attempt at a card missed during the last quiz.
    Review,
}

/// The interactive side of a quiz.
///
/// The engine decides what to ask and in which order; an examiner presents
/// each card, collects the answer, and reports the outcome.
pub trait Examiner {
    /// Called once before the first question of a round.
    ///
    /// # Errors
    ///
    /// Returns an error if the round cannot be announced.
    fn begin(&mut self, round: Round) -> io::Result<()> {
        let _ = round;
        Ok(())
    }

    /// Presents a card and returns the raw answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn ask(&mut self, card: &Flashcard, round: Round) -> io::Result<String>;

    /// Reports the grade given to the last answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the feedback cannot be written.
    fn graded(&mut self, card: &Flashcard, grade: Grade, round: Round) -> io::Result<()>;

    /// Lists the cards sharing a category with the card just asked.
    ///
    /// Only called during [`Round::Quiz`].
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written.
    fn related(&mut self, related: &[&Flashcard]) -> io::Result<()>;
}

/// Errors that stop a quiz or review from running.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The quiz queue is empty.
    #[error("No cards in quiz. Prepare quiz first.")]
    EmptyQueue,
    /// No cards were missed in the last quiz.
    #[error("No missed cards.")]
    NothingToReview,
    /// The examiner failed to read or write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Outcome of a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizTally {
    /// Number of cards asked.
    pub asked: usize,
    /// Number of cards not answered correctly.
    pub missed: usize,
}

impl QuizTally {
    /// Whether every card was answered correctly.
    #[must_use]
    pub const fn is_perfect(&self) -> bool {
        self.missed == 0
    }
}

impl fmt::Display for QuizTally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_perfect() {
            write!(f, "All correct.")
        } else {
            write!(f, "{} incorrect. Use review option.", self.missed)
        }
    }
}

/// Outcome of a review pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewTally {
    /// Number of cards asked again.
    pub reviewed: usize,
    /// Number of those answered correctly this time.
    pub recalled: usize,
}

/// FIFO quiz queue plus the LIFO stack of cards missed in the last quiz.
#[derive(Debug, Default)]
pub struct QuizEngine {
    queue: VecDeque<CardIndex>,
    review: Vec<CardIndex>,
}

impl QuizEngine {
    /// Refills the queue with every card in deck order.
    ///
    /// Any cards still queued are discarded first.
    #[instrument(level = "debug", skip_all, fields(cards = deck.len()))]
    pub fn prepare(&mut self, deck: &Deck) {
        self.queue.clear();
        self.queue.extend(deck.indices());
    }

    /// Cards waiting to be asked, front first.
    pub fn queued(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.queue.iter().copied()
    }

    /// Cards missed during the last quiz, in the order they will be reviewed.
    pub fn missed(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.review.iter().rev().copied()
    }

    /// Drains the queue, asking each card once.
    ///
    /// Cards not answered correctly are pushed onto the review stack, which
    /// is emptied before the first question.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::EmptyQueue`] if nothing is queued, or
    /// [`QuizError::Io`] if the examiner fails. Cards already asked stay
    /// dequeued.
    pub fn run_quiz(
        &mut self,
        deck: &Deck,
        relations: &RelationIndex,
        examiner: &mut impl Examiner,
    ) -> Result<QuizTally, QuizError> {
        if self.queue.is_empty() {
            return Err(QuizError::EmptyQueue);
        }

        self.review.clear();
        examiner.begin(Round::Quiz)?;
        let mut asked = 0;

        while let Some(index) = self.queue.pop_front() {
            let card = &deck[index];
            let answer = examiner.ask(card, Round::Quiz)?;
            let grade = Grade::assess(&answer, &card.definition);
            debug!(%index, ?grade, "graded quiz answer");
            asked += 1;

            if !grade.is_correct() {
                self.review.push(index);
            }
            examiner.graded(card, grade, Round::Quiz)?;

            let related: Vec<_> = relations
                .related_of(index)
                .into_iter()
                .map(|other| &deck[other])
                .collect();
            examiner.related(&related)?;
        }

        Ok(QuizTally {
            asked,
            missed: self.review.len(),
        })
    }

    /// Asks every missed card once more, most recently missed first.
    ///
    /// The review stack is always drained; answers given here are not
    /// recorded anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NothingToReview`] if no cards were missed, or
    /// [`QuizError::Io`] if the examiner fails. The review stack is empty
    /// afterwards in both cases.
    pub fn review_missed(
        &mut self,
        deck: &Deck,
        examiner: &mut impl Examiner,
    ) -> Result<ReviewTally, QuizError> {
        if self.review.is_empty() {
            return Err(QuizError::NothingToReview);
        }

        // Taken up front so the stack ends empty even if the examiner fails.
        let missed = std::mem::take(&mut self.review);
        examiner.begin(Round::Review)?;
        let mut tally = ReviewTally {
            reviewed: 0,
            recalled: 0,
        };

        for index in missed.into_iter().rev() {
            let card = &deck[index];
            let answer = examiner.ask(card, Round::Review)?;
            let grade = Grade::assess(&answer, &card.definition);
            debug!(%index, ?grade, "graded review answer");

            tally.reviewed += 1;
            if grade.is_correct() {
                tally.recalled += 1;
            }
            examiner.graded(card, grade, Round::Review)?;
        }

        Ok(tally)
    }
}
