//! The interactive menu loop
//!
//! Every line read from or written to the terminal goes through [`Console`].
//! The study logic itself lives in [`Session`].

use std::io::{self, BufRead, Write};

use flashcards::{Examiner, Flashcard, Grade, QuizError, Round, Session};
use tracing::{debug, info, instrument};

use super::{
    menu::{MenuChoice, Selection},
    terminal::Palette,
};

enum Flow {
    Continue,
    Exit,
}

/// Line-oriented console over any reader and writer.
pub struct Console<'a, R, W> {
    input: R,
    output: W,
    palette: Palette,
    title: &'a str,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub const fn new(input: R, output: W, palette: Palette, title: &'a str) -> Self {
        Self {
            input,
            output,
            palette,
            title,
        }
    }

    /// Shows the menu and dispatches choices until the user exits or input
    /// runs out.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails for any reason other than
    /// the end of input.
    pub fn run(&mut self, session: &mut Session) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                info!("input closed at menu");
                return Ok(());
            };

            let choice = match Selection::parse(&line) {
                Selection::Empty => continue,
                Selection::Invalid => {
                    writeln!(self.output, "{}", self.palette.warning("Invalid."))?;
                    continue;
                }
                Selection::Choice(choice) => choice,
            };

            match self.dispatch(choice, session) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    info!(?choice, "input closed mid-prompt");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[instrument(level = "debug", skip(self, session))]
    fn dispatch(&mut self, choice: MenuChoice, session: &mut Session) -> io::Result<Flow> {
        match choice {
            MenuChoice::ShowCategories => {
                for line in session.render_tree() {
                    writeln!(self.output, "{line}")?;
                }
            }
            MenuChoice::PrepareQuiz => {
                session.prepare_quiz();
                writeln!(self.output, "{}", self.palette.info("Quiz prepared."))?;
            }
            MenuChoice::StartQuiz => match session.run_quiz(self) {
                Ok(tally) => {
                    writeln!(self.output, "\nQuiz complete.")?;
                    let summary = tally.to_string();
                    let summary = if tally.is_perfect() {
                        self.palette.success(&summary)
                    } else {
                        self.palette.warning(&summary)
                    };
                    writeln!(self.output, "{summary}")?;
                }
                Err(e) => self.report(e)?,
            },
            MenuChoice::ReviewMissed => match session.review_missed(self) {
                Ok(tally) => {
                    debug!(?tally, "review finished");
                    writeln!(self.output, "Review finished.")?;
                }
                Err(e) => self.report(e)?,
            },
            MenuChoice::LookUp => self.look_up(session)?,
            MenuChoice::AddCard => self.add_card(session)?,
            MenuChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn look_up(&mut self, session: &Session) -> io::Result<()> {
        let term = self.prompt("Enter term: ")?;
        let Some(found) = session.lookup(&term) else {
            writeln!(self.output, "{}", self.palette.warning("Not found."))?;
            return Ok(());
        };

        writeln!(self.output, "Definition: {}", found.card.definition)?;
        writeln!(self.output, "Category: {}", found.card.category)?;
        self.related(&found.related)
    }

    fn add_card(&mut self, session: &mut Session) -> io::Result<()> {
        let term = self.prompt("\nEnter term:\n> ")?;
        let definition = self.prompt("Enter definition:\n> ")?;
        let category = self.prompt("Enter category:\n> ")?;

        session.add_card(term, definition, category);
        writeln!(self.output, "{}", self.palette.success("Flashcard added."))
    }

    /// Prints informational quiz errors; I/O errors are passed on.
    fn report(&mut self, error: QuizError) -> io::Result<()> {
        match error {
            QuizError::Io(e) => Err(e),
            other => writeln!(self.output, "{other}"),
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== {} ===", self.title)?;
        for (digit, _, label) in MenuChoice::ENTRIES {
            writeln!(self.output, "{digit}. {label}")?;
        }
        write!(self.output, "Choice: ")?;
        self.output.flush()
    }

    /// Writes a prompt and reads the answer.
    ///
    /// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
    fn prompt(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }

    /// Reads one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Examiner for Console<'_, R, W> {
    fn begin(&mut self, round: Round) -> io::Result<()> {
        match round {
            Round::Quiz => writeln!(self.output, "\n--- Quiz Started ---"),
            Round::Review => writeln!(self.output, "\nReview Missed"),
        }
    }

    fn ask(&mut self, card: &Flashcard, round: Round) -> io::Result<String> {
        if round == Round::Review {
            writeln!(self.output, "\nReview: {}", card.term)?;
        }
        writeln!(self.output, "\nTerm: {}", card.term)?;
        self.prompt("Enter definition (or 'show' if you don't know):\n> ")
    }

    fn graded(&mut self, card: &Flashcard, grade: Grade, round: Round) -> io::Result<()> {
        match grade {
            Grade::Correct => writeln!(self.output, "{}", self.palette.success("Correct!"))?,
            Grade::Revealed => writeln!(self.output, "Correct: {}", card.definition)?,
            Grade::Incorrect => {
                writeln!(self.output, "{}", self.palette.warning("Incorrect."))?;
                writeln!(self.output, "Correct: {}", card.definition)?;
            }
        }
        if round == Round::Review && !grade.is_correct() {
            writeln!(self.output, "Try to remember this.")?;
        }
        Ok(())
    }

    fn related(&mut self, related: &[&Flashcard]) -> io::Result<()> {
        if related.is_empty() {
            return writeln!(self.output, "  No related cards.");
        }
        writeln!(self.output, "  Related cards:")?;
        for card in related {
            let line = format!("    - {} ({})", card.term, card.category);
            writeln!(self.output, "{}", self.palette.dim(&line))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const MENU: &str = "\n=== Test ===\n1. Show categories\n2. Prepare quiz\n3. Start quiz\n4. \
                        Review missed\n5. Look up term\n6. Add flashcard\n0. Exit\nChoice: ";

    fn run(session: &mut Session, input: &str) -> String {
        let mut output = Vec::new();
        Console::new(Cursor::new(input), &mut output, Palette::plain(), "Test")
            .run(session)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn with_stack_card() -> Session {
        let mut session = Session::new();
        session.add_card(
            "Stack".to_string(),
            "LIFO structure".to_string(),
            "CS Concepts".to_string(),
        );
        session
    }

    #[test]
    fn exit_prints_menu_once() {
        let output = run(&mut Session::new(), "0\n");
        assert_eq!(output, MENU);
    }

    #[test]
    fn end_of_input_at_menu_exits_cleanly() {
        let output = run(&mut Session::new(), "");
        assert_eq!(output, MENU);
    }

    #[test]
    fn empty_line_reprompts_silently() {
        let output = run(&mut Session::new(), "\n0\n");
        assert_eq!(output, MENU.repeat(2));
    }

    #[test]
    fn unrecognised_input_is_invalid() {
        let output = run(&mut Session::new(), "x\n7\n0\n");
        assert_eq!(output, format!("{MENU}Invalid.\n{MENU}Invalid.\n{MENU}"));
    }

    #[test]
    fn add_card_prompts_for_each_field() {
        let mut session = Session::new();
        let output = run(&mut session, "6\nStack\nLIFO structure\nCS Concepts\n0\n");

        assert!(output.contains(
            "\nEnter term:\n> Enter definition:\n> Enter category:\n> Flashcard added.\n"
        ));
        let index = session.deck().find_by_term("Stack").unwrap();
        assert_eq!(session.deck()[index].definition, "LIFO structure");
        assert_eq!(session.deck()[index].category, "CS Concepts");
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let mut session = Session::new();
        run(&mut session, "6\r\nStack\r\nLIFO structure\r\nCS Concepts\r\n0\r\n");

        let index = session.deck().find_by_term("Stack").unwrap();
        assert_eq!(session.deck()[index].category, "CS Concepts");
    }

    #[test]
    fn end_of_input_mid_prompt_exits_without_adding() {
        let mut session = Session::new();
        run(&mut session, "6\nStack\n");

        assert!(session.deck().is_empty());
    }

    #[test]
    fn show_categories_renders_tree() {
        let mut session = with_stack_card();
        session.add_card("Paris".into(), "Capital of France".into(), "Geography".into());
        let output = run(&mut session, "1\n0\n");

        assert!(output.contains(
            "Choice: - All Topics\n  - CS Concepts\n    * Stack\n  - Misc\n    * Paris\n"
        ));
    }

    #[test]
    fn quiz_without_prepare_reports_no_cards() {
        let output = run(&mut with_stack_card(), "3\n0\n");

        assert!(output.contains("No cards in quiz. Prepare quiz first.\n"));
        assert!(!output.contains("Quiz Started"));
    }

    #[test]
    fn correct_answer_scores_all_correct() {
        let mut session = with_stack_card();
        let output = run(&mut session, "2\n3\nlifo structure\n0\n");

        let expected = "Quiz prepared.\n".to_string()
            + MENU
            + "\n--- Quiz Started ---\n\nTerm: Stack\nEnter definition (or 'show' if you don't \
               know):\n> Correct!\n  No related cards.\n\nQuiz complete.\nAll correct.\n";
        assert!(output.contains(&expected), "{output}");
        assert_eq!(session.quiz().missed().count(), 0);
    }

    #[test]
    fn show_reveals_and_counts_as_incorrect() {
        let mut session = with_stack_card();
        let output = run(&mut session, "2\n3\nshow\n0\n");

        assert!(output.contains("> Correct: LIFO structure\n"));
        assert!(output.contains("1 incorrect. Use review option.\n"));
        assert_eq!(session.quiz().missed().count(), 1);
    }

    #[test]
    fn wrong_answer_shows_definition() {
        let output = run(&mut with_stack_card(), "2\n3\nFIFO\n0\n");
        assert!(output.contains("> Incorrect.\nCorrect: LIFO structure\n"));
    }

    #[test]
    fn quiz_lists_related_cards() {
        let mut session = with_stack_card();
        session.add_card("Queue".into(), "FIFO structure".into(), "CS Concepts".into());
        let output = run(&mut session, "2\n3\nLIFO structure\nFIFO structure\n0\n");

        assert!(output.contains("Correct!\n  Related cards:\n    - Queue (CS Concepts)\n"));
        assert!(output.contains("Correct!\n  Related cards:\n    - Stack (CS Concepts)\n"));
    }

    #[test]
    fn review_reasks_missed_cards_once() {
        let mut session = with_stack_card();
        let output = run(&mut session, "2\n3\nshow\n4\nstill wrong\n4\n0\n");

        assert!(output.contains(
            "\nReview Missed\n\nReview: Stack\n\nTerm: Stack\nEnter definition (or 'show' if you \
             don't know):\n> Incorrect.\nCorrect: LIFO structure\nTry to remember \
             this.\nReview finished.\n"
        ));
        assert!(output.contains("No missed cards.\n"));
        assert_eq!(session.quiz().missed().count(), 0);
    }

    #[test]
    fn review_correct_answer_needs_no_reminder() {
        let output = run(&mut with_stack_card(), "2\n3\nshow\n4\nLIFO STRUCTURE\n0\n");

        assert!(output.contains("> Correct!\nReview finished.\n"));
        assert!(!output.contains("Try to remember this."));
    }

    #[test]
    fn lookup_unknown_term_prints_only_not_found() {
        let output = run(&mut with_stack_card(), "5\nUnknown\n0\n");

        let expected = format!("{MENU}Enter term: Not found.\n{MENU}");
        assert!(output.ends_with(&expected), "{output}");
    }

    #[test]
    fn lookup_prints_definition_category_and_related() {
        let mut session = with_stack_card();
        session.add_card("Queue".into(), "FIFO structure".into(), "CS Concepts".into());
        let output = run(&mut session, "5\nQueue\n0\n");

        assert!(output.contains(
            "Enter term: Definition: FIFO structure\nCategory: CS Concepts\n  Related \
             cards:\n    - Stack (CS Concepts)\n"
        ));
    }

    #[test]
    fn trailing_text_after_choice_is_ignored() {
        let output = run(&mut with_stack_card(), "2 now please\n0\n");
        assert!(output.contains("Quiz prepared.\n"));
    }
}
