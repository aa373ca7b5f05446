//! Main menu parsing

/// An action on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowCategories,
    PrepareQuiz,
    StartQuiz,
    ReviewMissed,
    LookUp,
    AddCard,
    Exit,
}

impl MenuChoice {
    /// Menu entries in display order, with their digit.
    pub const ENTRIES: [(char, Self, &'static str); 7] = [
        ('1', Self::ShowCategories, "Show categories"),
        ('2', Self::PrepareQuiz, "Prepare quiz"),
        ('3', Self::StartQuiz, "Start quiz"),
        ('4', Self::ReviewMissed, "Review missed"),
        ('5', Self::LookUp, "Look up term"),
        ('6', Self::AddCard, "Add flashcard"),
        ('0', Self::Exit, "Exit"),
    ];

    fn from_digit(digit: char) -> Option<Self> {
        Self::ENTRIES
            .iter()
            .find(|(d, _, _)| *d == digit)
            .map(|(_, choice, _)| *choice)
    }
}

/// What the user typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing was typed.
    Empty,
    /// A recognised menu entry.
    Choice(MenuChoice),
    /// Anything else.
    Invalid,
}

impl Selection {
    /// Interprets the first character of the line as the menu digit.
    ///
    /// The rest of the line is ignored.
    pub fn parse(line: &str) -> Self {
        match line.chars().next() {
            None => Self::Empty,
            Some(first) => MenuChoice::from_digit(first).map_or(Self::Invalid, Self::Choice),
        }
    }
}
