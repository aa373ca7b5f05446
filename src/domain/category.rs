use std::fmt;

use tracing::{debug, instrument};

use crate::domain::{CardIndex, Deck};

/// Name of the root node.
pub const ROOT: &str = "All Topics";
/// Name of the only category with a dedicated branch.
pub const CS_CONCEPTS: &str = "CS Concepts";
/// Catch-all branch for every other category.
pub const MISC: &str = "Misc";

const MISC_SLOT: usize = 1;

/// A node in the category tree.
///
/// Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    name: String,
    children: Vec<CategoryNode>,
    card_indices: Vec<CardIndex>,
}

impl CategoryNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            card_indices: Vec::new(),
        }
    }

    /// The display name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child nodes, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Cards filed directly under this node, in insertion order.
    #[must_use]
    pub fn card_indices(&self) -> &[CardIndex] {
        &self.card_indices
    }
}

/// The two-level category tree.
///
/// The root always owns exactly two children, "CS Concepts" and "Misc". A card
/// is filed under "CS Concepts" only if its category is exactly that string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    root: CategoryNode,
}

impl Default for CategoryTree {
    fn default() -> Self {
        let mut root = CategoryNode::new(ROOT);
        root.children.push(CategoryNode::new(CS_CONCEPTS));
        root.children.push(CategoryNode::new(MISC));
        Self { root }
    }
}

impl CategoryTree {
    /// Builds the tree from scratch over every card currently in the deck.
    #[instrument(level = "debug", skip(deck), fields(cards = deck.len()))]
    #[must_use]
    pub fn from_deck(deck: &Deck) -> Self {
        let mut tree = Self::default();
        for (index, card) in deck.iter() {
            let slot = usize::from(card.category != CS_CONCEPTS);
            tree.root.children[slot].card_indices.push(index);
        }
        tree
    }

    /// Files a newly created card.
    ///
    /// The card goes under the root child whose name matches `category`
    /// exactly, or under "Misc" when no child matches.
    pub fn place_new_card(&mut self, index: CardIndex, category: &str) {
        let node = match self
            .root
            .children
            .iter()
            .position(|child| child.name == category)
        {
            Some(slot) => &mut self.root.children[slot],
            None => &mut self.root.children[MISC_SLOT],
        };
        debug!(%index, node = %node.name, "placing card");
        node.card_indices.push(index);
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> &CategoryNode {
        &self.root
    }

    /// Cards filed directly under the root child called `name`.
    ///
    /// Returns `None` if the root has no such child.
    #[must_use]
    pub fn cards_under(&self, name: &str) -> Option<&[CardIndex]> {
        self.root
            .children
            .iter()
            .find(|child| child.name == name)
            .map(CategoryNode::card_indices)
    }

    /// Renders the tree depth-first as a lazy sequence of lines.
    ///
    /// Each node yields its own name, then its cards, then its children.
    #[must_use]
    pub fn render<'a>(&'a self, deck: &'a Deck) -> Render<'a> {
        Render {
            deck,
            stack: vec![Frame::Node {
                node: &self.root,
                depth: 0,
            }],
        }
    }
}

enum Frame<'a> {
    Node { node: &'a CategoryNode, depth: usize },
    Card { index: CardIndex, depth: usize },
}

/// Lazy depth-first iterator over the lines of a rendered [`CategoryTree`].
pub struct Render<'a> {
    deck: &'a Deck,
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for Render<'a> {
    type Item = TreeLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop()? {
            Frame::Node { node, depth } => {
                // Pushed in reverse so that cards pop before children, each in
                // insertion order.
                self.stack.extend(node.children.iter().rev().map(|child| Frame::Node {
                    node: child,
                    depth: depth + 1,
                }));
                self.stack
                    .extend(node.card_indices.iter().rev().map(|&index| Frame::Card {
                        index,
                        depth: depth + 1,
                    }));
                Some(TreeLine::Category {
                    name: &node.name,
                    depth,
                })
            }
            Frame::Card { index, depth } => {
                let deck = self.deck;
                Some(TreeLine::Card {
                    term: &deck[index].term,
                    depth,
                })
            }
        }
    }
}

/// One line of a rendered category tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLine<'a> {
    /// A category node.
    Category {
        /// Node name.
        name: &'a str,
        /// Distance from the root.
        depth: usize,
    },
    /// A card filed under the preceding category.
    Card {
        /// Card term.
        term: &'a str,
        /// Distance from the root.
        depth: usize,
    },
}

impl fmt::Display for TreeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Category { name, depth } => {
                write!(f, "{:indent$}- {name}", "", indent = depth * 2)
            }
            Self::Card { term, depth } => write!(f, "{:indent$}* {term}", "", indent = depth * 2),
        }
    }
}
