//! Relations between cards that share a category.

use petgraph::graphmap::UnGraphMap;
use tracing::{debug, instrument};

use crate::domain::{CardIndex, Deck};

/// Undirected graph linking every pair of distinct cards with identical
/// category strings.
///
/// The index has no incremental update; it is recomputed in full whenever the
/// deck changes.
#[derive(Debug, Default)]
pub struct RelationIndex {
    graph: UnGraphMap<CardIndex, ()>,
}

impl RelationIndex {
    /// Builds a relation index over the given deck.
    #[must_use]
    pub fn from_deck(deck: &Deck) -> Self {
        let mut relations = Self::default();
        relations.rebuild(deck);
        relations
    }

    /// Discards all relations and recomputes them by pairwise comparison.
    #[instrument(level = "debug", skip_all, fields(cards = deck.len()))]
    pub fn rebuild(&mut self, deck: &Deck) {
        self.graph.clear();
        let cards: Vec<_> = deck.iter().collect();
        for (i, &(a, card_a)) in cards.iter().enumerate() {
            for &(b, card_b) in &cards[i + 1..] {
                if card_a.category == card_b.category {
                    self.graph.add_edge(a, b, ());
                }
            }
        }
        debug!(edges = self.graph.edge_count(), "rebuilt relation index");
    }

    /// Cards related to `index`, in ascending index order.
    #[must_use]
    pub fn related_of(&self, index: CardIndex) -> Vec<CardIndex> {
        let mut related: Vec<_> = self.graph.neighbors(index).collect();
        related.sort_unstable();
        related
    }
}
