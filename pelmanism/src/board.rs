use crate::{BoardSizeMismatch, Card, Deck, Move};

/// The deck laid out as a `width` x `height` grid.
///
/// Cell `(x, y)` is deck position `y * width + x`. The board holds no state
/// of its own besides the dimensions; removing a card empties its deck slot.
#[derive(Clone, Debug)]
pub struct Board {
    deck: Deck,
    width: usize,
    height: usize,
}

impl Board {
    /// Lays out the deck. The deck must fill the grid exactly.
    pub fn new(deck: Deck, width: usize, height: usize) -> Result<Self, BoardSizeMismatch> {
        if width.checked_mul(height) != Some(deck.len()) {
            return Err(BoardSizeMismatch {
                width,
                height,
                cards: deck.len(),
            });
        }
        Ok(Self {
            deck,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    fn linear_pos(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns `None` for empty cells and for coordinates off the board.
    pub fn card_at(&self, x: usize, y: usize) -> Option<&Card> {
        self.linear_pos(x, y)
            .and_then(|position| self.deck.card_at(position))
    }

    pub fn card_by(&self, m: Move) -> Option<&Card> {
        self.card_at(m.x(), m.y())
    }

    pub fn remove_card_at(&mut self, x: usize, y: usize) -> Option<Card> {
        let position = self.linear_pos(x, y)?;
        self.deck.remove_card(position)
    }

    pub fn remove_card_by(&mut self, m: Move) -> Option<Card> {
        self.remove_card_at(m.x(), m.y())
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Number of cards still on the board.
    pub fn remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Iterates over the occupied cells in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = (Move, &Card)> {
        let width = self.width;
        self.deck
            .cards()
            .map(move |(position, card)| (Move::new(position % width, position / width), card))
    }
}
