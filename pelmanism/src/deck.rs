use rand::seq::SliceRandom;
use rand::Rng;

use crate::Card;

/// An ordered sequence of card slots.
///
/// Removing a card leaves an empty slot behind, so positions stay stable
/// and the size of a deck never changes once it has been built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    slots: Vec<Option<Card>>,
}

impl Deck {
    /// Creates a new, empty deck.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.slots.push(Some(card));
    }

    /// Returns `None` for removed cards and for positions past the end.
    pub fn card_at(&self, position: usize) -> Option<&Card> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    /// Takes the card off its slot, leaving the slot empty.
    pub fn remove_card(&mut self, position: usize) -> Option<Card> {
        self.slots.get_mut(position).and_then(Option::take)
    }

    /// True iff every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Number of cards that have not been removed.
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterates the remaining cards together with their positions.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_ref().map(|card| (position, card)))
    }

    /// Permutes the slots uniformly at random.
    ///
    /// Intended for a freshly built deck. Empty slots are permuted along with
    /// the cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.slots.shuffle(rng);
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, card) in self.cards() {
            writeln!(f, "{}", card)?;
        }
        Ok(())
    }
}
