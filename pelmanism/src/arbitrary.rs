use quickcheck::{Arbitrary, Gen};

use crate::{Board, Card, Deck, Move, WildcardSlot};

const SUITS: [&str; 4] = ["Clubs", "Diamonds", "Hearts", "Spades"];
const NUMBERS: [&str; 6] = ["2", "3", "10", "J", "A", "Joker"];

/// Cards to build a deck from, as (suit, number, is wildcard).
#[derive(Clone, Debug)]
pub struct DeckInput(Vec<(&'static str, &'static str, bool)>);

impl DeckInput {
    pub fn build(&self, slot: &WildcardSlot) -> Deck {
        self.0
            .iter()
            .map(|&(suit, number, wildcard)| {
                if wildcard {
                    Card::wildcard(suit, number, slot)
                } else {
                    Card::standard(suit, number)
                }
            })
            .collect()
    }
}

impl Arbitrary for DeckInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 30;
        let cards = (0..len)
            .map(|_| {
                let suit = *g.choose(&SUITS).unwrap();
                let number = *g.choose(&NUMBERS).unwrap();
                (suit, number, u8::arbitrary(g) % 8 == 0)
            })
            .collect();
        DeckInput(cards)
    }
}

/// A partially cleared board, a request that may point anywhere and moves
/// that are already taken.
#[derive(Clone, Debug)]
pub struct SearchInput {
    pub width: usize,
    pub height: usize,
    // One entry per cell, row-major
    pub occupied: Vec<bool>,
    pub requested: Move,
    pub forbidden: Vec<Move>,
}

impl SearchInput {
    pub fn board(&self) -> Board {
        let deck: Deck = (0..self.width * self.height)
            .map(|position| Card::standard("Clubs", &position.to_string()))
            .collect();
        let mut board = Board::new(deck, self.width, self.height)
            .expect("cell count matches the board size");
        for (position, &occupied) in self.occupied.iter().enumerate() {
            if !occupied {
                board.remove_card_at(position % self.width, position / self.width);
            }
        }
        board
    }
}

impl Arbitrary for SearchInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let width = 1 + usize::arbitrary(g) % 5;
        let height = 1 + usize::arbitrary(g) % 5;
        // Mostly empty boards are the interesting ones
        let occupied = (0..width * height)
            .map(|_| u8::arbitrary(g) % 3 == 0)
            .collect();
        let coordinate = |g: &mut Gen| usize::arbitrary(g) % 8;
        let requested = Move::new(coordinate(g), coordinate(g));
        let num_forbidden = usize::arbitrary(g) % 3;
        let forbidden = (0..num_forbidden)
            .map(|_| Move::new(usize::arbitrary(g) % width, usize::arbitrary(g) % height))
            .collect();
        SearchInput {
            width,
            height,
            occupied,
            requested,
            forbidden,
        }
    }
}

/// Pair counts of a handful of players, small enough to tie often.
#[derive(Clone, Debug)]
pub struct PlayerResults(pub Vec<usize>);

impl Arbitrary for PlayerResults {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_players = usize::arbitrary(g) % 6;
        PlayerResults((0..num_players).map(|_| usize::arbitrary(g) % 4).collect())
    }
}
