use crate::{Card, Move};

/// How many cards a player selects per turn.
pub const CARDS_PER_TURN: usize = 2;

/// How the second card of a turn was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessType {
    /// The engine had to correct the requested move, or the move was random.
    RandomGuess,
    /// The requested move was valid as asked.
    Remembered,
}

impl std::fmt::Display for GuessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuessType::RandomGuess => write!(f, "finds"),
            GuessType::Remembered => write!(f, "remembers"),
        }
    }
}

/// Where a turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    SelectingFirstCard,
    SelectingSecondCard,
    Resolved { matched: bool },
}

/// The cards one player selected in one turn, and what came of it.
///
/// Only the engine records selections. Once the turn has all of its cards it
/// is resolved exactly once and handed out as a read-only snapshot.
#[derive(Clone, Debug)]
pub struct Turn {
    player_index: usize,
    player_name: String,
    cards_per_turn: usize,
    cards: Vec<Card>,
    moves: Vec<Move>,
    guess_type: Option<GuessType>,
    resolved: Option<bool>,
}

impl Turn {
    pub fn new(player_index: usize, player_name: &str) -> Self {
        Self {
            player_index,
            player_name: String::from(player_name),
            cards_per_turn: CARDS_PER_TURN,
            cards: Vec::with_capacity(CARDS_PER_TURN),
            moves: Vec::with_capacity(CARDS_PER_TURN),
            guess_type: None,
            resolved: None,
        }
    }

    pub fn player_index(&self) -> usize {
        self.player_index
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn guess_type(&self) -> Option<GuessType> {
        self.guess_type
    }

    pub fn is_match(&self) -> bool {
        self.resolved.unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == self.cards_per_turn
    }

    pub fn phase(&self) -> TurnPhase {
        match self.resolved {
            Some(matched) => TurnPhase::Resolved { matched },
            None if self.cards.is_empty() => TurnPhase::SelectingFirstCard,
            None => TurnPhase::SelectingSecondCard,
        }
    }

    /// A move is forbidden while it is part of the turn in progress.
    pub fn is_forbidden(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    pub(crate) fn record(&mut self, card: Card, m: Move) {
        debug_assert!(!self.is_complete());
        self.cards.push(card);
        self.moves.push(m);
    }

    pub(crate) fn set_guess_type(&mut self, guess_type: GuessType) {
        self.guess_type = Some(guess_type);
    }

    /// Marks the turn as matched iff all of its cards share one number.
    pub(crate) fn resolve(&mut self) -> bool {
        debug_assert!(self.is_complete() && self.resolved.is_none());
        let matched = match self.cards.split_first() {
            Some((first, rest)) => rest.iter().all(|c| c.number() == first.number()),
            None => false,
        };
        self.resolved = Some(matched);
        matched
    }
}
