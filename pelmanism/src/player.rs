use crate::{Card, EngineError, Move};

/// What a player may do during its turn.
///
/// The engine hands an implementation of this trait to
/// [`Player::take_turn()`]. Every request is corrected to the nearest card
/// that can still be selected, so a player can never make an illegal move.
pub trait MoveResolver {
    /// Selects the card nearest to `requested`.
    ///
    /// If `set_guess` is true and this is the second card of the turn, the
    /// turn is marked as remembered when `requested` was valid as asked and
    /// as a random guess otherwise.
    fn do_move_flagged(&mut self, requested: Move, set_guess: bool) -> Result<Card, EngineError>;

    /// Selects a card at a random cell and marks the turn as a random guess.
    ///
    /// Returns the selected card and the move that was actually made.
    fn do_random_move(&mut self) -> Result<(Card, Move), EngineError>;

    /// Was this move already made during the current turn?
    fn is_forbidden(&self, m: Move) -> bool;

    fn do_move(&mut self, requested: Move) -> Result<Card, EngineError> {
        self.do_move_flagged(requested, true)
    }
}

/// A participant of the game.
///
/// Players only act in [`take_turn()`](Player::take_turn). The remaining
/// methods are notifications about what happens on the board, sent to every
/// player regardless of whose turn it is.
pub trait Player {
    fn name(&self) -> &str;

    /// Select the cards for this turn through `resolver`.
    ///
    /// Errors from the resolver must be passed on unchanged.
    fn take_turn(&mut self, resolver: &mut dyn MoveResolver) -> Result<(), EngineError>;

    /// A card was turned over by some player.
    fn card_previewed(&mut self, card: &Card, m: Move);

    /// A card was taken off the board as part of a pair.
    fn card_collected(&mut self, card: &Card, m: Move);

    /// Sent only to the player who found the pair.
    fn pair_found(&mut self, first: &Card, second: &Card);

    /// Number of pairs found so far.
    fn result(&self) -> usize;
}

impl std::fmt::Debug for dyn Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name())
            .field("result", &self.result())
            .finish()
    }
}
