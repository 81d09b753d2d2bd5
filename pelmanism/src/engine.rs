use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::{
    AutoPlayer, Board, Card, CardKind, EngineError, GameConfig, GuessType, Move, MoveResolver,
    Player, SetupError, Turn, Violation, WildcardSlot,
};

/// Where the game as a whole stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    AwaitingTurn { player_index: usize },
    GameOver,
}

/// The outcome of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    WonByPlayer { player_idx: usize },
    Tie,
}

/// One game session.
///
/// The engine owns everything a game mutates: the board, the players, the
/// wildcard declaration of this session and the random number generator.
/// Separate engines never share state.
pub struct Engine {
    board: Board,
    players: Vec<Box<dyn Player>>,
    wildcards: WildcardSlot,
    rng: StdRng,
    current_player: usize,
    turns_taken: usize,
}

impl Engine {
    /// Creates an engine without players.
    ///
    /// `wildcards` must be the slot the board's wildcards were built with.
    pub fn new(board: Board, wildcards: WildcardSlot, rng: StdRng) -> Self {
        Self {
            board,
            players: Vec::new(),
            wildcards,
            rng,
            current_player: 0,
            turns_taken: 0,
        }
    }

    /// Sets up a complete game: the configured deck, shuffled with `rng` and
    /// laid out as `width` x `height`, with one [`AutoPlayer`] per name.
    pub fn from_config(
        config: &GameConfig,
        width: usize,
        height: usize,
        mut rng: StdRng,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let wildcards = WildcardSlot::new();
        let mut deck = config.build_deck(&wildcards);
        deck.shuffle(&mut rng);
        let board = Board::new(deck, width, height)?;
        let mut engine = Engine::new(board, wildcards, rng);
        for name in config.players() {
            engine.register_player(Box::new(AutoPlayer::new(name)));
        }
        Ok(engine)
    }

    /// Players take turns in the order they were registered.
    pub fn register_player(&mut self, player: Box<dyn Player>) {
        self.players.push(player);
    }

    pub fn players(&self) -> &[Box<dyn Player>] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The number the wildcards of this session were declared as.
    pub fn declared_number(&self) -> Option<&str> {
        self.wildcards.declared()
    }

    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    pub fn state(&self) -> EngineState {
        if self.is_over() {
            EngineState::GameOver
        } else {
            EngineState::AwaitingTurn {
                player_index: self.current_player,
            }
        }
    }

    /// The game is over once the board is empty or no pair can be formed
    /// from the cards that are left.
    pub fn is_over(&self) -> bool {
        self.board.is_empty() || !match_possible(&self.board)
    }

    /// The pairs found by each player, in registration order.
    pub fn results(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.result()).collect()
    }

    pub fn winner(&self) -> GameResult {
        if self.is_over() {
            determine_winner(&self.results())
        } else {
            GameResult::InProgress
        }
    }

    /// Lets the current player select two cards, resolves the turn and
    /// passes play to the next player.
    ///
    /// Returns the resolved turn.
    pub fn take_turn(&mut self) -> Result<Turn, EngineError> {
        if self.players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        if self.is_over() {
            return Err(EngineError::GameOver);
        }

        let player_index = self.current_player;
        let mut turn = self.select_cards(player_index)?;
        let matched = turn.resolve();
        debug!(
            player = turn.player_name(),
            matched,
            guess = ?turn.guess_type(),
            "Turn resolved"
        );

        if matched {
            if let [first, second] = turn.cards() {
                self.players[player_index].pair_found(first, second);
            }
            for (card, &m) in turn.cards().iter().zip(turn.moves()) {
                self.board.remove_card_by(m);
                debug!(%card, %m, "Card collected");
                for player in self.players.iter_mut() {
                    player.card_collected(card, m);
                }
            }
        }

        self.current_player = (player_index + 1) % self.players.len();
        self.turns_taken += 1;
        Ok(turn)
    }

    /// Runs the selection phase of a turn.
    fn select_cards(&mut self, player_index: usize) -> Result<Turn, EngineError> {
        let (before, rest) = self.players.split_at_mut(player_index);
        let Some((acting, after)) = rest.split_first_mut() else {
            return Err(EngineError::NoPlayers);
        };

        let mut resolver = TurnResolver {
            board: &self.board,
            rng: &mut self.rng,
            turn: Turn::new(player_index, acting.name()),
            observers: [before, after],
            own_previews: Vec::new(),
        };

        let outcome = acting.take_turn(&mut resolver);
        if outcome.is_ok() && !resolver.turn.is_complete() {
            warn!(
                player = acting.name(),
                "Player ended its turn early, completing it with random moves"
            );
            while !resolver.turn.is_complete() {
                resolver.do_random_move()?;
            }
        }

        for (card, m) in resolver.own_previews.drain(..) {
            acting.card_previewed(&card, m);
        }
        outcome?;
        Ok(resolver.turn)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("board", &self.board)
            .field("players", &self.players)
            .field("declared_number", &self.declared_number())
            .field("current_player", &self.current_player)
            .field("turns_taken", &self.turns_taken)
            .finish()
    }
}

/// The [`MoveResolver`] handed to the acting player.
///
/// Previews are sent to the other players right away. The acting player is
/// borrowed by its own `take_turn()` call, so its previews are queued and
/// delivered once it returns.
struct TurnResolver<'a> {
    board: &'a Board,
    rng: &'a mut StdRng,
    turn: Turn,
    observers: [&'a mut [Box<dyn Player>]; 2],
    own_previews: Vec<(Card, Move)>,
}

impl TurnResolver<'_> {
    fn select(&mut self, requested: Move) -> Result<(Card, Move), EngineError> {
        if self.board.is_empty() {
            return Err(EngineError::GameOver);
        }
        if self.turn.is_complete() {
            return Err(EngineError::InvariantViolation(
                Violation::TurnAlreadyComplete,
            ));
        }
        let turn = &self.turn;
        let m = find_nearest_valid(self.board, requested, |m| turn.is_forbidden(m))?;
        if m != requested {
            trace!(%requested, corrected = %m, "Corrected move");
        }
        let card = self
            .board
            .card_by(m)
            .cloned()
            .ok_or(EngineError::InvariantViolation(
                Violation::NoSelectableCell { requested },
            ))?;

        debug!(player = self.turn.player_name(), %card, %m, "Card previewed");
        for observer in self.observers.iter_mut().flat_map(|players| players.iter_mut()) {
            observer.card_previewed(&card, m);
        }
        self.own_previews.push((card.clone(), m));
        self.turn.record(card.clone(), m);
        Ok((card, m))
    }
}

impl MoveResolver for TurnResolver<'_> {
    fn do_move_flagged(&mut self, requested: Move, set_guess: bool) -> Result<Card, EngineError> {
        let (card, m) = self.select(requested)?;
        if set_guess && self.turn.is_complete() {
            let guess_type = if m == requested {
                GuessType::Remembered
            } else {
                GuessType::RandomGuess
            };
            self.turn.set_guess_type(guess_type);
        }
        Ok(card)
    }

    fn do_random_move(&mut self) -> Result<(Card, Move), EngineError> {
        if self.board.is_empty() {
            return Err(EngineError::GameOver);
        }
        let requested = Move::new(
            self.rng.gen_range(0..self.board.width()),
            self.rng.gen_range(0..self.board.height()),
        );
        let selected = self.select(requested)?;
        self.turn.set_guess_type(GuessType::RandomGuess);
        Ok(selected)
    }

    fn is_forbidden(&self, m: Move) -> bool {
        self.turn.is_forbidden(m)
    }
}

/// Resolves `requested` to the nearest cell that holds a card and is not
/// forbidden.
///
/// A selectable request is returned unchanged. Otherwise the board is
/// scanned row by row starting at the requested row, and within each row
/// starting at the requested column, wrapping around at the edges.
pub fn find_nearest_valid(
    board: &Board,
    requested: Move,
    is_forbidden: impl Fn(Move) -> bool,
) -> Result<Move, EngineError> {
    let selectable = |m: Move| board.card_by(m).is_some() && !is_forbidden(m);
    if selectable(requested) {
        return Ok(requested);
    }
    let (width, height) = (board.width(), board.height());
    for dy in 0..height {
        let y = (requested.y() % height + dy) % height;
        for dx in 0..width {
            let x = (requested.x() % width + dx) % width;
            let m = Move::new(x, y);
            if selectable(m) {
                return Ok(m);
            }
        }
    }
    Err(EngineError::InvariantViolation(
        Violation::NoSelectableCell { requested },
    ))
}

/// A unique maximum wins, a shared maximum is a tie.
pub fn determine_winner(results: &[usize]) -> GameResult {
    let Some(&best) = results.iter().max() else {
        return GameResult::Tie;
    };
    let mut leaders = results
        .iter()
        .enumerate()
        .filter(|&(_, &result)| result == best)
        .map(|(idx, _)| idx);
    match (leaders.next(), leaders.next()) {
        (Some(player_idx), None) => GameResult::WonByPlayer { player_idx },
        _ => GameResult::Tie,
    }
}

/// Whether two of the cards left on the board can still form a pair.
fn match_possible(board: &Board) -> bool {
    let mut seen = HashSet::new();
    let mut undeclared_wildcard = false;
    for (_, card) in board.cards() {
        if let CardKind::Wildcard(slot) = card.kind() {
            undeclared_wildcard |= slot.declared().is_none();
        }
        if !seen.insert(card.number()) {
            return true;
        }
    }
    undeclared_wildcard && board.remaining() >= 2
}
