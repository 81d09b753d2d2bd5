use crate::Move;

/// The error type for [`Card::declare_number()`](crate::Card::declare_number).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationError {
    /// Only wildcards can be declared.
    NotDeclarable,
    /// Another wildcard of the same session has already been declared.
    AlreadyDeclared { declared: String },
}

impl std::error::Error for DeclarationError {}

impl std::fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationError::NotDeclarable => write!(f, "Only wildcards can be declared"),
            DeclarationError::AlreadyDeclared { declared } => write!(
                f,
                "The wildcards of this game have already been declared as {}",
                declared
            ),
        }
    }
}

/// No remembered card can still be selected in the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoCandidate;

impl std::error::Error for NoCandidate {}

impl std::fmt::Display for NoCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No remembered card is selectable in this turn")
    }
}

/// A broken engine contract. These are programming errors, not game situations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Every card left on the board was already selected in this turn.
    NoSelectableCell { requested: Move },
    /// A card was selected after the turn already had all of its cards.
    TurnAlreadyComplete,
}

/// The error type for the engine and its move resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    GameOver,
    NoPlayers,
    InvariantViolation(Violation),
}

impl std::error::Error for EngineError {}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::GameOver => write!(f, "The game is already over"),
            EngineError::NoPlayers => write!(f, "No players have been registered"),
            EngineError::InvariantViolation(Violation::NoSelectableCell { requested }) => write!(
                f,
                "No selectable card was left on the board when resolving move {}",
                requested
            ),
            EngineError::InvariantViolation(Violation::TurnAlreadyComplete) => {
                write!(f, "Tried to select a card after the turn was complete")
            }
        }
    }
}

/// The deck does not fill the requested board exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSizeMismatch {
    pub width: usize,
    pub height: usize,
    pub cards: usize,
}

impl std::error::Error for BoardSizeMismatch {}

impl std::fmt::Display for BoardSizeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A {}x{} board needs {} cards, but the deck has {}",
            self.width,
            self.height,
            self.width * self.height,
            self.cards
        )
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NotEnoughPlayers { found: usize },
    NoCards,
    EmptySuitName { key: String },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotEnoughPlayers { found } => write!(
                f,
                "At least 2 players must be configured, but found {}",
                found
            ),
            ConfigError::NoCards => write!(f, "The deck configuration contains no cards"),
            ConfigError::EmptySuitName { key } => {
                write!(f, "The suit list '{}' contains an empty suit name", key)
            }
        }
    }
}

/// The error type for setting up a game from its configuration.
#[derive(Debug)]
pub enum SetupError {
    Config(ConfigError),
    Board(BoardSizeMismatch),
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Config(err) => Some(err),
            SetupError::Board(err) => Some(err),
        }
    }
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Config(_) => write!(f, "Invalid game configuration"),
            SetupError::Board(_) => write!(f, "The cards do not fit the board"),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(err: ConfigError) -> Self {
        SetupError::Config(err)
    }
}

impl From<BoardSizeMismatch> for SetupError {
    fn from(err: BoardSizeMismatch) -> Self {
        SetupError::Board(err)
    }
}
