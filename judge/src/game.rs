use pelmanism::{Engine, EngineState, GameConfig, GameResult, Turn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// How one game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub player_names: Vec<String>,
    /// Pairs found by each player
    pub pairs: Vec<usize>,
    pub result: GameResult,
    pub turns: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub name: String,
    pub wins: usize,
    pub pairs: usize,
}

/// Results accumulated over several games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub games: usize,
    pub players: Vec<PlayerScore>,
    pub ties: usize,
}

/// Picks the board layout for `num_cards` cards.
///
/// A missing dimension is derived from the other one. Without either, the
/// layout closest to a square wins, with the shorter side as the width.
pub fn board_dimensions(
    num_cards: usize,
    width: Option<usize>,
    height: Option<usize>,
) -> (usize, usize) {
    match (width, height) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) => (width, num_cards.checked_div(width).unwrap_or(0)),
        (None, Some(height)) => (num_cards.checked_div(height).unwrap_or(0), height),
        (None, None) => {
            let width = (1..=num_cards)
                .take_while(|w| w * w <= num_cards)
                .filter(|w| num_cards % w == 0)
                .last()
                .unwrap_or(1);
            (width, num_cards / width)
        }
    }
}

fn narrate(turn: &Turn, pairs: usize) {
    if let [first, second] = turn.cards() {
        let guess = turn
            .guess_type()
            .map(|g| g.to_string())
            .unwrap_or_default();
        let outcome = if turn.is_match() { "Match!" } else { "No match" };
        info!(
            player = turn.player_name(),
            pairs,
            "finds {} and {} {}... {}",
            first,
            guess,
            second,
            outcome
        );
    }
}

/// Plays `engine` until the game is over.
pub fn play_game(engine: &mut Engine, show_board: bool) -> anyhow::Result<GameSummary> {
    while let EngineState::AwaitingTurn { player_index } = engine.state() {
        let turn = engine.take_turn()?;
        narrate(&turn, engine.players()[player_index].result());
        if show_board {
            println!("{}", engine.board());
        }
    }

    let player_names: Vec<String> = engine
        .players()
        .iter()
        .map(|p| String::from(p.name()))
        .collect();
    let pairs = engine.results();
    info!(turns = engine.turns_taken(), "Game over");
    for (name, pairs) in player_names.iter().zip(&pairs) {
        info!("{} has {} pairs", name, pairs);
    }
    let result = engine.winner();
    match result {
        GameResult::WonByPlayer { player_idx } => {
            info!("{} is the winner!", player_names[player_idx])
        }
        GameResult::Tie => info!("Game ended in a tie"),
        GameResult::InProgress => anyhow::bail!("The game stopped while still in progress"),
    }

    Ok(GameSummary {
        player_names,
        pairs,
        result,
        turns: engine.turns_taken(),
    })
}

/// Plays `num_games` games with fresh decks drawn from `rng`.
pub fn play_games(
    config: &GameConfig,
    (width, height): (usize, usize),
    num_games: usize,
    rng: &mut StdRng,
    show_board: bool,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore {
        players: config
            .players()
            .map(|name| PlayerScore {
                name: String::from(name),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    for game_idx in 0..num_games {
        let mut engine = Engine::from_config(config, width, height, StdRng::seed_from_u64(rng.gen()))?;
        if show_board {
            println!("{}", engine.board());
        }
        let summary = play_game(&mut engine, show_board)?;
        match summary.result {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = summary.player_names[player_idx], game_idx);
                match_score.players[player_idx].wins += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameResult::InProgress => {}
        }
        for (score, pairs) in match_score.players.iter_mut().zip(summary.pairs) {
            score.pairs += pairs;
        }
        match_score.games += 1;
    }

    let mut end_result = String::from("End result:");
    for score in &match_score.players {
        end_result += &format!(
            "\n- {} wins by {} ({} pairs)",
            score.wins, score.name, score.pairs
        );
    }
    eprintln!("{}\n- {} ties", end_result, match_score.ties);

    Ok(match_score)
}
