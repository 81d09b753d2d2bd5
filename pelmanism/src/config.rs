use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::{Card, ConfigError, Deck, WildcardSlot};

/// Everything needed to set up a game, as read from a JSON file.
///
/// ```json
/// {
///   "deck": {
///     "cards": { "Clubs,Hearts": [2, 3, "J"], "Red": ["Joker"] },
///     "generic_cards": ["Joker"]
///   },
///   "engine": { "players": ["Alice", "Bob"] }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    pub deck: DeckConfig,
    pub engine: EngineConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeckConfig {
    /// Maps a comma-separated list of suits to the numbers each suit has.
    pub cards: BTreeMap<String, Vec<CardNumber>>,
    /// Cards with these numbers are wildcards.
    #[serde(default)]
    pub generic_cards: Vec<CardNumber>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    pub players: Vec<String>,
}

/// A card number, written either as a JSON string or as an integer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "NumberRepr")]
pub struct CardNumber(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Int(i64),
    Text(String),
}

impl From<NumberRepr> for CardNumber {
    fn from(repr: NumberRepr) -> Self {
        match repr {
            NumberRepr::Int(n) => CardNumber(n.to_string()),
            NumberRepr::Text(s) => CardNumber(s),
        }
    }
}

impl CardNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file '{}'", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Could not parse config file '{}'", path.display()))
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.engine.players.iter().map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.players.len() < 2 {
            return Err(ConfigError::NotEnoughPlayers {
                found: self.engine.players.len(),
            });
        }
        for key in self.deck.cards.keys() {
            if split_suits(key).any(str::is_empty) {
                return Err(ConfigError::EmptySuitName { key: key.clone() });
            }
        }
        if self.deck_size() == 0 {
            return Err(ConfigError::NoCards);
        }
        Ok(())
    }

    /// How many cards [`build_deck()`](GameConfig::build_deck) produces.
    pub fn deck_size(&self) -> usize {
        self.deck
            .cards
            .iter()
            .map(|(key, numbers)| split_suits(key).count() * numbers.len())
            .sum()
    }

    /// Builds the unshuffled deck. Wildcards are bound to `wildcards`.
    ///
    /// Suit lists are visited in sorted order, suits in the order listed and
    /// numbers in the order listed.
    pub fn build_deck(&self, wildcards: &WildcardSlot) -> Deck {
        let mut deck = Deck::new();
        for (key, numbers) in &self.deck.cards {
            for suit in split_suits(key) {
                for number in numbers {
                    let card = if self.deck.generic_cards.contains(number) {
                        Card::wildcard(suit, number.as_str(), wildcards)
                    } else {
                        Card::standard(suit, number.as_str())
                    };
                    deck.add_card(card);
                }
            }
        }
        deck
    }
}

fn split_suits(key: &str) -> impl Iterator<Item = &str> {
    key.split(',').map(str::trim)
}
