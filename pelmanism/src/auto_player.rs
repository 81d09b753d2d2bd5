use tracing::{debug, trace};

use crate::{Card, CardMemory, DeclarationError, EngineError, Move, MoveResolver, Player};

/// A computer player with perfect memory.
///
/// It remembers every card any player turns over and on its own turn tries,
/// in this order:
///
/// 1. a remembered pair,
/// 2. a random card, declared as a remembered number if it is a wildcard,
/// 3. a remembered card with the same number as the random one,
/// 4. another random card, declaring one of the two as the other's number
///    if possible.
#[derive(Clone, Debug)]
pub struct AutoPlayer {
    name: String,
    memory: CardMemory,
    pairs_found: usize,
}

impl AutoPlayer {
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            memory: CardMemory::new(),
            pairs_found: 0,
        }
    }

    pub fn memory(&self) -> &CardMemory {
        &self.memory
    }

    /// Tries to turn `card` into a copy of some remembered card and returns
    /// where that card lies.
    fn declare_as_remembered(&self, card: &Card, resolver: &dyn MoveResolver) -> Option<Move> {
        let is_forbidden = |m: Move| resolver.is_forbidden(m);
        let number = match self.memory.sample_number(is_forbidden) {
            Ok(number) => number,
            Err(err) => {
                trace!(player = self.name, %err, "Nothing to declare");
                return None;
            }
        };
        if let Err(err) = card.declare_number(number) {
            trace!(player = self.name, %card, %err, "Declaration failed");
            return None;
        }
        debug!(player = self.name, %card, number, "Declared wildcard");
        self.memory.valid_move(number, is_forbidden)
    }

    /// Best effort: make two unrelated cards match by declaring one of them.
    fn declare_after_guess(&self, first: &Card, second: &Card) {
        let declared = match first.declare_number(second.number()) {
            Err(DeclarationError::NotDeclarable) => second.declare_number(first.number()),
            result => result,
        };
        match declared {
            Ok(()) => debug!(player = self.name, %first, %second, "Declared wildcard after guessing"),
            Err(err) => trace!(player = self.name, %err, "No declaration after guessing"),
        }
    }
}

impl Player for AutoPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(&mut self, resolver: &mut dyn MoveResolver) -> Result<(), EngineError> {
        if let Some([first, second]) = self.memory.any_pair(|m| resolver.is_forbidden(m)) {
            resolver.do_move(first)?;
            resolver.do_move(second)?;
            return Ok(());
        }

        let (first_card, _) = resolver.do_random_move()?;

        if let Some(m) = self.declare_as_remembered(&first_card, &*resolver) {
            resolver.do_move(m)?;
            return Ok(());
        }

        if let Some(m) = self
            .memory
            .valid_move(first_card.number(), |m| resolver.is_forbidden(m))
        {
            resolver.do_move(m)?;
            return Ok(());
        }

        let (second_card, _) = resolver.do_random_move()?;
        self.declare_after_guess(&first_card, &second_card);
        Ok(())
    }

    fn card_previewed(&mut self, card: &Card, m: Move) {
        self.memory.remember(card.number(), m);
    }

    fn card_collected(&mut self, _card: &Card, m: Move) {
        // A wildcard may be remembered under its printed number as well as
        // under the number it was declared as.
        self.memory.forget_everywhere(m);
    }

    fn pair_found(&mut self, _first: &Card, _second: &Card) {
        self.pairs_found += 1;
    }

    fn result(&self) -> usize {
        self.pairs_found
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use super::*;
    use crate::{card, WildcardSlot};

    /// Serves cards from a fixed layout and random moves from a script.
    struct ScriptedResolver {
        cards: BTreeMap<Move, Card>,
        random_moves: VecDeque<Move>,
        made: Vec<Move>,
    }

    impl ScriptedResolver {
        fn new(cards: impl IntoIterator<Item = (Move, Card)>, random_moves: &[Move]) -> Self {
            Self {
                cards: cards.into_iter().collect(),
                random_moves: random_moves.iter().copied().collect(),
                made: Vec::new(),
            }
        }
    }

    impl MoveResolver for ScriptedResolver {
        fn do_move_flagged(&mut self, requested: Move, _set_guess: bool) -> Result<Card, EngineError> {
            assert!(!self.made.contains(&requested), "{} selected twice", requested);
            self.made.push(requested);
            Ok(self.cards[&requested].clone())
        }

        fn do_random_move(&mut self) -> Result<(Card, Move), EngineError> {
            let m = self.random_moves.pop_front().expect("random move script ran out");
            let card = self.do_move_flagged(m, false)?;
            Ok((card, m))
        }

        fn is_forbidden(&self, m: Move) -> bool {
            self.made.contains(&m)
        }
    }

    #[test]
    fn plays_remembered_pair() {
        let mut player = AutoPlayer::new("Bot");
        player.card_previewed(&card!("3 Clubs"), Move::new(3, 0));
        player.card_previewed(&card!("7 Clubs"), Move::new(0, 0));
        player.card_previewed(&card!("7 Hearts"), Move::new(1, 0));
        let mut resolver = ScriptedResolver::new(
            [
                (Move::new(0, 0), card!("7 Clubs")),
                (Move::new(1, 0), card!("7 Hearts")),
                (Move::new(3, 0), card!("3 Clubs")),
            ],
            &[],
        );
        player.take_turn(&mut resolver).unwrap();
        assert_eq!(resolver.made, vec![Move::new(0, 0), Move::new(1, 0)]);
    }

    #[test]
    fn declares_revealed_wildcard_as_remembered_number() {
        let slot = WildcardSlot::new();
        let mut player = AutoPlayer::new("Bot");
        player.card_previewed(&card!("5 Spades"), Move::new(2, 0));
        let mut resolver = ScriptedResolver::new(
            [
                (Move::new(0, 0), Card::wildcard("Red", "Joker", &slot)),
                (Move::new(2, 0), card!("5 Spades")),
            ],
            &[Move::new(0, 0)],
        );
        player.take_turn(&mut resolver).unwrap();
        assert_eq!(resolver.made, vec![Move::new(0, 0), Move::new(2, 0)]);
        assert_eq!(slot.declared(), Some("5"));
    }

    #[test]
    fn plays_remembered_copy_of_revealed_card() {
        let mut player = AutoPlayer::new("Bot");
        player.card_previewed(&card!("5 Spades"), Move::new(2, 0));
        player.card_previewed(&card!("9 Spades"), Move::new(3, 0));
        let mut resolver = ScriptedResolver::new(
            [
                (Move::new(0, 0), card!("9 Hearts")),
                (Move::new(2, 0), card!("5 Spades")),
                (Move::new(3, 0), card!("9 Spades")),
            ],
            &[Move::new(0, 0)],
        );
        player.take_turn(&mut resolver).unwrap();
        assert_eq!(resolver.made, vec![Move::new(0, 0), Move::new(3, 0)]);
    }

    #[test]
    fn guesses_and_declares_second_wildcard() {
        let slot = WildcardSlot::new();
        let mut player = AutoPlayer::new("Bot");
        let mut resolver = ScriptedResolver::new(
            [
                (Move::new(0, 0), card!("4 Hearts")),
                (Move::new(1, 0), Card::wildcard("Black", "Joker", &slot)),
            ],
            &[Move::new(0, 0), Move::new(1, 0)],
        );
        player.take_turn(&mut resolver).unwrap();
        assert_eq!(resolver.made, vec![Move::new(0, 0), Move::new(1, 0)]);
        assert_eq!(slot.declared(), Some("4"));
    }

    #[test]
    fn guesses_and_declares_first_wildcard() {
        let slot = WildcardSlot::new();
        let mut player = AutoPlayer::new("Bot");
        let mut resolver = ScriptedResolver::new(
            [
                (Move::new(0, 0), Card::wildcard("Black", "Joker", &slot)),
                (Move::new(1, 0), card!("8 Diamonds")),
            ],
            &[Move::new(0, 0), Move::new(1, 0)],
        );
        player.take_turn(&mut resolver).unwrap();
        assert_eq!(slot.declared(), Some("8"));
    }

    #[test]
    fn pure_guess_without_wildcards_declares_nothing() {
        let mut player = AutoPlayer::new("Bot");
        let mut resolver = ScriptedResolver::new(
            [
                (Move::new(0, 0), card!("4 Hearts")),
                (Move::new(1, 0), card!("6 Hearts")),
            ],
            &[Move::new(0, 0), Move::new(1, 0)],
        );
        player.take_turn(&mut resolver).unwrap();
        assert_eq!(resolver.made.len(), 2);
    }

    #[test]
    fn engine_errors_are_passed_on() {
        struct Exhausted;
        impl MoveResolver for Exhausted {
            fn do_move_flagged(&mut self, _: Move, _: bool) -> Result<Card, EngineError> {
                Err(EngineError::GameOver)
            }
            fn do_random_move(&mut self) -> Result<(Card, Move), EngineError> {
                Err(EngineError::GameOver)
            }
            fn is_forbidden(&self, _: Move) -> bool {
                false
            }
        }
        let mut player = AutoPlayer::new("Bot");
        assert_eq!(player.take_turn(&mut Exhausted), Err(EngineError::GameOver));
    }

    #[test]
    fn collected_cards_are_forgotten() {
        let slot = WildcardSlot::new();
        let joker = Card::wildcard("Red", "Joker", &slot);
        let mut player = AutoPlayer::new("Bot");
        player.card_previewed(&joker, Move::new(0, 0));
        player.card_previewed(&card!("2 Clubs"), Move::new(1, 0));
        slot.declare("2").unwrap();
        player.card_previewed(&joker, Move::new(0, 0));
        player.card_collected(&joker, Move::new(0, 0));
        assert!(!player.memory().contains("2", Move::new(0, 0)));
        assert_eq!(player.memory().moves_for("Joker"), None);
        assert_eq!(player.memory().moves_for("2"), Some(&[Move::new(1, 0)][..]));
    }

    #[test]
    fn counts_pairs() {
        let mut player = AutoPlayer::new("Bot");
        assert_eq!(player.result(), 0);
        player.pair_found(&card!("2 Clubs"), &card!("2 Hearts"));
        player.pair_found(&card!("3 Clubs"), &card!("3 Hearts"));
        assert_eq!(player.result(), 2);
        assert_eq!(player.name(), "Bot");
    }
}
