use std::cell::OnceCell;
use std::rc::Rc;
use std::str::FromStr;

use crate::DeclarationError;

/// A card laid out on the board.
///
/// A card is a suit/number pair. Standard cards always report their printed
/// number, while [wildcards](CardKind::Wildcard) report the number declared
/// for their game session once somebody has declared it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    suit: String,
    number: String,
    kind: CardKind,
}

/// Distinguishes ordinary cards from wildcards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardKind {
    Standard,
    /// The slot is shared by every wildcard of the same game session.
    Wildcard(WildcardSlot),
}

/// The number declared for all wildcards of one game session.
///
/// Cloning the slot yields a handle to the same cell, so every wildcard
/// built from one slot sees the same declaration. The value can be set
/// exactly once; separate sessions must use separate slots.
///
/// ```
/// # use pelmanism::{Card, WildcardSlot};
/// let slot = WildcardSlot::new();
/// let joker_1 = Card::wildcard("Red", "Joker", &slot);
/// let joker_2 = Card::wildcard("Black", "Joker", &slot);
/// joker_1.declare_number("7").unwrap();
/// assert_eq!(joker_2.number(), "7");
/// assert!(joker_2.declare_number("8").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WildcardSlot(Rc<OnceCell<String>>);

impl WildcardSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The declared number, if any wildcard has been declared yet.
    pub fn declared(&self) -> Option<&str> {
        self.0.get().map(String::as_str)
    }

    /// First caller wins, every later call fails.
    pub fn declare(&self, number: &str) -> Result<(), DeclarationError> {
        self.0
            .set(String::from(number))
            .map_err(|_| DeclarationError::AlreadyDeclared {
                declared: self.declared().unwrap_or_default().to_owned(),
            })
    }

    /// Whether `other` is a handle to this very slot.
    pub fn same_session(&self, other: &WildcardSlot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Card {
    pub fn standard(suit: &str, number: &str) -> Self {
        Self {
            suit: String::from(suit),
            number: String::from(number),
            kind: CardKind::Standard,
        }
    }

    pub fn wildcard(suit: &str, number: &str, slot: &WildcardSlot) -> Self {
        Self {
            suit: String::from(suit),
            number: String::from(number),
            kind: CardKind::Wildcard(slot.clone()),
        }
    }

    pub fn suit(&self) -> &str {
        &self.suit
    }

    /// The number printed on the card, ignoring any declaration.
    pub fn printed_number(&self) -> &str {
        &self.number
    }

    /// The number this card counts as when matching.
    pub fn number(&self) -> &str {
        match &self.kind {
            CardKind::Standard => &self.number,
            CardKind::Wildcard(slot) => slot.declared().unwrap_or(self.number.as_str()),
        }
    }

    pub fn kind(&self) -> &CardKind {
        &self.kind
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, CardKind::Wildcard(_))
    }

    /// Declares the number of every wildcard in this card's session.
    ///
    /// Standard cards can never be declared.
    pub fn declare_number(&self, number: &str) -> Result<(), DeclarationError> {
        match &self.kind {
            CardKind::Standard => Err(DeclarationError::NotDeclarable),
            CardKind::Wildcard(slot) => slot.declare(number),
        }
    }

    /// Label used for a board cell: the suit's initial followed by the number.
    pub fn short_name(&self) -> String {
        match self.suit.chars().next() {
            Some(initial) => format!("{}{}", initial, self.number()),
            None => String::from(self.number()),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            CardKind::Standard => write!(f, "{} {}", self.number, self.suit),
            CardKind::Wildcard(slot) => {
                write!(f, "{} {}", self.number, self.suit)?;
                if let Some(declared) = slot.declared() {
                    write!(f, "(declared as {})", declared)?;
                }
                Ok(())
            }
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    MissingNumber,
    MissingSuit,
}

/// Parses the display form of a standard card, i.e. `"<number> <suit>"`.
impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, ' ');
        let number = parts
            .next()
            .filter(|n| !n.is_empty())
            .ok_or(CardFromStrErr::MissingNumber)?;
        let suit = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(CardFromStrErr::MissingSuit)?;
        Ok(Card::standard(suit, number))
    }
}

/// Shorthand for creating standard cards from their display form.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use pelmanism::{card, Card};
/// assert_eq!(card!("Q Hearts"), Card::standard("Hearts", "Q"));
/// ```
#[macro_export]
macro_rules! card {
    ($ns:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($ns)
            .expect("Invalid card given to card! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_card_is_not_declarable() {
        let card = card!("5 Clubs");
        assert_eq!(card.declare_number("7"), Err(DeclarationError::NotDeclarable));
        assert_eq!(card.number(), "5");
    }

    #[test]
    fn wildcard_reports_printed_number_until_declared() {
        let slot = WildcardSlot::new();
        let joker = Card::wildcard("Red", "Joker", &slot);
        assert_eq!(joker.number(), "Joker");
        joker.declare_number("Q").unwrap();
        assert_eq!(joker.number(), "Q");
        assert_eq!(joker.printed_number(), "Joker");
    }

    #[test]
    fn declaration_is_shared_and_happens_once() {
        let slot = WildcardSlot::new();
        let a = Card::wildcard("Red", "Joker", &slot);
        let b = Card::wildcard("Black", "Joker", &slot);
        b.declare_number("3").unwrap();
        assert_eq!(a.number(), "3");
        assert_eq!(
            a.declare_number("4"),
            Err(DeclarationError::AlreadyDeclared {
                declared: String::from("3")
            })
        );
        assert_eq!(b.number(), "3");
    }

    #[test]
    fn sessions_do_not_leak_declarations() {
        let first = WildcardSlot::new();
        let second = WildcardSlot::new();
        let a = Card::wildcard("Red", "Joker", &first);
        let b = Card::wildcard("Red", "Joker", &second);
        a.declare_number("9").unwrap();
        assert_eq!(b.number(), "Joker");
        assert!(b.declare_number("2").is_ok());
        assert!(!first.same_session(&second));
        assert!(first.same_session(&first.clone()));
    }

    #[test]
    fn display_forms() {
        let slot = WildcardSlot::new();
        let joker = Card::wildcard("Red", "Joker", &slot);
        assert_eq!(card!("10 Spades").to_string(), "10 Spades");
        assert_eq!(joker.to_string(), "Joker Red");
        slot.declare("K").unwrap();
        assert_eq!(joker.to_string(), "Joker Red(declared as K)");
        assert_eq!(joker.short_name(), "RK");
        assert_eq!(card!("A Hearts").short_name(), "HA");
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Card>(), Err(CardFromStrErr::MissingNumber));
        assert_eq!("7".parse::<Card>(), Err(CardFromStrErr::MissingSuit));
        assert_eq!("7 ".parse::<Card>(), Err(CardFromStrErr::MissingSuit));
    }
}
