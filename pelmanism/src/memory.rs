use crate::{Move, NoCandidate};

/// Where cards were seen, indexed by the number they showed.
///
/// Numbers are kept in the order they were first seen, and so are the moves
/// within one number. Numbers without any moves left are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardMemory {
    entries: Vec<(String, Vec<Move>)>,
}

impl CardMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct numbers remembered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The remembered moves for a number, in the order they were seen.
    pub fn moves_for(&self, number: &str) -> Option<&[Move]> {
        self.entries
            .iter()
            .find(|(n, _)| n == number)
            .map(|(_, moves)| moves.as_slice())
    }

    pub fn contains(&self, number: &str, m: Move) -> bool {
        self.moves_for(number)
            .is_some_and(|moves| moves.contains(&m))
    }

    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn remember(&mut self, number: &str, m: Move) {
        match self.entries.iter_mut().find(|(n, _)| n == number) {
            Some((_, moves)) => {
                if !moves.contains(&m) {
                    moves.push(m);
                }
            }
            None => self.entries.push((String::from(number), vec![m])),
        }
    }

    /// Forgets `m` under `number`, dropping the number if nothing is left.
    pub fn forget(&mut self, number: &str, m: Move) {
        if let Some(idx) = self.entries.iter().position(|(n, _)| n == number) {
            self.entries[idx].1.retain(|&other| other != m);
            if self.entries[idx].1.is_empty() {
                self.entries.remove(idx);
            }
        }
    }

    /// Forgets `m` under every number it is remembered for.
    pub fn forget_everywhere(&mut self, m: Move) {
        for (_, moves) in self.entries.iter_mut() {
            moves.retain(|&other| other != m);
        }
        self.entries.retain(|(_, moves)| !moves.is_empty());
    }

    /// The first two selectable moves of the first number that has two.
    pub fn any_pair(&self, is_forbidden: impl Fn(Move) -> bool) -> Option<[Move; 2]> {
        self.entries.iter().find_map(|(_, moves)| {
            let mut selectable = moves.iter().copied().filter(|&m| !is_forbidden(m));
            match (selectable.next(), selectable.next()) {
                (Some(first), Some(second)) => Some([first, second]),
                _ => None,
            }
        })
    }

    /// The first selectable move remembered for `number`.
    pub fn valid_move(&self, number: &str, is_forbidden: impl Fn(Move) -> bool) -> Option<Move> {
        self.moves_for(number)?
            .iter()
            .copied()
            .find(|&m| !is_forbidden(m))
    }

    /// The first number that still has a selectable move.
    pub fn sample_number(&self, is_forbidden: impl Fn(Move) -> bool) -> Result<&str, NoCandidate> {
        self.entries
            .iter()
            .find(|(_, moves)| moves.iter().any(|&m| !is_forbidden(m)))
            .map(|(n, _)| n.as_str())
            .ok_or(NoCandidate)
    }
}
