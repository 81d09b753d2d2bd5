/// Selecting the card at column `x`, row `y` of the board.
///
/// Two moves are the same move iff they point at the same cell, which is also
/// what [`Move::unique_id()`] encodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    x: usize,
    y: usize,
}

impl Move {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> usize {
        self.x
    }

    pub fn y(self) -> usize {
        self.y
    }

    /// The canonical key of this move, `"x.y"`.
    pub fn unique_id(self) -> String {
        format!("{}.{}", self.x, self.y)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.x, self.y)
    }
}

impl From<(usize, usize)> for Move {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}
