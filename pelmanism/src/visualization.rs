use crate::Board;

/// Draws the board as a grid of short card names, one line per row.
///
/// Each cell is right-aligned in six columns and followed by a space. Cells
/// whose card has been collected stay blank.
pub fn render_board(board: &Board) -> String {
    let mut result = String::new();
    for y in 0..board.height() {
        for x in 0..board.width() {
            let label = board
                .card_at(x, y)
                .map(|card| card.short_name())
                .unwrap_or_default();
            result += &format!("{:>6} ", label);
        }
        result.push('\n');
    }
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_board(self))
    }
}
