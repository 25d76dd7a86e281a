//! Placement policy for new panels

use core_types::GridPosition;
use std::collections::HashSet;

/// Picks the cell for the next panel
///
/// - Empty grid: `(0, 0)`.
/// - Otherwise the first free cell in row-major order inside the bounding
///   box `[0..=max_row] x [0..=max_column]`.
/// - With no gap, a square grid grows a column at `(0, max_column + 1)` and
///   any other grid grows a row at `(max_row + 1, 0)`.
pub fn next_available_position<I>(occupied: I) -> GridPosition
where
    I: IntoIterator<Item = GridPosition>,
{
    let occupied: HashSet<GridPosition> = occupied.into_iter().collect();
    if occupied.is_empty() {
        return GridPosition::ORIGIN;
    }

    let max_row = occupied.iter().map(|p| p.row).max().unwrap_or(0);
    let max_column = occupied.iter().map(|p| p.column).max().unwrap_or(0);

    for row in 0..=max_row {
        for column in 0..=max_column {
            let cell = GridPosition::new(row, column);
            if !occupied.contains(&cell) {
                return cell;
            }
        }
    }

    if max_row == max_column {
        GridPosition::new(0, max_column + 1)
    } else {
        GridPosition::new(max_row + 1, 0)
    }
}
