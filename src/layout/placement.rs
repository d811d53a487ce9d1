//! Grid placement.

use super::types::Position;

/// Number of grid columns for `n` tables: `ceil(sqrt(n))`, at least 1.
pub fn grid_columns(n: usize) -> usize {
    let mut columns = (n as f64).sqrt().ceil() as usize;
    // Guard against float error on perfect squares.
    while columns > 1 && (columns - 1) * (columns - 1) >= n {
        columns -= 1;
    }
    while columns * columns < n {
        columns += 1;
    }
    columns.max(1)
}

/// Grid cell (column, row) of the i-th table.
pub fn grid_cell(index: usize, columns: usize) -> (usize, usize) {
    (index % columns, index / columns)
}

pub fn cell_position(
    cell: (usize, usize),
    origin: (f64, f64),
    spacing: (f64, f64),
) -> Position {
    Position {
        x: origin.0 + cell.0 as f64 * spacing.0,
        y: origin.1 + cell.1 as f64 * spacing.1,
    }
}
