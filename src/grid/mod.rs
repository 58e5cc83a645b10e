//! Grid-selection mode for priority matrices.
//!
//! Some screen items are composite grids (e.g. a nation's priority matrix)
//! where section browsing is the wrong shape. Drilling into such an item
//! hands control to this mode: a cell cursor over a rows × columns matrix
//! with wraparound movement, spoken cell readout, and value adjustment via
//! command tokens executed by the external dispatcher.
//!
//! The grid is a value snapshot built by the owning screen. After an
//! adjustment is dispatched the caller re-fetches the snapshot, so the mode
//! itself never talks to the host.

use crate::domain::{CommandToken, NavError, Result};

/// One cell of a grid: its spoken value and optional adjustment commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Spoken cell value ("2 of 5", "37%").
    pub text: String,
    /// Command raising the cell's value, when the host allows it.
    pub increase: Option<CommandToken>,
    /// Command lowering the cell's value, when the host allows it.
    pub decrease: Option<CommandToken>,
}

impl GridCell {
    /// A read-only cell.
    #[must_use]
    pub fn readonly(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            increase: None,
            decrease: None,
        }
    }

    /// An adjustable cell with both directions available.
    #[must_use]
    pub fn adjustable(
        text: impl Into<String>,
        increase: CommandToken,
        decrease: CommandToken,
    ) -> Self {
        Self {
            text: text.into(),
            increase: Some(increase),
            decrease: Some(decrease),
        }
    }
}

/// A snapshot of a priority matrix: labels plus row-major cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    title: String,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    cells: Vec<Vec<GridCell>>,
}

impl GridModel {
    /// Builds a grid, validating that cell dimensions match the labels.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::GridShape`] when the cell matrix is not
    /// `row_labels.len()` rows of `col_labels.len()` cells each, or when the
    /// grid is empty in either dimension.
    pub fn new(
        title: impl Into<String>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        cells: Vec<Vec<GridCell>>,
    ) -> Result<Self> {
        if row_labels.is_empty() || col_labels.is_empty() {
            return Err(NavError::GridShape("grid has no rows or no columns".into()));
        }
        if cells.len() != row_labels.len() {
            return Err(NavError::GridShape(format!(
                "{} rows of cells for {} row labels",
                cells.len(),
                row_labels.len()
            )));
        }
        if let Some(row) = cells.iter().find(|row| row.len() != col_labels.len()) {
            return Err(NavError::GridShape(format!(
                "row of {} cells for {} column labels",
                row.len(),
                col_labels.len()
            )));
        }
        Ok(Self {
            title: title.into(),
            row_labels,
            col_labels,
            cells,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }
}

/// Cell cursor over a [`GridModel`].
///
/// Mirrors the main navigation state machine at smaller scale: directional
/// movement with wraparound, a spoken readout of the current position, and
/// adjustment commands returned to the caller for dispatch.
#[derive(Debug, Clone)]
pub struct GridNav {
    model: GridModel,
    row: usize,
    col: usize,
}

impl GridNav {
    /// Starts a cursor at the top-left cell.
    #[must_use]
    pub fn new(model: GridModel) -> Self {
        Self {
            model,
            row: 0,
            col: 0,
        }
    }

    /// Replaces the snapshot after a dispatched adjustment, keeping the
    /// cursor position clamped into the new dimensions.
    pub fn replace_model(&mut self, model: GridModel) {
        self.row = self.row.min(model.rows() - 1);
        self.col = self.col.min(model.cols() - 1);
        self.model = model;
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.model.title()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.model.rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.model.cols()
    }

    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn move_up(&mut self) {
        self.row = wrap_back(self.row, self.model.rows());
    }

    pub fn move_down(&mut self) {
        self.row = (self.row + 1) % self.model.rows();
    }

    pub fn move_left(&mut self) {
        self.col = wrap_back(self.col, self.model.cols());
    }

    pub fn move_right(&mut self) {
        self.col = (self.col + 1) % self.model.cols();
    }

    fn cell(&self) -> &GridCell {
        &self.model.cells[self.row][self.col]
    }

    /// The spoken readout for the current cell: "row, column: value".
    #[must_use]
    pub fn spoken_cell(&self) -> String {
        format!(
            "{}, {}: {}",
            self.model.row_labels[self.row], self.model.col_labels[self.col], self.cell().text
        )
    }

    /// The command raising the current cell's value, if adjustable.
    #[must_use]
    pub fn increase(&self) -> Option<CommandToken> {
        self.cell().increase.clone()
    }

    /// The command lowering the current cell's value, if adjustable.
    #[must_use]
    pub fn decrease(&self) -> Option<CommandToken> {
        self.cell().decrease.clone()
    }
}

fn wrap_back(index: usize, count: usize) -> usize {
    if index == 0 {
        count - 1
    } else {
        index - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridModel {
        let cells = (0..2)
            .map(|r| {
                (0..3)
                    .map(|c| GridCell::readonly(format!("{r}-{c}")))
                    .collect()
            })
            .collect();
        GridModel::new(
            "Priorities",
            vec!["Economy".into(), "Welfare".into()],
            vec!["Low".into(), "Mid".into(), "High".into()],
            cells,
        )
        .unwrap()
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let result = GridModel::new(
            "Broken",
            vec!["A".into()],
            vec!["X".into(), "Y".into()],
            vec![vec![GridCell::readonly("only one")]],
        );
        assert!(matches!(result, Err(NavError::GridShape(_))));
    }

    #[test]
    fn movement_wraps_both_axes() {
        let mut nav = GridNav::new(sample());
        nav.move_up();
        assert_eq!(nav.position(), (1, 0));
        nav.move_down();
        assert_eq!(nav.position(), (0, 0));
        nav.move_left();
        assert_eq!(nav.position(), (0, 2));
        nav.move_right();
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn spoken_cell_names_row_column_and_value() {
        let mut nav = GridNav::new(sample());
        nav.move_down();
        nav.move_right();
        assert_eq!(nav.spoken_cell(), "Welfare, Mid: 1-1");
    }

    #[test]
    fn replace_model_clamps_cursor() {
        let mut nav = GridNav::new(sample());
        nav.move_down();
        nav.move_right();
        nav.move_right();
        let smaller = GridModel::new(
            "Priorities",
            vec!["Economy".into()],
            vec!["Low".into()],
            vec![vec![GridCell::readonly("0-0")]],
        )
        .unwrap();
        nav.replace_model(smaller);
        assert_eq!(nav.position(), (0, 0));
    }
}
