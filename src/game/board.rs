use serde::{Deserialize, Serialize};

use super::{Cell, Color, PieceKind, Position};
use crate::error::{RulesError, SnapshotError};

/// Immutable per-game rule parameters.
///
/// `fixed_start` and `ruins` are variant flags carried in the settings
/// record for snapshot compatibility; no board rule consumes them yet.
/// `auto_upgrade` drives the move flow of the session and UI layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub size: usize,
    pub minimum_combine_length: usize,
    pub allow_diagonal_placement: bool,
    pub fixed_start: bool,
    pub auto_upgrade: bool,
    pub ruins: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            size: 8,
            minimum_combine_length: 3,
            allow_diagonal_placement: false,
            fixed_start: true,
            auto_upgrade: true,
            ruins: false,
        }
    }
}

/// Result of comparing both colors' mobility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Color),
    Draw,
}

/// The playing field: rule settings plus a dense row-major `size²` cell
/// array. The board is the single source of truth; every rule query and
/// mutation lives here, and equality and serialization both derive from the
/// one dense representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    settings: BoardSettings,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty board.
    pub fn new(settings: BoardSettings) -> Self {
        let cells = vec![Cell::Empty; settings.size * settings.size];
        Board { settings, cells }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    fn cell_index(&self, position: Position) -> Option<usize> {
        let size = self.settings.size as i32;
        if position.x < 0 || position.x >= size || position.y < 0 || position.y >= size {
            return None;
        }
        Some(position.x as usize + position.y as usize * self.settings.size)
    }

    /// Cell at `position`. Out-of-range positions read as `Empty`.
    pub fn cell_at(&self, position: Position) -> Cell {
        match self.cell_index(position) {
            Some(index) => self.cells[index],
            None => Cell::Empty,
        }
    }

    /// Write `cell` at `position`, then fire the written piece's area
    /// effect: a Tower clears every differently-colored cell in its
    /// 8-neighborhood, a Laser clears its full row and column. The sweep
    /// runs exactly once for the written cell and is not re-applied for
    /// anything it destroys. Writing `Empty` never cascades.
    ///
    /// # Panics
    ///
    /// Writing a non-empty cell out of range is a bug in the caller and
    /// panics. Writing `Empty` out of range is a no-op.
    pub fn set_cell_at(&mut self, position: Position, cell: Cell) {
        let Some(index) = self.cell_index(position) else {
            if cell.is_empty() {
                return;
            }
            panic!("non-empty cell write out of range at {position}");
        };
        self.cells[index] = cell;

        let Cell::Occupied(kind, color) = cell else {
            return;
        };

        match kind {
            PieceKind::Ring => {}
            PieceKind::Tower => {
                for neighbor in position.adjacent() {
                    self.clear_unless_owned(neighbor, color);
                }
            }
            PieceKind::Laser => {
                for i in 0..self.settings.size as i32 {
                    self.clear_unless_owned(Position::new(i, position.y), color);
                    self.clear_unless_owned(Position::new(position.x, i), color);
                }
            }
        }
    }

    /// One step of the destruction sweep: empty `position` unless it holds
    /// a piece of `color`. Off-board positions are ignored.
    fn clear_unless_owned(&mut self, position: Position, color: Color) {
        let Some(index) = self.cell_index(position) else {
            return;
        };
        if self.cells[index].color() != Some(color) {
            self.cells[index] = Cell::Empty;
        }
    }

    /// Whether `color` may occupy `position` at all: false when an enemy
    /// Tower sits in the 8-neighborhood, or an enemy Laser shares the row
    /// or column. Same-color towers and lasers never deny. The check is
    /// independent of emptiness; run with the opposite color it detects
    /// immobility.
    pub fn can_occupy(&self, position: Position, color: Color) -> bool {
        for neighbor in position.adjacent() {
            let cell = self.cell_at(neighbor);
            if cell.kind() == Some(PieceKind::Tower) && cell.color() != Some(color) {
                return false;
            }
        }

        for i in 0..self.settings.size as i32 {
            for probe in [Position::new(i, position.y), Position::new(position.x, i)] {
                let cell = self.cell_at(probe);
                if cell.kind() == Some(PieceKind::Laser) && cell.color() != Some(color) {
                    return false;
                }
            }
        }

        true
    }

    /// Whether any cell holds a piece of `color`.
    pub fn has_cells(&self, color: Color) -> bool {
        self.cells.iter().any(|cell| cell.color() == Some(color))
    }

    /// Placement legality for a new ring of `color` at `position`: the cell
    /// must be in range, empty, and free of enemy area denial; once the
    /// color is on the board the cell must also touch an existing cell of
    /// that color (orthogonally, plus diagonally when the settings allow
    /// it). The very first placement of a color is unconstrained beyond
    /// denial.
    pub fn can_place_ring(&self, position: Position, color: Color) -> bool {
        if self.cell_index(position).is_none() {
            return false;
        }
        if !self.cell_at(position).is_empty() {
            return false;
        }
        if !self.can_occupy(position, color) {
            return false;
        }
        if !self.has_cells(color) {
            return true;
        }

        if self.settings.allow_diagonal_placement {
            position
                .adjacent()
                .iter()
                .any(|&p| self.cell_at(p).color() == Some(color))
        } else {
            position
                .sides()
                .iter()
                .any(|&p| self.cell_at(p).color() == Some(color))
        }
    }

    /// Place a ring for `color`, validating legality first.
    pub fn place_ring(&mut self, position: Position, color: Color) -> Result<(), RulesError> {
        if !self.can_place_ring(position, color) {
            return Err(RulesError::InvalidPlacement { position });
        }
        self.set_cell_at(position, Cell::of(PieceKind::Ring, color));
        Ok(())
    }

    /// Candidate cells for combining the run through `position`.
    ///
    /// Scans the horizontal and the vertical line through the cell for
    /// maximal contiguous runs of cells identical to it (same kind and
    /// color). When neither run reaches the minimum combine length the
    /// result is empty; otherwise it is the union of every position on each
    /// qualifying line, `position` included. The caller picks one member as
    /// the target cell for the promoted piece.
    pub fn upgrade_positions(&self, position: Position) -> Vec<Position> {
        let cell = self.cell_at(position);
        if cell.is_empty() || cell.kind() == Some(PieceKind::Laser) {
            return Vec::new();
        }

        let mut run_x = Vec::new();
        self.collect_run(position, Position::right, cell, &mut run_x);
        self.collect_run(position, Position::left, cell, &mut run_x);

        let mut run_y = Vec::new();
        self.collect_run(position, Position::down, cell, &mut run_y);
        self.collect_run(position, Position::up, cell, &mut run_y);

        let minimum = self.settings.minimum_combine_length;
        let x_qualifies = 1 + run_x.len() >= minimum;
        let y_qualifies = 1 + run_y.len() >= minimum;
        if !x_qualifies && !y_qualifies {
            return Vec::new();
        }

        let mut positions = vec![position];
        if x_qualifies {
            positions.append(&mut run_x);
        }
        if y_qualifies {
            positions.append(&mut run_y);
        }
        positions
    }

    /// Walk from `start` in one direction, collecting cells identical to
    /// `matching`. Stops at the first mismatch; off-board cells read as
    /// `Empty` and end the run at the edge.
    fn collect_run(
        &self,
        start: Position,
        step: fn(Position) -> Position,
        matching: Cell,
        out: &mut Vec<Position>,
    ) {
        let mut probe = step(start);
        while self.cell_at(probe) == matching {
            out.push(probe);
            probe = step(probe);
        }
    }

    /// Promote the run through `origin` into the next-tier piece at
    /// `target`: every cell of the run is cleared directly (no cascade),
    /// then the new piece is written at `target`, firing its own area
    /// effect from there.
    pub fn upgrade(&mut self, origin: Position, target: Position) -> Result<(), RulesError> {
        let positions = self.upgrade_positions(origin);
        if positions.is_empty() {
            return Err(RulesError::InvalidUpgrade { position: origin });
        }
        if !positions.contains(&target) {
            return Err(RulesError::InvalidUpgrade { position: target });
        }

        let Cell::Occupied(kind, color) = self.cell_at(origin) else {
            unreachable!("upgrade candidates exist only for occupied cells");
        };
        let Some(next) = kind.next_tier() else {
            unreachable!("laser runs are never upgrade candidates");
        };

        for &position in &positions {
            self.set_cell_at(position, Cell::Empty);
        }
        self.set_cell_at(target, Cell::of(next, color));
        Ok(())
    }

    /// Whether `color` has any legal ring placement left. Full-board scan,
    /// recomputed rather than incrementally maintained.
    pub fn can_move(&self, color: Color) -> bool {
        self.positions()
            .any(|position| self.can_place_ring(position, color))
    }

    /// Win condition: a color with no legal placement loses; both blocked
    /// is a draw. `None` while both colors can still move.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match (self.can_move(Color::Red), self.can_move(Color::Black)) {
            (true, true) => None,
            (false, false) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::Winner(Color::Red)),
            (false, true) => Some(GameOutcome::Winner(Color::Black)),
        }
    }

    /// Every in-range position, row by row.
    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.settings.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Check the cell-count invariant of a board that arrived from outside
    /// (snapshot import).
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let expected = self.settings.size * self.settings.size;
        if self.cells.len() != expected {
            return Err(SnapshotError::CellCount {
                size: self.settings.size,
                actual: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Write a cell directly, bypassing cascades. Test setup only.
    #[cfg(test)]
    pub(crate) fn put_for_test(&mut self, position: Position, cell: Cell) {
        let index = self.cell_index(position).expect("test position in range");
        self.cells[index] = cell;
    }
}
