use serde::{Deserialize, Serialize};

/// Piece color. Red moves first in a fresh game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Get the other color
    pub fn opposite(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Get color name for display
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
        }
    }
}

/// Piece tier. Rings are placed directly; towers and lasers are formed by
/// combining collinear runs of the tier below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Ring,
    Tower,
    Laser,
}

impl PieceKind {
    /// The tier a combined run of this kind promotes into. Lasers are the
    /// top tier and combine no further.
    pub fn next_tier(self) -> Option<PieceKind> {
        match self {
            PieceKind::Ring => Some(PieceKind::Tower),
            PieceKind::Tower => Some(PieceKind::Laser),
            PieceKind::Laser => None,
        }
    }
}

/// One square of the board: empty, or a piece of some kind and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied(PieceKind, Color),
}

impl Cell {
    pub fn of(kind: PieceKind, color: Color) -> Cell {
        Cell::Occupied(kind, color)
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(kind, _) => Some(kind),
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(_, color) => Some(color),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_color() {
        assert_eq!(Color::Red.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::Red);
    }

    #[test]
    fn test_color_name() {
        assert_eq!(Color::Red.name(), "Red");
        assert_eq!(Color::Black.name(), "Black");
    }

    #[test]
    fn test_next_tier_ladder() {
        assert_eq!(PieceKind::Ring.next_tier(), Some(PieceKind::Tower));
        assert_eq!(PieceKind::Tower.next_tier(), Some(PieceKind::Laser));
        assert_eq!(PieceKind::Laser.next_tier(), None);
    }

    #[test]
    fn test_occupied_cell_classification() {
        let cell = Cell::of(PieceKind::Tower, Color::Black);
        assert_eq!(cell.kind(), Some(PieceKind::Tower));
        assert_eq!(cell.color(), Some(Color::Black));
        assert!(!cell.is_empty());
    }

    #[test]
    fn test_empty_cell_has_no_kind_or_color() {
        assert_eq!(Cell::Empty.kind(), None);
        assert_eq!(Cell::Empty.color(), None);
        assert!(Cell::Empty.is_empty());
    }

    #[test]
    fn test_cell_serde_round_trip() {
        let cells = [
            Cell::Empty,
            Cell::of(PieceKind::Ring, Color::Red),
            Cell::of(PieceKind::Tower, Color::Red),
            Cell::of(PieceKind::Laser, Color::Red),
            Cell::of(PieceKind::Ring, Color::Black),
            Cell::of(PieceKind::Tower, Color::Black),
            Cell::of(PieceKind::Laser, Color::Black),
        ];
        for cell in cells {
            let json = serde_json::to_string(&cell).unwrap();
            let decoded: Cell = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, cell);
            // Re-encoding is byte-stable.
            assert_eq!(serde_json::to_string(&decoded).unwrap(), json);
        }
    }
}
