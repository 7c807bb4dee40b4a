use serde::{Deserialize, Serialize};

use super::{Board, BoardSettings, Color, GameOutcome, Position};
use crate::error::{RulesError, SnapshotError};

/// The JSON record exchanged with the room store: the full board plus the
/// color whose turn it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
}

/// One participant's view of a running game: a board bound to "my color",
/// with double-sided mobility recomputed after every mutation and the
/// pending combine origin tracked across chained upgrades.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    our_color: Color,
    can_we_move: bool,
    can_enemy_move: bool,
    upgradeable: Option<Position>,
}

impl GameSession {
    pub fn new(settings: BoardSettings, our_color: Color) -> Self {
        GameSession {
            board: Board::new(settings),
            our_color,
            can_we_move: true,
            can_enemy_move: true,
            upgradeable: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn our_color(&self) -> Color {
        self.our_color
    }

    pub fn enemy_color(&self) -> Color {
        self.our_color.opposite()
    }

    /// Winner, if exactly one color is out of moves.
    pub fn winner(&self) -> Option<Color> {
        if self.can_we_move == self.can_enemy_move {
            None
        } else if self.can_we_move {
            Some(self.our_color)
        } else {
            Some(self.enemy_color())
        }
    }

    pub fn is_draw(&self) -> bool {
        !self.can_we_move && !self.can_enemy_move
    }

    pub fn is_game_over(&self) -> bool {
        !self.can_we_move || !self.can_enemy_move
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            self.winner().map(GameOutcome::Winner)
        }
    }

    pub fn can_place_ring(&self, position: Position) -> bool {
        self.board.can_place_ring(position, self.our_color)
    }

    /// Place a ring for our color. With auto-upgrade on, returns the
    /// combine candidates opened by the placement and remembers the origin
    /// for [`upgrade`](Self::upgrade); otherwise the list is empty and a
    /// combine must be started explicitly via
    /// [`begin_upgrade`](Self::begin_upgrade).
    pub fn place_ring(&mut self, position: Position) -> Result<Vec<Position>, RulesError> {
        self.board.place_ring(position, self.our_color)?;
        self.refresh_mobility();

        if !self.board.settings().auto_upgrade {
            self.upgradeable = None;
            return Ok(Vec::new());
        }
        let candidates = self.board.upgrade_positions(position);
        self.upgradeable = if candidates.is_empty() {
            None
        } else {
            Some(position)
        };
        Ok(candidates)
    }

    /// Start a combine from one of our occupied cells (manual mode).
    /// Returns the candidate cells; empty when no run qualifies or the cell
    /// is not ours.
    pub fn begin_upgrade(&mut self, origin: Position) -> Vec<Position> {
        if self.board.cell_at(origin).color() != Some(self.our_color) {
            return Vec::new();
        }
        let candidates = self.board.upgrade_positions(origin);
        self.upgradeable = if candidates.is_empty() {
            None
        } else {
            Some(origin)
        };
        candidates
    }

    /// Promote the pending run, placing the new piece at `target`. With
    /// auto-upgrade on, returns follow-up candidates when the promoted
    /// piece itself completes a combinable run (chained combines); an empty
    /// list ends the chain.
    pub fn upgrade(&mut self, target: Position) -> Result<Vec<Position>, RulesError> {
        let Some(origin) = self.upgradeable else {
            return Err(RulesError::InvalidUpgrade { position: target });
        };
        self.board.upgrade(origin, target)?;

        let candidates = if self.board.settings().auto_upgrade {
            self.board.upgrade_positions(target)
        } else {
            Vec::new()
        };
        self.upgradeable = if candidates.is_empty() {
            None
        } else {
            Some(target)
        };
        self.refresh_mobility();
        Ok(candidates)
    }

    /// Replace the board wholesale, e.g. on resync from the room store.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.upgradeable = None;
        self.refresh_mobility();
    }

    /// Serialize the board plus turn marker for the room store.
    pub fn export_game(&self, turn: Color) -> String {
        serde_json::to_string(&GameSnapshot {
            board: self.board.clone(),
            turn,
        })
        .expect("board snapshot serializes")
    }

    /// Load a snapshot produced by [`export_game`](Self::export_game);
    /// returns whose turn it is.
    pub fn import_game(&mut self, snapshot: &str) -> Result<Color, SnapshotError> {
        let parsed: GameSnapshot = serde_json::from_str(snapshot)?;
        parsed.board.validate()?;
        self.board = parsed.board;
        self.upgradeable = None;
        self.refresh_mobility();
        Ok(parsed.turn)
    }

    fn refresh_mobility(&mut self) {
        self.can_we_move = self.board.can_move(self.our_color);
        self.can_enemy_move = self.board.can_move(self.enemy_color());
    }
}
