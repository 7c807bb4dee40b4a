//! Room table for turn exchange between two remote participants.
//!
//! The store is an explicit object with a defined lifecycle: created once
//! at process start, passed by handle to whatever serves requests, entries
//! inserted on the first start-game call and never evicted. Reads are
//! idempotent (the non-active participant polls them); writes are
//! last-write-wins, gated only by the active-color flag. The board
//! submitted by the participant holding the turn is trusted wholesale.

use std::collections::HashMap;

use rand::Rng;

use crate::error::StoreError;
use crate::game::{Board, BoardSettings, Color};

const ROOM_CODE_LEN: usize = 8;

/// A single room: the shared board, whose turn it is, and the participants
/// in join order. The first joiner plays Red, the second Black.
#[derive(Debug, Clone)]
struct RoomState {
    board: Board,
    active_color: Color,
    participant_ids: Vec<String>,
}

impl RoomState {
    fn color_of(&self, participant_id: &str) -> Option<Color> {
        match self
            .participant_ids
            .iter()
            .position(|id| id == participant_id)
        {
            Some(0) => Some(Color::Red),
            Some(1) => Some(Color::Black),
            _ => None,
        }
    }

    fn view_for(&self, participant_id: &str) -> RoomView {
        RoomView {
            board: self.board.clone(),
            active_color: self.active_color,
            your_color: self.color_of(participant_id),
        }
    }
}

/// What a participant sees when reading a room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub board: Board,
    pub active_color: Color,
    /// `None` for spectators (a third joiner onwards).
    pub your_color: Option<Color>,
}

/// In-memory table of rooms keyed by opaque room code.
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: HashMap<String, RoomState>,
}

fn generate_room_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    (0..ROOM_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

impl RoomStore {
    pub fn new() -> Self {
        RoomStore {
            rooms: HashMap::new(),
        }
    }

    /// Open a new room with a fresh board; the creator joins as Red and
    /// moves first. Returns the room code to share with the opponent.
    pub fn start_game(
        &mut self,
        participant_id: &str,
        settings: BoardSettings,
    ) -> (String, RoomView) {
        let mut code = generate_room_code();
        while self.rooms.contains_key(&code) {
            code = generate_room_code();
        }

        let room = RoomState {
            board: Board::new(settings),
            active_color: Color::Red,
            participant_ids: vec![participant_id.to_string()],
        };
        let view = room.view_for(participant_id);
        self.rooms.insert(code.clone(), room);
        (code, view)
    }

    /// Join (or rejoin) a room. The second distinct participant becomes
    /// Black; anyone after that observes without a color.
    pub fn join_game(
        &mut self,
        room_code: &str,
        participant_id: &str,
    ) -> Result<RoomView, StoreError> {
        let room = self
            .rooms
            .get_mut(room_code)
            .ok_or_else(|| StoreError::UnknownRoom(room_code.to_string()))?;

        let known = room.participant_ids.iter().any(|id| id == participant_id);
        if !known && room.participant_ids.len() < 2 {
            room.participant_ids.push(participant_id.to_string());
        }
        Ok(room.view_for(participant_id))
    }

    /// Idempotent read of a room — the poll endpoint of the transport
    /// layer. Spectators and participants alike may read.
    pub fn game_state(
        &self,
        room_code: &str,
        participant_id: &str,
    ) -> Result<RoomView, StoreError> {
        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| StoreError::UnknownRoom(room_code.to_string()))?;
        Ok(room.view_for(participant_id))
    }

    /// Replace the room's board wholesale. Only the participant holding
    /// the turn may write; on success the active color flips and the new
    /// active color is returned.
    pub fn update_game(
        &mut self,
        room_code: &str,
        participant_id: &str,
        board: Board,
    ) -> Result<Color, StoreError> {
        let room = self
            .rooms
            .get_mut(room_code)
            .ok_or_else(|| StoreError::UnknownRoom(room_code.to_string()))?;

        let color = room
            .color_of(participant_id)
            .ok_or(StoreError::NotParticipant)?;
        if color != room.active_color {
            return Err(StoreError::NotYourTurn);
        }

        room.board = board;
        room.active_color = color.opposite();
        Ok(room.active_color)
    }

    /// Reset a room to a fresh board with the same settings. The
    /// participants swap colors and Red moves first again.
    pub fn restart_game(
        &mut self,
        room_code: &str,
        participant_id: &str,
    ) -> Result<RoomView, StoreError> {
        let room = self
            .rooms
            .get_mut(room_code)
            .ok_or_else(|| StoreError::UnknownRoom(room_code.to_string()))?;

        if room.color_of(participant_id).is_none() {
            return Err(StoreError::NotParticipant);
        }

        room.board = Board::new(room.board.settings().clone());
        room.active_color = Color::Red;
        room.participant_ids.reverse();
        Ok(room.view_for(participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn start(store: &mut RoomStore) -> String {
        let (code, view) = store.start_game("alice", BoardSettings::default());
        assert_eq!(view.your_color, Some(Color::Red));
        assert_eq!(view.active_color, Color::Red);
        code
    }

    #[test]
    fn test_room_code_shape() {
        let code = generate_room_code();
        assert_eq!(code.len(), ROOM_CODE_LEN);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_start_assigns_red_to_creator() {
        let mut store = RoomStore::new();
        let code = start(&mut store);

        let view = store.game_state(&code, "alice").unwrap();
        assert_eq!(view.your_color, Some(Color::Red));
        assert!(view.board.cell_at(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_join_assigns_black_then_spectators() {
        let mut store = RoomStore::new();
        let code = start(&mut store);

        let bob = store.join_game(&code, "bob").unwrap();
        assert_eq!(bob.your_color, Some(Color::Black));

        let carol = store.join_game(&code, "carol").unwrap();
        assert_eq!(carol.your_color, None);
    }

    #[test]
    fn test_rejoin_keeps_assigned_color() {
        let mut store = RoomStore::new();
        let code = start(&mut store);
        store.join_game(&code, "bob").unwrap();

        let again = store.join_game(&code, "alice").unwrap();
        assert_eq!(again.your_color, Some(Color::Red));
    }

    #[test]
    fn test_unknown_room_is_rejected() {
        let mut store = RoomStore::new();
        assert_eq!(
            store.join_game("NOSUCH00", "alice"),
            Err(StoreError::UnknownRoom("NOSUCH00".to_string()))
        );
        assert!(matches!(
            store.game_state("NOSUCH00", "alice"),
            Err(StoreError::UnknownRoom(_))
        ));
    }

    #[test]
    fn test_update_is_turn_gated() {
        let mut store = RoomStore::new();
        let code = start(&mut store);
        store.join_game(&code, "bob").unwrap();

        let mut board = Board::new(BoardSettings::default());
        board.place_ring(Position::new(3, 3), Color::Red).unwrap();

        // Black does not hold the turn; strangers hold nothing.
        assert_eq!(
            store.update_game(&code, "bob", board.clone()),
            Err(StoreError::NotYourTurn)
        );
        assert_eq!(
            store.update_game(&code, "mallory", board.clone()),
            Err(StoreError::NotParticipant)
        );

        // Red writes and the turn flips.
        let next = store.update_game(&code, "alice", board.clone()).unwrap();
        assert_eq!(next, Color::Black);

        let view = store.game_state(&code, "bob").unwrap();
        assert_eq!(view.board, board);
        assert_eq!(view.active_color, Color::Black);

        // Now Red is the one locked out.
        assert_eq!(
            store.update_game(&code, "alice", board),
            Err(StoreError::NotYourTurn)
        );
    }

    #[test]
    fn test_restart_swaps_colors_and_clears_board() {
        let mut store = RoomStore::new();
        let code = start(&mut store);
        store.join_game(&code, "bob").unwrap();

        let mut board = Board::new(BoardSettings::default());
        board.place_ring(Position::new(3, 3), Color::Red).unwrap();
        store.update_game(&code, "alice", board).unwrap();

        let view = store.restart_game(&code, "alice").unwrap();
        assert_eq!(view.your_color, Some(Color::Black));
        assert_eq!(view.active_color, Color::Red);
        assert!(view.board.cell_at(Position::new(3, 3)).is_empty());

        let bob = store.game_state(&code, "bob").unwrap();
        assert_eq!(bob.your_color, Some(Color::Red));
    }

    #[test]
    fn test_restart_requires_participation() {
        let mut store = RoomStore::new();
        let code = start(&mut store);
        assert_eq!(
            store.restart_game(&code, "mallory"),
            Err(StoreError::NotParticipant)
        );
    }
}
