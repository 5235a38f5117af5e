//! Serialisable snapshot of a game as one player may see it.
//!
//! Cards in face-down slots and tokens left in the box are never included.

use serde::{Deserialize, Serialize};

use crate::board::Slot;
use crate::cards::{Catalog, ResourceCounts};
use crate::core::{Move, PlayerId, PlayerState};
use crate::phase::Phase;

use super::Game;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SlotView {
    /// The card has been taken.
    Empty { position: usize, row: u8 },
    /// Face down.
    Hidden { position: usize, row: u8 },
    Visible {
        position: usize,
        row: u8,
        card: String,
        selectable: bool,
    },
}

impl SlotView {
    fn of(slot: &Slot, catalog: &Catalog) -> Self {
        let (position, row) = (slot.position(), slot.row());
        match (slot.occupant(), slot.is_visible()) {
            (None, _) => SlotView::Empty { position, row },
            (Some(_), false) => SlotView::Hidden { position, row },
            (Some(card), true) => SlotView::Visible {
                position,
                row,
                card: catalog.card(card).name.clone(),
                selectable: slot.is_selectable(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub coins: u32,
    pub cards: Vec<String>,
    pub wonders_in_hand: Vec<String>,
    pub wonders_built: Vec<String>,
    pub tokens: Vec<String>,
    pub base: ResourceCounts,
    pub wonder: ResourceCounts,
    pub market: ResourceCounts,
    pub science_symbols: usize,
    pub shields: u32,
    pub score: u32,
}

impl PlayerView {
    fn of(game: &Game, city: &PlayerState) -> Self {
        let catalog = game.catalog();
        Self {
            id: city.id,
            coins: city.coins,
            cards: city.cards.iter().map(|&c| catalog.card(c).name.clone()).collect(),
            wonders_in_hand: city
                .wonders_in_hand
                .iter()
                .map(|&w| catalog.wonder(w).name.clone())
                .collect(),
            wonders_built: city
                .wonders_built
                .iter()
                .map(|built| catalog.wonder(built.wonder).name.clone())
                .collect(),
            tokens: city.tokens.iter().map(|t| catalog.token(t.id).name.clone()).collect(),
            base: city.base,
            wonder: city.wonder,
            market: city.market,
            science_symbols: city.science.distinct(),
            shields: city.shields,
            score: game.score(city.id).total(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub viewer: PlayerId,
    pub phase: Phase,
    pub age: u8,
    pub turn: u32,
    pub active_player: PlayerId,
    /// Negative favours player 0.
    pub military_track: i32,
    pub players: Vec<PlayerView>,
    pub board: Vec<SlotView>,
    pub discard: Vec<String>,
    /// Tokens on the board.
    pub available_tokens: Vec<String>,
    pub draft_pool: Vec<String>,
    /// The viewer's legal moves; empty when it is not their turn.
    pub legal_moves: Vec<Move>,
}

impl Game {
    /// Snapshot the game for `viewer`.
    #[must_use]
    pub fn view(&self, viewer: PlayerId) -> GameView {
        let catalog = self.catalog();
        let state = self.state();
        let shared = &state.shared;

        let legal_moves = if viewer == shared.active {
            crate::movegen::enumerate_legal_moves(state, self.phase(), catalog, self.config())
        } else {
            Vec::new()
        };

        GameView {
            viewer,
            phase: *self.phase(),
            age: shared.age,
            turn: shared.turn,
            active_player: shared.active,
            military_track: shared.military,
            players: state.players.iter().map(|(_, city)| PlayerView::of(self, city)).collect(),
            board: state.board().slots().map(|s| SlotView::of(s, catalog)).collect(),
            discard: shared
                .discard
                .iter()
                .map(|&c| catalog.card(c).name.clone())
                .collect(),
            available_tokens: shared
                .available_tokens
                .iter()
                .map(|&t| catalog.token(t).name.clone())
                .collect(),
            draft_pool: shared
                .draft
                .current_pool()
                .iter()
                .map(|&w| catalog.wonder(w).name.clone())
                .collect(),
            legal_moves,
        }
    }
}
