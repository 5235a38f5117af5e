//! Convenience construction of games.

use std::sync::Arc;

use crate::cards::Catalog;
use crate::core::{PlayerId, RulesConfig, SetupError};

use super::Game;

/// Builder for creating a `Game`.
///
/// Defaults to the standard catalog, the default rules and seed 0.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    catalog: Option<Arc<Catalog>>,
    config: RulesConfig,
    seed: u64,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an already loaded catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the first player instead of drawing one.
    #[must_use]
    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.config = self.config.with_first_player(player);
        self
    }

    /// Build the game, still in the start phase.
    pub fn build(self) -> Result<Game, SetupError> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(Catalog::standard()?),
        };
        Ok(Game::new(catalog, self.config, self.seed)?)
    }

    /// Build the game and run the draft, each drafter taking the first
    /// wonder on offer. The game is left at the start of age 1.
    pub fn build_drafted(self) -> Result<Game, SetupError> {
        let mut game = self.build()?;
        game.begin_draft_phase()?;
        loop {
            let Some(&pick) = game.legal_moves().first() else {
                break;
            };
            game.make_move(&pick)?;
        }
        game.begin_game_phase()?;
        Ok(game)
    }
}
