use std::fmt;

use serde::Deserialize;

use super::{Identified, Identifier, Resolve};
use crate::{TwitchClient, TwitchError};

/// Game object from GET /helix/games.
#[derive(Debug, Clone, Deserialize)]
pub struct GamePayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub box_art_url: String,
}

/// A game or category.
#[derive(Debug, Clone)]
pub struct Game {
    id: Identifier,
    name: String,
    box_art_url: String,
}

impl From<GamePayload> for Game {
    fn from(data: GamePayload) -> Self {
        Self {
            id: data.id.into(),
            name: data.name,
            box_art_url: data.box_art_url,
        }
    }
}

impl Game {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Box art URL template with `{width}x{height}` placeholders.
    pub fn box_art_url(&self) -> &str {
        &self.box_art_url
    }

    pub fn box_art_url_sized(&self, width: u32, height: u32) -> String {
        self.box_art_url
            .replace("{width}", &width.to_string())
            .replace("{height}", &height.to_string())
    }
}

impl Identified for Game {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A game known only by id.
#[derive(Debug, Clone)]
pub struct PartialGame {
    id: Identifier,
}

impl PartialGame {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self { id: id.into() }
    }
}

impl Identified for PartialGame {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl Resolve for PartialGame {
    type Full = Game;

    /// Streams without a category carry an empty game id; that resolves to
    /// `None` without a request.
    async fn resolve(&self, client: &TwitchClient) -> Result<Option<Game>, TwitchError> {
        if self.id.as_str().is_empty() {
            return Ok(None);
        }
        client.get_game(self).await
    }
}

id_equality!(Game, PartialGame);
