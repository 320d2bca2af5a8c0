use super::*;
use crate::models::{Game, GamePayload, Tag, TagPayload};

impl TwitchClient {
    /// Look up games by id or exact name.
    pub async fn get_games<I, R>(&self, games: I) -> Result<Vec<Game>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let data: Vec<GamePayload> = self.lookup("/games", QueryKeys::GAMES, games).await?;
        Ok(data.into_iter().map(Game::from).collect())
    }

    pub async fn get_game(&self, game: impl Into<Reference>) -> Result<Option<Game>, TwitchError> {
        Ok(self.get_games([game.into()]).await?.into_iter().next())
    }

    /// Look up stream tags by id. Unknown ids are silently absent.
    pub async fn get_tags<I, R>(&self, tags: I) -> Result<Vec<Tag>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let data: Vec<TagPayload> = self.lookup("/tags/streams", QueryKeys::TAGS, tags).await?;
        Ok(data.into_iter().map(Tag::from).collect())
    }
}
