use super::*;
use crate::models::{Extension, ExtensionPayload, Follower, FollowerPayload, User, UserPayload};

impl TwitchClient {
    /// Look up users by id or login, mixed freely.
    pub async fn get_users<I, R>(&self, users: I) -> Result<Vec<User>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let data: Vec<UserPayload> = self.lookup("/users", QueryKeys::USERS, users).await?;
        data.into_iter().map(User::try_from).collect()
    }

    /// Look up one user; `Ok(None)` when it does not exist.
    pub async fn get_user(&self, user: impl Into<Reference>) -> Result<Option<User>, TwitchError> {
        Ok(self.get_users([user.into()]).await?.into_iter().next())
    }

    /// Users following `user`.
    pub async fn get_followers(
        &self,
        user: impl Into<Reference>,
    ) -> Result<Vec<Follower>, TwitchError> {
        let to_id = id_param(user, "user")?;
        let data: Vec<FollowerPayload> = self
            .get_data(&format!("/users/follows?to_id={to_id}"))
            .await?;
        Ok(data.into_iter().map(Follower::from).collect())
    }

    /// Extensions installed by the token's user.
    pub async fn get_user_extensions(&self) -> Result<Vec<Extension>, TwitchError> {
        self.require_scope(Scope::UserReadBroadcast)?;
        let data: Vec<ExtensionPayload> = self.get_data("/users/extensions/list").await?;
        data.into_iter().map(Extension::try_from).collect()
    }
}
