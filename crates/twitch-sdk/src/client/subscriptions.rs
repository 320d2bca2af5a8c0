use super::*;
use crate::models::{Subscription, SubscriptionPayload};

impl TwitchClient {
    /// Subscriptions of `users` to `broadcaster`.
    ///
    /// Requires [`Scope::ChannelReadSubscriptions`]; checked before any
    /// request is made.
    pub async fn get_subscriptions<I, R>(
        &self,
        broadcaster: impl Into<Reference>,
        users: I,
    ) -> Result<Vec<Subscription>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        self.require_scope(Scope::ChannelReadSubscriptions)?;
        let broadcaster_id = id_param(broadcaster, "broadcaster")?;
        let users = collect_batch(users)?;
        let query = build_query(QueryKeys::SUBSCRIBERS, &users)?;
        let data: Vec<SubscriptionPayload> = self
            .get_data(&format!("/subscriptions{query}&broadcaster_id={broadcaster_id}"))
            .await?;
        data.into_iter().map(Subscription::try_from).collect()
    }

    /// `user`'s subscription to `broadcaster`, if any.
    pub async fn get_subscription(
        &self,
        broadcaster: impl Into<Reference>,
        user: impl Into<Reference>,
    ) -> Result<Option<Subscription>, TwitchError> {
        let subs = self.get_subscriptions(broadcaster, [user.into()]).await?;
        Ok(subs.into_iter().next())
    }
}
