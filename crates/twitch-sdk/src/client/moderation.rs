use super::*;
use crate::models::{BannedPartialUser, BannedUserPayload, ModerationEvent, ModerationEventPayload};

impl TwitchClient {
    /// Ban and unban events in `broadcaster`'s channel.
    pub async fn get_moderation_events(
        &self,
        broadcaster: impl Into<Reference>,
    ) -> Result<Vec<ModerationEvent>, TwitchError> {
        self.require_scope(Scope::ModerationRead)?;
        let broadcaster_id = id_param(broadcaster, "broadcaster")?;
        let data: Vec<ModerationEventPayload> = self
            .get_data(&format!("/moderation/banned/events?broadcaster_id={broadcaster_id}"))
            .await?;
        data.into_iter().map(ModerationEvent::try_from).collect()
    }

    /// Users currently banned in `broadcaster`'s channel.
    pub async fn get_banned_users(
        &self,
        broadcaster: impl Into<Reference>,
    ) -> Result<Vec<BannedPartialUser>, TwitchError> {
        self.require_scope(Scope::ModerationRead)?;
        let broadcaster_id = id_param(broadcaster, "broadcaster")?;
        let data: Vec<BannedUserPayload> = self
            .get_data(&format!("/moderation/banned?broadcaster_id={broadcaster_id}"))
            .await?;
        Ok(data.into_iter().map(BannedPartialUser::from).collect())
    }
}
