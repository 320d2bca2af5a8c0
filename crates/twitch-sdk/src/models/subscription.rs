use std::fmt;

use serde::Deserialize;

use super::PartialUser;
use crate::TwitchError;

closed_set! {
    SubscriptionTier {
        Tier1 => "1000",
        Tier2 => "2000",
        Tier3 => "3000",
    }
}

/// Subscription object from GET /helix/subscriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionPayload {
    pub broadcaster_id: String,
    pub broadcaster_name: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub is_gift: bool,
    pub tier: String,
    #[serde(default)]
    pub plan_name: String,
}

/// A user's subscription to a broadcaster.
///
/// Two subscriptions are equal when broadcaster, subscriber and tier match.
#[derive(Debug, Clone)]
pub struct Subscription {
    broadcaster: PartialUser,
    subscriber: PartialUser,
    is_gift: bool,
    tier: SubscriptionTier,
    plan_name: String,
}

impl TryFrom<SubscriptionPayload> for Subscription {
    type Error = TwitchError;

    fn try_from(data: SubscriptionPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            tier: SubscriptionTier::parse(&data.tier)?,
            broadcaster: PartialUser::new(data.broadcaster_id, data.broadcaster_name),
            subscriber: PartialUser::new(data.user_id, data.user_name),
            is_gift: data.is_gift,
            plan_name: data.plan_name,
        })
    }
}

impl Subscription {
    pub fn broadcaster(&self) -> &PartialUser {
        &self.broadcaster
    }

    pub fn subscriber(&self) -> &PartialUser {
        &self.subscriber
    }

    pub fn is_gift(&self) -> bool {
        self.is_gift
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    pub fn plan_name(&self) -> &str {
        &self.plan_name
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.broadcaster == other.broadcaster
            && self.subscriber == other.subscriber
            && self.tier == other.tier
    }
}

impl Eq for Subscription {}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let via = if self.is_gift { "gift" } else { "purchase" };
        write!(
            f,
            "Tier {} subscription: {} subbed to {} via {via}",
            self.tier, self.subscriber, self.broadcaster
        )
    }
}
