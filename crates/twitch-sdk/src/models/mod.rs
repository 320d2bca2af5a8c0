//! Typed Helix resource models.
//!
//! Every model is built once from a decoded payload (`TryFrom<XxxPayload>`)
//! and never mutated afterwards. Enumerated sub-fields are parsed strictly:
//! a value outside the known set fails construction with
//! [`TwitchError::ApiMismatch`] instead of being defaulted.
//!
//! Listing endpoints often embed only an id (and name) for related
//! resources. Those are held as partial references ([`PartialUser`],
//! [`PartialGame`], [`PartialTag`]) inside a [`Resolvable`], which is
//! upgraded to the full model only by an explicit fetch.

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{TwitchClient, TwitchError};

/// Declares a closed set of string values with a strict parser.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn parse(value: &str) -> Result<Self, crate::TwitchError> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(crate::TwitchError::ApiMismatch {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Equality by identifier within one type.
macro_rules! id_equality {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.id() == other.id()
                }
            }

            impl Eq for $ty {}
        )+
    };
}

/// Equality by identifier between a partial reference and a full model.
macro_rules! cross_id_equality {
    ($($a:ident <=> $b:ident),+ $(,)?) => {
        $(
            impl PartialEq<$b> for $a {
                fn eq(&self, other: &$b) -> bool {
                    self.id() == other.id()
                }
            }

            impl PartialEq<$a> for $b {
                fn eq(&self, other: &$a) -> bool {
                    self.id() == other.id()
                }
            }
        )+
    };
}

mod clip;
mod extension;
mod follower;
mod game;
mod marker;
mod moderation;
mod stream;
mod subscription;
mod tag;
mod transaction;
mod user;
mod video;
mod webhook;

pub use clip::{Clip, ClipPayload};
pub use extension::{Extension, ExtensionPayload, ExtensionType};
pub use follower::{Follower, FollowerPayload};
pub use game::{Game, GamePayload, PartialGame};
pub use marker::{Marker, MarkerPayload, StreamMarkersPayload, VideoMarkersPayload};
pub use moderation::{
    ModerationEvent, ModerationEventData, ModerationEventPayload, ModerationEventType,
};
pub use stream::{Stream, StreamPayload};
pub use subscription::{Subscription, SubscriptionPayload, SubscriptionTier};
pub use tag::{PartialTag, Tag, TagPayload};
pub use transaction::{
    CostType, ProductCost, ProductData, ProductType, Transaction, TransactionPayload,
};
pub use user::{
    BannedPartialUser, BannedUserPayload, BroadcasterType, PartialUser, User, UserPayload,
    UserType,
};
pub use video::{Video, VideoPayload, VideoType};
pub use webhook::{Webhook, WebhookPayload};

pub(crate) use marker::flatten as flatten_markers;

cross_id_equality!(
    PartialUser <=> User,
    BannedPartialUser <=> User,
    BannedPartialUser <=> PartialUser,
    PartialGame <=> Game,
    PartialTag <=> Tag,
);

/// Opaque platform-assigned identifier, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is a non-empty run of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        is_all_digits(&self.0)
    }

    /// Numeric view of the id; fails for ids that are not plain integers
    /// (clip slugs, tag UUIDs).
    pub fn as_number(&self) -> Result<u64, TwitchError> {
        self.0
            .parse()
            .map_err(|_| TwitchError::Conversion(format!("identifier '{}' to an integer", self.0)))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<u64> for Identifier {
    fn eq(&self, other: &u64) -> bool {
        self.0 == other.to_string()
    }
}

pub(crate) fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Anything keyed by a platform identifier.
pub trait Identified {
    fn id(&self) -> &Identifier;
}

/// A partial reference that can be fetched as its full model.
///
/// Resolution always performs a request; nothing is memoized. A missing
/// upstream resource resolves to `Ok(None)`.
pub trait Resolve: Identified {
    type Full: Identified;

    fn resolve(
        &self,
        client: &TwitchClient,
    ) -> impl Future<Output = Result<Option<Self::Full>, TwitchError>> + Send;
}

/// Either a bare partial reference or its resolved full model.
#[derive(Debug, Clone)]
pub enum Resolvable<P, F> {
    Partial(P),
    Resolved(F),
}

impl<P: Identified, F: Identified> Resolvable<P, F> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolvable::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&F> {
        match self {
            Resolvable::Resolved(full) => Some(full),
            Resolvable::Partial(_) => None,
        }
    }

    pub fn partial(&self) -> Option<&P> {
        match self {
            Resolvable::Partial(partial) => Some(partial),
            Resolvable::Resolved(_) => None,
        }
    }
}

impl<P, F> Resolvable<P, F>
where
    P: Resolve<Full = F> + Sync,
    F: Identified,
{
    /// Fetch the full model once and keep it; later calls return the stored
    /// value without a request. Not-found leaves the partial in place.
    pub async fn upgrade(&mut self, client: &TwitchClient) -> Result<Option<&F>, TwitchError> {
        if let Resolvable::Partial(partial) = &*self {
            let Some(full) = partial.resolve(client).await? else {
                return Ok(None);
            };
            *self = Resolvable::Resolved(full);
        }
        Ok(self.resolved())
    }
}

impl<P: Identified, F: Identified> Identified for Resolvable<P, F> {
    fn id(&self) -> &Identifier {
        match self {
            Resolvable::Partial(partial) => partial.id(),
            Resolvable::Resolved(full) => full.id(),
        }
    }
}

impl<P: Identified, F: Identified> PartialEq for Resolvable<P, F> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// The sentinel used for absent or unparseable timestamps.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Parse an RFC 3339 timestamp, falling back to [`epoch`].
pub(crate) fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(epoch)
}

#[cfg(test)]
mod tests;
