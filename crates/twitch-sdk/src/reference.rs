//! Identifier normalization for Helix lookups.
//!
//! Callers may address a user or game by numeric id, by login/name, or by
//! passing a model they already hold. Each reference is classified on its
//! own: integers and all-digit strings go under the resource's id key,
//! anything else under its name key.

use url::form_urlencoded;

use crate::models::{
    BannedPartialUser, Game, Identified, Identifier, PartialGame, PartialTag, PartialUser,
    Resolvable, Tag, User, Video, is_all_digits,
};
use crate::{MAX_BATCH, TwitchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Id,
    Name,
}

/// A normalized user-supplied reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    value: String,
    kind: ReferenceKind,
}

impl Reference {
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: ReferenceKind::Id,
        }
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: ReferenceKind::Name,
        }
    }

    fn classify(value: String) -> Self {
        if is_all_digits(&value) {
            Self::id(value)
        } else {
            Self::name(value)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}

macro_rules! reference_from_integer {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Reference {
                fn from(value: $ty) -> Self {
                    Reference::id(value.to_string())
                }
            }
        )+
    };
}

reference_from_integer!(u32, u64, i32, i64);

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Reference::classify(value.trim().to_string())
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Reference::from(value.as_str())
    }
}

impl From<&String> for Reference {
    fn from(value: &String) -> Self {
        Reference::from(value.as_str())
    }
}

impl From<&Identifier> for Reference {
    fn from(value: &Identifier) -> Self {
        Reference::classify(value.as_str().to_string())
    }
}

impl From<&Reference> for Reference {
    fn from(value: &Reference) -> Self {
        value.clone()
    }
}

macro_rules! reference_from_model {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<&$ty> for Reference {
                fn from(value: &$ty) -> Self {
                    Reference::from(value.id())
                }
            }
        )+
    };
}

reference_from_model!(
    User,
    PartialUser,
    BannedPartialUser,
    Game,
    PartialGame,
    Tag,
    PartialTag,
    Video,
    Resolvable<PartialUser, User>,
    Resolvable<PartialGame, Game>,
    Resolvable<PartialTag, Tag>,
);

/// Query keys a resource accepts for lookups.
#[derive(Debug, Clone, Copy)]
pub struct QueryKeys {
    pub id: &'static str,
    /// `None` for resources addressed only by id; every reference then goes
    /// under the id key regardless of its shape.
    pub name: Option<&'static str>,
}

impl QueryKeys {
    pub const USERS: QueryKeys = QueryKeys {
        id: "id",
        name: Some("login"),
    };
    pub const GAMES: QueryKeys = QueryKeys {
        id: "id",
        name: Some("name"),
    };
    pub const STREAMS: QueryKeys = QueryKeys {
        id: "user_id",
        name: Some("user_login"),
    };
    pub const VIDEOS: QueryKeys = QueryKeys {
        id: "id",
        name: None,
    };
    pub const CLIPS: QueryKeys = QueryKeys {
        id: "id",
        name: None,
    };
    pub const TAGS: QueryKeys = QueryKeys {
        id: "tag_id",
        name: None,
    };
    pub const SUBSCRIBERS: QueryKeys = QueryKeys {
        id: "user_id",
        name: None,
    };

    fn key_for(&self, reference: &Reference) -> &'static str {
        match (reference.kind, self.name) {
            (ReferenceKind::Name, Some(name)) => name,
            _ => self.id,
        }
    }
}

/// Collect references, enforcing the 1..=100 batch size.
pub fn collect_batch<I, R>(refs: I) -> Result<Vec<Reference>, TwitchError>
where
    I: IntoIterator<Item = R>,
    R: Into<Reference>,
{
    let refs: Vec<Reference> = refs.into_iter().map(Into::into).collect();
    validate_batch(&refs)?;
    Ok(refs)
}

fn validate_batch(refs: &[Reference]) -> Result<(), TwitchError> {
    if refs.is_empty() {
        return Err(TwitchError::Validation(
            "at least one reference is required".into(),
        ));
    }
    if refs.len() > MAX_BATCH {
        return Err(TwitchError::Validation(format!(
            "at most {MAX_BATCH} references can be fetched at once, got {}",
            refs.len()
        )));
    }
    if refs.iter().any(|r| r.value.is_empty()) {
        return Err(TwitchError::Validation("references must not be empty".into()));
    }
    Ok(())
}

/// Build `?key=value&key=value...` for a batch of references.
///
/// The first reference opens the query with `?`; each following one is
/// appended with `&` under its own independently chosen key.
pub fn build_query(keys: QueryKeys, refs: &[Reference]) -> Result<String, TwitchError> {
    validate_batch(refs)?;

    let mut query = String::new();
    for (index, reference) in refs.iter().enumerate() {
        query.push(if index == 0 { '?' } else { '&' });
        query.push_str(keys.key_for(reference));
        query.push('=');
        query.extend(form_urlencoded::byte_serialize(reference.value.as_bytes()));
    }
    Ok(query)
}
