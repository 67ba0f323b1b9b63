//! Users, tag sets, drafts and posted comments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a directory user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A directory entry. Owned by the directory; the engine only clones it into tag sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
}

impl User {
    #[must_use]
    pub fn new(user_id: u64, name: impl Into<String>) -> Self {
        Self {
            user_id: UserId(user_id),
            name: name.into(),
        }
    }

    /// The literal text a committed mention of this user produces.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("@{}", self.name)
    }
}

/// Users committed into a draft, keyed by id.
///
/// Re-inserting an id replaces nothing and reports `false`, which keeps
/// repeated commits of the same user idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<User>", into = "Vec<User>")]
pub struct TaggedUsers {
    users: BTreeMap<UserId, User>,
}

impl TaggedUsers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `user`; returns `true` when the id was not tagged before.
    pub fn insert(&mut self, user: User) -> bool {
        if self.users.contains_key(&user.user_id) {
            return false;
        }
        self.users.insert(user.user_id, user);
        true
    }

    #[must_use]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    #[must_use]
    pub fn get(&self, user_id: UserId) -> Option<&User> {
        self.users.get(&user_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&User) -> bool) {
        self.users.retain(|_, user| keep(user));
    }

    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.users.keys().all(|id| other.users.contains_key(id))
    }
}

impl FromIterator<User> for TaggedUsers {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut tags = Self::new();
        for user in iter {
            tags.insert(user);
        }
        tags
    }
}

impl From<Vec<User>> for TaggedUsers {
    fn from(users: Vec<User>) -> Self {
        users.into_iter().collect()
    }
}

impl From<TaggedUsers> for Vec<User> {
    fn from(tags: TaggedUsers) -> Self {
        tags.users.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a TaggedUsers {
    type Item = &'a User;
    type IntoIter = std::collections::btree_map::Values<'a, UserId, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.values()
    }
}

/// The in-progress comment. Exactly one lives in a session at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub author_id: UserId,
    pub text: String,
    pub tags: TaggedUsers,
}

impl Draft {
    #[must_use]
    pub fn new(author_id: UserId) -> Self {
        Self {
            author_id,
            text: String::new(),
            tags: TaggedUsers::new(),
        }
    }

    /// Text length in characters, the unit every index in the engine uses.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A frozen draft handed to the comment sink on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author_id: UserId,
    pub text: String,
    pub tags: TaggedUsers,
}

impl From<Draft> for Comment {
    fn from(draft: Draft) -> Self {
        Self {
            author_id: draft.author_id,
            text: draft.text,
            tags: draft.tags,
        }
    }
}
