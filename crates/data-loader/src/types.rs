//! Core domain types for rating data and scoring requests.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a user.
///
/// Users are never interpreted numerically, only echoed back in output,
/// so the identifier is kept exactly as it appeared in the input (trimmed).
pub type UserId = String;

/// Identifier of an item. Always parsed as an integer.
pub type ItemId = i64;

// =============================================================================
// Rating Type
// =============================================================================

/// A single training record: one user's rating of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f64,
}

// =============================================================================
// ScoreRequest
// =============================================================================

/// The (user, item) pairs a run has been asked to score.
///
/// Users map to a set of items, so a pair listed twice is scored once.
/// Both levels are ordered, which makes the output of a run independent of
/// hashing and of the order the pairs were read in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRequest {
    users: BTreeMap<UserId, BTreeSet<ItemId>>,
}

impl ScoreRequest {
    /// Creates an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request that scores every item in `items` for every user.
    ///
    /// The result holds `users × items` pairs; a user listed more than once
    /// still gets a single set of items.
    pub fn cross_product<'a, U, I>(users: U, items: I) -> Self
    where
        U: IntoIterator<Item = UserId>,
        I: IntoIterator<Item = &'a ItemId>,
    {
        let items: BTreeSet<ItemId> = items.into_iter().copied().collect();
        let mut request = Self::new();
        for user in users {
            request
                .users
                .entry(user)
                .or_default()
                .extend(items.iter().copied());
        }
        request
    }

    /// Adds a single pair to the request
    pub fn insert(&mut self, user: UserId, item: ItemId) {
        self.users.entry(user).or_default().insert(item);
    }

    /// Number of (user, item) pairs
    pub fn len(&self) -> usize {
        self.users.values().map(|items| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Items requested for one user, if the user is in the request
    pub fn items_for(&self, user: &str) -> Option<&BTreeSet<ItemId>> {
        self.users.get(user)
    }

    /// Iterates over all pairs, by user and then by item within each user
    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemId)> + '_ {
        self.users
            .iter()
            .flat_map(|(user, items)| items.iter().map(move |&item| (user.as_str(), item)))
    }
}
