//! Canonical friendship pairs.
//!
//! Friendship is symmetric, so a pair is stored once with the smaller id
//! first. Every write and delete goes through [`FriendshipPair`] so the two
//! paths can never disagree on orientation.

use std::collections::BTreeSet;

use crate::domain::UserId;

/// Unordered pair of distinct users, held as `(low, high)`.
///
/// ## Invariants
/// - `low < high`; a user is never their own friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FriendshipPair {
    low: UserId,
    high: UserId,
}

impl FriendshipPair {
    /// Canonicalise a pair, returning `None` for a self-pair.
    ///
    /// # Examples
    /// ```
    /// use people::domain::{FriendshipPair, UserId};
    ///
    /// let pair = FriendshipPair::new(UserId::new(2), UserId::new(1)).expect("distinct ids");
    /// assert_eq!(pair.low(), UserId::new(1));
    /// assert_eq!(pair.high(), UserId::new(2));
    /// assert!(FriendshipPair::new(UserId::new(3), UserId::new(3)).is_none());
    /// ```
    #[must_use]
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller identifier of the pair.
    #[must_use]
    pub const fn low(self) -> UserId {
        self.low
    }

    /// Larger identifier of the pair.
    #[must_use]
    pub const fn high(self) -> UserId {
        self.high
    }
}

/// Result of canonicalising a batch of pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalPairs {
    /// Distinct canonical pairs in ascending order.
    pub pairs: Vec<FriendshipPair>,
    /// Number of self-pairs that were dropped.
    pub skipped_self_pairs: usize,
}

/// Canonicalise and de-duplicate arbitrary `(a, b)` pairs.
pub fn canonical_pairs<I>(pairs: I) -> CanonicalPairs
where
    I: IntoIterator<Item = (UserId, UserId)>,
{
    let mut distinct = BTreeSet::new();
    let mut skipped_self_pairs = 0;
    for (a, b) in pairs {
        match FriendshipPair::new(a, b) {
            Some(pair) => {
                distinct.insert(pair);
            }
            None => skipped_self_pairs += 1,
        }
    }
    CanonicalPairs {
        pairs: distinct.into_iter().collect(),
        skipped_self_pairs,
    }
}

/// Canonical pairs linking `user` to each id in `friend_ids`.
///
/// # Examples
/// ```
/// use people::domain::{friendships_for, UserId};
///
/// let ids = [2, 3, 1].map(UserId::new);
/// let result = friendships_for(UserId::new(1), ids);
/// assert_eq!(result.pairs.len(), 2);
/// assert_eq!(result.skipped_self_pairs, 1);
/// ```
pub fn friendships_for<I>(user: UserId, friend_ids: I) -> CanonicalPairs
where
    I: IntoIterator<Item = UserId>,
{
    canonical_pairs(friend_ids.into_iter().map(|friend| (user, friend)))
}
