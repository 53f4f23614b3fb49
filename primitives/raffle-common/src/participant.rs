//! Channel members and the deduplicating collection they are gathered into.

use std::collections::HashSet;

/// A channel member as returned by the platform.
///
/// Only `id` identifies a participant; names and handles may collide freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Platform-assigned user identifier.
    pub id: i64,
    /// First name, if the account has one.
    pub first_name: Option<String>,
    /// Last name, if the account has one.
    pub last_name: Option<String>,
    /// Public handle without the leading `@`.
    pub username: Option<String>,
}

impl Participant {
    /// Creates a participant with only an identifier set.
    #[must_use]
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            username: None,
        }
    }

    /// Sets the first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: Option<&str>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = last_name.map(str::to_owned);
        self
    }

    /// Sets the handle.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// First and last name joined by a space, skipping the missing parts.
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Insertion-ordered set of participants keyed by identifier.
///
/// The collection only grows, and only through [`merge`](Self::merge).
#[derive(Debug, Clone, Default)]
pub struct ParticipantCollection {
    members: Vec<Participant>,
    seen: HashSet<i64>,
}

impl ParticipantCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every participant whose id is not present yet, keeping the
    /// first-seen order. Returns how many were added.
    pub fn merge<I>(&mut self, fetched: I) -> usize
    where
        I: IntoIterator<Item = Participant>,
    {
        let before = self.members.len();

        for participant in fetched {
            if self.seen.insert(participant.id) {
                self.members.push(participant);
            }
        }

        self.members.len() - before
    }

    /// Returns `true` if a participant with this id has been merged.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.seen.contains(&id)
    }

    /// Number of distinct participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing has been merged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Participants in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[Participant] {
        &self.members
    }

    /// Iterates participants in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a ParticipantCollection {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
