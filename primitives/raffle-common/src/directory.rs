//! The seam between the raffle workflow and the messaging platform.

use crate::{Pacing, Participant, ParticipantCollection, RaffleError};
use async_trait::async_trait;
use thiserror::Error;

/// Number of participants requested per page.
pub const DEFAULT_PAGE_LIMIT: usize = 200;

/// Errors raised by a [`MemberDirectory`].
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The channel name does not resolve to anything.
    #[error("channel '{0}' not found")]
    ChannelNotFound(String),

    /// The name resolves, but not to a channel or supergroup.
    #[error("'{0}' is not a channel")]
    NotAChannel(String),

    /// The platform answered with something the directory cannot use.
    #[error("unexpected response for {request}")]
    UnexpectedResponse {
        /// The request that got the odd answer.
        request: &'static str,
    },

    /// The request itself failed.
    #[error("platform request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// One page of participants to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<'a> {
    /// Channel username, with or without a leading `@`.
    pub channel: &'a str,
    /// Server-side name filter. `None` lists recent members.
    pub search: Option<&'a str>,
    /// Upper bound on participants returned.
    pub limit: usize,
}

impl<'a> PageRequest<'a> {
    /// A page of [`DEFAULT_PAGE_LIMIT`] members of `channel`.
    ///
    /// An empty search term counts as no search term.
    #[must_use]
    pub fn new(channel: &'a str, search: Option<&'a str>) -> Self {
        Self {
            channel,
            search: search.filter(|term| !term.is_empty()),
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Overrides the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Read access to channel membership on a messaging platform.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Total participant count as reported by the platform.
    async fn member_count(&self, channel: &str) -> Result<u64, DirectoryError>;

    /// Fetches up to `request.limit` participants in a single request.
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Vec<Participant>, DirectoryError>;
}

/// Pauses, fetches one page and merges it into `members`.
///
/// Returns how many new participants the page contributed.
///
/// # Errors
///
/// Returns [`RaffleError::Directory`] if the page cannot be fetched. `members`
/// is left untouched in that case.
pub async fn collect_page<D>(
    directory: &D,
    pacing: &Pacing,
    request: &PageRequest<'_>,
    members: &mut ParticipantCollection,
) -> Result<usize, RaffleError>
where
    D: MemberDirectory + ?Sized,
{
    pacing.pause().await;

    let fetched = directory.fetch_page(request).await?;
    let fetched_len = fetched.len();
    let added = members.merge(fetched);

    tracing::info!(
        channel = request.channel,
        search = request.search.unwrap_or_default(),
        fetched = fetched_len,
        added,
        total = members.len(),
        "Collected page"
    );

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_is_dropped() {
        assert_eq!(PageRequest::new("chan", Some("")).search, None);
        assert_eq!(PageRequest::new("chan", Some("ann")).search, Some("ann"));
    }

    #[test]
    fn default_limit_is_two_hundred() {
        assert_eq!(PageRequest::new("chan", None).limit, 200);
        assert_eq!(PageRequest::new("chan", None).with_limit(10).limit, 10);
    }

    #[test]
    fn directory_errors_name_the_channel() {
        let err = DirectoryError::ChannelNotFound("giveaways".into());
        assert!(err.to_string().contains("giveaways"), "got: {err}");
    }
}
