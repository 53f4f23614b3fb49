//! Telegram-backed member directory.
//!
//! Wraps a `grammers` client. Session setup failures of every kind are
//! reported through [`ConnectError`]; the caller decides how much of that
//! detail to show.

use crate::login;
use async_trait::async_trait;
use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;
use grammers_tl_types as tl;
use raffle_common::{DirectoryError, MemberDirectory, PageRequest, Participant};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Session file kept in the home directory between runs.
pub const SESSION_FILE_NAME: &str = ".raffle_telegram.session";

/// Failures while establishing an authorized session.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// No session path was given and the home directory is unknown.
    #[error("cannot locate home directory for the session file")]
    NoHomeDirectory,

    /// The session file could not be read or written.
    #[error("session file error: {0}")]
    Session(#[source] std::io::Error),

    /// The connection to Telegram could not be opened.
    #[error("connection failed: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Checking whether the session is authorized failed.
    #[error("authorization check failed: {0}")]
    Authorization(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Reading login input from the terminal failed.
    #[error("cannot read login input: {0}")]
    Prompt(#[source] dialoguer::Error),

    /// Telegram rejected the login.
    #[error("sign-in failed: {0}")]
    SignIn(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ConnectError {
    /// Short name of the setup step that failed.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NoHomeDirectory | Self::Session(_) => "session",
            Self::Connect(_) => "connect",
            Self::Authorization(_) => "authorization",
            Self::Prompt(_) | Self::SignIn(_) => "sign-in",
        }
    }
}

/// What is needed to open a session.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_id: i32,
    pub api_hash: String,
    pub session_path: PathBuf,
}

impl Credentials {
    /// Builds credentials, falling back to the session file in the home
    /// directory when no path is given.
    pub fn new(
        api_id: i32,
        api_hash: impl Into<String>,
        session_path: Option<PathBuf>,
    ) -> Result<Self, ConnectError> {
        let session_path = match session_path {
            Some(path) => path,
            None => default_session_path().ok_or(ConnectError::NoHomeDirectory)?,
        };

        Ok(Self {
            api_id,
            api_hash: api_hash.into(),
            session_path,
        })
    }
}

/// `~/.raffle_telegram.session`, if the home directory is known.
#[must_use]
pub fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SESSION_FILE_NAME))
}

/// Channel membership read through a signed-in Telegram account.
pub struct TelegramDirectory {
    client: Client,
}

impl TelegramDirectory {
    /// Connects, signs in interactively if the stored session is not
    /// authorized, and saves the session for the next run.
    pub async fn connect(credentials: &Credentials) -> Result<Self, ConnectError> {
        let session = Session::load_file_or_create(&credentials.session_path)
            .map_err(ConnectError::Session)?;

        let client = Client::connect(Config {
            session,
            api_id: credentials.api_id,
            api_hash: credentials.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| ConnectError::Connect(e.into()))?;

        let authorized = client
            .is_authorized()
            .await
            .map_err(|e| ConnectError::Authorization(e.into()))?;

        if !authorized {
            tracing::info!("Session is not authorized, signing in");
            login::sign_in(&client).await?;
            save_session(&client, &credentials.session_path)?;
        }

        tracing::debug!(path = %credentials.session_path.display(), "Connected to Telegram");

        Ok(Self { client })
    }

    async fn resolve_channel(&self, channel: &str) -> Result<tl::enums::InputChannel, DirectoryError> {
        let username = channel.trim_start_matches('@');

        let chat = self
            .client
            .resolve_username(username)
            .await
            .map_err(request_failed)?
            .ok_or_else(|| DirectoryError::ChannelNotFound(channel.to_string()))?;

        chat.pack()
            .try_to_input_channel()
            .ok_or_else(|| DirectoryError::NotAChannel(channel.to_string()))
    }
}

#[async_trait]
impl MemberDirectory for TelegramDirectory {
    async fn member_count(&self, channel: &str) -> Result<u64, DirectoryError> {
        let input_channel = self.resolve_channel(channel).await?;

        let tl::enums::messages::ChatFull::Full(full) = self
            .client
            .invoke(&tl::functions::channels::GetFullChannel {
                channel: input_channel,
            })
            .await
            .map_err(request_failed)?;

        match full.full_chat {
            tl::enums::ChatFull::ChannelFull(info) => {
                let count = info.participants_count.unwrap_or(0);
                tracing::info!(channel, count, "Fetched member count");
                Ok(u64::try_from(count).unwrap_or(0))
            }
            _ => Err(DirectoryError::UnexpectedResponse {
                request: "channels.getFullChannel",
            }),
        }
    }

    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Vec<Participant>, DirectoryError> {
        let input_channel = self.resolve_channel(request.channel).await?;

        let response = self
            .client
            .invoke(&tl::functions::channels::GetParticipants {
                channel: input_channel,
                filter: participants_filter(request.search),
                offset: 0,
                limit: i32::try_from(request.limit).unwrap_or(i32::MAX),
                hash: 0,
            })
            .await
            .map_err(request_failed)?;

        match response {
            tl::enums::channels::ChannelParticipants::Participants(page) => {
                Ok(page.users.into_iter().filter_map(participant_from_user).collect())
            }
            tl::enums::channels::ChannelParticipants::NotModified => {
                Err(DirectoryError::UnexpectedResponse {
                    request: "channels.getParticipants",
                })
            }
        }
    }
}

/// Name search over the channel; an empty query matches every member.
fn participants_filter(search: Option<&str>) -> tl::enums::ChannelParticipantsFilter {
    tl::enums::ChannelParticipantsFilter::ChannelParticipantsSearch(
        tl::types::ChannelParticipantsSearch {
            q: search.unwrap_or_default().to_string(),
        },
    )
}

fn save_session(client: &Client, path: &Path) -> Result<(), ConnectError> {
    client
        .session()
        .save_to_file(path)
        .map_err(ConnectError::Session)
}

fn participant_from_user(user: tl::enums::User) -> Option<Participant> {
    match user {
        tl::enums::User::User(user) => Some(Participant {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
        }),
        _ => None,
    }
}

fn request_failed<E>(err: E) -> DirectoryError
where
    E: std::error::Error + Send + Sync + 'static,
{
    DirectoryError::Request(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_path_wins() {
        let credentials =
            Credentials::new(12345, "hash", Some(PathBuf::from("/tmp/raffle.session"))).unwrap();

        assert_eq!(credentials.session_path, PathBuf::from("/tmp/raffle.session"));
        assert_eq!(credentials.api_id, 12345);
        assert_eq!(credentials.api_hash, "hash");
    }

    #[test]
    fn default_session_lives_in_home() {
        if let Some(path) = default_session_path() {
            assert!(path.ends_with(SESSION_FILE_NAME));
        }
    }

    fn search_query(filter: &tl::enums::ChannelParticipantsFilter) -> Option<&str> {
        match filter {
            tl::enums::ChannelParticipantsFilter::ChannelParticipantsSearch(search) => {
                Some(search.q.as_str())
            }
            _ => None,
        }
    }

    #[test]
    fn unfiltered_page_searches_with_empty_query() {
        assert_eq!(search_query(&participants_filter(None)), Some(""));
    }

    #[test]
    fn search_term_becomes_the_query() {
        assert_eq!(search_query(&participants_filter(Some("anna"))), Some("anna"));
    }

    #[test]
    fn every_failure_has_a_stage() {
        let io = || std::io::Error::other("boom");
        let errors = [
            ConnectError::NoHomeDirectory,
            ConnectError::Session(io()),
            ConnectError::Connect(Box::new(io())),
            ConnectError::Authorization(Box::new(io())),
            ConnectError::Prompt(dialoguer::Error::from(io())),
            ConnectError::SignIn(Box::new(io())),
        ];

        let stages: Vec<&str> = errors.iter().map(ConnectError::stage).collect();

        assert_eq!(
            stages,
            vec!["session", "session", "connect", "authorization", "sign-in", "sign-in"]
        );
    }
}
