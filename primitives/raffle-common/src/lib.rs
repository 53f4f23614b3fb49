//! Raffle Common - Shared Raffle Logic
//!
//! Everything the `raffle` binary does that does not talk to Telegram directly:
//! collecting channel members, deduplicating them, drawing winners and
//! rendering the console report.
//!
//! The platform client stays behind the [`MemberDirectory`] trait, so the whole
//! workflow can be driven by an in-memory directory in tests.
//!
//! # Example
//!
//! ```
//! use raffle_common::{Participant, ParticipantCollection, sample_winners};
//!
//! let mut members = ParticipantCollection::new();
//! members.merge((1..=5).map(Participant::with_id));
//!
//! let winners = sample_winners(&members, 3).unwrap();
//! assert_eq!(winners.len(), 3);
//! ```

mod directory;
mod error;
mod pacing;
mod participant;
mod report;
mod sampling;

pub use directory::{DEFAULT_PAGE_LIMIT, DirectoryError, MemberDirectory, PageRequest, collect_page};
pub use error::RaffleError;
pub use pacing::Pacing;
pub use participant::{Participant, ParticipantCollection};
pub use report::Report;
pub use sampling::{SamplingError, sample_winners, sample_winners_with};
