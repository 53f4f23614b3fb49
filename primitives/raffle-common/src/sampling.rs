//! Winner selection.

use crate::{Participant, ParticipantCollection};
use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

/// Errors raised while drawing winners.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplingError {
    /// More winners were requested than there are participants.
    #[error("cannot draw {requested} winners from {available} participants")]
    NotEnoughParticipants {
        /// Number of winners asked for.
        requested: usize,
        /// Number of participants collected.
        available: usize,
    },
}

/// Draws `count` distinct participants uniformly at random, without
/// replacement, using the thread-local RNG.
///
/// Winners come back in the order they were drawn.
///
/// # Errors
///
/// Returns [`SamplingError::NotEnoughParticipants`] if `count` exceeds the
/// collection size. Nothing is drawn in that case.
pub fn sample_winners(
    collection: &ParticipantCollection,
    count: usize,
) -> Result<Vec<Participant>, SamplingError> {
    sample_winners_with(collection, count, &mut rand::thread_rng())
}

/// Same as [`sample_winners`], drawing from the given RNG.
///
/// # Errors
///
/// Returns [`SamplingError::NotEnoughParticipants`] if `count` exceeds the
/// collection size.
pub fn sample_winners_with<R>(
    collection: &ParticipantCollection,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Participant>, SamplingError>
where
    R: Rng + ?Sized,
{
    let available = collection.len();
    if count > available {
        return Err(SamplingError::NotEnoughParticipants {
            requested: count,
            available,
        });
    }

    let mut pool: Vec<&Participant> = collection.iter().collect();
    let (drawn, _) = pool.partial_shuffle(rng, count);

    Ok(drawn.iter().map(|p| (*p).clone()).collect())
}
