use log::debug;
use snafu::{ensure, OptionExt};

use crate::config::*;

/// One (candidate, rank) pair on a ballot. Rank 1 is the most preferred.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Preference {
    pub candidate: String,
    pub rank: u32,
}

impl Preference {
    pub fn new(candidate: impl Into<String>, rank: u32) -> Preference {
        Preference {
            candidate: candidate.into(),
            rank,
        }
    }
}

/// The ranked preferences of a single voter.
///
/// Invariant: no two preferences share a rank, and a candidate appears at most
/// once. Removing a candidate closes the gap it leaves in the ranks.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Ballot {
    preferences: Vec<Preference>,
}

impl Ballot {
    pub fn new() -> Ballot {
        Ballot::default()
    }

    /// Builds a ballot from explicit (candidate, rank) pairs.
    pub fn from_preferences(prefs: &[Preference]) -> Result<Ballot, VotingError> {
        let mut ballot = Ballot::new();
        for p in prefs {
            ballot.add_preference(p.candidate.clone(), p.rank)?;
        }
        Ok(ballot)
    }

    /// Builds a ballot from candidates listed from most to least preferred.
    pub fn from_ranking<S: AsRef<str>>(candidates: &[S]) -> Result<Ballot, VotingError> {
        let mut ballot = Ballot::new();
        for (idx, c) in candidates.iter().enumerate() {
            let rank = rank_from_index(idx).context(RankOverflowSnafu {
                candidate: c.as_ref(),
            })?;
            ballot.add_preference(c.as_ref(), rank)?;
        }
        Ok(ballot)
    }

    pub fn add_preference(
        &mut self,
        candidate: impl Into<String>,
        rank: u32,
    ) -> Result<(), VotingError> {
        let candidate = candidate.into();
        ensure!(rank > 0, ZeroRankSnafu { candidate });
        if let Some(existing) = self.candidate_at(rank) {
            return DuplicateRankSnafu {
                rank,
                existing: existing.to_string(),
            }
            .fail();
        }
        ensure!(
            !self.preferences.iter().any(|p| p.candidate == candidate),
            DuplicateCandidateSnafu { candidate }
        );
        self.preferences.push(Preference { candidate, rank });
        Ok(())
    }

    /// Removes the candidate and moves every lower preference up by one rank.
    ///
    /// Returns the rank the candidate held, or None if it was not on the ballot.
    pub fn remove_candidate(&mut self, candidate: &str) -> Option<u32> {
        let idx = self
            .preferences
            .iter()
            .position(|p| p.candidate == candidate)?;
        let removed = self.preferences.remove(idx);
        for p in self.preferences.iter_mut() {
            if p.rank > removed.rank {
                p.rank -= 1;
            }
        }
        debug!(
            "remove_candidate: removed {:?} at rank {}",
            candidate, removed.rank
        );
        Some(removed.rank)
    }

    pub fn candidate_at(&self, rank: u32) -> Option<&str> {
        self.preferences
            .iter()
            .find(|p| p.rank == rank)
            .map(|p| p.candidate.as_str())
    }

    pub fn top_choice(&self) -> Option<&str> {
        self.candidate_at(1)
    }

    /// The largest rank on this ballot, 0 if the ballot is empty.
    pub fn deepest_rank(&self) -> u32 {
        self.preferences.iter().map(|p| p.rank).max().unwrap_or(0)
    }

    /// The preferences, in the order they were added.
    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    pub fn len(&self) -> usize {
        self.preferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }
}

/// The rank of the choice at position `idx` (starting at 0) of an ordered
/// list, or None past `u32::MAX`.
pub fn rank_from_index(idx: usize) -> Option<u32> {
    u32::try_from(idx).ok()?.checked_add(1)
}
