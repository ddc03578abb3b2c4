use log::{debug, info};

use std::collections::{HashMap, HashSet};

use crate::ballot::*;
use crate::config::*;
use crate::rounds;

/// The ballots and candidates still in play at one point of the count.
///
/// Each round of the count works on its own copy: the ballots of a state are
/// never shared with another state.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionState {
    ballots: Vec<Ballot>,
    candidates: HashSet<String>,
    // Deepest rank worth looking at when breaking a tie.
    max_rank: u32,
    rules: VoteRules,
}

impl Default for ElectionState {
    fn default() -> Self {
        ElectionState::new(&VoteRules::DEFAULT_RULES)
    }
}

impl ElectionState {
    pub fn new(rules: &VoteRules) -> ElectionState {
        ElectionState {
            ballots: Vec::new(),
            candidates: HashSet::new(),
            max_rank: 0,
            rules: rules.clone(),
        }
    }

    /// Adds a ballot. A ballot without any preference is ignored.
    pub fn add_ballot(&mut self, ballot: Ballot) {
        if ballot.is_empty() {
            debug!("add_ballot: ignoring empty ballot");
            return;
        }
        for p in ballot.preferences() {
            self.candidates.insert(p.candidate.clone());
        }
        self.max_rank = self.max_rank.max(ballot.deepest_rank());
        self.ballots.push(ballot);
    }

    pub fn add_preferences(&mut self, prefs: &[Preference]) -> Result<(), VotingError> {
        let ballot = Ballot::from_preferences(prefs)?;
        self.add_ballot(ballot);
        Ok(())
    }

    /// A new state holding a copy of every ballot, as the next round starts
    /// from. The deepest rank is measured again on the ballots.
    pub fn fresh_copy(&self) -> ElectionState {
        let mut res = ElectionState::new(&self.rules);
        for b in self.ballots.iter() {
            res.add_ballot(b.clone());
        }
        res
    }

    pub fn rules(&self) -> &VoteRules {
        &self.rules
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn num_ballots(&self) -> usize {
        self.ballots.len()
    }

    /// The candidates still running, sorted by name.
    pub fn candidates(&self) -> Vec<String> {
        let mut res: Vec<String> = self.candidates.iter().cloned().collect();
        res.sort();
        res
    }

    pub fn max_rank(&self) -> u32 {
        self.max_rank
    }

    /// Counts, for every running candidate, the ballots that put this candidate
    /// at exactly the given rank. Candidates without any such ballot are
    /// reported with a count of zero.
    pub fn count_at_rank(&self, rank: u32) -> HashMap<String, u64> {
        let mut counts: HashMap<String, u64> = self
            .candidates
            .iter()
            .map(|c| (c.clone(), 0))
            .collect();
        for b in self.ballots.iter() {
            if let Some(c) = b.candidate_at(rank) {
                if let Some(count) = counts.get_mut(c) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// The first-choice tally, sorted by candidate name.
    pub fn tally(&self) -> Vec<(String, u64)> {
        let mut res: Vec<(String, u64)> = self.count_at_rank(1).into_iter().collect();
        res.sort();
        res
    }

    /// All the candidates that share the lowest count, sorted by name.
    pub fn candidates_with_min(counts: &HashMap<String, u64>) -> Vec<String> {
        match counts.values().min() {
            Some(&min_count) => candidates_with_count(counts, min_count),
            None => Vec::new(),
        }
    }

    /// All the candidates that share the highest count, sorted by name.
    pub fn candidates_with_max(counts: &HashMap<String, u64>) -> Vec<String> {
        match counts.values().max() {
            Some(&max_count) => candidates_with_count(counts, max_count),
            None => Vec::new(),
        }
    }

    /// Finds the candidates to eliminate in this round.
    ///
    /// Starts with the candidates tied on the lowest first-choice count. Under
    /// `TieBreakMode::DeeperRanks`, the tie is then narrowed rank after rank to
    /// the candidates that also hold the lowest count at that rank. A rank at
    /// which none of the tied candidates is lowest does not change the tie.
    /// All the candidates still tied at the end are eliminated together.
    pub fn resolve_elimination_set(&self) -> Vec<String> {
        let mut tied = Self::candidates_with_min(&self.count_at_rank(1));
        if self.rules.tiebreak_mode == TieBreakMode::FirstRankOnly {
            return tied;
        }

        let mut rank = 2;
        while tied.len() > 1 && rank <= self.max_rank {
            let lowest = Self::candidates_with_min(&self.count_at_rank(rank));
            let narrowed: Vec<String> = tied
                .iter()
                .filter(|c| lowest.contains(c))
                .cloned()
                .collect();
            if narrowed.is_empty() {
                debug!(
                    "resolve_elimination_set: rank {} does not separate {:?}",
                    rank, tied
                );
            } else {
                tied = narrowed;
            }
            rank += 1;
        }
        debug!("resolve_elimination_set: eliminating {:?}", tied);
        tied
    }

    /// Removes a candidate from the election and from every ballot.
    /// Ballots left without any preference are dropped.
    pub fn eliminate(&mut self, candidate: &str) -> EliminationStats {
        let mut stats = self.eliminate_all(&[candidate.to_string()]);
        stats.pop().unwrap_or(EliminationStats {
            name: candidate.to_string(),
            transfers: Vec::new(),
            exhausted: 0,
        })
    }

    /// Removes several candidates at once.
    ///
    /// Returns, for each eliminated candidate in the given order, where the
    /// ballots that had it as their first choice went.
    pub fn eliminate_all(&mut self, eliminated: &[String]) -> Vec<EliminationStats> {
        let mut transfers: HashMap<&str, HashMap<String, u64>> = eliminated
            .iter()
            .map(|c| (c.as_str(), HashMap::new()))
            .collect();
        let mut exhausted: HashMap<&str, u64> =
            eliminated.iter().map(|c| (c.as_str(), 0)).collect();

        for c in eliminated {
            self.candidates.remove(c);
        }

        self.ballots.retain_mut(|b| {
            let old_first: Option<String> = b.top_choice().map(|s| s.to_string());
            for c in eliminated {
                b.remove_candidate(c);
            }
            if let Some(old) = old_first {
                if b.is_empty() {
                    if let Some(e) = exhausted.get_mut(old.as_str()) {
                        *e += 1;
                    }
                } else if let (Some(dest), Some(new_first)) =
                    (transfers.get_mut(old.as_str()), b.top_choice())
                {
                    *dest.entry(new_first.to_string()).or_insert(0) += 1;
                }
            }
            !b.is_empty()
        });

        self.max_rank = match self.rules.max_rank_policy {
            MaxRankPolicy::Recompute => self
                .ballots
                .iter()
                .map(|b| b.deepest_rank())
                .max()
                .unwrap_or(0),
            MaxRankPolicy::DecrementPerElimination => {
                self.max_rank
                    .saturating_sub(u32::try_from(eliminated.len()).unwrap_or(u32::MAX))
            }
        };

        let stats: Vec<EliminationStats> = eliminated
            .iter()
            .map(|c| {
                let mut ts: Vec<(String, u64)> = transfers
                    .remove(c.as_str())
                    .unwrap_or_default()
                    .into_iter()
                    .collect();
                ts.sort();
                EliminationStats {
                    name: c.clone(),
                    transfers: ts,
                    exhausted: exhausted.get(c.as_str()).cloned().unwrap_or(0),
                }
            })
            .collect();
        info!(
            "eliminate_all: {:?} -> {} ballots left, max rank {}",
            eliminated,
            self.ballots.len(),
            self.max_rank
        );
        stats
    }

    /// True when the count can stop: a candidate holds a strict majority of
    /// the first choices, all the candidates left are tied, or nobody is left.
    pub fn has_decisive_result(&self) -> bool {
        if self.candidates.is_empty() {
            return true;
        }
        let counts = self.count_at_rank(1);
        let top = counts.values().max().cloned().unwrap_or(0);
        let bottom = counts.values().min().cloned().unwrap_or(0);
        let total = self.ballots.len() as u64;
        // Strict majority, without dividing by a possibly empty total.
        2 * top > total || top == bottom
    }

    /// The candidates with the most first choices. Only meaningful once
    /// `has_decisive_result` holds.
    pub fn winners(&self) -> Vec<String> {
        Self::candidates_with_max(&self.count_at_rank(1))
    }

    /// Runs the count on a copy of this state and returns the winner(s).
    pub fn winner(&self) -> Result<Vec<String>, VotingError> {
        rounds::compute_winner(self)
    }

    /// The candidate(s) finishing in the n-th position (1 is the winner).
    /// Empty once every candidate has been placed.
    pub fn nth_candidate(&self, n: usize) -> Result<Vec<String>, VotingError> {
        rounds::nth_place(self, n)
    }
}

fn candidates_with_count(counts: &HashMap<String, u64>, count: u64) -> Vec<String> {
    let mut res: Vec<String> = counts
        .iter()
        .filter_map(|(c, vc)| if *vc == count { Some(c.clone()) } else { None })
        .collect();
    res.sort();
    res
}
