// ********* Errors ***********

use snafu::Snafu;

/// Errors raised while building ballots or running the count.
///
/// Ballot errors are permanent: the caller must fix the input. The rejected
/// preference is never added to the ballot.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VotingError {
    #[snafu(display("rank {rank} is already taken by {existing}"))]
    DuplicateRank { rank: u32, existing: String },
    #[snafu(display("candidate {candidate} is already ranked on this ballot"))]
    DuplicateCandidate { candidate: String },
    #[snafu(display("ranks start at 1, got rank 0 for {candidate}"))]
    ZeroRank { candidate: String },
    #[snafu(display("{candidate} is ranked past the largest possible rank"))]
    RankOverflow { candidate: String },
    #[snafu(display("no candidate could be eliminated in round {round}"))]
    NoConvergence { round: u32 },
}

// ******** Output data structures *********

/// What happened to the ballots of an eliminated candidate.
///
/// Only the ballots that had this candidate as their current first choice
/// are accounted for.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationStats {
    pub name: String,
    /// The next first choice of the transferred ballots, sorted by name.
    pub transfers: Vec<(String, u64)>,
    pub exhausted: u64,
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    pub tally: Vec<(String, u64)>,
    pub tally_results_elected: Vec<String>,
    pub tally_result_eliminated: Vec<EliminationStats>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult {
    /// Several winners when the last candidates could not be separated.
    /// Empty for an election without ballots.
    pub winners: Vec<String>,
    pub threshold: u64,
    pub round_stats: Vec<RoundStats>,
}

// ********* Configuration **********

/// How the set of candidates to eliminate is narrowed when several of them
/// share the lowest first-choice count.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Look at rank 2, rank 3, ... and keep only the tied candidates that also
    /// hold the lowest count at that rank. A rank that would rule out every
    /// tied candidate is ignored. Whoever is left is eliminated together.
    DeeperRanks,
    /// All the candidates tied on the lowest first-choice count are
    /// eliminated together.
    FirstRankOnly,
}

/// How the deepest rank worth looking at during a tie break is maintained
/// after an elimination.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum MaxRankPolicy {
    /// The length of the longest remaining ballot.
    Recompute,
    /// Every round starts from the longest ballot, then decreases by one for
    /// every candidate eliminated in the round, whatever the ballots contain.
    /// Kept to reproduce results computed with this approximation.
    DecrementPerElimination,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRules {
    pub tiebreak_mode: TieBreakMode,
    pub max_rank_policy: MaxRankPolicy,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        tiebreak_mode: TieBreakMode::DeeperRanks,
        max_rank_policy: MaxRankPolicy::Recompute,
    };
}

impl Default for VoteRules {
    fn default() -> Self {
        VoteRules::DEFAULT_RULES
    }
}
