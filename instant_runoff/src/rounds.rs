/*!
The round driver.

Every round starts from the state left by the previous one: when no decision
can be made, the candidates to eliminate are picked on the current state, and
removed from a fresh copy of it that becomes the next round. Each round
removes at least one candidate, so a count never takes more rounds than there
are candidates.

Places after the first are found by running the whole count again, with the
candidates already placed removed from the ballots.
*/

use log::{debug, info};
use snafu::ensure;

use crate::config::*;
use crate::election::ElectionState;

/// Runs the count on the given state and returns the winner(s).
///
/// Several winners are returned when the last candidates cannot be separated.
/// An election without ballots has no winner.
pub fn compute_winner(state: &ElectionState) -> Result<Vec<String>, VotingError> {
    tabulate(state).map(|res| res.winners)
}

/// Runs the count and records the statistics of every round.
pub fn tabulate(state: &ElectionState) -> Result<VotingResult, VotingError> {
    info!(
        "tabulate: {} ballots, candidates: {:?}, rules: {:?}",
        state.num_ballots(),
        state.candidates(),
        state.rules()
    );
    let threshold = majority_threshold(state.num_ballots());
    let mut round_stats: Vec<RoundStats> = Vec::new();

    if state.candidates().is_empty() {
        info!("tabulate: no candidate, no winner");
        return Ok(VotingResult {
            winners: Vec::new(),
            threshold,
            round_stats,
        });
    }

    let mut current = state.clone();
    loop {
        let round_id = (round_stats.len() + 1) as u32;
        let tally = current.tally();
        info!(
            "Round {} (ballots: {}) tally: {:?}",
            round_id,
            current.num_ballots(),
            tally
        );

        if current.has_decisive_result() {
            let winners = current.winners();
            info!("Round {}: elected {:?}", round_id, winners);
            round_stats.push(RoundStats {
                round: round_id,
                tally,
                tally_results_elected: winners.clone(),
                tally_result_eliminated: Vec::new(),
            });
            return Ok(VotingResult {
                winners,
                threshold,
                round_stats,
            });
        }

        // Decide on this round, apply on a copy.
        let eliminated = current.resolve_elimination_set();
        ensure!(
            !eliminated.is_empty(),
            NoConvergenceSnafu { round: round_id }
        );
        let mut next = current.fresh_copy();
        let elimination_stats = next.eliminate_all(&eliminated);
        for es in elimination_stats.iter() {
            info!(
                "Round {}: {} eliminated, transfers: {:?}, exhausted: {}",
                round_id, es.name, es.transfers, es.exhausted
            );
        }
        round_stats.push(RoundStats {
            round: round_id,
            tally,
            tally_results_elected: Vec::new(),
            tally_result_eliminated: elimination_stats,
        });
        current = next;
    }
}

/// Returns the candidate(s) finishing in the n-th position.
///
/// Position 1 is the winner of the count. For the next positions, the
/// winners are removed from a copy of the ballots and the count is run again.
/// Returns an empty list once all the candidates have been placed.
pub fn nth_place(state: &ElectionState, n: usize) -> Result<Vec<String>, VotingError> {
    match n {
        0 => Ok(Vec::new()),
        1 => compute_winner(state),
        _ => {
            let winners = compute_winner(state)?;
            if winners.is_empty() {
                return Ok(Vec::new());
            }
            debug!("nth_place: {}: removing {:?}", n, winners);
            let mut next = state.fresh_copy();
            next.eliminate_all(&winners);
            nth_place(&next, n - 1)
        }
    }
}

/// The finishing order of all the candidates: the same as calling
/// `nth_place` with 1, 2, ... until it comes back empty.
pub fn full_ranking(state: &ElectionState) -> Result<Vec<Vec<String>>, VotingError> {
    let mut res: Vec<Vec<String>> = Vec::new();
    let mut current = state.clone();
    loop {
        let winners = compute_winner(&current)?;
        if winners.is_empty() {
            return Ok(res);
        }
        info!("full_ranking: place {}: {:?}", res.len() + 1, winners);
        current = current.fresh_copy();
        current.eliminate_all(&winners);
        res.push(winners);
    }
}

/// The number of first choices needed for a strict majority.
pub fn majority_threshold(num_ballots: usize) -> u64 {
    if num_ballots == 0 {
        0
    } else {
        (num_ballots as u64 / 2) + 1
    }
}
