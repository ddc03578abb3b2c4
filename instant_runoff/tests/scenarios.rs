use instant_runoff::rounds::{full_ranking, tabulate};
use instant_runoff::*;
use std::collections::{HashMap, HashSet};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn prefs(l: &[(&str, u32)]) -> Vec<Preference> {
    l.iter().map(|(c, r)| Preference::new(*c, *r)).collect()
}

fn names(l: &[&str]) -> Vec<String> {
    l.iter().map(|s| s.to_string()).collect()
}

// apple: 6 first choices, banana: 5, carrot: 1, date: 0.
fn uniform_ballots() -> Vec<Vec<Preference>> {
    let apple_first = prefs(&[("apple", 1), ("banana", 2), ("carrot", 3), ("date", 4)]);
    let banana_first = prefs(&[("apple", 2), ("banana", 1), ("carrot", 3), ("date", 4)]);
    let carrot_first = prefs(&[("apple", 3), ("banana", 2), ("carrot", 1), ("date", 4)]);
    vec![
        apple_first.clone(),
        apple_first.clone(),
        apple_first.clone(),
        banana_first.clone(),
        banana_first.clone(),
        banana_first.clone(),
        banana_first.clone(),
        banana_first,
        apple_first.clone(),
        apple_first.clone(),
        carrot_first,
        apple_first,
    ]
}

fn non_uniform_ballots() -> Vec<Vec<Preference>> {
    vec![
        prefs(&[("apple", 1), ("banana", 2), ("carrot", 3), ("date", 4)]),
        prefs(&[
            ("apple", 1),
            ("banana", 2),
            ("date", 3),
            ("elderberry", 4),
            ("fig", 5),
        ]),
        prefs(&[
            ("apple", 5),
            ("banana", 2),
            ("carrot", 3),
            ("date", 4),
            ("elderberry", 1),
        ]),
        prefs(&[("apple", 2), ("banana", 1), ("carrot", 3), ("date", 4)]),
        prefs(&[("apple", 3), ("carrot", 1), ("date", 2)]),
        prefs(&[("apple", 2), ("banana", 1), ("carrot", 3), ("date", 4)]),
        prefs(&[("apple", 2), ("banana", 1)]),
        prefs(&[("apple", 2), ("banana", 1), ("carrot", 3), ("date", 4)]),
        prefs(&[("banana", 1), ("carrot", 2), ("date", 3)]),
        prefs(&[("apple", 1)]),
        prefs(&[
            ("apple", 3),
            ("banana", 2),
            ("carrot", 1),
            ("date", 4),
            ("elderberry", 5),
        ]),
        prefs(&[("apple", 1), ("banana", 2), ("carrot", 3), ("date", 4)]),
    ]
}

fn election(ballots: &[Vec<Preference>], rules: &VoteRules) -> ElectionState {
    let mut e = ElectionState::new(rules);
    for b in ballots {
        e.add_preferences(b).unwrap();
    }
    e
}

fn distinct_candidates(ballots: &[Vec<Preference>]) -> usize {
    ballots
        .iter()
        .flatten()
        .map(|p| p.candidate.clone())
        .collect::<HashSet<String>>()
        .len()
}

/// Sums the sizes of the places 1, 2, ... until an empty place is returned.
fn count_placed(e: &ElectionState) -> usize {
    let mut placed = 0;
    let mut n = 1;
    loop {
        let place = e.nth_candidate(n).unwrap();
        if place.is_empty() {
            return placed;
        }
        placed += place.len();
        n += 1;
    }
}

#[test]
fn no_votes() {
    init();
    let e = ElectionState::default();
    assert_eq!(e.winner().unwrap(), Vec::<String>::new());
    assert!(e.nth_candidate(1).unwrap().is_empty());
}

#[test]
fn one_vote() {
    init();
    let e = election(&uniform_ballots()[..1], &VoteRules::DEFAULT_RULES);
    assert_eq!(e.winner().unwrap(), names(&["apple"]));
}

#[test]
fn uniform_first_choice_counts() {
    init();
    let e = election(&uniform_ballots(), &VoteRules::DEFAULT_RULES);
    let expected: HashMap<String, u64> = [("apple", 6), ("banana", 5), ("carrot", 1), ("date", 0)]
        .iter()
        .map(|(c, n)| (c.to_string(), *n))
        .collect();
    assert_eq!(e.count_at_rank(1), expected);
}

#[test]
fn half_of_the_votes_is_not_a_majority() {
    init();
    let e = election(&uniform_ballots(), &VoteRules::DEFAULT_RULES);
    // 6 out of 12 does not win outright.
    assert!(!e.has_decisive_result());
    // date and then carrot are eliminated, carrot's ballot goes to banana and
    // the last two candidates end up tied.
    assert_eq!(e.winner().unwrap(), names(&["apple", "banana"]));

    let res = tabulate(&e).unwrap();
    assert_eq!(res.threshold, 7);
    assert_eq!(res.round_stats.len(), 3);
    assert_eq!(res.round_stats[0].tally_result_eliminated[0].name, "date");
    assert_eq!(res.round_stats[1].tally_result_eliminated[0].name, "carrot");
    assert_eq!(
        res.round_stats[1].tally_result_eliminated[0].transfers,
        vec![("banana".to_string(), 1)]
    );
    assert_eq!(
        res.round_stats[2].tally,
        vec![("apple".to_string(), 6), ("banana".to_string(), 6)]
    );
}

#[test]
fn uniform_places() {
    init();
    let e = election(&uniform_ballots(), &VoteRules::DEFAULT_RULES);
    assert_eq!(e.nth_candidate(2).unwrap(), names(&["carrot"]));
    assert_eq!(e.nth_candidate(3).unwrap(), names(&["date"]));
    assert!(e.nth_candidate(4).unwrap().is_empty());
    assert_eq!(
        full_ranking(&e).unwrap(),
        vec![names(&["apple", "banana"]), names(&["carrot"]), names(&["date"])]
    );
}

#[test]
fn uniform_all_candidates_returned() {
    init();
    let ballots = uniform_ballots();
    let e = election(&ballots, &VoteRules::DEFAULT_RULES);
    assert_eq!(count_placed(&e), distinct_candidates(&ballots));
}

#[test]
fn non_uniform_all_candidates_returned() {
    init();
    let ballots = non_uniform_ballots();
    for rules in [
        VoteRules::DEFAULT_RULES,
        VoteRules {
            tiebreak_mode: TieBreakMode::FirstRankOnly,
            max_rank_policy: MaxRankPolicy::Recompute,
        },
        VoteRules {
            tiebreak_mode: TieBreakMode::DeeperRanks,
            max_rank_policy: MaxRankPolicy::DecrementPerElimination,
        },
    ] {
        let e = election(&ballots, &rules);
        assert_eq!(count_placed(&e), 6, "rules: {:?}", rules);
        let ranking = full_ranking(&e).unwrap();
        assert_eq!(ranking.iter().map(|p| p.len()).sum::<usize>(), 6);
    }
}

#[test]
fn non_uniform_first_choices_add_up() {
    init();
    let e = election(&non_uniform_ballots(), &VoteRules::DEFAULT_RULES);
    let total: u64 = e.count_at_rank(1).values().sum();
    assert_eq!(total, 12);
    assert_eq!(e.candidates().len(), 6);
    assert_eq!(e.max_rank(), 5);
}

#[test]
fn strict_majority_wins_alone() {
    init();
    let mut e = ElectionState::default();
    for _ in 0..3 {
        e.add_preferences(&prefs(&[("banana", 1), ("apple", 2)])).unwrap();
    }
    e.add_preferences(&prefs(&[("apple", 1)])).unwrap();
    e.add_preferences(&prefs(&[("carrot", 1), ("apple", 2)])).unwrap();
    assert_eq!(e.winner().unwrap(), names(&["banana"]));
}

#[test]
fn all_tied_are_all_winners() {
    init();
    let mut e = ElectionState::default();
    e.add_preferences(&prefs(&[("apple", 1), ("banana", 2)])).unwrap();
    e.add_preferences(&prefs(&[("banana", 1), ("carrot", 2)])).unwrap();
    e.add_preferences(&prefs(&[("carrot", 1), ("apple", 2)])).unwrap();
    assert_eq!(e.winner().unwrap(), names(&["apple", "banana", "carrot"]));
    assert!(e.nth_candidate(2).unwrap().is_empty());
}

#[test]
fn bad_ballots_are_rejected() {
    init();
    let mut e = ElectionState::default();
    let err = e
        .add_preferences(&prefs(&[("apple", 1), ("banana", 1)]))
        .unwrap_err();
    assert_eq!(
        err,
        VotingError::DuplicateRank {
            rank: 1,
            existing: "apple".to_string()
        }
    );
    assert_eq!(e.num_ballots(), 0);
    assert!(e.candidates().is_empty());
}

// Under the decrement policy, each round measures the longest ballot again
// before counting its own eliminations.
#[test]
fn decrement_policy_restarts_each_round() {
    init();
    let rules = VoteRules {
        tiebreak_mode: TieBreakMode::DeeperRanks,
        max_rank_policy: MaxRankPolicy::DecrementPerElimination,
    };
    let mut e = ElectionState::new(&rules);
    for r in [
        names(&["c", "d", "e", "f"]),
        names(&["a", "d", "c", "e", "f"]),
        names(&["f", "e"]),
        names(&["a", "d", "b", "c"]),
    ] {
        e.add_ballot(Ballot::from_ranking(&r).unwrap());
    }

    let res = tabulate(&e).unwrap();
    let eliminated: Vec<Vec<String>> = res
        .round_stats
        .iter()
        .map(|rs| {
            rs.tally_result_eliminated
                .iter()
                .map(|es| es.name.clone())
                .collect()
        })
        .collect();
    // In round 4, c and f are tied on first choices: the third choices
    // still separate them.
    assert_eq!(
        eliminated,
        vec![
            names(&["b"]),
            names(&["d"]),
            names(&["e"]),
            names(&["c"]),
            vec![]
        ]
    );
    assert_eq!(res.winners, names(&["a", "f"]));
    assert_eq!(e.nth_candidate(1).unwrap(), names(&["a", "f"]));
    assert_eq!(full_ranking(&e).unwrap()[0], names(&["a", "f"]));
}
