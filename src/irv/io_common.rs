use std::collections::HashSet;
use std::path::Path;

use crate::irv::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Builds the ids of the ballots of a file: the name of the file followed by
/// the line number.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Turns the cells of a row, in order of preference, into ranks.
///
/// Blank cells are skipped and the next filled cell takes the rank. A
/// candidate that shows up a second time keeps its first rank.
/// Choices past rank `u32::MAX` are dropped.
pub fn assemble_ranking<S: AsRef<str>>(ballot_id: &str, cells: &[S]) -> Vec<Preference> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<Preference> = Vec::new();
    for cell in cells.iter() {
        let name = cell.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            warn!(
                "assemble_ranking: {}: {} is ranked several times, keeping the first rank",
                ballot_id, name
            );
            continue;
        }
        match rank_from_index(res.len()) {
            Some(rank) => res.push(Preference::new(name, rank)),
            None => {
                warn!(
                    "assemble_ranking: {}: too many choices, ignoring {} and the next ones",
                    ballot_id, name
                );
                break;
            }
        }
    }
    res
}
