use std::fs::File;
use std::io::{BufReader, Read};

use serde::Deserialize;

use crate::irv::{io_common::make_default_id, *};

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct JsonPreference {
    candidate: String,
    rank: u32,
}

/// A list of ballots, each a list of `{"candidate": ..., "rank": ...}`.
pub fn read_json_ballots(path: &str) -> IrvResult<Vec<ParsedBallot>> {
    let file = File::open(path).context(OpeningJsonSnafu { path })?;
    let res = read_json_reader(BufReader::new(file), path)?;
    info!("read_json_ballots: {}: {} ballots", path, res.len());
    Ok(res)
}

fn read_json_reader<R: Read>(rdr: R, path: &str) -> IrvResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);
    let ballots: Vec<Vec<JsonPreference>> =
        serde_json::from_reader(rdr).context(ParsingJsonSnafu {})?;
    Ok(ballots
        .into_iter()
        .enumerate()
        .map(|(idx, prefs)| ParsedBallot {
            id: default_id(idx + 1),
            lineno: idx + 1,
            choices: prefs
                .into_iter()
                .map(|p| Preference::new(p.candidate, p.rank))
                .collect(),
        })
        .collect())
}
