// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use crate::irv::{
    io_common::{assemble_ranking, make_default_id},
    *,
};

/// One ballot per row, the choices in order of preference.
pub fn read_csv_ranking(path: &str, cfs: &FileSource) -> IrvResult<Vec<ParsedBallot>> {
    let rdr = open_csv(path)?;
    read_ranking_records(rdr, path, cfs)
}

/// One ballot per row, one column per candidate. The header holds the names
/// of the candidates and the cells hold the ranks.
pub fn read_csv_likert(path: &str, cfs: &FileSource) -> IrvResult<Vec<ParsedBallot>> {
    let rdr = open_csv(path)?;
    read_likert_records(rdr, path, cfs)
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

fn open_csv(path: &str) -> IrvResult<csv::Reader<File>> {
    csv_builder().from_path(path).context(CsvOpenSnafu { path })
}

fn read_ranking_records<R: Read>(
    rdr: csv::Reader<R>,
    path: &str,
    cfs: &FileSource,
) -> IrvResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);
    let first_row = cfs.first_vote_row()?;
    let first_col = cfs.first_vote_column()?;

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate().skip(first_row) {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let id = default_id(lineno);
        let cells: Vec<&str> = line.iter().skip(first_col).collect();
        if cells.first().map_or(true, |c| c.trim().is_empty()) {
            debug!("read_csv_ranking: {}: no first choice, skipping", id);
            continue;
        }
        let choices = assemble_ranking(&id, &cells);
        debug!("read_csv_ranking: {}: {:?}", id, choices);
        res.push(ParsedBallot {
            id,
            lineno,
            choices,
        });
    }
    info!("read_csv_ranking: {}: {} ballots", path, res.len());
    Ok(res)
}

fn read_likert_records<R: Read>(
    rdr: csv::Reader<R>,
    path: &str,
    cfs: &FileSource,
) -> IrvResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);
    let first_row = cfs.first_vote_row()?;
    let first_col = cfs.first_vote_column()?;
    ensure!(first_row >= 1, CsvMissingHeaderSnafu { path });

    // The header is the row just above the first ballot.
    let mut records = rdr.into_records().enumerate().skip(first_row - 1);
    let (header_idx, header_r) = records.next().context(CsvMissingHeaderSnafu { path })?;
    let header = header_r.context(CsvLineParseSnafu {
        lineno: header_idx + 1,
    })?;
    let candidates: Vec<String> = header
        .iter()
        .skip(first_col)
        .map(|s| s.trim().to_string())
        .collect();
    debug!("read_csv_likert: candidates: {:?}", candidates);

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in records {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let mut choices: Vec<Preference> = Vec::new();
        for (name, cell) in candidates.iter().zip(line.iter().skip(first_col)) {
            let cell = cell.trim();
            if name.is_empty() || cell.is_empty() {
                continue;
            }
            let rank = parse_rank(cell, &cfs.choices).context(InvalidRankSnafu {
                lineno,
                content: cell,
            })?;
            choices.push(Preference::new(name.as_str(), rank));
        }
        res.push(ParsedBallot {
            id: default_id(lineno),
            lineno,
            choices,
        });
    }
    info!("read_csv_likert: {}: {} ballots", path, res.len());
    Ok(res)
}

fn parse_rank(cell: &str, labels: &Option<Vec<String>>) -> Option<u32> {
    if let Some(pos) = labels.iter().flatten().position(|l| l == cell) {
        return rank_from_index(pos);
    }
    cell.parse::<u32>().ok()
}
