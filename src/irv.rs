use log::{debug, info, warn};

use instant_runoff::rounds::{full_ranking, tabulate};
use instant_runoff::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::irv::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_json;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IrvError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Line {lineno}: cannot read a choice from cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected an index starting at 1, got {value}"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Line {lineno}: error reading CSV"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("No header row with the names of the candidates in {path}"))]
    CsvMissingHeader { path: String },
    #[snafu(display("Line {lineno}: cannot read a rank from {content}"))]
    InvalidRank { lineno: usize, content: String },
    #[snafu(display("Ballot {id} (line {lineno}) is not valid"))]
    InvalidBallot {
        source: VotingError,
        id: String,
        lineno: usize,
    },
    #[snafu(display("Counting failed"))]
    Counting { source: VotingError },
    #[snafu(display("Unknown input type {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown value for {option}: {value}"))]
    UnknownRule { option: String, value: String },
    #[snafu(display("No input: pass a configuration file (--config) or an input file (--input)"))]
    MissingInput {},
    #[snafu(display("No ballot source in the configuration"))]
    NoBallotSource {},
    #[snafu(display("Cannot find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type IrvResult<T> = Result<T, IrvError>;

/// A ballot, as read from a file, before any validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: String,
    /// The position in the file, starting at 1.
    pub lineno: usize,
    pub choices: Vec<Preference>,
}

fn result_stats_to_json(rs: &VotingResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (name, count) in round_stat.tally.iter() {
            tally.insert(name.clone(), json!(count.to_string()));
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        for elim_stats in round_stat.tally_result_eliminated.iter() {
            let mut transfers: JSMap<String, JSValue> = JSMap::new();
            for (name, count) in elim_stats.transfers.iter() {
                transfers.insert(name.clone(), json!(count.to_string()));
            }
            if elim_stats.exhausted > 0 {
                transfers.insert(
                    "exhausted".to_string(),
                    json!(elim_stats.exhausted.to_string()),
                );
            }
            tally_results.push(json!({
                "eliminated": elim_stats.name,
                "transfers": transfers
            }));
        }
        for winner_name in round_stat.tally_results_elected.iter() {
            tally_results.push(json!({
                "elected": winner_name,
                "transfers": {}
            }));
        }

        let js = json!({"round": round_stat.round, "tally": tally, "tallyResults": tally_results});
        l.push(js);
    }
    l
}

fn build_summary_js(
    settings: &OutputSettings,
    places: &[Vec<String>],
    rv: &VotingResult,
) -> JSValue {
    let c = OutputConfig {
        contest: settings.contest_name.clone(),
        date: settings.contest_date.clone(),
        jurisdiction: settings.contest_jurisdiction.clone(),
        office: settings.contest_office.clone(),
        threshold: Some(rv.threshold.to_string()),
    };
    json!({
        "config": c,
        "places": places,
        "results": result_stats_to_json(rv)
    })
}

fn read_ranking_data(path: &Path, cfs: &FileSource) -> IrvResult<Vec<ParsedBallot>> {
    let p = path.display().to_string();
    info!("Attempting to read rank file {:?}", p);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_ranking(&p, cfs),
        "csv_likert" => io_csv::read_csv_likert(&p, cfs),
        "xlsx" => io_excel::read_excel_ranking(&p, cfs),
        "json" => io_json::read_json_ballots(&p),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn validate_ballots(parsed: &[ParsedBallot]) -> IrvResult<Vec<Ballot>> {
    let mut res: Vec<Ballot> = Vec::new();
    for pb in parsed.iter() {
        if pb.choices.is_empty() {
            debug!("validate_ballots: {}: empty ballot", pb.id);
            continue;
        }
        let ballot = Ballot::from_preferences(&pb.choices).context(InvalidBallotSnafu {
            id: pb.id.clone(),
            lineno: pb.lineno,
        })?;
        res.push(ballot);
    }
    Ok(res)
}

/// Counts an election from its configuration. Relative ballot files are read
/// from `root`. Returns the summary.
pub fn tabulate_election(config: &IrvConfig, root: &Path) -> IrvResult<JSValue> {
    let rules = config.rules.vote_rules()?;
    ensure!(!config.ballot_sources.is_empty(), NoBallotSourceSnafu {});

    let mut election = ElectionState::new(&rules);
    for cfs in config.ballot_sources.iter() {
        let p: PathBuf = root.join(&cfs.file_path);
        let parsed = read_ranking_data(&p, cfs)?;
        for ballot in validate_ballots(&parsed)? {
            election.add_ballot(ballot);
        }
    }
    info!(
        "tabulate_election: {} ballots, candidates: {:?}",
        election.num_ballots(),
        election.candidates()
    );

    let result = tabulate(&election).context(CountingSnafu {})?;
    let places = full_ranking(&election).context(CountingSnafu {})?;
    info!("tabulate_election: winners: {:?}", result.winners);
    Ok(build_summary_js(&config.output_settings, &places, &result))
}

fn write_summary(summary: &JSValue, out: Option<&str>) -> IrvResult<()> {
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    match out {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            info!("Writing the summary to {:?}", path);
            fs::write(path, pretty_js_stats).context(WritingSummarySnafu { path })?;
        }
    }
    Ok(())
}

/// Compares the summary with a reference summary. Differences are printed.
fn check_summary(summary: &JSValue, reference_path: &str) -> IrvResult<()> {
    let summary_ref = read_summary(reference_path)?;
    if &summary_ref == summary {
        info!("The summary matches the reference {:?}", reference_path);
        return Ok(());
    }
    warn!("Found differences with the reference summary");
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    print_diff(
        pretty_js_summary_ref.as_str(),
        pretty_js_stats.as_str(),
        "\n",
    );
    ReferenceMismatchSnafu {}.fail()
}

fn source_from_args(input: &str, args: &Args) -> FileSource {
    FileSource {
        provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
        file_path: input.to_string(),
        first_vote_column_index: args.first_vote_column.as_ref().map(|x| json!(x)),
        first_vote_row_index: args.first_vote_row.map(|x| json!(x)),
        excel_worksheet_name: args.excel_worksheet_name.clone(),
        choices: args.choices.clone(),
    }
}

fn run_config(
    config: &IrvConfig,
    root: &Path,
    out: Option<&str>,
    check_summary_path: Option<&str>,
) -> IrvResult<()> {
    let summary = tabulate_election(config, root)?;

    let output_path: Option<String> = match (out, &config.output_settings.output_path) {
        (Some(o), _) => Some(o.to_string()),
        (None, Some(p)) => Some(root.join(p).display().to_string()),
        (None, None) => None,
    };
    write_summary(&summary, output_path.as_deref())?;

    if let Some(summary_p) = check_summary_path {
        check_summary(&summary, summary_p)?;
    }
    Ok(())
}

/// Runs the election described by the command line. The flags take
/// precedence over the configuration file.
pub fn run_election(args: &Args) -> IrvResult<()> {
    let (mut config, root) = match (&args.config, &args.input) {
        (Some(config_path), _) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            (config, root)
        }
        (None, Some(input)) => {
            let config = IrvConfig {
                output_settings: OutputSettings {
                    contest_name: io_common::simplify_file_name(input),
                    contest_date: None,
                    contest_jurisdiction: None,
                    contest_office: None,
                    output_path: None,
                },
                ballot_sources: vec![source_from_args(input, args)],
                rules: RulesConfig::default(),
            };
            (config, PathBuf::new())
        }
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    if let (Some(_), Some(input)) = (&args.config, &args.input) {
        // Relative to the working directory, not to the configuration.
        let input_p = std::env::current_dir()
            .map(|d| d.join(input))
            .unwrap_or_else(|_| PathBuf::from(input));
        config.ballot_sources = vec![source_from_args(&input_p.display().to_string(), args)];
    }
    if args.tiebreak_mode.is_some() {
        config.rules.tiebreak_mode = args.tiebreak_mode.clone();
    }
    if args.max_rank_mode.is_some() {
        config.rules.max_rank_mode = args.max_rank_mode.clone();
    }
    debug!("run_election: config: {:?}", config);

    run_config(
        &config,
        &root,
        args.out.as_deref(),
        args.reference.as_deref(),
    )
}
