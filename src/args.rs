use clap::Parser;

/// Instant-runoff tabulation of ranked ballots.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration of the election: contest, ballot files and rules.
    /// See the manual of the instant_runoff crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference summary of the election in JSON format. If provided, irvtab will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file with the ballots. Setting this option overrides the ballot sources that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv, csv_likert, xlsx or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default 1) The column of the first choice, starting at 1. An Excel column name (B) also works.
    #[clap(long, value_parser)]
    pub first_vote_column: Option<String>,

    /// (default 2) The row of the first ballot, starting at 1.
    #[clap(long, value_parser)]
    pub first_vote_row: Option<usize>,

    /// (list of comma-separated values or not specified) If specified, the list of labels for the ranks. This is useful for
    /// Likert-like styles of inputs in which there is no natural order.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub choices: Option<Vec<String>>,

    /// When using an Excel file, the name of the worksheet to use. Defaults to the first worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default deeperRanks) How ties for the last place are broken: deeperRanks or firstRankOnly.
    #[clap(long, value_parser)]
    pub tiebreak_mode: Option<String>,

    /// (default recompute) How deep a tie break may look: recompute or decrementPerElimination.
    #[clap(long, value_parser)]
    pub max_rank_mode: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
