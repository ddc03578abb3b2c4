use crate::irv::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The description of the contest, as written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    pub first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    pub first_vote_row_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    /// Labels of the ranks in a `csv_likert` file, from the first choice to
    /// the last. Cells hold rank numbers when absent.
    pub choices: Option<Vec<String>>,
}

impl FileSource {
    /// The first column holding a choice, starting at 0. Defaults to the
    /// first column.
    pub fn first_vote_column(&self) -> IrvResult<usize> {
        match &self.first_vote_column_index {
            Some(_) => read_js_index(&self.first_vote_column_index),
            None => Ok(0),
        }
    }

    /// The first row holding a ballot, starting at 0. Defaults to the
    /// second row: the first one is a header.
    pub fn first_vote_row(&self) -> IrvResult<usize> {
        match &self.first_vote_row_index {
            Some(_) => read_js_index(&self.first_vote_row_index),
            None => Ok(1),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "maxRankMode")]
    pub max_rank_mode: Option<String>,
}

impl RulesConfig {
    pub fn vote_rules(&self) -> IrvResult<VoteRules> {
        let tiebreak_mode = match self.tiebreak_mode.as_deref() {
            None | Some("deeperRanks") => TieBreakMode::DeeperRanks,
            Some("firstRankOnly") => TieBreakMode::FirstRankOnly,
            Some(x) => {
                return UnknownRuleSnafu {
                    option: "tiebreakMode",
                    value: x,
                }
                .fail()
            }
        };
        let max_rank_policy = match self.max_rank_mode.as_deref() {
            None | Some("recompute") => MaxRankPolicy::Recompute,
            Some("decrementPerElimination") => MaxRankPolicy::DecrementPerElimination,
            Some(x) => {
                return UnknownRuleSnafu {
                    option: "maxRankMode",
                    value: x,
                }
                .fail()
            }
        };
        Ok(VoteRules {
            tiebreak_mode,
            max_rank_policy,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct IrvConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "ballotSources")]
    pub ballot_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: RulesConfig,
}

pub fn read_config(path: &str) -> IrvResult<IrvConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: IrvConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> IrvResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// Reads a 1-based index, either as a number, a string of digits or an Excel
// column name, and returns it 0-based.
fn read_js_index(x: &Option<JSValue>) -> IrvResult<usize> {
    let idx: Option<usize> = match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize),
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            s.to_ascii_lowercase().chars().try_fold(0usize, |acc, c| {
                acc.checked_mul(26)?
                    .checked_add(c as usize - 'a' as usize + 1)
            })
        }
        Some(JSValue::String(s)) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    match idx {
        Some(i) if i >= 1 => Ok(i - 1),
        _ => ParsingJsonNumberSnafu {
            value: format!("{:?}", x),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(col: Option<JSValue>, row: Option<JSValue>) -> FileSource {
        FileSource {
            provider: "csv".to_string(),
            file_path: "ballots.csv".to_string(),
            first_vote_column_index: col,
            first_vote_row_index: row,
            excel_worksheet_name: None,
            choices: None,
        }
    }

    #[test]
    fn indexes() {
        assert_eq!(source(Some(json!(2)), None).first_vote_column().unwrap(), 1);
        assert_eq!(source(Some(json!("3")), None).first_vote_column().unwrap(), 2);
        assert_eq!(source(Some(json!("B")), None).first_vote_column().unwrap(), 1);
        assert_eq!(source(Some(json!("aa")), None).first_vote_column().unwrap(), 26);
        assert_eq!(source(None, None).first_vote_column().unwrap(), 0);
        assert_eq!(source(None, None).first_vote_row().unwrap(), 1);
        assert_eq!(source(None, Some(json!(1))).first_vote_row().unwrap(), 0);
        assert!(source(Some(json!(0)), None).first_vote_column().is_err());
        assert!(source(Some(json!(true)), None).first_vote_column().is_err());
    }

    #[test]
    fn long_column_name() {
        assert_eq!(source(Some(json!("ZZ")), None).first_vote_column().unwrap(), 701);
        let err = source(Some(json!("ZZZZZZZZZZZZZZ")), None)
            .first_vote_column()
            .unwrap_err();
        assert!(matches!(err, IrvError::ParsingJsonNumber { .. }));
    }

    #[test]
    fn rules() {
        let default_rules = RulesConfig::default().vote_rules().unwrap();
        assert_eq!(default_rules, VoteRules::DEFAULT_RULES);

        let rc = RulesConfig {
            tiebreak_mode: Some("firstRankOnly".to_string()),
            max_rank_mode: Some("decrementPerElimination".to_string()),
        };
        assert_eq!(
            rc.vote_rules().unwrap(),
            VoteRules {
                tiebreak_mode: TieBreakMode::FirstRankOnly,
                max_rank_policy: MaxRankPolicy::DecrementPerElimination,
            }
        );

        let bad = RulesConfig {
            tiebreak_mode: Some("random".to_string()),
            max_rank_mode: None,
        };
        assert!(matches!(
            bad.vote_rules(),
            Err(IrvError::UnknownRule { .. })
        ));
    }

    #[test]
    fn parse_config() {
        let js = r#"{
            "outputSettings": {"contestName": "Fruit", "contestDate": "2022-10-21"},
            "ballotSources": [{"provider": "csv", "filePath": "fruit.csv", "firstVoteColumnIndex": "B"}]
        }"#;
        let config: IrvConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.contest_name, "Fruit");
        assert_eq!(config.output_settings.output_path, None);
        assert_eq!(config.ballot_sources.len(), 1);
        assert_eq!(config.ballot_sources[0].first_vote_column().unwrap(), 1);
        assert_eq!(config.rules, RulesConfig::default());
    }
}
