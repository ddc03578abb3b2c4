use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::irv::{
    io_common::{assemble_ranking, make_default_id},
    *,
};

/// Same layout as a `csv` file: one ballot per row, the choices in order.
/// This is the shape of the responses of an online form.
pub fn read_excel_ranking(path: &str, cfs: &FileSource) -> IrvResult<Vec<ParsedBallot>> {
    let wrange = get_range(path, cfs)?;
    let res = read_ranking_rows(wrange.rows(), path, cfs)?;
    info!("read_excel_ranking: {}: {} ballots", path, res.len());
    Ok(res)
}

fn read_ranking_rows<'a>(
    rows: impl Iterator<Item = &'a [DataType]>,
    path: &str,
    cfs: &FileSource,
) -> IrvResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);
    let first_row = cfs.first_vote_row()?;
    let first_col = cfs.first_vote_column()?;

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, row) in rows.enumerate().skip(first_row) {
        let lineno = idx + 1;
        let id = default_id(lineno);
        let cells = row
            .iter()
            .skip(first_col)
            .map(|cell| read_cell(cell, lineno))
            .collect::<IrvResult<Vec<String>>>()?;
        if cells.first().map_or(true, |c| c.trim().is_empty()) {
            debug!("read_excel_ranking: {}: no first choice, skipping", id);
            continue;
        }
        let choices = assemble_ranking(&id, &cells);
        debug!("read_excel_ranking: {}: {:?}", id, choices);
        res.push(ParsedBallot {
            id,
            lineno,
            choices,
        });
    }
    Ok(res)
}

fn read_cell(cell: &DataType, lineno: usize) -> IrvResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok(String::new()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(path: &str, cfs: &FileSource) -> IrvResult<Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &cfs.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    if let Some(worksheet_name) = &cfs.excel_worksheet_name {
        workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })
    } else {
        let mut all_worksheets = workbook.worksheets();
        if all_worksheets.len() > 1 {
            warn!(
                "get_range: {} has {} worksheets, reading the first one",
                path,
                all_worksheets.len()
            );
        }
        ensure!(!all_worksheets.is_empty(), EmptyExcelSnafu { path });
        let (worksheet_name, wrange) = all_worksheets.swap_remove(0);
        debug!("get_range: reading worksheet {:?}", worksheet_name);
        Ok(wrange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> FileSource {
        FileSource {
            provider: "xlsx".to_string(),
            file_path: "responses.xlsx".to_string(),
            first_vote_column_index: Some(json!("B")),
            first_vote_row_index: None,
            excel_worksheet_name: None,
            choices: None,
        }
    }

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    #[test]
    fn form_responses() {
        let rows: Vec<Vec<DataType>> = vec![
            vec![s("Time"), s("First choice"), s("Second choice")],
            vec![s("09:55"), s("Alice"), s("Bob")],
            vec![s("09:56"), DataType::Empty, DataType::Empty],
            vec![s("09:57"), s("Charlie"), DataType::Empty],
        ];
        let res =
            read_ranking_rows(rows.iter().map(|r| r.as_slice()), "responses.xlsx", &source())
                .unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(
            res[0].choices,
            vec![Preference::new("Alice", 1), Preference::new("Bob", 2)]
        );
        assert_eq!(res[1].id, "responses.xlsx-00000004");
        assert_eq!(res[1].choices, vec![Preference::new("Charlie", 1)]);
    }

    #[test]
    fn wrong_cell_type() {
        let rows: Vec<Vec<DataType>> = vec![
            vec![s("Time"), s("First choice")],
            vec![s("09:55"), DataType::Bool(true)],
        ];
        let err =
            read_ranking_rows(rows.iter().map(|r| r.as_slice()), "responses.xlsx", &source())
                .unwrap_err();
        assert!(matches!(err, IrvError::ExcelWrongCellType { lineno: 2, .. }));
    }
}
